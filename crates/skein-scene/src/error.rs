/// Alias for `Result<T, SceneError>`.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur when populating a project index.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// A scene file with the same project path is already indexed.
    #[error("scene file already indexed: \"{0}\"")]
    DuplicatePath(String),

    /// The given path does not follow the project-absolute convention.
    #[error("not a project-absolute path: \"{0}\"")]
    RelativePath(String),
}
