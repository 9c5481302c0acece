use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use skein_complete::{Suggestion, SuggestionKind, resolve, should_trigger};
use skein_format::diagnostics::Severity;
use skein_format::{SourceFile, workspace};
use skein_scene::ProjectIndex;

/// Shared workspace state.
struct WorkspaceState {
    /// Open document texts (in-memory, may be unsaved).
    open_docs: HashMap<Url, String>,
    /// Index from the last workspace analysis. Completion requests each read
    /// one consistent snapshot of this behind the lock.
    index: ProjectIndex,
    /// Workspace root path.
    root: Option<PathBuf>,
}

pub struct SkeinLanguageServer {
    client: Client,
    state: Arc<RwLock<WorkspaceState>>,
}

impl SkeinLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(WorkspaceState {
                open_docs: HashMap::new(),
                index: ProjectIndex::new(),
                root: None,
            })),
        }
    }

    /// Rebuild the project index from the workspace and publish diagnostics
    /// for every scene file.
    async fn analyze_workspace(&self) {
        let state = self.state.read().await;
        let root = match &state.root {
            Some(r) => r.clone(),
            None => return,
        };
        let open_docs = state.open_docs.clone();
        drop(state);

        // Collect scene files; open documents override disk content.
        let mut sources: Vec<SourceFile> = Vec::new();
        let mut file_texts: Vec<(Url, String, String)> = Vec::new();
        for path in workspace::scene_file_paths(&root) {
            let Ok(uri) = Url::from_file_path(&path) else {
                continue;
            };
            let Some(project_path) = workspace::project_path_of(&root, &path) else {
                continue;
            };
            let text = if let Some(open_text) = open_docs.get(&uri) {
                open_text.clone()
            } else {
                match std::fs::read_to_string(&path) {
                    Ok(t) => t,
                    Err(_) => continue,
                }
            };
            let Some(file) = SourceFile::new(project_path.clone(), text.clone()) else {
                continue;
            };
            sources.push(file);
            file_texts.push((uri, text, project_path));
        }

        let result = skein_format::build_index(&sources);

        {
            let mut state = self.state.write().await;
            state.index = result.index;
        }

        // Publish per-file diagnostics. Clean files get an empty set to clear
        // anything stale.
        for (uri, text, project_path) in file_texts {
            let diags = result
                .diagnostics
                .get(&project_path)
                .map(|diags| {
                    diags
                        .iter()
                        .map(|d| Diagnostic {
                            range: byte_span_to_range(&text, &d.span),
                            severity: Some(match d.severity {
                                Severity::Error => DiagnosticSeverity::ERROR,
                                Severity::Warning => DiagnosticSeverity::WARNING,
                            }),
                            source: Some("skein".into()),
                            message: d.message.clone(),
                            ..Default::default()
                        })
                        .collect()
                })
                .unwrap_or_default();
            self.client.publish_diagnostics(uri, diags, None).await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for SkeinLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract workspace root
        let root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| params.root_uri.as_ref().and_then(|u| u.to_file_path().ok()));

        if let Some(root) = root {
            let mut state = self.state.write().await;
            state.root = Some(root);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["\"".into(), ":".into()]),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Skein LSP initialized")
            .await;

        // Initial workspace analysis
        self.analyze_workspace().await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;

        {
            let mut state = self.state.write().await;

            // If no workspace root set yet, derive it from the file's parent
            // directory
            if state.root.is_none()
                && let Ok(path) = uri.to_file_path()
                && let Some(parent) = path.parent()
            {
                state.root = Some(parent.to_path_buf());
            }

            state.open_docs.insert(uri, text);
        }

        self.analyze_workspace().await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().last() {
            {
                let mut state = self.state.write().await;
                state.open_docs.insert(uri, change.text);
            }
            self.analyze_workspace().await;
        }
    }

    async fn did_save(&self, _params: DidSaveTextDocumentParams) {
        // Re-index on save (disk state may differ from open docs)
        self.analyze_workspace().await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        {
            let mut state = self.state.write().await;
            state.open_docs.remove(&params.text_document.uri);
        }
        self.analyze_workspace().await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let state = self.state.read().await;

        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();

        let text = file_text(&state, &uri);
        if !should_trigger(&extension, line_prefix(&text, position)) {
            return Ok(None);
        }

        let Some(root) = state.root.as_ref() else {
            return Ok(None);
        };
        let Some(script_path) = workspace::project_path_of(root, &path) else {
            return Ok(None);
        };

        let suggestions = resolve(&state.index, &script_path);
        if suggestions.is_empty() {
            return Ok(None);
        }
        Ok(Some(CompletionResponse::Array(
            suggestions.iter().map(completion_item).collect(),
        )))
    }
}

/// Get a file's text from open docs or disk.
fn file_text(state: &WorkspaceState, uri: &Url) -> String {
    if let Some(text) = state.open_docs.get(uri) {
        return text.clone();
    }
    if let Ok(path) = uri.to_file_path()
        && let Ok(text) = std::fs::read_to_string(path)
    {
        return text;
    }
    String::new()
}

/// The text of the caret's line up to the caret.
fn line_prefix(text: &str, position: Position) -> &str {
    let Some(line) = text.lines().nth(position.line as usize) else {
        return "";
    };
    let mut end = line.len().min(position.character as usize);
    while end > 0 && !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

fn completion_item(suggestion: &Suggestion) -> CompletionItem {
    let kind = match suggestion.kind {
        SuggestionKind::Component => CompletionItemKind::FIELD,
        SuggestionKind::Instance => CompletionItemKind::MODULE,
    };
    CompletionItem {
        label: suggestion.label.clone(),
        kind: Some(kind),
        detail: Some(suggestion.detail.clone()),
        filter_text: Some(suggestion.filter_text.clone()),
        label_details: Some(CompletionItemLabelDetails {
            detail: None,
            description: Some(suggestion.description.clone()),
        }),
        ..Default::default()
    }
}

fn byte_span_to_range(text: &str, span: &std::ops::Range<usize>) -> Range {
    Range {
        start: byte_offset_to_position(text, span.start),
        end: byte_offset_to_position(text, span.end),
    }
}

fn byte_offset_to_position(text: &str, offset: usize) -> Position {
    let offset = offset.min(text.len());
    let prefix = &text[..offset];
    let line = prefix.matches('\n').count() as u32;
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    Position {
        line,
        character: (offset - line_start) as u32,
    }
}
