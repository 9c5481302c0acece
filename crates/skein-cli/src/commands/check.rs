use std::path::Path;

use colored::Colorize;

pub fn run(dir: &Path) -> Result<(), String> {
    let project = super::project_or_fail(dir)?;

    println!("  {}", "All checks passed.".green());
    println!(
        "  {} game object{}, {} collection{}",
        project.index.game_object_count(),
        super::plural(project.index.game_object_count()),
        project.index.collection_count(),
        super::plural(project.index.collection_count()),
    );
    if project.warnings > 0 {
        println!(
            "  {}",
            format!(
                "{} warning{} (see above)",
                project.warnings,
                super::plural(project.warnings)
            )
            .yellow()
        );
    }

    Ok(())
}
