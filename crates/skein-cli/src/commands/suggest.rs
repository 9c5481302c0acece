use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path, script: &str, json_output: bool) -> Result<(), String> {
    let project = super::project_or_fail(dir)?;
    let suggestions = skein_complete::resolve(&project.index, script);

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&suggestions).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("  No suggestions.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Address", "Type", "File", "Matches on"]);
    for suggestion in &suggestions {
        table.add_row(vec![
            suggestion.label.clone(),
            suggestion.detail.trim_start().to_string(),
            suggestion.description.clone(),
            suggestion.filter_text.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} suggestion{} for {}",
        suggestions.len(),
        super::plural(suggestions.len()),
        script.cyan(),
    );

    Ok(())
}
