use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use serde_json::json;

pub fn run(dir: &Path, json_output: bool) -> Result<(), String> {
    let project = super::project_or_fail(dir)?;

    let mut rows: Vec<(String, &'static str, usize, usize)> = Vec::new();
    for go in project.index.game_objects() {
        rows.push((go.path.clone(), "go", 0, go.components.len()));
    }
    for collection in project.index.collections() {
        rows.push((
            collection.path.clone(),
            "collection",
            collection.instance_count(),
            collection.component_count(),
        ));
    }
    rows.sort();

    if json_output {
        let items: Vec<_> = rows
            .iter()
            .map(|(path, kind, instances, components)| {
                json!({
                    "path": path,
                    "kind": kind,
                    "instances": instances,
                    "components": components,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&items).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Kind", "Instances", "Components"]);
    for (path, kind, instances, components) in &rows {
        table.add_row(vec![
            path.clone(),
            (*kind).to_string(),
            instances.to_string(),
            components.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scene file{}", rows.len(), super::plural(rows.len()));

    Ok(())
}
