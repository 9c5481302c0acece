#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable
#![allow(missing_docs)]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a complete test project: one game object,
/// a main collection instancing it, and a spliced HUD collection.
fn test_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("objects")).unwrap();
    fs::create_dir_all(dir.path().join("scripts")).unwrap();
    fs::create_dir_all(dir.path().join("ui")).unwrap();

    fs::write(
        dir.path().join("objects/hero.go"),
        r#"components {
  id: "control"
  component: "/scripts/hero.script"
}
embedded_components {
  id: "sprite"
  type: "sprite"
}
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("main.collection"),
        r#"name: "main"
instances {
  id: "hero"
  prototype: "/objects/hero.go"
}
embedded_instances {
  id: "camera"
  data {
    components {
      id: "follow"
      component: "/scripts/follow.script"
    }
  }
}
collection_instances {
  id: "hud"
  collection: "/ui/hud.collection"
}
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("ui/hud.collection"),
        r#"name: "hud"
embedded_instances {
  id: "bar"
  data {
    components {
      id: "health"
      component: "/scripts/health.script"
    }
  }
}
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("scripts/hero.script"),
        "function init(self)\nend\n",
    )
    .unwrap();
    dir
}

fn skein() -> Command {
    Command::cargo_bin("skein").unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_project() {
    let dir = test_project();
    skein()
        .args(["check", "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("1 game object, 2 collections")),
        );
}

#[test]
fn check_fails_with_invalid_syntax() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.go"), "components {").unwrap();

    skein()
        .args(["check", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unclosed block"));
}

#[test]
fn check_empty_dir_fails() {
    let dir = TempDir::new().unwrap();
    skein()
        .args(["check", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scene files"));
}

#[test]
fn check_reports_dangling_reference_as_warning() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("main.collection"),
        "instances {\n  id: \"ghost\"\n  prototype: \"/missing.go\"\n}\n",
    )
    .unwrap();

    skein()
        .args(["check", "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown prototype"))
        .stdout(predicate::str::contains("All checks passed"));
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_indexed_files() {
    let dir = test_project();
    skein()
        .args(["list", "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("/objects/hero.go")
                .and(predicate::str::contains("/main.collection"))
                .and(predicate::str::contains("/ui/hud.collection"))
                .and(predicate::str::contains("3 scene files")),
        );
}

#[test]
fn list_json_is_valid() {
    let dir = test_project();
    let output = skein()
        .args(["list", "--json", "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON output");
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["path"], "/main.collection");
    assert_eq!(items[0]["kind"], "collection");
}

// ---------------------------------------------------------------------------
// suggest
// ---------------------------------------------------------------------------

#[test]
fn suggest_lists_reachable_addresses() {
    let dir = test_project();
    skein()
        .args([
            "suggest",
            "/scripts/hero.script",
            "-d",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("#control")
                .and(predicate::str::contains("main:/hero"))
                .and(predicate::str::contains("main:/hud/bar#health"))
                .and(predicate::str::contains("10 suggestions")),
        );
}

#[test]
fn suggest_unknown_script_is_silent() {
    let dir = test_project();
    skein()
        .args([
            "suggest",
            "/scripts/nothing.script",
            "-d",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No suggestions"));
}

#[test]
fn suggest_json_filters_components_on_id() {
    let dir = test_project();
    let output = skein()
        .args([
            "suggest",
            "/scripts/hero.script",
            "--json",
            "-d",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON output");
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["label"], "#control");
    assert_eq!(items[0]["filter_text"], "control");
    assert_eq!(items[0]["kind"], "component");
    // Instances filter on their full address.
    let hero = items
        .iter()
        .find(|i| i["label"] == "main:/hero")
        .expect("hero instance");
    assert_eq!(hero["filter_text"], "main:/hero");
    assert_eq!(hero["kind"], "instance");
}
