#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("devnotes").unwrap();
    c.env("DEVNOTES_DIR", temp.path())
        .env("NO_COLOR", "1")
        .env("DEVNOTES_COLOR_SCHEME", "light")
        .env_remove("DEVNOTES_LOG_LEVEL");
    c
}

#[test]
fn first_run_lists_sample_categories() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Frontend Development"))
        .stdout(predicate::str::contains("(server, 1 note)"));
    assert!(temp.path().join("devnotes.sqlite3").exists());
    assert!(temp.path().join("logs").is_dir());
}

#[test]
fn category_search_and_empty_state() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["categories", "--search", "kotlin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No categories found"))
        .stdout(predicate::str::contains("No categories match \"kotlin\""));
}

#[test]
fn notes_by_position_name_and_search() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["notes", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("REST API Best Practices"))
        .stdout(predicate::str::contains("[fav]"));
    cmd(&temp)
        .args(["notes", "database", "--search", "left join"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SQL Joins Cheatsheet"));
    cmd(&temp)
        .args(["notes", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category not found"));
}

#[test]
fn favorites_lists_across_categories() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("Favorites"))
        .stdout(predicate::str::contains("REST API Best Practices"))
        .stdout(predicate::str::contains("CSS Grid Layout").not());
}

#[test]
fn export_writes_both_collections() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("backup.json");
    cmd(&temp)
        .args(["export", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data exported successfully"));

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["categories"].as_array().unwrap().len(), 3);
    assert_eq!(value["notes"].as_array().unwrap().len(), 3);
}

#[test]
fn clear_requires_yes() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    cmd(&temp)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "All data cleared and reset to default",
        ));
}

#[test]
fn theme_and_zoom_persist_between_runs() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: dark (rendering dark)"));
    cmd(&temp)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("theme: dark"));
    cmd(&temp)
        .args(["theme", "sepia"])
        .assert()
        .failure();

    cmd(&temp)
        .args(["zoom", "in"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Text zoom: 3 of 5"));
    cmd(&temp)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("text zoom: 3 of 5"));
}

#[test]
fn zoom_out_stops_at_minimum() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["zoom", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Text zoom: 1 of 5"));
    cmd(&temp)
        .args(["zoom", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already at 1 of 5"));
}

#[test]
fn shell_script_creates_note() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("shell")
        .write_stdin("open 2\nnew-note\ntitle Caching\ntype ETag & friends\nbullets one; two\nsave\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Note saved successfully"));

    cmd(&temp)
        .args(["notes", "Backend APIs", "--search", "etag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Caching"))
        .stdout(predicate::str::contains("ETag & friends one two"));
}

#[test]
fn shell_delete_flow_and_unknown_command() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .write_stdin("frobnicate\ndelete 1\nconfirm\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command `frobnicate`"))
        .stdout(predicate::str::contains("All notes in this category will also be deleted"))
        .stdout(predicate::str::contains("Category deleted successfully"));

    cmd(&temp)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Frontend Development").not());
}

#[test]
fn unsupported_log_level_fails() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["--log-level", "chatty", "categories"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported log level"));
}
