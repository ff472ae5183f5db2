//! Integration tests for the parts CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An empty home directory, so no user-level config leaks into the tests
fn isolated_home() -> PathBuf {
    Path::new(env!("CARGO_TARGET_TMPDIR")).join("parts-empty-home")
}

/// Helper to get a parts command with environment overrides cleared
fn parts() -> Command {
    parts_with_home(&isolated_home())
}

/// A parts command whose global config is read from `home`
fn parts_with_home(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("parts").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    for var in [
        "PARTS_BACKEND",
        "PARTS_DATABASE",
        "PARTS_COLLECTION",
        "PARTS_CURRENCY",
        "PARTS_LOG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Helper to create a test project in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    parts().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

fn setup_sqlite_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    parts()
        .current_dir(tmp.path())
        .args(["init", "--backend", "sqlite"])
        .assert()
        .success();
    tmp
}

/// Helper to add a part
fn add_part(tmp: &TempDir, id: &str, name: &str, model: &str, price: &str, stock: &str) {
    parts()
        .current_dir(tmp.path())
        .args([
            "add", "--id", id, "--name", name, "--model", model, "--price", price, "--stock",
            stock,
        ])
        .assert()
        .success();
}

fn list_lines(tmp: &TempDir) -> Vec<String> {
    let output = parts()
        .current_dir(tmp.path())
        .args(["list", "-f", "lines"])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| l.contains(" | "))
        .map(String::from)
        .collect()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    parts()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("spare parts"));
}

#[test]
fn test_version_displays() {
    parts()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("parts"));
}

#[test]
fn test_unknown_command_fails() {
    parts()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_command_outside_project_fails() {
    let tmp = TempDir::new().unwrap();
    parts()
        .current_dir(tmp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a parts project"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_project_structure() {
    let tmp = TempDir::new().unwrap();

    parts()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(tmp.path().join(".parts").is_dir());
    let config = fs::read_to_string(tmp.path().join(".parts/config.yaml")).unwrap();
    assert!(config.contains("backend: yaml"));
}

#[test]
fn test_init_twice_warns() {
    let tmp = setup_test_project();

    parts()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// ============================================================================
// Add / List Tests
// ============================================================================

#[test]
fn test_list_empty_project() {
    let tmp = setup_test_project();

    parts()
        .current_dir(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spare parts found"));
}

#[test]
fn test_add_then_list_round_trip() {
    let tmp = setup_test_project();

    parts()
        .current_dir(tmp.path())
        .args([
            "add", "--id", "P1", "--name", "Brake Pad", "--model", "Civic", "--price", "500",
            "--stock", "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("added successfully"));

    let lines = list_lines(&tmp);
    assert_eq!(lines, vec!["P1 | Brake Pad | Civic | Rs.500.0 | Stock: 10"]);

    let docs: Vec<_> = fs::read_dir(tmp.path().join(".parts/car_database/spare_parts"))
        .unwrap()
        .collect();
    assert_eq!(docs.len(), 1);
}

#[test]
fn test_list_keeps_insertion_order() {
    let tmp = setup_test_project();
    add_part(&tmp, "Z9", "Wiper", "Alto", "120", "5");
    add_part(&tmp, "A1", "Air Filter", "City", "15.5", "8");

    let lines = list_lines(&tmp);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Z9 |"));
    assert!(lines[1].starts_with("A1 |"));
}

#[test]
fn test_add_with_empty_field_rejected() {
    let tmp = setup_test_project();

    parts()
        .current_dir(tmp.path())
        .args(["add", "--id", "P1", "--name", "Brake Pad", "--price", "500", "--stock", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));

    assert!(list_lines(&tmp).is_empty());
}

#[test]
fn test_add_duplicate_rejected() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");

    parts()
        .current_dir(tmp.path())
        .args([
            "add", "--id", "P1", "--name", "Clutch", "--model", "Jazz", "--price", "900",
            "--stock", "2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(list_lines(&tmp), vec!["P1 | Brake Pad | Civic | Rs.500.0 | Stock: 10"]);
}

#[test]
fn test_add_with_bad_numbers_rejected() {
    let tmp = setup_test_project();

    parts()
        .current_dir(tmp.path())
        .args([
            "add", "--id", "P1", "--name", "Pad", "--model", "Civic", "--price", "abc", "--stock",
            "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("price must be a number"));

    parts()
        .current_dir(tmp.path())
        .args([
            "add", "--id", "P1", "--name", "Pad", "--model", "Civic", "--price", "5", "--stock",
            "3.5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stock must be an integer"));

    assert!(list_lines(&tmp).is_empty());
}

#[test]
fn test_list_formats() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");

    parts()
        .current_dir(tmp.path())
        .args(["list", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"part_id\": \"P1\""));

    parts()
        .current_dir(tmp.path())
        .args(["list", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("part_id,name,car_model,price,stock"))
        .stdout(predicate::str::contains("P1,Brake Pad,Civic,500.0,10"));

    parts()
        .current_dir(tmp.path())
        .args(["list", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::diff("P1\n"));

    parts()
        .current_dir(tmp.path())
        .args(["list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));

    parts()
        .current_dir(tmp.path())
        .args(["list", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brake Pad"));
}

#[test]
fn test_view_alias() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");

    parts()
        .current_dir(tmp.path())
        .arg("view")
        .assert()
        .success()
        .stdout(predicate::str::contains("P1 | Brake Pad"));
}

// ============================================================================
// Update / Delete Tests
// ============================================================================

#[test]
fn test_update_changes_given_fields() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");

    parts()
        .current_dir(tmp.path())
        .args(["update", "--id", "P1", "--stock", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated successfully"));

    assert_eq!(list_lines(&tmp), vec!["P1 | Brake Pad | Civic | Rs.500.0 | Stock: 25"]);
}

#[test]
fn test_update_identical_values_warns() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");

    parts()
        .current_dir(tmp.path())
        .args(["update", "--id", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made"));
}

#[test]
fn test_update_nonexistent_warns() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");

    parts()
        .current_dir(tmp.path())
        .args([
            "update", "--id", "P404", "--name", "Ghost", "--model", "None", "--price", "1",
            "--stock", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));

    assert_eq!(list_lines(&tmp), vec!["P1 | Brake Pad | Civic | Rs.500.0 | Stock: 10"]);
}

#[test]
fn test_update_without_id_fails() {
    let tmp = setup_test_project();

    parts()
        .current_dir(tmp.path())
        .args(["update", "--price", "1", "--stock", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Part ID is required"));
}

#[test]
fn test_delete_then_delete_again() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");
    add_part(&tmp, "P2", "Clutch Plate", "Jazz", "900", "4");

    parts()
        .current_dir(tmp.path())
        .args(["delete", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted successfully"));

    assert_eq!(list_lines(&tmp), vec!["P2 | Clutch Plate | Jazz | Rs.900.0 | Stock: 4"]);

    parts()
        .current_dir(tmp.path())
        .args(["delete", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

// ============================================================================
// Backend / Config Tests
// ============================================================================

#[test]
fn test_sqlite_backend_round_trip() {
    let tmp = setup_sqlite_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");
    add_part(&tmp, "P2", "Clutch Plate", "Jazz", "900", "4");

    assert!(tmp.path().join(".parts/car_database.db").exists());
    assert_eq!(
        list_lines(&tmp),
        vec![
            "P1 | Brake Pad | Civic | Rs.500.0 | Stock: 10",
            "P2 | Clutch Plate | Jazz | Rs.900.0 | Stock: 4",
        ]
    );

    parts()
        .current_dir(tmp.path())
        .args(["delete", "P1"])
        .assert()
        .success();
    assert_eq!(list_lines(&tmp).len(), 1);
}

#[test]
fn test_currency_from_environment() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");

    parts()
        .current_dir(tmp.path())
        .env("PARTS_CURRENCY", "$")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("P1 | Brake Pad | Civic | $500.0 | Stock: 10"));
}

#[cfg(unix)]
#[test]
fn test_global_config_read_from_home_only() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");

    let home = TempDir::new().unwrap();
    let global_dir = if cfg!(target_os = "macos") {
        home.path().join("Library/Application Support/parts")
    } else {
        home.path().join(".config").join("parts")
    };
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(global_dir.join("config.yaml"), "currency: \"EUR \"\n").unwrap();

    parts_with_home(home.path())
        .current_dir(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("P1 | Brake Pad | Civic | EUR 500.0 | Stock: 10"));

    // The default helper never sees that user config
    parts()
        .current_dir(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("P1 | Brake Pad | Civic | Rs.500.0 | Stock: 10"));
}

#[test]
fn test_project_option() {
    let tmp = setup_test_project();
    let elsewhere = TempDir::new().unwrap();

    parts()
        .current_dir(elsewhere.path())
        .arg("--project")
        .arg(tmp.path())
        .args([
            "add", "--id", "P1", "--name", "Brake Pad", "--model", "Civic", "--price", "500",
            "--stock", "10",
        ])
        .assert()
        .success();

    assert_eq!(list_lines(&tmp).len(), 1);
}

#[test]
fn test_config_show() {
    let tmp = setup_sqlite_project();

    parts()
        .current_dir(tmp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backend: sqlite"))
        .stdout(predicate::str::contains("collection: spare_parts"));
}

#[test]
fn test_corrupt_document_reported() {
    let tmp = setup_test_project();
    add_part(&tmp, "P1", "Brake Pad", "Civic", "500", "10");
    fs::write(
        tmp.path().join(".parts/car_database/spare_parts/broken.yaml"),
        "part_id: [unclosed\n",
    )
    .unwrap();

    parts()
        .current_dir(tmp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt document"));
}

#[test]
fn test_completions_generate() {
    parts()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parts"));
}
