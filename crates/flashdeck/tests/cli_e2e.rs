#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A command isolated from the user's real config and data directories.
fn flashdeck_cmd(home: &Path, data: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("flashdeck"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("FLASHDECK_DATA_DIR")
        .env_remove("FLASHDECK_QUOTA_BYTES")
        .arg("--data-dir")
        .arg(data);
    cmd
}

#[test]
fn test_first_run_lists_starter_deck() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");

    flashdeck_cmd(temp.path(), &data)
        .assert()
        .success()
        .stdout(predicate::str::contains("My First Deck"))
        .stdout(predicate::str::contains("0 cards"));

    assert!(data.join("flashcard-app-version.json").exists());
    assert!(data.join("flashcard-app-decks.json").exists());
}

#[test]
fn test_deck_and_card_workflow() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    let run = |args: &[&str]| flashdeck_cmd(temp.path(), &data).args(args).assert();

    run(&["deck", "create", "Spanish", "-d", "basics"])
        .success()
        .stdout(predicate::str::contains("Created deck \"Spanish\""));

    run(&["card", "add", "2", "hola", "hello"])
        .success()
        .stdout(predicate::str::contains("Added card 1 to deck 2"));
    run(&["card", "add", "2", "gato", "cat"]).success();

    run(&["cards", "2"])
        .success()
        .stdout(predicate::str::contains("hola"))
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("gato"));

    run(&["decks"])
        .success()
        .stdout(predicate::str::contains("2 cards"));

    run(&["card", "edit", "2", "1", "adios", "goodbye"]).success();
    run(&["cards", "2"])
        .success()
        .stdout(predicate::str::contains("adios"))
        .stdout(predicate::str::contains("hola").not());

    run(&["card", "delete", "2", "2"]).success();
    run(&["decks"])
        .success()
        .stdout(predicate::str::contains("1 card"));

    run(&["deck", "rename", "2", "Español"])
        .success()
        .stdout(predicate::str::contains("Renamed deck 2"));
    run(&["decks"])
        .success()
        .stdout(predicate::str::contains("Español basics"));

    run(&["deck", "delete", "2"])
        .success()
        .stdout(predicate::str::contains("Deleted deck \"Español\" and 1 card(s)"));
    run(&["decks"])
        .success()
        .stdout(predicate::str::contains("Español").not());
}

#[test]
fn test_unknown_index_fails() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");

    flashdeck_cmd(temp.path(), &data)
        .args(["cards", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Deck not found: #9"));

    flashdeck_cmd(temp.path(), &data)
        .args(["card", "delete", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Flashcard not found: #1"));
}

#[test]
fn test_blank_card_is_rejected() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");

    flashdeck_cmd(temp.path(), &data)
        .args(["card", "add", "1", "   ", "back"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Front cannot be empty"));
}

#[test]
fn test_study_sessions() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");

    flashdeck_cmd(temp.path(), &data)
        .args(["study", "1", "--studied", "10", "--correct", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8/10 (80%)"));

    flashdeck_cmd(temp.path(), &data)
        .args(["sessions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("My First Deck"));

    flashdeck_cmd(temp.path(), &data)
        .args(["study", "1", "--studied", "2", "--correct", "3"])
        .assert()
        .failure();
}

#[test]
fn test_export_clear_import() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    let export_file = temp.path().join("backup.json");
    let run = |args: &[&str]| flashdeck_cmd(temp.path(), &data).args(args).assert();

    run(&["deck", "create", "Capitals"]).success();
    run(&["card", "add", "2", "France", "Paris"]).success();
    run(&["study", "2", "--studied", "1", "--correct", "1"]).success();

    run(&["export", export_file.to_str().unwrap()]).success();
    let exported = fs::read_to_string(&export_file).unwrap();
    assert!(exported.contains("\"deckId\""));
    assert!(exported.contains("\"cardsStudied\": 1"));

    run(&["clear"])
        .failure()
        .stderr(predicate::str::contains("--yes"));
    run(&["clear", "--yes"])
        .success()
        .stdout(predicate::str::contains("All data cleared"));

    run(&["import", export_file.to_str().unwrap()])
        .success()
        .stdout(predicate::str::contains("Skipping 1 study session(s)"))
        .stdout(predicate::str::contains("Imported 2 deck(s) and 1 card(s)"));

    run(&["decks"])
        .success()
        .stdout(predicate::str::contains("Capitals"))
        .stdout(predicate::str::contains("1 card"));
    run(&["sessions"])
        .success()
        .stdout(predicate::str::contains("No study sessions recorded."));
}

#[test]
fn test_export_to_stdout_is_json() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");

    let output = flashdeck_cmd(temp.path(), &data)
        .args(["export"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["decks"][0]["name"], "My First Deck");
    assert_eq!(doc["decks"][0]["cardCount"], 0);
    assert!(doc["flashcards"].as_array().unwrap().is_empty());
}

#[test]
fn test_info() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");

    flashdeck_cmd(temp.path(), &data)
        .args(["info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0.0"))
        .stdout(predicate::str::contains(data.to_str().unwrap()));

    flashdeck_cmd(temp.path(), &data)
        .args(["info", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deckCount\": 1"))
        .stdout(predicate::str::contains("\"version\": \"1.0.0\""));
}

#[test]
fn test_data_dir_from_env() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("env-data");

    Command::new(cargo_bin("flashdeck"))
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("FLASHDECK_DATA_DIR", &data)
        .args(["deck", "create", "From env"])
        .assert()
        .success();

    assert!(data.join("flashcard-app-decks.json").exists());
    let stored = fs::read_to_string(data.join("flashcard-app-decks.json")).unwrap();
    assert!(stored.contains("From env"));
}
