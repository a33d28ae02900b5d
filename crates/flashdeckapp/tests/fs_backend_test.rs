use flashdeckapp::error::FlashdeckError;
use flashdeckapp::store::backend::KeyValueStore;
use flashdeckapp::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("store"));
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_io() {
    let (_dir, backend) = setup();

    // 1. Missing
    assert_eq!(backend.get_item("flashcard-app-decks").unwrap(), None);

    // 2. Write (creates the directory lazily)
    backend.set_item("flashcard-app-decks", "[]").unwrap();
    assert_eq!(
        backend.get_item("flashcard-app-decks").unwrap(),
        Some("[]".to_string())
    );

    // 3. Remove, twice
    backend.remove_item("flashcard-app-decks").unwrap();
    backend.remove_item("flashcard-app-decks").unwrap();
    assert_eq!(backend.get_item("flashcard-app-decks").unwrap(), None);
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();

    backend.set_item("flashcard-app-flashcards", "[1]").unwrap();
    backend.set_item("flashcard-app-flashcards", "[1,2]").unwrap();

    let expected_path = backend.root().join("flashcard-app-flashcards.json");
    assert_eq!(fs::read_to_string(&expected_path).unwrap(), "[1,2]");

    for entry in fs::read_dir(backend.root()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_rejects_path_like_keys() {
    let (_dir, backend) = setup();

    for key in ["../escape", "a/b", "", ".hidden"] {
        assert!(
            matches!(backend.set_item(key, "x"), Err(FlashdeckError::Store(_))),
            "key {:?} should be rejected",
            key
        );
    }
}

#[test]
fn test_fs_backend_quota() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path()).with_quota(20);

    backend.set_item("a", "123456789").unwrap();
    // Replacing a value only counts the new size.
    backend.set_item("a", "987654321").unwrap();

    match backend.set_item("b", "123456789012") {
        Err(FlashdeckError::QuotaExceeded { requested, limit }) => {
            assert_eq!(requested, 23);
            assert_eq!(limit, 20);
        }
        other => panic!("Expected QuotaExceeded, got {:?}", other),
    }
    assert_eq!(backend.get_item("b").unwrap(), None);
    assert_eq!(backend.get_item("a").unwrap(), Some("987654321".to_string()));
}

#[test]
fn test_fs_backend_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    FsBackend::new(dir.path())
        .set_item("flashcard-app-version", "1.0.0")
        .unwrap();

    let reopened = FsBackend::new(dir.path());
    assert_eq!(
        reopened.get_item("flashcard-app-version").unwrap(),
        Some("1.0.0".to_string())
    );
}
