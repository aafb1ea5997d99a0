use std::fs;

use ergal::error::AppError;
use ergal::{FileStore, Identifier, ProfileRecord, ProfileStore, StoreTarget};
use ergal::config::{AppPaths, Settings};

fn record(name: &str) -> ProfileRecord {
    ProfileRecord {
        name: name.to_string(),
        base: "https://api.test.com".to_string(),
        auth: None,
        endpoints: Vec::new(),
    }
}

#[test]
fn second_handle_on_open_store_is_locked_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");

    let mut store = FileStore::open(&path).expect("store should open");
    match FileStore::open(&path) {
        Err(AppError::StoreLocked(locked)) => assert_eq!(locked, path),
        other => panic!("expected locked store, got {other:?}"),
    }

    store.close().expect("close should succeed");
    let mut reopened = FileStore::open(&path).expect("store should reopen after close");
    reopened.close().expect("close should succeed");
}

#[test]
fn dropping_store_releases_lock() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");

    drop(FileStore::open(&path).expect("store should open"));
    assert!(!dir.path().join("profiles.json.lock").exists());
    FileStore::open(&path).expect("store should reopen after drop");
}

#[test]
fn put_writes_through_to_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");
    let id = Identifier::from_name("github");

    let mut store = FileStore::open(&path).expect("store should open");
    store.put(&id, &record("github")).expect("put should succeed");

    let raw = fs::read_to_string(&path).expect("store file should exist");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("store file is json");
    assert_eq!(json["version"], 1);
    assert_eq!(json["profiles"][id.as_str()]["name"], "github");
    assert_eq!(json["profiles"][id.as_str()]["auth"], serde_json::Value::Null);
    store.close().expect("close should succeed");
}

#[test]
fn remove_and_list_reflect_stored_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");

    let mut store = FileStore::open(&path).expect("store should open");
    for name in ["a", "b"] {
        store
            .put(&Identifier::from_name(name), &record(name))
            .expect("put should succeed");
    }

    assert!(store.remove(&Identifier::from_name("a")).expect("remove should succeed"));
    assert!(!store.remove(&Identifier::from_name("a")).expect("remove should succeed"));
    store.close().expect("close should succeed");

    let store = FileStore::open(&path).expect("store should reopen");
    let names = store
        .list()
        .expect("list should succeed")
        .into_iter()
        .map(|(_, record)| record.name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["b"]);
}

#[test]
fn closed_store_rejects_reads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileStore::open(dir.path().join("profiles.json")).expect("store should open");
    store.close().expect("close should succeed");

    assert!(matches!(
        store.get(&Identifier::from_name("a")),
        Err(AppError::Store(_))
    ));
}

#[test]
fn unknown_store_version_is_refused_and_unlocked() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");
    fs::write(&path, r#"{"version": 99, "profiles": {}}"#).expect("write");

    assert!(matches!(FileStore::open(&path), Err(AppError::Store(_))));
    assert!(!dir.path().join("profiles.json.lock").exists());
}

#[test]
fn resolves_store_targets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = AppPaths::at(dir.path()).expect("paths");
    let settings = Settings::default();

    assert_eq!(
        StoreTarget::from_flags(false, None).resolve(&paths, &settings),
        dir.path().join("ergal.json")
    );
    assert_eq!(
        StoreTarget::from_flags(true, None).resolve(&paths, &settings),
        dir.path().join("ergal_test.json")
    );
    assert_eq!(
        StoreTarget::from_flags(true, Some("custom.json".into())).resolve(&paths, &settings),
        std::path::PathBuf::from("custom.json")
    );

    let configured = Settings {
        store_path: Some(dir.path().join("elsewhere.json")),
        ..Settings::default()
    };
    assert_eq!(
        StoreTarget::Default.resolve(&paths, &configured),
        dir.path().join("elsewhere.json")
    );
}

#[test]
fn failed_write_keeps_memory_and_disk_in_step() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");
    let id = Identifier::from_name("github");

    let mut store = FileStore::open(&path).expect("store should open");
    store.put(&id, &record("github")).expect("put should succeed");

    // Nothing can be renamed over a directory, so the next write fails.
    fs::remove_file(&path).expect("remove store file");
    fs::create_dir(&path).expect("create blocking dir");

    let mut changed = record("github");
    changed.base = "https://api.other.com".to_string();
    assert!(store.put(&id, &changed).is_err());
    assert!(store.remove(&id).is_err());

    let kept = store.get(&id).expect("get should succeed").expect("record kept");
    assert_eq!(kept.base, "https://api.test.com");

    let leftovers = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.path() != path && entry.path().extension() != Some(std::ffi::OsStr::new("lock")))
        .count();
    assert_eq!(leftovers, 0, "temp files should be cleaned up");
    store.close().expect("close should succeed");
}

#[cfg(unix)]
#[test]
fn store_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profiles.json");

    let mut store = FileStore::open(&path).expect("store should open");
    store
        .put(&Identifier::from_name("github"), &record("github"))
        .expect("put should succeed");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    store.close().expect("close should succeed");
}
