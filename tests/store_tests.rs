#![cfg(feature = "core")]

use std::fs;

use consignacoes_mock::core::*;
use serde_json::{Value, json};
use tempfile::tempdir;

fn record(root: &str, comp: &str) -> MockRecord {
    MockRecord::from_value(json!({
        "numeroInscricaoEmpregador": root,
        "competencia": comp,
    }))
    .unwrap()
}

fn write_json(path: &std::path::Path, value: &Value) {
    fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

#[test]
fn open_reads_array_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mock.json");
    write_json(
        &path,
        &json!([
            {"numeroInscricaoEmpregador": "14772711", "competencia": "01/2025"},
            {"numeroInscricaoEmpregador": "12345678", "competencia": "01/2025"}
        ]),
    );
    let store = MockStore::open(JsonFile::new(&path)).unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn open_missing_file_fails() {
    let dir = tempdir().unwrap();
    let err = MockStore::open(JsonFile::new(dir.path().join("absent.json"))).unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn open_invalid_json_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{").unwrap();
    assert!(matches!(
        MockStore::open(JsonFile::new(&path)).unwrap_err(),
        StoreError::Json(_)
    ));
}

#[test]
fn open_non_array_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("object.json");
    write_json(&path, &json!({"records": []}));
    assert!(matches!(
        MockStore::open(JsonFile::new(&path)).unwrap_err(),
        StoreError::Shape(_)
    ));
}

#[test]
fn append_rewrites_whole_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mock.json");
    write_json(&path, &json!([{"numeroInscricaoEmpregador": "1", "competencia": "01/2025"}]));

    let mut store = MockStore::open(JsonFile::new(&path)).unwrap();
    let total = store
        .append_all(vec![record("2", "01/2025"), record("3", "01/2025")])
        .unwrap();
    assert_eq!(total, 3);

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk.as_array().unwrap().len(), 3);

    // A fresh process sees the same dataset.
    assert_eq!(MockStore::open(JsonFile::new(&path)).unwrap().len(), 3);
}

#[test]
fn replace_rewrites_whole_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mock.json");
    write_json(&path, &json!([{}, {}, {}]));

    let mut store = MockStore::open(JsonFile::new(&path)).unwrap();
    assert_eq!(store.apply(UpdateMode::Replace, vec![record("9", "01/2025")]).unwrap(), 1);
    assert_eq!(MockStore::open(JsonFile::new(&path)).unwrap().len(), 1);
}

#[test]
fn unwritable_document_keeps_memory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mock.json");
    write_json(&path, &json!([{}]));
    let mut store = MockStore::open(JsonFile::new(&path)).unwrap();

    // Replacing the file by a directory makes the write fail.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let err = store.append_all(vec![record("1", "01/2025")]).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }));
    assert_eq!(store.len(), 1);
    assert_eq!(ApiError::from(err).status(), 500);
}

#[test]
fn in_memory_backing_roundtrip() {
    let backing = InMemory::new(vec![record("1", "01/2025")]);
    backing.save(&[record("2", "01/2025"), record("3", "01/2025")]).unwrap();
    assert_eq!(backing.load().unwrap().len(), 2);
    assert_eq!(backing.saved()[0].employer_root().as_deref(), Some("2"));
}

#[test]
fn read_only_backing_rejects_saves() {
    let backing = InMemory::read_only(Vec::new());
    assert!(matches!(backing.save(&[]), Err(StoreError::Rejected(_))));
}
