//! File-level integration tests: save/load against real paths.

use std::fs;

use tempfile::tempdir;

use bench_archive::{ArchiveError, FORMAT_MAGIC, load, save};
use bench_model::{BenchValue, Definition, Group, Parameters, Trial, TrialEstimate};

fn sample_suite() -> Group {
    let params = Parameters::default().with_samples(50);

    let mut trial = Trial::new(params.clone());
    trial.push(10.0, 0.0);
    trial.push(12.0, 1.0);
    trial.memory = 256;
    trial.allocs = 8;

    let estimate = TrialEstimate {
        params,
        time: 11.0,
        gctime: 0.5,
        memory: 256,
        allocs: 8,
    };

    let mut group = Group::new(["suite"]);
    group.insert("raw", trial);
    group.insert("median", estimate);
    group
}

#[test]
fn test_save_then_load_reproduces_suite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("suite.benchmarks");

    let value = BenchValue::Group(sample_suite());
    save(&path, &value).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(loaded, value);
}

#[test]
fn test_archive_text_is_plain_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("suite.benchmarks");

    save(&path, &BenchValue::Group(sample_suite())).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let tree: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(tree["type_uuid"], serde_json::json!(FORMAT_MAGIC));
    assert_eq!(tree["type"], serde_json::json!("Group"));
}

#[test]
fn test_nested_definition_fails_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.benchmarks");

    let mut group = sample_suite();
    group.insert(
        "definition",
        Definition::new("bench", |p| Trial::new(p.clone())),
    );

    let result = save(&path, &BenchValue::Group(group));
    assert!(matches!(result, Err(ArchiveError::NotSerializable)));
    assert!(!path.exists());
}

#[test]
fn test_unregistered_type_fails_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("foreign.benchmarks");

    let text = format!(
        r#"{{"type_uuid": "{FORMAT_MAGIC}", "type": "Widget", "versions": {{}}, "fields": {{}}}}"#
    );
    fs::write(&path, text).unwrap();

    let result = load(&path);
    assert!(matches!(
        result,
        Err(ArchiveError::UnknownType { type_name }) if type_name == "Widget"
    ));
}

#[test]
fn test_definition_tagged_tree_fails_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("definition.benchmarks");

    let text = format!(
        r#"{{"type_uuid": "{FORMAT_MAGIC}", "type": "Definition", "versions": {{}}, "fields": {{}}}}"#
    );
    fs::write(&path, text).unwrap();

    let result = load(&path);
    assert!(matches!(result, Err(ArchiveError::NotSerializable)));
}

#[test]
fn test_save_overwrites_existing_archive() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("suite.benchmarks");

    save(&path, &BenchValue::Int(1)).unwrap();
    save(&path, &BenchValue::Int(2)).unwrap();
    assert_eq!(load(&path).unwrap(), BenchValue::Int(2));
}
