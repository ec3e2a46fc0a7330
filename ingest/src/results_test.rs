use crate::{
    results::{all_stats, IngestError, Metric, ResultSet, Role},
    stats::Aggregate,
};
use std::io::Write;
use tracing_test::traced_test;

const PIR_MATRIX: &str = r#"{
    "8000000": {
        "client": {"cpu": {"mean": 10, "std": 1}, "bw": {"mean": 2000, "std": 100}},
        "server": {"cpu": {"mean": 20, "std": 2}, "bw": {"mean": 6000, "std": 300}}
    },
    "80000000": {
        "client": {"cpu": {"mean": 15, "std": 1.5}, "bw": {"mean": 4000, "std": 0}},
        "server": {"cpu": {"mean": 120, "std": 5}, "bw": {"mean": 9000, "std": 0}}
    }
}"#;

#[test]
pub fn sizes_are_ordered_numerically() {
    let record = r#"{
        "client": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1, "std": 0}},
        "server": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1, "std": 0}}
    }"#;
    let json = format!("{{\"9000\": {record}, \"10000\": {record}, \"800\": {record}}}");
    let results = ResultSet::from_json_str(&json).unwrap();

    assert_eq!(results.sizes().collect::<Vec<_>>(), vec![800, 9000, 10000]);
    assert_eq!(results.largest().map(|(size, _)| size), Some(10000));
}

#[test]
pub fn typed_access() {
    let results = ResultSet::from_json_str(PIR_MATRIX).unwrap();
    let record = results.get(8000000).unwrap();

    assert_eq!(record.client.cpu, Aggregate::new(10.0, 1.0));
    assert_eq!(
        record.role(Role::Server).metric(Metric::Bw),
        Aggregate::new(6000.0, 300.0)
    );
}

#[test]
pub fn raw_samples_are_aggregated() {
    let json = r#"{"1000": {
        "client": {"cpu": [1, 3], "bw": {"mean": 5, "std": 0}},
        "server": {"cpu": {"mean": 1, "std": 0}, "bw": [10, 10, 10]}
    }}"#;
    let results = ResultSet::from_json_str(json).unwrap();
    let record = results.get(1000).unwrap();

    assert_eq!(record.client.cpu, Aggregate::new(2.0, 1.0));
    assert_eq!(record.server.bw, Aggregate::new(10.0, 0.0));
}

#[test]
pub fn missing_role() {
    let json = r#"{"1000": {"client": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1, "std": 0}}}}"#;

    match ResultSet::from_json_str(json) {
        Err(IngestError::MissingField { size, field }) => {
            assert_eq!(size, 1000);
            assert_eq!(field, "server");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
pub fn missing_metric_and_std() {
    let json = r#"{"1000": {
        "client": {"cpu": {"mean": 1, "std": 0}},
        "server": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1, "std": 0}}
    }}"#;

    assert!(matches!(
        ResultSet::from_json_str(json),
        Err(IngestError::MissingField { field, .. }) if field == "client.bw"
    ));

    let json = r#"{"1000": {
        "client": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1, "std": 0}},
        "server": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1}}
    }}"#;

    assert!(matches!(
        ResultSet::from_json_str(json),
        Err(IngestError::MissingField { field, .. }) if field == "server.bw.std"
    ));
}

#[test]
pub fn empty_sample_array() {
    let json = r#"{"1000": {
        "client": {"cpu": [], "bw": {"mean": 1, "std": 0}},
        "server": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1, "std": 0}}
    }}"#;

    assert!(matches!(
        ResultSet::from_json_str(json),
        Err(IngestError::EmptySamples { size: 1000, field }) if field == "client.cpu"
    ));
}

#[test]
pub fn invalid_size_key() {
    let json = r#"{"1MB": {
        "client": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1, "std": 0}},
        "server": {"cpu": {"mean": 1, "std": 0}, "bw": {"mean": 1, "std": 0}}
    }}"#;

    assert!(matches!(
        ResultSet::from_json_str(json),
        Err(IngestError::InvalidSize(key)) if key == "1MB"
    ));
}

#[test]
pub fn malformed_and_empty_documents() {
    assert!(matches!(
        ResultSet::from_json_str("{\"1000\": "),
        Err(IngestError::Parse(_))
    ));
    assert!(matches!(
        ResultSet::from_json_str("{}"),
        Err(IngestError::EmptyResults)
    ));
}

#[test]
pub fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pirMatrix.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(PIR_MATRIX.as_bytes()).unwrap();
    drop(file);

    let results = all_stats(&path).unwrap();

    assert_eq!(results.len(), 2);
}

#[test]
pub fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    assert!(matches!(
        all_stats(&path),
        Err(IngestError::FileNotFound(missing)) if missing == path
    ));
}

#[test]
#[traced_test]
pub fn every_size_record_is_logged() {
    ResultSet::from_json_str(PIR_MATRIX).unwrap();

    assert!(logs_contain("Parsed size record"));
    assert!(logs_contain("size=80000000"));
}
