use crate::normalize::{ratio, AnalysisError, Baselines};
use vpir_ingest::{Metric, ResultSet};

#[test]
pub fn self_ratio_is_one() {
    for value in [0.001, 1.0, 3.5, 12345.678, 1e12] {
        assert_eq!(ratio(1, value, value), Ok(1.0));
    }
}

#[test]
pub fn zero_baseline() {
    assert_eq!(
        ratio(42, 1.0, 0.0),
        Err(AnalysisError::DivisionByZero { size: 42 })
    );
}

#[test]
pub fn normalize_per_size() {
    let mut baselines = Baselines::new();
    baselines.record(8000000, 30.0);
    baselines.record(80000000, 0.0);

    assert_eq!(baselines.normalize(8000000, 90.0), Ok(3.0));
    assert_eq!(
        baselines.normalize(80000000, 90.0),
        Err(AnalysisError::DivisionByZero { size: 80000000 })
    );
    assert_eq!(
        baselines.normalize(800000000, 90.0),
        Err(AnalysisError::MissingBaseline { size: 800000000 })
    );
}

#[test]
pub fn baselines_from_results() {
    let results = ResultSet::from_json_str(
        r#"{"8000000": {
            "client": {"cpu": {"mean": 10, "std": 1}, "bw": {"mean": 1, "std": 0}},
            "server": {"cpu": {"mean": 20, "std": 2}, "bw": {"mean": 1, "std": 0}}
        }}"#,
    )
    .unwrap();

    let baselines = Baselines::from_results(&results, Metric::Cpu);

    assert_eq!(baselines.get(8000000), Some(30.0));
    assert_eq!(baselines.normalize(8000000, 30.0), Ok(1.0));
}
