//! Unit tests for common-config crate

use common_config::{ApiVersion, BackendVersion, DTypeConfig, EvaluationConfig, QuiverConfig};

#[test]
fn test_quiver_config_default() {
    let config = QuiverConfig::default();

    assert_eq!(config.dtypes.version, ApiVersion::Main);
    assert_eq!(config.evaluation.backend_version, BackendVersion::ARROW);
    assert!(!config.evaluation.trace_selections);
}

#[test]
fn test_config_builders() {
    let config = QuiverConfig::default()
        .with_version(ApiVersion::V1)
        .with_trace_selections(true);

    assert_eq!(config.dtypes.version, ApiVersion::V1);
    assert!(config.evaluation.trace_selections);
}

#[test]
fn test_api_version_default_and_display() {
    assert_eq!(ApiVersion::default(), ApiVersion::Main);
    assert_eq!(ApiVersion::V1.to_string(), "v1");
    assert_eq!(ApiVersion::Main.to_string(), "main");
}

#[test]
fn test_backend_version_ordering() {
    assert!(BackendVersion(53, 1, 0) < BackendVersion(54, 0, 0));
    assert_eq!(BackendVersion(1, 2, 3).to_string(), "1.2.3");
}

#[test]
fn test_quiver_config_serialization() {
    let mut config = QuiverConfig::default();
    config.dtypes.version = ApiVersion::V1;
    config.evaluation.backend_version = BackendVersion(53, 4, 1);
    config.evaluation.trace_selections = true;

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: QuiverConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized, config);
}

#[test]
fn test_dtype_config_serialization() {
    let config = DTypeConfig {
        version: ApiVersion::V1,
    };

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("V1"));

    let deserialized: DTypeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.version, ApiVersion::V1);
}

#[test]
fn test_evaluation_config_from_json() {
    let json = r#"{"backend_version":[50,0,1],"trace_selections":false}"#;
    let config: EvaluationConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.backend_version, BackendVersion(50, 0, 1));
    assert!(!config.trace_selections);
}
