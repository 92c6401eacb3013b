/// Integration tests for configuration loading.
use slacksim_core::config::{ConfigError, SimConfig};

const FULL_CONFIG: &str = r#"
[simulation]
name = "edge-cluster"
seed = 9
requests = 50

[workload]
max_response_time_ms = 280

[pool]
backends = [
    { name = "fra-1", weight = 4 },
    { name = "fra-2", weight = 4 },
    { name = "ams-1", weight = 9 },
]
"#;

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join("slacksim_test_config.toml");
    std::fs::write(&path, FULL_CONFIG).unwrap();

    let config = SimConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.simulation.name, "edge-cluster");
    assert_eq!(config.simulation.requests, 50);
    assert_eq!(config.workload.max_response_time_ms, 280);
    assert_eq!(config.pool.backends.len(), 3);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("slacksim_no_such_config.toml");
    match SimConfig::from_file(&path) {
        Err(ConfigError::Io(_)) => {}
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    match SimConfig::from_str("[simulation\nseed = ") {
        Err(ConfigError::Parse(_)) => {}
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_empty_document_gives_the_classic_pool() {
    let config = SimConfig::from_str("").unwrap();
    let names: Vec<&str> = config
        .pool
        .backends
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["backend-1", "backend-2", "backend-3"]);
    let weights: Vec<i64> = config.pool.backends.iter().map(|e| e.weight).collect();
    assert_eq!(weights, [3, 4, 7]);
}

#[test]
fn test_invalid_pools_are_rejected() {
    let empty = r#"
[pool]
backends = []
"#;
    assert!(matches!(
        SimConfig::from_str(empty),
        Err(ConfigError::Validation(_))
    ));

    let duplicate = r#"
[pool]
backends = [
    { name = "a", weight = 3 },
    { name = "a", weight = 5 },
]
"#;
    assert!(matches!(
        SimConfig::from_str(duplicate),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_configured_pool_drives_a_run() {
    let config = SimConfig::from_str(FULL_CONFIG).unwrap();
    let report = slacksim_core::run_simulation(config).unwrap();

    assert_eq!(report.total_requests, 50);
    assert_eq!(report.seed, 9);
    assert_eq!(report.backends.len(), 3);
    assert_eq!(report.backends[2].name, "ams-1");
    assert_eq!(report.per_backend_requests.iter().sum::<u64>(), 50);
}
