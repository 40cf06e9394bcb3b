mod support;

use std::io::Write;

use logiops_analytics::config::{AnalyticsConfig, CONFIG_PATH_ENV};
use logiops_analytics::AnalyticsError;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_from_file_reads_sections() {
    let file = config_file(
        r#"
[ranking]
top_k = 5

[ranking.weights]
cost = 0.2
eta = 0.2
risk = 0.6

[flows]
fast_zone = "B"
"#,
    );
    let config = AnalyticsConfig::from_file(file.path()).unwrap();
    assert_eq!(config.ranking.top_k, 5);
    assert_eq!(config.ranking.weights.risk, 0.6);
    assert_eq!(config.flows.fast_zone, "B");
    assert_eq!(config.flows.top_k, 5);
    assert_eq!(config.projection.canvas_width, 800.0);
}

#[test]
fn test_env_path_takes_precedence() {
    let file = config_file("[projection]\ngrid_columns = 4\n");
    let path = file.path().to_str().unwrap().to_string();
    let config = support::with_scoped_env(&[(CONFIG_PATH_ENV, Some(path.as_str()))], || {
        AnalyticsConfig::from_env()
    })
    .unwrap();
    assert_eq!(config.projection.grid_columns, 4);
}

#[test]
fn test_env_path_must_exist() {
    let result = support::with_scoped_env(
        &[(CONFIG_PATH_ENV, Some("/nonexistent/analytics.toml"))],
        AnalyticsConfig::from_env,
    );
    assert!(matches!(result, Err(AnalyticsError::Io { .. })));
}

#[test]
fn test_env_path_with_invalid_values_is_rejected() {
    let file = config_file("[zones]\nalert_threshold = 0.95\ncritical_threshold = 0.9\n");
    let path = file.path().to_str().unwrap().to_string();
    let result = support::with_scoped_env(&[(CONFIG_PATH_ENV, Some(path.as_str()))], || {
        AnalyticsConfig::from_env()
    });
    assert!(matches!(result, Err(AnalyticsError::Configuration { .. })));
}

#[test]
fn test_blank_env_falls_back_to_bundled_file() {
    // tests run from the package root, where the sample analytics.toml lives
    let config = support::with_scoped_env(&[(CONFIG_PATH_ENV, Some("  "))], || {
        AnalyticsConfig::from_env()
    })
    .unwrap();
    assert_eq!(config, AnalyticsConfig::default());
}

#[test]
fn test_default_location_finds_bundled_file() {
    let config = AnalyticsConfig::from_default_location().unwrap();
    assert_eq!(config, AnalyticsConfig::default());
}

#[test]
fn test_bundled_sample_is_valid() {
    let sample = include_str!("../analytics.toml");
    let config = AnalyticsConfig::from_toml_str(sample).unwrap();
    assert_eq!(config, AnalyticsConfig::default());
}
