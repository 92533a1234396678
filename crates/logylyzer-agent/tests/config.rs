use std::time::Duration;

use logylyzer_agent::config::{AgentConfig, DEFAULT_ERROR_PATTERNS, parse_interval};
use logylyzer_agent::error::AgentError;

#[test]
fn minimal_config_takes_defaults() {
    let config = AgentConfig::parse("analyzer:\n  endpoint: http://localhost:2576\n").unwrap();

    assert_eq!(config.analyzer.endpoint, "http://localhost:2576");
    assert_eq!(config.analyzer.timeout_secs, 30);
    assert!(!config.discovery.enabled);
    assert_eq!(config.discovery.interval().unwrap(), Duration::from_secs(60));
    assert!(config.services.auto_detect);
    assert!(!config.services.docker);
    assert!(config.monitoring.log_paths.is_empty());
    assert_eq!(config.error_patterns(), DEFAULT_ERROR_PATTERNS.map(String::from).to_vec());
}

#[test]
fn full_config_is_read() {
    let yaml = r#"
analyzer:
  endpoint: http://analyzer:2576
  timeout_secs: 5
discovery:
  enabled: true
  scan_interval: 5m
monitoring:
  log_paths:
    - /var/log/app/*.log
  exclude_patterns:
    - "*.gz"
  error_patterns:
    - panic
services:
  auto_detect: true
  docker: true
  systemd: false
"#;
    let config = AgentConfig::parse(yaml).unwrap();

    assert_eq!(config.analyzer.timeout_secs, 5);
    assert!(config.discovery.enabled);
    assert_eq!(config.discovery.interval().unwrap(), Duration::from_secs(300));
    assert_eq!(config.monitoring.log_paths, vec!["/var/log/app/*.log"]);
    assert_eq!(config.monitoring.exclude_patterns, vec!["*.gz"]);
    assert_eq!(config.error_patterns(), vec!["panic"]);
    assert!(config.services.docker);
}

#[test]
fn blank_endpoint_is_rejected() {
    let err = AgentConfig::parse("analyzer:\n  endpoint: \"  \"\n").unwrap_err();
    assert!(matches!(err, AgentError::ConfigValue { field: "analyzer.endpoint", .. }));
}

#[test]
fn missing_analyzer_section_is_a_parse_error() {
    let err = AgentConfig::parse("discovery:\n  enabled: true\n").unwrap_err();
    assert!(matches!(err, AgentError::ConfigParse(_)));
}

#[test]
fn bad_scan_interval_is_rejected_at_load() {
    let yaml = "analyzer:\n  endpoint: http://x\ndiscovery:\n  scan_interval: soon\n";
    let err = AgentConfig::parse(yaml).unwrap_err();
    assert!(matches!(err, AgentError::ConfigValue { field: "discovery.scan_interval", .. }));
}

#[test]
fn missing_file_reports_its_path() {
    let err = AgentConfig::load(std::path::Path::new("/nonexistent/logylyzer.yaml")).unwrap_err();
    assert!(matches!(err, AgentError::ConfigRead { .. }));
    assert!(err.to_string().contains("/nonexistent/logylyzer.yaml"));
}

#[test]
fn intervals() {
    assert_eq!(parse_interval("250ms"), Some(Duration::from_millis(250)));
    assert_eq!(parse_interval("30s"), Some(Duration::from_secs(30)));
    assert_eq!(parse_interval("45"), Some(Duration::from_secs(45)));
    assert_eq!(parse_interval("2m"), Some(Duration::from_secs(120)));
    assert_eq!(parse_interval(" 1h "), Some(Duration::from_secs(3600)));
    assert_eq!(parse_interval("0s"), None);
    assert_eq!(parse_interval("s"), None);
    assert_eq!(parse_interval("10d"), None);
    assert_eq!(parse_interval("-5s"), None);
}
