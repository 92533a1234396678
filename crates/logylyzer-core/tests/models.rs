use logylyzer_core::models::analysis::{AnalysisResult, Severity};
use logylyzer_core::models::record::{AnalysisRecord, DEFAULT_SERVICE_NAME, resolve_service_name};
use logylyzer_core::models::request::AnalyzeRequest;

fn sample_analysis() -> AnalysisResult {
    AnalysisResult {
        root_cause: "connection pool exhausted".to_string(),
        severity: Severity::High,
        suggested_fix: "raise max_connections".to_string(),
        patterns_detected: vec!["ECONNREFUSED".to_string()],
    }
}

#[test]
fn record_serializes_with_stable_field_names() {
    let ts: jiff::Timestamp = "2024-01-01T12:00:00Z".parse().unwrap();
    let record = AnalysisRecord::at(
        ts,
        "auth",
        Some("nginx".to_string()),
        sample_analysis(),
        "ERROR upstream timed out",
    );

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["timestamp"], "2024-01-01T12:00:00Z");
    assert_eq!(value["serviceName"], "auth");
    assert_eq!(value["source"], "nginx");
    assert_eq!(value["originalLogs"], "ERROR upstream timed out");
    assert_eq!(value["analysis"]["rootCause"], "connection pool exhausted");
    assert_eq!(value["analysis"]["severity"], "high");
    assert_eq!(value["analysis"]["suggestedFix"], "raise max_connections");
    assert_eq!(value["analysis"]["patternsDetected"][0], "ECONNREFUSED");
}

#[test]
fn absent_source_is_omitted_and_tolerated() {
    let record = AnalysisRecord::new("auth", None, sample_analysis(), "x");
    let value = serde_json::to_value(&record).unwrap();
    assert!(value.get("source").is_none());

    let back: AnalysisRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}

#[test]
fn unknown_severity_is_rejected() {
    let json = r#"{"rootCause":"x","severity":"catastrophic","suggestedFix":"y","patternsDetected":[]}"#;
    assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
}

#[test]
fn fallback_result_keeps_raw_reply() {
    let result = AnalysisResult::fallback("the logs look fine");
    assert_eq!(result.root_cause, "Analysis completed");
    assert_eq!(result.severity, Severity::Medium);
    assert_eq!(result.suggested_fix, "the logs look fine");
    assert_eq!(result.patterns_detected, vec!["Raw AI response".to_string()]);
}

#[test]
fn blank_service_names_resolve_to_default() {
    assert_eq!(resolve_service_name(None), DEFAULT_SERVICE_NAME);
    assert_eq!(resolve_service_name(Some("")), DEFAULT_SERVICE_NAME);
    assert_eq!(resolve_service_name(Some("  ")), DEFAULT_SERVICE_NAME);
    assert_eq!(resolve_service_name(Some("auth")), "auth");
}

#[test]
fn analyze_request_accepts_missing_fields() {
    let req: AnalyzeRequest = serde_json::from_str("{}").unwrap();
    assert!(req.logs.is_none());

    let req: AnalyzeRequest =
        serde_json::from_str(r#"{"logs":"boom","serviceName":"auth","source":"docker"}"#).unwrap();
    assert_eq!(req.logs.as_deref(), Some("boom"));
    assert_eq!(req.service_name.as_deref(), Some("auth"));
    assert_eq!(req.source.as_deref(), Some("docker"));
}
