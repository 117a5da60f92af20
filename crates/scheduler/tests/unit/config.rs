//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, and validation.

use rrsim_core::SimError;
use rrsim_core::config::*;

use crate::common::temp_file;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_ticks);
    assert_eq!(config.report.format, ReportFormat::Text);
    assert!(!config.report.per_process);
    assert_eq!(config.report.precision, 2);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert!(!config.general.trace_ticks);
    assert_eq!(config.report.format, ReportFormat::Text);
    assert_eq!(config.report.precision, 2);
}

#[test]
fn test_partial_section_keeps_field_defaults() {
    let config = Config::from_json(r#"{ "report": { "per_process": true } }"#).unwrap();
    assert!(config.report.per_process);
    assert_eq!(config.report.format, ReportFormat::Text);
    assert_eq!(config.report.precision, 2);
}

#[test]
fn test_format_aliases() {
    for name in ["Json", "JSON", "json"] {
        let json = format!(r#"{{ "report": {{ "format": "{name}" }} }}"#);
        assert_eq!(
            Config::from_json(&json).unwrap().report.format,
            ReportFormat::Json
        );
    }
}

#[test]
fn test_unknown_format_is_rejected() {
    let err = Config::from_json(r#"{ "report": { "format": "Xml" } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(matches!(
        Config::from_json("{ not json"),
        Err(SimError::Config(_))
    ));
}

#[test]
fn test_precision_upper_bound() {
    assert!(Config::from_json(r#"{ "report": { "precision": 9 } }"#).is_ok());
    assert!(matches!(
        Config::from_json(r#"{ "report": { "precision": 10 } }"#),
        Err(SimError::Config(_))
    ));
}

#[test]
fn test_load_from_file() {
    let file = temp_file(br#"{ "general": { "trace_ticks": true } }"#);
    let config = Config::load(file.path()).unwrap();
    assert!(config.general.trace_ticks);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}
