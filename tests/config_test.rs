//! Tests for framework configuration parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use kube_test_framework::config::{FrameworkConfig, LogFormat};

#[test]
fn test_defaults() {
    let config = FrameworkConfig::default();
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.cleanup_timeout(), None);
    assert!(config.kubeconfig.is_none());
}

#[test]
fn test_parse_flags() {
    let config = FrameworkConfig::try_parse_from([
        "kube-test-framework",
        "--kubeconfig",
        "/tmp/kind.yaml",
        "--kube-context",
        "kind-e2e",
        "--log-format",
        "json",
        "--cleanup-timeout-secs",
        "90",
    ])
    .unwrap();

    assert_eq!(config.kubeconfig, Some(PathBuf::from("/tmp/kind.yaml")));
    assert_eq!(config.kube_context.as_deref(), Some("kind-e2e"));
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.cleanup_timeout(), Some(Duration::from_secs(90)));
}

#[test]
fn test_rejects_unknown_log_format() {
    let result =
        FrameworkConfig::try_parse_from(["kube-test-framework", "--log-format", "xml"]);
    assert!(result.is_err());
}
