//! Framework configuration, read from the environment.
//!
//! Tests have no command line of their own, so the clap definition is only
//! ever fed environment variables (see [`FrameworkConfig::from_env`]).

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

#[derive(Parser, Clone, Debug)]
#[command(
    name = "kube-test-framework",
    about = "Kubernetes end-to-end test framework settings"
)]
pub struct FrameworkConfig {
    /// Kubeconfig to connect with. Falls back to in-cluster / default
    /// kubeconfig inference when unset.
    #[arg(long, env = "TEST_KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one.
    #[arg(long, env = "TEST_KUBE_CONTEXT")]
    pub kube_context: Option<String>,

    /// Tracing filter directives.
    #[arg(
        long,
        default_value = "info,kube=warn,hyper=warn,tower=warn",
        env = "TEST_LOG"
    )]
    pub log_filter: String,

    /// Log format: "text" for human-readable, "json" for structured.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "TEST_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Upper bound on how long test cleanup may wait for its finalizers.
    #[arg(long, env = "TEST_CLEANUP_TIMEOUT_SECS")]
    pub cleanup_timeout_secs: Option<u64>,
}

impl FrameworkConfig {
    /// Build the configuration from `TEST_*` environment variables only.
    pub fn from_env() -> Result<Self> {
        Self::try_parse_from(["kube-test-framework"]).map_err(|e| Error::config(e.to_string()))
    }

    pub fn cleanup_timeout(&self) -> Option<Duration> {
        self.cleanup_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            kube_context: None,
            log_filter: "info,kube=warn,hyper=warn,tower=warn".into(),
            log_format: LogFormat::Text,
            cleanup_timeout_secs: None,
        }
    }
}
