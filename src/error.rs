use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Finalizer panicked: {0}")]
    FinalizerPanicked(String),

    #[error("{0}")]
    Finalizers(FinalizerFailures),

    #[error("cleanup did not finish within {0:?}")]
    CleanupTimeout(Duration),
}

/// Short alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// True for malformed manifests. These are terminal and never retried.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Yaml(_) | Self::Manifest(_))
    }
}

/// One failed teardown action, identified by its registration position.
#[derive(Debug)]
pub struct FinalizerFailure {
    pub position: usize,
    pub error: Error,
}

/// Every finalizer failure of one cleanup run, in registration order.
#[derive(Debug)]
pub struct FinalizerFailures(pub Vec<FinalizerFailure>);

impl FinalizerFailures {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FinalizerFailure> {
        self.0.iter()
    }
}

impl fmt::Display for FinalizerFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} finalizer(s) failed", self.0.len())?;
        for failure in &self.0 {
            write!(f, "; #{}: {}", failure.position, failure.error)?;
        }
        Ok(())
    }
}
