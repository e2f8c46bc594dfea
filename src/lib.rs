//! Support code for Kubernetes end-to-end tests.
//!
//! - [`context`]: per-test scoped identifiers and concurrent finalizer teardown.
//! - [`reconcile`]: create-or-update / delete of named objects from manifests.
//! - [`policy`]: the fixed RBAC rule groups and a ClusterRole builder.
//! - [`framework`]: the cluster-connected facade over all of the above.

pub mod config;
pub mod context;
pub mod error;
pub mod framework;
pub mod helpers;
pub mod manifest;
pub mod policy;
pub mod reconcile;
pub mod store;
pub mod telemetry;

pub use context::TestContext;
pub use error::{Error, Result};
pub use framework::Framework;
