//! Integration tests against a live Kubernetes API server.
//!
//! Every test is `#[ignore]`d because it needs a reachable cluster and
//! permission to manage ClusterRoles.  The connection is configured through
//! the usual `TEST_*` variables (see `FrameworkConfig`).
//!
//! Run with: `cargo test --test integration -- --ignored`

mod common;

mod cluster_role;
mod teardown;
