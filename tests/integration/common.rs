//! Shared setup for the live-cluster tests.

use std::time::Duration;

use k8s_openapi::api::rbac::v1::ClusterRole;
use kube::Api;

use kube_test_framework::config::FrameworkConfig;
use kube_test_framework::manifest::ManifestSource;
use kube_test_framework::telemetry::init_tracing;
use kube_test_framework::Framework;

pub const TIMEOUT: Duration = Duration::from_secs(30);
pub const POLL: Duration = Duration::from_millis(500);

/// Connect using the environment configuration, with logging enabled.
pub async fn framework() -> Framework {
    let config = FrameworkConfig::from_env().expect("invalid TEST_* configuration");
    init_tracing(&config.log_filter, config.log_format);
    Framework::connect(&config)
        .await
        .expect("failed to connect to the cluster")
}

/// A ClusterRole manifest named `name` with `rules` pod verbs.
pub fn role_manifest(name: &str, verbs: &[&str]) -> ManifestSource {
    let verbs = verbs
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");
    ManifestSource::inline(format!(
        r#"apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: {name}
  labels:
    app.kubernetes.io/managed-by: kube-test-framework
rules:
  - apiGroups: [""]
    resources: ["pods"]
    verbs: [{verbs}]
"#
    ))
}

/// Poll until a condition is true, or timeout.
pub async fn wait_for<F, Fut>(timeout: Duration, interval: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    loop {
        if check().await {
            return true;
        }
        if start.elapsed() > timeout {
            return false;
        }
        tokio::time::sleep(interval).await;
    }
}

/// Wait until the named ClusterRole is gone.
pub async fn wait_for_role_deleted(api: &Api<ClusterRole>, name: &str) -> bool {
    wait_for(TIMEOUT, POLL, || {
        let api = api.clone();
        let name = name.to_string();
        async move { matches!(api.get_opt(&name).await, Ok(None)) }
    })
    .await
}
