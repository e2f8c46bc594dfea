//! The entry point tests hold on to: a kube client plus the ClusterRole
//! helpers and test-context plumbing built on top of it.

use std::time::Duration;

use k8s_openapi::api::rbac::v1::ClusterRole;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::info;

use crate::config::FrameworkConfig;
use crate::context::TestContext;
use crate::error::{Error, Result};
use crate::manifest::ManifestSource;
use crate::reconcile;
use crate::store::KubeStore;

#[derive(Clone)]
pub struct Framework {
    pub client: Client,
    cleanup_timeout: Option<Duration>,
}

impl Framework {
    /// Connect to the cluster described by `config`.
    pub async fn connect(config: &FrameworkConfig) -> Result<Self> {
        let options = KubeConfigOptions {
            context: config.kube_context.clone(),
            ..Default::default()
        };

        let kube_config = match (&config.kubeconfig, &config.kube_context) {
            (Some(path), _) => {
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    Error::config(format!("reading kubeconfig {}: {e}", path.display()))
                })?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| Error::config(e.to_string()))?
            }
            (None, Some(_)) => Config::from_kubeconfig(&options)
                .await
                .map_err(|e| Error::config(e.to_string()))?,
            (None, None) => Config::infer()
                .await
                .map_err(|e| Error::config(e.to_string()))?,
        };

        info!(cluster = %kube_config.cluster_url, "connecting test framework");
        let client = Client::try_from(kube_config)?;
        Ok(Self::from_client(client).with_cleanup_timeout(config.cleanup_timeout()))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            cleanup_timeout: None,
        }
    }

    pub fn with_cleanup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.cleanup_timeout = timeout;
        self
    }

    pub fn cluster_roles(&self) -> KubeStore<ClusterRole> {
        KubeStore::cluster(self.client.clone())
    }

    /// Start a test context for the test called `name`.
    pub fn new_test_ctx(&self, name: &str) -> TestContext {
        TestContext::new(name, chrono::Utc::now())
    }

    /// Tear down `ctx`, bounded by the configured cleanup timeout if any.
    pub async fn cleanup(&self, ctx: &mut TestContext) -> Result<()> {
        match self.cleanup_timeout {
            Some(timeout) => ctx.cleanup_with_timeout(timeout).await,
            None => ctx.cleanup().await,
        }
    }

    // ── ClusterRole helpers ─────────────────────────────────────────────────

    pub async fn create_or_update_cluster_role(
        &self,
        source: &ManifestSource,
    ) -> Result<ClusterRole> {
        reconcile::create_or_update(&self.cluster_roles(), source).await
    }

    pub async fn delete_cluster_role(&self, source: &ManifestSource) -> Result<()> {
        reconcile::delete::<ClusterRole, _>(&self.cluster_roles(), source).await
    }

    pub async fn update_cluster_role(&self, cluster_role: &ClusterRole) -> Result<()> {
        reconcile::update(&self.cluster_roles(), cluster_role).await
    }
}
