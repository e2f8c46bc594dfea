use std::fmt::Debug;

use async_trait::async_trait;
use kube::api::{Api, DeleteParams, PostParams};
use kube::core::NamespaceResourceScope;
use kube::{Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ErrorClass, ObjectStore};
use crate::error::{Error, Result};

/// [`ObjectStore`] backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeStore<K> {
    api: Api<K>,
}

impl<K> KubeStore<K>
where
    K: Resource<DynamicType = ()>,
{
    /// Store over every object of kind `K` (cluster-scoped kinds).
    pub fn cluster(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }

    /// Store over objects of kind `K` in namespace `ns`.
    pub fn namespaced(client: Client, ns: &str) -> Self
    where
        K: Resource<Scope = NamespaceResourceScope>,
    {
        Self {
            api: Api::namespaced(client, ns),
        }
    }

    pub fn api(&self) -> &Api<K> {
        &self.api
    }
}

#[async_trait]
impl<K> ObjectStore<K> for KubeStore<K>
where
    K: Resource<DynamicType = ()>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static,
{
    async fn get(&self, name: &str) -> Result<K> {
        Ok(self.api.get(name).await?)
    }

    async fn create(&self, obj: &K) -> Result<K> {
        Ok(self.api.create(&PostParams::default(), obj).await?)
    }

    async fn update(&self, obj: &K) -> Result<K> {
        Ok(self
            .api
            .replace(&obj.name_any(), &PostParams::default(), obj)
            .await?)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.api.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }

    fn classify_error(&self, err: &Error) -> ErrorClass {
        match err {
            Error::Kube(kube::Error::Api(e)) if e.code == 404 => ErrorClass::NotFound,
            _ => ErrorClass::Other,
        }
    }
}
