//! The remote object store seen by the reconciler.
//!
//! [`ObjectStore`] is the four-call surface the reconciler needs plus one
//! capability check, [`ObjectStore::classify_error`], so the create-or-update
//! decision does not depend on how a particular store reports "not found".

use async_trait::async_trait;

use crate::error::{Error, Result};

mod cluster;
mod memory;

pub use cluster::KubeStore;
pub use memory::{InMemoryStore, StoreCall, StoreOp};

/// The only distinction the reconciler draws between store errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    Other,
}

/// Get / create / replace / delete of objects of kind `K`, keyed by name.
#[async_trait]
pub trait ObjectStore<K>: Send + Sync
where
    K: Send + Sync + 'static,
{
    async fn get(&self, name: &str) -> Result<K>;

    async fn create(&self, obj: &K) -> Result<K>;

    /// Full replace of the stored object.
    async fn update(&self, obj: &K) -> Result<K>;

    async fn delete(&self, name: &str) -> Result<()>;

    fn classify_error(&self, err: &Error) -> ErrorClass;
}

/// Fetch `name`, mapping a not-found error to `None`.
pub async fn lookup<K, S>(store: &S, name: &str) -> Result<Option<K>>
where
    K: Send + Sync + 'static,
    S: ObjectStore<K> + ?Sized,
{
    match store.get(name).await {
        Ok(obj) => Ok(Some(obj)),
        Err(e) if store.classify_error(&e) == ErrorClass::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
