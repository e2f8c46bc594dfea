//! Create-or-update reconciliation of a single named object.
//!
//! Each call makes one lookup at most and then one write; a not-found lookup
//! means create, a successful lookup means full replace, and any other
//! lookup error is returned as-is.

use kube::{Resource, ResourceExt};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{Error, Result};
use crate::manifest::ManifestSource;
use crate::store::{lookup, ObjectStore};

/// Decode `source` and make sure it names an object.
pub async fn parse_named<K>(source: &ManifestSource) -> Result<K>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
{
    let obj: K = source.parse().await?;
    match obj.meta().name.as_deref() {
        Some(name) if !name.is_empty() => Ok(obj),
        _ => Err(Error::manifest(format!(
            "{} manifest from {source} has no metadata.name",
            K::kind(&())
        ))),
    }
}

/// Converge the object described by `source` onto the store.
pub async fn create_or_update<K, S>(store: &S, source: &ManifestSource) -> Result<K>
where
    K: Resource<DynamicType = ()> + DeserializeOwned + Send + Sync + 'static,
    S: ObjectStore<K> + ?Sized,
{
    let desired: K = parse_named(source).await?;
    let name = desired.name_any();
    let kind = K::kind(&());

    match lookup(store, &name).await? {
        None => {
            let created = store.create(&desired).await?;
            info!(%name, %kind, "created");
            Ok(created)
        }
        Some(_) => {
            let updated = store.update(&desired).await?;
            info!(%name, %kind, "updated");
            Ok(updated)
        }
    }
}

/// Delete the object named by `source`, whatever its current contents.
pub async fn delete<K, S>(store: &S, source: &ManifestSource) -> Result<()>
where
    K: Resource<DynamicType = ()> + DeserializeOwned + Send + Sync + 'static,
    S: ObjectStore<K> + ?Sized,
{
    let obj: K = parse_named(source).await?;
    let name = obj.name_any();
    store.delete(&name).await?;
    info!(%name, kind = %K::kind(&()), "deleted");
    Ok(())
}

/// Replace `obj` unconditionally, skipping the existence check.
pub async fn update<K, S>(store: &S, obj: &K) -> Result<()>
where
    K: Resource<DynamicType = ()> + Send + Sync + 'static,
    S: ObjectStore<K> + ?Sized,
{
    store.update(obj).await?;
    info!(name = %obj.name_any(), kind = %K::kind(&()), "updated");
    Ok(())
}
