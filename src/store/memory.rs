use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use kube::{Resource, ResourceExt};

use super::{ErrorClass, ObjectStore};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Create,
    Update,
    Delete,
}

/// A call served by an [`InMemoryStore`], in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreCall {
    pub op: StoreOp,
    pub name: String,
}

/// In-process [`ObjectStore`] for tests.
///
/// Missing objects are reported as [`Error::NotFound`]; injected failures
/// (see [`fail_next`](Self::fail_next)) as [`Error::Store`].
pub struct InMemoryStore<K> {
    objects: Mutex<BTreeMap<String, K>>,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<HashMap<StoreOp, String>>,
    version: AtomicU64,
}

impl<K> Default for InMemoryStore<K> {
    fn default() -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            version: AtomicU64::new(0),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K> InMemoryStore<K>
where
    K: Resource<DynamicType = ()> + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object directly, bypassing the call log.
    pub fn insert(&self, mut obj: K) {
        self.stamp(&mut obj);
        lock(&self.objects).insert(obj.name_any(), obj);
    }

    /// Current stored copy of `name`, without logging a call.
    pub fn snapshot(&self, name: &str) -> Option<K> {
        lock(&self.objects).get(name).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.objects).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Make the next `op` call fail with a non-not-found error.
    pub fn fail_next(&self, op: StoreOp, message: impl Into<String>) {
        lock(&self.failures).insert(op, message.into());
    }

    fn record(&self, op: StoreOp, name: &str) -> Result<()> {
        lock(&self.calls).push(StoreCall {
            op,
            name: name.to_string(),
        });
        match lock(&self.failures).remove(&op) {
            Some(message) => Err(Error::Store(message)),
            None => Ok(()),
        }
    }

    fn stamp(&self, obj: &mut K) {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        obj.meta_mut().resource_version = Some(version.to_string());
    }

    fn not_found(name: &str) -> Error {
        Error::NotFound(format!("{} {name}", K::kind(&())))
    }
}

#[async_trait]
impl<K> ObjectStore<K> for InMemoryStore<K>
where
    K: Resource<DynamicType = ()> + Clone + Send + Sync + 'static,
{
    async fn get(&self, name: &str) -> Result<K> {
        self.record(StoreOp::Get, name)?;
        self.snapshot(name).ok_or_else(|| Self::not_found(name))
    }

    async fn create(&self, obj: &K) -> Result<K> {
        let name = obj.name_any();
        self.record(StoreOp::Create, &name)?;

        let mut objects = lock(&self.objects);
        if objects.contains_key(&name) {
            return Err(Error::store(format!("{} {name} already exists", K::kind(&()))));
        }
        let mut created = obj.clone();
        self.stamp(&mut created);
        objects.insert(name, created.clone());
        Ok(created)
    }

    async fn update(&self, obj: &K) -> Result<K> {
        let name = obj.name_any();
        self.record(StoreOp::Update, &name)?;

        let mut objects = lock(&self.objects);
        if !objects.contains_key(&name) {
            return Err(Self::not_found(&name));
        }
        let mut updated = obj.clone();
        self.stamp(&mut updated);
        objects.insert(name, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.record(StoreOp::Delete, name)?;
        match lock(&self.objects).remove(name) {
            Some(_) => Ok(()),
            None => Err(Self::not_found(name)),
        }
    }

    fn classify_error(&self, err: &Error) -> ErrorClass {
        match err {
            Error::NotFound(_) => ErrorClass::NotFound,
            _ => ErrorClass::Other,
        }
    }
}
