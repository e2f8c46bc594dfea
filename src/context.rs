//! Per-test context: a scoped identifier plus the finalizers that tear down
//! everything the test created.
//!
//! Finalizers are registered one by one while the test allocates resources
//! and run together by [`TestContext::cleanup`].  Cleanup launches them in
//! reverse registration order (a resource created later may depend on one
//! created earlier), lets them run concurrently, waits for every one of them
//! and then reports all failures at once.
//!
//! Cleanup drains the registry: a second call finds nothing to run and
//! returns `Ok(())`.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::error::{Error, FinalizerFailure, FinalizerFailures, Result};
use crate::helpers::scoped_id;

/// A deferred teardown action.  Calling it starts the work; the returned
/// future completes when the resource is gone.
pub type FinalizerFn = Box<dyn FnOnce() -> BoxFuture<'static, Result<()>> + Send>;

pub struct TestContext {
    id: String,
    finalizers: Vec<FinalizerFn>,
}

impl TestContext {
    /// Create a context for the test called `raw_name`, created at `now`.
    pub fn new(raw_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: scoped_id(raw_name, now),
            finalizers: Vec::new(),
        }
    }

    /// Create a context named after the current test.
    ///
    /// The libtest harness names each test thread after the test path
    /// (`module::test_name`); outside of it the thread may be unnamed.
    pub fn for_current_test() -> Self {
        let thread = std::thread::current();
        let name = thread.name().unwrap_or("unnamed");
        Self::new(name, Utc::now())
    }

    /// Identifier for the next resource this test creates.
    ///
    /// The suffix is the number of finalizers registered so far, so two
    /// calls separated by a registration never return the same value.
    pub fn id(&self) -> String {
        format!("{}-{}", self.id, self.finalizers.len())
    }

    /// The immutable identifier fixed at creation time.
    pub fn base_id(&self) -> &str {
        &self.id
    }

    pub fn finalizer_count(&self) -> usize {
        self.finalizers.len()
    }

    /// Register a teardown action.  Registration is sequential; it must not
    /// race with [`cleanup`](Self::cleanup).
    pub fn add_finalizer_fn<F, Fut>(&mut self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.finalizers.push(Box::new(move || f().boxed()));
    }

    /// Run every registered finalizer and report their aggregated outcome.
    pub async fn cleanup(&mut self) -> Result<()> {
        let handles = self.launch();
        collect(join_all(handles).await)
    }

    /// Like [`cleanup`](Self::cleanup), but gives up waiting after
    /// `timeout`.  Finalizers still running at that point are left running.
    pub async fn cleanup_with_timeout(&mut self, timeout: Duration) -> Result<()> {
        let handles = self.launch();
        match tokio::time::timeout(timeout, join_all(handles)).await {
            Ok(results) => collect(results),
            Err(_) => {
                warn!(id = %self.id, ?timeout, "cleanup timed out");
                Err(Error::CleanupTimeout(timeout))
            }
        }
    }

    /// Drain the registry and spawn every finalizer, last registered first.
    /// Nothing is awaited here.
    fn launch(&mut self) -> Vec<impl Future<Output = Joined>> {
        let finalizers = std::mem::take(&mut self.finalizers);
        if finalizers.is_empty() {
            debug!(id = %self.id, "no finalizers to run");
            return Vec::new();
        }
        debug!(id = %self.id, count = finalizers.len(), "running finalizers");

        finalizers
            .into_iter()
            .enumerate()
            .rev()
            .map(|(position, f)| {
                let handle = tokio::spawn(f());
                async move { (position, handle.await) }
            })
            .collect()
    }
}

type Joined = (usize, std::result::Result<Result<()>, JoinError>);

fn collect(results: Vec<Joined>) -> Result<()> {
    let mut failures: Vec<FinalizerFailure> = results
        .into_iter()
        .filter_map(|(position, joined)| {
            let error = match joined {
                Ok(Ok(())) => return None,
                Ok(Err(e)) => e,
                Err(e) => Error::FinalizerPanicked(e.to_string()),
            };
            warn!(position, error = %error, "finalizer failed");
            Some(FinalizerFailure { position, error })
        })
        .collect();

    if failures.is_empty() {
        return Ok(());
    }
    failures.sort_by_key(|f| f.position);
    Err(Error::Finalizers(FinalizerFailures(failures)))
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if !self.finalizers.is_empty() {
            warn!(
                id = %self.id,
                pending = self.finalizers.len(),
                "test context dropped without running its finalizers"
            );
        }
    }
}

impl std::fmt::Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("id", &self.id)
            .field("finalizers", &self.finalizers.len())
            .finish()
    }
}
