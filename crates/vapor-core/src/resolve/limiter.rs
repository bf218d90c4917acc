use std::future::Future;

use tokio::sync::Semaphore;

use crate::config::network::MAX_CONCURRENT_REQUESTS;

/// Counting gate bounding how many resolutions run at once.
///
/// One limiter belongs to one batch and is never shared between batches.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    permits: Semaphore,
    capacity: usize,
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(MAX_CONCURRENT_REQUESTS)
    }
}

impl ConcurrencyLimiter {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Semaphore::new(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of permits currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `fut` while holding a permit.
    ///
    /// Returns `None` only if the gate was closed, which never happens for a
    /// limiter owned by a running batch.
    pub async fn run<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        let _permit = self.permits.acquire().await.ok()?;
        Some(fut.await)
    }
}
