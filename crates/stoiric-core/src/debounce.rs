//! Trailing-edge write coalescing for rapid successive updates.
//!
//! Continuously-changing input (a rating slider, say) would otherwise issue
//! a storage write per tick. [`Debouncer`] keeps only the latest submitted
//! value and flushes it once the quiet period elapses with no newer
//! submission: last write wins. A pending flush is not tied to any UI
//! lifecycle; it may still fire after the caller moved on, which is fine
//! because writes target a stable date key.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Coalesces a stream of submissions into one flush per quiet period.
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    pending: Arc<Mutex<Option<T>>>,
    generation: Arc<AtomicU64>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record `value` as the pending write and restart the quiet period.
    ///
    /// `flush` runs only if no newer submission arrives before the period
    /// elapses; superseded submissions are dropped without flushing.
    pub fn submit<F, Fut>(&self, value: T, flush: F)
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);

        let pending = Arc::clone(&self.pending);
        let current = Arc::clone(&self.generation);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            let value = pending.lock().unwrap_or_else(|e| e.into_inner()).take();
            if let Some(value) = value {
                flush(value).await;
            }
        });
    }
}
