//! Cooperative cancellation with an interruptible pacing sleep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crossbeam_utils::CachePadded;

#[derive(Debug, Default)]
struct Inner {
    // Polled once per step by every loop; kept off the condvar's cache line.
    cancelled: CachePadded<AtomicBool>,
    lock: Mutex<()>,
    wake: Condvar,
}

/// A cloneable cancellation flag shared by the loops of one run.
///
/// Cancelling wakes any loop currently sleeping in [`CancelToken::sleep`], so
/// a superseded run stops within one step instead of one full pace interval.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trips the token and wakes all sleepers. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        let _guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner.wake.notify_all();
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Sleeps for `pace` unless cancelled first.
    ///
    /// Returns `true` if the full duration elapsed, `false` if the token was
    /// (or became) cancelled.
    pub fn sleep(&self, pace: Duration) -> bool {
        if self.is_cancelled() {
            return false;
        }
        if pace.is_zero() {
            return true;
        }
        let deadline = Instant::now() + pace;
        let mut guard = self
            .inner
            .lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            guard = self
                .inner
                .wake
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}
