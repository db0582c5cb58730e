//! The busy flag gating outbound model calls.

use kkuldanji_core::error::{HandoverError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that is set while a model call is outstanding.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// Sets the flag, failing with `HandoverError::Busy` if it is already set.
    pub fn try_acquire(&self) -> Result<BusyGuard> {
        self.inner
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| HandoverError::Busy)?;
        Ok(BusyGuard {
            inner: Arc::clone(&self.inner),
        })
    }
}

/// Clears the busy flag when dropped, whatever the call's outcome.
#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.store(false, Ordering::SeqCst);
    }
}
