//! Global busy flag bracketing user-visible async operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Single busy flag shared by all mutating operations: acquired before
/// dispatch, released by the guard's Drop on every exit path. While held,
/// further mutating operations are refused; pure navigation between
/// already-loaded screens never touches it.
#[derive(Clone, Default)]
pub struct LoadingGate {
    busy: Arc<AtomicBool>,
}

impl LoadingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start a gated operation. Returns `None` while another one
    /// is still in flight.
    pub fn begin(&self) -> Option<LoadingGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| LoadingGuard {
                busy: self.busy.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

pub struct LoadingGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
