use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancelled requests are not sent, and replies landing afterwards are dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    cancelled: Arc<AtomicBool>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
