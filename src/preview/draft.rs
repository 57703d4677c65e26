use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide draft-mode switch. While enabled, pages include unpublished
/// documents and skip the view cache.
#[derive(Debug, Clone, Default)]
pub struct DraftMode(Arc<AtomicBool>);

impl DraftMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn enable(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
