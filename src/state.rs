//! Process-wide active flag flipped by the hotkey

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the auto-click feature is currently active
///
/// Starts inactive. Written only through [`ActiveState::toggle`].
#[derive(Debug, Default)]
pub struct ActiveState {
    active: AtomicBool,
}

impl ActiveState {
    /// Create an inactive state
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag and return the new value
    pub fn toggle(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::AcqRel)
    }

    /// Current value of the flag
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}
