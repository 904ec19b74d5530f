//! Tracks which keys currently have a live host attached
//!
//! `show()` consults this before deciding between immediate visibility and
//! the delayed variant, so a show fired before any host subscribes does not
//! strand state with no consumer to display it.

use std::collections::HashSet;

use modalflow_core::ModalKey;

#[derive(Default)]
pub struct MountTracker {
    mounted: HashSet<ModalKey>,
}

impl MountTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not mounted before
    pub fn mark_mounted(&mut self, key: &ModalKey) -> bool {
        self.mounted.insert(key.clone())
    }

    /// Returns true if the key was mounted
    pub fn unmark_mounted(&mut self, key: &ModalKey) -> bool {
        self.mounted.remove(key)
    }

    pub fn is_mounted(&self, key: &ModalKey) -> bool {
        self.mounted.contains(key)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }
}
