//! Per-modal visibility state and store snapshots

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key::ModalKey;

/// Visibility and argument state for one modal.
///
/// One entry exists per key currently known to the store; the absence of an
/// entry means "never shown / removed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalState {
    /// Identity this state belongs to
    pub key: ModalKey,

    /// Arguments from the most recent show (retained across hide)
    pub args: Option<Value>,

    /// Whether the modal is logically visible
    pub visible: bool,

    /// Show was requested before any host mounted; flips to `visible`
    /// once a host attaches
    pub delay_visible: bool,

    /// Host hint: keep the component mounted while hidden
    pub keep_mounted: bool,
}

impl ModalState {
    /// State produced by a show request.
    ///
    /// `mounted` decides between immediate visibility and the delayed
    /// variant that waits for a host to attach.
    pub fn shown(key: ModalKey, args: Option<Value>, mounted: bool) -> Self {
        Self {
            key,
            args,
            visible: mounted,
            delay_visible: !mounted,
            keep_mounted: false,
        }
    }
}

/// Flag overrides shallow-merged into an existing entry by `SetFlags`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalFlags {
    /// Override for [`ModalState::keep_mounted`]; `None` leaves it alone
    pub keep_mounted: Option<bool>,
}

impl ModalFlags {
    /// Flags that set `keep_mounted`
    pub fn keep_mounted(value: bool) -> Self {
        Self {
            keep_mounted: Some(value),
        }
    }
}

/// Immutable snapshot of every modal's state.
///
/// Snapshots are cheap to compare (`PartialEq`) so the store can skip
/// notifying subscribers when a dispatch did not change anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    modals: HashMap<ModalKey, ModalState>,
}

impl StoreSnapshot {
    /// Empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// State for one key, if any
    pub fn get(&self, key: &ModalKey) -> Option<&ModalState> {
        self.modals.get(key)
    }

    /// Whether any entry exists for this key
    pub fn contains(&self, key: &ModalKey) -> bool {
        self.modals.contains_key(key)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.modals.len()
    }

    /// Whether no modal has live state
    pub fn is_empty(&self) -> bool {
        self.modals.is_empty()
    }

    /// Iterate over all live entries (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &ModalState> {
        self.modals.values()
    }

    /// All live keys, sorted for deterministic iteration
    pub fn sorted_keys(&self) -> Vec<ModalKey> {
        let mut keys: Vec<ModalKey> = self.modals.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub(crate) fn insert(&mut self, state: ModalState) {
        self.modals.insert(state.key.clone(), state);
    }

    pub(crate) fn remove(&mut self, key: &ModalKey) -> Option<ModalState> {
        self.modals.remove(key)
    }

    pub(crate) fn get_mut(&mut self, key: &ModalKey) -> Option<&mut ModalState> {
        self.modals.get_mut(key)
    }
}
