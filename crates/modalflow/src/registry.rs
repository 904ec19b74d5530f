//! Descriptor registry
//!
//! Registration is idempotent: re-registering an existing key refreshes
//! its default args but keeps the original component reference. Entries
//! outlive individual show/hide cycles and survive `remove()`; only
//! `unregister` deletes them.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use modalflow_core::prelude::*;
use modalflow_core::ModalKey;

use crate::descriptor::{ModalComponent, ModalDescriptor};

struct RegistryEntry {
    component: Arc<dyn ModalComponent>,
    default_args: Option<Value>,
}

#[derive(Default)]
pub struct ModalRegistry {
    entries: HashMap<ModalKey, RegistryEntry>,
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor, or refresh the default args of an existing one.
    /// Returns the key under which the descriptor is tracked.
    pub fn register(&mut self, descriptor: ModalDescriptor) -> ModalKey {
        let (key, component, default_args) = descriptor.into_parts();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                trace!("refreshing default args for already-registered {}", key);
                entry.default_args = default_args;
            }
            None => {
                debug!("registering modal {}", key);
                self.entries.insert(
                    key.clone(),
                    RegistryEntry {
                        component,
                        default_args,
                    },
                );
            }
        }
        key
    }

    /// Delete a descriptor. Store state and pending operations for the key
    /// are deliberately untouched.
    pub fn unregister(&mut self, key: &ModalKey) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            debug!("unregistered modal {}", key);
        }
        removed
    }

    /// The registered component for this key, if any
    pub fn resolve_renderer(&self, key: &ModalKey) -> Option<Arc<dyn ModalComponent>> {
        self.entries.get(key).map(|e| Arc::clone(&e.component))
    }

    /// Registered default args for this key, if any
    pub fn default_args(&self, key: &ModalKey) -> Option<Value> {
        self.entries.get(key).and_then(|e| e.default_args.clone())
    }

    pub fn contains(&self, key: &ModalKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
