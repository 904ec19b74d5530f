//! Opaque modal identity keys
//!
//! A [`ModalKey`] is the handle under which a modal's descriptor, state and
//! pending operations are tracked. Keys are either named by the caller
//! (`ModalKey::named("confirm-delete")`) or generated from a process-wide
//! counter for anonymous registrations. `register()` hands the key back to
//! the caller, which stores and passes it instead of relying on any object
//! identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Global counter for generated keys
static KEY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one modal.
///
/// Cheap to clone (shared string) and usable as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalKey(Arc<str>);

impl ModalKey {
    /// Create a key from a caller-chosen name
    pub fn named(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Generate a fresh, process-unique key
    pub fn generate() -> Self {
        let n = KEY_COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(Arc::from(format!("modal.{n}").as_str()))
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalKey {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ModalKey {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl From<&ModalKey> for ModalKey {
    fn from(key: &ModalKey) -> Self {
        key.clone()
    }
}

impl Serialize for ModalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::named(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys_compare_by_name() {
        let a = ModalKey::named("confirm-delete");
        let b = ModalKey::from("confirm-delete");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "confirm-delete");
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let a = ModalKey::generate();
        let b = ModalKey::generate();
        let c = ModalKey::generate();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_key_display_matches_name() {
        let key = ModalKey::named("settings");
        assert_eq!(key.to_string(), "settings");
    }

    #[test]
    fn test_key_serde_round_trip() {
        let key = ModalKey::named("confirm-delete");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"confirm-delete\"");
        let back: ModalKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
