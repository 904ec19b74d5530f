//! Store actions (TEA pattern)

use serde_json::Value;

use crate::key::ModalKey;
use crate::state::ModalFlags;

/// All state transitions the modal store understands.
///
/// `Show` carries the mount decision so the reducer stays pure: the
/// orchestrator consults the mount tracker at dispatch time and bakes the
/// answer into the action.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    /// Upsert an entry; visibility depends on whether a host is mounted
    Show {
        key: ModalKey,
        args: Option<Value>,
        mounted: bool,
    },

    /// Logically hide the modal, retaining its args
    Hide { key: ModalKey },

    /// Delete the entry entirely
    Remove { key: ModalKey },

    /// Shallow-merge flag overrides into an existing entry
    SetFlags { key: ModalKey, flags: ModalFlags },
}

impl ModalAction {
    /// The key this action targets
    pub fn key(&self) -> &ModalKey {
        match self {
            Self::Show { key, .. }
            | Self::Hide { key }
            | Self::Remove { key }
            | Self::SetFlags { key, .. } => key,
        }
    }

    /// Short description for logging
    pub fn description(&self) -> &'static str {
        match self {
            Self::Show { .. } => "show",
            Self::Hide { .. } => "hide",
            Self::Remove { .. } => "remove",
            Self::SetFlags { .. } => "set-flags",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_key_accessor() {
        let key = ModalKey::named("a");
        let action = ModalAction::Hide { key: key.clone() };
        assert_eq!(action.key(), &key);
        assert_eq!(action.description(), "hide");
    }
}
