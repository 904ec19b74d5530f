//! Pure state transitions for the modal store
//!
//! `reduce` never touches anything outside its inputs. Returning `None`
//! means "nothing changed": the caller keeps its existing snapshot, so
//! memoized subscribers are not woken for no-op dispatches.

use crate::action::ModalAction;
use crate::state::{ModalState, StoreSnapshot};

/// Apply one action to a snapshot.
///
/// | Action    | Precondition | Effect                                         |
/// |-----------|--------------|------------------------------------------------|
/// | Show      | none         | upsert entry; visibility from `mounted`; args replaced |
/// | Hide      | entry exists | `visible = false`, args retained               |
/// | Remove    | entry exists | entry deleted                                  |
/// | SetFlags  | entry exists | flag overrides shallow-merged                  |
///
/// Actions whose precondition fails, and actions that would produce an
/// identical snapshot, return `None`.
pub fn reduce(state: &StoreSnapshot, action: &ModalAction) -> Option<StoreSnapshot> {
    match action {
        ModalAction::Show { key, args, mounted } => {
            let mut entry = ModalState::shown(key.clone(), args.clone(), *mounted);
            // keep_mounted survives re-shows; it is only changed via SetFlags
            if let Some(existing) = state.get(key) {
                entry.keep_mounted = existing.keep_mounted;
                if existing == &entry {
                    return None;
                }
            }
            let mut next = state.clone();
            next.insert(entry);
            Some(next)
        }

        ModalAction::Hide { key } => {
            let existing = state.get(key)?;
            if !existing.visible {
                return None;
            }
            let mut next = state.clone();
            if let Some(entry) = next.get_mut(key) {
                entry.visible = false;
            }
            Some(next)
        }

        ModalAction::Remove { key } => {
            if !state.contains(key) {
                return None;
            }
            let mut next = state.clone();
            next.remove(key);
            Some(next)
        }

        ModalAction::SetFlags { key, flags } => {
            let existing = state.get(key)?;
            let mut merged = existing.clone();
            if let Some(keep_mounted) = flags.keep_mounted {
                merged.keep_mounted = keep_mounted;
            }
            if &merged == existing {
                return None;
            }
            let mut next = state.clone();
            next.insert(merged);
            Some(next)
        }
    }
}
