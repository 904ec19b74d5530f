//! # modalflow-core - Core Domain Types
//!
//! Foundation crate for Modalflow. Provides the modal identity type, the
//! per-modal state model, store actions, the pure reducer, error handling,
//! argument merging, and the logging bootstrap.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Identity (`key`)
//! - [`ModalKey`] - Opaque, cheap-clone modal identity (named or generated)
//!
//! ### State (`state`)
//! - [`ModalState`] - Visibility/argument state for one modal
//! - [`StoreSnapshot`] - Immutable map of every modal's state
//! - [`ModalFlags`] - Flag overrides merged by `SetFlags`
//!
//! ### Actions & Reducer (`action`, `reducer`)
//! - [`ModalAction`] - Show / Hide / Remove / SetFlags transitions
//! - [`reduce()`] - Pure transition function; `None` means "unchanged"
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Clone-able error enum (settlement results travel through
//!   shared futures)
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ### Arguments (`args`)
//! - [`merge_args()`] - Shallow merge of registered defaults and call args
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use modalflow_core::prelude::*;
//! ```

pub mod action;
pub mod args;
pub mod error;
pub mod key;
pub mod logging;
pub mod reducer;
pub mod state;

/// Prelude for common imports used throughout all Modalflow crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use action::ModalAction;
pub use args::merge_args;
pub use error::{Error, Result};
pub use key::ModalKey;
pub use reducer::reduce;
pub use state::{ModalFlags, ModalState, StoreSnapshot};
