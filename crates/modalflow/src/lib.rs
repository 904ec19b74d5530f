//! # modalflow - Framework-Agnostic Modal Orchestration
//!
//! Manages the lifecycle of dynamically shown/hidden dialog components:
//! *when* a modal is logically visible, *what* arguments it was shown
//! with, and *how* its result travels back to the code that requested it.
//! Rendering, styling and teardown timing stay with the host.
//!
//! The two halves of a dialog interaction are deliberately decoupled:
//! the show future carries the modal's **result** (settled by
//! `resolve`/`reject`), while the hide future carries **close
//! completion** (settled by `resolve_hide`, e.g. after an exit
//! animation). A caller can await the decision without caring when the
//! UI finishes tearing down.
//!
//! ```no_run
//! use std::sync::Arc;
//! use modalflow::{ModalDescriptor, ModalHandle, ModalManager};
//! use serde_json::json;
//!
//! # async fn demo() -> modalflow::Result<()> {
//! let manager = ModalManager::new();
//! let confirm = manager.register(ModalDescriptor::new(
//!     "confirm-delete",
//!     Arc::new(|_handle: ModalHandle, _args| {
//!         // the host renders the dialog here; on click it calls
//!         // _handle.resolve(...) and _handle.hide()
//!     }),
//! ));
//!
//! let answer = manager.show(&confirm, json!({"title": "Delete Item"})).await?;
//! assert_eq!(answer["result"], json!(true));
//! # Ok(())
//! # }
//! ```
//!
//! ## Components
//!
//! - [`ModalManager`] - the orchestrator; owns registry, mount tracker,
//!   store and pending operations behind one clonable service instance
//! - [`ModalHandle`] - subscription interface bound to one key
//! - [`ModalDescriptor`] / [`ModalComponent`] - the host capability seam
//! - [`ModalPlaceholder`] - render-pass integration point
//! - [`StoreBackend`] / [`ModalStore`] - built-in store and the override
//!   seam for hosts with their own global-state mechanism

pub mod descriptor;
pub mod handle;
pub mod manager;
pub mod mount;
pub mod pending;
pub mod placeholder;
pub mod registry;
pub mod store;

pub use descriptor::{ModalComponent, ModalDescriptor};
pub use handle::{ModalHandle, MountGuard};
pub use manager::ModalManager;
pub use pending::{SettleFuture, Settlement};
pub use placeholder::ModalPlaceholder;
pub use store::{ModalStore, StoreBackend};

// Re-export the core domain types hosts interact with
pub use modalflow_core::{
    reduce, Error, ModalAction, ModalFlags, ModalKey, ModalState, Result, StoreSnapshot,
};
