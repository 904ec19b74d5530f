//! Pending operation tracking for show and hide futures
//!
//! Every `show()` (and `hide()`) has exactly one in-flight result channel
//! per key. The channel is a oneshot pair wrapped in a [`Shared`] future:
//! concurrent callers get clones of the same future and observe the same
//! settlement. Settlement is at-most-once by construction because the
//! sender is consumed by the first settle; a later resolve/reject finds no
//! entry and is a logged no-op.
//!
//! Dropping an entry without settling it (what `remove()` does) drops the
//! sender, and every clone of the future yields `Err(Error::Abandoned)`.

use std::collections::HashMap;

use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use serde_json::Value;
use tokio::sync::oneshot;

use modalflow_core::prelude::*;
use modalflow_core::ModalKey;

/// Outcome delivered to everyone awaiting a show or hide future
pub type Settlement = std::result::Result<Value, Error>;

/// Clone-able future for one pending operation
pub type SettleFuture = Shared<BoxFuture<'static, Settlement>>;

/// One pending operation: the settlement channel plus the shared future
/// handed to callers.
struct PendingOp {
    tx: oneshot::Sender<Settlement>,
    future: SettleFuture,
}

impl PendingOp {
    fn new() -> Self {
        let (tx, rx) = oneshot::channel();
        let future = async move {
            match rx.await {
                Ok(settlement) => settlement,
                // sender dropped without settling
                Err(_) => Err(Error::Abandoned),
            }
        }
        .boxed()
        .shared();
        Self { tx, future }
    }
}

/// Map of pending operations keyed by modal identity.
///
/// The orchestrator keeps two of these: one for show results, one for hide
/// completions.
#[derive(Default)]
pub struct PendingOps {
    ops: HashMap<ModalKey, PendingOp>,
}

impl PendingOps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Future for this key, creating the channel on first request.
    ///
    /// Repeated calls before settlement return clones of the same shared
    /// future (`Shared::ptr_eq`-identical).
    pub fn obtain(&mut self, key: &ModalKey) -> SettleFuture {
        self.ops
            .entry(key.clone())
            .or_insert_with(PendingOp::new)
            .future
            .clone()
    }

    /// Settle and delete the entry for this key.
    ///
    /// Returns false (and does nothing) when no operation is pending,
    /// which makes a second resolve after settlement a harmless no-op.
    pub fn settle(&mut self, key: &ModalKey, settlement: Settlement) -> bool {
        match self.ops.remove(key) {
            Some(op) => {
                // the awaiting side may already be gone; that is fine
                let _ = op.tx.send(settlement);
                true
            }
            None => {
                trace!("no pending operation for {}, settle is a no-op", key);
                false
            }
        }
    }

    /// Drop the entry without settling it. Awaiting callers observe
    /// `Err(Error::Abandoned)`.
    pub fn discard(&mut self, key: &ModalKey) -> bool {
        self.ops.remove(key).is_some()
    }

    /// Whether an operation is pending for this key
    pub fn contains(&self, key: &ModalKey) -> bool {
        self.ops.contains_key(key)
    }

    /// Number of pending operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
