//! Cross-cutting orchestration scenarios

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::watch;

use modalflow::{
    ModalAction, ModalDescriptor, ModalFlags, ModalHandle, ModalKey, ModalManager,
    ModalPlaceholder, ModalStore, StoreBackend, StoreSnapshot,
};

#[tokio::test]
async fn test_independent_modals_do_not_interfere() {
    let manager = ModalManager::new();
    let a = ModalKey::named("a");
    let b = ModalKey::named("b");
    let _mount_a = manager.use_modal(&a).attach();

    let fa = manager.show(&a, json!({"from": "a"}));
    let fb = manager.show(&b, json!({"from": "b"}));

    manager.resolve(&b, json!("b-done"));
    assert_eq!(fb.await, Ok(json!("b-done")));

    // a is untouched by b's settlement
    assert!(manager.state_of(&a).is_some_and(|s| s.visible));
    manager.resolve(&a, json!("a-done"));
    assert_eq!(fa.await, Ok(json!("a-done")));
}

#[tokio::test]
async fn test_caller_layers_its_own_timeout() {
    // no timeout is built in; a caller that wants one races the future
    let manager = ModalManager::new();
    let key = ModalKey::named("never-answered");

    let future = manager.show(&key, None);
    let outcome = tokio::time::timeout(Duration::from_millis(20), future.clone()).await;
    assert!(outcome.is_err(), "show future must still be pending");

    // the channel survived the lost race
    manager.resolve(&key, json!("eventually"));
    assert_eq!(future.await, Ok(json!("eventually")));
}

/// Host-supplied backend that mirrors the built-in store but counts
/// dispatches, standing in for an application's own global-state layer.
struct CountingStore {
    inner: ModalStore,
    dispatches: AtomicUsize,
}

impl CountingStore {
    fn new() -> Self {
        Self {
            inner: ModalStore::new(),
            dispatches: AtomicUsize::new(0),
        }
    }
}

impl StoreBackend for CountingStore {
    fn dispatch(&self, action: ModalAction) {
        self.dispatches.fetch_add(1, Ordering::SeqCst);
        self.inner.dispatch(action);
    }

    fn snapshot(&self) -> StoreSnapshot {
        self.inner.snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.subscribe()
    }
}

#[tokio::test]
async fn test_external_store_backend_sees_every_dispatch() {
    let store = Arc::new(CountingStore::new());
    let manager = ModalManager::with_store(store.clone() as Arc<dyn StoreBackend>);
    let key = ModalKey::named("a");

    let future = manager.show(&key, json!({"x": 1}));
    let _ = manager.hide(&key);
    manager.resolve(&key, json!("done"));
    assert_eq!(future.await, Ok(json!("done")));

    // show + hide went through the host's store; settlement does not
    // touch the store at all
    assert_eq!(store.dispatches.load(Ordering::SeqCst), 2);
    assert!(manager.state_of(&key).is_some_and(|s| !s.visible));
}

#[tokio::test]
async fn test_keep_mounted_hint_reaches_subscribers() {
    let instantiations = Arc::new(AtomicUsize::new(0));
    let manager = ModalManager::new();

    let counter = Arc::clone(&instantiations);
    let key = manager.register(ModalDescriptor::new(
        "settings",
        Arc::new(move |_handle: ModalHandle, _args: Option<Value>| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    ));

    let _ = manager.show(&key, None);
    manager.set_flags(&key, ModalFlags::keep_mounted(true));
    let _ = manager.hide(&key);

    let handle = manager.use_modal(&key);
    assert!(handle.keep_mounted());
    assert!(!handle.visible());

    // hidden entries still go through the render pass so a keep-mounted
    // host can keep its component alive
    let placeholder = ModalPlaceholder::new(&manager);
    assert_eq!(placeholder.render_pass(), vec![key]);
    assert_eq!(instantiations.load(Ordering::SeqCst), 1);
}
