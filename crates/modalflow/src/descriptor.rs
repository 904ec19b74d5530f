//! Renderable descriptors and the host capability trait

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use modalflow_core::ModalKey;

use crate::handle::ModalHandle;

/// Capability every renderable modal must satisfy.
///
/// The core never inspects the host's rendering technology; it only asks
/// the component to instantiate itself with the merged arguments and a
/// live [`ModalHandle`] through which the component reads its own state
/// and settles its results.
pub trait ModalComponent: Send + Sync {
    fn instantiate(&self, handle: ModalHandle, args: Option<Value>);
}

/// Closures work as components, which keeps tests and small hosts terse.
impl<F> ModalComponent for F
where
    F: Fn(ModalHandle, Option<Value>) + Send + Sync,
{
    fn instantiate(&self, handle: ModalHandle, args: Option<Value>) {
        self(handle, args)
    }
}

/// Pairing of a key with a renderable component and optional default args.
#[derive(Clone)]
pub struct ModalDescriptor {
    key: ModalKey,
    component: Arc<dyn ModalComponent>,
    default_args: Option<Value>,
}

impl ModalDescriptor {
    pub fn new(key: impl Into<ModalKey>, component: Arc<dyn ModalComponent>) -> Self {
        Self {
            key: key.into(),
            component,
            default_args: None,
        }
    }

    /// Descriptor under a generated key, for callers that never need a
    /// stable name
    pub fn anonymous(component: Arc<dyn ModalComponent>) -> Self {
        Self::new(ModalKey::generate(), component)
    }

    pub fn with_default_args(mut self, args: Value) -> Self {
        self.default_args = Some(args);
        self
    }

    pub fn key(&self) -> &ModalKey {
        &self.key
    }

    pub fn default_args(&self) -> Option<&Value> {
        self.default_args.as_ref()
    }

    pub(crate) fn into_parts(self) -> (ModalKey, Arc<dyn ModalComponent>, Option<Value>) {
        (self.key, self.component, self.default_args)
    }
}

impl fmt::Debug for ModalDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalDescriptor")
            .field("key", &self.key)
            .field("component", &"<component>")
            .field("default_args", &self.default_args)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_builder() {
        let component: Arc<dyn ModalComponent> = Arc::new(|_handle: ModalHandle, _args| {});
        let descriptor = ModalDescriptor::new("confirm", component)
            .with_default_args(json!({"title": "Confirm"}));
        assert_eq!(descriptor.key().as_str(), "confirm");
        assert_eq!(descriptor.default_args(), Some(&json!({"title": "Confirm"})));
    }

    #[test]
    fn test_anonymous_descriptors_get_unique_keys() {
        let component: Arc<dyn ModalComponent> = Arc::new(|_handle: ModalHandle, _args| {});
        let a = ModalDescriptor::anonymous(Arc::clone(&component));
        let b = ModalDescriptor::anonymous(component);
        assert_ne!(a.key(), b.key());
    }
}
