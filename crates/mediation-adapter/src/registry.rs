//! Shim registry.
//!
//! Maps request identifiers to live shims so a later `show`/`invalidate`
//! call can find the instance that handled the load. Exactly one shim exists
//! per identifier; registering a duplicate replaces (and thereby discards)
//! the previous one.

use crate::shim::AdShim;
use mediation_types::RequestId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Storage of shim instances, keyed by the request identifier.
#[derive(Default)]
pub struct ShimRegistry {
    shims: Mutex<HashMap<RequestId, Arc<AdShim>>>,
}

impl ShimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shim under its request identifier.
    pub fn insert(&self, shim: Arc<AdShim>) {
        let identifier = shim.request().identifier;
        let previous = self.shims.lock().insert(identifier, shim);
        if let Some(previous) = previous {
            warn!(request = %identifier, "replaced an existing shim for the same request");
            previous.invalidate();
        }
    }

    /// Looks up the shim for an identifier.
    pub fn get(&self, identifier: RequestId) -> Option<Arc<AdShim>> {
        self.shims.lock().get(&identifier).cloned()
    }

    /// Removes and returns the shim for an identifier.
    pub fn remove(&self, identifier: RequestId) -> Option<Arc<AdShim>> {
        self.shims.lock().remove(&identifier)
    }

    pub fn len(&self) -> usize {
        self.shims.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shims.lock().is_empty()
    }
}
