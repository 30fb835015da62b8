use std::sync::{Arc, Mutex};

/// Async interface to the durable slot holding the serialized session.
///
/// A vault stores at most one value. Implementations live in sibling
/// modules ([`crate::MemoryVault`], and `LocalStorageVault` on the web
/// platform).
pub trait SessionVault {
    /// Read the stored payload, `None` if the slot is empty or unreadable.
    fn load(&self) -> impl std::future::Future<Output = Option<String>>;
    /// Overwrite the slot with `raw`.
    fn store(&self, raw: &str) -> impl std::future::Future<Output = ()>;
    /// Erase the slot.
    fn clear(&self) -> impl std::future::Future<Output = ()>;
}

/// In-memory vault for testing and native fallback.
///
/// Clones share the same slot, so a second store built over a clone sees
/// what the first one persisted — which is how tests simulate a process
/// restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryVault {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionVault for MemoryVault {
    async fn load(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    async fn store(&self, raw: &str) {
        *self.slot.lock().unwrap() = Some(raw.to_string());
    }

    async fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}
