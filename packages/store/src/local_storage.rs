//! # localStorage vault — browser-side persistence
//!
//! [`LocalStorageVault`] is the [`SessionVault`] implementation used on the
//! **web platform**. It keeps the serialized session under a single
//! `localStorage` key ([`crate::SESSION_SLOT_KEY`]), which is what lets a
//! signed-in session survive a full page reload: the rehydration step reads
//! this slot back before any guarded view makes a redirect decision.
//!
//! ## Error handling
//!
//! All methods silently swallow storage errors (returning `None` for reads,
//! doing nothing for writes). A blocked or unavailable `localStorage`
//! (private browsing, storage quota) degrades to "no persisted session"
//! rather than crashing — the user simply lands unauthenticated.

use crate::vault::SessionVault;
use crate::SESSION_SLOT_KEY;

/// `localStorage`-backed vault for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageVault;

impl LocalStorageVault {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionVault for LocalStorageVault {
    async fn load(&self) -> Option<String> {
        Self::storage()?.get_item(SESSION_SLOT_KEY).ok().flatten()
    }

    async fn store(&self, raw: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(SESSION_SLOT_KEY, raw).is_err() {
                tracing::warn!("failed to persist session to localStorage");
            }
        }
    }

    async fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_SLOT_KEY);
        }
    }
}
