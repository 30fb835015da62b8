//! Platform-appropriate session and client constructors.
//!
//! - **Web** (WASM + `web` feature): session persisted to `localStorage`
//!   via [`store::LocalStorageVault`]
//! - **Native / tests**: in-memory vault

use api::{ApiClient, ApiConfig};
use store::SessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformVault = store::LocalStorageVault;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformVault = store::MemoryVault;

/// Create a session store over the platform's durable vault.
pub fn make_session() -> SessionStore<PlatformVault> {
    SessionStore::new(PlatformVault::new())
}

/// Create an API client bound to the given session, configured from the
/// build-time backend URL.
pub fn make_client(session: SessionStore<PlatformVault>) -> ApiClient<PlatformVault> {
    ApiClient::new(ApiConfig::default(), session)
}
