pub mod session;

mod vault;
pub use vault::{MemoryVault, SessionVault};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageVault;

mod store;
pub use store::{SessionStore, SubscriptionId};

pub use session::{AuthRole, AuthUser, Session, UnknownRole};

/// Name of the durable slot holding the serialized session.
pub const SESSION_SLOT_KEY: &str = "auth-storage";
