//! # Session model — identity, credential, lifecycle flags
//!
//! Defines the data carried by the session store. These types are
//! `Serialize + Deserialize` so the identity/credential pair can round-trip
//! through the durable vault slot and through the backend's auth responses.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`AuthRole`] | One of the four account roles the marketplace knows about. Serialized in the backend's SCREAMING_SNAKE_CASE wire form (`"CUSTOMER_SERVICE"`). |
//! | [`AuthUser`] | The signed-in identity: id, email, display name, role. |
//! | [`Session`] | The full in-memory session record: optional user + token pair, the one-shot `hydrated` flag, and the transient `loading` flag set around in-flight login/register calls. |
//!
//! `user` and `token` are set and cleared together by the store's wholesale
//! operations; only the narrow setters can split the pair, and their callers
//! own that invariant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role, fixed closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthRole {
    Admin,
    Seller,
    Buyer,
    CustomerService,
}

impl AuthRole {
    /// Wire form of the role tag, as the backend expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthRole::Admin => "ADMIN",
            AuthRole::Seller => "SELLER",
            AuthRole::Buyer => "BUYER",
            AuthRole::CustomerService => "CUSTOMER_SERVICE",
        }
    }
}

impl fmt::Display for AuthRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthRole {
    type Err = UnknownRole;

    /// Parses a role tag, tolerating surrounding whitespace and any casing.
    /// This is the normalization applied to caller-supplied role strings
    /// before they are sent to the registration endpoint.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(AuthRole::Admin),
            "SELLER" => Ok(AuthRole::Seller),
            "BUYER" => Ok(AuthRole::Buyer),
            "CUSTOMER_SERVICE" => Ok(AuthRole::CustomerService),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error for a role tag outside the closed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// The signed-in identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: AuthRole,
}

/// In-memory session record held by the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    /// Identity, absent when unauthenticated.
    pub user: Option<AuthUser>,
    /// Opaque bearer token, absent when unauthenticated.
    pub token: Option<String>,
    /// False until the durable-storage restore completes (found or not).
    pub hydrated: bool,
    /// True only while a login/registration call is in flight.
    pub loading: bool,
}

impl Session {
    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// The part of the session that survives in the durable slot.
///
/// `hydrated` is stored for completeness but ignored on restore: the
/// rehydration step decides that flag itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct PersistedSession {
    pub user: Option<AuthUser>,
    pub token: Option<String>,
    #[serde(default)]
    pub hydrated: bool,
}

impl PersistedSession {
    pub(crate) fn of(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            token: session.token.clone(),
            hydrated: session.hydrated,
        }
    }
}
