//! This crate contains all shared UI for the workspace.

mod platform;
pub use platform::{make_client, make_session, PlatformVault};

mod auth;
pub use auth::{use_api, use_auth, use_session, AppApi, AppSession, AuthProvider, LogoutButton};

mod guard;
pub use guard::{guard_decision, GuardDecision, RequireAuth, RequireRole};

mod routes;
pub use routes::dashboard_path;

mod navbar;
pub use navbar::Navbar;
