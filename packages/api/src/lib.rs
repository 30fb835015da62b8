//! # API crate — typed REST client for the EARTHLYN backend
//!
//! Everything the frontends send to the backend goes through this crate. It
//! owns the endpoint schemas, the error taxonomy, and the authenticated
//! request pipeline that decorates each call with the session's bearer token
//! and polices the credential's validity.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`] — bearer attachment, 401/403 invalidation protocol, bounded retry, login/register |
//! | [`config`] | [`ApiConfig`] / [`RetryPolicy`] — backend base URL and retry configuration |
//! | [`error`] | [`ApiError`] — the failure taxonomy surfaced to callers |
//! | [`navigate`] | [`Navigator`] seam used for forced redirects, with the browser implementation |
//! | [`types`] | Request/response payload schemas, parsed at the pipeline boundary |

pub mod client;
pub mod config;
pub mod error;
pub mod navigate;
pub mod types;

pub use client::ApiClient;
pub use config::{ApiConfig, RetryPolicy};
pub use error::ApiError;
pub use navigate::{BrowserNavigator, Navigator, LOGIN_PATH};
pub use types::{AuthResponse, Product};

pub use store::{AuthRole, AuthUser, Session};
