//! Request and response payloads for the backend's REST endpoints.
//!
//! Every body is declared here and parsed into a typed value at the
//! pipeline boundary — a 2xx response that does not match its schema fails
//! fast with [`crate::ApiError::Decode`] instead of leaking loose JSON into
//! the views. Wire names follow the backend's camelCase convention.

use serde::{Deserialize, Serialize};
use store::{AuthRole, AuthUser};

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`. The role is normalized (trimmed,
/// upper-cased) before this is built, so only closed-set tags go out.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
    pub role: AuthRole,
}

/// Successful response of the two auth endpoints.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: AuthUser,
    pub access_token: String,
}

/// Error body the backend attaches to rejected requests.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Product summary as listed by `GET /products`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}
