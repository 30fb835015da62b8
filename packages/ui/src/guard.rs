//! # Route guards — hydration-aware access control
//!
//! Each guarded view runs a small state machine against the current
//! session:
//!
//! ```text
//! AwaitingHydration ──hydrated──▶ Authorized
//!         │                          │ user/role change
//!         └──────hydrated───▶ Redirecting ◀┘
//! ```
//!
//! While the startup restore is pending the guard renders a neutral
//! placeholder and makes **no** redirect decision — redirecting on
//! `user == None` before the stored session has been read back would
//! bounce a still-authenticated user to the login page on every reload.
//! Once hydrated, an unauthenticated session is sent to the login page and
//! a signed-in user whose role is outside the view's allowed set is sent
//! to their own dashboard. The decision is re-evaluated on every render,
//! so a logout elsewhere flips an `Authorized` view to `Redirecting`.

use api::{BrowserNavigator, Navigator, LOGIN_PATH};
use dioxus::prelude::*;
use store::{AuthRole, Session};

use crate::auth::use_auth;
use crate::routes::dashboard_path;

/// Outcome of evaluating a guarded view against a session snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Storage restore still pending; show a placeholder, decide nothing.
    AwaitingHydration,
    /// The session satisfies the guard; render the protected content.
    Authorized,
    /// The session is missing or the role is not allowed; navigate away.
    Redirect(String),
}

/// Evaluate the guard against a session. An empty `allowed` set admits any
/// authenticated user.
pub fn guard_decision(session: &Session, allowed: &[AuthRole]) -> GuardDecision {
    if !session.hydrated {
        return GuardDecision::AwaitingHydration;
    }
    match &session.user {
        None => GuardDecision::Redirect(LOGIN_PATH.to_string()),
        Some(user) if allowed.is_empty() || allowed.contains(&user.role) => {
            GuardDecision::Authorized
        }
        Some(user) => GuardDecision::Redirect(dashboard_path(Some(user.role)).to_string()),
    }
}

/// Gate children behind any authenticated session.
#[component]
pub fn RequireAuth(children: Element) -> Element {
    rsx! {
        RequireRole { allowed: Vec::new(), {children} }
    }
}

/// Gate children behind a set of allowed roles.
#[component]
pub fn RequireRole(allowed: Vec<AuthRole>, children: Element) -> Element {
    let auth = use_auth();

    match guard_decision(&auth(), &allowed) {
        GuardDecision::AwaitingHydration => rsx! {
            div { class: "max-w-7xl mx-auto px-4 py-10", "Loading..." }
        },
        GuardDecision::Redirect(path) => {
            tracing::debug!("guard redirecting to {path}");
            BrowserNavigator.navigate(&path);
            rsx! {}
        }
        GuardDecision::Authorized => rsx! {
            {children}
        },
    }
}
