//! Role-gated dashboard views.
//!
//! Every dashboard defers to the guard components: nothing below renders
//! (or redirects) until the persisted session has been restored.

use dioxus::prelude::*;
use store::AuthRole;
use ui::{use_auth, Navbar, RequireAuth, RequireRole};

/// Generic account dashboard, open to any signed-in role.
#[component]
pub fn Dashboard() -> Element {
    rsx! {
        Navbar {}
        RequireAuth {
            AccountSummary {}
        }
    }
}

/// Seller area.
#[component]
pub fn SellerDashboard() -> Element {
    rsx! {
        Navbar {}
        RequireRole {
            allowed: vec![AuthRole::Seller],
            div {
                class: "page",
                h1 { "Seller dashboard" }
                p { "Listings, orders and payouts live here." }
                AccountSummary {}
            }
        }
    }
}

/// Admin area.
#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        Navbar {}
        RequireRole {
            allowed: vec![AuthRole::Admin],
            div {
                class: "page",
                h1 { "Admin dashboard" }
                p { "Approvals, moderation and analytics live here." }
                AccountSummary {}
            }
        }
    }
}

/// Customer-service area.
#[component]
pub fn SupportDashboard() -> Element {
    rsx! {
        Navbar {}
        RequireRole {
            allowed: vec![AuthRole::CustomerService],
            div {
                class: "page",
                h1 { "Support dashboard" }
                p { "Open tickets and disputes live here." }
                AccountSummary {}
            }
        }
    }
}

/// Identity card shown on every dashboard.
#[component]
fn AccountSummary() -> Element {
    let auth = use_auth();
    let session = auth();

    rsx! {
        if let Some(user) = session.user.as_ref() {
            div {
                class: "account-summary",
                h2 { "Signed in as" }
                p { "{user.name}" }
                p { class: "account-email", "{user.email}" }
                p { class: "account-role", "{user.role}" }
            }
        }
    }
}
