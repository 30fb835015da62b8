use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::routes::dashboard_path;

/// Top navigation bar, auth-aware: shows the account links only once the
/// session is hydrated, so a reload never flashes "Log in" at a
/// still-authenticated user.
#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let session = auth();

    rsx! {
        nav {
            class: "navbar",
            Link { class: "navbar-brand", to: "/", "EARTHLYN" }
            Link { class: "navbar-link", to: "/products", "Products" }

            div { class: "navbar-account",
                if let Some(user) = session.user.as_ref() {
                    Link {
                        class: "navbar-link",
                        to: dashboard_path(Some(user.role)),
                        "Dashboard"
                    }
                    span { class: "navbar-user", "{user.name}" }
                    LogoutButton { class: "navbar-logout" }
                } else if session.hydrated {
                    Link { class: "navbar-link", to: "/login", "Log in" }
                    Link { class: "navbar-link", to: "/register", "Sign up" }
                }
            }
        }
    }
}
