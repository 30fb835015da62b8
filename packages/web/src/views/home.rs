//! Public landing page.

use dioxus::prelude::*;
use ui::Navbar;

#[component]
pub fn Home() -> Element {
    rsx! {
        Navbar {}
        div {
            class: "page hero",
            h1 { "Goods with a story" }
            p { "Browse sustainable products from independent sellers." }
            Link { class: "hero-cta", to: crate::Route::Products {}, "Browse products" }
        }
    }
}
