//! Public product listing, fetched through the shared request pipeline.

use api::Product;
use dioxus::prelude::*;
use ui::{use_api, Navbar};

#[component]
pub fn Products() -> Element {
    let client = use_api();
    let mut products = use_signal(Vec::<Product>::new);
    let mut error = use_signal(|| Option::<String>::None);

    // Load the catalogue on mount.
    let _loader = use_resource(move || {
        let client = client.clone();
        async move {
            match client.get::<Vec<Product>>("/products").await {
                Ok(list) => products.set(list),
                Err(err) => error.set(Some(err.to_string())),
            }
        }
    });

    rsx! {
        Navbar {}
        div {
            class: "page",
            h1 { "Products" }

            if let Some(err) = error() {
                div { class: "page-error", "{err}" }
            }

            ul {
                class: "product-list",
                for product in products() {
                    li {
                        key: "{product.id}",
                        class: "product-row",
                        span { class: "product-name", "{product.name}" }
                        if let Some(description) = product.description.as_ref() {
                            span { class: "product-description", "{description}" }
                        }
                        span { class: "product-price", "${product.price}" }
                    }
                }
            }
        }
    }
}
