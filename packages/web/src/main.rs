use dioxus::prelude::*;

use ui::AuthProvider;
use views::{
    AdminDashboard, Dashboard, Home, Login, Products, Register, SellerDashboard,
    SupportDashboard,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/products")]
    Products {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/dashboard/seller")]
    SellerDashboard {},
    #[route("/dashboard/admin")]
    AdminDashboard {},
    #[route("/dashboard/customer-service")]
    SupportDashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
