/// Where the invalidation protocol and logout send the user.
pub const LOGIN_PATH: &str = "/login";

/// Seam for forced navigations, so the pipeline's clear-and-redirect side
/// effect is observable in tests.
pub trait Navigator: Send + Sync {
    /// Fire-and-forget navigation; a superseded navigation is simply
    /// overtaken by the next one.
    fn navigate(&self, path: &str);
}

/// Navigates via `window.location` in the browser. Outside a browser there
/// is nothing to drive, so the request is only logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                if window.location().set_href(path).is_err() {
                    tracing::error!("failed to navigate to {path}");
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!("navigation to {path} requested outside a browser");
        }
    }
}
