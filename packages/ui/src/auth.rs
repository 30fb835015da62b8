//! Authentication context and hooks for the UI.

use api::ApiClient;
use dioxus::prelude::*;
use futures::StreamExt;
use store::{Session, SessionStore};

use crate::platform::{make_client, make_session, PlatformVault};

/// The session store type used by the running platform.
pub type AppSession = SessionStore<PlatformVault>;
/// The API client type used by the running platform.
pub type AppApi = ApiClient<PlatformVault>;

/// Get the current session snapshot.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Get the session store itself, for flows that mutate it directly.
pub fn use_session() -> AppSession {
    use_context::<AppSession>()
}

/// Get the API client bound to the session.
pub fn use_api() -> AppApi {
    use_context::<AppApi>()
}

/// Provider component that owns the session store and client.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut state = use_signal(Session::default);

    let session = use_context_provider(make_session);
    use_context_provider(|| make_client(session.clone()));
    use_context_provider(|| state);

    // Bridge store notifications into the signal. The subscription is
    // registered synchronously on first render so nothing the rehydration
    // publishes can be missed.
    use_hook(|| {
        let (tx, mut rx) = futures::channel::mpsc::unbounded::<Session>();
        session.subscribe(move |snapshot| {
            let _ = tx.unbounded_send(snapshot.clone());
        });
        spawn(async move {
            while let Some(snapshot) = rx.next().await {
                state.set(snapshot);
            }
        });
    });

    // Restore any persisted session on mount; guards hold their redirect
    // decisions until this completes.
    let store = session.clone();
    let _ = use_resource(move || {
        let store = store.clone();
        async move {
            store.hydrate().await;
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_api();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            client.logout().await;
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
