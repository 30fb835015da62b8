//! # Session store — single source of truth for identity and credential
//!
//! [`SessionStore`] owns the process-wide [`Session`] record and is the only
//! place that mutates it. It is generic over a [`SessionVault`], so the same
//! logic runs against the browser's `localStorage` on the web and an
//! in-memory slot in tests and native builds.
//!
//! ## Operations
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`snapshot`](SessionStore::snapshot) / [`user`](SessionStore::user) / [`token`](SessionStore::token) | Cheap synchronous reads. `token()` is consulted by the request pipeline on every outbound call. |
//! | [`hydrate`](SessionStore::hydrate) | One-shot restore from the vault at startup. Later calls are no-ops. |
//! | [`apply_login`](SessionStore::apply_login) | Wholesale update after a successful login/register response: sets user and token together, marks the session hydrated, writes through to the vault. |
//! | [`clear`](SessionStore::clear) | Logout and forced invalidation: clears the pair, resets `hydrated`, erases the vault slot. Never fails. |
//! | [`set_user`](SessionStore::set_user) / [`set_token`](SessionStore::set_token) | Narrow setters with vault write-through, for flows that refresh a single field. Callers are responsible for keeping the pair consistent. |
//! | [`set_loading`](SessionStore::set_loading) | Transient flag around in-flight login/register calls. |
//!
//! ## Update-notify contract
//!
//! Observers register with [`subscribe`](SessionStore::subscribe) and are
//! invoked synchronously, in registration order, with the post-mutation
//! snapshot after every state change. Callbacks must not subscribe or
//! unsubscribe from within a notification.
//!
//! ## Rehydration ordering
//!
//! `hydrate` flips `hydrated` to true exactly once, whether or not a stored
//! session was found — absence is a valid terminal state. Route guards defer
//! every redirect decision until that flag is set; acting on `user == None`
//! before then is the reload-flicker bug this contract exists to prevent.
//! If a login completes while the slot read is still in flight, the login
//! outcome wins and the stale slot contents are discarded.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::session::{AuthUser, PersistedSession, Session};
use crate::vault::SessionVault;

type Subscriber = Box<dyn Fn(&Session) + Send + Sync>;

/// Handle returned by [`SessionStore::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(usize);

/// Observable, persisted session state. Clones share the same state.
pub struct SessionStore<V> {
    state: Arc<Mutex<Session>>,
    subscribers: Arc<Mutex<Vec<(SubscriptionId, Subscriber)>>>,
    next_subscriber: Arc<AtomicUsize>,
    hydration_started: Arc<AtomicBool>,
    vault: V,
}

impl<V: Clone> Clone for SessionStore<V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
            next_subscriber: Arc::clone(&self.next_subscriber),
            hydration_started: Arc::clone(&self.hydration_started),
            vault: self.vault.clone(),
        }
    }
}

impl<V: SessionVault> SessionStore<V> {
    /// Create an empty, unhydrated store over the given vault.
    pub fn new(vault: V) -> Self {
        Self {
            state: Arc::default(),
            subscribers: Arc::default(),
            next_subscriber: Arc::default(),
            hydration_started: Arc::default(),
            vault,
        }
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> Session {
        self.state.lock().unwrap().clone()
    }

    /// Current identity, if signed in.
    pub fn user(&self) -> Option<AuthUser> {
        self.state.lock().unwrap().user.clone()
    }

    /// Current bearer token, if signed in. Synchronous: the request
    /// pipeline reads this on every outbound call.
    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    /// Whether the startup restore has completed.
    pub fn hydrated(&self) -> bool {
        self.state.lock().unwrap().hydrated
    }

    /// Whether a login/registration call is in flight.
    pub fn loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// Register an observer. It is called with the post-mutation snapshot
    /// after every state change until unsubscribed.
    pub fn subscribe(
        &self,
        f: impl Fn(&Session) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscriber.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().unwrap().push((id, Box::new(f)));
        id
    }

    /// Remove a previously registered observer.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().unwrap().retain(|(sid, _)| *sid != id);
    }

    /// Restore the session from the vault. Runs at most once per store;
    /// later invocations return immediately.
    pub async fn hydrate(&self) {
        if self.hydration_started.swap(true, Ordering::SeqCst) {
            tracing::debug!("session already rehydrated, skipping");
            return;
        }

        let restored = match self.vault.load().await {
            Some(raw) => match serde_json::from_str::<PersistedSession>(&raw) {
                Ok(persisted) => Some(persisted),
                Err(err) => {
                    tracing::warn!("discarding unreadable session slot: {err}");
                    None
                }
            },
            None => None,
        };

        let snapshot = {
            let mut state = self.state.lock().unwrap();
            if state.hydrated {
                // A login finished while the slot read was in flight; the
                // fresh session takes precedence over the stored one.
                tracing::debug!("login completed during rehydration, keeping it");
                None
            } else {
                match restored {
                    // Only a complete pair is worth restoring.
                    Some(PersistedSession {
                        user: Some(user),
                        token: Some(token),
                        ..
                    }) => {
                        tracing::debug!("restored session for {}", user.email);
                        state.user = Some(user);
                        state.token = Some(token);
                    }
                    Some(_) => {
                        tracing::warn!("stored session was incomplete, ignoring it");
                    }
                    None => {}
                }
                state.hydrated = true;
                Some(state.clone())
            }
        };

        if let Some(snapshot) = snapshot {
            self.notify(&snapshot);
        }
    }

    /// Apply a successful login/register outcome: set the identity and
    /// credential together, mark the session hydrated, persist.
    pub async fn apply_login(&self, user: AuthUser, token: String) -> Session {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.user = Some(user);
            state.token = Some(token);
            state.hydrated = true;
            state.loading = false;
            state.clone()
        };
        self.persist(&snapshot).await;
        self.notify(&snapshot);
        snapshot
    }

    /// Clear the session and erase the durable slot. Used by logout and by
    /// the pipeline's invalidation protocol; never fails.
    pub async fn clear(&self) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.user = None;
            state.token = None;
            state.hydrated = false;
            state.clone()
        };
        self.vault.clear().await;
        self.notify(&snapshot);
    }

    /// Replace just the identity. The caller owns the pairing invariant.
    pub async fn set_user(&self, user: AuthUser) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.user = Some(user);
            state.clone()
        };
        self.persist(&snapshot).await;
        self.notify(&snapshot);
    }

    /// Replace just the credential. The caller owns the pairing invariant.
    pub async fn set_token(&self, token: String) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.token = Some(token);
            state.clone()
        };
        self.persist(&snapshot).await;
        self.notify(&snapshot);
    }

    /// Flip the transient loading flag.
    pub fn set_loading(&self, loading: bool) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            state.loading = loading;
            state.clone()
        };
        self.notify(&snapshot);
    }

    async fn persist(&self, snapshot: &Session) {
        match serde_json::to_string(&PersistedSession::of(snapshot)) {
            Ok(raw) => self.vault.store(&raw).await,
            Err(err) => tracing::error!("failed to serialize session: {err}"),
        }
    }

    fn notify(&self, snapshot: &Session) {
        for (_, subscriber) in self.subscribers.lock().unwrap().iter() {
            subscriber(snapshot);
        }
    }
}
