//! Auth-state listener registry and the handle returned to subscribers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::types::{AuthCallback, AuthEvent, ClientId, Session};

/// One registration. `scope: None` observes every client.
struct Listener {
    scope: Option<ClientId>,
    callback: AuthCallback,
}

/// Callbacks registered through `on_auth_state_change`, keyed by id.
#[derive(Default)]
pub struct AuthListeners {
    next_id: AtomicU64,
    callbacks: Mutex<HashMap<u64, Listener>>,
}

impl AuthListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `scope` (or of every client when
    /// `None`) and return the handle that removes it.
    pub fn subscribe(self: &Arc<Self>, scope: Option<ClientId>, callback: AuthCallback) -> AuthSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Listener { scope, callback });
        AuthSubscription { registration: Some((Arc::downgrade(self), id)) }
    }

    /// Deliver `event` for `client` to every matching callback.
    ///
    /// Callbacks are snapshotted first so one may unsubscribe from inside the call.
    pub fn notify(&self, client: &ClientId, event: AuthEvent, session: Option<&Session>) {
        let snapshot: Vec<AuthCallback> = self
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|listener| listener.scope.as_ref().is_none_or(|scope| scope == client))
            .map(|listener| Arc::clone(&listener.callback))
            .collect();
        for callback in snapshot {
            callback(event, session);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: u64) {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

/// Handle returned by `on_auth_state_change`.
///
/// `unsubscribe` may be called any number of times; only the first call has
/// an effect. The no-op variant is handed out when no client exists.
#[derive(Debug, Default)]
pub struct AuthSubscription {
    registration: Option<(Weak<AuthListeners>, u64)>,
}

impl AuthSubscription {
    #[must_use]
    pub fn noop() -> Self {
        Self { registration: None }
    }

    pub fn unsubscribe(&self) {
        if let Some((listeners, id)) = &self.registration {
            if let Some(listeners) = listeners.upgrade() {
                listeners.remove(*id);
            }
        }
    }

    /// `true` for handles backed by a real registration.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registration.is_some()
    }
}

impl std::fmt::Debug for AuthListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthListeners").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
#[path = "subscription_test.rs"]
mod tests;
