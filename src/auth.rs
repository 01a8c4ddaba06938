//! Auth facade: sign-up, sign-in, sign-out, current user, state changes.
//!
//! Every call resolves with a [`ServiceResult`]. When no client was built the
//! result is the degraded `"Supabase not initialized"` shape; the build-time
//! mock resolves `{null, null}` without touching the network. Calls act on
//! one browser client's session, named by its [`ClientId`].

use std::sync::Arc;

use crate::supabase::types::{
    AuthData, AuthEvent, ClientId, Credentials, ServiceResult, Session, UserData, auth_callback,
};
use crate::supabase::{AuthSubscription, ClientHandle, SERVICE_NAME};

#[derive(Clone)]
pub struct Auth {
    handle: Arc<ClientHandle>,
}

impl Auth {
    #[must_use]
    pub fn new(handle: Arc<ClientHandle>) -> Self {
        Self { handle }
    }

    /// `false` only when the public client could not be built.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(*self.handle, ClientHandle::Unavailable)
    }

    pub async fn sign_up(&self, client: &ClientId, email: &str, password: &str) -> ServiceResult<AuthData> {
        match &*self.handle {
            ClientHandle::Unavailable => ServiceResult::not_initialized(SERVICE_NAME),
            ClientHandle::Mock => ServiceResult::empty(),
            ClientHandle::Real(backend) => {
                backend
                    .sign_up(client, &Credentials::new(email, password))
                    .await
            }
        }
    }

    pub async fn sign_in(&self, client: &ClientId, email: &str, password: &str) -> ServiceResult<AuthData> {
        match &*self.handle {
            ClientHandle::Unavailable => ServiceResult::not_initialized(SERVICE_NAME),
            ClientHandle::Mock => ServiceResult::empty(),
            ClientHandle::Real(backend) => {
                backend
                    .sign_in_with_password(client, &Credentials::new(email, password))
                    .await
            }
        }
    }

    pub async fn sign_out(&self, client: &ClientId) -> ServiceResult<()> {
        match &*self.handle {
            ClientHandle::Unavailable => ServiceResult::not_initialized(SERVICE_NAME),
            ClientHandle::Mock => ServiceResult::empty(),
            ClientHandle::Real(backend) => backend.sign_out(client).await,
        }
    }

    pub async fn get_user(&self, client: &ClientId) -> ServiceResult<UserData> {
        match &*self.handle {
            ClientHandle::Unavailable => ServiceResult::not_initialized(SERVICE_NAME),
            ClientHandle::Mock => ServiceResult::empty(),
            ClientHandle::Real(backend) => backend.get_user(client).await,
        }
    }

    /// Subscribe to auth-state changes of `client`, or of every client when
    /// `None`. Without a real client the returned subscription is inert and
    /// `callback` is never called.
    pub fn on_auth_state_change<F>(&self, client: Option<&ClientId>, callback: F) -> AuthSubscription
    where
        F: Fn(AuthEvent, Option<&Session>) + Send + Sync + 'static,
    {
        match &*self.handle {
            ClientHandle::Unavailable | ClientHandle::Mock => AuthSubscription::noop(),
            ClientHandle::Real(backend) => backend.on_auth_state_change(client, auth_callback(callback)),
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
