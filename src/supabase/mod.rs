//! Supabase: client handle selection and the backend seam.
//!
//! DESIGN
//! ======
//! The handle is chosen once at startup from the execution context and key
//! availability, then injected into the facades:
//!
//! - build context          -> `Mock` (every call resolves `{null, null}`)
//! - interactive, no key    -> `Unavailable` (facades return the degraded shape)
//! - interactive, key set   -> `Real` (REST client against the hosted project)
//!
//! The privileged handle exists only in the build context with a service key.

pub mod client;
pub mod subscription;
pub mod types;

use std::sync::Arc;

use serde_json::Value;

use crate::config::{AppConfig, ExecutionContext};
pub use client::SupabaseClient;
pub use subscription::AuthSubscription;
use types::{AuthCallback, AuthData, ClientId, Credentials, SelectQuery, ServiceResult, UserData};

/// Service name used in the degraded failure message.
pub const SERVICE_NAME: &str = "Supabase";

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Capabilities the facades forward to. Implemented by [`SupabaseClient`];
/// tests substitute in-process fakes.
///
/// Auth calls act on one browser client's session. Row calls run as that
/// client when given, otherwise with the project key alone.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn sign_up(&self, client: &ClientId, credentials: &Credentials) -> ServiceResult<AuthData>;

    async fn sign_in_with_password(&self, client: &ClientId, credentials: &Credentials) -> ServiceResult<AuthData>;

    async fn sign_out(&self, client: &ClientId) -> ServiceResult<()>;

    async fn get_user(&self, client: &ClientId) -> ServiceResult<UserData>;

    fn on_auth_state_change(&self, client: Option<&ClientId>, callback: AuthCallback) -> AuthSubscription;

    async fn select(&self, client: Option<&ClientId>, query: &SelectQuery) -> ServiceResult<Value>;

    async fn insert(&self, client: Option<&ClientId>, table: &str, record: &Value) -> ServiceResult<Value>;
}

#[async_trait::async_trait]
impl Backend for SupabaseClient {
    async fn sign_up(&self, client: &ClientId, credentials: &Credentials) -> ServiceResult<AuthData> {
        SupabaseClient::sign_up(self, client, credentials).await
    }

    async fn sign_in_with_password(&self, client: &ClientId, credentials: &Credentials) -> ServiceResult<AuthData> {
        SupabaseClient::sign_in_with_password(self, client, credentials).await
    }

    async fn sign_out(&self, client: &ClientId) -> ServiceResult<()> {
        SupabaseClient::sign_out(self, client).await
    }

    async fn get_user(&self, client: &ClientId) -> ServiceResult<UserData> {
        SupabaseClient::get_user(self, client).await
    }

    fn on_auth_state_change(&self, client: Option<&ClientId>, callback: AuthCallback) -> AuthSubscription {
        SupabaseClient::on_auth_state_change(self, client, callback)
    }

    async fn select(&self, client: Option<&ClientId>, query: &SelectQuery) -> ServiceResult<Value> {
        SupabaseClient::select(self, client, query).await
    }

    async fn insert(&self, client: Option<&ClientId>, table: &str, record: &Value) -> ServiceResult<Value> {
        SupabaseClient::insert(self, client, table, record).await
    }
}

// =============================================================================
// CLIENT HANDLE
// =============================================================================

/// The public client, or a stand-in for it.
pub enum ClientHandle {
    /// No public key in an interactive context.
    Unavailable,
    /// Build context. Resolves everything locally with `{null, null}`.
    Mock,
    Real(Arc<dyn Backend>),
}

impl ClientHandle {
    /// Select the public handle for `config`.
    #[must_use]
    pub fn init(config: &AppConfig) -> Self {
        if config.context == ExecutionContext::NonInteractive {
            return Self::Mock;
        }

        let Some(key) = config.anon_key.as_deref() else {
            tracing::warn!("SUPABASE_ANON_KEY is not set: auth and saved rentals disabled");
            return Self::Unavailable;
        };

        match SupabaseClient::new(&config.supabase_url, key) {
            Ok(client) => Self::Real(Arc::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "Supabase client build failed: auth and saved rentals disabled");
                Self::Unavailable
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Mock => "mock",
            Self::Real(_) => "real",
        }
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

/// Select the privileged handle: build context with a service key only.
#[must_use]
pub fn init_admin(config: &AppConfig) -> Option<Arc<dyn Backend>> {
    if config.context != ExecutionContext::NonInteractive {
        return None;
    }
    let key = config.service_key.as_deref()?;
    match SupabaseClient::new(&config.supabase_url, key) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "privileged Supabase client build failed");
            None
        }
    }
}

/// Both handles, built together at startup.
#[derive(Clone)]
pub struct Clients {
    pub public: Arc<ClientHandle>,
    pub admin: Option<Arc<dyn Backend>>,
}

impl Clients {
    #[must_use]
    pub fn init(config: &AppConfig) -> Self {
        Self { public: Arc::new(ClientHandle::init(config)), admin: init_admin(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
