//! Supabase types: result envelope, auth payloads, query descriptions.
//!
//! Records (saved rentals, profiles) stay opaque `serde_json::Value`s: the
//! hosted database owns their schema.

use std::fmt::Write;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// RESULT ENVELOPE
// =============================================================================

/// Error half of the envelope. Carries only a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    pub message: String,
}

/// Uniform `{data, error}` result every facade call resolves with.
///
/// Facades never return `Err`: an unavailable backend, a business error, and a
/// transport failure all land in `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResult<T> {
    pub data: Option<T>,
    pub error: Option<ServiceError>,
}

impl<T> ServiceResult<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self { data: Some(data), error: None }
    }

    /// `{data: null, error: null}`.
    #[must_use]
    pub fn empty() -> Self {
        Self { data: None, error: None }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self { data: None, error: Some(ServiceError { message: message.into() }) }
    }

    /// Degraded failure shape for a service whose client was never built.
    #[must_use]
    pub fn not_initialized(service: &str) -> Self {
        Self::failure(format!("{service} not initialized"))
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

/// Email/password pair. Never stored.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated user as returned by the auth service. Unknown fields are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Payload of sign-up and sign-in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthData {
    pub user: Option<User>,
    pub session: Option<Session>,
}

/// Payload of get-user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserData {
    pub user: Option<User>,
}

// =============================================================================
// CLIENT SCOPE
// =============================================================================

/// Opaque id of one browser client. Sessions held by the real client are
/// keyed by it, so one caller never sees another's session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Random 32-byte hex id.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; 32] = rand::rng().random();
        let mut id = String::with_capacity(bytes.len() * 2);
        for b in bytes {
            let _ = write!(id, "{b:02x}");
        }
        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// AUTH EVENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    /// Delivered once, right after subscribing.
    InitialSession,
    SignedIn,
    SignedOut,
}

impl AuthEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
        }
    }
}

/// Auth-state listener. Receives the event and the session current after it.
pub type AuthCallback = Arc<dyn Fn(AuthEvent, Option<&Session>) + Send + Sync>;

/// Wrap a closure as an [`AuthCallback`].
pub fn auth_callback<F>(f: F) -> AuthCallback
where
    F: Fn(AuthEvent, Option<&Session>) + Send + Sync + 'static,
{
    Arc::new(f)
}

// =============================================================================
// ROW QUERIES
// =============================================================================

/// A `select` against one table with equality filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: String,
    pub columns: String,
    pub filters: Vec<(String, String)>,
    pub limit: Option<u32>,
    /// Expect exactly one row and return it as an object instead of an array.
    pub single: bool,
}

impl SelectQuery {
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self { table: table.to_owned(), columns: "*".to_owned(), filters: Vec::new(), limit: None, single: false }
    }

    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        columns.clone_into(&mut self.columns);
        self
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    #[must_use]
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
