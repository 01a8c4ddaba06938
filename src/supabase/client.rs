//! Supabase REST client: GoTrue auth and PostgREST rows.
//!
//! Thin HTTP wrapper. One client serves every browser client: sessions are
//! held per [`ClientId`] and the auth listeners live here; everything else is
//! forwarded to the hosted project as-is. Pure parsing in
//! `parse_auth_response` and `error_message` for testability.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde_json::Value;

use super::subscription::{AuthListeners, AuthSubscription};
use super::types::{
    AuthCallback, AuthData, AuthEvent, ClientId, Credentials, SelectQuery, ServiceError, ServiceResult, Session, User, UserData,
};

const AUTH_PATH: &str = "/auth/v1";
const REST_PATH: &str = "/rest/v1";
const SINGLE_OBJECT_MIME: &str = "application/vnd.pgrst.object+json";
const SESSION_MISSING: &str = "Auth session missing!";

// =============================================================================
// ERROR
// =============================================================================

/// Failures talking to the hosted backend. Flattened into the envelope message
/// at the facade boundary.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("{0}")]
    Request(String),

    /// The backend answered with a non-success status. `message` is the
    /// backend's own wording.
    #[error("{message}")]
    Response { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl<T> From<BackendError> for ServiceResult<T> {
    fn from(err: BackendError) -> Self {
        Self::failure(err.to_string())
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseClient {
    http: reqwest::Client,
    url: String,
    key: String,
    sessions: RwLock<HashMap<ClientId, Session>>,
    listeners: Arc<AuthListeners>,
}

impl SupabaseClient {
    /// Build a client bound to `url` and `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(url: &str, key: impl Into<String>) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_owned(),
            key: key.into(),
            sessions: RwLock::new(HashMap::new()),
            listeners: Arc::new(AuthListeners::new()),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Snapshot of `client`'s session, if signed in.
    #[must_use]
    pub fn session(&self, client: &ClientId) -> Option<Session> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(client)
            .cloned()
    }

    /// Number of clients currently signed in.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn set_session(&self, client: &ClientId, session: Session) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(client.clone(), session);
    }

    fn take_session(&self, client: &ClientId) -> Option<Session> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(client)
    }

    fn access_token(&self, client: &ClientId) -> Option<String> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(client)
            .map(|s| s.access_token.clone())
    }

    /// Bearer for row requests: the client's token when signed in, else the key.
    fn bearer(&self, client: Option<&ClientId>) -> String {
        client
            .and_then(|c| self.access_token(c))
            .unwrap_or_else(|| self.key.clone())
    }

    fn request(&self, method: reqwest::Method, url: reqwest::Url, bearer: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.key)
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, BackendError> {
        reqwest::Url::parse(&format!("{}{path}", self.url)).map_err(|e| BackendError::Request(e.to_string()))
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(BackendError::Response { status, message: error_message(status, &text) });
        }
        Ok(text)
    }

    // -------------------------------------------------------------------------
    // AUTH
    // -------------------------------------------------------------------------

    async fn password_request(
        &self,
        client: &ClientId,
        path: &str,
        credentials: &Credentials,
    ) -> Result<AuthData, BackendError> {
        let url = self.endpoint(&format!("{AUTH_PATH}{path}"))?;
        let builder = self
            .request(reqwest::Method::POST, url, &self.key)
            .json(credentials);
        let text = self.send(builder).await?;
        let data = parse_auth_response(&text)?;

        if let Some(session) = &data.session {
            self.set_session(client, session.clone());
            self.listeners.notify(client, AuthEvent::SignedIn, Some(session));
        }
        Ok(data)
    }

    /// `POST /auth/v1/signup`. A session is only present when the project
    /// auto-confirms new users.
    pub async fn sign_up(&self, client: &ClientId, credentials: &Credentials) -> ServiceResult<AuthData> {
        match self.password_request(client, "/signup", credentials).await {
            Ok(data) => ServiceResult::ok(data),
            Err(e) => e.into(),
        }
    }

    /// `POST /auth/v1/token?grant_type=password`.
    pub async fn sign_in_with_password(&self, client: &ClientId, credentials: &Credentials) -> ServiceResult<AuthData> {
        match self
            .password_request(client, "/token?grant_type=password", credentials)
            .await
        {
            Ok(data) => ServiceResult::ok(data),
            Err(e) => e.into(),
        }
    }

    /// `POST /auth/v1/logout`. The client's session is dropped and
    /// `SIGNED_OUT` emitted even when the remote call fails or there was no
    /// session to revoke.
    pub async fn sign_out(&self, client: &ClientId) -> ServiceResult<()> {
        let Some(session) = self.take_session(client) else {
            self.listeners.notify(client, AuthEvent::SignedOut, None);
            return ServiceResult::empty();
        };

        let remote = match self.endpoint(&format!("{AUTH_PATH}/logout")) {
            Ok(url) => self
                .send(self.request(reqwest::Method::POST, url, &session.access_token))
                .await
                .map(|_| ()),
            Err(e) => Err(e),
        };

        self.listeners.notify(client, AuthEvent::SignedOut, None);

        match remote {
            Ok(()) => ServiceResult::empty(),
            Err(e) => {
                tracing::warn!(error = %e, "remote sign-out failed; local session cleared");
                e.into()
            }
        }
    }

    /// `GET /auth/v1/user` with `client`'s session token.
    pub async fn get_user(&self, client: &ClientId) -> ServiceResult<UserData> {
        let Some(token) = self.access_token(client) else {
            return user_failure(SESSION_MISSING);
        };

        let result = async {
            let url = self.endpoint(&format!("{AUTH_PATH}/user"))?;
            let text = self
                .send(self.request(reqwest::Method::GET, url, &token))
                .await?;
            serde_json::from_str::<User>(&text).map_err(|e| BackendError::Parse(e.to_string()))
        }
        .await;

        match result {
            Ok(user) => ServiceResult::ok(UserData { user: Some(user) }),
            Err(e) => user_failure(&e.to_string()),
        }
    }

    /// Register `callback` for `client`'s events, or every client's when
    /// `None`. It immediately receives `INITIAL_SESSION` with the client's
    /// session (always `None` for an unscoped observer).
    pub fn on_auth_state_change(&self, client: Option<&ClientId>, callback: AuthCallback) -> AuthSubscription {
        let subscription = self
            .listeners
            .subscribe(client.cloned(), Arc::clone(&callback));
        let session = client.and_then(|c| self.session(c));
        callback(AuthEvent::InitialSession, session.as_ref());
        subscription
    }

    // -------------------------------------------------------------------------
    // ROWS
    // -------------------------------------------------------------------------

    /// `GET /rest/v1/{table}` with equality filters, as `client` when given.
    pub async fn select(&self, client: Option<&ClientId>, query: &SelectQuery) -> ServiceResult<Value> {
        let result = async {
            let url = select_url(&self.url, query)?;
            let mut builder = self.request(reqwest::Method::GET, url, &self.bearer(client));
            if query.single {
                builder = builder.header(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT_MIME));
            }
            let text = self.send(builder).await?;
            parse_rows(&text)
        }
        .await;

        match result {
            Ok(rows) => ServiceResult { data: rows, error: None },
            Err(e) => e.into(),
        }
    }

    /// `POST /rest/v1/{table}` with `Prefer: return=minimal`; `data` stays null.
    pub async fn insert(&self, client: Option<&ClientId>, table: &str, record: &Value) -> ServiceResult<Value> {
        let result = async {
            let url = self.endpoint(&format!("{REST_PATH}/{table}"))?;
            let builder = self
                .request(reqwest::Method::POST, url, &self.bearer(client))
                .header("Prefer", "return=minimal")
                .json(record);
            self.send(builder).await
        }
        .await;

        match result {
            Ok(_) => ServiceResult::empty(),
            Err(e) => e.into(),
        }
    }
}

/// get-user failures still carry `{user: null}` in `data`.
fn user_failure(message: &str) -> ServiceResult<UserData> {
    ServiceResult { data: Some(UserData { user: None }), error: Some(ServiceError { message: message.to_owned() }) }
}

// =============================================================================
// PARSING
// =============================================================================

fn select_url(base: &str, query: &SelectQuery) -> Result<reqwest::Url, BackendError> {
    let mut url = reqwest::Url::parse(&format!("{base}{REST_PATH}/{}", query.table))
        .map_err(|e| BackendError::Request(e.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("select", &query.columns);
        for (column, value) in &query.filters {
            pairs.append_pair(column, &format!("eq.{value}"));
        }
        if let Some(limit) = query.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
    }
    Ok(url)
}

fn parse_rows(text: &str) -> Result<Option<Value>, BackendError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| BackendError::Parse(e.to_string()))
}

/// Decode a sign-up/sign-in body.
///
/// The token endpoint returns a session with the user nested. Sign-up without
/// auto-confirm returns the bare user, or `{user, session: null}`.
fn parse_auth_response(text: &str) -> Result<AuthData, BackendError> {
    let value: Value = serde_json::from_str(text).map_err(|e| BackendError::Parse(e.to_string()))?;

    if value.get("access_token").is_some() {
        let session: Session = serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))?;
        return Ok(AuthData { user: session.user.clone(), session: Some(session) });
    }

    if value.get("user").is_some() || value.get("session").is_some() {
        return serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()));
    }

    if value.get("id").is_some() {
        let user: User = serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))?;
        return Ok(AuthData { user: Some(user), session: None });
    }

    Ok(AuthData::default())
}

/// Extract the backend's own error wording from a failure body.
fn error_message(status: u16, body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return format!("HTTP {status}");
    };
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map_or_else(|| format!("HTTP {status}"), str::to_owned)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
