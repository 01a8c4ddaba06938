//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It carries the facades built over the one client handle selected at
//! startup, the optional AI proxy, and the parsed config. Nothing in here is
//! rebuilt after startup.

use std::sync::Arc;

use crate::ai::AiAsk;
use crate::auth::Auth;
use crate::config::AppConfig;
use crate::database::Database;
use crate::supabase::{ClientHandle, Clients};

/// Clone is required by Axum; every field is Arc-backed.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `unavailable`, `mock`, or `real`, for the debug page.
    pub client_kind: &'static str,
    pub auth: Auth,
    pub database: Database,
    /// Data access through the privileged handle. Build context only.
    pub admin: Option<Database>,
    /// `None` if `AI_API_URL` is not configured.
    pub ai: Option<Arc<dyn AiAsk>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, clients: Clients, ai: Option<Arc<dyn AiAsk>>) -> Self {
        let client_kind = clients.public.kind();
        let admin = clients
            .admin
            .map(|backend| Database::new(Arc::new(ClientHandle::Real(backend))));
        Self {
            config: Arc::new(config),
            client_kind,
            auth: Auth::new(Arc::clone(&clients.public)),
            database: Database::new(clients.public),
            admin,
            ai,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionContext;
    use crate::supabase::test_helpers::{FakeBackend, real_handle};
    use test_helpers::test_config;

    #[test]
    fn new_reports_client_kind() {
        let state = test_helpers::test_app_state(ClientHandle::Mock, None);
        assert_eq!(state.client_kind, "mock");
        assert!(state.admin.is_none());
        assert!(state.ai.is_none());
    }

    #[test]
    fn new_wraps_admin_backend() {
        let fake = FakeBackend::new();
        let clients = Clients { public: real_handle(&fake), admin: Some(fake) };
        let state = AppState::new(test_config(ExecutionContext::NonInteractive), clients, None);
        assert_eq!(state.client_kind, "real");
        assert!(state.admin.is_some());
    }
}
