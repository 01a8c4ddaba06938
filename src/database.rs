//! Data access facade: saved rentals and user profiles.
//!
//! Records are forwarded as opaque JSON; the hosted database enforces their
//! shape. Same guard policy as the auth facade. Reads and writes run as the
//! signed-in browser client when one is given, otherwise with the project key.

use std::sync::Arc;

use serde_json::Value;

use crate::supabase::types::{ClientId, SelectQuery, ServiceResult};
use crate::supabase::{ClientHandle, SERVICE_NAME};

pub const SAVED_RENTALS_TABLE: &str = "saved_rentals";
pub const PROFILES_TABLE: &str = "profiles";

#[derive(Clone)]
pub struct Database {
    handle: Arc<ClientHandle>,
}

impl Database {
    #[must_use]
    pub fn new(handle: Arc<ClientHandle>) -> Self {
        Self { handle }
    }

    async fn select(&self, client: Option<&ClientId>, query: SelectQuery) -> ServiceResult<Value> {
        match &*self.handle {
            ClientHandle::Unavailable => ServiceResult::not_initialized(SERVICE_NAME),
            ClientHandle::Mock => ServiceResult::empty(),
            ClientHandle::Real(backend) => backend.select(client, &query).await,
        }
    }

    /// All saved rentals whose `user_id` equals `user_id`.
    pub async fn get_saved_rentals(&self, client: Option<&ClientId>, user_id: &str) -> ServiceResult<Value> {
        self.select(client, SelectQuery::table(SAVED_RENTALS_TABLE).eq("user_id", user_id))
            .await
    }

    pub async fn save_rental(&self, client: Option<&ClientId>, rental: &Value) -> ServiceResult<Value> {
        match &*self.handle {
            ClientHandle::Unavailable => ServiceResult::not_initialized(SERVICE_NAME),
            ClientHandle::Mock => ServiceResult::empty(),
            ClientHandle::Real(backend) => backend.insert(client, SAVED_RENTALS_TABLE, rental).await,
        }
    }

    /// The one profile row whose `id` equals `user_id`.
    pub async fn get_user_profile(&self, client: Option<&ClientId>, user_id: &str) -> ServiceResult<Value> {
        self.select(client, SelectQuery::table(PROFILES_TABLE).eq("id", user_id).single())
            .await
    }

    /// Cheapest round trip that proves the project answers with this key.
    pub async fn check_connection(&self) -> ServiceResult<Value> {
        self.select(None, SelectQuery::table(PROFILES_TABLE).select("count").limit(1))
            .await
    }
}

#[cfg(test)]
#[path = "database_test.rs"]
mod tests;
