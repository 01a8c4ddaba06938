//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Server-rendered pages at the root, a thin JSON surface over the facades
//! under `/api`, and a health check. Every route shares one `AppState`; a
//! cookie (see [`session`]) scopes auth state to the calling browser client.

pub mod api;
pub mod session;
pub mod site;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(site::home))
        .route("/login", get(site::login_page).post(site::login_submit))
        .route("/logout", post(site::logout))
        .route("/ai", get(site::ai_page).post(site::ai_submit))
        .route("/debug", get(site::debug_page))
        .route("/test-supabase", get(site::test_supabase_page))
        .route("/api/auth/signup", post(api::sign_up))
        .route("/api/auth/signin", post(api::sign_in))
        .route("/api/auth/signout", post(api::sign_out))
        .route("/api/auth/user", get(api::current_user))
        .route("/api/rentals", post(api::save_rental))
        .route("/api/rentals/{user_id}", get(api::saved_rentals))
        .route("/api/profiles/{user_id}", get(api::profile))
        .route("/api/ai/ask", post(api::ask))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
