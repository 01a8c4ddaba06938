//! JSON routes over the facades.
//!
//! Facade calls always answer 200 with the `{data, error}` envelope; failures
//! travel inside it. Only the AI proxy maps failures onto HTTP statuses.
//! Auth and row calls act as the browser client named by the cookie.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::Value;

use super::session::{client_id, client_id_or_new, forget, remember};
use crate::state::AppState;
use crate::supabase::types::{AuthData, Credentials, ServiceResult, UserData};

#[derive(Deserialize)]
pub struct AskBody {
    prompt: String,
}

/// `POST /api/auth/signup`: sets the client cookie when a session comes back.
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<Credentials>,
) -> (CookieJar, Json<ServiceResult<AuthData>>) {
    let client = client_id_or_new(&jar);
    let result = state.auth.sign_up(&client, &body.email, &body.password).await;
    let has_session = result.data.as_ref().is_some_and(|d| d.session.is_some());
    let jar = if has_session { remember(jar, &client, state.config.cookie_secure) } else { jar };
    (jar, Json(result))
}

/// `POST /api/auth/signin`: sets the client cookie on success.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<Credentials>,
) -> (CookieJar, Json<ServiceResult<AuthData>>) {
    let client = client_id_or_new(&jar);
    let result = state.auth.sign_in(&client, &body.email, &body.password).await;
    let jar = if result.is_ok() { remember(jar, &client, state.config.cookie_secure) } else { jar };
    (jar, Json(result))
}

/// `POST /api/auth/signout`
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<ServiceResult<()>>) {
    let result = state.auth.sign_out(&client_id_or_new(&jar)).await;
    (forget(jar, state.config.cookie_secure), Json(result))
}

/// `GET /api/auth/user`
pub async fn current_user(State(state): State<AppState>, jar: CookieJar) -> Json<ServiceResult<UserData>> {
    Json(state.auth.get_user(&client_id_or_new(&jar)).await)
}

/// `GET /api/rentals/{user_id}`
pub async fn saved_rentals(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(user_id): Path<String>,
) -> Json<ServiceResult<Value>> {
    let client = client_id(&jar);
    Json(state.database.get_saved_rentals(client.as_ref(), &user_id).await)
}

/// `POST /api/rentals`: body forwarded unvalidated.
pub async fn save_rental(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(rental): Json<Value>,
) -> Json<ServiceResult<Value>> {
    let client = client_id(&jar);
    Json(state.database.save_rental(client.as_ref(), &rental).await)
}

/// `GET /api/profiles/{user_id}`
pub async fn profile(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(user_id): Path<String>,
) -> Json<ServiceResult<Value>> {
    let client = client_id(&jar);
    Json(state.database.get_user_profile(client.as_ref(), &user_id).await)
}

/// `POST /api/ai/ask`: upstream body verbatim, 502 on proxy failure.
pub async fn ask(State(state): State<AppState>, Json(body): Json<AskBody>) -> Response {
    let Some(ai) = &state.ai else {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({ "error": "AI service not configured" })))
            .into_response();
    };
    match ai.ask(&body.prompt).await {
        Ok(upstream) => Json(upstream).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "AI proxy call failed");
            (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}
