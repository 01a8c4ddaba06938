//! Page routes: render templates around facade and AI proxy calls.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::session::{client_id, client_id_or_new, forget, remember};
use crate::ai::response_text;
use crate::pages::{self, AiView, ConnectionStatus, LoginView, Notice};
use crate::state::AppState;
use crate::supabase::types::ClientId;

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct AskForm {
    prompt: String,
}

/// Login page state: availability plus the user signed in as `client`.
pub(crate) async fn login_view(
    state: &AppState,
    client: Option<&ClientId>,
    email: String,
    notice: Option<Notice>,
) -> LoginView {
    let available = state.auth.is_available() && state.config.has_anon_key();
    let user_email = match client {
        Some(client) if available => state
            .auth
            .get_user(client)
            .await
            .data
            .and_then(|d| d.user)
            .map(|user| user.email.unwrap_or(user.id)),
        _ => None,
    };
    LoginView { available, user_email, email, notice }
}

/// `GET /`
pub async fn home() -> Html<String> {
    Html(pages::home())
}

/// `GET /login`
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let client = client_id(&jar);
    Html(pages::login(&login_view(&state, client.as_ref(), String::new(), None).await))
}

/// `POST /login`: sign in as this browser client, then re-render with the
/// outcome. The client cookie is set on success.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> (CookieJar, Html<String>) {
    let client = client_id_or_new(&jar);
    let result = state.auth.sign_in(&client, &form.email, &form.password).await;
    let (jar, notice) = match result.error {
        Some(error) => {
            tracing::warn!(email = %form.email, error = %error.message, "sign-in failed");
            (jar, Notice::Error(error.message))
        }
        None => {
            tracing::info!(email = %form.email, "signed in");
            let jar = remember(jar, &client, state.config.cookie_secure);
            (jar, Notice::Success("Signed in".to_owned()))
        }
    };
    let view = login_view(&state, Some(&client), form.email, Some(notice)).await;
    (jar, Html(pages::login(&view)))
}

/// `POST /logout`: sign this browser client out and drop its cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let client = client_id_or_new(&jar);
    if let Some(message) = state.auth.sign_out(&client).await.error_message() {
        tracing::warn!(error = %message, "sign-out failed");
    }
    (forget(jar, state.config.cookie_secure), Redirect::to("/login"))
}

/// `GET /ai`
pub async fn ai_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::ai(&AiView { configured: state.ai.is_some(), ..AiView::default() }))
}

/// `POST /ai`: forward the prompt to the AI proxy.
pub async fn ai_submit(State(state): State<AppState>, Form(form): Form<AskForm>) -> Html<String> {
    let outcome = match &state.ai {
        Some(ai) => match ai.ask(&form.prompt).await {
            Ok(body) => Some(Ok(response_text(&body))),
            Err(e) => {
                tracing::warn!(error = %e, "AI proxy call failed");
                Some(Err(e.to_string()))
            }
        },
        None => None,
    };
    Html(pages::ai(&AiView { configured: state.ai.is_some(), prompt: form.prompt, outcome }))
}

/// `GET /debug`
pub async fn debug_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::debug(&state.config, state.client_kind))
}

/// `GET /test-supabase`
pub async fn test_supabase_page(State(state): State<AppState>) -> Html<String> {
    let result = state.database.check_connection().await;
    let status = match result.error {
        None => ConnectionStatus::Connected,
        Some(error) => ConnectionStatus::Failed(error.message),
    };
    Html(pages::test_supabase(&status, &state.config))
}
