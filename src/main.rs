use std::sync::Arc;

use saferent::ai::{AiAsk, AiClient};
use saferent::config::{AppConfig, ExecutionContext};
use saferent::state::AppState;
use saferent::supabase::Clients;
use saferent::{prerender, routes};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let clients = Clients::init(&config);

    // AI page degrades to a notice if the proxy URL is missing.
    let ai: Option<Arc<dyn AiAsk>> = match config.ai_base_url.as_deref().map(AiClient::new) {
        Some(Ok(client)) => {
            tracing::info!(endpoint = %client.endpoint(), "AI proxy client initialized");
            Some(Arc::new(client))
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "AI proxy client not built: AI features disabled");
            None
        }
        None => {
            tracing::warn!("AI_API_URL not set: AI features disabled");
            None
        }
    };

    let context = config.context;
    let state = AppState::new(config, clients, ai);
    tracing::info!(context = context.as_str(), client = state.client_kind, "client handle selected");

    if context == ExecutionContext::NonInteractive {
        let written = prerender::prerender(&state).await.expect("prerender failed");
        tracing::info!(pages = written.len(), "static build finished");
        return;
    }

    // Observes every browser client.
    let _auth_log = state.auth.on_auth_state_change(None, |event, session| {
        tracing::info!(event = event.as_str(), has_session = session.is_some(), "auth state changed");
    });

    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "saferent listening");
    axum::serve(listener, app).await.expect("server failed");
}
