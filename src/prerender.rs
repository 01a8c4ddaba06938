//! Static prerender for the build context.
//!
//! DESIGN
//! ======
//! In the build context the public handle is the inert mock, so every page
//! renders its signed-out, not-yet-tested shape. The privileged handle, when
//! configured, is used once for a connectivity check whose outcome is logged;
//! it never reaches rendered output.

use std::path::PathBuf;

use crate::pages::{self, AiView, ConnectionStatus};
use crate::routes::site::login_view;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum PrerenderError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: std::io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// Render every static page as `(file name, html)`.
pub async fn render_static_pages(state: &AppState) -> Vec<(&'static str, String)> {
    let login = login_view(state, None, String::new(), None).await;
    vec![
        ("index.html", pages::home()),
        ("login.html", pages::login(&login)),
        ("ai.html", pages::ai(&AiView { configured: state.ai.is_some(), ..AiView::default() })),
        ("debug.html", pages::debug(&state.config, state.client_kind)),
        ("test-supabase.html", pages::test_supabase(&ConnectionStatus::Pending, &state.config)),
    ]
}

/// Write all static pages into `config.out_dir`. Returns the written paths.
///
/// # Errors
///
/// Returns a [`PrerenderError`] if the directory or a file cannot be written.
pub async fn prerender(state: &AppState) -> Result<Vec<PathBuf>, PrerenderError> {
    let out_dir = state.config.out_dir.clone();
    tokio::fs::create_dir_all(&out_dir)
        .await
        .map_err(|source| PrerenderError::CreateDir { path: out_dir.clone(), source })?;

    if let Some(admin) = &state.admin {
        match admin.check_connection().await.error {
            None => tracing::info!("privileged connection check passed"),
            Some(error) => tracing::warn!(error = %error.message, "privileged connection check failed"),
        }
    }

    let mut written = Vec::new();
    for (name, html) in render_static_pages(state).await {
        let path = out_dir.join(name);
        tokio::fs::write(&path, html)
            .await
            .map_err(|source| PrerenderError::Write { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "page written");
        written.push(path);
    }
    tracing::info!(count = written.len(), out_dir = %out_dir.display(), "prerender complete");
    Ok(written)
}

#[cfg(test)]
#[path = "prerender_test.rs"]
mod tests;
