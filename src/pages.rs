//! Server-rendered pages.
//!
//! Templates live in `templates/` and are filled by `{{NAME}}` replacement.
//! Every dynamic value goes through [`escape_html`] first.

use crate::config::AppConfig;

const LAYOUT_TEMPLATE: &str = include_str!("../templates/layout.html");
const HOME_TEMPLATE: &str = include_str!("../templates/home.html");
const LOGIN_TEMPLATE: &str = include_str!("../templates/login.html");
const LOGIN_UNAVAILABLE_TEMPLATE: &str = include_str!("../templates/login_unavailable.html");
const SIGNED_IN_TEMPLATE: &str = include_str!("../templates/signed_in.html");
const AI_TEMPLATE: &str = include_str!("../templates/ai.html");
const DEBUG_TEMPLATE: &str = include_str!("../templates/debug.html");
const TEST_SUPABASE_TEMPLATE: &str = include_str!("../templates/test_supabase.html");

const NOT_SET: &str = "NOT SET";
const KEY_PREVIEW_CHARS: usize = 20;

// =============================================================================
// VIEW MODELS
// =============================================================================

/// One-line status message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    /// `false` when no public key is configured.
    pub available: bool,
    /// Email of the signed-in user, if any.
    pub user_email: Option<String>,
    /// Previously submitted email, echoed back into the form.
    pub email: String,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Default)]
pub struct AiView {
    pub configured: bool,
    pub prompt: String,
    /// `Ok(text)` for a proxy answer, `Err(message)` for a failed call.
    pub outcome: Option<Result<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Not checked (prerendered output).
    Pending,
    Connected,
    Failed(String),
}

// =============================================================================
// PAGES
// =============================================================================

#[must_use]
pub fn home() -> String {
    layout("Home", HOME_TEMPLATE)
}

#[must_use]
pub fn login(view: &LoginView) -> String {
    if !view.available {
        return layout("Sign in", LOGIN_UNAVAILABLE_TEMPLATE);
    }
    let notice = view.notice.as_ref().map_or_else(String::new, render_notice);
    let body = match &view.user_email {
        Some(user_email) => SIGNED_IN_TEMPLATE
            .replace("{{NOTICE}}", &notice)
            .replace("{{EMAIL}}", &escape_html(user_email)),
        None => LOGIN_TEMPLATE
            .replace("{{NOTICE}}", &notice)
            .replace("{{EMAIL}}", &escape_html(&view.email)),
    };
    layout("Sign in", &body)
}

#[must_use]
pub fn ai(view: &AiView) -> String {
    let response = if view.configured {
        match &view.outcome {
            Some(Ok(text)) => escape_html(text),
            Some(Err(message)) => format!(r#"<span class="error">{}</span>"#, escape_html(message)),
            None => String::new(),
        }
    } else {
        r#"<span class="error">AI service not configured</span>"#.to_owned()
    };
    let body = AI_TEMPLATE
        .replace("{{RESPONSE}}", &response)
        .replace("{{PROMPT}}", &escape_html(&view.prompt));
    layout("AI Chatbot", &body)
}

#[must_use]
pub fn debug(config: &AppConfig, client_kind: &str) -> String {
    let body = DEBUG_TEMPLATE
        .replace("{{SUPABASE_URL}}", &escape_html(&config.supabase_url))
        .replace("{{ANON_KEY}}", &escape_html(&key_preview(config.anon_key.as_deref())))
        .replace("{{AI_API_URL}}", &escape_html(config.ai_base_url.as_deref().unwrap_or(NOT_SET)))
        .replace("{{CONTEXT}}", config.context.as_str())
        .replace("{{CLIENT}}", &escape_html(client_kind));
    layout("Debug", &body)
}

#[must_use]
pub fn test_supabase(status: &ConnectionStatus, config: &AppConfig) -> String {
    let (label, error) = match status {
        ConnectionStatus::Pending => ("Testing...", String::new()),
        ConnectionStatus::Connected => ("Connection successful!", String::new()),
        ConnectionStatus::Failed(message) => (
            "Connection failed",
            format!(r#"<p class="error"><strong>Error:</strong> {}</p>"#, escape_html(message)),
        ),
    };
    let body = TEST_SUPABASE_TEMPLATE
        .replace("{{STATUS}}", label)
        .replace("{{ERROR}}", &error)
        .replace("{{SUPABASE_URL}}", &escape_html(&config.supabase_url))
        .replace("{{KEY_STATUS}}", if config.has_anon_key() { "Set" } else { "Not set" });
    layout("Supabase Connection Test", &body)
}

// =============================================================================
// HELPERS
// =============================================================================

fn layout(title: &str, body: &str) -> String {
    LAYOUT_TEMPLATE
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{BODY}}", body)
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Error(message) => format!(r#"<p class="error">{}</p>"#, escape_html(message)),
        Notice::Success(message) => format!(r#"<p class="success">{}</p>"#, escape_html(message)),
    }
}

/// First characters of a secret followed by `...`, or `NOT SET`.
#[must_use]
pub fn key_preview(key: Option<&str>) -> String {
    match key {
        Some(key) if key.chars().count() > KEY_PREVIEW_CHARS => {
            format!("{}...", key.chars().take(KEY_PREVIEW_CHARS).collect::<String>())
        }
        Some(key) => format!("{key}..."),
        None => NOT_SET.to_owned(),
    }
}

/// Escape text for HTML bodies and attribute values. `{` is escaped too so a
/// value can never be mistaken for a template placeholder.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
