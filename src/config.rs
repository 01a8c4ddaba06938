//! Runtime configuration parsed from environment variables.
//!
//! Parsing goes through a lookup closure so the rules can be exercised
//! without touching the process environment.

use std::path::PathBuf;

pub const DEFAULT_SUPABASE_URL: &str = "https://ccotkrhrqkldgfdjnlea.supabase.co";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Value some build pipelines inject when the real public key is unavailable.
pub const PLACEHOLDER_ANON_KEY: &str = "placeholder-key-for-build";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown SAFERENT_CONTEXT: {0} (expected 'interactive' or 'build')")]
    UnknownContext(String),
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

/// Where the process is running. Decides which client handle is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Serving a user. A real client is built when the public key is present.
    Interactive,
    /// Prerendering pages at build time. No network-capable public client.
    NonInteractive,
}

impl ExecutionContext {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::NonInteractive => "build",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub context: ExecutionContext,
    pub supabase_url: String,
    /// Public key for the interactive client. `None` when unset or a placeholder.
    pub anon_key: Option<String>,
    /// Private key for the privileged handle.
    pub service_key: Option<String>,
    /// Base URL of the AI proxy, without trailing slash.
    pub ai_base_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub out_dir: PathBuf,
    /// Mark the client cookie `Secure`. Defaults to off for plain-HTTP local use.
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `SAFERENT_CONTEXT`: `interactive` (default) or `build`
    /// - `SUPABASE_URL`: defaults to the hosted project URL
    /// - `SUPABASE_ANON_KEY`, `SUPABASE_KEY`
    /// - `AI_API_URL`
    /// - `HOST` (default `127.0.0.1`), `PORT` (default 3000)
    /// - `SAFERENT_OUT_DIR` (default `dist`)
    /// - `COOKIE_SECURE` (`1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`, default off)
    ///
    /// # Errors
    ///
    /// Returns an error if `SAFERENT_CONTEXT` or `PORT` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `SAFERENT_CONTEXT` or `PORT` cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let context = parse_context(lookup("SAFERENT_CONTEXT").as_deref())?;
        let supabase_url = lookup("SUPABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUPABASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let anon_key = public_key(lookup("SUPABASE_ANON_KEY"));
        let service_key = lookup("SUPABASE_KEY").filter(|v| !v.trim().is_empty());
        let ai_base_url = lookup("AI_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty());
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_port(lookup("PORT").as_deref())?;
        let out_dir = lookup("SAFERENT_OUT_DIR").map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), PathBuf::from);
        let cookie_secure = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false);

        Ok(Self { context, supabase_url, anon_key, service_key, ai_base_url, host, port, out_dir, cookie_secure })
    }

    /// `true` when the public key is configured.
    #[must_use]
    pub fn has_anon_key(&self) -> bool {
        self.anon_key.is_some()
    }
}

fn parse_context(raw: Option<&str>) -> Result<ExecutionContext, ConfigError> {
    match raw.map(str::trim).unwrap_or("interactive") {
        "" | "interactive" => Ok(ExecutionContext::Interactive),
        "build" => Ok(ExecutionContext::NonInteractive),
        other => Err(ConfigError::UnknownContext(other.to_owned())),
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(v) => v
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(v.to_owned())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Empty values and the build placeholder count as "no key".
fn public_key(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty() && v != PLACEHOLDER_ANON_KEY)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
