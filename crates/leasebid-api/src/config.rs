//! Startup configuration read from the environment.

use leasebid_walkthrough::application::walkthrough::WalkthroughSettings;

use crate::error::AppError;
use crate::state::DEFAULT_MAX_SESSIONS;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Port to bind (`PORT`, default `3000`).
    pub port: u16,
    /// Default for new sessions (`DEMO_AUTO_ADVANCE`, default `false`).
    pub auto_advance: bool,
    /// Live sessions kept before the oldest is evicted (`MAX_SESSIONS`,
    /// default [`DEFAULT_MAX_SESSIONS`]).
    pub max_sessions: usize,
}

impl ApiConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns a variable's value
    /// if set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let auto_advance = match lookup("DEMO_AUTO_ADVANCE") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!("DEMO_AUTO_ADVANCE must be true or false, got {raw:?}"))
            })?,
            None => false,
        };
        let max_sessions = match lookup("MAX_SESSIONS") {
            Some(raw) => raw
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("MAX_SESSIONS must be a positive integer, got {raw:?}"))
                })?,
            None => DEFAULT_MAX_SESSIONS,
        };

        Ok(Self {
            host,
            port,
            auto_advance,
            max_sessions,
        })
    }

    /// Session settings derived from this configuration.
    #[must_use]
    pub fn walkthrough_settings(&self) -> WalkthroughSettings {
        WalkthroughSettings {
            auto_advance: self.auto_advance,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
