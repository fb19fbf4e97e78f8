//! Credentials and polling configuration
//!
//! Credentials come from the environment (optionally seeded by a `.env`
//! file loaded in the binary). The polling configuration is resolved once
//! at startup from CLI flags, an optional JSON config file and the
//! environment; a missing required field is fatal before any navigation.

use crate::error::{Result, WatchError};
use crate::portal::DEFAULT_LOGIN_URL;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

const USERNAME_VAR: &str = "GOLESTAN_USERNAME";
const PASSWORD_VAR: &str = "GOLESTAN_PASSWORD";
const TERM_VAR: &str = "GOLESTAN_TERM";
const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(180);

/// Portal login credentials. Loaded once, never logged.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Telegram bot delivery settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Immutable per-process polling settings
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// 1-based row of the configured term in the term status table
    pub term_index: usize,
    pub login_url: String,
    /// Pause between poll cycles, leaving upstream data entry some lag
    pub poll_interval: Duration,
    /// Present when chat notification is enabled
    pub telegram: Option<TelegramConfig>,
}

/// Optional JSON config file shape; every field can also come from the
/// CLI or the environment
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub login_url: Option<String>,
    pub term_index: Option<usize>,
    pub poll_interval_secs: Option<u64>,
    pub telegram: Option<TelegramConfig>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| WatchError::Configuration(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| WatchError::Configuration(format!("invalid config {}: {}", path.display(), e)))
    }
}

/// Values taken from the command line, overriding file and environment
#[derive(Debug, Default)]
pub struct Overrides {
    pub login_url: Option<String>,
    pub term_index: Option<usize>,
    pub poll_interval_secs: Option<u64>,
    pub telegram_enabled: bool,
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| WatchError::Configuration(format!("environment variable {} not set", name)))
}

/// Load credentials from the environment
pub fn credentials_from_env() -> Result<Credentials> {
    Ok(Credentials { username: required_env(USERNAME_VAR)?, password: required_env(PASSWORD_VAR)? })
}

fn telegram_from_env() -> Result<TelegramConfig> {
    Ok(TelegramConfig { bot_token: required_env(BOT_TOKEN_VAR)?, chat_id: required_env(CHAT_ID_VAR)? })
}

impl PollConfig {
    /// Resolve the effective configuration: CLI overrides beat the config
    /// file, which beats the environment, which beats defaults.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let term_index = overrides
            .term_index
            .or(file.term_index)
            .or_else(|| std::env::var(TERM_VAR).ok().and_then(|v| v.parse().ok()))
            .ok_or_else(|| {
                WatchError::Configuration(format!("term index not set (use --term or {})", TERM_VAR))
            })?;
        if term_index < 1 {
            return Err(WatchError::Configuration("term index must be at least 1".to_string()));
        }

        let login_url = overrides
            .login_url
            .or(file.login_url)
            .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());

        let poll_interval = overrides
            .poll_interval_secs
            .or(file.poll_interval_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let telegram = if overrides.telegram_enabled {
            Some(match file.telegram {
                Some(telegram) => telegram,
                None => telegram_from_env()?,
            })
        } else {
            file.telegram
        };

        Ok(Self { term_index, login_url, poll_interval, telegram })
    }
}
