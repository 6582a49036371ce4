use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
/// Fixed per-request timeout. It applies to every call made by the client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    pub api_base_url: String,
    pub timeout: Duration,
    pub state_file: PathBuf,
    /// Language tag used in place of the browser language (e.g. `es-ES`).
    pub language_tag: Option<String>,
}

impl Config {
    /// Reads configuration from the environment.
    ///
    /// - `API_BASE_URL`: root of the REST API (default `http://127.0.0.1:8000`).
    /// - `API_TIMEOUT_SECS`: request timeout in seconds (default 10).
    /// - `TASKDESK_STATE_FILE`: where the token, user and language are persisted.
    /// - `TASKDESK_LANG`: overrides the system language tag.
    pub fn from_env() -> Result<Self, AppError> {
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        if api_base_url.trim().is_empty() {
            return Err(AppError::Config("API_BASE_URL must not be empty".into()));
        }

        let timeout_secs = match env::var("API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("API_TIMEOUT_SECS must be a number, got {:?}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let state_file = match env::var("TASKDESK_STATE_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_state_file()?,
        };

        let language_tag = env::var("TASKDESK_LANG")
            .ok()
            .filter(|tag| !tag.is_empty())
            .or_else(sys_locale::get_locale);

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            state_file,
            language_tag,
        })
    }
}

fn default_state_file() -> Result<PathBuf, AppError> {
    dirs::config_dir()
        .map(|dir| dir.join("taskdesk").join("state.json"))
        .ok_or_else(|| {
            AppError::Config("no config directory found; set TASKDESK_STATE_FILE".into())
        })
}
