use admin_core::config as core_config;
use admin_core::error::AppError;
use serde::Deserialize;
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub api: ApiSettings,
}

/// Where the invoicing REST API lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl AdminConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;
        let api = ApiSettings::from_lookup(|key| env::var(key).ok())?;

        Ok(AdminConfig { common, api })
    }
}

impl ApiSettings {
    /// Resolve settings from `API_URL` / `API_TIMEOUT_SECS`. In production
    /// (`ENVIRONMENT=prod`) the URL has no default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").as_deref() == Some("prod");

        let base_url = get_env(&lookup, "API_URL", Some(DEFAULT_API_URL), is_prod)?;
        let timeout_secs = match lookup("API_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid API_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_API_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
