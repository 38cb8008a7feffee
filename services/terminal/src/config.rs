use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub keypad: KeypadConfig,
    pub default_throw_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeypadConfig {
    pub auto_advance_delay_ms: u64,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl KeypadConfig {
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            api: ApiConfig {
                base_url: env::var("API_BASE_URL")
                    .map_err(|_| anyhow::anyhow!("API_BASE_URL must be set"))?,
                token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
                request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()?,
            },
            keypad: KeypadConfig {
                auto_advance_delay_ms: env::var("AUTO_ADVANCE_DELAY_MS")
                    .unwrap_or_else(|_| shared::AUTO_ADVANCE_DELAY_MS.to_string())
                    .parse()?,
            },
            default_throw_id: env::var("THROW_ID").ok().filter(|t| !t.is_empty()),
        })
    }
}
