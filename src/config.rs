use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use tracing::{info, warn};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CONNECT_TIMEOUT_SECS: &str = "5";
const DEFAULT_TIMEOUT_SECS: &str = "10";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub api_key: Option<String>,
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("SPOONACULAR_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            warn!("SPOONACULAR_API_KEY not set, upstream calls will be rejected");
        }

        Ok(Self {
            addr: try_load("RECIPE_FINDER_ADDR", DEFAULT_ADDR)?,
            api_key,
            base_url: try_load("SPOONACULAR_BASE_URL", DEFAULT_BASE_URL)?,
            connect_timeout: Duration::from_secs(try_load(
                "RECIPE_FINDER_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            timeout: Duration::from_secs(try_load("RECIPE_FINDER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
        })
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse_value(key, &value)
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
