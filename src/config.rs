use std::env;
use thiserror::Error;

const DEFAULT_TOKEN_EXPIRATION_SECS: i64 = 60 * 60 * 24; // 24 hours

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} has an invalid value: {1}")]
    Invalid(&'static str, String),
}

/// Process configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub token_expiration: chrono::Duration,
    pub server_port: u16,
    pub server_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET", "empty".into()));
        }

        let expiration_secs = match env::var("TOKEN_EXPIRATION_SECS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("TOKEN_EXPIRATION_SECS", raw))?,
            Err(_) => DEFAULT_TOKEN_EXPIRATION_SECS,
        };

        let server_port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            jwt_secret,
            token_expiration: chrono::Duration::seconds(expiration_secs),
            server_port,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
