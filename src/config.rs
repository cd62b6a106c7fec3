use serde::Deserialize;
use thiserror::Error;

const DEFAULT_TOKEN_DURATION: i64 = 24 * 60 * 60;
const DEFAULT_REQUEST_TIMEOUT: u64 = 10;
const MAX_TOKEN_DURATION: i64 = 366 * 24 * 60 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("token_duration must be between 1 and 31622400 seconds")]
    BadTokenDuration,
    #[error("request_timeout must be positive")]
    BadRequestTimeout
}

fn default_token_duration() -> i64 {
    DEFAULT_TOKEN_DURATION
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

#[derive(Deserialize)]
pub struct Config {
    pub listen_ip: String,
    pub listen_port: u16,
    pub jwt_key: String,
    // the single accepted credential
    pub username: String,
    pub password: String,
    // seconds
    #[serde(default = "default_token_duration")]
    pub token_duration: i64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_key.is_empty() {
            return Err(ConfigError::Empty("jwt_key"));
        }

        if self.username.is_empty() {
            return Err(ConfigError::Empty("username"));
        }

        if self.password.is_empty() {
            return Err(ConfigError::Empty("password"));
        }

        if !(1..=MAX_TOKEN_DURATION).contains(&self.token_duration) {
            return Err(ConfigError::BadTokenDuration);
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::BadRequestTimeout);
        }

        Ok(())
    }
}
