use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Token {
    pub token: String,
    pub user: String
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ValidateParams {
    pub token: String
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>
}

impl Validation {
    pub fn invalid() -> Self {
        Validation { valid: false, user: None }
    }

    pub fn valid(user: String) -> Self {
        Validation { valid: true, user: Some(user) }
    }
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: String
}
