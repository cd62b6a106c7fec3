use thiserror::Error;

use crate::{
    auth_provider,
    jwt,
    metrics::MetricsError
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported media type")]
    BadMimeType,
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Request timed out")]
    Timeout,
    #[error("Failed to generate token")]
    SigningError,
    #[error("Internal error")]
    InternalError,
    #[error("Failed to render metrics")]
    MetricsError(#[from] MetricsError)
}

impl From<jwt::JWTError> for AppError {
    fn from(err: jwt::JWTError) -> Self {
        tracing::error!("token signing failed: {err}");
        AppError::SigningError
    }
}

impl From<auth_provider::Failure> for AppError {
    fn from(e: auth_provider::Failure) -> Self {
        match e {
            auth_provider::Failure::Error(err) => {
                tracing::error!("auth provider failed: {}", err.message);
                AppError::InternalError
            },
            auth_provider::Failure::Unauthorized => {
                AppError::Unauthorized
            }
        }
    }
}
