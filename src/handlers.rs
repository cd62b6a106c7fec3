use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Json}
};

use crate::{
    core::CoreArc,
    errors::AppError,
    extractors::JsonBody,
    metrics::MetricsArc,
    model::{HealthStatus, LoginParams, Token, ValidateParams, Validation}
};

pub async fn login_post(
    State(core): State<CoreArc>,
    JsonBody(params): JsonBody<LoginParams>
) -> Result<Json<Token>, AppError>
{
    Ok(Json(core.login(&params.username, &params.password).await?))
}

pub async fn validate_post(
    State(core): State<CoreArc>,
    JsonBody(params): JsonBody<ValidateParams>
) -> Result<Json<Validation>, AppError>
{
    if params.token.is_empty() {
        return Err(AppError::BadRequest("missing token".into()));
    }

    Ok(Json(core.validate(&params.token)))
}

pub async fn health_live_get() -> Json<HealthStatus> {
    Json(HealthStatus { status: "alive".into() })
}

pub async fn health_ready_get() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ready".into() })
}

pub async fn metrics_get(
    State(metrics): State<MetricsArc>
) -> Result<impl IntoResponse, AppError>
{
    Ok(([(CONTENT_TYPE, prometheus::TEXT_FORMAT)], metrics.render()?))
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
