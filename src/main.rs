use axum::{
    BoxError, Router, serve,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post}
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs,
    io,
    net::{IpAddr, SocketAddr},
    panic,
    sync::Arc,
    time::Duration
};
use tokio::{
    net::TcpListener,
    signal
};
use tower::{
    ServiceBuilder,
    timeout::error::Elapsed
};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod app;
mod auth_provider;
mod config;
mod core;
mod errors;
mod extractors;
mod handlers;
mod jwt;
mod metrics;
mod model;
mod prod_core;

use crate::{
    app::AppState,
    auth_provider::FixedCredential,
    config::{Config, ConfigError},
    core::CoreArc,
    errors::AppError,
    jwt::{JWTIssuer, JWTVerifier},
    metrics::{MetricsArc, MetricsError, PrometheusMetrics},
    prod_core::ProdCore
};

impl From<&AppError> for StatusCode {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::BadMimeType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::SigningError => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MetricsError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
struct HttpError {
    error: String
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        HttpError { error: format!("{}", err) }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = StatusCode::from(&self);
        let body = Json(HttpError::from(self));
        (code, body).into_response()
    }
}

fn routes(state: AppState) -> Router {
    // only the authentication routes are timed
    let auth = Router::new()
        .route("/login", post(handlers::login_post))
        .route("/validate", post(handlers::validate_post))
        .route_layer(
            middleware::from_fn_with_state(
                state.metrics.clone(),
                metrics::track_latency
            )
        );

    Router::new()
        .route("/health/live", get(handlers::health_live_get))
        .route("/health/ready", get(handlers::health_ready_get))
        .route("/metrics", get(handlers::metrics_get))
        .merge(auth)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
}

async fn handle_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout
    }
    else {
        tracing::error!("unhandled error: {err}");
        AppError::InternalError
    }
}

fn app(state: AppState, timeout: Duration) -> Router {
    routes(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_error))
                .timeout(timeout)
        )
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("{0}")]
    AddrParseError(#[from] std::net::AddrParseError),
    #[error("{0}")]
    TomlParseError(#[from] toml::de::Error),
    #[error("{0}")]
    ConfigError(#[from] ConfigError),
    #[error("{0}")]
    MetricsError(#[from] MetricsError),
    #[error("{0}")]
    IOError(#[from] io::Error)
}

const CONFIG_ENV: &str = "TOKENGATE_CONFIG";
const CONFIG_PATH: &str = "config.toml";

fn init_logging() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(io::stdout());

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    panic::set_hook(Box::new(tracing_panic::panic_hook));

    guard
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let _guard = init_logging();

    let config_path = env::var(CONFIG_ENV)
        .unwrap_or_else(|_| CONFIG_PATH.into());

    let config: Config = toml::from_str(&fs::read_to_string(&config_path)?)?;
    config.validate()?;

    let core = ProdCore {
        auth: FixedCredential {
            username: config.username,
            password: config.password
        },
        issuer: JWTIssuer::new(config.jwt_key.as_bytes()),
        verifier: JWTVerifier::new(config.jwt_key.as_bytes()),
        token_duration: config.token_duration,
        now: Utc::now
    };

    let state = AppState {
        core: Arc::new(core) as CoreArc,
        metrics: Arc::new(PrometheusMetrics::new()?) as MetricsArc
    };

    let app = app(state, Duration::from_secs(config.request_timeout));

    let ip: IpAddr = config.listen_ip.parse()?;
    let addr = SocketAddr::from((ip, config.listen_port));
    let listener = TcpListener::bind(addr).await?;

    info!("listening on {addr}, config from {config_path}");

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
