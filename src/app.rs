use axum::extract::FromRef;

use crate::{
    core::CoreArc,
    metrics::MetricsArc
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub core: CoreArc,
    pub metrics: MetricsArc
}
