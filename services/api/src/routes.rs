use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;

use mason_ivr::applicants::{applicant_router, ApplicantRepository};
use mason_ivr::dialogue::{ivr_router, IvrState, Synthesizer, Transcriber};
use mason_ivr::employers::{employer_router, EmployerDirectory, EmployerRepository};

/// Compose the intake, applicant, and employer routers with the
/// operational endpoints.
pub(crate) fn service_routes<T, S, R, E>(
    ivr: Arc<IvrState<T, S, R>>,
    applicants: Arc<R>,
    employers: Arc<EmployerDirectory<E>>,
) -> Router
where
    T: Transcriber + 'static,
    S: Synthesizer + 'static,
    R: ApplicantRepository + 'static,
    E: EmployerRepository + 'static,
{
    ivr_router(ivr)
        .merge(applicant_router(applicants))
        .merge(employer_router(employers))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "mason-ivr" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
