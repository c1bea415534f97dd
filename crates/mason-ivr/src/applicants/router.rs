use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::record::{ApplicantId, ContactStatus};
use super::repository::{ApplicantRepository, RepositoryError};

/// Routes for the collected-applicant listing used by the employer
/// dashboard.
pub fn applicant_router<R>(repository: Arc<R>) -> Router
where
    R: ApplicantRepository + 'static,
{
    Router::new()
        .route("/api/v1/applicants", get(list_handler::<R>))
        .route(
            "/api/v1/applicants/:applicant_id/status",
            put(update_status_handler::<R>),
        )
        .with_state(repository)
}

pub(crate) async fn list_handler<R>(State(repository): State<Arc<R>>) -> Response
where
    R: ApplicantRepository + 'static,
{
    match repository.list() {
        Ok(applicants) => {
            (StatusCode::OK, Json(json!({ "applicants": applicants }))).into_response()
        }
        Err(err) => repository_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    pub(crate) contact_status: ContactStatus,
}

pub(crate) async fn update_status_handler<R>(
    State(repository): State<Arc<R>>,
    Path(applicant_id): Path<u64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Response
where
    R: ApplicantRepository + 'static,
{
    match repository.update_contact_status(ApplicantId(applicant_id), payload.contact_status) {
        Ok(updated) => (
            StatusCode::OK,
            Json(json!({ "updated": true, "applicant": updated })),
        )
            .into_response(),
        Err(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "updated": false, "error": "applicant not found" })),
        )
            .into_response(),
        Err(err) => repository_error(err),
    }
}

fn repository_error(err: RepositoryError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}
