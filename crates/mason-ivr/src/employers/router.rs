use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EmployerId, SignupRequest};
use super::repository::{EmployerRepository, EmployerRepositoryError};
use super::service::{EmployerDirectory, EmployerError};

/// HTTP endpoints for employer signup, login, and profile lookup.
pub fn employer_router<R>(directory: Arc<EmployerDirectory<R>>) -> Router
where
    R: EmployerRepository + 'static,
{
    Router::new()
        .route("/api/v1/employers/signup", post(signup_handler::<R>))
        .route("/api/v1/employers/login", post(login_handler::<R>))
        .route("/api/v1/employers/:emp_id", get(profile_handler::<R>))
        .with_state(directory)
}

pub(crate) async fn signup_handler<R>(
    State(directory): State<Arc<EmployerDirectory<R>>>,
    Json(request): Json<SignupRequest>,
) -> Response
where
    R: EmployerRepository + 'static,
{
    match directory.signup(request) {
        Ok(emp_id) => (
            StatusCode::CREATED,
            Json(json!({ "emp_id": emp_id, "status": "created" })),
        )
            .into_response(),
        Err(EmployerError::Repository(EmployerRepositoryError::Conflict)) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "an account with this email already exists" })),
        )
            .into_response(),
        Err(other) => service_error(other),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

pub(crate) async fn login_handler<R>(
    State(directory): State<Arc<EmployerDirectory<R>>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    R: EmployerRepository + 'static,
{
    match directory.login(&request.email, &request.password) {
        Ok(view) => (
            StatusCode::OK,
            Json(json!({ "verified": true, "employer": view })),
        )
            .into_response(),
        Err(EmployerError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "verified": false, "error": "invalid credentials" })),
        )
            .into_response(),
        Err(other) => service_error(other),
    }
}

pub(crate) async fn profile_handler<R>(
    State(directory): State<Arc<EmployerDirectory<R>>>,
    Path(emp_id): Path<String>,
) -> Response
where
    R: EmployerRepository + 'static,
{
    match directory.profile(&EmployerId(emp_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(EmployerError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "employer not found" })),
        )
            .into_response(),
        Err(other) => service_error(other),
    }
}

fn service_error(err: EmployerError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}
