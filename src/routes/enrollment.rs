use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;

use crate::{
    admin,
    auth::{AuthUser, Role},
    error::{ApiError, validate_id},
    models::{Enrollment, EnrollmentStatus},
    state::GradebookState,
    store::{EnrollmentStore, SqliteStore},
};

pub fn router() -> Router<GradebookState> {
    Router::new()
        .route(
            "/api/students/{student_id}/enrollments",
            get(list_for_student),
        )
        .route("/api/enrollments/{enrollment_id}/status", put(change_status))
}

async fn list_for_student(
    auth: AuthUser,
    State(store): State<SqliteStore>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<Enrollment>>, ApiError> {
    validate_id("student_id", student_id)?;
    auth.require_student_access(student_id)?;

    let enrollments = store.list_by_student(student_id).await?;

    Ok(Json(enrollments))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusChange {
    status: EnrollmentStatus,
    expected_version: i64,
}

async fn change_status(
    auth: AuthUser,
    State(state): State<GradebookState>,
    Path(enrollment_id): Path<i64>,
    Json(StatusChange {
        status,
        expected_version,
    }): Json<StatusChange>,
) -> Result<Json<Enrollment>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let enrollment =
        admin::change_status(&state.store, enrollment_id, status, expected_version).await?;

    Ok(Json(enrollment))
}
