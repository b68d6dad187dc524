use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::delete,
};

use crate::{
    auth::{AuthUser, Role},
    error::{ApiError, Error, validate_id},
    state::GradebookState,
    store::ExamStore,
};

pub fn router() -> Router<GradebookState> {
    Router::new().route("/api/exams/{exam_id}", delete(soft_delete))
}

async fn soft_delete(
    auth: AuthUser,
    State(state): State<GradebookState>,
    Path(exam_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    auth.require_role(&[Role::Admin, Role::Instructor])?;
    validate_id("exam_id", exam_id)?;

    if !state.store.soft_delete(exam_id).await? {
        return Err(Error::NotFound {
            entity: "exam",
            key: exam_id.to_string(),
        }
        .into());
    }

    tracing::info!(exam_id, by = auth.user_id, "exam deleted");

    Ok(StatusCode::NO_CONTENT)
}
