use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};

use crate::{
    auth::AuthUser, error::ApiError, evaluator::CompletionResult, state::GradebookState,
};

pub fn router() -> Router<GradebookState> {
    Router::new().route(
        "/api/students/{student_id}/courses/{course_id}/completion",
        post(evaluate),
    )
}

async fn evaluate(
    auth: AuthUser,
    State(state): State<GradebookState>,
    Path((student_id, course_id)): Path<(i64, i64)>,
) -> Result<Json<CompletionResult>, ApiError> {
    auth.require_student_access(student_id)?;

    let result = state.evaluator.evaluate(student_id, course_id).await?;

    Ok(Json(result))
}
