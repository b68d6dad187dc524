use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    response::Html,
    routing::get,
};

use crate::{
    auth::AuthUser,
    error::{ApiError, Error},
    evaluator::Assessment,
    state::GradebookState,
    templates::ProgressPage,
};

pub fn router() -> Router<GradebookState> {
    Router::new().route(
        "/students/{student_id}/courses/{course_id}",
        get(progress_page),
    )
}

async fn progress_page(
    auth: AuthUser,
    State(state): State<GradebookState>,
    Path((student_id, course_id)): Path<(i64, i64)>,
) -> Result<Html<String>, ApiError> {
    auth.require_student_access(student_id)?;

    let Assessment {
        enrollment,
        exams,
        result,
    } = state.evaluator.assess(student_id, course_id).await?;

    let course = state
        .store
        .find_course(course_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "course",
            key: course_id.to_string(),
        })?;

    let student = state
        .store
        .find_student(student_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "student",
            key: student_id.to_string(),
        })?;

    let page = ProgressPage {
        viewer: auth,
        student,
        course,
        enrollment,
        exams,
        result,
    };

    Ok(Html(page.render()?))
}
