use askama::Template;

use crate::{
    auth::AuthUser,
    evaluator::{CompletionResult, ExamProgress},
    filters,
    models::{Course, Enrollment, Student},
};

#[derive(Template)]
#[template(path = "progress.html")]
pub struct ProgressPage {
    pub viewer: AuthUser,
    pub student: Student,
    pub course: Course,
    pub enrollment: Enrollment,
    pub exams: Vec<ExamProgress>,
    pub result: CompletionResult,
}
