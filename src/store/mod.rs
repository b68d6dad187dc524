//! Storage collaborators used by the completion evaluator.
//!
//! Every write is an explicit per-entity function; nothing is intercepted
//! implicitly. Exams are soft-deleted by stamping `deleted_at`.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    error::StoreError,
    grading::GradeLetter,
    models::{Enrollment, EnrollmentStatus, Exam, ExamSubmission},
};

pub use sqlite::SqliteStore;

#[cfg(test)]
pub mod memory;
mod sqlite;

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>, StoreError>;

    async fn find_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>, StoreError>;

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Enrollment>, StoreError>;

    /// Writes a completion outcome if the stored version still equals
    /// `expected_version`. Returns `false` when the guard did not match.
    async fn update_completion(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        final_grade: Option<Decimal>,
        grade_letter: Option<GradeLetter>,
        expected_version: i64,
    ) -> Result<bool, StoreError>;

    /// Administrative status change under the same version guard. Moving back
    /// to `Enrolled` clears the grade fields.
    async fn update_status(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        expected_version: i64,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ExamStore: Send + Sync {
    /// Non-deleted exams of a course, ordered by id.
    async fn list_by_course(&self, course_id: i64) -> Result<Vec<Exam>, StoreError>;

    /// Returns `false` if the exam does not exist or is already deleted.
    async fn soft_delete(&self, exam_id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn list_by_student_for_exams(
        &self,
        student_id: i64,
        exam_ids: &[i64],
    ) -> Result<Vec<ExamSubmission>, StoreError>;
}
