use std::str::FromStr;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{EnrollmentStore, ExamStore, SubmissionStore};
use crate::{
    error::StoreError,
    grading::GradeLetter,
    models::{Course, Enrollment, EnrollmentStatus, Exam, ExamSubmission, Student},
};

const ENROLLMENT_COLUMNS: &str =
    "id, student_id, course_id, status, final_grade, grade_letter, version, enrolled_at";

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn find_course(&self, course_id: i64) -> Result<Option<Course>, StoreError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, code, title, description, credit_hours FROM courses WHERE id = ?",
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    pub async fn find_student(&self, student_id: i64) -> Result<Option<Student>, StoreError> {
        let student =
            sqlx::query_as::<_, Student>("SELECT id, name, email FROM students WHERE id = ?")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(student)
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i64,
    student_id: i64,
    course_id: i64,
    status: EnrollmentStatus,
    final_grade: Option<String>,
    grade_letter: Option<String>,
    version: i64,
    enrolled_at: NaiveDateTime,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = StoreError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| StoreError::Corrupt {
            table: "enrollments",
            id: row.id,
            reason,
        };

        let final_grade = row
            .final_grade
            .as_deref()
            .map(Decimal::from_str)
            .transpose()
            .map_err(|e| corrupt(format!("final_grade: {e}")))?;

        let grade_letter = row
            .grade_letter
            .as_deref()
            .map(GradeLetter::from_str)
            .transpose()
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(Self {
            id: row.id,
            student_id: row.student_id,
            course_id: row.course_id,
            status: row.status,
            final_grade,
            grade_letter,
            version: row.version,
            enrolled_at: row.enrolled_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: i64,
    exam_id: i64,
    student_id: i64,
    score: Option<String>,
    submitted_at: Option<NaiveDateTime>,
}

impl TryFrom<SubmissionRow> for ExamSubmission {
    type Error = StoreError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let score = row
            .score
            .as_deref()
            .map(Decimal::from_str)
            .transpose()
            .map_err(|e| StoreError::Corrupt {
                table: "exam_submissions",
                id: row.id,
                reason: format!("score: {e}"),
            })?;

        Ok(Self {
            id: row.id,
            exam_id: row.exam_id,
            student_id: row.student_id,
            score,
            submitted_at: row.submitted_at,
        })
    }
}

#[async_trait]
impl EnrollmentStore for SqliteStore {
    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>, StoreError> {
        sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = ? AND course_id = ?"
        ))
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Enrollment::try_from)
        .transpose()
    }

    async fn find_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>, StoreError> {
        sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = ?"
        ))
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Enrollment::try_from)
        .transpose()
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Enrollment>, StoreError> {
        sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = ? ORDER BY course_id"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Enrollment::try_from)
        .collect()
    }

    async fn update_completion(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        final_grade: Option<Decimal>,
        grade_letter: Option<GradeLetter>,
        expected_version: i64,
    ) -> Result<bool, StoreError> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            "UPDATE enrollments
            SET status = ?, final_grade = ?, grade_letter = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?",
        )
        .bind(status)
        .bind(final_grade.map(|grade| grade.to_string()))
        .bind(grade_letter.map(GradeLetter::as_str))
        .bind(now)
        .bind(enrollment_id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_status(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        expected_version: i64,
    ) -> Result<bool, StoreError> {
        let now = Utc::now().naive_utc();
        let clear_grade = status == EnrollmentStatus::Enrolled;

        let result = sqlx::query(
            "UPDATE enrollments
            SET status = ?,
                final_grade = CASE WHEN ? THEN NULL ELSE final_grade END,
                grade_letter = CASE WHEN ? THEN NULL ELSE grade_letter END,
                version = version + 1,
                updated_at = ?
            WHERE id = ? AND version = ?",
        )
        .bind(status)
        .bind(clear_grade)
        .bind(clear_grade)
        .bind(now)
        .bind(enrollment_id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl ExamStore for SqliteStore {
    async fn list_by_course(&self, course_id: i64) -> Result<Vec<Exam>, StoreError> {
        let exams = sqlx::query_as::<_, Exam>(
            "SELECT id, course_id, title, total_points, deleted_at
            FROM exams WHERE course_id = ? AND deleted_at IS NULL ORDER BY id",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(exams)
    }

    async fn soft_delete(&self, exam_id: i64) -> Result<bool, StoreError> {
        let now = Utc::now().naive_utc();

        let result =
            sqlx::query("UPDATE exams SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
                .bind(now)
                .bind(exam_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    async fn list_by_student_for_exams(
        &self,
        student_id: i64,
        exam_ids: &[i64],
    ) -> Result<Vec<ExamSubmission>, StoreError> {
        if exam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, exam_id, student_id, score, submitted_at FROM exam_submissions WHERE student_id = ",
        );
        builder.push_bind(student_id);
        builder.push(" AND exam_id IN (");

        let mut ids = builder.separated(", ");
        for exam_id in exam_ids {
            ids.push_bind(*exam_id);
        }
        ids.push_unseparated(")");

        builder
            .build_query_as::<SubmissionRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ExamSubmission::try_from)
            .collect()
    }
}
