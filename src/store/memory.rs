//! In-memory store for evaluator tests.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::Barrier;

use super::{EnrollmentStore, ExamStore, SubmissionStore};
use crate::{
    error::StoreError,
    grading::GradeLetter,
    models::{Enrollment, EnrollmentStatus, Exam, ExamSubmission},
};

#[derive(Default)]
struct Tables {
    enrollments: Vec<Enrollment>,
    exams: Vec<Exam>,
    submissions: Vec<ExamSubmission>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    writes: AtomicUsize,
    /// When set, every write waits here first so concurrent callers can be
    /// lined up after their reads.
    write_barrier: Option<Arc<Barrier>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.write_barrier = Some(barrier);
        self
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enroll(&self, student_id: i64, course_id: i64, status: EnrollmentStatus) -> i64 {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.enrollments.push(Enrollment {
            id,
            student_id,
            course_id,
            status,
            final_grade: None,
            grade_letter: None,
            version: 0,
            enrolled_at: Utc::now().naive_utc(),
        });
        id
    }

    pub fn add_exam(&self, course_id: i64, total_points: i64) -> i64 {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.exams.push(Exam {
            id,
            course_id,
            title: format!("Exam {id}"),
            total_points,
            deleted_at: None,
        });
        id
    }

    pub fn submit(&self, exam_id: i64, student_id: i64, score: Option<Decimal>) {
        self.insert_submission(exam_id, student_id, score, Some(Utc::now().naive_utc()));
    }

    pub fn start(&self, exam_id: i64, student_id: i64) {
        self.insert_submission(exam_id, student_id, None, None);
    }

    fn insert_submission(
        &self,
        exam_id: i64,
        student_id: i64,
        score: Option<Decimal>,
        submitted_at: Option<NaiveDateTime>,
    ) {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.submissions.push(ExamSubmission {
            id,
            exam_id,
            student_id,
            score,
            submitted_at,
        });
    }

    pub fn enrollment(&self, enrollment_id: i64) -> Option<Enrollment> {
        self.tables()
            .enrollments
            .iter()
            .find(|e| e.id == enrollment_id)
            .cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn before_write(&self) {
        if let Some(barrier) = &self.write_barrier {
            barrier.wait().await;
        }
    }

    fn write_enrollment(
        &self,
        enrollment_id: i64,
        expected_version: i64,
        apply: impl FnOnce(&mut Enrollment),
    ) -> bool {
        let mut tables = self.tables();
        let Some(enrollment) = tables
            .enrollments
            .iter_mut()
            .find(|e| e.id == enrollment_id && e.version == expected_version)
        else {
            return false;
        };

        apply(enrollment);
        enrollment.version += 1;
        self.writes.fetch_add(1, Ordering::SeqCst);
        true
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryStore {
    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>, StoreError> {
        Ok(self
            .tables()
            .enrollments
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn find_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>, StoreError> {
        Ok(self.enrollment(enrollment_id))
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self
            .tables()
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn update_completion(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        final_grade: Option<Decimal>,
        grade_letter: Option<GradeLetter>,
        expected_version: i64,
    ) -> Result<bool, StoreError> {
        self.before_write().await;

        Ok(self.write_enrollment(enrollment_id, expected_version, |e| {
            e.status = status;
            e.final_grade = final_grade;
            e.grade_letter = grade_letter;
        }))
    }

    async fn update_status(
        &self,
        enrollment_id: i64,
        status: EnrollmentStatus,
        expected_version: i64,
    ) -> Result<bool, StoreError> {
        self.before_write().await;

        Ok(self.write_enrollment(enrollment_id, expected_version, |e| {
            e.status = status;
            if status == EnrollmentStatus::Enrolled {
                e.final_grade = None;
                e.grade_letter = None;
            }
        }))
    }
}

#[async_trait]
impl ExamStore for InMemoryStore {
    async fn list_by_course(&self, course_id: i64) -> Result<Vec<Exam>, StoreError> {
        Ok(self
            .tables()
            .exams
            .iter()
            .filter(|e| e.course_id == course_id && e.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn soft_delete(&self, exam_id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let Some(exam) = tables
            .exams
            .iter_mut()
            .find(|e| e.id == exam_id && e.deleted_at.is_none())
        else {
            return Ok(false);
        };

        exam.deleted_at = Some(Utc::now().naive_utc());
        Ok(true)
    }
}

#[async_trait]
impl SubmissionStore for InMemoryStore {
    async fn list_by_student_for_exams(
        &self,
        student_id: i64,
        exam_ids: &[i64],
    ) -> Result<Vec<ExamSubmission>, StoreError> {
        Ok(self
            .tables()
            .submissions
            .iter()
            .filter(|s| s.student_id == student_id && exam_ids.contains(&s.exam_id))
            .cloned()
            .collect())
    }
}
