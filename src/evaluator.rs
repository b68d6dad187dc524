//! Course completion evaluation.
//!
//! A student completes a course once every non-deleted exam of the course has
//! a submitted, graded submission and the average of the per-exam percentages
//! reaches [`PASS_THRESHOLD`]. Each exam is normalized to its own point total
//! before averaging, so exams weigh equally regardless of their size.

use std::{collections::HashMap, fmt, sync::Arc};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Points,
    error::{Error, Result, StoreError, validate_id},
    grading::{GradeLetter, PASS_THRESHOLD},
    models::{Enrollment, EnrollmentStatus, Exam, ExamSubmission},
    store::{EnrollmentStore, ExamStore, SubmissionStore},
};

/// Decimal places kept for reported averages and final grades.
const GRADE_SCALE: u32 = 2;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionStatus {
    InProgress,
    Completed,
    Failed,
}

impl CompletionStatus {
    /// The enrollment status this outcome is persisted as, if any.
    #[must_use]
    pub const fn enrollment_status(self) -> Option<EnrollmentStatus> {
        match self {
            Self::InProgress => None,
            Self::Completed => Some(EnrollmentStatus::Completed),
            Self::Failed => Some(EnrollmentStatus::Failed),
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResult {
    pub is_completed: bool,
    pub average_score_percent: Decimal,
    pub grade_letter: Option<GradeLetter>,
    pub status: CompletionStatus,
    pub submitted_exams: usize,
    pub total_exams: usize,
}

impl CompletionResult {
    fn in_progress(average: Decimal, submitted_exams: usize, total_exams: usize) -> Self {
        Self {
            is_completed: false,
            average_score_percent: average,
            grade_letter: None,
            status: CompletionStatus::InProgress,
            submitted_exams,
            total_exams,
        }
    }

    /// Summarizes per-exam progress into a completion outcome.
    #[must_use]
    pub fn from_progress(exams: &[ExamProgress]) -> Self {
        let total_exams = exams.len();
        let submitted_exams = exams.iter().filter(|exam| exam.submitted).count();
        let percents: Vec<Decimal> = exams.iter().filter_map(|exam| exam.percent).collect();

        let mean = mean(&percents);

        // An exam that is submitted but not graded yet keeps the course open.
        if total_exams == 0 || submitted_exams < total_exams || percents.len() < total_exams {
            return Self::in_progress(reported(mean), submitted_exams, total_exams);
        }

        // Threshold and letter use the exact mean; only the reported figure is cut.
        let passed = mean >= PASS_THRESHOLD;

        Self {
            is_completed: passed,
            average_score_percent: reported(mean),
            grade_letter: Some(GradeLetter::from_percent(mean)),
            status: if passed {
                CompletionStatus::Completed
            } else {
                CompletionStatus::Failed
            },
            submitted_exams,
            total_exams,
        }
    }
}

fn mean(percents: &[Decimal]) -> Decimal {
    if percents.is_empty() {
        return Decimal::ZERO;
    }

    let sum: Decimal = percents.iter().sum();

    sum / Decimal::from(percents.len())
}

/// Truncates towards zero so a reported average never crosses a breakpoint
/// the exact mean did not reach.
fn reported(mean: Decimal) -> Decimal {
    mean.round_dp_with_strategy(GRADE_SCALE, RoundingStrategy::ToZero)
        .normalize()
}

/// One exam of the course as seen by one student.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExamProgress {
    pub exam_id: i64,
    pub title: String,
    pub total_points: i64,
    pub score: Option<Decimal>,
    pub submitted: bool,
    /// Score as a percentage of the exam total, once counted.
    pub percent: Option<Decimal>,
}

impl ExamProgress {
    fn new(exam: &Exam, submission: Option<&ExamSubmission>) -> Result<Self> {
        if exam.total_points <= 0 {
            return Err(StoreError::Corrupt {
                table: "exams",
                id: exam.id,
                reason: format!("total_points must be positive, got {}", exam.total_points),
            }
            .into());
        }

        let score = submission.and_then(ExamSubmission::counted_score);

        Ok(Self {
            exam_id: exam.id,
            title: exam.title.clone(),
            total_points: exam.total_points,
            score,
            submitted: submission.is_some_and(ExamSubmission::is_submitted),
            percent: score.and_then(|achieved| Points::new(exam.total_points, achieved).percent()),
        })
    }

    /// Points earned, once the submission is both submitted and graded.
    #[must_use]
    pub fn points(&self) -> Option<Points> {
        self.score
            .map(|achieved| Points::new(self.total_points, achieved))
    }
}

/// Everything read for a (student, course) pair, and the outcome derived from it.
#[derive(Clone, Debug)]
pub struct Assessment {
    pub enrollment: Enrollment,
    pub exams: Vec<ExamProgress>,
    pub result: CompletionResult,
}

pub struct CourseCompletionEvaluator {
    enrollments: Arc<dyn EnrollmentStore>,
    exams: Arc<dyn ExamStore>,
    submissions: Arc<dyn SubmissionStore>,
}

impl CourseCompletionEvaluator {
    #[must_use]
    pub fn new(
        enrollments: Arc<dyn EnrollmentStore>,
        exams: Arc<dyn ExamStore>,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            enrollments,
            exams,
            submissions,
        }
    }

    /// Builds an evaluator whose collaborators are all backed by one store.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: EnrollmentStore + ExamStore + SubmissionStore + 'static,
    {
        let enrollments: Arc<dyn EnrollmentStore> = store.clone();
        let exams: Arc<dyn ExamStore> = store.clone();
        let submissions: Arc<dyn SubmissionStore> = store;

        Self::new(enrollments, exams, submissions)
    }

    /// Computes the completion outcome without writing anything.
    pub async fn assess(&self, student_id: i64, course_id: i64) -> Result<Assessment> {
        validate_id("student_id", student_id)?;
        validate_id("course_id", course_id)?;

        let (enrollment, exams) = tokio::try_join!(
            self.enrollments
                .find_by_student_and_course(student_id, course_id),
            self.exams.list_by_course(course_id),
        )?;

        let enrollment = enrollment.ok_or_else(|| Error::NotFound {
            entity: "enrollment",
            key: format!("student {student_id}, course {course_id}"),
        })?;

        let exam_ids: Vec<i64> = exams.iter().map(|exam| exam.id).collect();
        let submissions: HashMap<i64, ExamSubmission> = self
            .submissions
            .list_by_student_for_exams(student_id, &exam_ids)
            .await?
            .into_iter()
            .map(|submission| (submission.exam_id, submission))
            .collect();

        let exams = exams
            .iter()
            .map(|exam| ExamProgress::new(exam, submissions.get(&exam.id)))
            .collect::<Result<Vec<_>>>()?;

        let result = CompletionResult::from_progress(&exams);

        Ok(Assessment {
            enrollment,
            exams,
            result,
        })
    }

    /// Evaluates completion and persists a changed `Completed`/`Failed` outcome.
    ///
    /// Writes at most once, guarded by the enrollment version read during the
    /// assessment. Dropped, withdrawn and rejected enrollments are refused.
    #[tracing::instrument(skip(self))]
    pub async fn evaluate(&self, student_id: i64, course_id: i64) -> Result<CompletionResult> {
        let Assessment {
            enrollment, result, ..
        } = self.assess(student_id, course_id).await?;

        if !enrollment.status.is_evaluator_owned() {
            warn!(
                enrollment_id = enrollment.id,
                status = ?enrollment.status,
                "refusing to evaluate enrollment"
            );
            return Err(Error::InvalidState {
                enrollment_id: enrollment.id,
                status: enrollment.status,
            });
        }

        let Some(status) = result.status.enrollment_status() else {
            debug!(
                submitted = result.submitted_exams,
                total = result.total_exams,
                "course still in progress"
            );
            return Ok(result);
        };

        if status == enrollment.status {
            debug!(?status, "enrollment already up to date");
            return Ok(result);
        }

        let written = self
            .enrollments
            .update_completion(
                enrollment.id,
                status,
                Some(result.average_score_percent),
                result.grade_letter,
                enrollment.version,
            )
            .await?;

        if !written {
            warn!(
                enrollment_id = enrollment.id,
                version = enrollment.version,
                "enrollment changed since it was read"
            );
            return Err(Error::ConcurrencyConflict {
                enrollment_id: enrollment.id,
            });
        }

        info!(
            enrollment_id = enrollment.id,
            ?status,
            final_grade = %result.average_score_percent,
            "enrollment completion recorded"
        );

        Ok(result)
    }
}
