use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::grading::GradeLetter;

#[derive(sqlx::Type, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[sqlx(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Enrolled,
    Completed,
    Failed,
    Dropped,
    Withdrawn,
    Rejected,
}

impl EnrollmentStatus {
    /// Statuses the completion evaluator may read and overwrite.
    #[must_use]
    pub const fn is_evaluator_owned(self) -> bool {
        matches!(self, Self::Enrolled | Self::Completed | Self::Failed)
    }

    /// Statuses that only the evaluator may assign.
    #[must_use]
    pub const fn is_completion_outcome(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enrolled => "Enrolled",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Dropped => "Dropped",
            Self::Withdrawn => "Withdrawn",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,

    pub student_id: i64,
    pub course_id: i64,

    pub status: EnrollmentStatus,
    pub final_grade: Option<Decimal>,
    pub grade_letter: Option<GradeLetter>,

    /// Bumped on every write; used as the compare-and-swap token.
    pub version: i64,

    pub enrolled_at: NaiveDateTime,
}
