use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExamSubmission {
    pub id: i64,

    pub exam_id: i64,
    pub student_id: i64,

    /// Points earned, `None` until graded.
    pub score: Option<Decimal>,
    /// `None` while the attempt is still in progress.
    pub submitted_at: Option<NaiveDateTime>,
}

impl ExamSubmission {
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// The score that counts towards a grade: graded and submitted.
    #[must_use]
    pub fn counted_score(&self) -> Option<Decimal> {
        self.submitted_at.and(self.score)
    }
}
