use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Exam {
    pub id: i64,

    pub course_id: i64,

    pub title: String,
    pub total_points: i64,

    pub deleted_at: Option<NaiveDateTime>,
}
