use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Course {
    pub id: i64,

    pub code: String,
    pub title: String,
    /// Markdown.
    pub description: String,

    pub credit_hours: i64,
}
