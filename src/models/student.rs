use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Student {
    pub id: i64,

    pub name: String,
    pub email: String,
}
