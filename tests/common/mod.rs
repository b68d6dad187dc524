#![allow(dead_code)]

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

/// A fresh in-memory database with the schema applied.
///
/// Every connection to `sqlite::memory:` gets its own database, so the pool
/// is pinned to a single connection.
pub async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    gradebook::migrate(&pool).await.unwrap();

    pool
}

pub async fn student(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query("INSERT INTO students (id, name, email) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(format!("{}@uni.example", name.to_lowercase()))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn course(pool: &SqlitePool, id: i64, code: &str, description: &str) {
    sqlx::query(
        "INSERT INTO courses (id, code, title, description, credit_hours) VALUES (?, ?, ?, ?, 3)",
    )
    .bind(id)
    .bind(code)
    .bind(format!("{code} title"))
    .bind(description)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn enroll(pool: &SqlitePool, student_id: i64, course_id: i64, status: &str) -> i64 {
    sqlx::query("INSERT INTO enrollments (student_id, course_id, status) VALUES (?, ?, ?)")
        .bind(student_id)
        .bind(course_id)
        .bind(status)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn exam(pool: &SqlitePool, course_id: i64, title: &str, total_points: i64) -> i64 {
    sqlx::query("INSERT INTO exams (course_id, title, total_points) VALUES (?, ?, ?)")
        .bind(course_id)
        .bind(title)
        .bind(total_points)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn submission(
    pool: &SqlitePool,
    exam_id: i64,
    student_id: i64,
    score: Option<&str>,
    submitted: bool,
) {
    let submitted_at = submitted.then_some("2025-05-20 10:30:00");

    sqlx::query(
        "INSERT INTO exam_submissions (exam_id, student_id, score, submitted_at) VALUES (?, ?, ?, ?)",
    )
    .bind(exam_id)
    .bind(student_id)
    .bind(score)
    .bind(submitted_at)
    .execute(pool)
    .await
    .unwrap();
}
