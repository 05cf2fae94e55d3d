// src/handlers/mod.rs

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod modules;
pub mod notifications;
pub mod quizzes;
pub mod students;
pub mod tasks;
pub mod teachers;

use sqlx::SqlitePool;

use crate::error::AppError;

/// Whether a row with the given id exists in `table`.
/// `table` is always a literal from this module tree, never user input.
pub(crate) async fn exists(pool: &SqlitePool, table: &str, id: i64) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {} WHERE id = ?", table))
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
