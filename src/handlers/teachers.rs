// src/handlers/teachers.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::teacher::{CreateTeacherRequest, Teacher, UpdateTeacherRequest},
    utils::hash::hash_password,
};

const TEACHER_COLUMNS: &str = "id, unique_id, name, email, password, created_at";

pub async fn list_teachers(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let teachers = sqlx::query_as::<_, Teacher>(&format!(
        "SELECT {} FROM teachers ORDER BY id",
        TEACHER_COLUMNS
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list teachers: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(teachers))
}

pub async fn get_teacher(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let teacher = sqlx::query_as::<_, Teacher>(&format!(
        "SELECT {} FROM teachers WHERE id = ?",
        TEACHER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Teacher not found".to_string()))?;

    Ok(Json(teacher))
}

/// Creates a teacher account. The password is stored as an Argon2 hash.
pub async fn create_teacher(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hashed_password = hash_password(&payload.password)?;

    let teacher = sqlx::query_as::<_, Teacher>(&format!(
        r#"
        INSERT INTO teachers (unique_id, name, email, password, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        TEACHER_COLUMNS
    ))
    .bind(&payload.unique_id)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&hashed_password)
    .bind(Utc::now())
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        AppError::from_write(
            e,
            &format!("Teacher '{}' already exists", payload.unique_id),
            "Teacher not found",
        )
    })?;

    tracing::info!(teacher_id = teacher.id, "Teacher created");

    Ok((StatusCode::CREATED, Json(teacher)))
}

/// Partial update; absent fields keep their value.
pub async fn update_teacher(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTeacherRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hashed_password = payload.password.as_deref().map(hash_password).transpose()?;

    let teacher = sqlx::query_as::<_, Teacher>(&format!(
        r#"
        UPDATE teachers
        SET name = COALESCE(?, name),
            email = COALESCE(?, email),
            password = COALESCE(?, password)
        WHERE id = ?
        RETURNING {}
        "#,
        TEACHER_COLUMNS
    ))
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&hashed_password)
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Email already in use", "Teacher not found"))?
    .ok_or(AppError::NotFound("Teacher not found".to_string()))?;

    Ok(Json(teacher))
}

/// Deletes a teacher together with their courses.
pub async fn delete_teacher(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM teachers WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Teacher not found".to_string()));
    }

    tracing::info!(teacher_id = id, "Teacher deleted");

    Ok(Json(json!({ "message": "Teacher deleted successfully" })))
}
