// src/handlers/assignments.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use super::exists;
use crate::{
    error::AppError,
    models::assignment::{Assignment, CreateAssignmentRequest, UpdateAssignmentRequest},
};

const ASSIGNMENT_COLUMNS: &str = "id, assignment_name, description, module_id, due_date";

pub async fn list_assignments(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let assignments = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {} FROM assignments ORDER BY id",
        ASSIGNMENT_COLUMNS
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list assignments: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(assignments))
}

pub async fn get_assignment(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {} FROM assignments WHERE id = ?",
        ASSIGNMENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Assignment not found".to_string()))?;

    Ok(Json(assignment))
}

pub async fn list_assignments_by_module(
    State(pool): State<SqlitePool>,
    Path(module_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "modules", module_id).await? {
        return Err(AppError::NotFound("Module not found".to_string()));
    }

    let assignments = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {} FROM assignments WHERE module_id = ? ORDER BY due_date IS NULL, due_date, id",
        ASSIGNMENT_COLUMNS
    ))
    .bind(module_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(assignments))
}

pub async fn create_assignment(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateAssignmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        r#"
        INSERT INTO assignments (assignment_name, description, module_id, due_date)
        VALUES (?, ?, ?, ?)
        RETURNING {}
        "#,
        ASSIGNMENT_COLUMNS
    ))
    .bind(&payload.assignment_name)
    .bind(&payload.description)
    .bind(payload.module_id)
    .bind(payload.due_date)
    .fetch_one(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Assignment already exists", "Module not found"))?;

    tracing::info!(assignment_id = assignment.id, module_id = assignment.module_id, "Assignment created");

    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn update_assignment(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAssignmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        r#"
        UPDATE assignments
        SET assignment_name = COALESCE(?, assignment_name),
            description = CASE WHEN ? THEN ? ELSE description END,
            due_date = CASE WHEN ? THEN ? ELSE due_date END
        WHERE id = ?
        RETURNING {}
        "#,
        ASSIGNMENT_COLUMNS
    ))
    .bind(&payload.assignment_name)
    .bind(payload.description.is_some())
    .bind(payload.description.flatten())
    .bind(payload.due_date.is_some())
    .bind(payload.due_date.flatten())
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Assignment not found".to_string()))?;

    Ok(Json(assignment))
}

pub async fn delete_assignment(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM assignments WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Assignment not found".to_string()));
    }

    Ok(Json(json!({ "message": "Assignment deleted successfully" })))
}
