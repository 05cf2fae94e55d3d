// src/handlers/tasks.rs

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

use super::exists;
use crate::{
    error::AppError,
    models::task::{CreateTaskRequest, Task, UpdateTaskRequest},
};

const TASK_COLUMNS: &str = "id, task_name, task_type, due_date, module_id, created_at";

pub async fn list_tasks(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks ORDER BY due_date IS NULL, due_date, id",
        TASK_COLUMNS
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list tasks: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(tasks))
}

pub async fn create_task(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (Some(task_name), Some(task_type)) = (&payload.task_name, &payload.task_type) else {
        return Err(AppError::BadRequest(
            "taskName and taskType are required".to_string(),
        ));
    };

    let task = sqlx::query_as::<_, Task>(&format!(
        r#"
        INSERT INTO tasks (task_name, task_type, due_date, module_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        TASK_COLUMNS
    ))
    .bind(task_name)
    .bind(task_type)
    .bind(payload.due_date)
    .bind(payload.module_id)
    .bind(Utc::now())
    .fetch_one(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Task already exists", "Module not found"))?;

    tracing::info!(task_id = task.id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS))
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Partial update; `null` clears the due date or detaches the task from
/// its module.
pub async fn update_task(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let task = sqlx::query_as::<_, Task>(&format!(
        r#"
        UPDATE tasks
        SET task_name = COALESCE(?, task_name),
            task_type = COALESCE(?, task_type),
            due_date = CASE WHEN ? THEN ? ELSE due_date END,
            module_id = CASE WHEN ? THEN ? ELSE module_id END
        WHERE id = ?
        RETURNING {}
        "#,
        TASK_COLUMNS
    ))
    .bind(&payload.task_name)
    .bind(&payload.task_type)
    .bind(payload.due_date.is_some())
    .bind(payload.due_date.flatten())
    .bind(payload.module_id.is_some())
    .bind(payload.module_id.flatten())
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Task already exists", "Module not found"))?
    .ok_or(AppError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

pub async fn delete_task(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    Ok(Json(json!({ "message": "Task deleted successfully" })))
}

pub async fn list_tasks_by_module(
    State(pool): State<SqlitePool>,
    Path(module_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "modules", module_id).await? {
        return Err(AppError::NotFound("Module not found".to_string()));
    }

    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE module_id = ? ORDER BY due_date IS NULL, due_date, id",
        TASK_COLUMNS
    ))
    .bind(module_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(tasks))
}

/// Tasks attached to any module of the course. 404 when there are none.
pub async fn list_tasks_by_course(
    State(pool): State<SqlitePool>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT t.id, t.task_name, t.task_type, t.due_date, t.module_id, t.created_at
        FROM tasks t
        JOIN modules m ON t.module_id = m.id
        WHERE m.course_id = ?
        ORDER BY t.due_date IS NULL, t.due_date, t.id
        "#,
    )
    .bind(course_id)
    .fetch_all(&pool)
    .await?;

    if tasks.is_empty() {
        return Err(AppError::NotFound("No tasks found for this course".to_string()));
    }

    Ok(Json(tasks))
}
