// src/handlers/notifications.rs

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
    models::notification::{CreateNotificationRequest, Notification},
    utils::html::clean_html,
};

const NOTIFICATION_COLUMNS: &str = "id, student_id, message, is_read, created_at";

/// Sends a notification to a student. The message is sanitized before
/// storage since the dashboard renders it as HTML.
pub async fn create_notification(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let message = clean_html(&payload.message);
    if message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is empty after sanitization".to_string()));
    }

    let notification = sqlx::query_as::<_, Notification>(&format!(
        r#"
        INSERT INTO notifications (student_id, message, is_read, created_at)
        VALUES (?, ?, 0, ?)
        RETURNING {}
        "#,
        NOTIFICATION_COLUMNS
    ))
    .bind(payload.student_id)
    .bind(&message)
    .bind(Utc::now())
    .fetch_one(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Notification already exists", "Student not found"))?;

    tracing::info!(
        notification_id = notification.id,
        student_id = notification.student_id,
        "Notification sent"
    );

    Ok((StatusCode::CREATED, Json(notification)))
}

pub async fn get_notification(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let notification = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {} FROM notifications WHERE id = ?",
        NOTIFICATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Notification not found".to_string()))?;

    Ok(Json(notification))
}

/// A student's notifications, newest first.
pub async fn list_notifications_by_student(
    State(pool): State<SqlitePool>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "students", student_id).await? {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    let notifications = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {} FROM notifications WHERE student_id = ? ORDER BY created_at DESC, id DESC",
        NOTIFICATION_COLUMNS
    ))
    .bind(student_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(notifications))
}

pub async fn mark_notification_read(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let notification = sqlx::query_as::<_, Notification>(&format!(
        "UPDATE notifications SET is_read = 1 WHERE id = ? RETURNING {}",
        NOTIFICATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Notification not found".to_string()))?;

    Ok(Json(notification))
}

pub async fn delete_notification(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }

    Ok(Json(json!({ "message": "Notification deleted successfully" })))
}
