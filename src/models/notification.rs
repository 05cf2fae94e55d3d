// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'notifications' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: i64,
    pub student_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[serde(alias = "studentId")]
    pub student_id: i64,
    #[validate(length(min = 1, max = 1000, message = "Message must be between 1 and 1000 characters."))]
    pub message: String,
}
