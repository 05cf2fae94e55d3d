// src/models/task.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'tasks' table in the database.
/// Serialized in camelCase, the shape the dashboard consumes.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub task_name: String,
    pub task_type: String,
    pub due_date: Option<DateTime<Utc>>,
    pub module_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub task_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub task_type: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub module_id: Option<i64>,
}

/// Partial update. `dueDate` and `moduleId` accept `null` to clear them.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub task_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub task_type: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub module_id: Option<Option<i64>>,
}
