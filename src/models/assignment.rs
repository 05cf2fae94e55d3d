// src/models/assignment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'assignments' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: i64,
    pub assignment_name: String,
    pub description: Option<String>,
    pub module_id: i64,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub assignment_name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(alias = "moduleId")]
    pub module_id: i64,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssignmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub assignment_name: Option<String>,
    #[validate(length(max = 5000))]
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}
