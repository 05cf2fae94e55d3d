// src/models/teacher.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'teachers' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: i64,

    /// Login handle (e.g. "teacher001").
    pub unique_id: String,

    pub name: String,

    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new teacher.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeacherRequest {
    #[serde(alias = "uniqueId")]
    #[validate(length(min = 3, max = 50, message = "Unique id must be between 3 and 50 characters."))]
    pub unique_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 4, max = 128, message = "Password length must be between 4 and 128 characters."))]
    pub password: String,
}

/// DTO for updating a teacher. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeacherRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 4, max = 128))]
    pub password: Option<String>,
}

/// DTO for teacher login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "uniqueId")]
    #[validate(length(min = 1, max = 50))]
    pub unique_id: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
