// src/models/student.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'students' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: i64,
    /// Identifier students use to open their quizzes.
    pub unique_id: String,
    pub name: String,
    pub email: Option<String>,
    #[serde(skip)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[serde(alias = "uniqueId")]
    #[validate(length(min = 3, max = 50, message = "Unique id must be between 3 and 50 characters."))]
    pub unique_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 4, max = 128, message = "Password length must be between 4 and 128 characters."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// `null` removes the address.
    #[validate(email)]
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub email: Option<Option<String>>,
    #[validate(length(min = 4, max = 128))]
    pub password: Option<String>,
}

/// DTO for enrolling a student in a course.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    #[serde(alias = "courseId")]
    pub course_id: i64,
}
