// src/models/course_module.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'modules' table: a grouping of quizzes and assignments
/// within a course.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: i64,
    pub module_name: String,
    pub description: Option<String>,
    pub course_id: i64,
}

/// Both fields are optional at the type level so that a missing one is
/// answered with 400 and a readable message.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateModuleRequest {
    #[validate(length(min = 1, max = 200))]
    pub module_name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(alias = "courseId")]
    pub course_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateModuleRequest {
    #[validate(length(min = 1, max = 200))]
    pub module_name: Option<String>,
    #[validate(length(max = 5000))]
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub description: Option<Option<String>>,
}
