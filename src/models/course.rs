// src/models/course.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::{course_module::Module, student::Student, teacher::Teacher};

/// Represents the 'courses' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: i64,
    pub course_name: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A course with its teacher, modules and enrolled students.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub teacher: Option<Teacher>,
    pub modules: Vec<Module>,
    pub students: Vec<Student>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Course name must be between 1 and 200 characters."))]
    pub course_name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(alias = "teacherId")]
    pub teacher_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub course_name: Option<String>,
    #[validate(length(max = 5000))]
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub description: Option<Option<String>>,
    #[serde(alias = "teacherId")]
    pub teacher_id: Option<i64>,
}
