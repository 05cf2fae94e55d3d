// src/handlers/students.rs

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
    models::student::{CreateStudentRequest, EnrollRequest, Student, UpdateStudentRequest},
    services::QuizResultService,
    utils::hash::hash_password,
};

const STUDENT_COLUMNS: &str = "id, unique_id, name, email, password, created_at";

pub async fn list_students(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {} FROM students ORDER BY id",
        STUDENT_COLUMNS
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list students: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(students))
}

pub async fn get_student(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {} FROM students WHERE id = ?",
        STUDENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(student))
}

/// Looks a student up by the identifier they sign in with.
pub async fn get_student_by_unique_id(
    State(pool): State<SqlitePool>,
    Path(unique_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {} FROM students WHERE unique_id = ?",
        STUDENT_COLUMNS
    ))
    .bind(&unique_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(student))
}

/// Students enrolled in a course. 404 when the course does not exist or
/// nobody is enrolled.
pub async fn list_students_by_course(
    State(pool): State<SqlitePool>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "courses", course_id).await? {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT s.id, s.unique_id, s.name, s.email, s.password, s.created_at
        FROM students s
        JOIN course_students cs ON cs.student_id = s.id
        WHERE cs.course_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(course_id)
    .fetch_all(&pool)
    .await?;

    if students.is_empty() {
        return Err(AppError::NotFound("No students found for this course".to_string()));
    }

    Ok(Json(students))
}

pub async fn create_student(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hashed_password = hash_password(&payload.password)?;

    let student = sqlx::query_as::<_, Student>(&format!(
        r#"
        INSERT INTO students (unique_id, name, email, password, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        STUDENT_COLUMNS
    ))
    .bind(&payload.unique_id)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&hashed_password)
    .bind(Utc::now())
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        AppError::from_write(
            e,
            &format!("Student '{}' already exists", payload.unique_id),
            "Student not found",
        )
    })?;

    tracing::info!(student_id = student.id, "Student created");

    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn update_student(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hashed_password = payload.password.as_deref().map(hash_password).transpose()?;

    let student = sqlx::query_as::<_, Student>(&format!(
        r#"
        UPDATE students
        SET name = COALESCE(?, name),
            email = CASE WHEN ? THEN ? ELSE email END,
            password = COALESCE(?, password)
        WHERE id = ?
        RETURNING {}
        "#,
        STUDENT_COLUMNS
    ))
    .bind(&payload.name)
    .bind(payload.email.is_some())
    .bind(payload.email.flatten())
    .bind(&hashed_password)
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Email already in use", "Student not found"))?
    .ok_or(AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(student))
}

/// Deletes a student; enrollments, results and notifications go with them.
pub async fn delete_student(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    tracing::info!(student_id = id, "Student deleted");

    Ok(Json(json!({ "message": "Student deleted successfully" })))
}

/// Enrolls a student in a course. Enrolling twice is a no-op.
pub async fn enroll_student(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<EnrollRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "students", id).await? {
        return Err(AppError::NotFound("Student not found".to_string()));
    }
    if !exists(&pool, "courses", payload.course_id).await? {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    sqlx::query(
        "INSERT INTO course_students (course_id, student_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
    )
    .bind(payload.course_id)
    .bind(id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to enroll student: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!(student_id = id, course_id = payload.course_id, "Student enrolled");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Student enrolled successfully" })),
    ))
}

/// Every stored quiz result of a student.
pub async fn list_student_results(
    State(service): State<QuizResultService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(service.student_results(id).await?))
}
