// src/handlers/courses.rs

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
    models::{
        course::{Course, CourseDetail, CreateCourseRequest, UpdateCourseRequest},
        course_module::Module,
        student::Student,
        teacher::Teacher,
    },
    services::QuizResultService,
    utils::html::clean_html,
};

const COURSE_COLUMNS: &str = "id, course_name, description, teacher_id, created_at";

pub async fn list_courses(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let courses = sqlx::query_as::<_, Course>(&format!(
        "SELECT {} FROM courses ORDER BY id",
        COURSE_COLUMNS
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list courses: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(courses))
}

/// A course with its teacher, modules and enrolled students.
pub async fn get_course(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let course = sqlx::query_as::<_, Course>(&format!(
        "SELECT {} FROM courses WHERE id = ?",
        COURSE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Course not found".to_string()))?;

    let teacher = sqlx::query_as::<_, Teacher>(
        "SELECT id, unique_id, name, email, password, created_at FROM teachers WHERE id = ?",
    )
    .bind(course.teacher_id)
    .fetch_optional(&pool)
    .await?;

    let modules = sqlx::query_as::<_, Module>(
        "SELECT id, module_name, description, course_id FROM modules WHERE course_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT s.id, s.unique_id, s.name, s.email, s.password, s.created_at
        FROM students s
        JOIN course_students cs ON cs.student_id = s.id
        WHERE cs.course_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(CourseDetail {
        course,
        teacher,
        modules,
        students,
    }))
}

pub async fn list_courses_by_teacher(
    State(pool): State<SqlitePool>,
    Path(teacher_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "teachers", teacher_id).await? {
        return Err(AppError::NotFound("Teacher not found".to_string()));
    }

    let courses = sqlx::query_as::<_, Course>(&format!(
        "SELECT {} FROM courses WHERE teacher_id = ? ORDER BY id",
        COURSE_COLUMNS
    ))
    .bind(teacher_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(courses))
}

/// Courses a student is enrolled in. 404 when the student does not exist
/// or is not enrolled anywhere.
pub async fn list_courses_by_student(
    State(pool): State<SqlitePool>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "students", student_id).await? {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    let courses = sqlx::query_as::<_, Course>(
        r#"
        SELECT c.id, c.course_name, c.description, c.teacher_id, c.created_at
        FROM courses c
        JOIN course_students cs ON cs.course_id = c.id
        WHERE cs.student_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await?;

    if courses.is_empty() {
        return Err(AppError::NotFound("No courses found for this student".to_string()));
    }

    Ok(Json(courses))
}

pub async fn create_course(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let description = payload.description.as_deref().map(clean_html);

    let course = sqlx::query_as::<_, Course>(&format!(
        r#"
        INSERT INTO courses (course_name, description, teacher_id, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING {}
        "#,
        COURSE_COLUMNS
    ))
    .bind(&payload.course_name)
    .bind(&description)
    .bind(payload.teacher_id)
    .bind(Utc::now())
    .fetch_one(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Course already exists", "Teacher not found"))?;

    tracing::info!(course_id = course.id, teacher_id = course.teacher_id, "Course created");

    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update_course(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let description = payload
        .description
        .as_ref()
        .map(|d| d.as_deref().map(clean_html));

    let course = sqlx::query_as::<_, Course>(&format!(
        r#"
        UPDATE courses
        SET course_name = COALESCE(?, course_name),
            description = CASE WHEN ? THEN ? ELSE description END,
            teacher_id = COALESCE(?, teacher_id)
        WHERE id = ?
        RETURNING {}
        "#,
        COURSE_COLUMNS
    ))
    .bind(&payload.course_name)
    .bind(description.is_some())
    .bind(description.flatten())
    .bind(payload.teacher_id)
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Course already exists", "Teacher not found"))?
    .ok_or(AppError::NotFound("Course not found".to_string()))?;

    Ok(Json(course))
}

/// Deletes a course with its modules, quizzes and results.
pub async fn delete_course(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    tracing::info!(course_id = id, "Course deleted");

    Ok(Json(json!({ "message": "Course deleted successfully" })))
}

/// Total and average score of every quiz in the course.
pub async fn course_results(
    State(service): State<QuizResultService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rollup = service.course_results(id).await?;
    Ok(Json(rollup))
}
