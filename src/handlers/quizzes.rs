// src/handlers/quizzes.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use super::exists;
use crate::{
    error::AppError,
    models::{
        quiz::{PublicQuiz, QuizPayload},
        result::{StudentResultParams, SubmitQuizRequest},
    },
    repositories::QuizRepository,
    services::QuizResultService,
};

/// Creates a quiz with its questions and options in one transaction.
pub async fn create_quiz(
    State(quizzes): State<Arc<dyn QuizRepository>>,
    Json(payload): Json<QuizPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let module_id = payload
        .module_id
        .ok_or(AppError::BadRequest("module_id is required".to_string()))?;

    let quiz = quizzes.create(module_id, &payload).await?;

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// The full quiz, answer key included. Teacher-facing.
pub async fn get_quiz(
    State(quizzes): State<Arc<dyn QuizRepository>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

/// The quiz as a student sees it: no correctness flags, no canonical answers.
pub async fn take_quiz(
    State(quizzes): State<Arc<dyn QuizRepository>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quizzes
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(PublicQuiz::from(&quiz)))
}

/// Replaces name, description and the whole question set.
pub async fn replace_quiz(
    State(quizzes): State<Arc<dyn QuizRepository>>,
    Path(id): Path<i64>,
    Json(payload): Json<QuizPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quiz = quizzes
        .replace(id, &payload)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

pub async fn delete_quiz(
    State(quizzes): State<Arc<dyn QuizRepository>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !quizzes.delete(id).await? {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    tracing::info!(quiz_id = id, "Quiz deleted");

    Ok(Json(json!({ "message": "Quiz deleted successfully" })))
}

pub async fn list_quizzes_by_module(
    State(pool): State<SqlitePool>,
    State(quizzes): State<Arc<dyn QuizRepository>>,
    Path(module_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "modules", module_id).await? {
        return Err(AppError::NotFound("Module not found".to_string()));
    }

    Ok(Json(quizzes.list_by_module(module_id).await?))
}

pub async fn list_quizzes_by_course(
    State(quizzes): State<Arc<dyn QuizRepository>>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !quizzes.course_exists(course_id).await? {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    Ok(Json(quizzes.list_by_course(course_id).await?))
}

/// Grades a submission and stores it as the student's result.
///
/// A body that is not valid JSON for the request shape is a 400, like
/// every other invalid submission.
pub async fn submit_quiz(
    State(service): State<QuizResultService>,
    Path(id): Path<i64>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let receipt = service.submit(id, payload).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// With `student_id`: that student's graded result. Without: every
/// stored result of the quiz (gradebook view).
pub async fn get_quiz_results(
    State(service): State<QuizResultService>,
    Path(id): Path<i64>,
    Query(params): Query<StudentResultParams>,
) -> Result<Response, AppError> {
    let response = match params.student_id {
        Some(student_id) => Json(service.student_result(id, student_id).await?).into_response(),
        None => Json(service.quiz_results(id).await?).into_response(),
    };
    Ok(response)
}

pub async fn quiz_summary(
    State(service): State<QuizResultService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(service.quiz_summary(id).await?))
}

pub async fn student_course_scores(
    State(service): State<QuizResultService>,
    Path((course_id, student_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let scores = service.student_course_scores(course_id, student_id).await?;
    Ok(Json(scores))
}
