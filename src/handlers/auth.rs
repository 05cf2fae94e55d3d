// src/handlers/auth.rs

use axum::{
    Json,
    extract::{Extension, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::teacher::{LoginRequest, Teacher},
    utils::{
        hash::verify_password,
        jwt::{Claims, TEACHER_ROLE, sign_jwt},
    },
};

/// Authenticates a teacher and returns a session token.
///
/// Unknown ids and wrong passwords are answered with the same 401 so
/// that the endpoint does not reveal which accounts exist.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let teacher = sqlx::query_as::<_, Teacher>(
        "SELECT id, unique_id, name, email, password, created_at FROM teachers WHERE unique_id = ?",
    )
    .bind(&payload.unique_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to look up teacher: {:?}", e);
        AppError::from(e)
    })?;

    let teacher = match teacher {
        Some(teacher) if verify_password(&payload.password, &teacher.password)? => teacher,
        _ => {
            tracing::warn!(unique_id = %payload.unique_id, "Rejected login attempt");
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        }
    };

    let token = sign_jwt(
        teacher.id,
        TEACHER_ROLE,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    tracing::info!(teacher_id = teacher.id, "Teacher logged in");

    Ok(Json(json!({
        "message": "Login successful",
        "teacherId": teacher.id,
        "session_token": token,
        "type": TEACHER_ROLE,
    })))
}

/// Returns the teacher behind the session token.
pub async fn me(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let teacher_id = claims.teacher_id()?;

    let teacher = sqlx::query_as::<_, Teacher>(
        "SELECT id, unique_id, name, email, password, created_at FROM teachers WHERE id = ?",
    )
    .bind(teacher_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Teacher not found".to_string()))?;

    Ok(Json(teacher))
}
