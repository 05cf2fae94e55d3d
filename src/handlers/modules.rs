// src/handlers/modules.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use super::exists;
use crate::{
    error::AppError,
    models::course_module::{CreateModuleRequest, Module, UpdateModuleRequest},
};

const MODULE_COLUMNS: &str = "id, module_name, description, course_id";

pub async fn list_modules(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let modules = sqlx::query_as::<_, Module>(&format!(
        "SELECT {} FROM modules ORDER BY id",
        MODULE_COLUMNS
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list modules: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(modules))
}

pub async fn get_module(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let module = sqlx::query_as::<_, Module>(&format!(
        "SELECT {} FROM modules WHERE id = ?",
        MODULE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Module not found".to_string()))?;

    Ok(Json(module))
}

pub async fn list_modules_by_course(
    State(pool): State<SqlitePool>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !exists(&pool, "courses", course_id).await? {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    let modules = sqlx::query_as::<_, Module>(&format!(
        "SELECT {} FROM modules WHERE course_id = ? ORDER BY id",
        MODULE_COLUMNS
    ))
    .bind(course_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(modules))
}

pub async fn create_module(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateModuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (Some(module_name), Some(course_id)) = (&payload.module_name, payload.course_id) else {
        return Err(AppError::BadRequest(
            "module_name and course_id are required".to_string(),
        ));
    };

    let module = sqlx::query_as::<_, Module>(&format!(
        "INSERT INTO modules (module_name, description, course_id) VALUES (?, ?, ?) RETURNING {}",
        MODULE_COLUMNS
    ))
    .bind(module_name)
    .bind(&payload.description)
    .bind(course_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| AppError::from_write(e, "Module already exists", "Course not found"))?;

    tracing::info!(module_id = module.id, course_id, "Module created");

    Ok((StatusCode::CREATED, Json(module)))
}

pub async fn update_module(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateModuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let module = sqlx::query_as::<_, Module>(&format!(
        r#"
        UPDATE modules
        SET module_name = COALESCE(?, module_name),
            description = CASE WHEN ? THEN ? ELSE description END
        WHERE id = ?
        RETURNING {}
        "#,
        MODULE_COLUMNS
    ))
    .bind(&payload.module_name)
    .bind(payload.description.is_some())
    .bind(payload.description.flatten())
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Module not found".to_string()))?;

    Ok(Json(module))
}

pub async fn delete_module(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM modules WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Module not found".to_string()));
    }

    Ok(Json(json!({ "message": "Module deleted successfully" })))
}
