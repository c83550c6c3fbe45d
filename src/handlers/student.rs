// src/handlers/student.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::student::{CreateStudentRequest, Student},
};

pub async fn list_students(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let students = sqlx::query_as::<_, Student>(
        "SELECT id, name, username, created_at FROM students ORDER BY id",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(students))
}

pub async fn create_student(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created_at = Utc::now();

    let id = sqlx::query("INSERT INTO students (name, username, created_at) VALUES (?, ?, ?)")
        .bind(&payload.name)
        .bind(&payload.username)
        .bind(created_at)
        .execute(&pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("Username '{}' already exists", payload.username))
            }
            other => other,
        })?
        .last_insert_rowid();

    Ok((
        StatusCode::CREATED,
        Json(Student {
            id,
            name: payload.name,
            username: payload.username,
            created_at,
        }),
    ))
}
