// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rand::{SeedableRng, rngs::StdRng};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::DEFAULT_QUIZ_SIZE,
    error::AppError,
    models::quiz::{CreateQuizRequest, GenerateQuizRequest, QuizDto},
    services::quiz as quiz_service,
};

pub async fn list_quizzes(
    State(pool): State<SqlitePool>,
    Path(execution_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = quiz_service::list_execution_quizzes(&pool, execution_id).await?;
    Ok(Json(quizzes))
}

/// Creates a quiz from hand-picked questions of the execution's course.
pub async fn create_quiz(
    State(pool): State<SqlitePool>,
    Path(execution_id): Path<i64>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quiz = quiz_service::create_quiz(&pool, execution_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Generates a random quiz.
///
/// Draws `quiz_size` (default 10) distinct available questions of the
/// execution's course, optionally only from `topic_ids`. Asking for more
/// questions than are available is a 400 and nothing is stored.
pub async fn generate_quiz(
    State(pool): State<SqlitePool>,
    Path(execution_id): Path<i64>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quiz_size = payload.quiz_size.unwrap_or(DEFAULT_QUIZ_SIZE);
    let mut rng = StdRng::from_os_rng();

    let quiz = quiz_service::generate_quiz(
        &pool,
        execution_id,
        &payload.title,
        quiz_size,
        &payload.topic_ids,
        &mut rng,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Returns the quiz with its questions in sequence order.
pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(quiz_service::find_quiz_with_questions(&pool, id).await?))
}

pub async fn update_quiz(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<QuizDto>,
) -> Result<impl IntoResponse, AppError> {
    if payload.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::BadRequest(format!(
            "Quiz id in body does not match path id {}",
            id
        )));
    }

    let quiz = quiz_service::update_quiz(&pool, id, &payload).await?;
    Ok(Json(quiz))
}

pub async fn delete_quiz(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    quiz_service::remove_quiz(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
