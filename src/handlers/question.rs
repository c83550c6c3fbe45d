// src/handlers/question.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::{SqlitePool, types::Json as SqlJson};
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{
        CreateQuestionRequest, Question, QuestionListParams, QuestionStatus,
        UpdateQuestionStatusRequest,
    },
    utils::html::clean_html,
};

const QUESTION_COLUMNS: &str =
    "id, course_id, title, content, question_type, status, correct_answer, created_at";

async fn find_question(pool: &SqlitePool, id: i64) -> Result<Question, AppError> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {} FROM questions WHERE id = ?",
        QUESTION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))
}

/// Lists the questions of a course, optionally filtered by status.
pub async fn list_questions(
    State(pool): State<SqlitePool>,
    Path(course_id): Path<i64>,
    Query(params): Query<QuestionListParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = match params.status {
        Some(status) => {
            sqlx::query_as::<_, Question>(&format!(
                "SELECT {} FROM questions WHERE course_id = ? AND status = ? ORDER BY id",
                QUESTION_COLUMNS
            ))
            .bind(course_id)
            .bind(status)
            .fetch_all(&pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Question>(&format!(
                "SELECT {} FROM questions WHERE course_id = ? ORDER BY id",
                QUESTION_COLUMNS
            ))
            .bind(course_id)
            .fetch_all(&pool)
            .await?
        }
    };

    Ok(Json(questions))
}

/// Adds a question to the course's item bank.
///
/// * Content is sanitized before it is stored.
/// * Every topic must belong to the same course.
pub async fn create_question(
    State(pool): State<SqlitePool>,
    Path(course_id): Path<i64>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut tx = pool.begin().await?;

    sqlx::query_scalar::<_, i64>("SELECT id FROM courses WHERE id = ?")
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))?;

    let content = clean_html(&payload.content);
    let status = payload.status.unwrap_or(QuestionStatus::Available);
    let question_type = payload.correct_answer.question_type();
    let created_at = Utc::now();

    let id = sqlx::query(
        r#"
        INSERT INTO questions (course_id, title, content, question_type, status, correct_answer, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(course_id)
    .bind(&payload.title)
    .bind(&content)
    .bind(question_type)
    .bind(status)
    .bind(SqlJson(&payload.correct_answer))
    .bind(created_at)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for topic_id in &payload.topic_ids {
        let topic_course = sqlx::query_scalar::<_, i64>("SELECT course_id FROM topics WHERE id = ?")
            .bind(topic_id)
            .fetch_optional(&mut *tx)
            .await?;

        if topic_course != Some(course_id) {
            return Err(AppError::BadRequest(format!(
                "Topic {} does not belong to course {}",
                topic_id, course_id
            )));
        }

        sqlx::query("INSERT OR IGNORE INTO question_topics (question_id, topic_id) VALUES (?, ?)")
            .bind(id)
            .bind(topic_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(Question {
            id,
            course_id: Some(course_id),
            title: payload.title,
            content,
            question_type,
            status,
            correct_answer: SqlJson(payload.correct_answer),
            created_at,
        }),
    ))
}

pub async fn get_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(find_question(&pool, id).await?))
}

pub async fn update_question_status(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuestionStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("UPDATE questions SET status = ? WHERE id = ?")
        .bind(payload.status)
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Question {} not found", id)));
    }

    Ok(Json(find_question(&pool, id).await?))
}

/// Deletes a question. Questions used in a quiz are kept.
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    find_question(&pool, id).await?;

    let uses = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quiz_questions WHERE question_id = ?")
        .bind(id)
        .fetch_one(&pool)
        .await?;
    if uses > 0 {
        return Err(AppError::Conflict(format!(
            "Question {} is used in {} quizzes",
            id, uses
        )));
    }

    sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
