// src/handlers/answer.rs

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::{SqlitePool, types::Json as SqlJson};
use validator::Validate;

use crate::{
    error::AppError,
    models::answer::{
        AnswerError, AnswerResult, CorrectAnswerDetails, QuestionAnswer, SubmitAnswersRequest,
        SubmitAnswersResponse,
    },
    services::quiz::find_quiz,
};

/// Helper struct for fetching answer keys from the database.
#[derive(sqlx::FromRow)]
struct AnswerKey {
    id: i64,
    sequence: i64,
    correct_answer: SqlJson<CorrectAnswerDetails>,
}

/// Submits a student's answers to a quiz and scores them.
///
/// * The student must be enrolled in the quiz's course execution.
/// * Every answer must carry details and point at a question of this quiz.
/// * A quiz question is answered at most once per student.
/// * Empty answers are stored as incorrect.
/// * All answers are stored in one transaction; one bad answer rejects the lot.
pub async fn submit_answers(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let mut seen = HashSet::new();
    for quiz_question_id in req.answers.iter().filter_map(|a| a.quiz_question_id) {
        if !seen.insert(quiz_question_id) {
            return Err(AppError::BadRequest(format!(
                "Quiz question {} is answered more than once",
                quiz_question_id
            )));
        }
    }

    let quiz = find_quiz(&pool, quiz_id).await?;

    let mut tx = pool.begin().await?;

    sqlx::query_scalar::<_, i64>("SELECT id FROM students WHERE id = ?")
        .bind(req.student_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {} not found", req.student_id)))?;

    let enrolled = sqlx::query_scalar::<_, i64>(
        "SELECT student_id FROM enrollments WHERE course_execution_id = ? AND student_id = ?",
    )
    .bind(quiz.course_execution_id)
    .bind(req.student_id)
    .fetch_optional(&mut *tx)
    .await?;
    if enrolled.is_none() {
        return Err(AppError::Forbidden(format!(
            "Student {} is not enrolled in execution {}",
            req.student_id, quiz.course_execution_id
        )));
    }

    let answered_at = Utc::now();
    let mut results = Vec::with_capacity(req.answers.len());

    for answer in &req.answers {
        let empty = answer.empty_answer()?;
        let details = answer
            .answer_details
            .as_ref()
            .ok_or(AnswerError::MissingDetails)?;
        let quiz_question_id = answer.quiz_question_id.ok_or_else(|| {
            AppError::BadRequest("Every answer must name its quiz question".to_string())
        })?;

        let key = sqlx::query_as::<_, AnswerKey>(
            r#"
            SELECT qq.id, qq.sequence, q.correct_answer
            FROM quiz_questions qq
            JOIN questions q ON q.id = qq.question_id
            WHERE qq.id = ? AND qq.quiz_id = ?
            "#,
        )
        .bind(quiz_question_id)
        .bind(quiz_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Quiz question {} is not part of quiz {}",
                quiz_question_id, quiz_id
            ))
        })?;

        let answered = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM question_answers WHERE quiz_question_id = ? AND student_id = ?",
        )
        .bind(key.id)
        .bind(req.student_id)
        .fetch_optional(&mut *tx)
        .await?;
        if answered.is_some() {
            return Err(AppError::Conflict(format!(
                "Student {} already answered quiz question {}",
                req.student_id, key.id
            )));
        }

        let correct = !empty && details.is_correct(&key.correct_answer);

        let question_answer_id = sqlx::query(
            r#"
            INSERT INTO question_answers (quiz_question_id, student_id, time_taken, answer_details, correct, answered_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(key.id)
        .bind(req.student_id)
        .bind(answer.time_taken)
        .bind(SqlJson(details))
        .bind(correct)
        .bind(answered_at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        results.push(AnswerResult {
            question_answer_id,
            quiz_question_id: key.id,
            sequence: key.sequence,
            empty,
            correct,
        });
    }

    tx.commit().await?;

    let correct_count = results.iter().filter(|r| r.correct).count();
    let total = results.len();
    tracing::info!(
        "Student {} answered quiz {}: {}/{} correct",
        req.student_id,
        quiz_id,
        correct_count,
        total
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitAnswersResponse {
            results,
            correct_count,
            total,
        }),
    ))
}

/// Lists every answer given to the quiz's questions.
pub async fn list_answers(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    find_quiz(&pool, quiz_id).await?;

    let answers = sqlx::query_as::<_, QuestionAnswer>(
        r#"
        SELECT qa.id, qa.quiz_question_id, qa.student_id, qa.time_taken, qa.answer_details, qa.correct, qa.answered_at
        FROM question_answers qa
        JOIN quiz_questions qq ON qq.id = qa.quiz_question_id
        WHERE qq.quiz_id = ?
        ORDER BY qa.student_id, qq.sequence
        "#,
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(answers))
}
