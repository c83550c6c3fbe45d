// src/handlers/execution.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::course::{find_course, insert_execution},
    models::{
        course::{
            CourseExecutionDetails, CourseType, CreateExternalExecutionRequest, ExecutionStatus,
            Topic,
        },
        question::QuestionStatus,
        student::{EnrollStudentRequest, Student},
    },
    services::quiz::execution_course_id,
};

const EXECUTION_DETAILS: &str = r#"
    SELECT
        ce.id,
        ce.course_id,
        c.name,
        ce.acronym,
        ce.academic_term,
        ce.course_type,
        ce.status,
        (SELECT COUNT(*) FROM quizzes q WHERE q.course_execution_id = ce.id) AS number_of_quizzes,
        (SELECT COUNT(*) FROM enrollments e WHERE e.course_execution_id = ce.id) AS number_of_students
    FROM course_executions ce
    JOIN courses c ON c.id = ce.course_id
"#;

pub async fn list_executions(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let executions = sqlx::query_as::<_, CourseExecutionDetails>(&format!(
        "{} ORDER BY ce.id",
        EXECUTION_DETAILS
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list course executions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(executions))
}

async fn find_execution(pool: &SqlitePool, id: i64) -> Result<CourseExecutionDetails, AppError> {
    sqlx::query_as::<_, CourseExecutionDetails>(&format!("{} WHERE ce.id = ?", EXECUTION_DETAILS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course execution {} not found", id)))
}

pub async fn get_execution(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(find_execution(&pool, id).await?))
}

/// Opens an execution of type EXTERNAL for an existing course.
/// It stays inactive, and closed to enrollment, until activated.
pub async fn create_external_execution(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateExternalExecutionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    find_course(&pool, payload.course_id).await?;

    let execution = insert_execution(
        &pool,
        payload.course_id,
        &payload.acronym,
        &payload.academic_term,
        CourseType::External,
        ExecutionStatus::Inactive,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(execution)))
}

async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: ExecutionStatus,
) -> Result<CourseExecutionDetails, AppError> {
    let result = sqlx::query("UPDATE course_executions SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Course execution {} not found", id)));
    }

    tracing::info!("Execution {} is now {:?}", id, status);
    find_execution(pool, id).await
}

pub async fn activate_execution(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(set_status(&pool, id, ExecutionStatus::Active).await?))
}

pub async fn deactivate_execution(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(set_status(&pool, id, ExecutionStatus::Inactive).await?))
}

/// Deletes an execution along with its quizzes and enrollments.
pub async fn delete_execution(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM course_executions WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Course execution {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_students(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    execution_course_id(&pool, id).await?;

    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT s.id, s.name, s.username, s.created_at
        FROM students s
        JOIN enrollments e ON e.student_id = s.id
        WHERE e.course_execution_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(students))
}

/// Enrolls a student. Inactive executions accept no enrollments.
pub async fn enroll_student(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<EnrollStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let execution = find_execution(&pool, id).await?;
    if execution.status == ExecutionStatus::Inactive {
        return Err(AppError::Conflict(format!(
            "Course execution {} is inactive",
            id
        )));
    }

    sqlx::query_scalar::<_, i64>("SELECT id FROM students WHERE id = ?")
        .bind(payload.student_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {} not found", payload.student_id)))?;

    let enrolled = sqlx::query_scalar::<_, i64>(
        "SELECT student_id FROM enrollments WHERE course_execution_id = ? AND student_id = ?",
    )
    .bind(id)
    .bind(payload.student_id)
    .fetch_optional(&pool)
    .await?;
    if enrolled.is_some() {
        return Err(AppError::Conflict(format!(
            "Student {} is already enrolled in execution {}",
            payload.student_id, id
        )));
    }

    sqlx::query("INSERT INTO enrollments (course_execution_id, student_id) VALUES (?, ?)")
        .bind(id)
        .bind(payload.student_id)
        .execute(&pool)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Replaces the names and usernames of every enrolled student.
pub async fn anonymize_students(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    execution_course_id(&pool, id).await?;

    let result = sqlx::query(
        r#"
        UPDATE students
        SET name = 'STUDENT ' || id, username = 'anonymous-' || id
        WHERE id IN (SELECT student_id FROM enrollments WHERE course_execution_id = ?)
        "#,
    )
    .bind(id)
    .execute(&pool)
    .await?;

    tracing::info!("Anonymized {} students of execution {}", result.rows_affected(), id);

    Ok(Json(serde_json::json!({ "anonymized": result.rows_affected() })))
}

/// Topics of the execution's course that have at least one available question.
pub async fn available_topics(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let course_id = execution_course_id(&pool, id).await?;

    let topics = sqlx::query_as::<_, Topic>(
        r#"
        SELECT DISTINCT t.id, t.course_id, t.name
        FROM topics t
        JOIN question_topics qt ON qt.topic_id = t.id
        JOIN questions q ON q.id = qt.question_id
        WHERE t.course_id = ? AND q.status = ?
        ORDER BY t.name
        "#,
    )
    .bind(course_id)
    .bind(QuestionStatus::Available)
    .fetch_all(&pool)
    .await?;

    Ok(Json(topics))
}
