// src/handlers/course.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::course::{
        Course, CourseExecution, CourseType, CreateCourseExecutionRequest, CreateCourseRequest,
        CreateTopicRequest, ExecutionStatus, Topic,
    },
};

pub(crate) async fn find_course(pool: &SqlitePool, id: i64) -> Result<Course, AppError> {
    sqlx::query_as::<_, Course>(
        "SELECT id, name, course_type, created_at FROM courses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))
}

/// Lists all courses.
pub async fn list_courses(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let courses = sqlx::query_as::<_, Course>(
        "SELECT id, name, course_type, created_at FROM courses ORDER BY id",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list courses: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(courses))
}

pub async fn create_course(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let name = payload.name.trim().to_string();
    let created_at = Utc::now();

    let id = sqlx::query("INSERT INTO courses (name, course_type, created_at) VALUES (?, ?, ?)")
        .bind(&name)
        .bind(payload.course_type)
        .bind(created_at)
        .execute(&pool)
        .await?
        .last_insert_rowid();

    tracing::info!("Created course {} ({})", id, name);

    Ok((
        StatusCode::CREATED,
        Json(Course {
            id,
            name,
            course_type: payload.course_type,
            created_at,
        }),
    ))
}

pub async fn get_course(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(find_course(&pool, id).await?))
}

/// Deletes a course together with its topics and executions.
/// Its questions stay in the bank, detached from any course.
pub async fn delete_course(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Course {} not found", id)));
    }

    tracing::info!("Deleted course {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_topics(
    State(pool): State<SqlitePool>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    find_course(&pool, course_id).await?;

    let topics = sqlx::query_as::<_, Topic>(
        "SELECT id, course_id, name FROM topics WHERE course_id = ? ORDER BY name",
    )
    .bind(course_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(topics))
}

pub async fn create_topic(
    State(pool): State<SqlitePool>,
    Path(course_id): Path<i64>,
    Json(payload): Json<CreateTopicRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    find_course(&pool, course_id).await?;

    let name = payload.name.trim().to_string();
    let id = sqlx::query("INSERT INTO topics (course_id, name) VALUES (?, ?)")
        .bind(course_id)
        .bind(&name)
        .execute(&pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("Topic '{}' already exists in course {}", name, course_id))
            }
            other => other,
        })?
        .last_insert_rowid();

    Ok((StatusCode::CREATED, Json(Topic { id, course_id, name })))
}

/// Stores a new execution of `course_id`.
/// A duplicate (acronym, term, type) within the course is a conflict.
pub(crate) async fn insert_execution(
    pool: &SqlitePool,
    course_id: i64,
    acronym: &str,
    academic_term: &str,
    course_type: CourseType,
    status: ExecutionStatus,
) -> Result<CourseExecution, AppError> {
    let created_at = Utc::now();

    let id = sqlx::query(
        r#"
        INSERT INTO course_executions (course_id, acronym, academic_term, course_type, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(course_id)
    .bind(acronym)
    .bind(academic_term)
    .bind(course_type)
    .bind(status)
    .bind(created_at)
    .execute(pool)
    .await
    .map_err(|e| match AppError::from(e) {
        AppError::Conflict(_) => AppError::Conflict(format!(
            "Course execution {} {} already exists",
            acronym, academic_term
        )),
        other => other,
    })?
    .last_insert_rowid();

    tracing::info!("Created execution {} of course {}", id, course_id);

    Ok(CourseExecution {
        id,
        course_id,
        acronym: acronym.to_string(),
        academic_term: academic_term.to_string(),
        course_type,
        status,
        created_at,
    })
}

/// Opens a new execution of the course. The execution inherits the course type
/// and starts active.
pub async fn create_execution(
    State(pool): State<SqlitePool>,
    Path(course_id): Path<i64>,
    Json(payload): Json<CreateCourseExecutionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let course = find_course(&pool, course_id).await?;

    let execution = insert_execution(
        &pool,
        course_id,
        &payload.acronym,
        &payload.academic_term,
        course.course_type,
        ExecutionStatus::Active,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(execution)))
}
