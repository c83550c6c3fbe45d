// src/models/course.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_acronym, validate_not_blank};

/// Where a course comes from: the school's own catalogue or an external one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseType {
    Tecnico,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Active,
    Inactive,
}

/// Represents the 'courses' table in the database.
/// A course exclusively owns its topics and executions.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub course_type: CourseType,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
}

/// Represents the 'course_executions' table: one offering of a course in an academic term.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CourseExecution {
    pub id: i64,
    pub course_id: i64,
    pub acronym: String,
    pub academic_term: String,
    pub course_type: CourseType,
    pub status: ExecutionStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Execution joined with its course name and quiz/student counts.
#[derive(Debug, Serialize, FromRow)]
pub struct CourseExecutionDetails {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub acronym: String,
    pub academic_term: String,
    pub course_type: CourseType,
    pub status: ExecutionStatus,
    pub number_of_quizzes: i64,
    pub number_of_students: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(
        length(min = 1, max = 200),
        custom(function = validate_not_blank)
    )]
    pub name: String,
    pub course_type: CourseType,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(
        length(min = 1, max = 100),
        custom(function = validate_not_blank)
    )]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseExecutionRequest {
    #[validate(length(min = 1, max = 20), custom(function = validate_acronym))]
    pub acronym: String,
    #[validate(
        length(min = 1, max = 50),
        custom(function = validate_not_blank)
    )]
    pub academic_term: String,
}

/// DTO for opening an execution for students outside the institution.
/// External executions start inactive.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExternalExecutionRequest {
    pub course_id: i64,
    #[validate(length(min = 1, max = 20), custom(function = validate_acronym))]
    pub acronym: String,
    #[validate(
        length(min = 1, max = 50),
        custom(function = validate_not_blank)
    )]
    pub academic_term: String,
}
