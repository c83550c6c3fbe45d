// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::{models::answer::CorrectAnswerDetails, utils::validation::validate_not_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    CodeFillIn,
    CodeOrder,
}

/// Lifecycle of a question in the item bank.
/// Only `Available` questions are drawn into generated quizzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionStatus {
    Available,
    Disabled,
    Removed,
    Submitted,
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// Owning course. Cleared when the course is deleted; the question itself stays.
    pub course_id: Option<i64>,

    pub title: String,

    /// The statement shown to students (sanitized HTML).
    pub content: String,

    pub question_type: QuestionType,

    pub status: QuestionStatus,

    /// The correct answer, stored as JSON.
    pub correct_answer: Json<CorrectAnswerDetails>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[validate(custom(function = validate_correct_answer))]
    pub correct_answer: CorrectAnswerDetails,
    /// Defaults to `Available`.
    pub status: Option<QuestionStatus>,
    #[serde(default)]
    pub topic_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuestionStatusRequest {
    pub status: QuestionStatus,
}

#[derive(Debug, Deserialize)]
pub struct QuestionListParams {
    pub status: Option<QuestionStatus>,
}

fn validate_correct_answer(details: &CorrectAnswerDetails) -> Result<(), validator::ValidationError> {
    match details {
        CorrectAnswerDetails::MultipleChoice { .. } => Ok(()),
        CorrectAnswerDetails::CodeFillIn { correct_options } if correct_options.is_empty() => Err(
            validator::ValidationError::new("fill_in_needs_at_least_one_spot"),
        ),
        CorrectAnswerDetails::CodeOrder { correct_order } if correct_order.is_empty() => Err(
            validator::ValidationError::new("code_order_needs_at_least_one_slot"),
        ),
        _ => Ok(()),
    }
}
