// src/models/answer.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use thiserror::Error;
use validator::Validate;

use crate::models::question::QuestionType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    /// The answer was submitted without any details to inspect.
    #[error("statement answer has no answer details")]
    MissingDetails,
}

/// One filled-in spot of a code fill-in question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FillInOption {
    pub sequence: i64,
    pub option_id: i64,
}

/// Position given to a slot of a code order question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderSlot {
    pub slot_id: i64,
    pub order: i64,
}

/// The correct answer of a question, tagged by question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CorrectAnswerDetails {
    MultipleChoice { correct_option_id: i64 },
    CodeFillIn { correct_options: Vec<FillInOption> },
    CodeOrder { correct_order: Vec<OrderSlot> },
}

impl CorrectAnswerDetails {
    pub fn question_type(&self) -> QuestionType {
        match self {
            CorrectAnswerDetails::MultipleChoice { .. } => QuestionType::MultipleChoice,
            CorrectAnswerDetails::CodeFillIn { .. } => QuestionType::CodeFillIn,
            CorrectAnswerDetails::CodeOrder { .. } => QuestionType::CodeOrder,
        }
    }
}

/// What a student actually answered, tagged by question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatementAnswerDetails {
    MultipleChoice {
        #[serde(default)]
        option_id: Option<i64>,
    },
    CodeFillIn {
        #[serde(default)]
        selected_options: Vec<FillInOption>,
    },
    CodeOrder {
        #[serde(default)]
        ordered_slots: Vec<OrderSlot>,
    },
}

impl StatementAnswerDetails {
    /// True when the student left the question unanswered.
    pub fn is_empty(&self) -> bool {
        match self {
            StatementAnswerDetails::MultipleChoice { option_id } => option_id.is_none(),
            StatementAnswerDetails::CodeFillIn { selected_options } => selected_options.is_empty(),
            StatementAnswerDetails::CodeOrder { ordered_slots } => ordered_slots.is_empty(),
        }
    }

    /// Compares the answer against the question's correct answer.
    /// Details of a different question type never match.
    pub fn is_correct(&self, correct: &CorrectAnswerDetails) -> bool {
        match (self, correct) {
            (
                StatementAnswerDetails::MultipleChoice { option_id },
                CorrectAnswerDetails::MultipleChoice { correct_option_id },
            ) => *option_id == Some(*correct_option_id),
            (
                StatementAnswerDetails::CodeFillIn { selected_options },
                CorrectAnswerDetails::CodeFillIn { correct_options },
            ) => same_set(selected_options, correct_options),
            (
                StatementAnswerDetails::CodeOrder { ordered_slots },
                CorrectAnswerDetails::CodeOrder { correct_order },
            ) => same_set(ordered_slots, correct_order),
            _ => false,
        }
    }
}

fn same_set<T: Ord + Copy>(given: &[T], expected: &[T]) -> bool {
    given.len() == expected.len()
        && given.iter().copied().collect::<BTreeSet<_>>()
            == expected.iter().copied().collect::<BTreeSet<_>>()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub content: String,
}

/// A student's answer to one quiz question as sent by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementAnswer {
    pub time_taken: Option<i64>,
    pub sequence: Option<i64>,
    pub question_answer_id: Option<i64>,
    pub quiz_question_id: Option<i64>,
    pub time_to_submission: Option<i64>,
    pub user_discussion: Option<Discussion>,
    pub answer_details: Option<StatementAnswerDetails>,
}

impl StatementAnswer {
    /// Whether the answer carries no response.
    ///
    /// Fails with `MissingDetails` if no details were attached.
    pub fn empty_answer(&self) -> Result<bool, AnswerError> {
        self.answer_details
            .as_ref()
            .map(StatementAnswerDetails::is_empty)
            .ok_or(AnswerError::MissingDetails)
    }
}

/// Represents the 'question_answers' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionAnswer {
    pub id: i64,
    pub quiz_question_id: i64,
    pub student_id: i64,
    pub time_taken: Option<i64>,
    pub answer_details: Json<StatementAnswerDetails>,
    pub correct: bool,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for submitting the answers of one student to a quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswersRequest {
    pub student_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub answers: Vec<StatementAnswer>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResult {
    pub question_answer_id: i64,
    pub quiz_question_id: i64,
    pub sequence: i64,
    pub empty: bool,
    pub correct: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswersResponse {
    pub results: Vec<AnswerResult>,
    pub correct_count: usize,
    pub total: usize,
}
