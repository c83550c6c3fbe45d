// src/models/quiz.rs

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use validator::Validate;

use crate::{
    models::question::{Question, QuestionType},
    utils::validation::validate_not_blank,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizType {
    Generated,
    Exam,
    Test,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("cannot build a quiz of {requested} questions from {available} active questions")]
    InvalidQuizSize { requested: usize, available: usize },

    #[error("question {0} is already part of the quiz")]
    DuplicateQuestion(i64),
}

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub course_execution_id: i64,
    pub title: String,
    pub generation_date: Option<DateTime<Utc>>,
    pub year: Option<i64>,
    pub quiz_type: QuizType,
    pub series: Option<i64>,
    pub version: Option<String>,
}

/// A quiz question joined with the question it points to.
#[derive(Debug, Serialize, FromRow)]
pub struct QuizQuestionDetails {
    pub id: i64,
    pub sequence: i64,
    pub question_id: i64,
    pub title: String,
    pub content: String,
    pub question_type: QuestionType,
}

#[derive(Debug, Serialize)]
pub struct QuizWithQuestions {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuizQuestionDetails>,
}

/// A question slot of a quiz that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewQuizQuestion {
    pub question_id: i64,
    pub sequence: i64,
}

/// A quiz aggregate being assembled before it is written to the database.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub generation_date: Option<DateTime<Utc>>,
    pub year: Option<i64>,
    pub quiz_type: QuizType,
    pub series: Option<i64>,
    pub version: Option<String>,
    questions: Vec<NewQuizQuestion>,
}

impl NewQuiz {
    pub fn new(title: impl Into<String>, quiz_type: QuizType) -> Self {
        Self {
            title: title.into(),
            generation_date: None,
            year: None,
            quiz_type,
            series: None,
            version: None,
            questions: Vec::new(),
        }
    }

    /// Fills the quiz with `quiz_size` distinct questions drawn at random from
    /// `active_questions`, sequenced 1..=quiz_size in draw order.
    ///
    /// The size is checked before anything changes, so an invalid request
    /// leaves the quiz as it was.
    pub fn generate<R: Rng>(
        &mut self,
        quiz_size: usize,
        active_questions: &[Question],
        rng: &mut R,
    ) -> Result<(), GenerationError> {
        let available = active_questions.len();
        if quiz_size == 0 || quiz_size > available {
            return Err(GenerationError::InvalidQuizSize {
                requested: quiz_size,
                available,
            });
        }

        let mut used = HashSet::with_capacity(quiz_size);
        let mut questions = Vec::with_capacity(quiz_size);

        for sequence in 1..=quiz_size {
            let mut next = rng.random_range(0..available);
            while !used.insert(next) {
                next = rng.random_range(0..available);
            }
            questions.push(NewQuizQuestion {
                question_id: active_questions[next].id,
                sequence: sequence as i64,
            });
        }

        self.questions = questions;
        self.generation_date = Some(Utc::now());
        self.quiz_type = QuizType::Generated;
        Ok(())
    }

    /// Appends a question at the next free sequence number.
    pub fn add_question(&mut self, question_id: i64) -> Result<i64, GenerationError> {
        if self.questions.iter().any(|q| q.question_id == question_id) {
            return Err(GenerationError::DuplicateQuestion(question_id));
        }
        let sequence = self.questions.len() as i64 + 1;
        self.questions.push(NewQuizQuestion {
            question_id,
            sequence,
        });
        Ok(sequence)
    }

    pub fn questions(&self) -> &[NewQuizQuestion] {
        &self.questions
    }

    /// Quiz questions keyed by their sequence number.
    pub fn quiz_questions(&self) -> BTreeMap<i64, NewQuizQuestion> {
        self.questions.iter().map(|q| (q.sequence, *q)).collect()
    }
}

/// Quiz fields exchanged with clients and other services.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct QuizDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    pub title: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub quiz_type: Option<QuizType>,
    #[serde(default)]
    pub series: Option<i64>,
    #[serde(default)]
    pub version: Option<String>,
}

/// DTO for creating a quiz from a hand-picked list of questions.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    pub title: String,
    pub quiz_type: QuizType,
    pub year: Option<i64>,
    pub series: Option<i64>,
    #[validate(length(max = 20))]
    pub version: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub question_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 200), custom(function = validate_not_blank))]
    pub title: String,
    pub quiz_size: Option<usize>,
    /// Restricts the draw to questions of these topics when not empty.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub topic_ids: Vec<i64>,
}
