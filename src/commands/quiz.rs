// src/commands/quiz.rs

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{commands::CommandReply, models::quiz::QuizDto, services::quiz::QuizService};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteQuizCommand {
    pub quiz_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuizCommand {
    pub quiz: QuizDto,
}

/// Commands accepted on the quiz service command channel,
/// dispatched on the `command_type` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command_type")]
pub enum QuizCommand {
    DeleteQuizCommand(DeleteQuizCommand),
    UpdateQuizCommand(UpdateQuizCommand),
}

/// Applies quiz commands through a `QuizService` and turns the outcome into a reply.
/// Errors never escape a handler.
#[derive(Clone)]
pub struct QuizServiceCommandHandlers {
    quiz_service: Arc<dyn QuizService>,
}

impl QuizServiceCommandHandlers {
    pub fn new(quiz_service: Arc<dyn QuizService>) -> Self {
        Self { quiz_service }
    }

    pub async fn handle(&self, command: QuizCommand) -> CommandReply {
        match command {
            QuizCommand::DeleteQuizCommand(command) => self.delete_quiz(command).await,
            QuizCommand::UpdateQuizCommand(command) => self.update_quiz(command).await,
        }
    }

    pub async fn delete_quiz(&self, command: DeleteQuizCommand) -> CommandReply {
        tracing::info!("Received DeleteQuizCommand for quiz {}", command.quiz_id);

        match self.quiz_service.remove_quiz(command.quiz_id).await {
            Ok(()) => CommandReply::with_success(),
            Err(e) => {
                tracing::warn!("DeleteQuizCommand for quiz {} failed: {}", command.quiz_id, e);
                CommandReply::with_failure()
            }
        }
    }

    pub async fn update_quiz(&self, command: UpdateQuizCommand) -> CommandReply {
        let Some(quiz_id) = command.quiz.id else {
            tracing::warn!("Received UpdateQuizCommand without a quiz id");
            return CommandReply::with_failure();
        };
        tracing::info!("Received UpdateQuizCommand for quiz {}", quiz_id);

        match self.quiz_service.update_quiz(quiz_id, &command.quiz).await {
            Ok(_) => CommandReply::with_success(),
            Err(e) => {
                tracing::warn!("UpdateQuizCommand for quiz {} failed: {}", quiz_id, e);
                CommandReply::with_failure()
            }
        }
    }
}
