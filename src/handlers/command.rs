// src/handlers/command.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    commands::{channel::CommandChannel, quiz::QuizCommand},
    error::AppError,
};

/// Ingress of the quiz service command channel.
///
/// Queues the command for the consumer and answers with its reply.
/// A failed command is still a 200: the outcome travels in the body.
pub async fn receive_quiz_command(
    State(channel): State<CommandChannel>,
    Json(command): Json<QuizCommand>,
) -> Result<impl IntoResponse, AppError> {
    let reply = channel.send(command).await?;
    Ok(Json(reply))
}
