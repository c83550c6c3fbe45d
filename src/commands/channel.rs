// src/commands/channel.rs

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{
    commands::{
        CommandReply,
        quiz::{QuizCommand, QuizServiceCommandHandlers},
    },
    config::QUIZ_SERVICE_COMMAND_CHANNEL,
    error::AppError,
};

/// A command waiting on the channel together with where to send its reply.
struct CommandMessage {
    command: QuizCommand,
    reply_to: oneshot::Sender<CommandReply>,
}

/// Sending half of the quiz service command channel.
#[derive(Clone)]
pub struct CommandChannel {
    sender: mpsc::Sender<CommandMessage>,
}

impl CommandChannel {
    pub fn name(&self) -> &'static str {
        QUIZ_SERVICE_COMMAND_CHANNEL
    }

    /// Queues a command and waits for the consumer's reply.
    pub async fn send(&self, command: QuizCommand) -> Result<CommandReply, AppError> {
        let (reply_to, reply) = oneshot::channel();

        self.sender
            .send(CommandMessage { command, reply_to })
            .await
            .map_err(|_| {
                AppError::InternalServerError(format!("{} consumer has stopped", self.name()))
            })?;

        reply.await.map_err(|_| {
            AppError::InternalServerError(format!("{} consumer dropped the reply", self.name()))
        })
    }
}

/// Starts the task that consumes the command channel.
///
/// Messages are handled one at a time, in arrival order. The task ends once
/// every `CommandChannel` clone has been dropped.
pub fn spawn_consumer(
    handlers: QuizServiceCommandHandlers,
    capacity: usize,
) -> (CommandChannel, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::channel::<CommandMessage>(capacity);

    let handle = tokio::spawn(async move {
        tracing::info!("Consuming commands from {}", QUIZ_SERVICE_COMMAND_CHANNEL);

        while let Some(message) = receiver.recv().await {
            let reply = handlers.handle(message.command).await;
            if message.reply_to.send(reply).is_err() {
                tracing::warn!("Sender of a quiz command went away before the reply");
            }
        }

        tracing::info!("{} closed", QUIZ_SERVICE_COMMAND_CHANNEL);
    });

    (CommandChannel { sender }, handle)
}
