// src/commands/mod.rs

//! Saga participant side of the quiz service: commands sent by other
//! services, the handlers that apply them and the replies they get back.

pub mod channel;
pub mod quiz;

use serde::{Deserialize, Serialize};

/// Acknowledgment sent back for every handled command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandReply {
    Success,
    Failure,
}

impl CommandReply {
    pub fn with_success() -> Self {
        CommandReply::Success
    }

    pub fn with_failure() -> Self {
        CommandReply::Failure
    }
}
