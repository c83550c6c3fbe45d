// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Quiz size used when a generation request does not name one.
pub const DEFAULT_QUIZ_SIZE: usize = 10;

/// Name of the channel other services use to send quiz commands.
pub const QUIZ_SERVICE_COMMAND_CHANNEL: &str = "quizServiceCommandChannel";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,
    pub command_channel_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://tutor.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let command_channel_capacity = env::var("COMMAND_CHANNEL_CAPACITY")
            .ok()
            .and_then(|c| c.parse().ok())
            .filter(|c| *c > 0)
            .unwrap_or(100);

        Self {
            database_url,
            rust_log,
            port,
            command_channel_capacity,
        }
    }
}
