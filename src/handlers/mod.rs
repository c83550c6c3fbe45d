// src/handlers/mod.rs

pub mod answer;
pub mod command;
pub mod course;
pub mod execution;
pub mod question;
pub mod quiz;
pub mod student;
