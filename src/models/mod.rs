// src/models/mod.rs

pub mod answer;
pub mod course;
pub mod question;
pub mod quiz;
pub mod student;
