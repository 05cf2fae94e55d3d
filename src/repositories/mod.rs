// src/repositories/mod.rs

pub mod quiz_repository;
pub mod result_repository;

pub use quiz_repository::{QuizRepository, SqliteQuizRepository};
pub use result_repository::{ResultRepository, SqliteResultRepository};
