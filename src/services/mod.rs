// src/services/mod.rs

pub mod aggregation;
pub mod grading;
pub mod results;

pub use results::QuizResultService;
