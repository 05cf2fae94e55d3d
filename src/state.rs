// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    repositories::{QuizRepository, SqliteQuizRepository, SqliteResultRepository},
    services::QuizResultService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub quizzes: Arc<dyn QuizRepository>,
    pub results: QuizResultService,
}

impl AppState {
    /// Wires the SQLite repositories and the result service onto one pool.
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let quizzes: Arc<dyn QuizRepository> = Arc::new(SqliteQuizRepository::new(pool.clone()));
        let results = QuizResultService::new(
            quizzes.clone(),
            Arc::new(SqliteResultRepository::new(pool.clone())),
        );

        Self {
            pool,
            config,
            quizzes,
            results,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn QuizRepository> {
    fn from_ref(state: &AppState) -> Self {
        state.quizzes.clone()
    }
}

impl FromRef<AppState> for QuizResultService {
    fn from_ref(state: &AppState) -> Self {
        state.results.clone()
    }
}
