// src/config.rs

use std::env;

use dotenvy::dotenv;

/// Default location of the file-backed SQLite database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://lms.db";

/// Session tokens live for one day unless overridden.
pub const DEFAULT_JWT_EXPIRATION_SECS: u64 = 86_400;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub cors_origins: Vec<String>,
    /// Optional teacher account created at startup when missing.
    pub seed_teacher_id: Option<String>,
    pub seed_teacher_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let port = parse_var("PORT", 8000)?;

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration = parse_var("JWT_EXPIRATION", DEFAULT_JWT_EXPIRATION_SECS)?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            jwt_expiration,
            rust_log,
            cors_origins,
            seed_teacher_id: env::var("SEED_TEACHER_ID").ok(),
            seed_teacher_password: env::var("SEED_TEACHER_PASSWORD").ok(),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(default),
    }
}
