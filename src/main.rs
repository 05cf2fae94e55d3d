// src/main.rs

use std::{net::SocketAddr, time::Duration};

use chrono::Utc;
use lms_backend::{config::Config, db, routes, state::AppState, utils::hash::hash_password};
use sqlx::SqlitePool;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env included)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match db::connect(&config.database_url).await {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    tracing::error!("Failed to open database after 5 retries: {}", e);
                    return Err(e.into());
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    if let Err(e) = seed_teacher(&pool, &config).await {
        tracing::error!("Failed to seed teacher account: {:?}", e);
    }

    let state = AppState::new(pool, config.clone());
    let app = routes::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Creates the configured teacher account on first start.
async fn seed_teacher(pool: &SqlitePool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(unique_id), Some(password)) = (&config.seed_teacher_id, &config.seed_teacher_password)
    else {
        return Ok(());
    };

    let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers WHERE unique_id = ?")
        .bind(unique_id)
        .fetch_one(pool)
        .await?;

    if exists == 0 {
        tracing::info!("Seeding teacher account: {}", unique_id);
        let hashed_password = hash_password(password)?;

        sqlx::query(
            "INSERT INTO teachers (unique_id, name, email, password, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(unique_id)
        .bind(unique_id)
        .bind(format!("{}@lms.local", unique_id))
        .bind(&hashed_password)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        tracing::info!("Teacher account created successfully.");
    }
    Ok(())
}
