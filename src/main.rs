//! # Boardroom 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성과 마이그레이션
//! 4. 업로드 디렉토리 생성
//! 5. 라우터 구성과 HTTP 서버 시작

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use boardroom::{config::Config, db, routes::AppState, services::mailer::LogMailer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 boardroom, tower_http, axum을 debug 레벨로
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boardroom=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting Boardroom server on {}:{}", config.host, config.port);

    let pool = db::connect(&config.database_url, 5).await?;

    let uploads_path = Path::new(&config.uploads_path);
    if !uploads_path.exists() {
        tokio::fs::create_dir_all(uploads_path).await?;
        tracing::info!("Created uploads directory: {}", config.uploads_path);
    }

    if !config.admin_emails.is_empty() {
        tracing::info!("{} admin email(s) configured", config.admin_emails.len());
    }

    let state = AppState::new(pool, &config, Arc::new(LogMailer));
    let app = boardroom::app(state, &config.cors_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
