//! # Boardroom 커뮤니티 게시판 서버
//!
//! 계층 구조:
//! ```text
//! routes (HTTP 핸들러, 추출기)
//!   → services (업무 규칙, 트랜잭션)
//!     → db (SQL 쿼리 함수)
//!       → SQLite (migrations/)
//! ```
//!
//! `main.rs`와 통합 테스트(`tests/`)가 모두 [`app`]으로 같은 라우터를 만듭니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::routes::AppState;
use crate::services::uploads::UPLOADS_URL_PREFIX;

/// 전체 라우터를 만듭니다.
///
/// - `/api/v1/...`: API
/// - `/uploads/...`: 업로드된 이미지 정적 서빙
/// - 그 밖의 경로: `not_found` 에러 봉투
///
/// `cors_origins`가 비어 있으면 모든 출처를 허용합니다.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    let allow_origin = if cors_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            cors_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(&state.uploads_path);

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .nest_service(UPLOADS_URL_PREFIX, uploads)
        .fallback(|| async { AppError::NotFound })
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
