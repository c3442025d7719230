//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 가입, 로그인, 토큰 갱신, 로그아웃, 이메일 인증
//! - `members`: 내 프로필 조회/수정
//! - `admin`: 회원 목록, 가입 승인 (관리자 전용)
//! - `boards`: 게시글 작성/조회/목록, 태그 재지정, 이미지 업로드
//! - `likes`: 좋아요 등록/취소/상태
//! - `comments`: 댓글 작성
//! - `tags`: 태그 목록
//! - `health`: 서버 상태 확인

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::middleware::auth::TokenSettings;
use crate::services::mailer::Mailer;

pub mod admin;
pub mod auth;
pub mod boards;
pub mod comments;
pub mod health;
pub mod likes;
pub mod members;
pub mod tags;

/// 이미지 업로드 요청 본문 최대 크기
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool과 Arc는 clone해도 내부 자원을 공유합니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// JWT 서명 비밀키와 토큰 유효기간
    pub tokens: TokenSettings,
    /// 업로드 이미지 저장 디렉토리
    pub uploads_path: String,
    /// 가입 시 관리자 권한을 받는 이메일 (소문자)
    pub admin_emails: Arc<Vec<String>>,
    /// true면 인증 코드를 확인한 이메일만 가입할 수 있습니다.
    pub require_email_verification: bool,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            pool,
            tokens: TokenSettings {
                secret: config.jwt_secret.clone(),
                access_minutes: config.access_token_minutes,
                refresh_days: config.refresh_token_days,
            },
            uploads_path: config.uploads_path.clone(),
            admin_emails: Arc::new(config.admin_emails.clone()),
            require_email_verification: config.require_email_verification,
            mailer,
        }
    }
}

/// `/api/v1` 아래에 붙는 모든 라우트
pub fn api_routes() -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/mail", post(auth::send_email_code))
        .route("/auth/mail/verify", post(auth::confirm_email_code));

    let admin_routes = Router::new()
        .route("/admin/members", get(admin::list_members))
        .route("/admin/members/{id}/activation", patch(admin::set_activation));

    let board_routes = Router::new()
        .route("/boards", get(boards::list_boards).post(boards::write_board))
        // 고정 경로가 `{id}`보다 우선합니다.
        .route("/boards/my-board", get(boards::my_boards))
        .route("/boards/my-like", get(boards::my_liked_boards))
        .route(
            "/boards/images",
            post(boards::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/boards/{id}", get(boards::read_board))
        .route("/boards/{id}/tags", put(boards::assign_tags));

    Router::new()
        .merge(auth_routes)
        .merge(admin_routes)
        .merge(board_routes)
        .route("/members", get(members::me).patch(members::update_me))
        .route(
            "/likes",
            get(likes::like_status)
                .post(likes::register_like)
                .delete(likes::cancel_like),
        )
        .route("/comments", post(comments::write_comment))
        .route("/tags", get(tags::list_tags))
        .route("/health", get(health::health_check))
}
