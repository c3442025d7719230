//! # 미들웨어 모듈
//!
//! - `auth`: JWT 발급/검증, 회원·관리자 신원 추출기
//! - `extract`: 검증까지 마친 JSON 본문, 에러 봉투를 따르는 쿼리 추출기
//! - `viewer`: 조회 세션 쿠키

pub mod auth;
pub mod extract;
pub mod viewer;

pub use auth::{AdminUser, AuthUser, MaybeAuthUser};
pub use extract::{ApiQuery, ValidatedJson};
pub use viewer::viewer_session;
