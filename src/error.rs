//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `FieldError`: 요청 검증 실패 시 필드별 메시지
//! - `IntoResponse` 구현: 에러를 `{ "error": { code, message, details? } }` 응답으로 변환

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// 요청 필드 하나에 대한 검증 실패
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청 본문 필드 검증 실패 (HTTP 400)
    #[error("Validation failed")]
    ValidationFailed(Vec<FieldError>),

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Member not found")]
    MemberNotFound,

    #[error("Board not found")]
    BoardNotFound,

    /// 일치하는 경로가 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 권한 부족: 관리자 전용 경로, 작성자 전용 수정 등 (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Board already liked")]
    DuplicateLike,

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error에 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// 단일 필드 검증 실패를 만드는 축약 함수
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AppError::ValidationFailed(vec![FieldError::new(field, message)])
    }

    /// 이 에러가 내려보낼 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MemberNotFound | AppError::BoardNotFound | AppError::NotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::DuplicateEmail | AppError::DuplicateLike => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// UNIQUE 제약 위반 여부: 중복 가입/중복 좋아요 경합을 409로 돌려주기 위해 사용
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, IO, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message, details) = match self {
            AppError::ValidationFailed(ref errors) => {
                // 같은 필드에 여러 메시지가 붙을 수 있으므로 필드 → 메시지 목록으로 묶습니다.
                let mut details: BTreeMap<&str, Vec<String>> = BTreeMap::new();
                for error in errors {
                    details
                        .entry(error.field)
                        .or_default()
                        .push(error.message.clone());
                }
                ("validation_failed", self.to_string(), Some(details))
            }
            AppError::BadRequest(ref msg) => ("bad_request", msg.clone(), None),
            AppError::MemberNotFound => ("member_not_found", self.to_string(), None),
            AppError::BoardNotFound => ("board_not_found", self.to_string(), None),
            AppError::NotFound => ("not_found", self.to_string(), None),
            AppError::Unauthorized(ref msg) => ("unauthorized", msg.clone(), None),
            AppError::Forbidden(ref msg) => ("forbidden", msg.clone(), None),
            AppError::DuplicateEmail => ("duplicate_email", self.to_string(), None),
            AppError::DuplicateLike => ("duplicate_like", self.to_string(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("internal_error", "An internal error occurred".to_string(), None)
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                ("internal_error", "An internal error occurred".to_string(), None)
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                ("internal_error", "An internal error occurred".to_string(), None)
            }
        };

        // 결과: { "error": { "code": "board_not_found", "message": "Board not found" } }
        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::invalid("title", "x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BoardNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::MemberNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Unauthorized("no".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden("no".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::DuplicateLike.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_hide_detail() {
        let response = AppError::Internal("secret stack trace".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
