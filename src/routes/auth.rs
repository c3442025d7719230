//! # 인증 API 라우트 핸들러
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | POST | /api/v1/auth/signup | 회원 가입 (201) |
//! | POST | /api/v1/auth/login | 로그인, 토큰 발급 |
//! | POST | /api/v1/auth/refresh | 리프레시 토큰으로 재발급 |
//! | POST | /api/v1/auth/logout | 리프레시 토큰 전부 폐기 |
//! | POST | /api/v1/auth/mail | 이메일 인증 코드 발송 |
//! | POST | /api/v1/auth/mail/verify | 이메일 인증 코드 확인 |

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::{AuthUser, ValidatedJson},
    models::*,
    routes::AppState,
    services::auth as auth_service,
};

pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SignupResponse>>), AppError> {
    let created = auth_service::signup(&state, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(created))))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let tokens = auth_service::login(&state, &req).await?;
    Ok(Json(ApiResponse::new(tokens)))
}

pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let tokens = auth_service::refresh(&state, req.refresh_token.trim()).await?;
    Ok(Json(ApiResponse::new(tokens)))
}

pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    auth_service::logout(&state, auth_user.member_id).await?;
    Ok(Json(ApiResponse::new(
        json!({ "message": "Logged out successfully" }),
    )))
}

pub async fn send_email_code(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VerifyEmailRequest>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    auth_service::send_email_code(&state, &req.email).await?;
    Ok(Json(ApiResponse::new(json!({
        "message": "Verification code sent",
        "expires_in_minutes": auth_service::EMAIL_CODE_MINUTES,
    }))))
}

pub async fn confirm_email_code(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ConfirmEmailRequest>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    auth_service::confirm_email_code(&state, &req).await?;
    Ok(Json(ApiResponse::new(json!({ "verified": true }))))
}
