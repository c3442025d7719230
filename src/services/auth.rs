//! # 인증 서비스
//!
//! 가입, 로그인, 토큰 갱신/폐기, 이메일 인증 코드를 처리합니다.
//!
//! 리프레시 토큰은 원문이 아니라 SHA-256 해시로만 저장합니다.
//! 갱신할 때마다 기존 토큰을 지우고 새로 발급하므로(rotation) 한 번 쓴 토큰은 다시 쓸 수 없습니다.

use chrono::{Duration, NaiveDateTime, Utc};
use rand_core::{OsRng, RngCore};

use crate::db::{self, NewMember};
use crate::error::{AppError, FieldError};
use crate::middleware::auth::{
    create_access_token, create_refresh_token, hash_token, verify_token, TokenKind, TokenSubject,
    TOKEN_TYPE,
};
use crate::models::member::{
    ConfirmEmailRequest, LoginRequest, LoginResponse, Member, Role, SignupRequest, SignupResponse,
};
use crate::routes::AppState;
use crate::services::mailer::verification_mail;

/// 이메일 인증 코드 유효 시간(분)
pub const EMAIL_CODE_MINUTES: i64 = 3;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// 이메일은 앞뒤 공백을 자르고 소문자로 저장/비교합니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn timestamp_after(ttl: Duration) -> String {
    (Utc::now() + ttl).format(TIMESTAMP_FORMAT).to_string()
}

fn is_past(timestamp: &str) -> Result<bool, AppError> {
    let parsed = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|e| AppError::Internal(format!("Date parse error: {}", e)))?;
    Ok(parsed.and_utc() < Utc::now())
}

/// 6자리 숫자 코드 (앞자리 0 포함)
fn generate_email_code() -> String {
    format!("{:06}", OsRng.next_u32() % 1_000_000)
}

pub async fn signup(state: &AppState, req: &SignupRequest) -> Result<SignupResponse, AppError> {
    let email = normalize_email(&req.email);

    if db::email_exists(&state.pool, &email).await? {
        return Err(AppError::DuplicateEmail);
    }

    if state.require_email_verification && !db::is_email_verified(&state.pool, &email).await? {
        return Err(AppError::ValidationFailed(vec![FieldError::new(
            "email",
            "Email address has not been verified",
        )]));
    }

    // ADMIN_EMAILS에 있는 주소는 관리자이면서 바로 활성화
    let is_admin = state.admin_emails.iter().any(|admin| admin == &email);
    let role = if is_admin { Role::Admin } else { Role::General };

    let password_hash = crate::services::password::hash_password(&req.password)?;
    let member_id = db::create_member(
        &state.pool,
        &NewMember {
            email: &email,
            password_hash: &password_hash,
            name: req.name.trim(),
            phone_number: req.phone_number.trim(),
            role,
            activation: is_admin,
        },
    )
    .await?;

    tracing::info!(member_id, ?role, "member signed up");
    Ok(SignupResponse { member_id })
}

/// 액세스/리프레시 토큰을 새로 발급하고 리프레시 토큰 해시를 저장합니다.
async fn issue_tokens(state: &AppState, member: &Member) -> Result<LoginResponse, AppError> {
    let subject = TokenSubject {
        member_id: member.id,
        name: &member.name,
        role: member.role,
        activation: member.activation,
    };

    let access_token = create_access_token(&subject, &state.tokens)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;
    let refresh_token = create_refresh_token(&subject, &state.tokens)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    let expires_at = timestamp_after(Duration::days(state.tokens.refresh_days));
    db::store_refresh_token(&state.pool, member.id, &hash_token(&refresh_token), &expires_at)
        .await?;

    Ok(LoginResponse {
        member_id: member.id,
        name: member.name.clone(),
        role: member.role,
        activation: member.activation,
        access_token,
        refresh_token,
        token_type: TOKEN_TYPE,
    })
}

pub async fn login(state: &AppState, req: &LoginRequest) -> Result<LoginResponse, AppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let member = db::find_member_by_email(&state.pool, &normalize_email(&req.email))
        .await?
        .ok_or_else(invalid)?;

    if !crate::services::password::verify_password(&req.password, &member.password_hash)? {
        tracing::debug!(member_id = member.id, "login rejected: wrong password");
        return Err(invalid());
    }

    issue_tokens(state, &member).await
}

pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<LoginResponse, AppError> {
    verify_token(refresh_token, &state.tokens.secret, TokenKind::Refresh)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let token_hash = hash_token(refresh_token);
    let (member_id, expires_at) = db::find_refresh_token(&state.pool, &token_hash)
        .await?
        .ok_or(AppError::Unauthorized(
            "Refresh token not found or revoked".to_string(),
        ))?;

    // 어떤 경우든 한 번 제시된 토큰은 폐기
    if !db::delete_refresh_token(&state.pool, &token_hash).await? {
        return Err(AppError::Unauthorized(
            "Refresh token not found or revoked".to_string(),
        ));
    }

    if is_past(&expires_at)? {
        return Err(AppError::Unauthorized("Refresh token expired".to_string()));
    }

    let member = db::find_member_by_id(&state.pool, member_id)
        .await?
        .ok_or(AppError::Unauthorized("Member not found".to_string()))?;

    issue_tokens(state, &member).await
}

/// 회원의 모든 리프레시 토큰을 폐기합니다. 발급된 액세스 토큰은 만료 시각까지 유효합니다.
pub async fn logout(state: &AppState, member_id: i64) -> Result<(), AppError> {
    db::delete_member_refresh_tokens(&state.pool, member_id).await?;
    tracing::info!(member_id, "member logged out");
    Ok(())
}

/// 인증 코드를 만들어 메일로 보냅니다. 같은 주소로 다시 요청하면 이전 코드는 무효.
pub async fn send_email_code(state: &AppState, email: &str) -> Result<(), AppError> {
    let email = normalize_email(email);

    if db::email_exists(&state.pool, &email).await? {
        return Err(AppError::DuplicateEmail);
    }

    let code = generate_email_code();
    let expires_at = timestamp_after(Duration::minutes(EMAIL_CODE_MINUTES));
    db::upsert_email_code(&state.pool, &email, &code, &expires_at).await?;

    let (subject, body) = verification_mail(&code, EMAIL_CODE_MINUTES);
    state.mailer.send(&email, &subject, &body)?;

    tracing::info!(email = %email, "email verification code issued");
    Ok(())
}

pub async fn confirm_email_code(state: &AppState, req: &ConfirmEmailRequest) -> Result<(), AppError> {
    let email = normalize_email(&req.email);
    let mismatch = || AppError::BadRequest("Invalid or expired verification code".to_string());

    let (code, expires_at, _) = db::find_email_code(&state.pool, &email)
        .await?
        .ok_or_else(mismatch)?;

    if code != req.code.trim() || is_past(&expires_at)? {
        return Err(mismatch());
    }

    db::mark_email_verified(&state.pool, &email).await?;
    Ok(())
}
