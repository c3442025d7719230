use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{error::AppError, models::Role, routes::AppState};

pub const TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // member id
    pub name: String,
    pub role: Role,
    pub activation: bool,
    pub kind: TokenKind,
    pub jti: String, // 같은 초에 발급된 토큰끼리도 값이 겹치지 않게
    pub exp: i64,
    pub iat: i64,
}

/// 토큰 서명 비밀키와 유효기간
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_minutes: i64,
    pub refresh_days: i64,
}

/// 토큰에 담을 회원 정보
#[derive(Debug, Clone)]
pub struct TokenSubject<'a> {
    pub member_id: i64,
    pub name: &'a str,
    pub role: Role,
    pub activation: bool,
}

/// 검증된 액세스 토큰에서 꺼낸 회원 신원.
/// 핸들러는 이 값만 받고 토큰을 직접 파싱하지 않습니다.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub member_id: i64,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        authenticate(auth_header, &state.tokens.secret)
    }
}

/// 토큰이 있으면 회원, 없으면 `None`.
///
/// 헤더가 있는데 토큰이 잘못된 경우는 비회원으로 넘기지 않고 401을 돌려줍니다.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
        {
            Some(auth_header) => Ok(MaybeAuthUser(Some(authenticate(
                auth_header,
                &state.tokens.secret,
            )?))),
            None => Ok(MaybeAuthUser(None)),
        }
    }
}

/// `/admin` 경로 전용. 관리자가 아니면 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            tracing::warn!(member_id = user.member_id, "non-admin member hit an admin route");
            return Err(AppError::Forbidden("Administrator only".to_string()));
        }
        Ok(AdminUser(user))
    }
}

fn authenticate(auth_header: &str, secret: &str) -> Result<AuthUser, AuthError> {
    // "Bearer"/"bearer" 둘 다 허용
    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or(AuthError::InvalidToken)?;

    let claims = verify_token(token.trim(), secret, TokenKind::Access)?;
    let member_id = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

    Ok(AuthUser {
        member_id,
        role: claims.role,
    })
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = match err {
            AuthError::MissingToken => "Authorization token is required",
            AuthError::InvalidToken => "Invalid authorization token",
            AuthError::ExpiredToken => "Authorization token has expired",
        };
        AppError::Unauthorized(message.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

fn create_token(
    subject: &TokenSubject<'_>,
    kind: TokenKind,
    ttl: Duration,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.member_id.to_string(),
        name: subject.name.to_string(),
        role: subject.role,
        activation: subject.activation,
        kind,
        jti: Uuid::now_v7().to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn create_access_token(
    subject: &TokenSubject<'_>,
    settings: &TokenSettings,
) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(
        subject,
        TokenKind::Access,
        Duration::minutes(settings.access_minutes),
        &settings.secret,
    )
}

pub fn create_refresh_token(
    subject: &TokenSubject<'_>,
    settings: &TokenSettings,
) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(
        subject,
        TokenKind::Refresh,
        Duration::days(settings.refresh_days),
        &settings.secret,
    )
}

/// 서명과 만료를 검사하고, 토큰 종류가 `expected`와 다르면 거부합니다.
pub fn verify_token(token: &str, secret: &str, expected: TokenKind) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    if token_data.claims.kind != expected {
        return Err(AuthError::InvalidToken);
    }

    Ok(token_data.claims)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
