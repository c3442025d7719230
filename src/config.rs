//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: JWT 토큰 서명에 사용할 비밀키 (필수)
//! - `UPLOADS_PATH`: 게시글 이미지 저장 디렉토리
//! - `HOST` / `PORT`: 서버 바인딩 주소
//! - `ACCESS_TOKEN_MINUTES` / `REFRESH_TOKEN_DAYS`: 토큰 유효기간
//! - `ADMIN_EMAILS`: 가입 시 관리자 권한을 받을 이메일 목록 (쉼표 구분)
//! - `REQUIRE_EMAIL_VERIFICATION`: 가입 전에 이메일 인증을 요구할지 여부
//! - `CORS_ORIGINS`: 허용할 출처 목록 (쉼표 구분, 비어 있으면 모두 허용)

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 경로 (예: "sqlite:data/boardroom.db?mode=rwc")
    pub database_url: String,
    pub jwt_secret: String,
    pub uploads_path: String,
    pub host: String,
    pub port: u16,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    /// 소문자로 정규화된 관리자 이메일 목록
    pub admin_emails: Vec<String>,
    pub require_email_verification: bool,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            uploads_path: env::var("UPLOADS_PATH").unwrap_or_else(|_| "data/uploads".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            access_token_minutes: parse_or("ACCESS_TOKEN_MINUTES", 60),
            refresh_token_days: parse_or("REFRESH_TOKEN_DAYS", 7),
            admin_emails: split_list(&env::var("ADMIN_EMAILS").unwrap_or_default())
                .into_iter()
                .map(|email| email.to_lowercase())
                .collect(),
            require_email_verification: parse_or("REQUIRE_EMAIL_VERIFICATION", false),
            cors_origins: split_list(&env::var("CORS_ORIGINS").unwrap_or_default()),
        })
    }
}

/// 환경변수를 파싱하고, 없거나 파싱에 실패하면 기본값을 사용합니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// "a, b,,c" → ["a", "b", "c"]
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
