//! # 회원(Member) 모델 정의
//!
//! - `Member`: DB의 `members` 테이블 한 행
//! - `Role` / `Part`: TEXT 컬럼에 대문자 이름으로 저장되는 열거형
//! - 가입/로그인/프로필 수정 요청과 응답 구조체

use serde::{Deserialize, Serialize};

use super::validation::{
    require_email, require_max_chars, require_not_blank, require_password, Validate,
};
use crate::error::FieldError;

/// 회원 권한. `ADMIN`만 /admin 경로에 접근할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    General,
    Admin,
}

/// 회원이 속한 직군
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Part {
    Backend,
    Frontend,
    Mobile,
    Infra,
    Etc,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub phone_number: String,
    pub role: Role,
    pub activation: bool,
    pub reference_url: Option<String>,
    pub part: Option<Part>,
    pub organization: Option<String>,
    pub motto: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone_number: String,
    pub role: Role,
    pub activation: bool,
    pub reference_url: Option<String>,
    pub part: Option<Part>,
    pub organization: Option<String>,
    pub motto: Option<String>,
    pub created_at: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            email: member.email,
            name: member.name,
            phone_number: member.phone_number,
            role: member.role,
            activation: member.activation,
            reference_url: member.reference_url,
            part: member.part,
            organization: member.organization,
            motto: member.motto,
            created_at: member.created_at,
        }
    }
}

/// 회원 가입 요청. 누락된 필드는 빈 문자열이 되어 검증 단계에서 걸러집니다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub check_password: String,
    pub name: String,
    pub phone_number: String,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_email(&mut errors, "email", &self.email);
        require_password(&mut errors, "password", &self.password);
        if self.password != self.check_password {
            errors.push(FieldError::new(
                "check_password",
                "Password and confirmation do not match",
            ));
        }
        require_not_blank(&mut errors, "name", &self.name);
        require_max_chars(&mut errors, "name", &self.name, 50);
        require_not_blank(&mut errors, "phone_number", &self.phone_number);
        require_max_chars(&mut errors, "phone_number", &self.phone_number, 20);
        errors
    }
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub member_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_email(&mut errors, "email", &self.email);
        require_not_blank(&mut errors, "password", &self.password);
        errors
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl Validate for RefreshRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_not_blank(&mut errors, "refresh_token", &self.refresh_token);
        errors
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub member_id: i64,
    pub name: String,
    pub role: Role,
    pub activation: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyEmailRequest {
    pub email: String,
}

impl Validate for VerifyEmailRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_email(&mut errors, "email", &self.email);
        errors
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfirmEmailRequest {
    pub email: String,
    pub code: String,
}

impl Validate for ConfirmEmailRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_email(&mut errors, "email", &self.email);
        require_not_blank(&mut errors, "code", &self.code);
        errors
    }
}

/// 프로필 수정 요청: `PATCH /members`
///
/// PATCH이므로 모든 필드가 Option입니다. 보낸 필드만 변경됩니다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub reference_url: Option<String>,
    pub part: Option<Part>,
    pub organization: Option<String>,
    pub motto: Option<String>,
}

impl Validate for UpdateMemberRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require_not_blank(&mut errors, "name", name);
            require_max_chars(&mut errors, "name", name, 50);
        }
        if let Some(phone_number) = &self.phone_number {
            require_not_blank(&mut errors, "phone_number", phone_number);
            require_max_chars(&mut errors, "phone_number", phone_number, 20);
        }
        if let Some(motto) = &self.motto {
            require_max_chars(&mut errors, "motto", motto, 200);
        }
        errors
    }
}

#[derive(Debug, Deserialize)]
pub struct ActivationRequest {
    pub activation: bool,
}

impl Validate for ActivationRequest {
    fn validate(&self) -> Vec<FieldError> {
        Vec::new()
    }
}
