//! # 요청 검증 규칙
//!
//! 요청 구조체마다 `Validate`를 구현하고, 경계(`ValidatedJson` 추출기)에서
//! 한 번만 호출합니다. 검증 실패는 필드별 메시지 목록으로 돌려줍니다.

use validator::ValidateEmail;

use crate::error::FieldError;

/// 요청 본문 검증: 문제가 없으면 빈 Vec을 반환합니다.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

pub const PASSWORD_MESSAGE: &str =
    "Password must be 4-20 characters with at least one letter and one digit, without spaces";

pub fn require_not_blank(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{} must not be blank", field)));
    }
}

/// 글자 수(char 기준) 상한 검사. 빈 값은 `require_not_blank`가 따로 잡습니다.
pub fn require_max_chars(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    max: usize,
) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{} must be at most {} characters", field, max),
        ));
    }
}

pub fn require_email(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "Email must not be blank"));
    } else if !value.validate_email() {
        errors.push(FieldError::new(field, "Invalid email address"));
    }
}

/// 영문과 숫자를 각각 하나 이상 포함하고 공백이 없는 4~20자
pub fn is_valid_password(value: &str) -> bool {
    let len = value.chars().count();
    (4..=20).contains(&len)
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
        && !value.chars().any(char::is_whitespace)
}

pub fn require_password(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(FieldError::new(field, "Password must not be blank"));
    } else if !is_valid_password(value) {
        errors.push(FieldError::new(field, PASSWORD_MESSAGE));
    }
}
