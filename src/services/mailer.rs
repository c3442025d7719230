//! 메일 발송
//!
//! 실제 SMTP 연동은 이 트레잇을 구현해서 `AppState`에 넣으면 됩니다.
//! 기본 구현(`LogMailer`)은 메일 내용을 로그로만 남깁니다.

use crate::error::AppError;

pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

#[derive(Debug, Default, Clone)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        tracing::info!(to, subject, body, "mail sent (log only)");
        Ok(())
    }
}

pub fn verification_mail(code: &str, valid_minutes: i64) -> (String, String) {
    let subject = "[Boardroom] 이메일 인증 코드".to_string();
    let body = format!(
        "인증 코드: {}\n{}분 안에 입력해 주세요.",
        code, valid_minutes
    );
    (subject, body)
}
