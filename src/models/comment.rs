use serde::{Deserialize, Serialize};

use super::validation::{require_max_chars, require_not_blank, Validate};
use crate::error::FieldError;

pub const MAX_COMMENT_CHARS: usize = 1000;

/// 댓글 한 건: 작성자 이름을 JOIN해서 함께 가져옵니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentResponse {
    pub id: i64,
    pub board_id: i64,
    pub member_id: i64,
    pub writer: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WriteCommentRequest {
    pub board_id: i64,
    pub content: String,
}

impl Validate for WriteCommentRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.board_id <= 0 {
            errors.push(FieldError::new("board_id", "board_id must be positive"));
        }
        require_not_blank(&mut errors, "content", &self.content);
        require_max_chars(&mut errors, "content", &self.content, MAX_COMMENT_CHARS);
        errors
    }
}

#[derive(Debug, Serialize)]
pub struct WriteCommentResponse {
    pub id: i64,
}
