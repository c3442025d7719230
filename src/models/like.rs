//! # 좋아요 모델 정의
//!
//! 좋아요는 두 종류입니다.
//! - 회원 좋아요(`likes`): (member_id, board_id) 조합당 하나
//! - 비회원 좋아요(`anonymous_likes`): (조회 세션, board_id) 조합당 하나
//!
//! 게시글의 좋아요 수는 두 테이블의 합계입니다.

use serde::{Deserialize, Serialize};

use super::validation::Validate;
use crate::error::FieldError;

/// 요청을 보낸 주체: 토큰이 있으면 회원, 없으면 조회 세션으로 식별되는 비회원
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Member(i64),
    Anonymous(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterLikeRequest {
    pub board_id: i64,
}

impl Validate for RegisterLikeRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.board_id <= 0 {
            errors.push(FieldError::new("board_id", "board_id must be positive"));
        }
        errors
    }
}

/// `DELETE /likes?board_id=`, `GET /likes?board_id=`
#[derive(Debug, Deserialize)]
pub struct LikeQuery {
    pub board_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LikeStatus {
    pub board_id: i64,
    pub like_count: i64,
    pub is_liked: bool,
}

#[derive(Debug, Serialize)]
pub struct CancelLikeResponse {
    pub board_id: i64,
    pub affected_rows: u64,
}
