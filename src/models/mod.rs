//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `member`: 회원, 권한, 가입/로그인 요청
//! - `board`: 게시글, 정렬 기준, 목록/상세 응답
//! - `like`: 좋아요 요청/응답, 요청 주체(`Actor`)
//! - `comment`: 댓글
//! - `tag`: 태그
//! - `page`: 슬라이스 페이지네이션
//! - `response`: 성공 응답 봉투
//! - `validation`: 요청 검증 트레이트와 규칙
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Board`처럼 짧게 접근합니다.

pub mod board;
pub mod comment;
pub mod like;
pub mod member;
pub mod page;
pub mod response;
pub mod tag;
pub mod validation;

pub use board::*;
pub use comment::*;
pub use like::*;
pub use member::*;
pub use page::*;
pub use response::*;
pub use tag::*;
pub use validation::Validate;
