//! # 서비스 계층
//!
//! 라우트 핸들러와 DB 쿼리 사이의 업무 규칙을 담습니다.
//! - `auth`: 가입, 로그인, 토큰 갱신/폐기, 이메일 인증
//! - `board`: 게시글 작성/조회/목록, 태그 재지정
//! - `like`: 좋아요 등록/취소/상태
//! - `comment`: 댓글 작성
//! - `password`: Argon2 해시
//! - `mailer`: 메일 발송 트레잇
//! - `uploads`: 이미지 파일 저장

pub mod auth;
pub mod board;
pub mod comment;
pub mod like;
pub mod mailer;
pub mod password;
pub mod uploads;
