//! # 게시글(Board) 모델 정의
//!
//! ## 구조체 역할
//! - `Board`: DB의 `boards` 테이블 한 행
//! - `BoardSort`: 목록 정렬 기준 (LATEST / VIEWS / LIKES)
//! - `BoardSummary`: 목록 한 줄 (작성자 이름, 좋아요 합계 포함)
//! - `WriteBoardRequest` / `ReadBoardResponse`: 작성 요청과 상세 조회 응답

use serde::{Deserialize, Serialize};

use super::comment::CommentResponse;
use super::validation::{require_max_chars, require_not_blank, Validate};
use crate::error::FieldError;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_TAGS_PER_BOARD: usize = 10;
pub const MAX_IMAGES_PER_BOARD: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    pub id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub views: i64,
    pub created_at: String,
}

/// 게시글 목록 정렬 기준
///
/// 알 수 없는 값은 에러가 아니라 `Latest`로 처리합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardSort {
    #[default]
    Latest,
    Views,
    Likes,
}

impl BoardSort {
    /// 쿼리 파라미터 문자열을 정렬 기준으로 바꿉니다. (대소문자 무시)
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("views") => BoardSort::Views,
            Some("likes") => BoardSort::Likes,
            _ => BoardSort::Latest,
        }
    }

    /// 정렬 기준에 대응하는 ORDER BY 절.
    ///
    /// 정적 문자열만 반환하므로 사용자 입력이 SQL에 섞이지 않습니다.
    /// 동점은 작성 시각, 그 다음 id 내림차순으로 끊습니다.
    pub fn order_clause(self) -> &'static str {
        match self {
            BoardSort::Latest => "b.created_at DESC, b.id DESC",
            BoardSort::Views => "b.views DESC, b.created_at DESC, b.id DESC",
            BoardSort::Likes => "like_count DESC, b.created_at DESC, b.id DESC",
        }
    }
}

/// 게시글 목록 한 줄
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BoardSummary {
    pub id: i64,
    pub title: String,
    pub writer: String,
    pub created_at: String,
    /// 회원 좋아요 + 비회원 좋아요
    pub like_count: i64,
    pub views: i64,
}

/// `GET /boards` 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BoardListQuery {
    #[serde(rename = "sortBy", alias = "sort_by")]
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub keyword: Option<String>,
}

impl BoardListQuery {
    /// 태그 이름과 같은 규칙으로 앞뒤 공백을 걷어낸 검색어.
    /// 공백뿐인 검색어는 "필터 없음"으로 취급합니다.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
    }
}

/// 게시글 작성 요청: `POST /boards`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WriteBoardRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
}

impl Validate for WriteBoardRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_not_blank(&mut errors, "title", &self.title);
        require_max_chars(&mut errors, "title", &self.title, MAX_TITLE_CHARS);
        require_not_blank(&mut errors, "content", &self.content);
        validate_tags(&mut errors, &self.tags);
        if self.image_urls.len() > MAX_IMAGES_PER_BOARD {
            errors.push(FieldError::new(
                "image_urls",
                format!("At most {} images can be attached", MAX_IMAGES_PER_BOARD),
            ));
        }
        if self.image_urls.iter().any(|url| url.trim().is_empty()) {
            errors.push(FieldError::new("image_urls", "Image url must not be blank"));
        }
        errors
    }
}

fn validate_tags(errors: &mut Vec<FieldError>, tags: &[String]) {
    if tags.len() > MAX_TAGS_PER_BOARD {
        errors.push(FieldError::new(
            "tags",
            format!("At most {} tags can be attached", MAX_TAGS_PER_BOARD),
        ));
    }
    if tags.iter().any(|tag| tag.chars().count() > 30) {
        errors.push(FieldError::new("tags", "Tag must be at most 30 characters"));
    }
}

#[derive(Debug, Serialize)]
pub struct WriteBoardResponse {
    pub id: i64,
    pub title: String,
}

/// 태그 재지정 요청: `PUT /boards/{id}/tags`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssignTagsRequest {
    pub tags: Vec<String>,
}

impl Validate for AssignTagsRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate_tags(&mut errors, &self.tags);
        errors
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Writer {
    pub id: i64,
    pub name: String,
}

/// 게시글 상세 조회 응답: `GET /boards/{id}`
#[derive(Debug, Serialize)]
pub struct ReadBoardResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub writer: Writer,
    pub created_at: String,
    pub like_count: i64,
    pub views: i64,
    pub is_liked: bool,
    pub tags: Vec<String>,
    pub image_urls: Vec<String>,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub url: String,
}
