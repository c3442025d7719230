//! # 슬라이스(Slice) 페이지네이션
//!
//! 전체 개수를 세는 COUNT 쿼리 없이, 요청한 크기보다 한 행 더 조회해서
//! 다음 페이지가 있는지(`has_next`)만 알려주는 방식입니다.
//!
//! ```text
//! size = 3  →  LIMIT 4 조회
//!   4행이 오면: 앞의 3행 반환, has_next = true
//!   3행 이하:   그대로 반환,   has_next = false
//! ```

use serde::Serialize;

use crate::error::{AppError, FieldError};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// 검증을 통과한 페이지 요청
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// 쿼리 파라미터에서 페이지 요청을 만듭니다.
    ///
    /// `page`는 0 이상, `size`는 1 이상 `MAX_PAGE_SIZE` 이하여야 합니다.
    /// `page * size`가 i64를 넘는 페이지도 거부합니다.
    /// 값이 없으면 page 0, size `DEFAULT_PAGE_SIZE`를 사용합니다.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Result<Self, AppError> {
        let page = page.unwrap_or(0);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut errors = Vec::new();
        if page < 0 {
            errors.push(FieldError::new("page", "page must be zero or greater"));
        }
        if size < 1 {
            errors.push(FieldError::new("size", "size must be at least 1"));
        } else if size > MAX_PAGE_SIZE {
            errors.push(FieldError::new(
                "size",
                format!("size must be at most {}", MAX_PAGE_SIZE),
            ));
        }
        if errors.is_empty() && page.checked_mul(size).is_none() {
            errors.push(FieldError::new("page", "page is too large"));
        }
        if !errors.is_empty() {
            return Err(AppError::ValidationFailed(errors));
        }

        Ok(Self { page, size })
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }

    /// 다음 페이지 존재 여부를 알기 위해 한 행 더 조회합니다.
    pub fn fetch_limit(&self) -> i64 {
        self.size + 1
    }
}

/// 한 페이지 분량의 결과와 다음 페이지 존재 여부
#[derive(Debug, Serialize)]
pub struct Slice<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub has_next: bool,
}

impl<T> Slice<T> {
    /// `fetch_limit()`만큼 조회한 행으로 슬라이스를 만듭니다.
    pub fn from_overfetch(mut rows: Vec<T>, request: PageRequest) -> Self {
        let has_next = rows.len() as i64 > request.size;
        rows.truncate(request.size as usize);
        Self {
            content: rows,
            page: request.page,
            size: request.size,
            has_next,
        }
    }
}
