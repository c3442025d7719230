//! # 태그 API 라우트 핸들러
//!
//! 태그는 게시글 작성/태그 재지정 때 이름으로 자동 생성되므로
//! 별도의 생성/수정/삭제 API는 없습니다.
//!
//! - `GET /api/v1/tags` → 이름순 태그 목록, 태그별 게시글 수 포함

use axum::{extract::State, Json};

use crate::{db, error::AppError, models::*, routes::AppState};

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TagSummary>>>, AppError> {
    let tags = db::list_tags(&state.pool).await?;
    Ok(Json(ApiResponse::new(tags)))
}
