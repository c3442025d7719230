//! # 게시글 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/boards | `list_boards` | 정렬/검색/슬라이스 목록 |
//! | POST | /api/v1/boards | `write_board` | 게시글 작성 (로그인 필요) |
//! | GET | /api/v1/boards/{id} | `read_board` | 상세 조회, 조회수 증가 |
//! | PUT | /api/v1/boards/{id}/tags | `assign_tags` | 태그 재지정 (작성자만) |
//! | POST | /api/v1/boards/images | `upload_image` | 이미지 업로드 (multipart `image`) |
//! | GET | /api/v1/boards/my-board | `my_boards` | 내가 쓴 글 |
//! | GET | /api/v1/boards/my-like | `my_liked_boards` | 내가 좋아요한 글 |
//!
//! 상세 조회는 `viewer_session` 쿠키로 조회 세션을 구분합니다.
//! 쿠키가 없으면 새로 발급해서 응답에 실어 보냅니다.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::{viewer_session, ApiQuery, AuthUser, MaybeAuthUser, ValidatedJson},
    models::*,
    routes::AppState,
    services::{board as board_service, uploads},
};

/// `my-board`, `my-like` 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

pub async fn list_boards(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BoardListQuery>,
) -> Result<Json<ApiResponse<Slice<BoardSummary>>>, AppError> {
    let slice = board_service::list_boards(&state.pool, &query).await?;
    Ok(Json(ApiResponse::new(slice)))
}

pub async fn write_board(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<WriteBoardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WriteBoardResponse>>), AppError> {
    let created = board_service::write_board(&state.pool, auth_user.member_id, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(created))))
}

pub async fn read_board(
    State(state): State<AppState>,
    MaybeAuthUser(auth_user): MaybeAuthUser,
    jar: CookieJar,
    Path(board_id): Path<i64>,
) -> Result<(CookieJar, Json<ApiResponse<ReadBoardResponse>>), AppError> {
    let (jar, viewer_key) = viewer_session(jar);
    let actor = match auth_user {
        Some(user) => Actor::Member(user.member_id),
        None => Actor::Anonymous(viewer_key.clone()),
    };

    let board = board_service::read_board(&state.pool, board_id, &viewer_key, &actor).await?;
    Ok((jar, Json(ApiResponse::new(board))))
}

pub async fn assign_tags(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(board_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<AssignTagsRequest>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let tags =
        board_service::assign_tags(&state.pool, board_id, auth_user.member_id, &req.tags).await?;
    Ok(Json(ApiResponse::new(
        json!({ "board_id": board_id, "tags": tags }),
    )))
}

/// multipart의 `image` 필드 하나를 저장합니다. 다른 필드는 무시합니다.
pub async fn upload_image(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ImageUploadResponse>>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let url = uploads::store_image(&state.uploads_path, content_type.as_deref(), &data).await?;
        return Ok((
            StatusCode::CREATED,
            Json(ApiResponse::new(ImageUploadResponse { url })),
        ));
    }

    Err(AppError::invalid("image", "Image file is required"))
}

pub async fn my_boards(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ApiResponse<Slice<BoardSummary>>>, AppError> {
    let page = PageRequest::new(query.page, query.size)?;
    let slice = board_service::my_boards(&state.pool, auth_user.member_id, page).await?;
    Ok(Json(ApiResponse::new(slice)))
}

pub async fn my_liked_boards(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ApiResponse<Slice<BoardSummary>>>, AppError> {
    let page = PageRequest::new(query.page, query.size)?;
    let slice = board_service::my_liked_boards(&state.pool, auth_user.member_id, page).await?;
    Ok(Json(ApiResponse::new(slice)))
}
