//! # 좋아요 API
//!
//! 토큰이 있으면 회원 좋아요, 없으면 `viewer_session` 쿠키 기준 비회원 좋아요입니다.
//!
//! - `POST /api/v1/likes` + `{ "board_id": 1 }` (201)
//! - `DELETE /api/v1/likes?board_id=1` → `{ board_id, affected_rows }`
//! - `GET /api/v1/likes?board_id=1` → `{ board_id, like_count, is_liked }`

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppError,
    middleware::{viewer_session, ApiQuery, MaybeAuthUser, ValidatedJson},
    models::*,
    routes::AppState,
    services::like as like_service,
};

fn actor_for(auth_user: MaybeAuthUser, jar: CookieJar) -> (CookieJar, Actor) {
    match auth_user.0 {
        Some(user) => (jar, Actor::Member(user.member_id)),
        None => {
            let (jar, session_id) = viewer_session(jar);
            (jar, Actor::Anonymous(session_id))
        }
    }
}

pub async fn register_like(
    State(state): State<AppState>,
    auth_user: MaybeAuthUser,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterLikeRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<LikeStatus>>), AppError> {
    let (jar, actor) = actor_for(auth_user, jar);
    let status = like_service::register_like(&state.pool, &actor, req.board_id).await?;
    Ok((StatusCode::CREATED, jar, Json(ApiResponse::new(status))))
}

pub async fn cancel_like(
    State(state): State<AppState>,
    auth_user: MaybeAuthUser,
    jar: CookieJar,
    ApiQuery(query): ApiQuery<LikeQuery>,
) -> Result<(CookieJar, Json<ApiResponse<CancelLikeResponse>>), AppError> {
    let (jar, actor) = actor_for(auth_user, jar);
    let cancelled = like_service::cancel_like(&state.pool, &actor, query.board_id).await?;
    Ok((jar, Json(ApiResponse::new(cancelled))))
}

pub async fn like_status(
    State(state): State<AppState>,
    auth_user: MaybeAuthUser,
    jar: CookieJar,
    ApiQuery(query): ApiQuery<LikeQuery>,
) -> Result<(CookieJar, Json<ApiResponse<LikeStatus>>), AppError> {
    let (jar, actor) = actor_for(auth_user, jar);
    let status = like_service::like_status(&state.pool, &actor, query.board_id).await?;
    Ok((jar, Json(ApiResponse::new(status))))
}
