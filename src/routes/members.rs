use axum::{extract::State, Json};

use crate::{
    db,
    error::AppError,
    middleware::{AuthUser, ValidatedJson},
    models::*,
    routes::AppState,
};

/// `GET /members`: 토큰 주인의 프로필
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<MemberResponse>>, AppError> {
    let member = db::find_member_by_id(&state.pool, auth_user.member_id)
        .await?
        .ok_or(AppError::MemberNotFound)?;

    Ok(Json(ApiResponse::new(member.into())))
}

/// `PATCH /members`: 보낸 필드만 변경
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateMemberRequest>,
) -> Result<Json<ApiResponse<MemberResponse>>, AppError> {
    let member = db::update_member(&state.pool, auth_user.member_id, &req)
        .await?
        .ok_or(AppError::MemberNotFound)?;

    tracing::info!(member_id = member.id, "profile updated");
    Ok(Json(ApiResponse::new(member.into())))
}
