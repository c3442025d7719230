//! # 관리자 API
//!
//! `AdminUser` 추출기가 관리자 권한을 확인하므로 핸들러에서는 검사하지 않습니다.
//!
//! - `GET /api/v1/admin/members?activation=true|false`
//! - `PATCH /api/v1/admin/members/{id}/activation` + `{ "activation": true }`

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    db,
    error::AppError,
    middleware::{AdminUser, ApiQuery, ValidatedJson},
    models::*,
    routes::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct MemberFilter {
    pub activation: Option<bool>,
}

pub async fn list_members(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiQuery(filter): ApiQuery<MemberFilter>,
) -> Result<Json<ApiResponse<Vec<MemberResponse>>>, AppError> {
    let members = db::list_members(&state.pool, filter.activation).await?;
    tracing::debug!(admin_id = admin.member_id, count = members.len(), "admin listed members");

    Ok(Json(ApiResponse::new(
        members.into_iter().map(MemberResponse::from).collect(),
    )))
}

pub async fn set_activation(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(member_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ActivationRequest>,
) -> Result<Json<ApiResponse<MemberResponse>>, AppError> {
    let member = db::set_activation(&state.pool, member_id, req.activation)
        .await?
        .ok_or(AppError::MemberNotFound)?;

    tracing::info!(
        admin_id = admin.member_id,
        member_id,
        activation = req.activation,
        "member activation changed"
    );
    Ok(Json(ApiResponse::new(member.into())))
}
