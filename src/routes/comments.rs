use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppError,
    middleware::{AuthUser, ValidatedJson},
    models::*,
    routes::AppState,
    services::comment as comment_service,
};

/// `POST /comments` + `{ "board_id": 1, "content": "..." }`
pub async fn write_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<WriteCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WriteCommentResponse>>), AppError> {
    let created = comment_service::write_comment(&state.pool, auth_user.member_id, &req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(created))))
}
