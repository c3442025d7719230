//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /api/v1/health` → `{ "data": { "status": "ok", "database": "ok" } }`
//!
//! DB에 `SELECT 1`을 보내서 연결 풀까지 살아 있는지 확인합니다.
//! 로드밸런서나 컨테이너 헬스체크가 호출합니다.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{error::AppError, models::ApiResponse, routes::AppState};

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(Json(ApiResponse::new(json!({
        "status": "ok",
        "database": "ok",
    }))))
}
