//! 요청 본문/쿼리 추출기
//!
//! Axum 기본 `Json`/`Query`는 실패 시 평문 응답을 돌려주므로,
//! 여기서 한 번 감싸서 모든 실패가 `{ "error": ... }` 형태로 나가게 합니다.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::Validate;

/// JSON 본문을 파싱한 뒤 `Validate`까지 통과한 값
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let errors = value.validate();
        if !errors.is_empty() {
            return Err(AppError::ValidationFailed(errors));
        }

        Ok(ValidatedJson(value))
    }
}

/// 쿼리 문자열 추출. 파싱 실패는 400 `bad_request`.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(ApiQuery(value))
    }
}
