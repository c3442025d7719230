use serde::Serialize;

/// 성공 응답 봉투: `{ "data": ... }`
///
/// 실패 응답(`{ "error": ... }`)은 `AppError::into_response`가 만듭니다.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
