//! # 이미지 업로드 파일 I/O
//!
//! 업로드된 이미지를 `uploads_path` 아래에 무작위 이름으로 저장하고,
//! `/uploads/{파일명}` 형태의 공개 URL을 돌려줍니다.
//! 저장된 파일은 라우터의 `ServeDir`가 그대로 서빙합니다.

use std::path::PathBuf;

use tokio::fs;
use uuid::Uuid;

use crate::error::AppError;

pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// 허용하는 Content-Type과 저장 확장자
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type.to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        _ => None,
    }
}

/// 이미지를 디스크에 저장하고 공개 URL을 반환합니다.
///
/// 디렉토리가 없으면 만듭니다. 빈 파일이나 허용하지 않는 형식은 400.
pub async fn store_image(
    uploads_path: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, AppError> {
    let extension = content_type.and_then(extension_for).ok_or_else(|| {
        AppError::BadRequest("Only png and jpeg images can be uploaded".to_string())
    })?;

    if data.is_empty() {
        return Err(AppError::BadRequest("Image file is empty".to_string()));
    }

    let file_name = format!("{}.{}", Uuid::now_v7(), extension);
    let dir = PathBuf::from(uploads_path);
    fs::create_dir_all(&dir).await?;
    fs::write(dir.join(&file_name), data).await?;

    tracing::info!(file = %file_name, bytes = data.len(), "image stored");
    Ok(format!("{}/{}", UPLOADS_URL_PREFIX, file_name))
}
