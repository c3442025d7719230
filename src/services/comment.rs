use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{WriteCommentRequest, WriteCommentResponse};

pub async fn write_comment(
    pool: &SqlitePool,
    member_id: i64,
    req: &WriteCommentRequest,
) -> Result<WriteCommentResponse, AppError> {
    let mut tx = db::begin_write(pool).await?;

    if !db::board_exists(&mut *tx, req.board_id).await? {
        return Err(AppError::BoardNotFound);
    }
    let id = db::insert_comment(&mut *tx, req.board_id, member_id, req.content.trim()).await?;

    tx.commit().await?;

    tracing::info!(comment_id = id, board_id = req.board_id, member_id, "comment created");
    Ok(WriteCommentResponse { id })
}
