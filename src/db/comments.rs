use sqlx::SqliteExecutor;

use crate::error::AppError;
use crate::models::comment::CommentResponse;

pub async fn insert_comment<'c, E>(
    executor: E,
    board_id: i64,
    member_id: i64,
    content: &str,
) -> Result<i64, AppError>
where
    E: SqliteExecutor<'c>,
{
    let result = sqlx::query("INSERT INTO comments (board_id, member_id, content) VALUES (?, ?, ?)")
        .bind(board_id)
        .bind(member_id)
        .bind(content)
        .execute(executor)
        .await?;

    Ok(result.last_insert_rowid())
}

/// 게시글의 댓글, 작성 순서대로
pub async fn list_comments<'c, E>(executor: E, board_id: i64) -> Result<Vec<CommentResponse>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let comments = sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT c.id, c.board_id, c.member_id, m.name AS writer, c.content, c.created_at
        FROM comments c
        JOIN members m ON m.id = c.member_id
        WHERE c.board_id = ?
        ORDER BY c.created_at, c.id
        "#,
    )
    .bind(board_id)
    .fetch_all(executor)
    .await?;

    Ok(comments)
}
