//! # 좋아요 쿼리
//!
//! 중복 방지는 UNIQUE 제약에 맡깁니다. 동시에 두 요청이 들어와도
//! 둘 중 하나는 제약 위반이 되어 `DuplicateLike`로 바뀝니다.

use sqlx::SqliteExecutor;

use crate::error::{is_unique_violation, AppError};

fn duplicate_or_database(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::DuplicateLike
    } else {
        AppError::Database(e)
    }
}

pub async fn insert_like<'c, E>(executor: E, member_id: i64, board_id: i64) -> Result<i64, AppError>
where
    E: SqliteExecutor<'c>,
{
    let result = sqlx::query("INSERT INTO likes (member_id, board_id) VALUES (?, ?)")
        .bind(member_id)
        .bind(board_id)
        .execute(executor)
        .await
        .map_err(duplicate_or_database)?;

    Ok(result.last_insert_rowid())
}

/// 삭제된 행 수(0 또는 1)를 반환합니다.
pub async fn delete_like<'c, E>(executor: E, member_id: i64, board_id: i64) -> Result<u64, AppError>
where
    E: SqliteExecutor<'c>,
{
    let result = sqlx::query("DELETE FROM likes WHERE member_id = ? AND board_id = ?")
        .bind(member_id)
        .bind(board_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn insert_anonymous_like<'c, E>(
    executor: E,
    session_id: &str,
    board_id: i64,
) -> Result<i64, AppError>
where
    E: SqliteExecutor<'c>,
{
    let result = sqlx::query("INSERT INTO anonymous_likes (session_id, board_id) VALUES (?, ?)")
        .bind(session_id)
        .bind(board_id)
        .execute(executor)
        .await
        .map_err(duplicate_or_database)?;

    Ok(result.last_insert_rowid())
}

pub async fn delete_anonymous_like<'c, E>(
    executor: E,
    session_id: &str,
    board_id: i64,
) -> Result<u64, AppError>
where
    E: SqliteExecutor<'c>,
{
    let result = sqlx::query("DELETE FROM anonymous_likes WHERE session_id = ? AND board_id = ?")
        .bind(session_id)
        .bind(board_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// 회원 좋아요와 비회원 좋아요의 합계
pub async fn count_likes<'c, E>(executor: E, board_id: i64) -> Result<i64, AppError>
where
    E: SqliteExecutor<'c>,
{
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT (SELECT COUNT(*) FROM likes WHERE board_id = ?)
             + (SELECT COUNT(*) FROM anonymous_likes WHERE board_id = ?)
        "#,
    )
    .bind(board_id)
    .bind(board_id)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

pub async fn member_liked<'c, E>(executor: E, member_id: i64, board_id: i64) -> Result<bool, AppError>
where
    E: SqliteExecutor<'c>,
{
    let liked: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE member_id = ? AND board_id = ?)",
    )
    .bind(member_id)
    .bind(board_id)
    .fetch_one(executor)
    .await?;

    Ok(liked)
}

pub async fn session_liked<'c, E>(executor: E, session_id: &str, board_id: i64) -> Result<bool, AppError>
where
    E: SqliteExecutor<'c>,
{
    let liked: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM anonymous_likes WHERE session_id = ? AND board_id = ?)",
    )
    .bind(session_id)
    .bind(board_id)
    .fetch_one(executor)
    .await?;

    Ok(liked)
}
