//! # 좋아요 서비스
//!
//! 요청 주체(`Actor`)가 회원이면 `likes`, 비회원이면 `anonymous_likes`에 기록합니다.

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{Actor, CancelLikeResponse, LikeStatus};

pub async fn register_like(
    pool: &SqlitePool,
    actor: &Actor,
    board_id: i64,
) -> Result<LikeStatus, AppError> {
    let mut tx = db::begin_write(pool).await?;

    if !db::board_exists(&mut *tx, board_id).await? {
        return Err(AppError::BoardNotFound);
    }

    match actor {
        Actor::Member(member_id) => {
            db::insert_like(&mut *tx, *member_id, board_id).await?;
        }
        Actor::Anonymous(session_id) => {
            db::insert_anonymous_like(&mut *tx, session_id, board_id).await?;
        }
    }
    let like_count = db::count_likes(&mut *tx, board_id).await?;

    tx.commit().await?;

    tracing::info!(board_id, actor = ?actor, like_count, "like registered");
    Ok(LikeStatus {
        board_id,
        like_count,
        is_liked: true,
    })
}

/// 좋아요 취소. 좋아요가 없었으면 `affected_rows = 0`이고 에러는 아닙니다.
pub async fn cancel_like(
    pool: &SqlitePool,
    actor: &Actor,
    board_id: i64,
) -> Result<CancelLikeResponse, AppError> {
    let mut tx = db::begin_write(pool).await?;

    let affected_rows = match actor {
        Actor::Member(member_id) => db::delete_like(&mut *tx, *member_id, board_id).await?,
        Actor::Anonymous(session_id) => {
            db::delete_anonymous_like(&mut *tx, session_id, board_id).await?
        }
    };

    tx.commit().await?;

    tracing::info!(board_id, actor = ?actor, affected_rows, "like cancelled");
    Ok(CancelLikeResponse {
        board_id,
        affected_rows,
    })
}

pub async fn like_status(
    pool: &SqlitePool,
    actor: &Actor,
    board_id: i64,
) -> Result<LikeStatus, AppError> {
    if !db::board_exists(pool, board_id).await? {
        return Err(AppError::BoardNotFound);
    }

    let like_count = db::count_likes(pool, board_id).await?;
    let is_liked = match actor {
        Actor::Member(member_id) => db::member_liked(pool, *member_id, board_id).await?,
        Actor::Anonymous(session_id) => db::session_liked(pool, session_id, board_id).await?,
    };

    Ok(LikeStatus {
        board_id,
        like_count,
        is_liked,
    })
}
