//! # 게시글 서비스
//!
//! 쓰기 경로(작성, 조회수 증가를 포함한 상세 조회, 태그 재지정)는
//! 각각 하나의 트랜잭션으로 실행됩니다.

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{
    Actor, BoardListQuery, BoardSort, BoardSummary, PageRequest, ReadBoardResponse, Slice,
    WriteBoardRequest, WriteBoardResponse, Writer,
};

pub async fn write_board(
    pool: &SqlitePool,
    member_id: i64,
    req: &WriteBoardRequest,
) -> Result<WriteBoardResponse, AppError> {
    let mut tx = db::begin_write(pool).await?;

    if db::find_member_by_id(&mut *tx, member_id).await?.is_none() {
        return Err(AppError::MemberNotFound);
    }

    let title = req.title.trim();
    let board_id = db::insert_board(&mut tx, member_id, title, &req.content).await?;
    let tags = db::replace_board_tags(&mut tx, board_id, &req.tags).await?;
    db::insert_board_images(&mut tx, board_id, &req.image_urls).await?;

    tx.commit().await?;

    tracing::info!(board_id, member_id, tags = ?tags, "board created");
    Ok(WriteBoardResponse {
        id: board_id,
        title: title.to_string(),
    })
}

/// 게시글 상세 조회. 이 조회 세션의 첫 조회라면 조회수가 1 올라간 값이 응답에 반영됩니다.
pub async fn read_board(
    pool: &SqlitePool,
    board_id: i64,
    viewer_key: &str,
    actor: &Actor,
) -> Result<ReadBoardResponse, AppError> {
    let mut tx = db::begin_write(pool).await?;

    let board = db::find_board(&mut *tx, board_id)
        .await?
        .ok_or(AppError::BoardNotFound)?;

    let counted = db::record_view(&mut tx, board_id, viewer_key).await?;
    let views = if counted { board.views + 1 } else { board.views };

    let writer = db::find_member_by_id(&mut *tx, board.member_id)
        .await?
        .ok_or(AppError::MemberNotFound)?;
    let like_count = db::count_likes(&mut *tx, board_id).await?;
    let is_liked = match actor {
        Actor::Member(member_id) => db::member_liked(&mut *tx, *member_id, board_id).await?,
        Actor::Anonymous(session_id) => db::session_liked(&mut *tx, session_id, board_id).await?,
    };
    let tags = db::board_tag_names(&mut *tx, board_id).await?;
    let image_urls = db::list_board_images(&mut *tx, board_id).await?;
    let comments = db::list_comments(&mut *tx, board_id).await?;

    tx.commit().await?;

    Ok(ReadBoardResponse {
        id: board.id,
        title: board.title,
        content: board.content,
        writer: Writer {
            id: writer.id,
            name: writer.name,
        },
        created_at: board.created_at,
        like_count,
        views,
        is_liked,
        tags,
        image_urls,
        comments,
    })
}

pub async fn list_boards(
    pool: &SqlitePool,
    query: &BoardListQuery,
) -> Result<Slice<BoardSummary>, AppError> {
    let page = PageRequest::new(query.page, query.size)?;
    let sort = BoardSort::parse(query.sort_by.as_deref());

    let rows = db::list_boards(pool, sort, query.keyword(), page).await?;
    Ok(Slice::from_overfetch(rows, page))
}

pub async fn my_boards(
    pool: &SqlitePool,
    member_id: i64,
    page: PageRequest,
) -> Result<Slice<BoardSummary>, AppError> {
    let rows = db::list_member_boards(pool, member_id, page).await?;
    Ok(Slice::from_overfetch(rows, page))
}

pub async fn my_liked_boards(
    pool: &SqlitePool,
    member_id: i64,
    page: PageRequest,
) -> Result<Slice<BoardSummary>, AppError> {
    let rows = db::list_liked_boards(pool, member_id, page).await?;
    Ok(Slice::from_overfetch(rows, page))
}

/// 게시글의 태그 목록을 통째로 바꿉니다. 작성자만 가능합니다.
pub async fn assign_tags(
    pool: &SqlitePool,
    board_id: i64,
    member_id: i64,
    names: &[String],
) -> Result<Vec<String>, AppError> {
    let mut tx = db::begin_write(pool).await?;

    let board = db::find_board(&mut *tx, board_id)
        .await?
        .ok_or(AppError::BoardNotFound)?;
    if board.member_id != member_id {
        return Err(AppError::Forbidden(
            "Only the writer can change tags".to_string(),
        ));
    }

    db::replace_board_tags(&mut tx, board_id, names).await?;
    let tags = db::board_tag_names(&mut *tx, board_id).await?;

    tx.commit().await?;

    tracing::info!(board_id, member_id, tags = ?tags, "board tags replaced");
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_member, memory_pool, NewMember};
    use crate::models::Role;

    async fn seed_member(pool: &SqlitePool, email: &str) -> i64 {
        create_member(
            pool,
            &NewMember {
                email,
                password_hash: "hash",
                name: "writer",
                phone_number: "010",
                role: Role::General,
                activation: false,
            },
        )
        .await
        .unwrap()
    }

    fn board_request(title: &str, tags: &[&str]) -> WriteBoardRequest {
        WriteBoardRequest {
            title: title.to_string(),
            content: "content".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_urls: vec!["/uploads/a.png".to_string()],
        }
    }

    #[tokio::test]
    async fn write_requires_existing_member() {
        let pool = memory_pool().await.unwrap();
        let err = write_board(&pool, 999, &board_request("t", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MemberNotFound));
    }

    #[tokio::test]
    async fn read_counts_first_view_per_session() {
        let pool = memory_pool().await.unwrap();
        let member = seed_member(&pool, "a@x.com").await;
        let written = write_board(&pool, member, &board_request("hello", &["rust", "rust"]))
            .await
            .unwrap();
        assert_eq!(written.title, "hello");

        let actor = Actor::Anonymous("viewer-1".to_string());
        let first = read_board(&pool, written.id, "viewer-1", &actor).await.unwrap();
        assert_eq!(first.views, 1);
        assert_eq!(first.tags, vec!["rust"]);
        assert_eq!(first.image_urls, vec!["/uploads/a.png"]);
        assert_eq!(first.writer.id, member);
        assert!(!first.is_liked);

        let again = read_board(&pool, written.id, "viewer-1", &actor).await.unwrap();
        assert_eq!(again.views, 1);

        let other = read_board(&pool, written.id, "viewer-2", &Actor::Member(member))
            .await
            .unwrap();
        assert_eq!(other.views, 2);
    }

    #[tokio::test]
    async fn read_missing_board_is_not_found() {
        let pool = memory_pool().await.unwrap();
        let err = read_board(&pool, 1, "v", &Actor::Anonymous("v".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BoardNotFound));
    }

    #[tokio::test]
    async fn only_writer_can_assign_tags() {
        let pool = memory_pool().await.unwrap();
        let writer = seed_member(&pool, "a@x.com").await;
        let other = seed_member(&pool, "b@x.com").await;
        let board = write_board(&pool, writer, &board_request("t", &["old"]))
            .await
            .unwrap();

        let err = assign_tags(&pool, board.id, other, &["new".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let tags = assign_tags(&pool, board.id, writer, &["new".to_string()])
            .await
            .unwrap();
        assert_eq!(tags, vec!["new"]);
    }

    #[tokio::test]
    async fn list_rejects_bad_page_and_defaults_sort() {
        let pool = memory_pool().await.unwrap();
        let bad = BoardListQuery {
            size: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            list_boards(&pool, &bad).await,
            Err(AppError::ValidationFailed(_))
        ));

        let unknown_sort = BoardListQuery {
            sort_by: Some("popular".to_string()),
            ..Default::default()
        };
        let slice = list_boards(&pool, &unknown_sort).await.unwrap();
        assert!(slice.content.is_empty());
        assert!(!slice.has_next);
    }
}
