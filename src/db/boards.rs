//! # 게시글 데이터베이스 쿼리 모듈
//!
//! ## 목록 쿼리 구조
//! ```text
//! SELECT 게시글 + 작성자 이름 + (회원 좋아요 수 + 비회원 좋아요 수) AS like_count
//! FROM boards JOIN members
//! WHERE [검색어 태그가 붙은 게시글만]
//! ORDER BY BoardSort::order_clause()
//! LIMIT size + 1 OFFSET page * size
//! ```
//!
//! 좋아요 수는 목록을 조회할 때마다 상관 서브쿼리로 셉니다. 별도 카운터 컬럼을
//! 두지 않으므로 좋아요 등록/취소와 집계가 어긋날 일이 없습니다.

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use crate::error::AppError;
use crate::models::board::{Board, BoardSort, BoardSummary};
use crate::models::page::PageRequest;

/// 목록 행의 SELECT 절. 좋아요 합계를 `like_count`로 노출해야 LIKES 정렬이 동작합니다.
const SUMMARY_COLUMNS: &str = r#"
    SELECT b.id, b.title, m.name AS writer, b.created_at, b.views,
           (SELECT COUNT(*) FROM likes l WHERE l.board_id = b.id)
         + (SELECT COUNT(*) FROM anonymous_likes a WHERE a.board_id = b.id) AS like_count
    FROM boards b
    JOIN members m ON m.id = b.member_id
"#;

pub async fn insert_board(
    conn: &mut SqliteConnection,
    member_id: i64,
    title: &str,
    content: &str,
) -> Result<i64, AppError> {
    let result = sqlx::query("INSERT INTO boards (member_id, title, content) VALUES (?, ?, ?)")
        .bind(member_id)
        .bind(title)
        .bind(content)
        .execute(conn)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn find_board<'c, E>(executor: E, id: i64) -> Result<Option<Board>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let board = sqlx::query_as::<_, Board>(
        r#"
        SELECT id, member_id, title, content, views, created_at
        FROM boards
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(board)
}

pub async fn board_exists<'c, E>(executor: E, id: i64) -> Result<bool, AppError>
where
    E: SqliteExecutor<'c>,
{
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM boards WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(exists)
}

/// 이 조회 세션의 첫 조회일 때만 조회수를 1 올립니다.
///
/// `board_views`의 (board_id, viewer_key) 기본키에 `INSERT OR IGNORE`가 막히면
/// 이미 본 게시글입니다. 반환값은 조회수가 올랐는지 여부.
pub async fn record_view(
    conn: &mut SqliteConnection,
    board_id: i64,
    viewer_key: &str,
) -> Result<bool, AppError> {
    let inserted = sqlx::query("INSERT OR IGNORE INTO board_views (board_id, viewer_key) VALUES (?, ?)")
        .bind(board_id)
        .bind(viewer_key)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if inserted == 0 {
        return Ok(false);
    }

    sqlx::query("UPDATE boards SET views = views + 1 WHERE id = ?")
        .bind(board_id)
        .execute(&mut *conn)
        .await?;

    Ok(true)
}

/// 전체 게시글 목록. `keyword`가 있으면 그 이름의 태그가 붙은 게시글만.
///
/// 태그 이름 비교는 대소문자를 구분합니다 (SQLite 기본 BINARY 비교).
/// `page.fetch_limit()`만큼 가져오므로 호출 측에서 `Slice::from_overfetch`로 자릅니다.
pub async fn list_boards(
    pool: &SqlitePool,
    sort: BoardSort,
    keyword: Option<&str>,
    page: PageRequest,
) -> Result<Vec<BoardSummary>, AppError> {
    // ORDER BY 절은 BoardSort가 주는 고정 문자열이라 format!으로 넣어도 안전합니다.
    let sql = format!(
        r#"
        {SUMMARY_COLUMNS}
        WHERE (? IS NULL OR EXISTS (
            SELECT 1
            FROM board_tags bt
            JOIN tags t ON t.id = bt.tag_id
            WHERE bt.board_id = b.id AND t.name = ?
        ))
        ORDER BY {order}
        LIMIT ? OFFSET ?
        "#,
        order = sort.order_clause(),
    );

    let rows = sqlx::query_as::<_, BoardSummary>(&sql)
        .bind(keyword)
        .bind(keyword)
        .bind(page.fetch_limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// 내가 쓴 게시글, 최신순
pub async fn list_member_boards(
    pool: &SqlitePool,
    member_id: i64,
    page: PageRequest,
) -> Result<Vec<BoardSummary>, AppError> {
    let sql = format!(
        r#"
        {SUMMARY_COLUMNS}
        WHERE b.member_id = ?
        ORDER BY {order}
        LIMIT ? OFFSET ?
        "#,
        order = BoardSort::Latest.order_clause(),
    );

    let rows = sqlx::query_as::<_, BoardSummary>(&sql)
        .bind(member_id)
        .bind(page.fetch_limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// 내가 좋아요한 게시글, 최신순
pub async fn list_liked_boards(
    pool: &SqlitePool,
    member_id: i64,
    page: PageRequest,
) -> Result<Vec<BoardSummary>, AppError> {
    let sql = format!(
        r#"
        {SUMMARY_COLUMNS}
        WHERE EXISTS (SELECT 1 FROM likes mine WHERE mine.board_id = b.id AND mine.member_id = ?)
        ORDER BY {order}
        LIMIT ? OFFSET ?
        "#,
        order = BoardSort::Latest.order_clause(),
    );

    let rows = sqlx::query_as::<_, BoardSummary>(&sql)
        .bind(member_id)
        .bind(page.fetch_limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

// ── 첨부 이미지 ──

pub async fn insert_board_images(
    conn: &mut SqliteConnection,
    board_id: i64,
    urls: &[String],
) -> Result<(), AppError> {
    for url in urls {
        sqlx::query("INSERT INTO board_images (board_id, url) VALUES (?, ?)")
            .bind(board_id)
            .bind(url.trim())
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

pub async fn list_board_images<'c, E>(executor: E, board_id: i64) -> Result<Vec<String>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let urls = sqlx::query_scalar::<_, String>(
        "SELECT url FROM board_images WHERE board_id = ? ORDER BY id",
    )
    .bind(board_id)
    .fetch_all(executor)
    .await?;

    Ok(urls)
}
