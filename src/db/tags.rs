//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그와 게시글-태그 관계를 관리하는 SQL 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name). name은 UNIQUE
//! - `board_tags`: 게시글과 태그의 다대다(N:M) 관계 테이블

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use crate::error::AppError;
use crate::models::tag::{normalize_tag_names, TagSummary};

/// 모든 태그를 이름순으로, 붙어 있는 게시글 수와 함께 조회합니다.
///
/// 게시글이 하나도 없는 태그도 `LEFT JOIN` 덕분에 `board_count = 0`으로 포함됩니다.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<TagSummary>, AppError> {
    let tags = sqlx::query_as::<_, TagSummary>(
        r#"
        SELECT t.id, t.name, COUNT(bt.board_id) AS board_count
        FROM tags t
        LEFT JOIN board_tags bt ON bt.tag_id = t.id
        GROUP BY t.id, t.name
        ORDER BY t.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// 이름으로 태그를 찾고, 없으면 만들어서 id를 반환합니다.
///
/// `INSERT OR IGNORE`: 같은 이름이 이미 있으면 UNIQUE 충돌을 무시하고 넘어갑니다.
/// 그 다음 SELECT로 id를 읽으므로, 새로 만들었든 원래 있었든 같은 경로로 처리됩니다.
pub async fn get_or_create_tag(conn: &mut SqliteConnection, name: &str) -> Result<i64, AppError> {
    sqlx::query("INSERT OR IGNORE INTO tags (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    let id: i64 = sqlx::query_scalar("SELECT id FROM tags WHERE name = ?")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

    Ok(id)
}

/// 게시글의 태그를 주어진 목록으로 통째로 바꿉니다.
///
/// 기존 연결을 모두 지우고 새로 연결합니다. 이름은 `normalize_tag_names`로
/// 공백 제거와 중복 제거를 거치므로, 빈 목록을 주면 태그가 모두 떨어집니다.
/// 호출 측 트랜잭션 안에서 실행해야 중간 상태가 보이지 않습니다.
pub async fn replace_board_tags(
    conn: &mut SqliteConnection,
    board_id: i64,
    names: &[String],
) -> Result<Vec<String>, AppError> {
    sqlx::query("DELETE FROM board_tags WHERE board_id = ?")
        .bind(board_id)
        .execute(&mut *conn)
        .await?;

    let names = normalize_tag_names(names);
    for name in &names {
        let tag_id = get_or_create_tag(conn, name).await?;
        sqlx::query("INSERT OR IGNORE INTO board_tags (board_id, tag_id) VALUES (?, ?)")
            .bind(board_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(names)
}

/// 게시글에 붙은 태그 이름, 이름순
pub async fn board_tag_names<'c, E>(executor: E, board_id: i64) -> Result<Vec<String>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT t.name
        FROM tags t
        INNER JOIN board_tags bt ON bt.tag_id = t.id
        WHERE bt.board_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(board_id)
    .fetch_all(executor)
    .await?;

    Ok(names)
}
