//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스(services/)와 라우트 핸들러(routes/)가 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `members`: 회원, 리프레시 토큰, 이메일 인증 코드
//! - `boards`: 게시글 작성/조회, 목록 정렬/필터, 조회수, 첨부 이미지
//! - `likes`: 회원/비회원 좋아요
//! - `comments`: 댓글
//! - `tags`: 태그와 게시글-태그 관계
//!
//! 한 쿼리로 끝나는 함수는 `SqliteExecutor`를 받아서 풀과 트랜잭션 양쪽에서 쓸 수 있고,
//! 여러 쿼리를 묶어야 하는 함수는 `&mut SqliteConnection`을 받습니다.
//!
//! 쓰기 트랜잭션은 [`begin_write`]로 엽니다. SQLite는 읽기로 시작한 트랜잭션을
//! 쓰기로 올리지 못하고 즉시 `database is locked`를 돌려주기 때문에,
//! 처음부터 쓰기 잠금을 잡고 다른 쓰기는 busy_timeout 동안 기다리게 합니다.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

pub mod boards;
pub mod comments;
pub mod likes;
pub mod members;
pub mod tags;

pub use boards::*;
pub use comments::*;
pub use likes::*;
pub use members::*;
pub use tags::*;

/// 쓰기 잠금을 기다리는 최대 시간
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// 연결 풀을 만들고 마이그레이션을 적용합니다.
///
/// 파일 DB는 없으면 새로 만들고, 외래키 제약은 항상 켭니다.
/// WAL 모드라서 쓰기 중에도 읽기는 막히지 않습니다.
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// 테스트용 인메모리 DB.
///
/// `sqlite::memory:`는 연결마다 별개의 DB가 되므로 연결을 하나로 고정하고,
/// 유휴 연결이 닫혀 데이터가 사라지지 않게 합니다.
pub async fn memory_pool() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// 쓰기 잠금을 먼저 잡는 트랜잭션(`BEGIN IMMEDIATE`)을 엽니다.
///
/// 존재 확인 같은 읽기 뒤에 쓰기가 오는 서비스 함수는 모두 이것으로 시작합니다.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
