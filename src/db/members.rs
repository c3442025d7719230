use sqlx::{SqliteExecutor, SqlitePool};

use crate::error::{is_unique_violation, AppError};
use crate::models::member::{Member, Role, UpdateMemberRequest};

/// 새 회원 정보
pub struct NewMember<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub phone_number: &'a str,
    pub role: Role,
    pub activation: bool,
}

/// 회원을 추가하고 새 id를 반환합니다.
///
/// 이메일이 이미 있으면 `DuplicateEmail`. 사전 조회를 통과한 동시 가입도
/// UNIQUE 제약에서 같은 에러가 됩니다.
pub async fn create_member(pool: &SqlitePool, member: &NewMember<'_>) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO members (email, password_hash, name, phone_number, role, activation)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(member.email)
    .bind(member.password_hash)
    .bind(member.name)
    .bind(member.phone_number)
    .bind(member.role)
    .bind(member.activation)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::DuplicateEmail
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(result.last_insert_rowid())
}

pub async fn find_member_by_id<'c, E>(executor: E, id: i64) -> Result<Option<Member>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let member = sqlx::query_as::<_, Member>(
        r#"
        SELECT id, email, password_hash, name, phone_number, role, activation,
               reference_url, part, organization, motto, created_at, updated_at
        FROM members
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(member)
}

pub async fn find_member_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Member>, AppError> {
    let member = sqlx::query_as::<_, Member>(
        r#"
        SELECT id, email, password_hash, name, phone_number, role, activation,
               reference_url, part, organization, motto, created_at, updated_at
        FROM members
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(member)
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE email = ?)")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// 보낸 필드만 덮어씁니다. (`COALESCE(?, 기존값)`)
pub async fn update_member(
    pool: &SqlitePool,
    id: i64,
    req: &UpdateMemberRequest,
) -> Result<Option<Member>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE members
        SET name          = COALESCE(?, name),
            phone_number  = COALESCE(?, phone_number),
            reference_url = COALESCE(?, reference_url),
            part          = COALESCE(?, part),
            organization  = COALESCE(?, organization),
            motto         = COALESCE(?, motto),
            updated_at    = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(req.name.as_deref().map(str::trim))
    .bind(req.phone_number.as_deref().map(str::trim))
    .bind(req.reference_url.as_deref())
    .bind(req.part)
    .bind(req.organization.as_deref())
    .bind(req.motto.as_deref())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_member_by_id(pool, id).await
}

/// 관리자 회원 목록. `activation`이 주어지면 그 상태의 회원만.
pub async fn list_members(
    pool: &SqlitePool,
    activation: Option<bool>,
) -> Result<Vec<Member>, AppError> {
    let members = sqlx::query_as::<_, Member>(
        r#"
        SELECT id, email, password_hash, name, phone_number, role, activation,
               reference_url, part, organization, motto, created_at, updated_at
        FROM members
        WHERE (? IS NULL OR activation = ?)
        ORDER BY id
        "#,
    )
    .bind(activation)
    .bind(activation)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

pub async fn set_activation(
    pool: &SqlitePool,
    id: i64,
    activation: bool,
) -> Result<Option<Member>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE members
        SET activation = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(activation)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_member_by_id(pool, id).await
}

// ── 리프레시 토큰 ──

pub async fn store_refresh_token(
    pool: &SqlitePool,
    member_id: i64,
    token_hash: &str,
    expires_at: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (member_id, token_hash, expires_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(member_id)
    .bind(token_hash)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// (member_id, expires_at)
pub async fn find_refresh_token(
    pool: &SqlitePool,
    token_hash: &str,
) -> Result<Option<(i64, String)>, AppError> {
    let row = sqlx::query_as::<_, (i64, String)>(
        r#"
        SELECT member_id, expires_at
        FROM refresh_tokens
        WHERE token_hash = ?
        "#,
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// 토큰을 지웠으면 `true`. 같은 토큰을 동시에 제시하면 한쪽만 `true`를 받습니다.
pub async fn delete_refresh_token(pool: &SqlitePool, token_hash: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = ?")
        .bind(token_hash)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn delete_member_refresh_tokens(pool: &SqlitePool, member_id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM refresh_tokens WHERE member_id = ?")
        .bind(member_id)
        .execute(pool)
        .await?;

    Ok(())
}

// ── 이메일 인증 코드 ──

/// 이메일당 코드 하나. 다시 요청하면 새 코드로 덮어쓰고 인증 상태를 초기화합니다.
pub async fn upsert_email_code(
    pool: &SqlitePool,
    email: &str,
    code: &str,
    expires_at: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO email_verifications (email, code, expires_at, verified)
        VALUES (?, ?, ?, 0)
        ON CONFLICT(email) DO UPDATE
        SET code = excluded.code, expires_at = excluded.expires_at, verified = 0
        "#,
    )
    .bind(email)
    .bind(code)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// (code, expires_at, verified)
pub async fn find_email_code(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<(String, String, bool)>, AppError> {
    let row = sqlx::query_as::<_, (String, String, bool)>(
        "SELECT code, expires_at, verified FROM email_verifications WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn mark_email_verified(pool: &SqlitePool, email: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE email_verifications SET verified = 1 WHERE email = ?")
        .bind(email)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn is_email_verified(pool: &SqlitePool, email: &str) -> Result<bool, AppError> {
    let verified: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM email_verifications WHERE email = ? AND verified = 1)",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    fn new_member(email: &str) -> NewMember<'_> {
        NewMember {
            email,
            password_hash: "hash",
            name: "writer",
            phone_number: "010-0000-0000",
            role: Role::General,
            activation: false,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let pool = memory_pool().await.unwrap();
        create_member(&pool, &new_member("a@x.com")).await.unwrap();

        let err = create_member(&pool, &new_member("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
        assert!(email_exists(&pool, "a@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn update_only_touches_sent_fields() {
        let pool = memory_pool().await.unwrap();
        let id = create_member(&pool, &new_member("a@x.com")).await.unwrap();

        let req = UpdateMemberRequest {
            motto: Some("hello".to_string()),
            ..Default::default()
        };
        let member = update_member(&pool, id, &req).await.unwrap().unwrap();
        assert_eq!(member.motto.as_deref(), Some("hello"));
        assert_eq!(member.name, "writer");

        assert!(update_member(&pool, 999, &req).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn activation_filter() {
        let pool = memory_pool().await.unwrap();
        let a = create_member(&pool, &new_member("a@x.com")).await.unwrap();
        create_member(&pool, &new_member("b@x.com")).await.unwrap();
        set_activation(&pool, a, true).await.unwrap();

        assert_eq!(list_members(&pool, None).await.unwrap().len(), 2);
        let active = list_members(&pool, Some(true)).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, a);
        assert_eq!(list_members(&pool, Some(false)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn email_code_upsert_resets_verification() {
        let pool = memory_pool().await.unwrap();
        upsert_email_code(&pool, "a@x.com", "111111", "2999-01-01T00:00:00.000Z")
            .await
            .unwrap();
        mark_email_verified(&pool, "a@x.com").await.unwrap();
        assert!(is_email_verified(&pool, "a@x.com").await.unwrap());

        upsert_email_code(&pool, "a@x.com", "222222", "2999-01-01T00:00:00.000Z")
            .await
            .unwrap();
        assert!(!is_email_verified(&pool, "a@x.com").await.unwrap());
        let (code, _, _) = find_email_code(&pool, "a@x.com").await.unwrap().unwrap();
        assert_eq!(code, "222222");
    }
}
