//! 조회 세션 쿠키
//!
//! 로그인 여부와 상관없이 브라우저마다 하나의 `viewer_session` 쿠키를 발급합니다.
//! 조회수 중복 방지와 비회원 좋아요의 식별자로 쓰입니다.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

pub const VIEWER_COOKIE: &str = "viewer_session";

/// 쿠키에 조회 세션이 있으면 그 값을, 없으면 새로 만들어 jar에 추가합니다.
///
/// 반환된 jar를 응답에 포함해야 새 쿠키가 클라이언트에 전달됩니다.
pub fn viewer_session(jar: CookieJar) -> (CookieJar, String) {
    if let Some(existing) = jar
        .get(VIEWER_COOKIE)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return (jar, existing);
    }

    let key = Uuid::now_v7().to_string();
    let cookie = Cookie::build((VIEWER_COOKIE, key.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::debug!(viewer = %key, "issued viewer session");
    (jar.add(cookie), key)
}
