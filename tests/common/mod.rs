//! 통합 테스트 공용 도우미
//!
//! 인메모리 SQLite에 마이그레이션을 적용하고, 실제와 같은 라우터를
//! `axum_test::TestServer`로 감쌉니다.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use boardroom::{config::Config, db, routes::AppState, services::mailer::LogMailer};
use serde_json::{json, Value};
use sqlx::SqlitePool;

pub const PASSWORD: &str = "pass1234";

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub uploads_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.uploads_path);
    }
}

pub fn test_config() -> Config {
    let uploads_path = std::env::temp_dir().join(format!("boardroom-uploads-{}", uuid::Uuid::now_v7()));
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-for-testing-only".to_string(),
        uploads_path: uploads_path.to_string_lossy().to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        access_token_minutes: 15,
        refresh_token_days: 7,
        admin_emails: vec!["admin@x.com".to_string()],
        require_email_verification: false,
        cors_origins: vec![],
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let pool = db::memory_pool().await.expect("Failed to create test database");
    let state = AppState::new(pool.clone(), &config, Arc::new(LogMailer));
    let router = boardroom::app(state, &config.cors_origins);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        uploads_path: PathBuf::from(&config.uploads_path),
    }
}

pub fn bearer(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(AUTHORIZATION, format!("Bearer {}", token))
}

impl TestApp {
    /// 가입 후 member_id를 돌려줍니다.
    pub async fn signup(&self, email: &str) -> i64 {
        let response = self
            .server
            .post("/api/v1/auth/signup")
            .json(&json!({
                "email": email,
                "password": PASSWORD,
                "check_password": PASSWORD,
                "name": email.split('@').next().unwrap_or(email),
                "phone_number": "010-1234-5678",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"]["member_id"].as_i64().unwrap()
    }

    /// 로그인 응답의 data 부분
    pub async fn login(&self, email: &str) -> Value {
        let response = self
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": email, "password": PASSWORD }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["data"].clone()
    }

    /// 가입 + 로그인, (member_id, access_token)
    pub async fn member(&self, email: &str) -> (i64, String) {
        let member_id = self.signup(email).await;
        let login = self.login(email).await;
        let token = login["access_token"].as_str().unwrap().to_string();
        (member_id, token)
    }

    pub async fn write_board(&self, token: &str, title: &str, tags: &[&str]) -> i64 {
        let response = bearer(self.server.post("/api/v1/boards"), token)
            .json(&json!({
                "title": title,
                "content": format!("{} content", title),
                "tags": tags,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"]["id"].as_i64().unwrap()
    }

    pub async fn like(&self, token: &str, board_id: i64) {
        bearer(self.server.post("/api/v1/likes"), token)
            .json(&json!({ "board_id": board_id }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    /// 목록 응답의 data 부분
    pub async fn list(&self, query: &str) -> Value {
        let response = self.server.get(&format!("/api/v1/boards{}", query)).await;
        response.assert_status_ok();
        response.json::<Value>()["data"].clone()
    }
}

pub fn ids(slice: &Value) -> Vec<i64> {
    slice["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
