//! 게시글, 좋아요, 댓글, 태그 API 통합 테스트

mod common;

use axum::http::header::COOKIE;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use boardroom::middleware::viewer::VIEWER_COOKIE;
use common::{bearer, ids, spawn_app};
use serde_json::{json, Value};

// ============================================================================
// 작성 / 상세 조회
// ============================================================================

#[tokio::test]
async fn scenario_views_likes_and_likes_ranking() {
    let app = spawn_app().await;
    let (owner_id, owner) = app.member("a@x.com").await;
    let (_, fan) = app.member("b@x.com").await;

    let response = bearer(app.server.post("/api/v1/boards"), &owner)
        .json(&json!({ "title": "T", "content": "C" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let first = response.json::<Value>()["data"]["id"].as_i64().unwrap();

    let read = app.server.get(&format!("/api/v1/boards/{}", first)).await;
    read.assert_status_ok();
    let body: Value = read.json();
    assert_eq!(body["data"]["views"], 1);
    assert_eq!(body["data"]["title"], "T");
    assert_eq!(body["data"]["content"], "C");
    assert_eq!(body["data"]["writer"]["id"], owner_id);

    let second = app.write_board(&owner, "second", &[]).await;
    app.like(&fan, second).await;

    let status = app
        .server
        .get(&format!("/api/v1/likes?board_id={}", second))
        .await;
    status.assert_status_ok();
    assert_eq!(status.json::<Value>()["data"]["like_count"], 1);

    let slice = app.list("?sortBy=LIKES").await;
    assert_eq!(ids(&slice), vec![second, first]);
    assert_eq!(slice["content"][0]["like_count"], 1);
    assert_eq!(slice["content"][1]["like_count"], 0);
}

#[tokio::test]
async fn write_then_read_round_trips() {
    let app = spawn_app().await;
    let (owner_id, owner) = app.member("a@x.com").await;

    let response = bearer(app.server.post("/api/v1/boards"), &owner)
        .json(&json!({
            "title": "Round trip",
            "content": "body text",
            "tags": ["rust", " rust ", "axum"],
            "image_urls": ["/uploads/one.png"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

    let body: Value = app.server.get(&format!("/api/v1/boards/{}", id)).await.json();
    let data = &body["data"];
    assert_eq!(data["id"], id);
    assert_eq!(data["title"], "Round trip");
    assert_eq!(data["content"], "body text");
    assert_eq!(data["writer"]["id"], owner_id);
    assert_eq!(data["tags"], json!(["axum", "rust"]));
    assert_eq!(data["image_urls"], json!(["/uploads/one.png"]));
    assert_eq!(data["comments"], json!([]));
}

#[tokio::test]
async fn writing_requires_login_and_valid_fields() {
    let app = spawn_app().await;
    let (_, token) = app.member("a@x.com").await;

    app.server
        .post("/api/v1/boards")
        .json(&json!({ "title": "T", "content": "C" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = bearer(app.server.post("/api/v1/boards"), &token)
        .json(&json!({ "title": "", "content": "C" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_failed");
    assert!(body["error"]["details"]["title"].is_array());
}

#[tokio::test]
async fn view_counts_once_per_viewer_session() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let id = app.write_board(&owner, "viewed", &[]).await;
    let path = format!("/api/v1/boards/{}", id);

    let first = app.server.get(&path).await;
    assert_eq!(first.json::<Value>()["data"]["views"], 1);
    let session = first.cookie(VIEWER_COOKIE).value().to_string();

    let again = app
        .server
        .get(&path)
        .add_header(COOKIE, format!("{}={}", VIEWER_COOKIE, session))
        .await;
    again.assert_status_ok();
    assert_eq!(again.json::<Value>()["data"]["views"], 1);

    // 쿠키 없는 새 방문자
    let stranger = app.server.get(&path).await;
    assert_eq!(stranger.json::<Value>()["data"]["views"], 2);
}

#[tokio::test]
async fn unknown_board_is_not_found() {
    let app = spawn_app().await;

    let response = app.server.get("/api/v1/boards/404").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "board_not_found");
}

// ============================================================================
// 목록
// ============================================================================

#[tokio::test]
async fn keyword_returns_exactly_the_tagged_boards_newest_first() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;

    let old_rust = app.write_board(&owner, "old rust", &["rust"]).await;
    app.write_board(&owner, "web", &["web"]).await;
    let new_rust = app.write_board(&owner, "new rust", &["rust", "web"]).await;
    app.write_board(&owner, "untagged", &[]).await;

    let slice = app.list("?keyword=rust").await;
    assert_eq!(ids(&slice), vec![new_rust, old_rust]);

    // 태그 이름은 대소문자를 구분
    let slice = app.list("?keyword=Rust").await;
    assert!(ids(&slice).is_empty());

    // 앞뒤 공백은 태그 이름처럼 걷어냄
    let slice = app.list("?keyword=%20rust%20").await;
    assert_eq!(ids(&slice), vec![new_rust, old_rust]);

    // 공백 검색어는 필터 없음
    let slice = app.list("?keyword=%20").await;
    assert_eq!(ids(&slice).len(), 4);
}

#[tokio::test]
async fn views_sort_is_non_increasing() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let quiet = app.write_board(&owner, "quiet", &[]).await;
    let busy = app.write_board(&owner, "busy", &[]).await;
    let medium = app.write_board(&owner, "medium", &[]).await;

    // 쿠키 없는 요청은 매번 새 조회 세션
    for _ in 0..3 {
        app.server.get(&format!("/api/v1/boards/{}", busy)).await;
    }
    app.server.get(&format!("/api/v1/boards/{}", medium)).await;

    let slice = app.list("?sortBy=views").await;
    assert_eq!(ids(&slice), vec![busy, medium, quiet]);

    let views: Vec<i64> = slice["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["views"].as_i64().unwrap())
        .collect();
    assert!(views.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn likes_sort_counts_member_and_anonymous_likes() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let (_, fan) = app.member("b@x.com").await;
    let one = app.write_board(&owner, "one like", &[]).await;
    let two = app.write_board(&owner, "two likes", &[]).await;
    let none = app.write_board(&owner, "no likes", &[]).await;

    app.like(&fan, one).await;
    app.like(&fan, two).await;
    app.server
        .post("/api/v1/likes")
        .json(&json!({ "board_id": two }))
        .await
        .assert_status(StatusCode::CREATED);

    let slice = app.list("?sortBy=likes").await;
    assert_eq!(ids(&slice), vec![two, one, none]);
    let likes: Vec<i64> = slice["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["like_count"].as_i64().unwrap())
        .collect();
    assert_eq!(likes, vec![2, 1, 0]);
}

#[tokio::test]
async fn slices_report_has_next() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let first = app.write_board(&owner, "1", &[]).await;
    let second = app.write_board(&owner, "2", &[]).await;
    let third = app.write_board(&owner, "3", &[]).await;

    let page0 = app.list("?page=0&size=2").await;
    assert_eq!(ids(&page0), vec![third, second]);
    assert_eq!(page0["has_next"], true);
    assert_eq!(page0["size"], 2);

    let page1 = app.list("?page=1&size=2").await;
    assert_eq!(ids(&page1), vec![first]);
    assert_eq!(page1["has_next"], false);
}

#[tokio::test]
async fn bad_page_parameters_are_rejected_and_unknown_sort_is_latest() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let older = app.write_board(&owner, "older", &[]).await;
    let newer = app.write_board(&owner, "newer", &[]).await;

    let response = app.server.get("/api/v1/boards?size=0").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_failed");

    app.server
        .get("/api/v1/boards?page=-1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .get("/api/v1/boards?size=abc")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // offset이 i64를 넘는 페이지
    let response = app
        .server
        .get("/api/v1/boards?page=9223372036854775807&size=100")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]["details"]["page"].is_array());

    let response = bearer(
        app.server.get("/api/v1/boards/my-board?page=9223372036854775807&size=100"),
        &owner,
    )
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let slice = app.list("?sortBy=popular").await;
    assert_eq!(ids(&slice), vec![newer, older]);
}

#[tokio::test]
async fn my_boards_and_my_likes() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let (_, fan) = app.member("b@x.com").await;
    let mine = app.write_board(&owner, "mine", &[]).await;
    let liked = app.write_board(&owner, "liked", &[]).await;
    app.like(&fan, liked).await;

    let response = bearer(app.server.get("/api/v1/boards/my-board"), &owner).await;
    response.assert_status_ok();
    assert_eq!(ids(&response.json::<Value>()["data"]), vec![liked, mine]);

    let response = bearer(app.server.get("/api/v1/boards/my-like"), &fan).await;
    response.assert_status_ok();
    assert_eq!(ids(&response.json::<Value>()["data"]), vec![liked]);

    app.server
        .get("/api/v1/boards/my-board")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// 좋아요
// ============================================================================

#[tokio::test]
async fn duplicate_like_conflicts_and_keeps_one_relation() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let (_, fan) = app.member("b@x.com").await;
    let id = app.write_board(&owner, "liked twice", &[]).await;

    app.like(&fan, id).await;
    let response = bearer(app.server.post("/api/v1/likes"), &fan)
        .json(&json!({ "board_id": id }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "duplicate_like");

    let status = bearer(app.server.get(&format!("/api/v1/likes?board_id={}", id)), &fan).await;
    let status: Value = status.json();
    assert_eq!(status["data"]["like_count"], 1);
    assert_eq!(status["data"]["is_liked"], true);
}

#[tokio::test]
async fn cancelling_missing_like_affects_zero_rows() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let id = app.write_board(&owner, "never liked", &[]).await;

    let response = bearer(app.server.delete(&format!("/api/v1/likes?board_id={}", id)), &owner).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["affected_rows"], 0);

    app.like(&owner, id).await;
    let response = bearer(app.server.delete(&format!("/api/v1/likes?board_id={}", id)), &owner).await;
    assert_eq!(response.json::<Value>()["data"]["affected_rows"], 1);
}

#[tokio::test]
async fn anonymous_like_follows_viewer_session() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let id = app.write_board(&owner, "anon", &[]).await;

    let response = app
        .server
        .post("/api/v1/likes")
        .json(&json!({ "board_id": id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let session = response.cookie(VIEWER_COOKIE).value().to_string();
    let cookie = format!("{}={}", VIEWER_COOKIE, session);

    app.server
        .post("/api/v1/likes")
        .add_header(COOKIE, cookie.clone())
        .json(&json!({ "board_id": id }))
        .await
        .assert_status(StatusCode::CONFLICT);

    let read: Value = app
        .server
        .get(&format!("/api/v1/boards/{}", id))
        .add_header(COOKIE, cookie.clone())
        .await
        .json();
    assert_eq!(read["data"]["is_liked"], true);
    assert_eq!(read["data"]["like_count"], 1);

    let response = app
        .server
        .delete(&format!("/api/v1/likes?board_id={}", id))
        .add_header(COOKIE, cookie)
        .await;
    assert_eq!(response.json::<Value>()["data"]["affected_rows"], 1);
}

#[tokio::test]
async fn liking_unknown_board_is_not_found() {
    let app = spawn_app().await;
    let (_, fan) = app.member("b@x.com").await;

    let response = bearer(app.server.post("/api/v1/likes"), &fan)
        .json(&json!({ "board_id": 999 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "board_not_found");
}

// ============================================================================
// 댓글 / 태그 / 이미지
// ============================================================================

#[tokio::test]
async fn comments_show_up_oldest_first() {
    let app = spawn_app().await;
    let (member_id, token) = app.member("a@x.com").await;
    let id = app.write_board(&token, "commented", &[]).await;

    for content in ["first!", "second"] {
        bearer(app.server.post("/api/v1/comments"), &token)
            .json(&json!({ "board_id": id, "content": content }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let read: Value = app.server.get(&format!("/api/v1/boards/{}", id)).await.json();
    let comments = read["data"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "first!");
    assert_eq!(comments[0]["member_id"], member_id);
    assert_eq!(comments[0]["writer"], "a");
    assert_eq!(comments[1]["content"], "second");

    bearer(app.server.post("/api/v1/comments"), &token)
        .json(&json!({ "board_id": 999, "content": "orphan" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_writer_replaces_tags() {
    let app = spawn_app().await;
    let (_, owner) = app.member("a@x.com").await;
    let (_, other) = app.member("b@x.com").await;
    let id = app.write_board(&owner, "tagged", &["old"]).await;
    let path = format!("/api/v1/boards/{}/tags", id);

    bearer(app.server.put(&path), &other)
        .json(&json!({ "tags": ["hijack"] }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = bearer(app.server.put(&path), &owner)
        .json(&json!({ "tags": ["new", "shiny"] }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["tags"], json!(["new", "shiny"]));

    assert!(ids(&app.list("?keyword=old").await).is_empty());
    assert_eq!(ids(&app.list("?keyword=new").await), vec![id]);

    let tags: Value = app.server.get("/api/v1/tags").await.json();
    let tags = tags["data"].as_array().unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["new", "old", "shiny"]);
    assert_eq!(tags[1]["board_count"], 0);
    assert_eq!(tags[0]["board_count"], 1);
}

#[tokio::test]
async fn image_upload_is_served_back() {
    let app = spawn_app().await;
    let (_, token) = app.member("a@x.com").await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(png.clone())
            .file_name("pic.png")
            .mime_type("image/png"),
    );
    let response = bearer(app.server.post("/api/v1/boards/images"), &token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CREATED);
    let url = response.json::<Value>()["data"]["url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(url.starts_with("/uploads/"));

    let served = app.server.get(&url).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().to_vec(), png);

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"GIF89a".to_vec())
            .file_name("pic.gif")
            .mime_type("image/gif"),
    );
    bearer(app.server.post("/api/v1/boards/images"), &token)
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
