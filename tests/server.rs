//! Router tests against a temporary site.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

use homepage_rs::Site;

fn setup() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("_config.yml"),
        "url: https://x.test\ndefault_redirect_base: https://base.test\nnot_found_path: /redirects\nlisting_limit: 2\n",
    )
    .unwrap();

    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("pages.json"),
        r#"[{"name": "Home"}, {"name": "About", "path": "/about", "date": "2025-01-01"}]"#,
    )
    .unwrap();
    fs::write(
        data.join("stack.json"),
        r#"[
            {"title": "Rust", "description": "systems", "date": "2024-01-01"},
            {"title": "Svelte", "description": "web", "date": "2023-01-01"},
            {"title": "Zig", "description": "systems", "date": "2025-01-01"}
        ]"#,
    )
    .unwrap();
    fs::write(data.join("now.json"), r#"{"status": "building things"}"#).unwrap();

    let public = dir.path().join("public");
    fs::create_dir_all(&public).unwrap();
    fs::write(public.join("humans.txt"), "/* TEAM */").unwrap();

    let site = Site::new(dir.path()).unwrap();
    let app = homepage_rs::server::router(&site).unwrap();
    (dir, app)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

fn location(headers: &axum::http::HeaderMap) -> &str {
    headers.get(header::LOCATION).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn redirect_by_alias() {
    let (_dir, app) = setup();
    let (status, headers, _) = get(&app, "/api/redirect/GH").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location(&headers), "https://github.com/dnnsmnstrr");
}

#[tokio::test]
async fn redirect_emoji_alias() {
    let (_dir, app) = setup();
    // 🏠
    let (status, headers, _) = get(&app, "/api/redirect/%F0%9F%8F%A0").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location(&headers), "https://dnnsmnstrr.github.io");
}

#[tokio::test]
async fn redirect_without_url_uses_default_base() {
    let (_dir, app) = setup();
    let (_, headers, _) = get(&app, "/api/redirect/dotfiles").await;
    assert_eq!(location(&headers), "https://base.test/dotfiles");
}

#[tokio::test]
async fn redirect_fragment_is_qualified() {
    let (_dir, app) = setup();
    let (_, headers, _) = get(&app, "/api/redirect/now").await;
    assert_eq!(location(&headers), "https://base.test/zettelkasten/now");

    let (_, headers, _) = get(&app, "/api/redirect/rss").await;
    assert_eq!(location(&headers), "/feed.xml");
}

#[tokio::test]
async fn redirect_miss_goes_to_fallback() {
    let (_dir, app) = setup();
    let (status, headers, _) = get(&app, "/api/redirect/definitely-not-here").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location(&headers), "/redirects");
}

#[tokio::test]
async fn redirect_listing_filters() {
    let (_dir, app) = setup();

    let (status, _, body) = get(&app, "/api/redirects?search=KICKSTARTER").await;
    assert_eq!(status, StatusCode::OK);
    let list: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "kickstarter");

    let (_, _, body) = get(&app, "/api/redirects?type=internal").await;
    let list: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert!(list.iter().any(|r| r["name"] == "help"));
    assert!(list.iter().all(|r| r["url"].as_str().map_or(true, |u| !u.starts_with("http"))));

    let (status, _, _) = get(&app, "/api/redirects?type=sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn data_listing_paginates() {
    let (_dir, app) = setup();
    let (status, _, body) = get(&app, "/api/stack?sortBy=date&dir=desc").await;
    assert_eq!(status, StatusCode::OK);

    let listing: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(listing["total"], 3);
    assert_eq!(listing["limit"], 2);
    assert_eq!(listing["totalPages"], 2);
    assert_eq!(listing["dataType"], "stack");
    assert_eq!(listing["items"][0]["title"], "Zig");
    assert_eq!(listing["items"][1]["title"], "Rust");
}

#[tokio::test]
async fn data_listing_search_and_page() {
    let (_dir, app) = setup();
    let (_, _, body) = get(&app, "/api/stack?search=SYSTEMS&page=2&limit=1").await;
    let listing: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(listing["total"], 2);
    assert_eq!(listing["page"], 2);
    assert_eq!(listing["items"][0]["title"], "Zig");
}

#[tokio::test]
async fn data_object_is_returned_as_is() {
    let (_dir, app) = setup();
    let (status, _, body) = get(&app, "/api/now").await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["status"], "building things");
}

#[tokio::test]
async fn data_missing_is_404() {
    let (_dir, app) = setup();
    let (status, _, body) = get(&app, "/api/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("nothing"));
}

#[tokio::test]
async fn status_counts() {
    let (_dir, app) = setup();
    let (_, _, body) = get(&app, "/api/status").await;
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["pageCount"], 2);
    assert!(value["redirectCount"].as_u64().unwrap() > 50);
}

#[tokio::test]
async fn sitemap_and_feed() {
    let (_dir, app) = setup();

    let (status, headers, body) = get(&app, "/sitemap.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/xml"));
    assert!(body.contains("<loc>https://x.test/</loc>"));
    assert!(body.contains("<loc>https://x.test/about</loc>"));

    let (status, headers, body) = get(&app, "/feed.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/atom+xml"));
    assert!(body.contains("<id>1-about</id>"));
    assert!(body.contains("<id>1-index</id>"));
}

#[tokio::test]
async fn public_files_are_served() {
    let (_dir, app) = setup();
    let (status, _, body) = get(&app, "/humans.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "/* TEAM */");
}
