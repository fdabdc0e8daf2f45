//! Test fixtures for creating test data
#![allow(dead_code)]

use actix_web::{web, App, HttpResponse};
use chrono::{NaiveDate, NaiveDateTime};
use page_analyzer::app_config::FetchConfig;
use page_analyzer::fetch::Fetcher;
use page_analyzer::orm::{url_checks, urls};
use sea_orm::{entity::*, ActiveValue::Set, DatabaseConnection, DbErr};

pub const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Stub Site</title>
    <meta name="description" content="A page served by the test suite">
</head>
<body><h1>Hello from the stub</h1></body>
</html>"#;

/// A fixed timestamp, `day` days into 2024.
pub fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap()
}

pub fn test_fetcher() -> Fetcher {
    let config = FetchConfig {
        timeout_secs: 5,
        ..FetchConfig::default()
    };
    Fetcher::new(&config).unwrap()
}

pub async fn create_test_url(db: &DatabaseConnection, name: &str) -> Result<urls::Model, DbErr> {
    let url = urls::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(at(1)),
        ..Default::default()
    };
    url.insert(db).await
}

pub async fn create_test_check(
    db: &DatabaseConnection,
    url_id: i32,
    status_code: i32,
    created_at: NaiveDateTime,
) -> Result<url_checks::Model, DbErr> {
    let check = url_checks::ActiveModel {
        url_id: Set(url_id),
        status_code: Set(status_code),
        h1: Set(String::new()),
        title: Set(format!("check at {}", created_at)),
        description: Set(String::new()),
        created_at: Set(created_at),
        ..Default::default()
    };
    check.insert(db).await
}

/// A site answering every path with `PAGE_HTML`.
pub fn start_html_site() -> actix_test::TestServer {
    actix_test::start(|| {
        App::new().default_service(web::to(|| async {
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(PAGE_HTML)
        }))
    })
}

/// A site answering every path with 404.
pub fn start_missing_site() -> actix_test::TestServer {
    actix_test::start(|| {
        App::new().default_service(web::to(|| async { HttpResponse::NotFound().finish() }))
    })
}

/// A site answering every path with a page of roughly `size` bytes.
pub fn start_large_site(size: usize) -> actix_test::TestServer {
    actix_test::start(move || {
        App::new().default_service(web::to(move || async move {
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(format!("<html><body><p>{}</p></body></html>", "x".repeat(size)))
        }))
    })
}

/// A fetcher that refuses bodies over `max_body_bytes`.
pub fn limited_fetcher(max_body_bytes: usize) -> Fetcher {
    let config = FetchConfig {
        timeout_secs: 5,
        max_body_bytes,
        ..FetchConfig::default()
    };
    Fetcher::new(&config).unwrap()
}

/// Canonical URL of a stub site, as the normalizer would store it.
pub fn site_url(srv: &actix_test::TestServer) -> String {
    format!("http://{}", srv.addr())
}
