//! Persistence operations for URLs and their checks.
//!
//! Every function runs as its own unit of work against the pool. There is no
//! application-level locking; the unique constraint on `urls.name` is what
//! keeps duplicate submissions out.

use crate::extract::PageSeo;
use crate::orm::{url_checks, urls};
use chrono::NaiveDateTime;
use sea_orm::{
    entity::*, query::*, ConnectionTrait, DbErr, FromQueryResult, Statement,
};

pub type Url = urls::Model;
pub type Check = url_checks::Model;

/// One row of the URL listing: the URL plus its most recent check, if any.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct UrlListing {
    pub id: i32,
    pub name: String,
    pub last_check_at: Option<NaiveDateTime>,
    pub last_status_code: Option<i32>,
}

/// Everything needed to record a successful check.
#[derive(Debug, Clone)]
pub struct NewCheck {
    pub url_id: i32,
    pub status_code: i32,
    pub seo: PageSeo,
    pub created_at: NaiveDateTime,
}

/// The latest check of a URL is the one with the highest id, not the newest
/// timestamp.
const LIST_URLS_WITH_LATEST_CHECK: &str = r#"
    WITH latest AS (
        SELECT urls.id AS id, urls.name AS name, MAX(url_checks.id) AS last_check_id
        FROM urls
        LEFT JOIN url_checks ON url_checks.url_id = urls.id
        GROUP BY urls.id, urls.name
    )
    SELECT
        latest.id AS id,
        latest.name AS name,
        url_checks.created_at AS last_check_at,
        url_checks.status_code AS last_status_code
    FROM latest
    LEFT JOIN url_checks ON url_checks.id = latest.last_check_id
    ORDER BY latest.id DESC
"#;

pub async fn list_urls_with_latest_check<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<UrlListing>, DbErr> {
    UrlListing::find_by_statement(Statement::from_string(
        db.get_database_backend(),
        LIST_URLS_WITH_LATEST_CHECK.to_owned(),
    ))
    .all(db)
    .await
}

pub async fn find_url_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Url>, DbErr> {
    urls::Entity::find()
        .filter(urls::Column::Name.eq(name))
        .one(db)
        .await
}

/// Insert a URL row and return its id.
pub async fn insert_url<C: ConnectionTrait>(
    db: &C,
    name: &str,
    created_at: NaiveDateTime,
) -> Result<i32, DbErr> {
    let url = urls::ActiveModel {
        name: Set(name.to_owned()),
        created_at: Set(created_at),
        ..Default::default()
    };
    let res = urls::Entity::insert(url).exec(db).await?;
    Ok(res.last_insert_id)
}

pub async fn get_url<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Url>, DbErr> {
    urls::Entity::find_by_id(id).one(db).await
}

/// Checks of one URL, most recent first.
pub async fn list_checks_for_url<C: ConnectionTrait>(db: &C, url_id: i32) -> Result<Vec<Check>, DbErr> {
    url_checks::Entity::find()
        .filter(url_checks::Column::UrlId.eq(url_id))
        .order_by_desc(url_checks::Column::Id)
        .all(db)
        .await
}

pub async fn insert_check<C: ConnectionTrait>(db: &C, check: NewCheck) -> Result<(), DbErr> {
    let NewCheck {
        url_id,
        status_code,
        seo,
        created_at,
    } = check;
    let row = url_checks::ActiveModel {
        url_id: Set(url_id),
        status_code: Set(status_code),
        h1: Set(seo.h1),
        title: Set(seo.title),
        description: Set(seo.description),
        created_at: Set(created_at),
        ..Default::default()
    };
    url_checks::Entity::insert(row).exec(db).await?;
    Ok(())
}
