//! Test database setup
#![allow(dead_code)]

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

/// Fresh in-memory database with the schema applied.
///
/// Every call gets its own database, so tests do not need cleanup and can
/// run in parallel.
pub async fn setup_test_database() -> Result<DatabaseConnection, DbErr> {
    let db = page_analyzer::db::connect("sqlite::memory:").await?;
    page_analyzer::db::create_schema(&db).await?;
    Ok(db)
}

pub async fn count_urls(db: &DatabaseConnection) -> Result<usize, DbErr> {
    use page_analyzer::orm::urls;
    urls::Entity::find().count(db).await
}

pub async fn count_checks(db: &DatabaseConnection) -> Result<usize, DbErr> {
    use page_analyzer::orm::url_checks;
    url_checks::Entity::find().count(db).await
}
