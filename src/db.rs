//! Database connection and schema bootstrap

use crate::orm::{url_checks, urls};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

/// Open a connection pool for `database_url`.
///
/// In-memory SQLite databases live and die with a single connection, so the
/// pool is pinned to one connection for them.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    if database_url.contains(":memory:") {
        opt.max_connections(1).min_connections(1);
    }
    Database::connect(opt).await
}

/// Create the `urls` and `url_checks` tables when they do not exist yet.
///
/// `urls.name` carries a unique constraint so two concurrent submissions of
/// the same page cannot both insert a row.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut create_urls = schema.create_table_from_entity(urls::Entity);
    create_urls.if_not_exists();
    db.execute(backend.build(&create_urls)).await?;

    let mut create_checks = schema.create_table_from_entity(url_checks::Entity);
    create_checks.if_not_exists();
    db.execute(backend.build(&create_checks)).await?;

    log::debug!("Database schema ready on {:?}", backend);
    Ok(())
}
