#![allow(dead_code)]

/// Build the application service the way the binary does, minus the error
/// page middleware, against the given connection and fetcher.
macro_rules! init_app {
    ($db:expr, $fetcher:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($db))
                .app_data(actix_web::web::Data::new($fetcher))
                .wrap(actix_session::SessionMiddleware::new(
                    actix_session::storage::CookieSessionStore::default(),
                    actix_web::cookie::Key::generate(),
                ))
                .configure(page_analyzer::web::configure),
        )
        .await
    };
}

pub mod database;
pub mod fixtures;
