use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::middleware::{DefaultHeaders, ErrorHandlers, Logger};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use env_logger::Env;
use page_analyzer::app_config;
use page_analyzer::db;
use page_analyzer::fetch::Fetcher;
use rand::{distributions::Alphanumeric, Rng};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_lib_mods();
    let config = app_config::init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "DATABASE_URL must be set."))?;
    let conn = db::connect(&database_url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    db::create_schema(&conn)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let fetcher =
        Fetcher::new(&config.fetch).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let secret_key = secret_key();
    let bind = config.server.bind.clone();

    let conn = Data::new(conn);
    let fetcher = Data::new(fetcher);

    log::info!("Listening on {}", bind);
    HttpServer::new(move || {
        // Order of middleware IS IMPORTANT and is in REVERSE EXECUTION ORDER.
        App::new()
            .app_data(conn.clone())
            .app_data(fetcher.clone())
            .wrap(
                DefaultHeaders::new()
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .wrap(
                ErrorHandlers::new()
                    .handler(StatusCode::BAD_REQUEST, page_analyzer::web::error::render_400)
                    .handler(StatusCode::NOT_FOUND, page_analyzer::web::error::render_404)
                    .handler(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        page_analyzer::web::error::render_500,
                    ),
            )
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_same_site(SameSite::Lax)
                    .cookie_secure(false) // Allow HTTP for development
                    .build(),
            )
            .wrap(Logger::new("%a \"%r\" %s %T"))
            .configure(page_analyzer::web::configure)
    })
    .bind(bind)?
    .run()
    .await
}

/// Initialize third party crates we rely on but don't have control over.
fn init_lib_mods() {
    if let Err(e) = dotenv::dotenv() {
        // A missing .env is normal in production; everything can come from the environment.
        eprintln!("No .env loaded: {}", e);
    }
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Session signing key from `SECRET_KEY`, or a throwaway one.
fn secret_key() -> Key {
    let provided = std::env::var("SECRET_KEY")
        .map_err(|e| e.to_string())
        .and_then(|key| Key::try_from(key.as_bytes()).map_err(|e| e.to_string()));

    match provided {
        Ok(key) => key,
        Err(err) => {
            let random_string: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(128)
                .map(char::from)
                .collect();
            log::warn!("SECRET_KEY was invalid. Reason: {}\r\nThis means the key used for signing session cookies will invalidate every time the application is restarted. A secret key must be at least 64 bytes to be accepted.", err);
            Key::from(random_string.as_bytes())
        }
    }
}
