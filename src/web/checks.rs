//! Running a check against a stored URL.

use crate::extract::extract;
use crate::fetch::{FetchFailure, FetchResult, Fetcher};
use crate::flash::{FlashMessage, Redirect};
use crate::repo::{self, NewCheck};
use actix_session::Session;
use actix_web::{error, post, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(post_check);
}

#[derive(Debug, PartialEq, Eq)]
pub enum CheckResult {
    /// The page answered and a check row was written.
    Recorded { status_code: u16 },
    /// The page could not be fetched or answered with an error status.
    Failed(FetchFailure),
    /// No URL with that id.
    UnknownUrl,
}

impl CheckResult {
    pub fn flash(&self) -> Option<FlashMessage> {
        match self {
            CheckResult::Recorded { .. } => Some(FlashMessage::success("Page successfully checked")),
            CheckResult::Failed(_) => Some(FlashMessage::danger("An error occurred during check")),
            CheckResult::UnknownUrl => None,
        }
    }
}

/// Fetch the page stored under `url_id` and record what it says about itself.
///
/// Nothing is written unless the fetch succeeds.
pub async fn check_url<C: ConnectionTrait>(
    db: &C,
    fetcher: &Fetcher,
    url_id: i32,
) -> Result<CheckResult, DbErr> {
    let url = match repo::get_url(db, url_id).await? {
        Some(url) => url,
        None => return Ok(CheckResult::UnknownUrl),
    };

    let page = match fetcher.fetch(&url.name).await {
        FetchResult::Success(page) => page,
        FetchResult::Failure(failure) => {
            log::warn!("Check of {} (id={}) failed: {}", url.name, url_id, failure);
            return Ok(CheckResult::Failed(failure));
        }
    };

    let seo = extract(&page.body);
    repo::insert_check(
        db,
        NewCheck {
            url_id,
            status_code: i32::from(page.status_code),
            seo,
            created_at: Utc::now().naive_utc(),
        },
    )
    .await?;
    log::info!("Checked {} (id={}): HTTP {}", url.name, url_id, page.status_code);

    Ok(CheckResult::Recorded {
        status_code: page.status_code,
    })
}

#[post("/urls/{url_id}/checks")]
pub async fn post_check(
    db: web::Data<DatabaseConnection>,
    fetcher: web::Data<Fetcher>,
    session: Session,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let url_id = path.into_inner();

    let result = check_url(db.get_ref(), fetcher.get_ref(), url_id)
        .await
        .map_err(|e| {
            log::error!("check_url: {}", e);
            error::ErrorInternalServerError("DB error")
        })?;

    let redirect = Redirect::to(format!("/urls/{}", url_id));
    match result {
        CheckResult::UnknownUrl => Err(error::ErrorNotFound("URL not found.")),
        CheckResult::Recorded { .. } | CheckResult::Failed(_) => match result.flash() {
            Some(flash) => redirect.with_flash(flash).into_response(&session),
            None => redirect.into_response(&session),
        },
    }
}
