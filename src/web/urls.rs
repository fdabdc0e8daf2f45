use super::index::IndexTemplate;
use crate::flash::{FlashMessage, Redirect};
use crate::normalize::normalize;
use crate::repo::{self, Check, UrlListing};
use actix_session::Session;
use actix_web::{error, get, post, web, Error, HttpResponse, Responder};
use askama_actix::{Template, TemplateToResponse};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_urls).service(post_url).service(view_url);
}

#[derive(Template)]
#[template(path = "urls.html")]
pub struct UrlsTemplate {
    pub urls: Vec<UrlListing>,
}

#[derive(Template)]
#[template(path = "url.html")]
pub struct UrlTemplate {
    pub url: repo::Url,
    pub checks: Vec<Check>,
    pub flash: Option<FlashMessage>,
}

impl UrlListing {
    pub fn last_check_display(&self) -> String {
        self.last_check_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn last_status_display(&self) -> String {
        self.last_status_code
            .map(|code| code.to_string())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
pub struct NewUrlForm {
    pub url: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AddUrlResult {
    /// A fresh row was inserted.
    Created(i32),
    /// The normalized URL was already stored under this id.
    Exists(i32),
    /// The submission is not a usable URL; nothing was stored.
    Invalid,
}

impl AddUrlResult {
    /// Where the browser goes next and what it is told, for the outcomes
    /// that redirect.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            AddUrlResult::Created(id) => Some(
                Redirect::to(format!("/urls/{}", id))
                    .with_flash(FlashMessage::success("Page successfully added")),
            ),
            AddUrlResult::Exists(id) => Some(
                Redirect::to(format!("/urls/{}", id))
                    .with_flash(FlashMessage::info("Page already exists")),
            ),
            AddUrlResult::Invalid => None,
        }
    }
}

/// Normalize `raw` and store it unless an equal URL already exists.
pub async fn add_url<C: ConnectionTrait>(db: &C, raw: &str) -> Result<AddUrlResult, DbErr> {
    let name = match normalize(raw) {
        Ok(name) => name,
        Err(e) => {
            log::debug!("Rejected URL submission {:?}: {}", raw, e);
            return Ok(AddUrlResult::Invalid);
        }
    };

    if let Some(existing) = repo::find_url_by_name(db, &name).await? {
        return Ok(AddUrlResult::Exists(existing.id));
    }

    insert_or_existing(db, &name).await
}

/// Insert an already normalized `name`. When the insert loses to the unique
/// constraint, the row that holds the name is reported instead.
pub async fn insert_or_existing<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<AddUrlResult, DbErr> {
    match repo::insert_url(db, name, Utc::now().naive_utc()).await {
        Ok(id) => {
            log::info!("Added URL {} as id={}", name, id);
            Ok(AddUrlResult::Created(id))
        }
        Err(err) => {
            // A concurrent submission may have won the unique constraint.
            match repo::find_url_by_name(db, name).await? {
                Some(existing) => {
                    log::debug!("Insert of {} lost to id={}: {}", name, existing.id, err);
                    Ok(AddUrlResult::Exists(existing.id))
                }
                None => Err(err),
            }
        }
    }
}

#[get("/urls")]
pub async fn view_urls(db: web::Data<DatabaseConnection>) -> Result<impl Responder, Error> {
    let urls = repo::list_urls_with_latest_check(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("list_urls_with_latest_check: {}", e);
            error::ErrorInternalServerError("DB error")
        })?;

    Ok(UrlsTemplate { urls }.to_response())
}

#[post("/urls")]
pub async fn post_url(
    db: web::Data<DatabaseConnection>,
    session: Session,
    form: web::Form<NewUrlForm>,
) -> Result<HttpResponse, Error> {
    let result = add_url(db.get_ref(), &form.url).await.map_err(|e| {
        log::error!("add_url: {}", e);
        error::ErrorInternalServerError("DB error")
    })?;

    match result.redirect() {
        Some(redirect) => redirect.into_response(&session),
        None => {
            let body = IndexTemplate {
                url: &form.url,
                flash: Some(FlashMessage::danger("Invalid URL")),
            }
            .render()
            .map_err(error::ErrorInternalServerError)?;

            Ok(HttpResponse::UnprocessableEntity()
                .content_type("text/html; charset=utf-8")
                .body(body))
        }
    }
}

#[get("/urls/{url_id}")]
pub async fn view_url(
    db: web::Data<DatabaseConnection>,
    session: Session,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let url_id = path.into_inner();
    let db = db.get_ref();

    let url = repo::get_url(db, url_id)
        .await
        .map_err(|e| {
            log::error!("get_url: {}", e);
            error::ErrorInternalServerError("DB error")
        })?
        .ok_or_else(|| error::ErrorNotFound("URL not found."))?;
    let checks = repo::list_checks_for_url(db, url_id)
        .await
        .map_err(|e| {
            log::error!("list_checks_for_url: {}", e);
            error::ErrorInternalServerError("DB error")
        })?;

    Ok(UrlTemplate {
        url,
        checks,
        flash: FlashMessage::take(&session),
    }
    .to_response())
}
