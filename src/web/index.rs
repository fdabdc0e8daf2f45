use crate::flash::FlashMessage;
use actix_web::{get, Error, Responder};
use askama_actix::{Template, TemplateToResponse};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_index);
}

/// The submission form. Re-rendered with the rejected input on 422.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub url: &'a str,
    pub flash: Option<FlashMessage>,
}

#[get("/")]
pub async fn view_index() -> Result<impl Responder, Error> {
    Ok(IndexTemplate {
        url: "",
        flash: None,
    }
    .to_response())
}
