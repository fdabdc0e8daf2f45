//! One-shot user messages carried across a single redirect.
//!
//! Handlers never touch the session for this. They return a [`Redirect`]
//! holding an optional [`FlashMessage`]; turning that into a response stores
//! the message in the cookie session, and the next rendered page takes it
//! out again with [`FlashMessage::take`].

use crate::constants::FLASH_SESSION_KEY;
use actix_session::Session;
use actix_web::{error, http::header, Error, HttpResponse};
use serde::{Deserialize, Serialize};

/// Severity of a flash message. Doubles as the CSS alert class suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }

    /// CSS class for the alert box, e.g. `alert-success`.
    pub fn css_class(&self) -> String {
        format!("alert-{}", self.level.as_str())
    }

    /// Remove and return the pending message, if any.
    /// An unreadable entry is dropped rather than failing the page.
    pub fn take(session: &Session) -> Option<FlashMessage> {
        match session.remove_as::<FlashMessage>(FLASH_SESSION_KEY)? {
            Ok(flash) => Some(flash),
            Err(raw) => {
                log::warn!("Discarding unreadable flash message: {}", raw);
                None
            }
        }
    }
}

/// A 302 response, optionally carrying a message for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub flash: Option<FlashMessage>,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            flash: None,
        }
    }

    pub fn with_flash(mut self, flash: FlashMessage) -> Self {
        self.flash = Some(flash);
        self
    }

    /// Store the flash message in `session` and build the 302 response.
    pub fn into_response(self, session: &Session) -> Result<HttpResponse, Error> {
        if let Some(flash) = self.flash {
            session
                .insert(FLASH_SESSION_KEY, flash)
                .map_err(|_| error::ErrorInternalServerError("Failed to store flash message"))?;
        }
        Ok(HttpResponse::Found()
            .append_header((header::LOCATION, self.location))
            .finish())
    }
}
