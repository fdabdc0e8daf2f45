//! URL validation and reduction to the canonical `scheme://host` form.

use crate::constants::MAX_URL_LENGTH;
use derive_more::{Display, Error};

/// The submitted text is not an absolute http(s) URL we can store.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum InvalidUrlError {
    #[display(fmt = "URL is empty")]
    Empty,
    #[display(fmt = "scheme and host exceed {} characters", MAX_URL_LENGTH)]
    TooLong,
    #[display(fmt = "URL is malformed")]
    Malformed,
    #[display(fmt = "URL has no host")]
    MissingHost,
    #[display(fmt = "Only HTTP/HTTPS URLs are supported")]
    UnsupportedScheme,
}

/// Validate `raw` and reduce it to `scheme://host`.
///
/// Path, query, fragment and user info are dropped. Scheme and host are
/// copied from the input as written; an explicit port stays with the host.
pub fn normalize(raw: &str) -> Result<String, InvalidUrlError> {
    // Tabs and line breaks are ignored by the URL parser, so they are removed
    // before the canonical form is cut from the text.
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();
    if cleaned.is_empty() {
        return Err(InvalidUrlError::Empty);
    }

    let parsed = url::Url::parse(&cleaned).map_err(|_| InvalidUrlError::Malformed)?;
    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(InvalidUrlError::UnsupportedScheme),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(InvalidUrlError::MissingHost);
    }

    // The parser lowercases scheme and host, so the canonical form is cut
    // from the submitted text instead.
    let (scheme, rest) = cleaned
        .split_once("://")
        .ok_or(InvalidUrlError::Malformed)?;
    let authority = rest
        .split(|c: char| matches!(c, '/' | '?' | '#' | '\\'))
        .next()
        .unwrap_or_default();
    let host = match authority.rsplit_once('@') {
        Some((_userinfo, host)) => host,
        None => authority,
    };
    if host.is_empty() {
        return Err(InvalidUrlError::MissingHost);
    }
    if host.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(InvalidUrlError::Malformed);
    }

    // Only the stored name is bounded; paths and queries may be any length.
    let name = format!("{}://{}", scheme, host);
    if name.chars().count() > MAX_URL_LENGTH {
        return Err(InvalidUrlError::TooLong);
    }
    Ok(name)
}
