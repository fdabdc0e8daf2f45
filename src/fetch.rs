//! Outbound page fetch used by checks.

use crate::app_config::FetchConfig;
use derive_more::{Display, Error};

/// A page that answered at the transport level, whatever its status.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status_code: u16,
    pub body: String,
}

/// Why a check could not use the page.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[display(fmt = "HTTP status {}", _0)]
    Status(#[error(not(source))] u16),
    #[display(fmt = "transport error: {}", _0)]
    Transport(#[error(not(source))] String),
    #[display(fmt = "response larger than {} bytes", _0)]
    TooLarge(#[error(not(source))] usize),
}

#[derive(Debug)]
pub enum FetchResult {
    Success(FetchedPage),
    Failure(FetchFailure),
}

/// Thin wrapper over a configured `reqwest::Client`.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// GET `url` and return status and body. HTTP error statuses are not
    /// failures here; only the transport or an oversized body can fail.
    pub async fn get(&self, url: &str) -> Result<FetchedPage, FetchFailure> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;
        let status_code = response.status().as_u16();

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes as u64 {
                return Err(FetchFailure::TooLarge(self.max_body_bytes));
            }
        }

        // The declared length may be absent or wrong, so the cap is enforced
        // while reading too.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchFailure::TooLarge(self.max_body_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchedPage {
            status_code,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// GET `url`, treating 4xx and 5xx answers as failures.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        match self.get(url).await {
            Ok(page) if page.status_code >= 400 => {
                FetchResult::Failure(FetchFailure::Status(page.status_code))
            }
            Ok(page) => FetchResult::Success(page),
            Err(failure) => FetchResult::Failure(failure),
        }
    }
}
