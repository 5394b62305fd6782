//! # Photo Repository
//!
//! The seam between the controllers and the network. Controllers only see
//! `Result<_, String>`: every failure is collapsed to a pre-formatted message
//! here, and nothing upstream branches on the failure kind.
//!
//! ```text
//! PhotoList / PhotoDetailView
//!          │  fetch_recent / fetch_search / fetch_detail
//!          ▼
//! FlickrRepository ── tokio::spawn ──▶ FlickrClient ──▶ Flickr REST
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::api::{ApiError, FlickrClient};
use crate::core::config::{ConfigError, ResolvedConfig};
use crate::core::photo::{DEFAULT_IMAGE_HOST, Page, Photo, PhotoDetail};

const HTTP_EXCEPTION_ERROR: &str = "HTTP Exception: ";
const IO_EXCEPTION: &str = "Network Error: ";
const UNKNOWN_ERROR: &str = "Unknown Error: ";

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// One page of the unfiltered recent feed.
    async fn fetch_recent(&self, page: u32) -> Result<Page<Photo>, String>;

    /// One page of results for a free-text search.
    async fn fetch_search(&self, term: &str, page: u32) -> Result<Page<Photo>, String>;

    async fn fetch_detail(&self, id: &str) -> Result<PhotoDetail, String>;
}

/// Formats a client error into the message shown to the user.
pub fn error_message(error: &ApiError) -> String {
    match error {
        ApiError::Http { status, message } => format!("{HTTP_EXCEPTION_ERROR}{status}, {message}"),
        ApiError::Network(msg) => format!("{IO_EXCEPTION}{msg}"),
        ApiError::Decode(msg) => format!("{UNKNOWN_ERROR}{msg}"),
        ApiError::Api { code, message } => format!("{UNKNOWN_ERROR}{message} (code {code})"),
    }
}

/// Repository backed by the Flickr REST API.
///
/// Each call runs on its own tokio task so the caller's task only awaits the
/// join handle.
pub struct FlickrRepository {
    client: FlickrClient,
    image_host: String,
}

impl FlickrRepository {
    pub fn new(client: FlickrClient) -> Self {
        Self {
            client,
            image_host: DEFAULT_IMAGE_HOST.to_string(),
        }
    }

    pub fn with_image_host(mut self, image_host: String) -> Self {
        self.image_host = image_host;
        self
    }

    /// Builds the client and repository from resolved settings.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();
        let client = FlickrClient::new(api_key, Some(config.base_url.clone()))
            .with_per_page(config.per_page)
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        info!(
            "Flickr repository ready: base_url={}, image_host={}",
            client.base_url(),
            config.image_host
        );
        Ok(Self::new(client).with_image_host(config.image_host.clone()))
    }

    /// Runs `job` on a background task and flattens both failure layers into
    /// a message.
    async fn on_background<T, F>(&self, label: &str, job: F) -> Result<T, String>
    where
        T: Send + 'static,
        F: std::future::Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        match tokio::spawn(job).await {
            Ok(Ok(value)) => {
                debug!("{} succeeded", label);
                Ok(value)
            }
            Ok(Err(e)) => {
                warn!("{} failed: {}", label, e);
                Err(error_message(&e))
            }
            Err(join_error) => {
                warn!("{} task did not complete: {}", label, join_error);
                Err(format!("{UNKNOWN_ERROR}{join_error}"))
            }
        }
    }
}

#[async_trait]
impl PhotoRepository for FlickrRepository {
    async fn fetch_recent(&self, page: u32) -> Result<Page<Photo>, String> {
        let client = self.client.clone();
        let host = self.image_host.clone();
        self.on_background("getRecent", async move {
            let response = client.get_recent(page).await?;
            Ok(Page::from_dto(response.photos, &host))
        })
        .await
    }

    async fn fetch_search(&self, term: &str, page: u32) -> Result<Page<Photo>, String> {
        let client = self.client.clone();
        let host = self.image_host.clone();
        let term = term.to_string();
        self.on_background("search", async move {
            let response = client.get_search(&term, page).await?;
            Ok(Page::from_dto(response.photos, &host))
        })
        .await
    }

    async fn fetch_detail(&self, id: &str) -> Result<PhotoDetail, String> {
        let client = self.client.clone();
        let host = self.image_host.clone();
        let id = id.to_string();
        self.on_background("getInfo", async move {
            let response = client.get_photo_info(&id).await?;
            Ok(PhotoDetail::from_dto(response.photo, &host))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_http() {
        let e = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(error_message(&e), "HTTP Exception: 404, Not Found");
    }

    #[test]
    fn test_error_message_network() {
        let e = ApiError::Network("connection refused".to_string());
        assert_eq!(error_message(&e), "Network Error: connection refused");
    }

    #[test]
    fn test_error_message_unclassified() {
        let decode = ApiError::Decode("expected value at line 1".to_string());
        assert_eq!(error_message(&decode), "Unknown Error: expected value at line 1");

        let api = ApiError::Api {
            code: 100,
            message: "Invalid API Key".to_string(),
        };
        assert_eq!(error_message(&api), "Unknown Error: Invalid API Key (code 100)");
    }
}
