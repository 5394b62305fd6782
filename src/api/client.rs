//! Flickr REST client.
//!
//! Every call is a `GET` against the single REST endpoint, with the method
//! name and credentials carried as query parameters:
//!
//! ```text
//! GET {base_url}?method=flickr.photos.getRecent&page=2
//!               &api_key=…&format=json&nojsoncallback=1
//! ```

use std::time::Duration;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{Envelope, PhotoInfoResponse, PhotosResponse};

pub const DEFAULT_BASE_URL: &str = "https://www.flickr.com/services/rest/";

const METHOD_GET_RECENT: &str = "flickr.photos.getRecent";
const METHOD_SEARCH: &str = "flickr.photos.search";
const METHOD_GET_INFO: &str = "flickr.photos.getInfo";

/// Thin typed wrapper over the three read-only Flickr methods the app uses.
///
/// Cheap to clone: `reqwest::Client` is reference counted internally.
#[derive(Clone, Debug)]
pub struct FlickrClient {
    api_key: String,
    base_url: String,
    per_page: Option<u32>,
    client: reqwest::Client,
}

impl FlickrClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_key` - Flickr API key, sent as `api_key` on every request
    /// * `base_url` - Optional custom REST endpoint (defaults to Flickr's)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            per_page: None,
            client: reqwest::Client::new(),
        }
    }

    /// Requests `per_page` items per page instead of the server default.
    pub fn with_per_page(mut self, per_page: Option<u32>) -> Self {
        self.per_page = per_page;
        self
    }

    /// Rebuilds the HTTP client with a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ApiError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `flickr.photos.getRecent` for the given 1-based page.
    pub async fn get_recent(&self, page: u32) -> Result<PhotosResponse, ApiError> {
        self.call(METHOD_GET_RECENT, vec![("page", page.to_string())])
            .await
    }

    /// `flickr.photos.search` filtered by free text.
    pub async fn get_search(&self, text: &str, page: u32) -> Result<PhotosResponse, ApiError> {
        self.call(
            METHOD_SEARCH,
            vec![("text", text.to_string()), ("page", page.to_string())],
        )
        .await
    }

    /// `flickr.photos.getInfo` for one photo.
    pub async fn get_photo_info(&self, photo_id: &str) -> Result<PhotoInfoResponse, ApiError> {
        self.call(METHOD_GET_INFO, vec![("photo_id", photo_id.to_string())])
            .await
    }

    /// Issues one REST call and unwraps the `stat` envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, ApiError> {
        if let Some(per_page) = self.per_page
            && method != METHOD_GET_INFO
        {
            params.push(("per_page", per_page.to_string()));
        }
        params.push(("method", method.to_string()));
        params.push(("api_key", self.api_key.clone()));
        params.push(("format", "json".to_string()));
        params.push(("nojsoncallback", "1".to_string()));

        info!("Flickr request: method={}, params={}", method, params.len());

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Flickr response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.trim().to_string()
            };
            warn!("Flickr HTTP error: {} - {}", status.as_u16(), message);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Flickr response body: {} bytes", body.len());

        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(Envelope::Ok(payload)) => Ok(payload),
            Ok(Envelope::Fail { code, message }) => {
                warn!("Flickr stat=fail for {}: {} - {}", method, code, message);
                Err(ApiError::Api { code, message })
            }
            Err(e) => {
                warn!("Failed to decode {} response: {}", method, e);
                Err(ApiError::Decode(e.to_string()))
            }
        }
    }
}
