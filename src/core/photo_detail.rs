//! Detail screen controller: one photo, three states, no retry or caching.

use log::debug;

use crate::core::photo::PhotoDetail;
use crate::core::repository::PhotoRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Success(PhotoDetail),
    Error(String),
}

/// A pending `fetch_detail` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub photo_id: String,
}

#[derive(Debug)]
pub struct PhotoDetailView {
    photo_id: Option<String>,
    state: DetailState,
}

impl Default for PhotoDetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoDetailView {
    pub fn new() -> Self {
        Self {
            photo_id: None,
            state: DetailState::Loading,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn photo_id(&self) -> Option<&str> {
        self.photo_id.as_deref()
    }

    /// Points the view at `photo_id` and puts it back into `Loading`.
    pub fn load(&mut self, photo_id: &str) -> DetailRequest {
        self.photo_id = Some(photo_id.to_string());
        self.state = DetailState::Loading;
        DetailRequest {
            photo_id: photo_id.to_string(),
        }
    }

    /// Publishes the result. Results for a photo the view has moved away
    /// from are dropped and `false` is returned.
    pub fn finish(&mut self, request: &DetailRequest, result: Result<PhotoDetail, String>) -> bool {
        if self.photo_id.as_deref() != Some(request.photo_id.as_str()) {
            debug!("Dropping detail for {}: view moved on", request.photo_id);
            return false;
        }
        self.state = match result {
            Ok(detail) => DetailState::Success(detail),
            Err(message) => DetailState::Error(message),
        };
        true
    }

    /// Loads `photo_id` in place.
    pub async fn fetch(&mut self, repository: &dyn PhotoRepository, photo_id: &str) -> &DetailState {
        let request = self.load(photo_id);
        let result = repository.fetch_detail(&request.photo_id).await;
        self.finish(&request, result);
        &self.state
    }
}
