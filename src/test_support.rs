//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::photo::{Dates, Owner, Page, Photo, PhotoDetail};
use crate::core::repository::PhotoRepository;

/// A repository call as seen by [`FakeRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Recent(u32),
    Search(String, u32),
    Detail(String),
}

/// Scripted in-memory repository. Unscripted calls fail with a message.
#[derive(Default)]
pub struct FakeRepository {
    recent: Mutex<HashMap<u32, Result<Page<Photo>, String>>>,
    search: Mutex<HashMap<(String, u32), Result<Page<Photo>, String>>>,
    details: Mutex<HashMap<String, Result<PhotoDetail, String>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_recent(&self, page: u32, result: Result<Page<Photo>, String>) {
        self.recent.lock().unwrap().insert(page, result);
    }

    pub fn on_search(&self, term: &str, page: u32, result: Result<Page<Photo>, String>) {
        self.search
            .lock()
            .unwrap()
            .insert((term.to_string(), page), result);
    }

    pub fn on_detail(&self, id: &str, result: Result<PhotoDetail, String>) {
        self.details.lock().unwrap().insert(id.to_string(), result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }
}

#[async_trait]
impl PhotoRepository for FakeRepository {
    async fn fetch_recent(&self, page: u32) -> Result<Page<Photo>, String> {
        self.calls.lock().unwrap().push(Call::Recent(page));
        self.recent
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Err(format!("no scripted recent page {page}")))
    }

    async fn fetch_search(&self, term: &str, page: u32) -> Result<Page<Photo>, String> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Search(term.to_string(), page));
        self.search
            .lock()
            .unwrap()
            .get(&(term.to_string(), page))
            .cloned()
            .unwrap_or_else(|| Err(format!("no scripted search '{term}' page {page}")))
    }

    async fn fetch_detail(&self, id: &str) -> Result<PhotoDetail, String> {
        self.calls.lock().unwrap().push(Call::Detail(id.to_string()));
        self.details
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| Err(format!("no scripted detail {id}")))
    }
}

pub fn fake_photo(id: &str) -> Photo {
    fake_photo_titled(id, "title")
}

pub fn fake_photo_titled(id: &str, title: &str) -> Photo {
    Photo {
        id: id.to_string(),
        owner: "owner".to_string(),
        title: title.to_string(),
        is_public: true,
        is_friend: false,
        is_family: false,
        server: "server".to_string(),
        farm: 1,
        secret: "secret".to_string(),
        url: "url".to_string(),
    }
}

pub fn fake_page(ids: &[&str], page: u32, pages: u32) -> Page<Photo> {
    Page {
        items: ids.iter().map(|id| fake_photo(id)).collect(),
        page,
        pages,
        total: pages * ids.len().max(1) as u32,
    }
}

pub fn fake_photo_detail(id: &str) -> PhotoDetail {
    PhotoDetail {
        id: id.to_string(),
        owner: Owner {
            username: "username".to_string(),
        },
        title: "title".to_string(),
        views: "100".to_string(),
        comment_count: "10".to_string(),
        dates: Dates {
            posted: "1765143767".to_string(),
            taken: "2025-12-06 13:12:12".to_string(),
        },
        url: "url".to_string(),
    }
}

/// Creates a test App over a fresh FakeRepository and hands both back.
pub fn test_app() -> (crate::core::state::App, Arc<FakeRepository>) {
    let repository = Arc::new(FakeRepository::new());
    let app = crate::core::state::App::new(repository.clone());
    (app, repository)
}
