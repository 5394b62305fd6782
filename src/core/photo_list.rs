//! # Photo List
//!
//! The paginated grid's state machine. It owns the page cursor, the in-flight
//! guard for "load more", and the accumulated photos for one query session.
//!
//! ```text
//!            start(query)
//!   ┌──────────────────────────────┐
//!   ▼                              │
//! Loading ──ok──▶ Success ◀──ok (append)──┐
//!   │               │   └── load_more() ──┘
//!   └──err──▶ Error │        err (append): keep photos, clear flag
//!                   └──────▶ start(query) ──▶ Loading
//! ```
//!
//! The transitions are split from the I/O. `start` and `load_more` return a
//! [`PageRequest`] describing what to fetch; the caller runs [`fetch_page`]
//! wherever it likes (a spawned task in the TUI, inline in `refresh`) and
//! hands the result back to [`PhotoList::finish`].
//!
//! Failure handling is asymmetric: a failed first page surfaces as `Error`,
//! a failed "load more" leaves the populated list untouched.

use log::{debug, info, warn};

use crate::core::photo::{Page, Photo};
use crate::core::repository::PhotoRepository;

/// How close (in items) the last visible photo must be to the end of the
/// loaded set before the next page is requested.
pub const LOAD_MORE_THRESHOLD: usize = 10;

/// Which data source a query session reads from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Query {
    #[default]
    Recent,
    Search(String),
}

impl Query {
    /// Blank text means the recent feed; anything else is a search term.
    pub fn from_text(text: &str) -> Self {
        let term = text.trim();
        if term.is_empty() {
            Query::Recent
        } else {
            Query::Search(term.to_string())
        }
    }

    pub fn label(&self) -> String {
        match self {
            Query::Recent => "Recent photos".to_string(),
            Query::Search(term) => format!("Search: {term}"),
        }
    }
}

/// Snapshot the UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// First page of the current query not loaded yet.
    Loading,
    Success {
        photos: Vec<Photo>,
        is_loading_more: bool,
        has_more_pages: bool,
    },
    Error(String),
}

/// One page fetch to perform on behalf of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: Query,
    pub page: u32,
    pub append: bool,
    /// Query session this request belongs to. Results from an older session
    /// are dropped.
    pub generation: u64,
}

#[derive(Debug)]
pub struct PhotoList {
    state: ListState,
    query: Query,
    current_page: u32,
    /// `u32::MAX` until the first response reports the real count.
    total_pages: u32,
    loading_more: bool,
    generation: u64,
}

impl Default for PhotoList {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoList {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
            query: Query::Recent,
            current_page: 1,
            total_pages: u32::MAX,
            loading_more: false,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total page count, once a response has reported it.
    pub fn total_pages(&self) -> Option<u32> {
        (self.total_pages != u32::MAX).then_some(self.total_pages)
    }

    /// Loaded photos, empty unless the state is `Success`.
    pub fn photos(&self) -> &[Photo] {
        match &self.state {
            ListState::Success { photos, .. } => photos,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.photos().len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos().is_empty()
    }

    /// Begins a fresh query session: cursor back to page 1, photos cleared,
    /// state `Loading`. Returns the first-page request.
    pub fn start(&mut self, query: Query) -> PageRequest {
        self.generation += 1;
        self.query = query;
        self.current_page = 1;
        self.total_pages = u32::MAX;
        self.loading_more = false;
        self.state = ListState::Loading;

        info!(
            "Starting list session {} for {:?}",
            self.generation, self.query
        );

        PageRequest {
            query: self.query.clone(),
            page: self.current_page,
            append: false,
            generation: self.generation,
        }
    }

    /// Claims the next page if one may be loaded now.
    ///
    /// Returns `None` without touching anything while a page is in flight,
    /// before the first page has succeeded, or once the last page is loaded
    /// (by cursor or by the last response's `page < pages`).
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.loading_more || self.current_page >= self.total_pages {
            return None;
        }
        let ListState::Success {
            is_loading_more,
            has_more_pages,
            ..
        } = &mut self.state
        else {
            return None;
        };
        if !*has_more_pages {
            return None;
        }

        *is_loading_more = true;
        self.loading_more = true;
        self.current_page += 1;

        debug!(
            "Loading page {} of {} (session {})",
            self.current_page, self.total_pages, self.generation
        );

        Some(PageRequest {
            query: self.query.clone(),
            page: self.current_page,
            append: true,
            generation: self.generation,
        })
    }

    /// Applies the outcome of `request`. Returns `false` if the request
    /// belonged to a superseded session and was ignored.
    pub fn finish(&mut self, request: &PageRequest, result: Result<Page<Photo>, String>) -> bool {
        if request.generation != self.generation {
            debug!(
                "Dropping page {} from stale session {} (current {})",
                request.page, request.generation, self.generation
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.total_pages = page.pages;
                let previous = std::mem::replace(&mut self.state, ListState::Loading);
                let mut photos = match previous {
                    ListState::Success { photos, .. } if request.append => photos,
                    _ => Vec::with_capacity(page.items.len()),
                };
                let added = page.items.len();
                photos.extend(page.items);

                debug!(
                    "Page {}/{} loaded: +{} photos, {} total",
                    page.page,
                    page.pages,
                    added,
                    photos.len()
                );

                self.state = ListState::Success {
                    photos,
                    is_loading_more: false,
                    has_more_pages: page.page < page.pages,
                };
            }
            Err(message) if request.append => {
                // The failed page is dropped; the cursor stays where it is.
                warn!("Load more failed on page {}: {}", request.page, message);
                if let ListState::Success {
                    is_loading_more, ..
                } = &mut self.state
                {
                    *is_loading_more = false;
                }
            }
            Err(message) => {
                warn!("First page failed: {}", message);
                self.state = ListState::Error(message);
            }
        }

        if request.append {
            self.loading_more = false;
        }
        true
    }

    /// Near-end trigger predicate for the grid.
    ///
    /// True when the last visible item is within [`LOAD_MORE_THRESHOLD`]
    /// slots of the loaded count, nothing is loading, and more pages exist.
    pub fn should_load_more(&self, last_visible_index: Option<usize>) -> bool {
        let ListState::Success {
            photos,
            is_loading_more,
            has_more_pages,
        } = &self.state
        else {
            return false;
        };
        match last_visible_index {
            Some(index) => {
                index + LOAD_MORE_THRESHOLD >= photos.len() && !is_loading_more && *has_more_pages
            }
            None => false,
        }
    }

    /// Starts `query` and loads its first page in place.
    pub async fn refresh(&mut self, repository: &dyn PhotoRepository, query: Query) -> &ListState {
        let request = self.start(query);
        let result = fetch_page(repository, &request).await;
        self.finish(&request, result);
        &self.state
    }

    /// Loads the next page in place. Returns `false` if `load_more` declined.
    pub async fn load_next(&mut self, repository: &dyn PhotoRepository) -> bool {
        let Some(request) = self.load_more() else {
            return false;
        };
        let result = fetch_page(repository, &request).await;
        self.finish(&request, result);
        true
    }
}

/// Routes a request to the recent feed or to search, by query identity.
pub async fn fetch_page(
    repository: &dyn PhotoRepository,
    request: &PageRequest,
) -> Result<Page<Photo>, String> {
    match &request.query {
        Query::Recent => repository.fetch_recent(request.page).await,
        Query::Search(term) => repository.fetch_search(term, request.page).await,
    }
}

/// Fires once each time the near-end predicate goes from false to true.
#[derive(Debug, Default)]
pub struct LoadMoreTrigger {
    last: bool,
}

impl LoadMoreTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the current predicate value; returns `true` on a rising edge.
    pub fn update(&mut self, should_load_more: bool) -> bool {
        let fire = should_load_more && !self.last;
        self.last = should_load_more;
        fire
    }

    /// Forgets the last value, e.g. after the list was restarted.
    pub fn reset(&mut self) {
        self.last = false;
    }
}
