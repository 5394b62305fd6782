//! # Actions
//!
//! Everything that can happen in Omada becomes an `Action`.
//! User submits a search? That's `Action::Search(text)`.
//! A page arrives from the network? That's `Action::PageLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O to perform. No I/O
//! happens here; the adapter runs effects and feeds results back as actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::photo::{Page, Photo, PhotoDetail};
use crate::core::photo_detail::{DetailRequest, DetailState, PhotoDetailView};
use crate::core::photo_list::{ListState, PageRequest, Query};
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// Start a new query session. Blank text means the recent feed.
    Search(String),
    /// Restart the current query from page 1.
    Reload,
    /// The grid scrolled near the end of the loaded photos.
    LoadMore,
    PageLoaded {
        request: PageRequest,
        result: Result<Page<Photo>, String>,
    },
    OpenDetail(String),
    DetailLoaded {
        request: DetailRequest,
        result: Result<PhotoDetail, String>,
    },
    CloseDetail,
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchPage(PageRequest),
    FetchDetail(DetailRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Search(text) => {
            let query = Query::from_text(&text);
            app.search_text = text;
            app.status_message = format!("Loading {}...", query.label().to_lowercase());
            Effect::FetchPage(app.photos.start(query))
        }
        Action::Reload => {
            let query = app.photos.query().clone();
            app.status_message = format!("Reloading {}...", query.label().to_lowercase());
            Effect::FetchPage(app.photos.start(query))
        }
        Action::LoadMore => match app.photos.load_more() {
            Some(request) => {
                app.status_message = format!("Loading page {}...", request.page);
                Effect::FetchPage(request)
            }
            None => Effect::None,
        },
        Action::PageLoaded { request, result } => {
            if app.photos.finish(&request, result) {
                app.status_message = list_status(app);
            }
            Effect::None
        }
        Action::OpenDetail(photo_id) => {
            let mut view = PhotoDetailView::new();
            let request = view.load(&photo_id);
            app.detail = Some(view);
            app.status_message = format!("Loading photo {}...", photo_id);
            Effect::FetchDetail(request)
        }
        Action::DetailLoaded { request, result } => {
            match app.detail.as_mut() {
                Some(view) => {
                    if view.finish(&request, result) {
                        app.status_message = match view.state() {
                            DetailState::Error(_) => "Failed to load photo".to_string(),
                            _ => String::new(),
                        };
                    }
                }
                None => debug!("Detail for {} arrived after close", request.photo_id),
            }
            Effect::None
        }
        Action::CloseDetail => {
            app.detail = None;
            app.status_message = list_status(app);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Status bar text for the list screen.
fn list_status(app: &App) -> String {
    match app.photos.state() {
        ListState::Loading => "Loading...".to_string(),
        ListState::Error(_) => "Load failed - Ctrl+R to retry".to_string(),
        ListState::Success { photos, .. } => match app.photos.total_pages() {
            Some(pages) => format!(
                "{} photos (page {} of {})",
                photos.len(),
                app.photos.current_page(),
                pages
            ),
            None => format!("{} photos", photos.len()),
        },
    }
}
