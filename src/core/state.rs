//! # Application State
//!
//! Core business state for Omada. Domain logic only - no TUI types.
//! Presentation state (selection, scroll, focus) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── repository: Arc<dyn PhotoRepository>  // data source
//! ├── photos: PhotoList                     // grid pagination state machine
//! ├── detail: Option<PhotoDetailView>       // Some = detail screen open
//! ├── search_text: String                   // last submitted search
//! └── status_message: String                // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::photo_detail::PhotoDetailView;
use crate::core::photo_list::PhotoList;
use crate::core::repository::PhotoRepository;

pub struct App {
    pub repository: Arc<dyn PhotoRepository>,
    pub photos: PhotoList,
    pub detail: Option<PhotoDetailView>,
    pub search_text: String,
    pub status_message: String,
}

impl App {
    pub fn new(repository: Arc<dyn PhotoRepository>) -> Self {
        Self {
            repository,
            photos: PhotoList::new(),
            detail: None,
            search_text: String::new(),
            status_message: String::from("Welcome to Omada!"),
        }
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail.is_some()
    }
}
