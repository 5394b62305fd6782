//! # TUI Components
//!
//! Components follow two patterns:
//!
//! - **Stateless** (props in struct fields, rebuilt every frame): `TitleBar`,
//!   `PhotoDetailPanel`.
//! - **Stateful** (persist in `TuiState`, emit events via `EventHandler`):
//!   `SearchBox`, `PhotoGridState`.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── search_box.rs    (Single-line search input)
//! ├── photo_grid.rs    (Three-column paginated grid)
//! └── photo_detail.rs  (Metadata for one photo)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod photo_detail;
pub mod photo_grid;
pub mod search_box;
pub use photo_detail::PhotoDetailPanel;
pub use photo_grid::{GridEvent, PhotoGrid, PhotoGridState};
pub use search_box::{SearchBox, SearchEvent};
