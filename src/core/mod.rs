//! # Core Application Logic
//!
//! Omada's business logic. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • PhotoList (pages)    │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │ Repository │
//!     │  Adapter   │ ── spawns fetches ─────▶ │  (Flickr)  │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct holding all application state
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`photo_list`]: Pagination state machine for the grid
//! - [`photo_detail`]: Single-photo detail controller
//! - [`repository`]: `PhotoRepository` trait and the Flickr-backed implementation
//! - [`photo`]: Domain records mapped from the wire types
//! - [`config`]: Config file + env + CLI resolution

pub mod action;
pub mod config;
pub mod photo;
pub mod photo_detail;
pub mod photo_list;
pub mod repository;
pub mod state;
