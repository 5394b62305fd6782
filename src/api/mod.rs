pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_BASE_URL, FlickrClient};
pub use error::ApiError;
