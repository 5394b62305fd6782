//! # Photo Records
//!
//! Display-ready domain types built once from the wire DTOs in `api::types`.
//! Nested wire fields are flattened, the static image URL is derived from
//! `server`/`id`/`secret`, and the posted timestamp is made human readable.

use chrono::{Local, TimeZone};

use crate::api::types::{PhotoDto, PhotoInfoDto, PhotosDto};

pub const DEFAULT_IMAGE_HOST: &str = "live.staticflickr.com";

/// A photo as shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub is_public: bool,
    pub is_friend: bool,
    pub is_family: bool,
    pub server: String,
    pub farm: i64,
    pub secret: String,
    pub url: String,
}

/// A single photo with the extra metadata shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetail {
    pub id: String,
    pub owner: Owner,
    pub title: String,
    pub views: String,
    pub comment_count: String,
    pub dates: Dates,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dates {
    /// Formatted `YYYY-MM-DD HH:MM:SS` (local time), or the raw wire value.
    pub posted: String,
    pub taken: String,
}

/// One page of results plus the cursor numbers the server reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub pages: u32,
    pub total: u32,
}

/// Builds `https://<host>/<server>/<id>_<secret>.jpg`.
pub fn photo_url(image_host: &str, server: &str, id: &str, secret: &str) -> String {
    format!("https://{image_host}/{server}/{id}_{secret}.jpg")
}

/// Formats an epoch-seconds string as local `YYYY-MM-DD HH:MM:SS`.
/// Anything that is not a representable epoch comes back unchanged.
pub fn format_unix_timestamp(timestamp: &str) -> String {
    timestamp
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

impl Photo {
    pub fn from_dto(dto: PhotoDto, image_host: &str) -> Self {
        let url = photo_url(image_host, &dto.server, &dto.id, &dto.secret);
        Self {
            id: dto.id,
            owner: dto.owner,
            title: dto.title,
            is_public: dto.ispublic != 0,
            is_friend: dto.isfriend != 0,
            is_family: dto.isfamily != 0,
            server: dto.server,
            farm: dto.farm,
            secret: dto.secret,
            url,
        }
    }
}

impl PhotoDetail {
    pub fn from_dto(dto: PhotoInfoDto, image_host: &str) -> Self {
        let url = photo_url(image_host, &dto.server, &dto.id, &dto.secret);
        Self {
            id: dto.id,
            owner: Owner {
                username: dto.owner.username,
            },
            title: dto.title.content,
            views: dto.views,
            comment_count: dto.comments.content,
            dates: Dates {
                posted: format_unix_timestamp(&dto.dates.posted),
                taken: dto.dates.taken,
            },
            url,
        }
    }
}

impl Page<Photo> {
    pub fn from_dto(dto: PhotosDto, image_host: &str) -> Self {
        Self {
            items: dto
                .photo
                .into_iter()
                .map(|p| Photo::from_dto(p, image_host))
                .collect(),
            page: dto.page,
            pages: dto.pages,
            total: dto.total,
        }
    }
}
