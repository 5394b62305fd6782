//! Wire types for the Flickr REST API (`format=json&nojsoncallback=1`).
//!
//! Only the fields the app reads are modelled. Flickr is loose about number
//! vs string encoding (`"total": "1000"` on some methods, `1000` on others),
//! so the numeric and counter fields go through lenient deserializers.

use serde::{Deserialize, Deserializer};

/// Every Flickr response carries `stat`. On `"fail"` the payload is replaced
/// by `code` and `message`.
#[derive(Deserialize, Debug)]
#[serde(tag = "stat")]
pub enum Envelope<T> {
    #[serde(rename = "ok")]
    Ok(T),
    #[serde(rename = "fail")]
    Fail {
        #[serde(default)]
        code: i64,
        #[serde(default)]
        message: String,
    },
}

/// Body of `flickr.photos.getRecent` and `flickr.photos.search`.
#[derive(Deserialize, Debug, Clone)]
pub struct PhotosResponse {
    pub photos: PhotosDto,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhotosDto {
    #[serde(deserialize_with = "lenient_u32")]
    pub page: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub pages: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub perpage: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total: u32,
    #[serde(default)]
    pub photo: Vec<PhotoDto>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhotoDto {
    pub id: String,
    #[serde(default)]
    pub owner: String,
    pub secret: String,
    pub server: String,
    #[serde(default)]
    pub farm: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ispublic: u8,
    #[serde(default)]
    pub isfriend: u8,
    #[serde(default)]
    pub isfamily: u8,
}

/// Body of `flickr.photos.getInfo`.
#[derive(Deserialize, Debug, Clone)]
pub struct PhotoInfoResponse {
    pub photo: PhotoInfoDto,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhotoInfoDto {
    pub id: String,
    pub secret: String,
    pub server: String,
    #[serde(default)]
    pub farm: i64,
    pub owner: OwnerDto,
    #[serde(default)]
    pub title: Content,
    #[serde(default)]
    pub description: Content,
    #[serde(default)]
    pub comments: Content,
    #[serde(default, deserialize_with = "lenient_string")]
    pub views: String,
    pub dates: DatesDto,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OwnerDto {
    #[serde(default)]
    pub nsid: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub realname: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatesDto {
    #[serde(deserialize_with = "lenient_string")]
    pub posted: String,
    #[serde(default)]
    pub taken: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lastupdate: String,
}

/// Flickr wraps free text as `{"_content": "..."}`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Content {
    #[serde(rename = "_content", default, deserialize_with = "lenient_string")]
    pub content: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => u32::try_from(n).map_err(serde::de::Error::custom),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::Text(s) => s,
    })
}
