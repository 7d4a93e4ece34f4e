// src/models/link.rs - Pure data structures
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validations::validate_ad_links;

/// Category of links sampled into rotation batches
pub const LINK_TYPE_VIDEO: &str = "video";

/// Category of advertisement links created by rotation batches
pub const LINK_TYPE_ADSTERRA: &str = "adsterra";

/// Video links requested when a rotation request omits `videoCount`
pub const DEFAULT_VIDEO_COUNT: i64 = 4;

/// A stored short link. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Link {
    /// Public identifier, minted by the service
    pub short_id: String,

    /// Where the short link points
    pub destination_url: String,

    /// Free-form category tag, e.g. `video` or `adsterra`
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub link_type: String,

    pub created_at: DateTime<Utc>,
}

/// A link that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub short_id: String,
    pub destination_url: String,
    pub link_type: String,
}

/// What a resolver hands back for a short id
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDetails {
    pub destination_url: String,
    pub link_type: String,
}

impl From<Link> for LinkDetails {
    fn from(link: Link) -> Self {
        LinkDetails {
            destination_url: link.destination_url,
            link_type: link.link_type,
        }
    }
}

// DTO for `POST /api/save-link`
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveLinkDto {
    #[validate(
        required(message = "destinationUrl required"),
        length(min = 1, message = "destinationUrl required")
    )]
    pub destination_url: Option<String>,

    #[serde(rename = "type")]
    pub link_type: Option<String>,
}

impl SaveLinkDto {
    /// The requested type, `video` when omitted or blank
    pub fn link_type_or_default(&self) -> String {
        match self.link_type.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => LINK_TYPE_VIDEO.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveLinkResponseDto {
    pub id: String,
}

// Query string of `GET /api/get-link-details`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LinkDetailsQuery {
    #[validate(
        required(message = "ID required"),
        length(min = 1, message = "ID required")
    )]
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkDetailsResponseDto {
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: String,
}

impl From<LinkDetails> for LinkDetailsResponseDto {
    fn from(details: LinkDetails) -> Self {
        LinkDetailsResponseDto {
            url: details.destination_url,
            link_type: details.link_type,
        }
    }
}

// DTO for `POST /api/create-rotated-links`
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRotatedLinksDto {
    #[serde(default)]
    #[validate(custom(function = "validate_ad_links"))]
    pub adsterra_links: Vec<String>,

    #[serde(default = "default_video_count")]
    pub video_count: i64,
}

impl Default for CreateRotatedLinksDto {
    fn default() -> Self {
        Self {
            adsterra_links: Vec::new(),
            video_count: DEFAULT_VIDEO_COUNT,
        }
    }
}

fn default_video_count() -> i64 {
    DEFAULT_VIDEO_COUNT
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RotatedLinksResponseDto {
    pub ids: Vec<String>,
}
