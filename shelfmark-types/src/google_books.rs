//! Google Books volumes API payloads.

use serde::{Deserialize, Serialize};

/// Response of a volumes search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    /// Total number of matches reported by the API.
    #[serde(default)]
    pub total_items: u32,
    /// Volumes on this page.
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// A single volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Volume id (the source-native id).
    pub id: Option<String>,
    /// Bibliographic details.
    pub volume_info: Option<VolumeInfo>,
}

/// Bibliographic details of a volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    /// Title.
    pub title: Option<String>,
    /// Subtitle.
    pub subtitle: Option<String>,
    /// Author names.
    pub authors: Vec<String>,
    /// Publisher name.
    pub publisher: Option<String>,
    /// Free-text publication date, e.g. `"1990-09-01"` or `"2005"`.
    pub published_date: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// ISBNs and other identifiers.
    pub industry_identifiers: Vec<IndustryIdentifier>,
    /// Page count.
    pub page_count: Option<u32>,
    /// Category labels.
    pub categories: Vec<String>,
    /// Average rating on a 5-point scale.
    pub average_rating: Option<f64>,
    /// Number of ratings.
    pub ratings_count: Option<u32>,
    /// Two-letter language code.
    pub language: Option<String>,
    /// Cover images by size.
    pub image_links: Option<ImageLinks>,
}

/// Identifier entry, e.g. `{ "type": "ISBN_13", "identifier": "9780441013593" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryIdentifier {
    /// Identifier scheme (`ISBN_10`, `ISBN_13`, `OTHER`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Identifier value.
    pub identifier: Option<String>,
}

/// Cover image urls by size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    /// Smallest thumbnail.
    pub small_thumbnail: Option<String>,
    /// Thumbnail.
    pub thumbnail: Option<String>,
    /// Small.
    pub small: Option<String>,
    /// Medium.
    pub medium: Option<String>,
    /// Large.
    pub large: Option<String>,
    /// Extra large.
    pub extra_large: Option<String>,
}

impl ImageLinks {
    /// Largest available image url.
    #[must_use]
    pub fn largest(&self) -> Option<&str> {
        self.extra_large
            .as_deref()
            .or(self.large.as_deref())
            .or(self.medium.as_deref())
            .or(self.small.as_deref())
            .or(self.thumbnail.as_deref())
    }
}
