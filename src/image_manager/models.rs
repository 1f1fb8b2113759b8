//! Image record models shared by the manager, the HTTP client and the server.
//!
//! The wire format is camelCase JSON, matching what the catalog frontend
//! has always sent and received.

use serde::{Deserialize, Serialize};

/// Default quality assigned to manually added images.
pub const DEFAULT_QUALITY: u32 = 100;

/// Source tag used for images added by hand.
pub const CUSTOM_UPLOAD_SOURCE: &str = "Custom Upload";

fn default_quality() -> u32 {
    DEFAULT_QUALITY
}

/// Externally produced quality/relevance annotations for an image.
///
/// Only ever replaced as a whole, never patched field by field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub quality: f64,
    pub consistency: f64,
    pub is_relevant: bool,
    pub confidence: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub ai_score: f64,
}

/// One image associated with one catalog part.
///
/// `url` is the identity of the record within its part's collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub url: String,
    pub title: String,
    pub source: String,
    pub quality: u32,
    pub dimensions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_url: Option<String>,
    pub added_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_custom: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
}

impl ImageRecord {
    /// Build the stored record for `new_image`, stamping it with `added_date`.
    pub fn from_new(new_image: NewImage, added_date: String) -> Self {
        ImageRecord {
            url: new_image.url,
            title: new_image.title,
            source: new_image.source,
            quality: new_image.quality,
            dimensions: new_image.dimensions,
            listing_url: new_image.listing_url,
            added_date,
            is_custom: new_image.is_custom,
            ai_analysis: new_image.ai_analysis,
        }
    }

    /// Merge the fields present in `patch` onto this record.
    ///
    /// `url` and `added_date` are never touched.
    pub fn apply_patch(&mut self, patch: &ImagePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(source) = &patch.source {
            self.source = source.clone();
        }
        if let Some(quality) = patch.quality {
            self.quality = quality;
        }
        if let Some(dimensions) = &patch.dimensions {
            self.dimensions = dimensions.clone();
        }
        if let Some(listing_url) = &patch.listing_url {
            self.listing_url = Some(listing_url.clone());
        }
        if let Some(ai_analysis) = &patch.ai_analysis {
            self.ai_analysis = Some(ai_analysis.clone());
        }
    }
}

/// An image as submitted for creation: everything but `addedDate`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewImage {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default = "default_quality")]
    pub quality: u32,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_custom: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
}

/// Partial update of the mutable fields of an image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
}

impl ImagePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.source.is_none()
            && self.quality.is_none()
            && self.dimensions.is_none()
            && self.listing_url.is_none()
            && self.ai_analysis.is_none()
    }
}

/// The minimal view of a catalog part the manager needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartRef {
    pub id: String,
    pub name: String,
}

impl PartRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        PartRef {
            id: id.into(),
            name: name.into(),
        }
    }
}
