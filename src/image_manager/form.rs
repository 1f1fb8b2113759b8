//! Form state for adding and editing images.

use super::models::{ImagePatch, ImageRecord, NewImage, CUSTOM_UPLOAD_SOURCE, DEFAULT_QUALITY};

/// Fields of the "add image" form, scoped to one manager instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddImageForm {
    pub url: String,
    pub title: String,
    pub source: String,
    pub quality: u32,
    pub dimensions: String,
    pub listing_url: String,
}

impl AddImageForm {
    /// Default state of the form for the part named `part_name`.
    pub fn for_part(part_name: &str) -> Self {
        AddImageForm {
            url: String::new(),
            title: part_name.to_string(),
            source: CUSTOM_UPLOAD_SOURCE.to_string(),
            quality: DEFAULT_QUALITY,
            dimensions: String::new(),
            listing_url: String::new(),
        }
    }

    /// Turn the form into a creation request. Images added through the form
    /// are always flagged as custom.
    pub fn to_new_image(&self) -> NewImage {
        let listing_url = self.listing_url.trim();
        NewImage {
            url: self.url.trim().to_string(),
            title: self.title.trim().to_string(),
            source: self.source.trim().to_string(),
            quality: self.quality,
            dimensions: self.dimensions.trim().to_string(),
            listing_url: if listing_url.is_empty() {
                None
            } else {
                Some(listing_url.to_string())
            },
            is_custom: Some(true),
            ai_analysis: None,
        }
    }
}

/// Draft of an in-progress edit, seeded from the record being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditImageForm {
    pub url: String,
    pub title: String,
    pub source: String,
    pub quality: u32,
    pub dimensions: String,
}

impl EditImageForm {
    pub fn from_record(record: &ImageRecord) -> Self {
        EditImageForm {
            url: record.url.clone(),
            title: record.title.clone(),
            source: record.source.clone(),
            quality: record.quality,
            dimensions: record.dimensions.clone(),
        }
    }

    /// Patch holding only the fields that differ from `original`.
    pub fn to_patch(&self, original: &ImageRecord) -> ImagePatch {
        ImagePatch {
            title: (self.title != original.title).then(|| self.title.clone()),
            source: (self.source != original.source).then(|| self.source.clone()),
            quality: (self.quality != original.quality).then_some(self.quality),
            dimensions: (self.dimensions != original.dimensions).then(|| self.dimensions.clone()),
            ..Default::default()
        }
    }
}
