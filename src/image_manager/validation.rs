//! Validation for image submissions.
//!
//! Runs on both sides of the wire: the manager rejects bad input before any
//! network call, and the server rejects it again before touching the store.

use super::models::{ImagePatch, ImageRecord, NewImage};
use std::fmt;

pub const MIN_QUALITY: u32 = 1;
pub const MAX_QUALITY: u32 = 100;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField {
        field: &'static str,
    },
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    DuplicateUrl {
        url: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "Field '{}' must be between {} and {}, got {}",
                    field, min, max, value
                )
            }
            ValidationError::DuplicateUrl { url } => {
                write!(f, "An image with url '{}' already exists", url)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

fn validate_quality(quality: u32) -> ValidationResult<()> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(ValidationError::OutOfRange {
            field: "quality",
            value: quality,
            min: MIN_QUALITY,
            max: MAX_QUALITY,
        });
    }
    Ok(())
}

/// Validate an image about to be created.
pub fn validate_new_image(image: &NewImage) -> ValidationResult<()> {
    if image.url.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "url" });
    }
    validate_quality(image.quality)
}

/// Validate a complete record coming from outside the manager, such as the
/// seed catalog.
pub fn validate_record(record: &ImageRecord) -> ValidationResult<()> {
    if record.url.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "url" });
    }
    validate_quality(record.quality)
}

/// Validate a partial update.
pub fn validate_patch(patch: &ImagePatch) -> ValidationResult<()> {
    if let Some(quality) = patch.quality {
        validate_quality(quality)?;
    }
    Ok(())
}

/// Validate the identity of an image targeted by update or delete.
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    if url.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "imageUrl" });
    }
    Ok(())
}
