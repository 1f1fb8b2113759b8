//! PartImageStore trait definition.

use super::error::PartStoreResult;
use super::models::Part;
use crate::image_manager::{ImagePatch, ImageRecord, NewImage};

/// Storage backend for parts and their image collections.
///
/// Image collections are ordered by insertion and `url` is unique within a
/// part.
pub trait PartImageStore: Send + Sync {
    // =========================================================================
    // Parts
    // =========================================================================

    fn get_part(&self, id: &str) -> PartStoreResult<Option<Part>>;

    /// Insert a part, returning false if a part with the same id exists.
    fn insert_part(&self, part: &Part) -> PartStoreResult<bool>;

    /// Insert a part together with its images in one transaction. Returns
    /// false, writing nothing, if the part already exists. Any failing image
    /// rolls back the whole part.
    fn import_part(&self, part: &Part, images: &[ImageRecord]) -> PartStoreResult<bool>;

    // =========================================================================
    // Images
    // =========================================================================

    /// Get the images of a part in insertion order.
    fn get_part_images(&self, part_id: &str) -> PartStoreResult<Vec<ImageRecord>>;

    fn count_part_images(&self, part_id: &str) -> PartStoreResult<usize>;

    /// Create an image, stamping its `added_date` with the current time.
    fn add_image(&self, part_id: &str, image: NewImage) -> PartStoreResult<ImageRecord>;

    /// Insert a complete record as is, used when importing existing data.
    fn insert_image(&self, part_id: &str, record: &ImageRecord) -> PartStoreResult<()>;

    /// Merge `patch` onto the image with the given url and return the result.
    fn update_image(
        &self,
        part_id: &str,
        url: &str,
        patch: &ImagePatch,
    ) -> PartStoreResult<ImageRecord>;

    /// Remove the image with the given url. Returns false when the part has
    /// no such image, which leaves the collection untouched.
    fn delete_image(&self, part_id: &str, url: &str) -> PartStoreResult<bool>;

    // =========================================================================
    // Counts (for metrics)
    // =========================================================================

    fn get_parts_count(&self) -> usize;

    fn get_images_count(&self) -> usize;
}
