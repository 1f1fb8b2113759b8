use super::error::ImageManagerError;
use super::models::{ImagePatch, ImageRecord, NewImage};
use async_trait::async_trait;

/// The remote image store the manager mirrors.
///
/// Implementations report `success: false` answers as
/// [`ImageManagerError::Remote`] and network or decoding failures as
/// [`ImageManagerError::Transport`].
#[async_trait]
pub trait ImageRemote: Send + Sync {
    /// Load the current image collection of a part, in store order.
    async fn list_images(&self, part_id: &str) -> Result<Vec<ImageRecord>, ImageManagerError>;

    /// Create an image. Returns the record as stored, which carries the
    /// store-assigned `added_date`.
    async fn create_image(
        &self,
        part_id: &str,
        image: &NewImage,
    ) -> Result<ImageRecord, ImageManagerError>;

    /// Apply a partial update to the image identified by `image_url`.
    async fn update_image(
        &self,
        part_id: &str,
        image_url: &str,
        updates: &ImagePatch,
    ) -> Result<(), ImageManagerError>;

    /// Delete the image identified by `image_url`.
    async fn delete_image(&self, part_id: &str, image_url: &str) -> Result<(), ImageManagerError>;
}
