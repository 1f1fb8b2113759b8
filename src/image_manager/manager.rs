//! Image collection manager.
//!
//! Holds the image collection of one part and keeps it in sync with the
//! remote store. Every mutation is confirmed remotely first; the local
//! collection is only patched once the store has answered with success.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::display::ImageBadges;
use super::error::ImageManagerError;
use super::form::{AddImageForm, EditImageForm};
use super::models::{ImagePatch, ImageRecord, NewImage, PartRef};
use super::remote::ImageRemote;
use super::validation::{validate_image_url, validate_new_image, validate_patch, ValidationError};

pub type ImagesChangedCallback = Box<dyn FnMut(&[ImageRecord]) + Send>;

pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this image?";

/// Blocking confirmation asked before a destructive call.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Outcome of a delete request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub struct ImageCollectionManager {
    remote: Arc<dyn ImageRemote>,
    part: PartRef,
    images: Vec<ImageRecord>,
    add_form: AddImageForm,
    editing: Option<EditImageForm>,
    on_images_change: Option<ImagesChangedCallback>,
}

impl ImageCollectionManager {
    pub fn new(remote: Arc<dyn ImageRemote>, part: PartRef, images: Vec<ImageRecord>) -> Self {
        let add_form = AddImageForm::for_part(&part.name);
        ImageCollectionManager {
            remote,
            part,
            images,
            add_form,
            editing: None,
            on_images_change: None,
        }
    }

    /// Load the part's current collection from the remote store and build a
    /// manager around it.
    pub async fn load(
        remote: Arc<dyn ImageRemote>,
        part: PartRef,
    ) -> Result<Self, ImageManagerError> {
        let images = remote.list_images(&part.id).await?;
        debug!("Loaded {} images for part {}", images.len(), part.id);
        Ok(Self::new(remote, part, images))
    }

    /// Register the observer notified after every successful mutation.
    pub fn on_images_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&[ImageRecord]) + Send + 'static,
    {
        self.on_images_change = Some(Box::new(callback));
        self
    }

    pub fn part(&self) -> &PartRef {
        &self.part
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn find(&self, url: &str) -> Option<&ImageRecord> {
        self.images.iter().find(|image| image.url == url)
    }

    /// Badges for every image, in collection order.
    pub fn badges(&self) -> Vec<(&ImageRecord, ImageBadges)> {
        self.images
            .iter()
            .map(|image| (image, ImageBadges::for_record(image)))
            .collect()
    }

    pub fn add_form(&self) -> &AddImageForm {
        &self.add_form
    }

    pub fn add_form_mut(&mut self) -> &mut AddImageForm {
        &mut self.add_form
    }

    pub fn reset_add_form(&mut self) {
        self.add_form = AddImageForm::for_part(&self.part.name);
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_images_change.as_mut() {
            callback(&self.images);
        }
    }

    fn log_failure(&self, operation: &str, err: &ImageManagerError) {
        match err {
            ImageManagerError::Transport(cause) => {
                error!(
                    "Failed to {} image for part {}: {:#}",
                    operation, self.part.id, cause
                );
            }
            other => {
                warn!(
                    "Could not {} image for part {}: {}",
                    operation, self.part.id, other
                );
            }
        }
    }

    // =========================================================================
    // Add
    // =========================================================================

    /// Submit the add form. On success the form is reset.
    pub async fn submit_add_form(&mut self) -> Result<&ImageRecord, ImageManagerError> {
        let new_image = self.add_form.to_new_image();
        self.add_image(new_image).await
    }

    /// Create `new_image` remotely and append the stored record.
    pub async fn add_image(
        &mut self,
        new_image: NewImage,
    ) -> Result<&ImageRecord, ImageManagerError> {
        validate_new_image(&new_image)?;
        if self.find(&new_image.url).is_some() {
            return Err(ValidationError::DuplicateUrl {
                url: new_image.url,
            }
            .into());
        }

        let stored = match self.remote.create_image(&self.part.id, &new_image).await {
            Ok(stored) => stored,
            Err(err) => {
                self.log_failure("add", &err);
                return Err(err);
            }
        };

        info!("Added image {} to part {}", stored.url, self.part.id);
        self.images.push(stored);
        self.reset_add_form();
        self.notify();

        let last = self.images.len() - 1;
        Ok(&self.images[last])
    }

    // =========================================================================
    // Edit / Update
    // =========================================================================

    /// Open the edit view for `url`, returning the draft.
    pub fn begin_edit(&mut self, url: &str) -> Option<&mut EditImageForm> {
        let draft = EditImageForm::from_record(self.find(url)?);
        self.editing = Some(draft);
        self.editing.as_mut()
    }

    pub fn editing(&self) -> Option<&EditImageForm> {
        self.editing.as_ref()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the open edit draft. Only changed fields are sent.
    pub async fn submit_edit(&mut self) -> Result<(), ImageManagerError> {
        let Some(draft) = self.editing.clone() else {
            return Ok(());
        };
        let patch = match self.find(&draft.url) {
            Some(original) => draft.to_patch(original),
            None => {
                // Gone while being edited, nothing left to patch
                self.editing = None;
                return Ok(());
            }
        };
        self.update_image(&draft.url, patch).await
    }

    /// Send `patch` for the image `url` and merge it locally once confirmed.
    ///
    /// If the record disappeared locally while the request was in flight the
    /// merge is skipped.
    pub async fn update_image(
        &mut self,
        url: &str,
        patch: ImagePatch,
    ) -> Result<(), ImageManagerError> {
        validate_image_url(url)?;
        validate_patch(&patch)?;

        if let Err(err) = self.remote.update_image(&self.part.id, url, &patch).await {
            self.log_failure("update", &err);
            return Err(err);
        }

        if self.editing.as_ref().is_some_and(|draft| draft.url == url) {
            self.editing = None;
        }
        match self.images.iter_mut().find(|image| image.url == url) {
            Some(image) => {
                image.apply_patch(&patch);
                self.notify();
            }
            None => debug!("Image {} no longer in collection, skipping merge", url),
        }
        Ok(())
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Delete the image `url` after `confirm` agrees. Declining makes no
    /// remote call.
    pub async fn delete_image(
        &mut self,
        url: &str,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, ImageManagerError> {
        validate_image_url(url)?;
        if !confirm.confirm(DELETE_CONFIRMATION_PROMPT) {
            debug!("Delete of {} cancelled", url);
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(err) = self.remote.delete_image(&self.part.id, url).await {
            self.log_failure("delete", &err);
            return Err(err);
        }

        info!("Deleted image {} from part {}", url, self.part.id);
        let count_before = self.images.len();
        self.images.retain(|image| image.url != url);
        if self.editing.as_ref().is_some_and(|draft| draft.url == url) {
            self.editing = None;
        }
        if self.images.len() != count_before {
            self.notify();
        }
        Ok(DeleteOutcome::Deleted)
    }
}
