//! Image collection management for catalog parts.
//!
//! The [`ImageCollectionManager`] owns the local view of one part's images
//! and keeps it consistent with an [`ImageRemote`] by applying changes only
//! after the remote confirmed them.

pub mod api;
pub mod client;
pub mod display;
pub mod error;
pub mod form;
pub mod manager;
pub mod models;
pub mod remote;
pub mod validation;

pub use client::HttpImageRemote;
pub use display::{BadgeColor, ImageBadges, ImageSource, QualityBand, RelevanceBadge};
pub use error::ImageManagerError;
pub use form::{AddImageForm, EditImageForm};
pub use manager::{Confirm, DeleteOutcome, ImageCollectionManager};
pub use models::*;
pub use remote::ImageRemote;
pub use validation::{ValidationError, ValidationResult};
