use serde::{Deserialize, Serialize};

use crate::image_manager::ImageRecord;

/// A catalog part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub name: String,
}

/// A part as it appears in the static catalog file, optionally with images.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedPart {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}
