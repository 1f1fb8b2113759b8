//! Request and response bodies of the image-management endpoint.
//!
//! Shared by the server routes and the HTTP client so both ends agree on
//! the wire format.

use super::error::ImageManagerError;
use super::models::{ImagePatch, ImageRecord, NewImage};
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/images`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub part_id: String,
    pub image_data: NewImage,
}

/// Response of `POST /v1/images`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_image: Option<ImageRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CreateImageResponse {
    pub fn created(image: ImageRecord) -> Self {
        CreateImageResponse {
            success: true,
            new_image: Some(image),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        CreateImageResponse {
            success: false,
            new_image: None,
            message: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<ImageRecord, ImageManagerError> {
        match (self.success, self.new_image) {
            (true, Some(image)) => Ok(image),
            (true, None) => Err(ImageManagerError::Transport(anyhow::anyhow!(
                "Create response reported success without an image"
            ))),
            (false, _) => Err(ImageManagerError::Remote(
                self.message.unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
            )),
        }
    }
}

/// Body of `PUT /v1/images`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
    pub part_id: String,
    pub image_url: String,
    pub updates: ImagePatch,
}

/// Query string of `DELETE /v1/images`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageQuery {
    pub part_id: String,
    pub image_url: String,
}

/// Response of update and delete, and the error body of every route.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

const UNKNOWN_FAILURE: &str = "The image service reported an unknown failure";

impl MutationResponse {
    pub fn ok() -> Self {
        MutationResponse {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        MutationResponse {
            success: false,
            message: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<(), ImageManagerError> {
        if self.success {
            Ok(())
        } else {
            Err(ImageManagerError::Remote(
                self.message.unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
            ))
        }
    }
}

/// Response of `GET /v1/parts/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartSummary {
    pub id: String,
    pub name: String,
    pub image_count: usize,
}
