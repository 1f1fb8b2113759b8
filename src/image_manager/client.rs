//! HTTP client for the image-management endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::api::{
    CreateImageRequest, CreateImageResponse, DeleteImageQuery, MutationResponse, PartSummary,
    UpdateImageRequest,
};
use super::error::ImageManagerError;
use super::models::{ImagePatch, ImageRecord, NewImage};
use super::remote::ImageRemote;

/// Talks to a catalog server over HTTP.
#[derive(Clone)]
pub struct HttpImageRemote {
    client: Client,
    base_url: String,
}

impl HttpImageRemote {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the catalog server (e.g., "http://localhost:3001")
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Get the base URL of the catalog server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn images_url(&self) -> String {
        format!("{}/v1/images", self.base_url)
    }

    fn part_url(&self, part_id: &str) -> String {
        format!("{}/v1/parts/{}", self.base_url, urlencoding::encode(part_id))
    }

    /// Fetch the summary of a part.
    pub async fn get_part(&self, part_id: &str) -> Result<PartSummary, ImageManagerError> {
        let response = self
            .client
            .get(self.part_url(part_id))
            .send()
            .await
            .context("Failed to fetch part")?;
        parse_or_failure(response).await
    }
}

/// Decode a successful response as `T`, or turn the error body into a
/// `Remote` error.
async fn parse_or_failure<T: DeserializeOwned>(response: Response) -> Result<T, ImageManagerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response
            .json()
            .await
            .with_context(|| format!("Failed to parse response (status {})", status))?);
    }

    match response.json::<MutationResponse>().await {
        Ok(body) => {
            body.into_result()?;
            Err(ImageManagerError::Transport(anyhow::anyhow!(
                "Request failed with status {} but reported success",
                status
            )))
        }
        Err(_) => Err(ImageManagerError::Transport(anyhow::anyhow!(
            "Request failed with status {}",
            status
        ))),
    }
}

/// Decode a mutation response. The body carries the outcome even for
/// non-2xx statuses.
async fn parse_mutation(response: Response) -> Result<(), ImageManagerError> {
    let status = response.status();
    let body: MutationResponse = response
        .json()
        .await
        .with_context(|| format!("Failed to parse response (status {})", status))?;
    body.into_result()
}

#[async_trait]
impl ImageRemote for HttpImageRemote {
    async fn list_images(&self, part_id: &str) -> Result<Vec<ImageRecord>, ImageManagerError> {
        let response = self
            .client
            .get(format!("{}/images", self.part_url(part_id)))
            .send()
            .await
            .context("Failed to fetch part images")?;
        parse_or_failure(response).await
    }

    async fn create_image(
        &self,
        part_id: &str,
        image: &NewImage,
    ) -> Result<ImageRecord, ImageManagerError> {
        let body = CreateImageRequest {
            part_id: part_id.to_string(),
            image_data: image.clone(),
        };
        let response = self
            .client
            .post(self.images_url())
            .json(&body)
            .send()
            .await
            .context("Failed to send create image request")?;

        let status = response.status();
        let body: CreateImageResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse create response (status {})", status))?;
        body.into_result()
    }

    async fn update_image(
        &self,
        part_id: &str,
        image_url: &str,
        updates: &ImagePatch,
    ) -> Result<(), ImageManagerError> {
        let body = UpdateImageRequest {
            part_id: part_id.to_string(),
            image_url: image_url.to_string(),
            updates: updates.clone(),
        };
        let response = self
            .client
            .put(self.images_url())
            .json(&body)
            .send()
            .await
            .context("Failed to send update image request")?;
        parse_mutation(response).await
    }

    async fn delete_image(&self, part_id: &str, image_url: &str) -> Result<(), ImageManagerError> {
        let query = DeleteImageQuery {
            part_id: part_id.to_string(),
            image_url: image_url.to_string(),
        };
        let response = self
            .client
            .delete(self.images_url())
            .query(&query)
            .send()
            .await
            .context("Failed to send delete image request")?;
        parse_mutation(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpImageRemote::new("http://localhost:3001".to_string(), 30).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn test_trailing_slash_removal() {
        let client = HttpImageRemote::new("http://localhost:3001/".to_string(), 30).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn test_part_url_is_encoded() {
        let client = HttpImageRemote::new("http://localhost:3001".to_string(), 30).unwrap();
        assert_eq!(
            client.part_url("BP 10/2"),
            "http://localhost:3001/v1/parts/BP%2010%2F2"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        // Port 9 (discard) is closed on test machines
        let client = HttpImageRemote::new("http://127.0.0.1:9".to_string(), 2).unwrap();
        let result = client.delete_image("p-1", "a.jpg").await;
        assert!(matches!(result, Err(ImageManagerError::Transport(_))));
    }
}
