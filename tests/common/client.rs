//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all image endpoints.
//!
//! When API routes or request formats change, update only this file.
#![allow(dead_code)]

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Server
    // ========================================================================

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    // ========================================================================
    // Parts
    // ========================================================================

    /// GET /v1/parts/{id}
    pub async fn get_part(&self, part_id: &str) -> Response {
        self.client
            .get(format!(
                "{}/v1/parts/{}",
                self.base_url,
                urlencoding::encode(part_id)
            ))
            .send()
            .await
            .expect("Get part request failed")
    }

    /// GET /v1/parts/{id}/images
    pub async fn get_part_images(&self, part_id: &str) -> Response {
        self.client
            .get(format!(
                "{}/v1/parts/{}/images",
                self.base_url,
                urlencoding::encode(part_id)
            ))
            .send()
            .await
            .expect("Get part images request failed")
    }

    /// GET /v1/parts/{id}/images, decoded and asserted successful
    pub async fn list_image_urls(&self, part_id: &str) -> Vec<String> {
        let response = self.get_part_images(part_id).await;
        assert!(response.status().is_success());
        let images: Vec<Value> = response.json().await.expect("Invalid image list");
        images
            .into_iter()
            .map(|image| image["url"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    // ========================================================================
    // Images
    // ========================================================================

    /// POST /v1/images
    pub async fn create_image(&self, part_id: &str, image_data: Value) -> Response {
        self.client
            .post(format!("{}/v1/images", self.base_url))
            .json(&json!({
                "partId": part_id,
                "imageData": image_data,
            }))
            .send()
            .await
            .expect("Create image request failed")
    }

    /// PUT /v1/images
    pub async fn update_image(&self, part_id: &str, image_url: &str, updates: Value) -> Response {
        self.client
            .put(format!("{}/v1/images", self.base_url))
            .json(&json!({
                "partId": part_id,
                "imageUrl": image_url,
                "updates": updates,
            }))
            .send()
            .await
            .expect("Update image request failed")
    }

    /// DELETE /v1/images?partId=..&imageUrl=..
    pub async fn delete_image(&self, part_id: &str, image_url: &str) -> Response {
        self.client
            .delete(format!("{}/v1/images", self.base_url))
            .query(&[("partId", part_id), ("imageUrl", image_url)])
            .send()
            .await
            .expect("Delete image request failed")
    }
}
