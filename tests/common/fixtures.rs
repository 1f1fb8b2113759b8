//! Test fixture creation for the part catalog

use super::constants::*;
use anyhow::Result;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes the static part catalog used by every test server.
/// Returns the path of the JSON file inside `dir`.
pub fn write_test_catalog(dir: &TempDir) -> Result<PathBuf> {
    let catalog = json!([
        {
            "id": PART_1_ID,
            "name": PART_1_NAME,
            "images": [
                {
                    "url": SEEDED_IMAGE_URL,
                    "title": PART_1_NAME,
                    "source": "eBay",
                    "quality": SEEDED_IMAGE_QUALITY,
                    "dimensions": "1200x900",
                    "listingUrl": "https://www.ebay.com/itm/1234",
                    "addedDate": SEEDED_IMAGE_ADDED_DATE,
                    "aiAnalysis": {
                        "quality": 0.91,
                        "consistency": 0.88,
                        "isRelevant": true,
                        "confidence": 0.93,
                        "issues": [],
                        "recommendations": ["Crop the background"],
                        "aiScore": 90.5
                    }
                }
            ]
        },
        {
            "id": PART_2_ID,
            "name": PART_2_NAME
        }
    ]);

    let path = dir.path().join("parts.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&catalog)?)?;
    Ok(path)
}

/// Body of an image creation with the given url and quality.
pub fn new_image_json(url: &str, quality: u32) -> Value {
    json!({
        "url": url,
        "title": "Test image",
        "source": "Custom Upload",
        "quality": quality,
        "dimensions": "800x600",
        "isCustom": true
    })
}
