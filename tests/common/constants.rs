//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (catalog ids, seeded images, etc.),
//! update only this file.
#![allow(dead_code)]

// ============================================================================
// Test Catalog
// ============================================================================

/// Part seeded with one image
pub const PART_1_ID: &str = "BP-100";

/// Name of PART_1_ID
pub const PART_1_NAME: &str = "Ceramic Brake Pad Set";

/// Part seeded without images
pub const PART_2_ID: &str = "OF-7";

/// Name of PART_2_ID
pub const PART_2_NAME: &str = "Oil Filter";

/// Part id that is never seeded
pub const UNKNOWN_PART_ID: &str = "no-such-part";

/// Url of the image seeded on PART_1_ID
pub const SEEDED_IMAGE_URL: &str = "https://img.example.com/bp-100/front.jpg";

/// Quality of the image seeded on PART_1_ID
pub const SEEDED_IMAGE_QUALITY: u32 = 95;

/// Added date of the image seeded on PART_1_ID
pub const SEEDED_IMAGE_ADDED_DATE: &str = "2024-03-01T10:00:00+00:00";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the test server to answer its readiness probe
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness probes
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Timeout of every test client request
pub const REQUEST_TIMEOUT_SECS: u64 = 5;
