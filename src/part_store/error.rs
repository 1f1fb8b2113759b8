use thiserror::Error;

/// Errors the part store reports for conditions callers act upon.
///
/// Anything else (I/O, SQLite, decoding) is carried as `Storage`.
#[derive(Debug, Error)]
pub enum PartStoreError {
    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Image {url} not found for part {part_id}")]
    ImageNotFound { part_id: String, url: String },

    #[error("Part {part_id} already has an image with url {url}")]
    DuplicateUrl { part_id: String, url: String },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for PartStoreError {
    fn from(err: rusqlite::Error) -> Self {
        PartStoreError::Storage(err.into())
    }
}

pub type PartStoreResult<T> = Result<T, PartStoreError>;
