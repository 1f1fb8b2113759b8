//! Parts Image Catalog Library
//!
//! Image collection management for automotive catalog parts: the client-side
//! manager, the SQLite part store and the HTTP server exposing it.

pub mod config;
pub mod image_manager;
pub mod part_store;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use image_manager::{HttpImageRemote, ImageCollectionManager, ImageRemote};
pub use part_store::{PartImageStore, SqlitePartStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
