mod error;
mod models;
mod schema;
pub mod seed;
mod store;
mod trait_def;

pub use error::{PartStoreError, PartStoreResult};
pub use models::{Part, SeedPart};
pub use schema::PART_STORE_VERSIONED_SCHEMAS;
pub use seed::{import_parts, SeedImportStats};
pub use store::SqlitePartStore;
pub use trait_def::PartImageStore;
