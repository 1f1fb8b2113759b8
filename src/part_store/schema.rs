//! SQLite schema of the part image database.
//!
//! Images are children of parts and keep their insertion order through the
//! rowid. The pair (part, url) is unique.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};

const PARTS_TABLE: Table = Table {
    name: "parts",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("id", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_parts_id", "id")],
    unique_constraints: &[&["id"]],
};

const PART_FOREIGN_KEY: ForeignKey = ForeignKey {
    foreign_table: "parts",
    foreign_column: "rowid",
};

const PART_IMAGES_TABLE: Table = Table {
    name: "part_images",
    columns: &[
        sqlite_column!("rowid", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "part_rowid",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PART_FOREIGN_KEY)
        ),
        sqlite_column!("url", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("source", &SqlType::Text, non_null = true),
        sqlite_column!("quality", &SqlType::Integer, non_null = true),
        sqlite_column!("dimensions", &SqlType::Text, non_null = true),
        sqlite_column!("listing_url", &SqlType::Text),
        sqlite_column!("added_date", &SqlType::Text, non_null = true),
        sqlite_column!("is_custom", &SqlType::Integer),
        sqlite_column!("ai_analysis", &SqlType::Text), // JSON
    ],
    indices: &[("idx_part_images_part", "part_rowid")],
    unique_constraints: &[&["part_rowid", "url"]],
};

pub const PART_STORE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[PARTS_TABLE, PART_IMAGES_TABLE],
    migration: None,
}];
