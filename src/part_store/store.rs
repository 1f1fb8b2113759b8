//! SQLite-backed part image store.

use super::error::{PartStoreError, PartStoreResult};
use super::models::Part;
use super::schema::PART_STORE_VERSIONED_SCHEMAS;
use super::trait_def::PartImageStore;
use crate::image_manager::{AiAnalysis, ImagePatch, ImageRecord, NewImage};
use crate::sqlite_persistence::migrate_to_latest;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const IMAGE_COLUMNS: &str =
    "url, title, source, quality, dimensions, listing_url, added_date, is_custom, ai_analysis";

/// SQLite-backed store of parts and their image collections.
#[derive(Clone)]
pub struct SqlitePartStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

impl SqlitePartStore {
    /// Open (or create) the store.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of connections for concurrent reads
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path_ref = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path_ref,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open parts database")?;

        migrate_to_latest(&mut write_conn, PART_STORE_VERSIONED_SCHEMAS, "parts")?;
        write_conn.pragma_update(None, "journal_mode", "WAL")?;

        let part_count: i64 = write_conn.query_row("SELECT COUNT(*) FROM parts", [], |r| r.get(0))?;
        let image_count: i64 =
            write_conn.query_row("SELECT COUNT(*) FROM part_images", [], |r| r.get(0))?;
        info!(
            "Opened parts database: {} parts, {} images",
            part_count, image_count
        );

        let mut read_pool = Vec::with_capacity(read_pool_size.max(1));
        for _ in 0..read_pool_size.max(1) {
            let read_conn = Connection::open_with_flags(
                db_path_ref,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        Ok(SqlitePartStore {
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn get_part_rowid(conn: &Connection, part_id: &str) -> Result<Option<i64>> {
        Ok(conn
            .query_row(
                "SELECT rowid FROM parts WHERE id = ?1",
                params![part_id],
                |r| r.get(0),
            )
            .optional()?)
    }

    fn require_part_rowid(conn: &Connection, part_id: &str) -> PartStoreResult<i64> {
        Self::get_part_rowid(conn, part_id)?
            .ok_or_else(|| PartStoreError::PartNotFound(part_id.to_string()))
    }

    /// Parse an ImageRecord from a row selected with `IMAGE_COLUMNS`.
    fn parse_image_row(row: &rusqlite::Row) -> rusqlite::Result<ImageRecord> {
        let ai_analysis: Option<String> = row.get(8)?;
        let ai_analysis = match ai_analysis {
            Some(json) => Some(serde_json::from_str::<AiAnalysis>(&json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, e.into())
            })?),
            None => None,
        };
        Ok(ImageRecord {
            url: row.get(0)?,
            title: row.get(1)?,
            source: row.get(2)?,
            quality: row.get(3)?,
            dimensions: row.get(4)?,
            listing_url: row.get(5)?,
            added_date: row.get(6)?,
            is_custom: row.get::<_, Option<i32>>(7)?.map(|v| v != 0),
            ai_analysis,
        })
    }

    fn get_image(conn: &Connection, part_rowid: i64, url: &str) -> Result<Option<ImageRecord>> {
        let sql = format!(
            "SELECT {} FROM part_images WHERE part_rowid = ?1 AND url = ?2",
            IMAGE_COLUMNS
        );
        Ok(conn
            .query_row(&sql, params![part_rowid, url], Self::parse_image_row)
            .optional()?)
    }

    fn ai_analysis_json(ai_analysis: &Option<AiAnalysis>) -> Result<Option<String>> {
        ai_analysis
            .as_ref()
            .map(|a| serde_json::to_string(a).context("Failed to serialize ai analysis"))
            .transpose()
    }

    fn insert_image_row(
        conn: &Connection,
        part_id: &str,
        part_rowid: i64,
        record: &ImageRecord,
    ) -> PartStoreResult<()> {
        let result = conn.execute(
            &format!(
                "INSERT INTO part_images (part_rowid, {}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                IMAGE_COLUMNS
            ),
            params![
                part_rowid,
                record.url,
                record.title,
                record.source,
                record.quality,
                record.dimensions,
                record.listing_url,
                record.added_date,
                record.is_custom.map(|v| v as i32),
                Self::ai_analysis_json(&record.ai_analysis)?,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(PartStoreError::DuplicateUrl {
                    part_id: part_id.to_string(),
                    url: record.url.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn count(&self, table: &str) -> usize {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get::<_, i64>(0)
        })
        .map(|c| c as usize)
        .unwrap_or(0)
    }
}

impl PartImageStore for SqlitePartStore {
    fn get_part(&self, id: &str) -> PartStoreResult<Option<Part>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let part = conn
            .query_row(
                "SELECT id, name FROM parts WHERE id = ?1",
                params![id],
                |r| {
                    Ok(Part {
                        id: r.get(0)?,
                        name: r.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(part)
    }

    fn insert_part(&self, part: &Part) -> PartStoreResult<bool> {
        let conn = self.write_conn.lock().unwrap();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO parts (id, name) VALUES (?1, ?2)",
            params![part.id, part.name],
        )?;
        Ok(inserted > 0)
    }

    fn import_part(&self, part: &Part, images: &[ImageRecord]) -> PartStoreResult<bool> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO parts (id, name) VALUES (?1, ?2)",
            params![part.id, part.name],
        )?;
        if inserted == 0 {
            return Ok(false);
        }
        let part_rowid = tx.last_insert_rowid();
        for record in images {
            Self::insert_image_row(&tx, &part.id, part_rowid, record)?;
        }
        tx.commit()?;
        debug!("Imported part {} with {} images", part.id, images.len());
        Ok(true)
    }

    fn get_part_images(&self, part_id: &str) -> PartStoreResult<Vec<ImageRecord>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let part_rowid = Self::require_part_rowid(&conn, part_id)?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM part_images WHERE part_rowid = ?1 ORDER BY rowid",
            IMAGE_COLUMNS
        ))?;
        let images = stmt
            .query_map(params![part_rowid], Self::parse_image_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(images)
    }

    fn count_part_images(&self, part_id: &str) -> PartStoreResult<usize> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let part_rowid = Self::require_part_rowid(&conn, part_id)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM part_images WHERE part_rowid = ?1",
            params![part_rowid],
            |r| r.get(0),
        )?;
        Ok(count as usize)
    }

    fn add_image(&self, part_id: &str, image: NewImage) -> PartStoreResult<ImageRecord> {
        let record = ImageRecord::from_new(image, chrono::Utc::now().to_rfc3339());
        self.insert_image(part_id, &record)?;
        debug!("Added image {} to part {}", record.url, part_id);
        Ok(record)
    }

    fn insert_image(&self, part_id: &str, record: &ImageRecord) -> PartStoreResult<()> {
        let conn = self.write_conn.lock().unwrap();
        let part_rowid = Self::require_part_rowid(&conn, part_id)?;
        Self::insert_image_row(&conn, part_id, part_rowid, record)
    }

    fn update_image(
        &self,
        part_id: &str,
        url: &str,
        patch: &ImagePatch,
    ) -> PartStoreResult<ImageRecord> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;
        let part_rowid = Self::require_part_rowid(&tx, part_id)?;
        let mut record =
            Self::get_image(&tx, part_rowid, url)?.ok_or_else(|| PartStoreError::ImageNotFound {
                part_id: part_id.to_string(),
                url: url.to_string(),
            })?;
        record.apply_patch(patch);

        tx.execute(
            "UPDATE part_images SET title = ?1, source = ?2, quality = ?3, dimensions = ?4, \
             listing_url = ?5, is_custom = ?6, ai_analysis = ?7 \
             WHERE part_rowid = ?8 AND url = ?9",
            params![
                record.title,
                record.source,
                record.quality,
                record.dimensions,
                record.listing_url,
                record.is_custom.map(|v| v as i32),
                Self::ai_analysis_json(&record.ai_analysis)?,
                part_rowid,
                url,
            ],
        )?;
        tx.commit()?;
        debug!("Updated image {} of part {}", url, part_id);
        Ok(record)
    }

    fn delete_image(&self, part_id: &str, url: &str) -> PartStoreResult<bool> {
        let conn = self.write_conn.lock().unwrap();
        let part_rowid = Self::require_part_rowid(&conn, part_id)?;
        let deleted = conn.execute(
            "DELETE FROM part_images WHERE part_rowid = ?1 AND url = ?2",
            params![part_rowid, url],
        )?;
        if deleted == 0 {
            debug!("Part {} has no image {}, nothing to delete", part_id, url);
            return Ok(false);
        }
        debug!("Deleted image {} of part {}", url, part_id);
        Ok(true)
    }

    fn get_parts_count(&self) -> usize {
        self.count("parts")
    }

    fn get_images_count(&self) -> usize {
        self.count("part_images")
    }
}
