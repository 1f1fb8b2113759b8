//! Import of the static part catalog.
//!
//! The catalog is a JSON array of `{ id, name, images? }` objects. Parts
//! that already exist in the store are left untouched, so importing the same
//! file on every start is harmless.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::models::{Part, SeedPart};
use super::trait_def::PartImageStore;
use crate::image_manager::validation::validate_record;
use crate::image_manager::ImageRecord;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedImportStats {
    pub parts_imported: usize,
    pub parts_skipped: usize,
    pub images_imported: usize,
    pub images_skipped: usize,
}

/// Import the part catalog at `path` into `store`.
pub fn import_parts<P: AsRef<Path>>(store: &dyn PartImageStore, path: P) -> Result<SeedImportStats> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open part catalog {}", path.display()))?;
    let parts: Vec<SeedPart> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse part catalog {}", path.display()))?;

    let stats = import_seed_parts(store, parts)?;
    info!(
        "Imported part catalog from {}: {} new parts ({} skipped), {} images ({} skipped)",
        path.display(),
        stats.parts_imported,
        stats.parts_skipped,
        stats.images_imported,
        stats.images_skipped
    );
    Ok(stats)
}

pub fn import_seed_parts(
    store: &dyn PartImageStore,
    parts: Vec<SeedPart>,
) -> Result<SeedImportStats> {
    let mut stats = SeedImportStats::default();

    for seed_part in parts {
        let part = Part {
            id: seed_part.id,
            name: seed_part.name,
        };
        if store.get_part(&part.id)?.is_some() {
            stats.parts_skipped += 1;
            continue;
        }

        let (images, skipped) = accepted_images(&part.id, seed_part.images);
        let imported = store
            .import_part(&part, &images)
            .with_context(|| format!("Failed to import part {}", part.id))?;
        if !imported {
            stats.parts_skipped += 1;
            continue;
        }
        stats.parts_imported += 1;
        stats.images_imported += images.len();
        stats.images_skipped += skipped;
    }

    Ok(stats)
}

/// Drop invalid images and repeated urls, keeping the first occurrence.
fn accepted_images(part_id: &str, images: Vec<ImageRecord>) -> (Vec<ImageRecord>, usize) {
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(images.len());
    let mut skipped = 0;
    for image in images {
        if let Err(err) = validate_record(&image) {
            warn!("Skipping invalid image {:?} of part {}: {}", image.url, part_id, err);
            skipped += 1;
            continue;
        }
        if !seen.insert(image.url.clone()) {
            warn!("Skipping duplicate image {} of part {}", image.url, part_id);
            skipped += 1;
            continue;
        }
        accepted.push(image);
    }
    (accepted, skipped)
}
