// crates/facilitydb-core/src/loader/mod.rs

//! # Snapshot loader
//!
//! Handles the physical layer (file I/O, gzip decompression) and the decode
//! pipeline that turns a newline-delimited snapshot into a published
//! [`FacilitiesManager`]. Runs exactly once at process startup; every error
//! here is fatal to startup, by design.

use crate::decoder;
use crate::error::{FacilityError, Result};
use crate::manager::FacilitiesManager;
use crate::model::Facility;
use flate2::read::GzDecoder;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

pub(crate) mod index;

/// Policy for a single malformed snapshot line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Abort the whole load on the first malformed line. A corrupt snapshot
    /// should not silently serve a partial dataset.
    #[default]
    Strict,
    /// Log and skip malformed lines.
    Lenient,
}

/// Options for a snapshot load.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub decode_policy: DecodePolicy,
}

/// Opens the snapshot file, buffers it, and wraps it in a gzip decoder. The
/// snapshot's compression format is fixed by the build pipeline.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| FacilityError::SnapshotMissing {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Box::new(GzDecoder::new(BufReader::new(file))))
}

impl FacilitiesManager {
    /// Loads the gzip-compressed JSON-ND snapshot at `path` and builds the
    /// manager. This is the normal startup entry point.
    pub fn load_from_path(path: impl AsRef<Path>, options: LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading facilities database");
        let stream = open_stream(path)?;
        Self::load_from_reader(stream, options)
    }

    /// Builds the manager from an already-decompressed snapshot stream.
    /// Decoding runs across the rayon pool; lines are independent, so order
    /// does not matter until the surviving records are collected.
    pub fn load_from_reader(reader: impl Read, options: LoadOptions) -> Result<Self> {
        let lines: Vec<String> = BufReader::new(reader)
            .lines()
            .collect::<std::io::Result<_>>()?;
        tracing::info!(lines = lines.len(), "parsing facility records");

        let decoded = decode_lines(&lines, options.decode_policy)?;
        tracing::info!(
            records = decoded.len(),
            "decoded facility records, indexing"
        );

        let manager = Self::from_facilities(decoded)?;
        let stats = manager.stats();
        tracing::info!(
            keys = stats.key_entries,
            geohashes = stats.geohash_entries,
            "generated indexes for facility data"
        );
        Ok(manager)
    }
}

fn decode_lines(lines: &[String], policy: DecodePolicy) -> Result<Vec<Facility>> {
    match policy {
        DecodePolicy::Strict => lines
            .par_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                decoder::decode_line(line).map_err(|e| FacilityError::Decode {
                    line_no: idx + 1,
                    source: e,
                })
            })
            .collect(),
        DecodePolicy::Lenient => Ok(lines
            .par_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| match decoder::decode_line(line) {
                Ok(facility) => Some(facility),
                Err(e) => {
                    tracing::warn!(
                        line_no = idx + 1,
                        error = %e,
                        "skipping malformed facility record"
                    );
                    None
                }
            })
            .collect()),
    }
}
