// crates/facilitydb-core/src/error.rs

//! Error types for the facility dataset.
//!
//! Everything that can go wrong while loading the snapshot is fatal: the
//! dataset ships with the build, so a bad snapshot is a deployment defect,
//! not a runtime condition to tolerate. Lookups that find nothing are a
//! normal outcome and never surface through these types.

use std::path::PathBuf;
use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FacilityError>;

/// Fatal errors raised while loading or indexing the facility snapshot.
#[derive(Debug, Error)]
pub enum FacilityError {
    /// The snapshot file could not be located or opened.
    #[error("facilities snapshot not found at {}: {source}", path.display())]
    SnapshotMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot stream failed mid-read.
    #[error("I/O error reading facilities snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// A single snapshot line failed to decode (strict policy only).
    #[error("failed to decode facility record on line {line_no}: {source}")]
    Decode {
        line_no: usize,
        #[source]
        source: DecodeError,
    },

    /// Two surviving records share an identifier in the key index.
    #[error("cannot have two records that use the same key: '{id}'")]
    DuplicateKey { id: String },

    /// After filtering, one of the indexes came out empty. Computation may
    /// have failed, or the data may have not loaded.
    #[error("facility indexes are empty after filtering; refusing to serve a broken snapshot")]
    EmptyIndex,
}

/// Errors raised while decoding a single raw facility line.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required property was absent, or blank after trimming.
    #[error("dataset could not resolve value for property '{0}'")]
    MissingField(&'static str),

    #[error("unrecognized facility type: '{0}'")]
    UnknownType(String),

    #[error("unrecognized trauma type: '{0}'")]
    UnknownTrauma(String),
}
