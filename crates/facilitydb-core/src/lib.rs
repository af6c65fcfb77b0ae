// crates/facilitydb-core/src/lib.rs

//! # facilitydb-core
//!
//! In-memory manager for a static healthcare facility dataset.
//!
//! The dataset is a gzip-compressed, newline-delimited JSON snapshot that is
//! loaded exactly once at process startup. Loading decodes every line, drops
//! facilities that are not open, and builds two indexes over the survivors:
//!
//! - a key index from facility ID to record, for O(1) point lookup, and
//! - a geohash-prefix index, for proximity ("nearby") search without any
//!   per-query distance computation.
//!
//! After construction the [`FacilitiesManager`] is immutable; any number of
//! concurrent readers may query it without locking. There is no update or
//! incremental-insert path — a topology change means a full reload.
//!
//! ```no_run
//! use facilitydb_core::{FacilitiesManager, LoadOptions};
//!
//! let manager = FacilitiesManager::load_from_path(
//!     "facilities.jsonl.gz",
//!     LoadOptions::default(),
//! )?;
//!
//! if let Some(facility) = manager.resolve("700641") {
//!     println!("{}", facility.name);
//! }
//! # Ok::<(), facilitydb_core::FacilityError>(())
//! ```

pub mod common;
pub mod decoder;
pub mod error;
pub mod geohash;
pub mod loader;
pub mod manager;
pub mod model;
pub mod query;

// Re-exports
pub use crate::common::DatasetStats;
pub use crate::error::{DecodeError, FacilityError, Result};
pub use crate::loader::{DecodePolicy, LoadOptions};
pub use crate::manager::FacilitiesManager;
pub use crate::model::{
    Facility, FacilityAddress, FacilityCapabilities, FacilityContact, FacilityGovernance,
    FacilityLocation, FacilityRecord, FacilityType, GeoPoint, TraumaCapability, TraumaType,
};
pub use crate::query::{
    FacilityList, FacilityQuery, QueryOutcome, DEFAULT_LIMIT, MAX_LIMIT, MAX_OFFSET,
};
