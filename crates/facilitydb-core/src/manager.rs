// crates/facilitydb-core/src/manager.rs

//! The facilities manager: composition root over the loaded collection and
//! both indexes.
//!
//! Constructed once by the loader, then shared read-only (typically behind an
//! `Arc`) with every handler for the life of the process. No operation here
//! mutates state, so concurrent queries need no locking.

use crate::common::DatasetStats;
use crate::error::{FacilityError, Result};
use crate::geohash::{self, GEOHASH_PRECISION};
use crate::loader::index;
use crate::model::{Facility, FacilityRecord, GeoPoint};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Manages the in-memory set of facilities and its indexes.
pub struct FacilitiesManager {
    /// Full set of facility data records, in snapshot order.
    data: Vec<Arc<Facility>>,

    /// Index of facility IDs to the records which they reference.
    key_index: HashMap<String, Arc<Facility>>,

    /// Index of geohash prefixes to the facilities contained by their
    /// respective bounding boxes.
    geohash_index: HashMap<String, BTreeSet<FacilityRecord>>,
}

impl FacilitiesManager {
    /// Builds a manager from decoded facilities: filters out closed entries,
    /// constructs both indexes, and verifies they are non-empty.
    ///
    /// This is the explicit construction seam — the loader calls it with the
    /// decoded snapshot, and tests call it with crafted records. If it
    /// returns an error the manager is never published.
    pub fn from_facilities(facilities: Vec<Facility>) -> Result<Self> {
        let records: Vec<FacilityRecord> = facilities
            .into_iter()
            .filter(|f| f.open)
            .map(|f| FacilityRecord::wrap(Arc::new(f)))
            .collect();

        let merged = index::build(&records)?;
        if merged.keys.is_empty() || merged.buckets.is_empty() {
            return Err(FacilityError::EmptyIndex);
        }

        Ok(FacilitiesManager {
            data: records
                .into_iter()
                .map(FacilityRecord::into_facility)
                .collect(),
            key_index: merged.keys,
            geohash_index: merged.buckets,
        })
    }

    /// Resolves a single facility by its ID. Absent is a normal outcome, not
    /// an error; the calling layer decides what "not found" means on the
    /// wire.
    pub fn resolve(&self, id: &str) -> Option<&Arc<Facility>> {
        self.key_index.get(id)
    }

    /// Iterates all facilities in snapshot order.
    pub fn stream(&self) -> impl Iterator<Item = &Arc<Facility>> {
        self.data.iter()
    }

    /// Returns the facilities nearest the given encoded geohash: the union of
    /// every prefix bucket the query hash reaches, deduplicated by ID and
    /// ordered by ID. Shorter prefixes cast a wider net, longer ones a
    /// narrower net; missing prefixes contribute nothing.
    pub fn nearby_hash(&self, hash: &str) -> Vec<Arc<Facility>> {
        tracing::debug!(geohash = %hash, "querying nearby facilities");
        let mut resultset: BTreeSet<FacilityRecord> = BTreeSet::new();
        for prefix in geohash::prefixes(hash) {
            if let Some(bucket) = self.geohash_index.get(prefix) {
                resultset.extend(bucket.iter().cloned());
            }
        }
        tracing::debug!(results = resultset.len(), "returning facilities");
        resultset
            .into_iter()
            .map(FacilityRecord::into_facility)
            .collect()
    }

    /// Returns the facilities nearest the given point, hashed at full
    /// precision.
    pub fn nearby(&self, point: GeoPoint) -> Vec<Arc<Facility>> {
        self.nearby_hash(&geohash::encode(point, GEOHASH_PRECISION))
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            facilities: self.data.len(),
            key_entries: self.key_index.len(),
            geohash_entries: self.geohash_index.len(),
        }
    }
}

// Counts only; dumping thousands of records into logs helps nobody.
impl fmt::Debug for FacilitiesManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FacilitiesManager{{facilities={}, keys={}, geohashes={}}}",
            self.data.len(),
            self.key_index.len(),
            self.geohash_index.len()
        )
    }
}
