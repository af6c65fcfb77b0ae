// crates/facilitydb-core/src/common.rs

use serde::Serialize;

/// Simple aggregate statistics for the loaded dataset.
///
/// Returned by [`FacilitiesManager::stats`](crate::FacilitiesManager::stats);
/// the counts reflect the materialized in-memory dataset after the open/closed
/// filter has been applied at load time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DatasetStats {
    /// Open facilities held by the manager.
    pub facilities: usize,
    /// Entries in the key index (one per unique facility ID).
    pub key_entries: usize,
    /// Distinct geohash-prefix buckets.
    pub geohash_entries: usize,
}
