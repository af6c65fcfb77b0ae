// crates/facilitydb-core/src/loader/index.rs

//! Fan-out/fan-in index construction.
//!
//! Workers fold disjoint chunks of records into local [`PartialIndex`]es,
//! which are then merged pairwise. The merge is an associative, commutative
//! set union keyed on facility ID, so the final result does not depend on
//! how rayon partitioned the input.

use crate::error::{FacilityError, Result};
use crate::geohash;
use crate::model::{Facility, FacilityRecord};
use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Key and geohash indexes built by a single worker over a slice of records.
#[derive(Debug, Default)]
pub(crate) struct PartialIndex {
    /// Facility ID to record. Exactly one entry per unique facility.
    pub(crate) keys: HashMap<String, Arc<Facility>>,

    /// Geohash prefix to the set of facilities whose hash starts with it.
    /// Bucket order is total by facility ID.
    pub(crate) buckets: HashMap<String, BTreeSet<FacilityRecord>>,
}

impl PartialIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds one record, fanning it out under every indexable prefix of its
    /// geohash. A repeated ID is a fatal error, not a silent merge.
    pub(crate) fn add(mut self, record: &FacilityRecord) -> Result<Self> {
        match self.keys.entry(record.id().to_string()) {
            Entry::Occupied(_) => {
                return Err(FacilityError::DuplicateKey {
                    id: record.id().to_string(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(record.facility().clone());
            }
        }

        for prefix in geohash::prefixes(&record.facility().location.hash) {
            self.buckets
                .entry(prefix.to_string())
                .or_default()
                .insert(record.clone());
        }

        Ok(self)
    }

    /// Combines two partial indexes. Geohash buckets merge by set union on
    /// facility ID; a key collision across partials is fatal, exactly as it
    /// is within one partial.
    pub(crate) fn merge(mut self, other: Self) -> Result<Self> {
        for (id, facility) in other.keys {
            if self.keys.insert(id.clone(), facility).is_some() {
                return Err(FacilityError::DuplicateKey { id });
            }
        }
        for (prefix, bucket) in other.buckets {
            self.buckets.entry(prefix).or_default().extend(bucket);
        }
        Ok(self)
    }
}

/// Builds the full index pair from the filtered record set. Each rayon worker
/// folds a disjoint chunk; partials are reduced with [`PartialIndex::merge`].
pub(crate) fn build(records: &[FacilityRecord]) -> Result<PartialIndex> {
    records
        .par_iter()
        .try_fold(PartialIndex::new, |acc, record| acc.add(record))
        .try_reduce(PartialIndex::new, PartialIndex::merge)
}
