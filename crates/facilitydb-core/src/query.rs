// crates/facilitydb-core/src/query.rs

//! Listing queries with pagination over the frozen dataset.
//!
//! The upstream request validator is expected to bounds-check `limit` and
//! `offset` before anything reaches this module; the clamping here is a
//! second line of defense, never a substitute for that validation.

use crate::error::FacilityError;
use crate::manager::FacilitiesManager;
use crate::model::{Facility, GeoPoint};
use std::sync::Arc;

/// Page size applied when a query leaves `limit` unset or zero.
pub const DEFAULT_LIMIT: u32 = 100;

/// Hard ceiling on the effective page size.
pub const MAX_LIMIT: u32 = 10_000;

/// Hard ceiling on the effective offset. Offsets beyond this are clamped,
/// not rejected.
pub const MAX_OFFSET: u32 = MAX_LIMIT - 1;

/// A facility listing request. With a spatial filter (`geohash` or `point`)
/// the candidate set is the nearby-search result; without one it is the full
/// dataset. An explicit hash wins when both are present.
#[derive(Debug, Clone, Default)]
pub struct FacilityQuery {
    pub geohash: Option<String>,
    pub point: Option<GeoPoint>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// A page of matching facilities.
#[derive(Debug, Clone)]
pub struct FacilityList {
    pub facilities: Vec<Arc<Facility>>,
    /// Matches before pagination was applied.
    pub total_matching: usize,
}

/// Explicit delivery type for the downstream response bridge. An empty
/// result set is `NotFound`, a distinct outcome rather than an error or a
/// cancelled future.
#[derive(Debug)]
pub enum QueryOutcome {
    Success(FacilityList),
    NotFound,
    Error(FacilityError),
}

fn effective_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_LIMIT,
        Some(l) => l.min(MAX_LIMIT),
    }
}

fn effective_offset(offset: Option<u32>) -> u32 {
    offset.unwrap_or(0).min(MAX_OFFSET)
}

impl FacilitiesManager {
    /// Runs a listing query: gathers the candidate stream, then applies
    /// offset (skip) before limit (take).
    pub fn query(&self, query: &FacilityQuery) -> FacilityList {
        let limit = effective_limit(query.limit);
        let offset = effective_offset(query.offset);

        let candidates: Vec<Arc<Facility>> = match (&query.geohash, &query.point) {
            (Some(hash), _) => self.nearby_hash(hash),
            (None, Some(point)) => self.nearby(*point),
            (None, None) => self.stream().cloned().collect(),
        };

        let total_matching = candidates.len();
        let facilities = candidates
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        FacilityList {
            facilities,
            total_matching,
        }
    }

    /// Runs a query and folds the result into the three-outcome contract the
    /// response bridge consumes. The core never fabricates `Error` here;
    /// that arm exists for the bridge to carry upstream failures.
    pub fn execute(&self, query: &FacilityQuery) -> QueryOutcome {
        let list = self.query(query);
        if list.facilities.is_empty() {
            QueryOutcome::NotFound
        } else {
            QueryOutcome::Success(list)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::facility;

    fn five_facility_manager() -> FacilitiesManager {
        let facilities = (1..=5)
            .map(|i| facility(&format!("F{i}"), "9q8yy0000000", true))
            .collect();
        FacilitiesManager::from_facilities(facilities).unwrap()
    }

    #[test]
    fn offset_applies_before_limit() {
        let manager = five_facility_manager();
        let list = manager.query(&FacilityQuery {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        });

        let ids: Vec<&str> = list.facilities.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["F2", "F3"]);
        assert_eq!(list.total_matching, 5);
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        assert_eq!(effective_limit(Some(0)), DEFAULT_LIMIT);
        assert_eq!(effective_limit(None), DEFAULT_LIMIT);
    }

    #[test]
    fn oversized_bounds_are_clamped() {
        assert_eq!(effective_limit(Some(50_000)), MAX_LIMIT);
        assert_eq!(effective_offset(Some(50_000)), MAX_OFFSET);
    }

    #[test]
    fn offset_past_the_dataset_is_empty_not_an_error() {
        let manager = five_facility_manager();
        let list = manager.query(&FacilityQuery {
            offset: Some(9_999),
            ..Default::default()
        });
        assert!(list.facilities.is_empty());
        assert_eq!(list.total_matching, 5);
    }

    #[test]
    fn result_size_follows_the_pagination_law() {
        let manager = five_facility_manager();
        let total = 5usize;
        for (limit, offset) in [(1, 0), (2, 1), (5, 0), (5, 4), (3, 5), (100, 2)] {
            let list = manager.query(&FacilityQuery {
                limit: Some(limit),
                offset: Some(offset),
                ..Default::default()
            });
            let expected = total
                .saturating_sub(offset as usize)
                .min(effective_limit(Some(limit)) as usize);
            assert_eq!(list.facilities.len(), expected, "limit={limit} offset={offset}");
        }
    }

    #[test]
    fn spatial_filter_narrows_the_candidate_stream() {
        let manager = FacilitiesManager::from_facilities(vec![
            facility("F1", "9q8yy0000000", true),
            facility("F2", "9q8yz0000000", true),
            facility("F3", "9q5c80000000", true),
        ])
        .unwrap();

        let list = manager.query(&FacilityQuery {
            geohash: Some("9q8yyk".to_string()),
            ..Default::default()
        });
        assert_eq!(list.total_matching, 2);
    }

    #[test]
    fn execute_maps_empty_results_to_not_found() {
        let manager = five_facility_manager();
        let outcome = manager.execute(&FacilityQuery {
            geohash: Some("zzzzzz".to_string()),
            ..Default::default()
        });
        assert!(matches!(outcome, QueryOutcome::NotFound));

        let outcome = manager.execute(&FacilityQuery::default());
        match outcome {
            QueryOutcome::Success(list) => assert_eq!(list.facilities.len(), 5),
            other => panic!("expected success, got {other:?}"),
        }
    }
}
