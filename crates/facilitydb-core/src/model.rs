// crates/facilitydb-core/src/model.rs

//! Domain model for the facility dataset.
//!
//! Every type here is constructed once by the decoder during load and never
//! mutated afterwards. Indexing logic only touches `id`, `open` and
//! `location.hash`; everything else is opaque payload carried for callers.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Postal address of a facility.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityAddress {
    pub lines: Vec<String>,
    pub city: String,
    pub county: Option<String>,
    /// US state code (uppercased) or province name for non-US facilities.
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Where a facility is: point, precomputed geohash, and address.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityLocation {
    pub point: GeoPoint,
    /// Geohash of `point` at full precision
    /// ([`GEOHASH_PRECISION`](crate::geohash::GEOHASH_PRECISION) characters).
    pub hash: String,
    pub address: FacilityAddress,
}

/// Contact channels for a facility.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FacilityContact {
    /// Main phone number, E.164-ish as shipped in the source data.
    pub phone: Option<String>,
    pub websites: Vec<String>,
}

/// Trauma designations a facility holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraumaType {
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    Trh,
    Trf,
    Cth,
    Ath,
    TraumaSystemHospital,
    Rtc,
    Rth,
    Area,
    Ctf,
    Parc,
    Rptc,
}

/// A single trauma certification, possibly pediatric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraumaCapability {
    pub level: TraumaType,
    pub pediatric: bool,
}

/// Equipment and capacity information.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FacilityCapabilities {
    pub beds: Option<u32>,
    pub helipad: bool,
    pub trauma: Vec<TraumaCapability>,
    pub pediatric: bool,
}

/// Classification of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FacilityType {
    GeneralAcuteCare,
    CriticalAccess,
    Psychiatric,
    LongTermCare,
    Rehabilitation,
    Military,
    Children,
    Special,
    Women,
    ChronicDisease,
}

/// Ownership/governance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FacilityGovernance {
    Government,
    NonProfit,
    Private,
    Unknown,
}

/// One healthcare facility. Immutable after decoding.
#[derive(Debug, Clone, Serialize)]
pub struct Facility {
    /// Globally unique identifier (the source row ID).
    pub id: String,
    /// Secondary identifier from the source dataset.
    pub object_id: String,
    pub name: String,
    pub alternate_names: Vec<String>,
    pub kind: FacilityType,
    pub governance: FacilityGovernance,
    /// NAICS industry code.
    pub naics: String,
    /// Human-readable NAICS category.
    pub category: String,
    /// Whether the facility is operating. Closed facilities never reach the
    /// indexes; the flag survives on the record for completeness.
    pub open: bool,
    pub location: FacilityLocation,
    pub contact: FacilityContact,
    pub capabilities: FacilityCapabilities,
}

/// Index entry wrapping a facility, keyed solely by its ID.
///
/// Two records are equal, hash together, and order identically iff their IDs
/// match — payload content is never compared. This keeps deduplication and
/// bucket ordering cheap and deterministic.
#[derive(Clone)]
pub struct FacilityRecord(Arc<Facility>);

impl FacilityRecord {
    /// Wraps a shared facility as an index entry.
    pub fn wrap(facility: Arc<Facility>) -> Self {
        FacilityRecord(facility)
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn facility(&self) -> &Arc<Facility> {
        &self.0
    }

    pub fn into_facility(self) -> Arc<Facility> {
        self.0
    }
}

impl PartialEq for FacilityRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for FacilityRecord {}

impl PartialOrd for FacilityRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FacilityRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(other.id())
    }
}

impl Hash for FacilityRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

// Avoid dumping the full payload into logs.
impl fmt::Debug for FacilityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Facility{{id={}}}", self.id())
    }
}
