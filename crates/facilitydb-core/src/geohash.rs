// crates/facilitydb-core/src/geohash.rs

//! Geohash encoding and prefix derivation.
//!
//! A geohash encodes a latitude/longitude pair as a base-32 string where
//! shared prefixes correspond to geographic proximity at decreasing
//! precision. The indexer and the nearby query derive prefixes through the
//! same function, so a query hash always lines up with the bucket keys it
//! was indexed under.

use crate::model::GeoPoint;

/// Character precision of every geohash this crate computes. Matches the
/// precision used when the snapshot was produced, so computed hashes are
/// comparable with stored ones.
pub const GEOHASH_PRECISION: usize = 12;

/// Minimum prefix length for the geohash index. Prefixes at this length are
/// not indexed; the coarsest bucket is one character longer. Smaller values
/// mean coarser "nearby" buckets and more index fan-out per facility.
pub const MIN_PREFIX_LEN: usize = 2;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Encodes a point as a base-32 geohash of `precision` characters.
pub fn encode(point: GeoPoint, precision: usize) -> String {
    let mut lat = (-90.0_f64, 90.0_f64);
    let mut lng = (-180.0_f64, 180.0_f64);
    let mut out = String::with_capacity(precision);

    let mut bits = 0u8;
    let mut bit_count = 0u8;
    // Longitude bit comes first, then the axes alternate.
    let mut even = true;

    while out.len() < precision {
        bits <<= 1;
        if even {
            let mid = (lng.0 + lng.1) / 2.0;
            if point.longitude >= mid {
                bits |= 1;
                lng.0 = mid;
            } else {
                lng.1 = mid;
            }
        } else {
            let mid = (lat.0 + lat.1) / 2.0;
            if point.latitude >= mid {
                bits |= 1;
                lat.0 = mid;
            } else {
                lat.1 = mid;
            }
        }
        even = !even;

        bit_count += 1;
        if bit_count == 5 {
            out.push(BASE32[bits as usize] as char);
            bits = 0;
            bit_count = 0;
        }
    }

    out
}

/// Yields every indexable prefix of `hash`: each prefix longer than
/// [`MIN_PREFIX_LEN`], up to and including the full hash, shortest first.
///
/// A hash of length `L` therefore fans out to `L - MIN_PREFIX_LEN` prefixes.
/// Hashes at or below the minimum length yield nothing, as does anything
/// outside the ASCII base-32 alphabet — query hashes arrive from callers
/// verbatim, and a malformed hash means an empty result, not a panic.
pub fn prefixes(hash: &str) -> impl Iterator<Item = &str> {
    let len = if hash.is_ascii() { hash.len() } else { 0 };
    (MIN_PREFIX_LEN..len).map(move |end| &hash[..=end])
}
