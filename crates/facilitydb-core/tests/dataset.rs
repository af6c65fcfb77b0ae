//! End-to-end tests over fabricated gzip snapshots: the same path the
//! production loader takes, from compressed bytes to a queryable manager.

use facilitydb_core::{
    DecodePolicy, FacilitiesManager, FacilityError, FacilityQuery, LoadOptions,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

fn raw_line(id: &str, lat: f64, lng: f64, status: &str) -> String {
    format!(
        concat!(
            r#"{{"latitude":{lat},"longitude":{lng},"state":"PR","city":"ADJUNTAS","#,
            r#""name":"CASTANER GENERAL HOSPITAL","objectId":"obj-{id}","rowId":"{id}","#,
            r#""address":"CARR 135 KM 64.2","zip":"00601","telephone":"+17878292025","#,
            r#""type":"GENERAL ACUTE CARE","status":"{status}","open":{open},"#,
            r#""county":"ADJUNTAS","country":"PRI","naicsCode":"622110","#,
            r#""naicsDesc":"GENERAL MEDICAL AND SURGICAL HOSPITALS","helipad":false}}"#,
        ),
        id = id,
        lat = lat,
        lng = lng,
        status = status,
        open = status.eq_ignore_ascii_case("open"),
    )
}

fn gzip_snapshot(lines: &[String]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    for line in lines {
        writeln!(encoder, "{line}").unwrap();
    }
    encoder.finish().unwrap()
}

fn write_snapshot(lines: &[String]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&gzip_snapshot(lines)).unwrap();
    file.flush().unwrap();
    file
}

// Two points with known full-precision geohashes: de0xfjt95ksc and
// de28z5uvjd48. They diverge from the third character on, which is exactly
// the boundary the prefix index cares about.
const CASTANER: (f64, f64) = (18.2677131, -66.70128518);
const MANATI: (f64, f64) = (18.43455435, -66.4824951);

#[test]
fn loads_and_serves_a_snapshot_end_to_end() {
    let snapshot = write_snapshot(&[
        raw_line("700641", CASTANER.0, CASTANER.1, "OPEN"),
        raw_line("700652", MANATI.0, MANATI.1, "OPEN"),
        raw_line("700699", CASTANER.0, CASTANER.1, "CLOSED"),
    ]);

    let manager =
        FacilitiesManager::load_from_path(snapshot.path(), LoadOptions::default()).unwrap();

    let stats = manager.stats();
    assert_eq!(stats.facilities, 2);
    assert_eq!(stats.key_entries, 2);

    let found = manager.resolve("700641").unwrap();
    assert_eq!(found.name, "Castaner General Hospital");
    assert_eq!(found.location.hash, "de0xfjt95ksc");

    // The closed facility decoded fine, but never reached the indexes.
    assert!(manager.resolve("700699").is_none());
    assert!(manager.stream().all(|f| f.id != "700699"));
}

#[test]
fn nearby_search_finds_the_expected_facility() {
    let snapshot = write_snapshot(&[
        raw_line("700641", CASTANER.0, CASTANER.1, "OPEN"),
        raw_line("700652", MANATI.0, MANATI.1, "OPEN"),
    ]);
    let manager =
        FacilitiesManager::load_from_path(snapshot.path(), LoadOptions::default()).unwrap();

    // A query hash a few blocks away from Castaner: shares the de0xfjt95k
    // prefix with it, but only the unindexed two-character prefix with Manati.
    let nearby = manager.nearby_hash("de0xfjt95kxx");
    assert_eq!(
        nearby.iter().filter(|f| f.id == "700641").count(),
        1,
        "should find expected facility after geohash search"
    );
    assert!(nearby.iter().all(|f| f.id != "700652"));
}

#[test]
fn listing_queries_paginate_over_the_loaded_set() {
    let lines: Vec<String> = (1..=5)
        .map(|i| raw_line(&format!("7006{i:02}"), CASTANER.0, CASTANER.1 + i as f64, "OPEN"))
        .collect();
    let snapshot = write_snapshot(&lines);
    let manager =
        FacilitiesManager::load_from_path(snapshot.path(), LoadOptions::default()).unwrap();

    let list = manager.query(&FacilityQuery {
        limit: Some(2),
        offset: Some(1),
        ..Default::default()
    });
    let ids: Vec<&str> = list.facilities.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["700602", "700603"]);
    assert_eq!(list.total_matching, 5);
}

#[test]
fn duplicate_keys_are_fatal() {
    let snapshot = write_snapshot(&[
        raw_line("F1", CASTANER.0, CASTANER.1, "OPEN"),
        raw_line("F1", MANATI.0, MANATI.1, "OPEN"),
    ]);

    let err =
        FacilitiesManager::load_from_path(snapshot.path(), LoadOptions::default()).unwrap_err();
    assert!(matches!(err, FacilityError::DuplicateKey { id } if id == "F1"));
}

#[test]
fn all_closed_snapshot_is_fatal() {
    let snapshot = write_snapshot(&[raw_line("700641", CASTANER.0, CASTANER.1, "CLOSED")]);
    let err =
        FacilitiesManager::load_from_path(snapshot.path(), LoadOptions::default()).unwrap_err();
    assert!(matches!(err, FacilityError::EmptyIndex));
}

#[test]
fn empty_snapshot_is_fatal() {
    let snapshot = write_snapshot(&[]);
    let err =
        FacilitiesManager::load_from_path(snapshot.path(), LoadOptions::default()).unwrap_err();
    assert!(matches!(err, FacilityError::EmptyIndex));
}

#[test]
fn strict_policy_aborts_on_a_malformed_line() {
    let snapshot = write_snapshot(&[
        raw_line("700641", CASTANER.0, CASTANER.1, "OPEN"),
        "{broken".to_string(),
    ]);
    let err =
        FacilitiesManager::load_from_path(snapshot.path(), LoadOptions::default()).unwrap_err();
    assert!(matches!(err, FacilityError::Decode { line_no: 2, .. }));
}

#[test]
fn lenient_policy_skips_malformed_lines() {
    let snapshot = write_snapshot(&[
        raw_line("700641", CASTANER.0, CASTANER.1, "OPEN"),
        "{broken".to_string(),
        raw_line("700652", MANATI.0, MANATI.1, "OPEN"),
    ]);
    let options = LoadOptions {
        decode_policy: DecodePolicy::Lenient,
    };
    let manager = FacilitiesManager::load_from_path(snapshot.path(), options).unwrap();
    assert_eq!(manager.stats().facilities, 2);
}

#[test]
fn missing_snapshot_is_fatal() {
    let err = FacilitiesManager::load_from_path(
        "/nonexistent/facilities.jsonl.gz",
        LoadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, FacilityError::SnapshotMissing { .. }));
}
