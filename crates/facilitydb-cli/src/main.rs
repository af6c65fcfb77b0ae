//! facilitydb — terminal front-end for facilitydb-core
//!
//! Loads a facility snapshot once and runs a single query against it. This
//! is an operator/debugging tool; the serving surface for the dataset lives
//! in the host application, not here.
//!
//! Usage examples
//! --------------
//!
//! - Show dataset stats
//!   $ facilitydb --input facilities.jsonl.gz stats
//!
//! - Resolve one facility by ID
//!   $ facilitydb resolve 700641
//!
//! - Facilities near a geohash or a point
//!   $ facilitydb nearby 9q8yyk
//!   $ facilitydb nearby 37.780727,-122.38876
//!
//! - Paginated listing
//!   $ facilitydb list --limit 20 --offset 40

mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use facilitydb_core::{
    DecodePolicy, FacilitiesManager, Facility, FacilityQuery, GeoPoint, LoadOptions, QueryOutcome,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let options = LoadOptions {
        decode_policy: if args.lenient {
            DecodePolicy::Lenient
        } else {
            DecodePolicy::Strict
        },
    };

    let manager = FacilitiesManager::load_from_path(&args.input, options)
        .with_context(|| format!("loading snapshot from {}", args.input))?;

    match args.command {
        Commands::Stats => {
            let stats = manager.stats();
            println!("Dataset statistics:");
            println!("  Facilities: {}", stats.facilities);
            println!("  Key index entries: {}", stats.key_entries);
            println!("  Geohash buckets: {}", stats.geohash_entries);
        }

        Commands::Resolve { id } => match manager.resolve(&id) {
            Some(facility) => print_facility(facility),
            None => eprintln!("No facility found for: {id}"),
        },

        Commands::Nearby {
            location,
            limit,
            offset,
        } => {
            let mut query = FacilityQuery {
                limit,
                offset,
                ..Default::default()
            };
            match parse_point(&location) {
                Some(point) => query.point = Some(point),
                None => query.geohash = Some(location.clone()),
            }
            print_outcome(manager.execute(&query), &location);
        }

        Commands::List { limit, offset } => {
            let query = FacilityQuery {
                limit,
                offset,
                ..Default::default()
            };
            print_outcome(manager.execute(&query), "the dataset");
        }
    }

    Ok(())
}

/// Parses "lat,lng" into a point; anything else is treated as a geohash.
fn parse_point(location: &str) -> Option<GeoPoint> {
    let (lat, lng) = location.split_once(',')?;
    Some(GeoPoint {
        latitude: lat.trim().parse().ok()?,
        longitude: lng.trim().parse().ok()?,
    })
}

fn print_outcome(outcome: QueryOutcome, subject: &str) {
    match outcome {
        QueryOutcome::Success(list) => {
            for facility in &list.facilities {
                println!(
                    "{} — {}, {} [{}]",
                    facility.name,
                    facility.location.address.city,
                    facility.location.address.state,
                    facility.id
                );
            }
            println!(
                "({} of {} matching)",
                list.facilities.len(),
                list.total_matching
            );
        }
        QueryOutcome::NotFound => println!("No facilities found for {subject}"),
        // Reserved for callers that surface execution failures; in-memory
        // queries never produce this today.
        QueryOutcome::Error(err) => eprintln!("Query failed: {err}"),
    }
}

fn print_facility(facility: &Facility) {
    println!("Facility: {}", facility.name);
    println!("ID: {}", facility.id);
    println!("Type: {:?}", facility.kind);
    println!("Governance: {:?}", facility.governance);
    println!("Open: {}", facility.open);
    println!(
        "Location: {}, {} ({})",
        facility.location.point.latitude, facility.location.point.longitude, facility.location.hash
    );
    println!(
        "Address: {}, {}, {} {}",
        facility.location.address.lines.join(" / "),
        facility.location.address.city,
        facility.location.address.state,
        facility.location.address.postal_code
    );
    if let Some(phone) = &facility.contact.phone {
        println!("Phone: {phone}");
    }
    for website in &facility.contact.websites {
        println!("Website: {website}");
    }
    if let Some(beds) = facility.capabilities.beds {
        println!("Beds: {beds}");
    }
}
