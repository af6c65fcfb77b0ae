use clap::{Parser, Subcommand};

/// CLI arguments for facilitydb
#[derive(Debug, Parser)]
#[command(
    name = "facilitydb",
    version,
    about = "Inspect and query a healthcare facility snapshot"
)]
pub struct CliArgs {
    /// Path to the gzip-compressed JSON-ND facility snapshot
    #[arg(short = 'i', long = "input", global = true, default_value = "facilities.jsonl.gz")]
    pub input: String,

    /// Skip malformed snapshot lines instead of aborting the load
    #[arg(long = "lenient", global = true)]
    pub lenient: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded dataset
    Stats,

    /// Resolve a single facility by its ID
    Resolve {
        /// Facility ID (the source row ID)
        id: String,
    },

    /// List facilities near a location
    Nearby {
        /// A geohash (e.g. 9q8yyk) or a "lat,lng" pair
        location: String,

        /// Maximum results per page (default 100, capped at 10000)
        #[arg(long)]
        limit: Option<u32>,

        /// Results to skip before the page starts
        #[arg(long)]
        offset: Option<u32>,
    },

    /// List facilities in snapshot order
    List {
        /// Maximum results per page (default 100, capped at 10000)
        #[arg(long)]
        limit: Option<u32>,

        /// Results to skip before the page starts
        #[arg(long)]
        offset: Option<u32>,
    },
}
