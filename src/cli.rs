use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "maritime-importer")]
#[command(version, about = "Populate maritime reference tables from public data sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Which entity pipelines a command touches. `all` runs in dependency
/// order: companies, vessels, ports, airports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    All,
    Companies,
    Vessels,
    Ports,
    Airports,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch external sources and import records not yet in the store
    Import {
        /// SQLite database path
        #[arg(short, long, default_value = "maritime.db")]
        database: PathBuf,

        /// Entity pipeline to run
        #[arg(short, long, value_enum, default_value = "all")]
        entity: EntityArg,

        /// Records per page for paginated sources
        #[arg(long, default_value_t = 100)]
        page_size: u32,

        /// Assign backend-style PREFIX+counter company codes instead of
        /// name-derived codes
        #[arg(long)]
        sequential_codes: bool,

        /// Override the paginated search endpoint
        #[arg(long)]
        search_endpoint: Option<String>,

        /// Override the SPARQL endpoint
        #[arg(long)]
        sparql_endpoint: Option<String>,
    },

    /// Delete previously imported rows ahead of a clean re-import
    Purge {
        /// SQLite database path
        #[arg(short, long, default_value = "maritime.db")]
        database: PathBuf,

        /// Entity to purge (companies implies vessels, which reference
        /// company rows)
        #[arg(short, long, value_enum, default_value = "all")]
        entity: EntityArg,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
