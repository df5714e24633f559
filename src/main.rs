use anyhow::Result;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use maritime_importer::{
    cli::{Cli, Commands, EntityArg},
    pipeline::{self, CodeStrategy, ImportContext, RunReport},
    source::Sources,
    store::Store,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Import {
            database,
            entity,
            page_size,
            sequential_codes,
            search_endpoint,
            sparql_endpoint,
        } => {
            let start = Instant::now();

            // a store that cannot be opened aborts the run; everything
            // after this point degrades per entity or per record
            let store = Store::open(&database)?;
            let sources = Sources::new(search_endpoint, sparql_endpoint, page_size)?;
            let strategy = if sequential_codes {
                CodeStrategy::Sequential
            } else {
                CodeStrategy::NameDerived
            };
            let mut ctx = ImportContext::new(store, strategy);

            match entity {
                EntityArg::All => pipeline::import_all(&mut ctx, &sources)?,
                EntityArg::Companies => {
                    pipeline::companies::import_companies(&mut ctx, &sources.wikidata)?
                }
                EntityArg::Vessels => {
                    pipeline::vessels::import_vessels(&mut ctx, &sources.wikidata)?
                }
                EntityArg::Ports => pipeline::ports::import_ports(&mut ctx, &sources.opendatasoft)?,
                EntityArg::Airports => {
                    pipeline::airports::import_airports(&mut ctx, &sources.opendatasoft)?
                }
            }

            ctx.report.print_summary(start.elapsed());
        }

        Commands::Purge { database, entity } => {
            let start = Instant::now();
            let mut store = Store::open(&database)?;
            let mut report = RunReport::default();

            // vessels reference companies, so they always go first
            match entity {
                EntityArg::All => {
                    report.vessels.deleted = store.delete_all_vessels()?;
                    report.companies.deleted = store.delete_all_companies()?;
                    report.ports.deleted = store.delete_all_ports()?;
                    report.airports.deleted = store.delete_all_airports()?;
                }
                EntityArg::Companies => {
                    report.vessels.deleted = store.delete_all_vessels()?;
                    report.companies.deleted = store.delete_all_companies()?;
                }
                EntityArg::Vessels => report.vessels.deleted = store.delete_all_vessels()?,
                EntityArg::Ports => report.ports.deleted = store.delete_all_ports()?,
                EntityArg::Airports => report.airports.deleted = store.delete_all_airports()?,
            }

            report.print_summary(start.elapsed());
        }
    }

    Ok(())
}
