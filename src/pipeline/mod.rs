//! Import pipelines and their orchestration.
//!
//! Each entity type has one pipeline: fetch candidates from its source,
//! normalize, resolve duplicates, assign identifiers, link foreign keys
//! and apply per-record writes. All run state (store handle, linker
//! cache, statistics) lives in an [`ImportContext`] owned by the caller
//! for the duration of one invocation.

pub mod airports;
pub mod companies;
pub mod linker;
pub mod ports;
pub mod stats;
pub mod vessels;

pub use linker::CompanyCache;
pub use stats::{EntityStats, RunReport};

use anyhow::Result;
use tracing::warn;

use crate::source::Sources;
use crate::store::Store;

/// Verbose logging cap for per-record write failures; beyond this they
/// are only counted.
pub(crate) const MAX_LOGGED_ERRORS: u64 = 10;

/// Progress log cadence (records imported).
pub(crate) const PROGRESS_EVERY: u64 = 100;

/// How company codes are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeStrategy {
    /// Short code derived from the company name, collision-suffixed.
    #[default]
    NameDerived,
    /// Backend-style `ARM` + counter codes from the store's high-water
    /// mark. Requires a store round-trip per code; single-writer only.
    Sequential,
}

/// Decision for one candidate record. Validation failures and duplicates
/// both land on `Skipped`; write failures surface as errors and are
/// counted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Imported,
    Skipped,
}

/// Mutable state threaded through every pipeline stage of one run.
pub struct ImportContext {
    pub store: Store,
    pub report: RunReport,
    pub companies: CompanyCache,
    pub code_strategy: CodeStrategy,
}

impl ImportContext {
    pub fn new(store: Store, code_strategy: CodeStrategy) -> Self {
        Self {
            store,
            report: RunReport::default(),
            companies: CompanyCache::new(),
            code_strategy,
        }
    }
}

/// Run every pipeline in dependency order: companies before vessels (the
/// linker needs company identities), then ports and airports.
pub fn import_all(ctx: &mut ImportContext, sources: &Sources) -> Result<()> {
    companies::import_companies(ctx, &sources.wikidata)?;
    vessels::import_vessels(ctx, &sources.wikidata)?;
    ports::import_ports(ctx, &sources.opendatasoft)?;
    airports::import_airports(ctx, &sources.opendatasoft)?;
    Ok(())
}

/// Count one failed record, logging verbosely only up to the cap.
pub(crate) fn record_failure(stats: &mut EntityStats, entity: &str, label: &str, err: &anyhow::Error) {
    stats.errors += 1;
    if stats.errors <= MAX_LOGGED_ERRORS {
        warn!(entity, record = label, error = %err, "record import failed");
    } else if stats.errors == MAX_LOGGED_ERRORS + 1 {
        warn!(entity, "further record failures will be counted but not logged");
    }
}
