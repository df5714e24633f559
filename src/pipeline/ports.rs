//! Port import from the paginated World Port Index dataset.

use anyhow::Result;
use tracing::{debug, info};

use crate::model::{Port, PortCandidate};
use crate::normalize::{clean_text, normalize_country, truncate_chars};
use crate::pipeline::{record_failure, ImportContext, Outcome, PROGRESS_EVERY};
use crate::source::opendatasoft::{OpenDataSoftClient, SearchRecord, PORTS_DATASET};

const ABBREVIATION_MAX_LEN: usize = 10;
const FIELD_MAX_LEN: usize = 100;

pub fn import_ports(ctx: &mut ImportContext, client: &OpenDataSoftClient) -> Result<()> {
    info!("importing ports");

    // feeds the positional fallback abbreviation across pages
    let mut position: u64 = 0;

    for page in client.pages(PORTS_DATASET, "port_name") {
        debug!(records = page.len(), "processing port page");
        for record in &page {
            let candidate = candidate_from_record(record);
            let label = candidate.name.clone();
            match process_port(ctx, candidate, position) {
                Ok(Outcome::Imported) => {
                    ctx.report.ports.imported += 1;
                    if ctx.report.ports.imported % PROGRESS_EVERY == 0 {
                        debug!(imported = ctx.report.ports.imported, "port import progress");
                    }
                }
                Ok(Outcome::Skipped) => ctx.report.ports.skipped += 1,
                Err(err) => record_failure(&mut ctx.report.ports, "ports", &label, &err),
            }
            position += 1;
        }
    }

    info!(
        imported = ctx.report.ports.imported,
        skipped = ctx.report.ports.skipped,
        errors = ctx.report.ports.errors,
        "port import finished"
    );
    Ok(())
}

/// Field values may arrive as strings or numbers (the WPI number does
/// both); everything is read as text.
pub(crate) fn field_str(
    fields: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<String> {
    match fields.get(key)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn candidate_from_record(record: &SearchRecord) -> PortCandidate {
    PortCandidate {
        name: field_str(&record.fields, "port_name").unwrap_or_default(),
        wpi_number: field_str(&record.fields, "world_port_index_number"),
        city: field_str(&record.fields, "main_port_name"),
        country: field_str(&record.fields, "country"),
    }
}

/// `position` is the record's index within the run, used for the
/// fallback abbreviation when the source has no WPI number.
pub fn process_port(ctx: &mut ImportContext, candidate: PortCandidate, position: u64) -> Result<Outcome> {
    let name = clean_text(&candidate.name);
    if name.is_empty() {
        return Ok(Outcome::Skipped);
    }

    let abbreviation = match candidate.wpi_number.as_deref().map(clean_text) {
        Some(wpi) if !wpi.is_empty() => truncate_chars(&wpi, ABBREVIATION_MAX_LEN).to_string(),
        _ => format!("P{position}"),
    };

    if ctx.store.port_exists(&name, &abbreviation)? {
        debug!(port = %name, "already present, skipping");
        return Ok(Outcome::Skipped);
    }

    let city = candidate
        .city
        .as_deref()
        .map(clean_text)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| name.clone());
    let country = candidate
        .country
        .as_deref()
        .map(clean_text)
        .map(|c| normalize_country(&c).to_string())
        .unwrap_or_default();

    let port = Port {
        name,
        abbreviation,
        city: truncate_chars(&city, FIELD_MAX_LEN).to_string(),
        country: truncate_chars(&country, FIELD_MAX_LEN).to_string(),
    };

    ctx.store.insert_port(&port)?;
    Ok(Outcome::Imported)
}
