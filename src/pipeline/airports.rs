//! Airport import from the paginated airport-codes dataset.

use anyhow::Result;
use tracing::{debug, info};

use crate::model::{Airport, AirportCandidate};
use crate::normalize::{clean_airport_name, clean_text, normalize_country, truncate_chars, valid_iata};
use crate::pipeline::{record_failure, ImportContext, Outcome, PROGRESS_EVERY};
use crate::pipeline::ports::field_str;
use crate::source::opendatasoft::{OpenDataSoftClient, SearchRecord, AIRPORTS_DATASET};

const NAME_MAX_LEN: usize = 200;
const FIELD_MAX_LEN: usize = 100;

pub fn import_airports(ctx: &mut ImportContext, client: &OpenDataSoftClient) -> Result<()> {
    info!("importing airports");

    for page in client.pages(AIRPORTS_DATASET, "name") {
        debug!(records = page.len(), "processing airport page");
        for record in &page {
            let candidate = candidate_from_record(record);
            let label = candidate.name.clone();
            match process_airport(ctx, candidate) {
                Ok(Outcome::Imported) => {
                    ctx.report.airports.imported += 1;
                    if ctx.report.airports.imported % PROGRESS_EVERY == 0 {
                        debug!(imported = ctx.report.airports.imported, "airport import progress");
                    }
                }
                Ok(Outcome::Skipped) => ctx.report.airports.skipped += 1,
                Err(err) => record_failure(&mut ctx.report.airports, "airports", &label, &err),
            }
        }
    }

    info!(
        imported = ctx.report.airports.imported,
        skipped = ctx.report.airports.skipped,
        errors = ctx.report.airports.errors,
        "airport import finished"
    );
    Ok(())
}

pub fn candidate_from_record(record: &SearchRecord) -> AirportCandidate {
    AirportCandidate {
        name: field_str(&record.fields, "name").unwrap_or_default(),
        // dataset revisions disagree on the column name
        iata: field_str(&record.fields, "iata")
            .or_else(|| field_str(&record.fields, "code_iata")),
        city: field_str(&record.fields, "city"),
        country: field_str(&record.fields, "country"),
    }
}

/// A record without a valid 3-letter IATA code is discarded (counted as
/// skipped, never an error).
pub fn process_airport(ctx: &mut ImportContext, candidate: AirportCandidate) -> Result<Outcome> {
    let iata_code = match candidate.iata.as_deref().map(clean_text) {
        Some(code) => match valid_iata(&code) {
            Some(valid) => valid.to_string(),
            None => return Ok(Outcome::Skipped),
        },
        None => return Ok(Outcome::Skipped),
    };

    let name = clean_airport_name(&candidate.name);
    if name.is_empty() {
        return Ok(Outcome::Skipped);
    }
    let name = truncate_chars(&name, NAME_MAX_LEN).to_string();

    if ctx.store.airport_exists(&name, &iata_code)? {
        debug!(airport = %name, iata = %iata_code, "already present, skipping");
        return Ok(Outcome::Skipped);
    }

    let city = candidate
        .city
        .as_deref()
        .map(clean_text)
        .unwrap_or_default();
    let country = candidate
        .country
        .as_deref()
        .map(clean_text)
        .map(|c| normalize_country(&c).to_string())
        .unwrap_or_default();

    let airport = Airport {
        name,
        iata_code,
        city: truncate_chars(&city, FIELD_MAX_LEN).to_string(),
        country: truncate_chars(&country, FIELD_MAX_LEN).to_string(),
    };

    ctx.store.insert_airport(&airport)?;
    Ok(Outcome::Imported)
}
