//! Vessel import from the knowledge graph, with embedded fallback.
//!
//! Vessels are the only entity carrying a foreign key; the operator
//! label on each record is resolved against known companies and left
//! unset when no confident match exists.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::codegen::{collision_suffix, name_code, VESSEL_CODE_PREFIX};
use crate::model::{Vessel, VesselCandidate, VESSEL_STATUS_ACTIVE};
use crate::normalize::{clean_text, is_opaque_identifier, normalize_country};
use crate::pipeline::linker::{resolve_company, CompanyCache};
use crate::pipeline::{record_failure, ImportContext, Outcome, PROGRESS_EVERY};
use crate::source::fallback;
use crate::source::wikidata::{binding_str, Binding, WikidataClient, VESSELS_QUERY};

pub fn import_vessels(ctx: &mut ImportContext, wikidata: &WikidataClient) -> Result<()> {
    info!("importing vessels");

    // vessel-only runs link against companies already in the store
    if ctx.companies.is_empty() {
        ctx.companies = CompanyCache::preload(&ctx.store)?;
        debug!(companies = ctx.companies.len(), "company cache preloaded");
    }

    let candidates = match wikidata.query(VESSELS_QUERY) {
        Ok(bindings) if !bindings.is_empty() => {
            info!(count = bindings.len(), "vessel records fetched");
            bindings.iter().map(candidate_from_binding).collect()
        }
        Ok(_) => {
            warn!("vessel source returned no results, using embedded fallback");
            fallback::vessels()
        }
        Err(err) => {
            warn!(error = %err, "vessel source unavailable, using embedded fallback");
            fallback::vessels()
        }
    };

    for candidate in candidates {
        let label = candidate.name.clone();
        match process_vessel(ctx, candidate) {
            Ok(Outcome::Imported) => {
                ctx.report.vessels.imported += 1;
                if ctx.report.vessels.imported % PROGRESS_EVERY == 0 {
                    debug!(imported = ctx.report.vessels.imported, "vessel import progress");
                }
            }
            Ok(Outcome::Skipped) => ctx.report.vessels.skipped += 1,
            Err(err) => record_failure(&mut ctx.report.vessels, "vessels", &label, &err),
        }
    }

    info!(
        imported = ctx.report.vessels.imported,
        skipped = ctx.report.vessels.skipped,
        errors = ctx.report.vessels.errors,
        "vessel import finished"
    );
    Ok(())
}

fn candidate_from_binding(binding: &Binding) -> VesselCandidate {
    VesselCandidate {
        name: binding_str(binding, "itemLabel").unwrap_or_default().to_string(),
        imo_number: binding_str(binding, "imoNumber").map(str::to_string),
        flag_country: binding_str(binding, "flagLabel").map(str::to_string),
        operator: binding_str(binding, "operatorLabel").map(str::to_string),
        length_m: numeric_binding(binding, "length"),
        beam_m: numeric_binding(binding, "beam"),
        draft_m: numeric_binding(binding, "draft"),
        gross_tonnage: numeric_binding(binding, "tonnage").map(|t| t as i64),
    }
}

/// Dimensions arrive as decimal literals; each parses independently so
/// one malformed value does not clear the others.
fn numeric_binding(binding: &Binding, var: &str) -> Option<f64> {
    binding_str(binding, var).and_then(|v| v.parse().ok())
}

pub fn process_vessel(ctx: &mut ImportContext, candidate: VesselCandidate) -> Result<Outcome> {
    let name = clean_text(&candidate.name);
    if name.chars().count() < 3 || is_opaque_identifier(&name) {
        return Ok(Outcome::Skipped);
    }

    // an IMO number is digits or it is absent
    let imo_number = candidate
        .imo_number
        .map(|i| clean_text(&i))
        .filter(|i| !i.is_empty() && i.bytes().all(|b| b.is_ascii_digit()));

    let flag_country = candidate
        .flag_country
        .map(|f| clean_text(&f))
        .filter(|f| !f.is_empty() && !is_opaque_identifier(f))
        .map(|f| normalize_country(&f).to_string());

    let company_id = candidate
        .operator
        .as_deref()
        .and_then(|operator| resolve_company(&ctx.companies, &ctx.store, operator));
    if company_id.is_none() {
        if let Some(operator) = candidate.operator.as_deref() {
            debug!(vessel = %name, operator, "operator not resolved");
        }
    }

    if ctx.store.vessel_exists(&name, imo_number.as_deref())? {
        debug!(vessel = %name, "already present, skipping");
        return Ok(Outcome::Skipped);
    }

    let mut code = match imo_number.as_deref() {
        Some(imo) => format!("IMO{imo}"),
        None => name_code(&name, VESSEL_CODE_PREFIX),
    };
    if ctx.store.vessel_code_exists(&code)? {
        code = collision_suffix(&code, &name);
    }

    let vessel = Vessel {
        code,
        name,
        flag_country,
        length_m: candidate.length_m,
        beam_m: candidate.beam_m,
        draft_m: candidate.draft_m,
        gross_tonnage: candidate.gross_tonnage,
        imo_number,
        status: VESSEL_STATUS_ACTIVE.to_string(),
        company_id,
    };

    ctx.store.insert_vessel(&vessel)?;
    Ok(Outcome::Imported)
}
