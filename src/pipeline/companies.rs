//! Shipping-company import from the knowledge graph, with embedded
//! fallback.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::codegen::{
    abbreviation, collision_suffix, name_code, sequential_code, COMPANY_CODE_PREFIX,
};
use crate::model::{CompanyCandidate, ShippingCompany};
use crate::normalize::{clean_text, is_opaque_identifier, normalize_country, truncate_chars};
use crate::source::wikidata::{binding_str, Binding, WikidataClient, COMPANIES_QUERY};
use crate::source::fallback;
use crate::pipeline::{record_failure, CodeStrategy, ImportContext, Outcome, PROGRESS_EVERY};

/// Longest accepted headquarters-city label; anything longer is junk
/// from the label service.
const CITY_MAX_LEN: usize = 100;
const WEBSITE_MAX_LEN: usize = 150;

pub fn import_companies(ctx: &mut ImportContext, wikidata: &WikidataClient) -> Result<()> {
    info!("importing shipping companies");

    let candidates = match wikidata.query(COMPANIES_QUERY) {
        Ok(bindings) if !bindings.is_empty() => {
            info!(count = bindings.len(), "company records fetched");
            bindings.iter().map(candidate_from_binding).collect()
        }
        Ok(_) => {
            warn!("company source returned no results, using embedded fallback");
            fallback::companies()
        }
        Err(err) => {
            warn!(error = %err, "company source unavailable, using embedded fallback");
            fallback::companies()
        }
    };

    for candidate in candidates {
        let label = candidate.name.clone();
        match process_company(ctx, candidate) {
            Ok(Outcome::Imported) => {
                ctx.report.companies.imported += 1;
                if ctx.report.companies.imported % PROGRESS_EVERY == 0 {
                    debug!(imported = ctx.report.companies.imported, "company import progress");
                }
            }
            Ok(Outcome::Skipped) => ctx.report.companies.skipped += 1,
            Err(err) => record_failure(&mut ctx.report.companies, "companies", &label, &err),
        }
    }

    info!(
        imported = ctx.report.companies.imported,
        skipped = ctx.report.companies.skipped,
        errors = ctx.report.companies.errors,
        "company import finished"
    );
    Ok(())
}

/// Map one SPARQL result row onto a candidate. Unresolved entity ids in
/// label positions are treated as absent values.
fn candidate_from_binding(binding: &Binding) -> CompanyCandidate {
    let name = binding_str(binding, "itemLabel").unwrap_or_default().to_string();

    let country = binding_str(binding, "countryLabel")
        .filter(|c| !is_opaque_identifier(c))
        .map(str::to_string);

    let city = binding_str(binding, "cityLabel")
        .or_else(|| binding_str(binding, "hqLabel"))
        .filter(|c| !is_opaque_identifier(c) && c.chars().count() <= CITY_MAX_LEN)
        .map(str::to_string);

    let website = binding_str(binding, "website")
        .filter(|w| w.chars().count() <= WEBSITE_MAX_LEN)
        .map(str::to_string);

    CompanyCandidate {
        name,
        city,
        country,
        website,
        ..Default::default()
    }
}

/// Normalize, deduplicate and insert one company. Duplicates are decided
/// by case-insensitive name; code collisions get a hash suffix instead.
pub fn process_company(ctx: &mut ImportContext, candidate: CompanyCandidate) -> Result<Outcome> {
    let name = clean_text(&candidate.name);
    if name.is_empty() || is_opaque_identifier(&name) {
        return Ok(Outcome::Skipped);
    }

    // country is mandatory for companies
    let country = match candidate.country.as_deref().map(clean_text) {
        Some(c) if !c.is_empty() => normalize_country(&c).to_string(),
        _ => return Ok(Outcome::Skipped),
    };

    if ctx.store.company_name_exists(&name)? {
        debug!(company = %name, "already present, skipping");
        return Ok(Outcome::Skipped);
    }

    let mut code = match ctx.code_strategy {
        CodeStrategy::NameDerived => name_code(&name, COMPANY_CODE_PREFIX),
        CodeStrategy::Sequential => {
            let next = ctx.store.max_company_code_number(COMPANY_CODE_PREFIX)? + 1;
            sequential_code(COMPANY_CODE_PREFIX, next)
        }
    };
    if ctx.store.company_code_exists(&code)? {
        code = collision_suffix(&code, &name);
    }

    let company = ShippingCompany {
        code,
        abbreviation: abbreviation(&name),
        city: candidate
            .city
            .as_deref()
            .map(clean_text)
            .filter(|c| !c.is_empty())
            .map(|c| truncate_chars(&c, CITY_MAX_LEN).to_string()),
        country,
        website: candidate.website.map(|w| clean_text(&w)).filter(|w| !w.is_empty()),
        email: candidate.email,
        phone: candidate.phone,
        notes: candidate.notes,
        name,
    };

    let id = ctx.store.insert_company(&company)?;
    ctx.companies.insert(id, company.name);
    Ok(Outcome::Imported)
}
