//! Resolution of free-text operator labels to shipping-company rows.
//!
//! The cache holds (id, name) pairs in insertion order — either filled
//! incrementally while companies are imported, or preloaded from the
//! store before a vessel-only run. Matching is heuristic: the first
//! cached name related to the operator string by substring containment
//! wins, with no ranking of competing matches. An operator that resolves
//! to nothing leaves the vessel's company reference unset; a wrong link
//! is worse than none.

use tracing::warn;

use crate::codegen::CORPORATE_STOPWORDS;
use crate::normalize::{clean_text, is_opaque_identifier, truncate_chars};
use crate::store::Store;

/// How much of the operator string is used for the store-side partial
/// match.
const FRAGMENT_LEN: usize = 20;

#[derive(Debug, Default)]
pub struct CompanyCache {
    entries: Vec<(i64, String)>,
}

impl CompanyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the cache with every company currently in the store.
    pub fn preload(store: &Store) -> anyhow::Result<Self> {
        Ok(Self {
            entries: store.load_companies()?,
        })
    }

    pub fn insert(&mut self, id: i64, name: String) {
        self.entries.push((id, name));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First cached company related to the operator string.
    ///
    /// Pass one: full-string containment in either direction, case
    /// insensitive. Pass two: the cached name minus corporate stopwords
    /// contained in the operator, so "A.P. Moller Maersk" still finds
    /// "Maersk Line". First match in insertion order wins.
    pub fn lookup(&self, operator: &str) -> Option<i64> {
        let needle = operator.to_lowercase();

        for (id, name) in &self.entries {
            let cached = name.to_lowercase();
            if cached.contains(&needle) || needle.contains(&cached) {
                return Some(*id);
            }
        }

        for (id, name) in &self.entries {
            let significant = significant_name(name);
            if !significant.is_empty() && needle.contains(&significant) {
                return Some(*id);
            }
        }

        None
    }
}

/// Lowercased name with corporate stopwords removed; empty when nothing
/// significant remains.
fn significant_name(name: &str) -> String {
    name.split_whitespace()
        .filter(|w| !CORPORATE_STOPWORDS.contains(w.to_uppercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolve an operator label to a company id, or None. Never fails a
/// record: store errors during the fallback query are logged and treated
/// as unresolved.
pub fn resolve_company(cache: &CompanyCache, store: &Store, operator: &str) -> Option<i64> {
    let operator = clean_text(operator);
    if operator.is_empty() || is_opaque_identifier(&operator) {
        return None;
    }

    if let Some(id) = cache.lookup(&operator) {
        return Some(id);
    }

    let fragment = truncate_chars(&operator, FRAGMENT_LEN);
    match store.find_company_by_name_fragment(fragment) {
        Ok(found) => found,
        Err(err) => {
            warn!(operator = %operator, error = %err, "company lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_with(names: &[&str]) -> CompanyCache {
        let mut cache = CompanyCache::new();
        for (i, name) in names.iter().enumerate() {
            cache.insert(i as i64 + 1, name.to_string());
        }
        cache
    }

    #[test]
    fn test_lookup_operator_contains_cached_name() {
        let cache = cache_with(&["CMA CGM"]);
        assert_eq!(cache.lookup("CMA CGM Group"), Some(1));
    }

    #[test]
    fn test_lookup_cached_name_contains_operator() {
        let cache = cache_with(&["ONE (Ocean Network Express)"]);
        assert_eq!(cache.lookup("ONE"), Some(1));
    }

    #[test]
    fn test_lookup_stopword_stripped_containment() {
        // neither full string contains the other; "maersk" does
        let cache = cache_with(&["Maersk Line"]);
        assert_eq!(cache.lookup("A.P. Moller Maersk"), Some(1));
    }

    #[test]
    fn test_lookup_no_token_overlap_matching() {
        // sharing the generic word "Shipping" is not a match
        let cache = cache_with(&["Mediterranean Shipping Company"]);
        assert_eq!(cache.lookup("Pacific Shipping"), None);
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let cache = cache_with(&["COSCO Shipping", "COSCO Shipping Lines"]);
        assert_eq!(cache.lookup("COSCO Shipping Lines Ltd"), Some(1));
    }

    #[test]
    fn test_resolve_rejects_opaque_identifiers() {
        let store = Store::open_in_memory().unwrap();
        let cache = cache_with(&["Q12345 Holdings"]);
        assert_eq!(resolve_company(&cache, &store, "Q12345"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_store_query() {
        let mut store = Store::open_in_memory().unwrap();
        let id = store
            .insert_company(&crate::model::ShippingCompany {
                code: "HAPAG".to_string(),
                name: "Hapag-Lloyd".to_string(),
                abbreviation: "HL".to_string(),
                city: None,
                country: "Allemagne".to_string(),
                website: None,
                email: None,
                phone: None,
                notes: None,
            })
            .unwrap();

        let empty = CompanyCache::new();
        assert_eq!(resolve_company(&empty, &store, "Hapag"), Some(id));
        assert_eq!(resolve_company(&empty, &store, "Unknown Carrier"), None);
    }
}
