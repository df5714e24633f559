//! Code and abbreviation synthesis for imported entities.
//!
//! Two interchangeable strategies exist for entity codes: derive a short
//! code from the entity name, or hand out `PREFIX` + counter codes the
//! way the backend does. Both respect the 10-character column limit.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::normalize::truncate_chars;

/// Hard limit on code and abbreviation columns.
pub const CODE_MAX_LEN: usize = 10;

/// Code prefix for shipping companies.
pub const COMPANY_CODE_PREFIX: &str = "ARM";

/// Code prefix for vessels without an IMO number.
pub const VESSEL_CODE_PREFIX: &str = "NAV";

/// Generic corporate terms that carry no identity; dropped when building
/// abbreviations as long as something else remains.
pub static CORPORATE_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "LINE",
        "LINES",
        "SHIPPING",
        "MARINE",
        "MARITIME",
        "CO",
        "LTD",
        "COMPANY",
        "CORPORATION",
        "GROUP",
        "INTERNATIONAL",
        "INC",
        "LLC",
    ])
});

/// Derive a code from a name: uppercase, ASCII alphanumerics only, a
/// 6-character prefix when the name is long enough. Empty results fall
/// back to the entity prefix.
pub fn name_code(name: &str, prefix: &str) -> String {
    let cleaned: String = name
        .to_uppercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if cleaned.is_empty() {
        return prefix.to_string();
    }

    let code = if cleaned.len() >= 6 {
        &cleaned[..6]
    } else {
        cleaned.as_str()
    };
    truncate_chars(code, CODE_MAX_LEN).to_string()
}

/// `PREFIX` + zero-padded counter, e.g. `ARM007`. The caller supplies the
/// next number from the store's high-water mark.
pub fn sequential_code(prefix: &str, number: u32) -> String {
    format!("{prefix}{number:03}")
}

/// First letters of up to five significant words of the name, uppercased.
/// Corporate stopwords are dropped when at least one other word remains.
pub fn abbreviation(name: &str) -> String {
    let upper = name.to_uppercase();
    let mut words: Vec<&str> = upper
        .split_whitespace()
        .filter(|w| w.chars().count() > 1 && !CORPORATE_STOPWORDS.contains(w))
        .collect();
    if words.is_empty() {
        words = upper.split_whitespace().take(2).collect();
    }

    let initials: String = words
        .iter()
        .take(5)
        .filter_map(|w| w.chars().next())
        .collect();
    truncate_chars(&initials, CODE_MAX_LEN).to_string()
}

/// Disambiguate a code that already exists in the store: keep an
/// 8-character stem and append a two-digit suffix derived from a stable
/// hash of the name. Best effort — a secondary collision is not retried.
pub fn collision_suffix(code: &str, name: &str) -> String {
    let stem = truncate_chars(code, CODE_MAX_LEN - 2);
    format!("{stem}{:02}", fnv1a_64(name.as_bytes()) % 100)
}

/// FNV-1a over UTF-8 bytes. Stable across platforms and runs, unlike the
/// default hasher.
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}
