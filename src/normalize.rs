use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical (French) spellings for country names as they appear in the
/// external sources. Unmapped names pass through unchanged.
static COUNTRY_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("France", "France"),
        ("Spain", "Espagne"),
        ("Italy", "Italie"),
        ("Germany", "Allemagne"),
        ("Belgium", "Belgique"),
        ("Netherlands", "Pays-Bas"),
        ("United Kingdom", "Royaume-Uni"),
        ("UK", "Royaume-Uni"),
        ("England", "Royaume-Uni"),
        ("Scotland", "Écosse"),
        ("Wales", "Pays de Galles"),
        ("Ireland", "Irlande"),
        ("Portugal", "Portugal"),
        ("Greece", "Grèce"),
        ("Morocco", "Maroc"),
        ("Algeria", "Algérie"),
        ("Tunisia", "Tunisie"),
        ("Egypt", "Égypte"),
        ("Turkey", "Turquie"),
        ("Türkiye", "Turquie"),
        ("United States", "États-Unis"),
        ("USA", "États-Unis"),
        ("US", "États-Unis"),
        ("China", "Chine"),
        ("People's Republic of China", "Chine"),
        ("Hong Kong", "Hong Kong"),
        ("Taiwan", "Taïwan"),
        ("Japan", "Japon"),
        ("South Korea", "Corée du Sud"),
        ("Republic of Korea", "Corée du Sud"),
        ("Singapore", "Singapour"),
        ("United Arab Emirates", "Émirats Arabes Unis"),
        ("UAE", "Émirats Arabes Unis"),
        ("Saudi Arabia", "Arabie Saoudite"),
        ("Switzerland", "Suisse"),
        ("Austria", "Autriche"),
        ("Poland", "Pologne"),
        ("Denmark", "Danemark"),
        ("Norway", "Norvège"),
        ("Sweden", "Suède"),
        ("Finland", "Finlande"),
        ("Russia", "Russie"),
        ("Russian Federation", "Russie"),
        ("Canada", "Canada"),
        ("Mexico", "Mexique"),
        ("Brazil", "Brésil"),
        ("Argentina", "Argentine"),
        ("Chile", "Chili"),
        ("India", "Inde"),
        ("Australia", "Australie"),
        ("New Zealand", "Nouvelle-Zélande"),
        ("South Africa", "Afrique du Sud"),
        ("Nigeria", "Nigéria"),
        ("Kenya", "Kenya"),
        ("Ghana", "Ghana"),
        ("Ethiopia", "Éthiopie"),
        ("Israel", "Israël"),
        ("Iran", "Iran"),
        ("Iraq", "Irak"),
        ("Pakistan", "Pakistan"),
        ("Bangladesh", "Bangladesh"),
        ("Thailand", "Thaïlande"),
        ("Vietnam", "Vietnam"),
        ("Malaysia", "Malaisie"),
        ("Indonesia", "Indonésie"),
        ("Philippines", "Philippines"),
        ("Czech Republic", "République Tchèque"),
        ("Hungary", "Hongrie"),
        ("Romania", "Roumanie"),
        ("Bulgaria", "Bulgarie"),
        ("Croatia", "Croatie"),
        ("Serbia", "Serbie"),
        ("Slovenia", "Slovénie"),
        ("Slovakia", "Slovaquie"),
        ("Panama", "Panama"),
        ("Cyprus", "Chypre"),
        ("Marshall Islands", "Îles Marshall"),
        ("Liberia", "Libéria"),
        ("Malta", "Malte"),
        ("Bahamas", "Bahamas"),
        ("Kuwait", "Koweït"),
    ])
});

/// Collapse whitespace runs to a single space, strip control characters
/// (C0, DEL, C1) and trim. Idempotent.
pub fn clean_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.trim().chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if c.is_control() {
            // dropped; a control char does not break a word
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}

/// Map a source-locale country name to its canonical French spelling.
/// Unknown inputs are returned unchanged; never fails.
pub fn normalize_country(country: &str) -> &str {
    COUNTRY_NAMES.get(country).copied().unwrap_or(country)
}

/// Airport labels carry a trailing parenthetical qualifier and an English
/// "Airport" suffix; both are normalized away.
pub fn clean_airport_name(name: &str) -> String {
    let base = match name.split_once('(') {
        Some((head, _)) => head,
        None => name,
    };
    let cleaned = clean_text(base);
    match cleaned.strip_suffix(" Airport") {
        Some(stem) => format!("{stem} Aéroport"),
        None => cleaned,
    }
}

/// An IATA code is exactly three ASCII letters; anything else is treated
/// as absent.
pub fn valid_iata(code: &str) -> Option<&str> {
    let ok = code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic());
    ok.then_some(code)
}

/// Knowledge-graph results sometimes surface an unresolved entity id
/// (an uppercase letter followed only by digits, e.g. `Q12345`) where a
/// label should be. Such strings are not real names.
pub fn is_opaque_identifier(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Maersk \t Line \n"), "Maersk Line");
        assert_eq!(clean_text("one  two   three"), "one two three");
    }

    #[test]
    fn test_clean_text_strips_control_chars() {
        assert_eq!(clean_text("Ham\u{0}burg\u{7f}"), "Hamburg");
        assert_eq!(clean_text("\u{9c}Le Havre"), "Le Havre");
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        for input in ["  a   b ", "x\u{1}y", "déjà  vu", ""] {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn test_normalize_country_mapped() {
        assert_eq!(normalize_country("Germany"), "Allemagne");
        assert_eq!(normalize_country("People's Republic of China"), "Chine");
        assert_eq!(normalize_country("UK"), "Royaume-Uni");
    }

    #[test]
    fn test_normalize_country_unmapped_passes_through() {
        assert_eq!(normalize_country("Atlantis"), "Atlantis");
        assert_eq!(normalize_country(""), "");
    }

    #[test]
    fn test_normalize_country_is_idempotent() {
        for (_, canonical) in COUNTRY_NAMES.iter() {
            assert_eq!(normalize_country(canonical), *canonical);
        }
    }

    #[test]
    fn test_clean_airport_name() {
        assert_eq!(
            clean_airport_name("Charles de Gaulle Airport (Roissy)"),
            "Charles de Gaulle Aéroport"
        );
        assert_eq!(clean_airport_name("Heathrow Airport"), "Heathrow Aéroport");
        assert_eq!(clean_airport_name("Orly"), "Orly");
    }

    #[test]
    fn test_valid_iata() {
        assert_eq!(valid_iata("JFK"), Some("JFK"));
        assert_eq!(valid_iata("JF"), None);
        assert_eq!(valid_iata("JFKX"), None);
        assert_eq!(valid_iata("J1K"), None);
        assert_eq!(valid_iata(""), None);
    }

    #[test]
    fn test_is_opaque_identifier() {
        assert!(is_opaque_identifier("Q12345"));
        assert!(is_opaque_identifier("P31"));
        assert!(!is_opaque_identifier("Q"));
        assert!(!is_opaque_identifier("Maersk"));
        assert!(!is_opaque_identifier("Q12a"));
        assert!(!is_opaque_identifier(""));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("ééééé", 2), "éé");
    }
}
