//! Embedded fallback datasets for the query-based sources.
//!
//! When the knowledge-graph endpoint is unreachable or returns nothing,
//! the pipelines import these records instead, so a run never produces an
//! empty store. The lists mirror the shape of live results; country names
//! are source-locale and go through the normalizer like any other record.

use crate::model::{CompanyCandidate, VesselCandidate};

fn company(name: &str, country: &str, city: &str) -> CompanyCandidate {
    CompanyCandidate {
        name: name.to_string(),
        city: Some(city.to_string()),
        country: Some(country.to_string()),
        ..Default::default()
    }
}

/// Major shipping and freight companies, used when the company source
/// fails.
pub fn companies() -> Vec<CompanyCandidate> {
    vec![
        company("Maersk Line", "Denmark", "Copenhagen"),
        company("Mediterranean Shipping Company", "Switzerland", "Geneva"),
        company("CMA CGM", "France", "Marseille"),
        company("COSCO Shipping", "China", "Shanghai"),
        company("Hapag-Lloyd", "Germany", "Hamburg"),
        company("ONE (Ocean Network Express)", "Japan", "Tokyo"),
        company("Evergreen Marine", "Taiwan", "Taipei"),
        company("Yang Ming Marine Transport", "Taiwan", "Keelung"),
        company("HMM (Hyundai Merchant Marine)", "South Korea", "Seoul"),
        company("PIL (Pacific International Lines)", "Singapore", "Singapore"),
        company("ZIM Integrated Shipping Services", "Israel", "Haifa"),
        company("Wan Hai Lines", "Taiwan", "Taipei"),
        company("Kuehne + Nagel", "Switzerland", "Schindellegi"),
        company("DB Schenker", "Germany", "Essen"),
        company("DHL Global Forwarding", "Germany", "Bonn"),
        company("DSV Panalpina", "Denmark", "Hedehusene"),
        company("Nippon Express", "Japan", "Tokyo"),
        company("GEODIS", "France", "Paris"),
        company("C.H. Robinson", "United States", "Eden Prairie"),
        company("Expeditors International", "United States", "Seattle"),
        company("Sinotrans", "China", "Beijing"),
        company("Kerry Logistics", "China", "Hong Kong"),
        company("CEVA Logistics", "Netherlands", "Baar"),
        company("Agility Logistics", "Kuwait", "Kuwait City"),
        company("Bolloré Logistics", "France", "Puteaux"),
    ]
}

fn vessel(name: &str, imo: &str, flag: &str, operator: &str) -> VesselCandidate {
    VesselCandidate {
        name: name.to_string(),
        imo_number: Some(imo.to_string()),
        flag_country: Some(flag.to_string()),
        operator: Some(operator.to_string()),
        ..Default::default()
    }
}

/// Well-known large container vessels, used when the vessel source fails.
pub fn vessels() -> Vec<VesselCandidate> {
    vec![
        vessel(
            "CMA CGM ANTOINE DE SAINT EXUPERY",
            "9454436",
            "France",
            "CMA CGM",
        ),
        vessel(
            "MSC GULSUN",
            "9839430",
            "Panama",
            "Mediterranean Shipping Company",
        ),
        vessel("MADRID MAERSK", "9778150", "Denmark", "Maersk Line"),
        vessel("COSCO SHIPPING UNIVERSE", "9795668", "China", "COSCO Shipping"),
        vessel("SAJIR", "9837865", "Germany", "Hapag-Lloyd"),
        vessel("ONE INNOVATION", "9833371", "Japan", "ONE"),
        vessel("EVER GIVEN", "9811000", "Panama", "Evergreen Marine"),
        vessel("HMM ALGECIRAS", "9863524", "South Korea", "HMM"),
        vessel(
            "MSC MINA",
            "9797272",
            "Panama",
            "Mediterranean Shipping Company",
        ),
        vessel("CMA CGM JACQUES SAADE", "9839303", "France", "CMA CGM"),
    ]
}
