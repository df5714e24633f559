//! Entity records as they flow through the pipeline.
//!
//! `*Candidate` types hold raw values extracted from a source, before
//! normalization and duplicate checks. The plain entity types are fully
//! normalized rows ready for insertion; the store owns the persisted
//! copies and assigns ids and timestamps.

/// Raw port record from the paginated search source.
#[derive(Debug, Clone, Default)]
pub struct PortCandidate {
    pub name: String,
    pub wpi_number: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Raw airport record from the paginated search source.
#[derive(Debug, Clone, Default)]
pub struct AirportCandidate {
    pub name: String,
    pub iata: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Raw shipping-company record from the knowledge graph or the embedded
/// fallback list.
#[derive(Debug, Clone, Default)]
pub struct CompanyCandidate {
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Raw vessel record from the knowledge graph or the embedded fallback
/// list. `operator` is the free-text owner label used for company
/// linking.
#[derive(Debug, Clone, Default)]
pub struct VesselCandidate {
    pub name: String,
    pub imo_number: Option<String>,
    pub flag_country: Option<String>,
    pub operator: Option<String>,
    pub length_m: Option<f64>,
    pub beam_m: Option<f64>,
    pub draft_m: Option<f64>,
    pub gross_tonnage: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct Port {
    pub name: String,
    pub abbreviation: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct Airport {
    pub name: String,
    pub iata_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct ShippingCompany {
    pub code: String,
    pub name: String,
    pub abbreviation: String,
    pub city: Option<String>,
    pub country: String,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Vessel {
    pub code: String,
    pub name: String,
    pub flag_country: Option<String>,
    pub length_m: Option<f64>,
    pub beam_m: Option<f64>,
    pub draft_m: Option<f64>,
    pub gross_tonnage: Option<i64>,
    pub imo_number: Option<String>,
    pub status: String,
    pub company_id: Option<i64>,
}

/// Default status for newly imported vessels.
pub const VESSEL_STATUS_ACTIVE: &str = "active";
