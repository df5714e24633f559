//! External data sources.
//!
//! Two connector kinds feed the pipelines: a paginated record-search API
//! (ports, airports) and a SPARQL knowledge-graph endpoint (companies,
//! vessels). Query-based sources carry an embedded fallback dataset so a
//! run always has some input even when the remote service is down.

pub mod fallback;
pub mod opendatasoft;
pub mod wikidata;

pub use opendatasoft::{OpenDataSoftClient, PageIter, SearchRecord};
pub use wikidata::{Binding, SparqlValue, WikidataClient};

use anyhow::Result;

/// User agent sent with every outbound request.
pub const USER_AGENT: &str = concat!("maritime-importer/", env!("CARGO_PKG_VERSION"));

/// The connectors used by one pipeline invocation.
pub struct Sources {
    pub opendatasoft: OpenDataSoftClient,
    pub wikidata: WikidataClient,
}

impl Sources {
    pub fn new(
        search_endpoint: Option<String>,
        sparql_endpoint: Option<String>,
        page_size: u32,
    ) -> Result<Self> {
        Ok(Self {
            opendatasoft: OpenDataSoftClient::new(search_endpoint, page_size)?,
            wikidata: WikidataClient::new(sparql_endpoint)?,
        })
    }
}
