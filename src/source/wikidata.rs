use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Knowledge-graph SPARQL endpoint used for companies and vessels.
pub const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One result row: variable name to typed value.
pub type Binding = HashMap<String, SparqlValue>;

/// A typed SPARQL result value: the literal plus optional language and
/// datatype tags.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlValue {
    pub value: String,
    #[serde(rename = "type", default)]
    pub value_type: String,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub datatype: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<Binding>,
}

/// Non-empty literal for a variable, if bound.
pub fn binding_str<'a>(binding: &'a Binding, var: &str) -> Option<&'a str> {
    binding
        .get(var)
        .map(|v| v.value.as_str())
        .filter(|v| !v.is_empty())
}

/// Blocking SPARQL client. One request per query; the result caps are
/// part of the queries themselves.
pub struct WikidataClient {
    client: Client,
    endpoint: String,
}

impl WikidataClient {
    pub fn new(endpoint: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }

    /// Run a query and return its bindings. Any transport or parse
    /// failure surfaces as an error; callers substitute the embedded
    /// fallback dataset.
    pub fn query(&self, sparql: &str) -> Result<Vec<Binding>> {
        debug!(endpoint = %self.endpoint, "issuing sparql query");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", sparql), ("format", "json")])
            .send()
            .context("sparql request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("sparql request returned status {status}");
        }

        let text = response.text().context("failed to read sparql response")?;
        let parsed: SparqlResponse =
            serde_json::from_str(&text).context("malformed sparql response")?;
        Ok(parsed.results.bindings)
    }
}

/// Shipping companies with a country, excluding individual vessels and
/// ferries misfiled as companies.
pub const COMPANIES_QUERY: &str = "\
SELECT DISTINCT ?item ?itemLabel ?countryLabel ?cityLabel ?hqLabel ?website WHERE {
  { ?item wdt:P31/wdt:P279* wd:Q1792644. }
  UNION { ?item wdt:P31/wdt:P279* wd:Q161726. }
  UNION { ?item wdt:P452 wd:Q7892674. }
  UNION { ?item wdt:P452 wd:Q308604. }
  FILTER NOT EXISTS { ?item wdt:P31/wdt:P279* wd:Q11446. }
  FILTER NOT EXISTS { ?item wdt:P31 wd:Q1229765. }
  FILTER NOT EXISTS { ?item wdt:P31 wd:Q174736. }
  ?item wdt:P17 ?country.
  OPTIONAL {
    ?item wdt:P159 ?hq.
    ?hq wdt:P131* ?city.
    ?city wdt:P31/wdt:P279* wd:Q515.
  }
  OPTIONAL { ?item wdt:P856 ?website. }
  SERVICE wikibase:label { bd:serviceParam wikibase:language \"en,fr,de,es,it,zh\". }
}
ORDER BY ?countryLabel ?itemLabel
LIMIT 5000";

/// Commercial vessels (container ships, tankers, cargo ships, bulk
/// carriers) with IMO number, flag, operator and dimensions when known.
pub const VESSELS_QUERY: &str = "\
SELECT DISTINCT ?item ?itemLabel ?imoNumber ?flagLabel ?operatorLabel
       ?length ?beam ?draft ?tonnage WHERE {
  { ?item wdt:P31 wd:Q17210. }
  UNION { ?item wdt:P31 wd:Q17479. }
  UNION { ?item wdt:P31 wd:Q17316023. }
  UNION { ?item wdt:P31 wd:Q756100. }
  OPTIONAL { ?item wdt:P458 ?imoNumber. }
  OPTIONAL { ?item wdt:P17 ?flag. }
  OPTIONAL { ?item wdt:P137 ?operator. }
  OPTIONAL { ?item wdt:P2043 ?length. }
  OPTIONAL { ?item wdt:P2049 ?beam. }
  OPTIONAL { ?item wdt:P5524 ?draft. }
  OPTIONAL { ?item wdt:P1879 ?tonnage. }
  SERVICE wikibase:label { bd:serviceParam wikibase:language \"en,fr\". }
}
ORDER BY ?operatorLabel ?itemLabel
LIMIT 10000";
