use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Public record-search API used for the port and airport datasets.
pub const DEFAULT_ENDPOINT: &str = "https://public.opendatasoft.com/api/records/1.0/search/";

pub const PORTS_DATASET: &str = "world-port-index";
pub const AIRPORTS_DATASET: &str = "airports-code";

/// Cooperative rate limit between successive page fetches.
const PAGE_DELAY: Duration = Duration::from_millis(300);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
pub struct SearchPage {
    /// Total hits available on the server for the query.
    #[serde(default)]
    pub nhits: u64,
    #[serde(default)]
    pub records: Vec<SearchRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRecord {
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Blocking client for the paginated search API.
pub struct OpenDataSoftClient {
    client: Client,
    endpoint: String,
    page_size: u32,
}

impl OpenDataSoftClient {
    pub fn new(endpoint: Option<String>, page_size: u32) -> Result<Self> {
        let client = Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            page_size: page_size.max(1),
        })
    }

    fn fetch_page(&self, dataset: &str, sort: &str, start: u64) -> Result<SearchPage> {
        debug!(dataset, start, "fetching search page");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("dataset", dataset),
                ("rows", &self.page_size.to_string()),
                ("start", &start.to_string()),
                ("sort", sort),
            ])
            .send()
            .with_context(|| format!("search request for {dataset} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("search request for {dataset} returned status {status}");
        }

        let text = response.text().context("failed to read search response")?;
        serde_json::from_str(&text).context("malformed search response")
    }

    /// Lazy sequence of record pages. The iterator advances an offset
    /// against the server-reported total and ends on exhaustion, an empty
    /// page, or the first transport failure (logged; already-yielded
    /// pages stay processed). The cursor is in-memory only — a new run
    /// starts from offset zero.
    pub fn pages<'a>(&'a self, dataset: &'a str, sort: &'a str) -> PageIter<'a> {
        PageIter {
            client: self,
            dataset,
            sort,
            offset: 0,
            total: None,
            done: false,
        }
    }
}

pub struct PageIter<'a> {
    client: &'a OpenDataSoftClient,
    dataset: &'a str,
    sort: &'a str,
    offset: u64,
    total: Option<u64>,
    done: bool,
}

impl Iterator for PageIter<'_> {
    type Item = Vec<SearchRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(total) = self.total {
            if self.offset >= total {
                self.done = true;
                return None;
            }
        }
        if self.offset > 0 {
            std::thread::sleep(PAGE_DELAY);
        }

        match self.client.fetch_page(self.dataset, self.sort, self.offset) {
            Ok(page) => {
                self.total = Some(page.nhits);
                if page.records.is_empty() {
                    self.done = true;
                    return None;
                }
                self.offset += u64::from(self.client.page_size);
                Some(page.records)
            }
            Err(err) => {
                warn!(dataset = self.dataset, error = %err, "page fetch failed, halting pagination");
                self.done = true;
                None
            }
        }
    }
}
