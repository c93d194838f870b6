//! Google Sheets retrieval
//!
//! Each tab is read through the v4 `values` endpoint with an API key.
//! Tabs are fetched in parallel; a failed tab does not affect the others.

use super::{rows_from_json, RowSource};
use crate::types::{PltrackError, Result, SourceBatch};
use rayon::prelude::*;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Google Sheets API base URL
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// `values.get` response (minimal fields). Empty tabs omit `values`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

pub struct SheetsClient {
    client: Client,
    base_url: String,
    sheet_id: String,
    api_key: String,
}

impl SheetsClient {
    pub fn new(sheet_id: &str, api_key: &str) -> Result<Self> {
        Self::with_base_url(SHEETS_API_BASE, sheet_id, api_key)
    }

    /// Client against a different API host (for testing)
    pub fn with_base_url(base_url: &str, sheet_id: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| PltrackError::Fetch(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            sheet_id: sheet_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// `{base}/{sheet_id}/values/{tab}?key={api_key}`, tab name percent-encoded
    fn tab_url(&self, tab: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| PltrackError::Fetch(format!("bad base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PltrackError::Fetch("base url cannot have a path".into()))?
            .push(&self.sheet_id)
            .push("values")
            .push(tab);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn fetch_tab(&self, tab: &str) -> Result<SourceBatch> {
        let url = self.tab_url(tab)?;
        log::info!("fetching tab {}", tab);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error("HTTP request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PltrackError::Fetch(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .map_err(|e| fetch_error("read failed", e))?;
        parse_value_range(&body)
    }
}

/// The request URL carries the API key, so it never reaches a message
fn fetch_error(context: &str, e: reqwest::Error) -> PltrackError {
    PltrackError::Fetch(format!("{}: {}", context, e.without_url()))
}

fn parse_value_range(body: &str) -> Result<SourceBatch> {
    let range: ValueRange = serde_json::from_str(body)
        .map_err(|e| PltrackError::Parse(format!("values response: {}", e)))?;
    Ok(SourceBatch::Rows(rows_from_json(range.values)))
}

impl RowSource for SheetsClient {
    fn name(&self) -> &str {
        "google-sheets"
    }

    fn fetch_all(&self, tabs: &[String]) -> HashMap<String, SourceBatch> {
        tabs.par_iter()
            .map(|tab| {
                let batch = match self.fetch_tab(tab) {
                    Ok(batch) => batch,
                    Err(e) => {
                        log::error!("fetching {} failed: {}", tab, e);
                        SourceBatch::Unavailable(e.to_string())
                    }
                };
                (tab.clone(), batch)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_url_encodes_tab_name() {
        let client = SheetsClient::new("sheet123", "key456").unwrap();
        let url = client.tab_url("American Football").unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet123/values/American%20Football?key=key456"
        );
    }

    #[test]
    fn test_tab_url_custom_base() {
        let client = SheetsClient::with_base_url("http://localhost:9/api/", "s", "k").unwrap();
        let url = client.tab_url("S1x").unwrap();

        assert_eq!(url.as_str(), "http://localhost:9/api/s/values/S1x?key=k");
    }

    #[test]
    fn test_parse_value_range() {
        let body = r#"{"range": "S1x!A1:Z2", "majorDimension": "ROWS",
            "values": [["Date", "Income"], ["01/01/2024", "1,000"]]}"#;

        let batch = parse_value_range(body).unwrap();

        match batch {
            SourceBatch::Rows(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1][1], "1,000");
            }
            SourceBatch::Unavailable(_) => panic!("expected rows"),
        }
    }

    #[test]
    fn test_parse_value_range_empty_tab() {
        let batch = parse_value_range(r#"{"range": "S1x!A1:Z1000"}"#).unwrap();
        assert_eq!(batch, SourceBatch::Rows(Vec::new()));
    }

    #[test]
    fn test_parse_value_range_invalid() {
        assert!(matches!(
            parse_value_range("<html>"),
            Err(PltrackError::Parse(_))
        ));
    }

    #[test]
    fn test_unreachable_host_marks_tabs_unavailable() {
        // Port 9 (discard) on localhost is not an HTTP server
        let client = SheetsClient::with_base_url("http://127.0.0.1:9", "s", "k").unwrap();

        let batches = client.fetch_all(&["S1x".to_string(), "S2x".to_string()]);

        assert_eq!(batches.len(), 2);
        assert!(batches
            .values()
            .all(|b| matches!(b, SourceBatch::Unavailable(_))));
    }

    #[test]
    fn test_fetch_failure_hides_api_key() {
        let client =
            SheetsClient::with_base_url("http://127.0.0.1:9", "s", "SECRETKEY123").unwrap();

        let batches = client.fetch_all(&["S1x".to_string()]);

        match &batches["S1x"] {
            SourceBatch::Unavailable(reason) => {
                assert!(reason.contains("HTTP request failed"));
                assert!(!reason.contains("SECRETKEY123"));
                assert!(!reason.contains("key="));
            }
            SourceBatch::Rows(_) => panic!("expected unavailable"),
        }
    }
}
