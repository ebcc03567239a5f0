//! Client for the spreadsheet-backed booking API.
//!
//! The same base URL serves both directions: a GET returns the full catalog
//! of bookable items, and a POST with a `sheetTitle` query appends one flat
//! row to that sheet.

use serde_json::Value;
use thiserror::Error;

use crate::models::booking::{loose_f64, loose_i64};

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("booking API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("no catalog entry with id {id}")]
    PriceNotFound { id: i64 },

    #[error("catalog entry {id} has a malformed price")]
    MalformedPrice { id: i64 },
}

#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(base_url: &str, http: reqwest::Client) -> Self {
        SheetsClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full catalog. The upstream has no per-id query, so every
    /// price lookup pays one full round trip.
    pub async fn fetch_catalog(&self) -> Result<Vec<Value>, SheetsError> {
        let resp = self.http.get(&self.base_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }

    /// Resolve the authoritative price for a booking id. A missing id is a
    /// hard error, never a silent zero price.
    pub async fn resolve_price(&self, id: i64) -> Result<f64, SheetsError> {
        let catalog = self.fetch_catalog().await?;
        find_price(&catalog, id)
    }

    /// Append one flat row to the named sheet.
    pub async fn append_row(&self, sheet_title: &str, row: &Value) -> Result<(), SheetsError> {
        let url = format!("{}?sheetTitle={}", self.base_url, sheet_title);
        let resp = self.http.post(&url).json(row).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        log::debug!("appended row to sheet '{sheet_title}'");
        Ok(())
    }
}

/// Linear search with loose id equality: catalog ids arrive as JSON numbers
/// or strings depending on how the sheet column is typed.
pub fn find_price(catalog: &[Value], id: i64) -> Result<f64, SheetsError> {
    let entry = catalog
        .iter()
        .find(|e| e.get("id").and_then(loose_i64) == Some(id))
        .ok_or(SheetsError::PriceNotFound { id })?;
    entry
        .get("price")
        .and_then(loose_f64)
        .ok_or(SheetsError::MalformedPrice { id })
}
