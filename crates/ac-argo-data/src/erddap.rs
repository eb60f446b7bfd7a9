//! ERDDAP `tabledap` client for the Argo GDAC float dataset.
//!
//! Issues one JSON query per float:
//! `{base_url}/tabledap/{dataset}.json?<columns>&platform_number="<id>"`
//! and converts the returned table rows into a [`Dataset`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use ac_protocol::{Dataset, FloatId, Sample};

use crate::error::{FetchError, FetchResult};
use crate::fetcher::DatasetFetcher;

/// Columns requested from the archive, in query order.
const COLUMNS: &[&str] = &[
    "platform_number",
    "cycle_number",
    "time",
    "latitude",
    "longitude",
    "pres",
    "temp",
    "psal",
];

/// Configuration for the ERDDAP endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ErddapConfig {
    /// ERDDAP server root (without `/tabledap`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// tabledap dataset id.
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Serve the built-in sample floats instead of calling the archive.
    #[serde(default)]
    pub offline: bool,
}

fn default_base_url() -> String {
    "https://erddap.ifremer.fr/erddap".into()
}
fn default_dataset() -> String {
    "ArgoFloats".into()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for ErddapConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            dataset: default_dataset(),
            timeout_secs: default_timeout_secs(),
            offline: false,
        }
    }
}

/// ERDDAP `.json` response envelope (only fields we need).
#[derive(Deserialize)]
struct TableResponse {
    table: Table,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Table {
    column_names: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// HTTP client for an ERDDAP server.
pub struct ErddapFetcher {
    client: reqwest::Client,
    config: ErddapConfig,
}

impl ErddapFetcher {
    pub fn new(config: ErddapConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Full query URL for one float.
    pub fn query_url(&self, float_id: FloatId) -> String {
        format!(
            "{}/tabledap/{}.json?{}&platform_number=%22{}%22",
            self.config.base_url.trim_end_matches('/'),
            self.config.dataset,
            COLUMNS.join(","),
            float_id
        )
    }
}

#[async_trait]
impl DatasetFetcher for ErddapFetcher {
    async fn fetch(&self, float_id: FloatId) -> FetchResult<Arc<Dataset>> {
        let url = self.query_url(float_id);
        tracing::info!(float_id = %float_id, "fetching float from archive");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status();
        // ERDDAP answers 404 when the constraint matched no rows.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(float_id));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                float_id,
                status: status.as_u16(),
            });
        }

        let body: TableResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        let dataset = decode_table(float_id, body.table)?;
        tracing::info!(
            float_id = %float_id,
            samples = dataset.len(),
            "float fetched"
        );
        Ok(Arc::new(dataset))
    }

    fn name(&self) -> &str {
        "erddap"
    }
}

/// Convert an ERDDAP table into a dataset. Missing columns read as all-None.
fn decode_table(float_id: FloatId, table: Table) -> FetchResult<Dataset> {
    if table.rows.is_empty() {
        return Err(FetchError::NotFound(float_id));
    }

    let col = |name: &str| table.column_names.iter().position(|c| c == name);
    let (cycle, time, lat, lon) = (
        col("cycle_number"),
        col("time"),
        col("latitude"),
        col("longitude"),
    );
    let (pres, temp, psal) = (col("pres"), col("temp"), col("psal"));

    let mut samples = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        if row.len() != table.column_names.len() {
            return Err(FetchError::Decode(format!(
                "row {i} has {} values, expected {}",
                row.len(),
                table.column_names.len()
            )));
        }
        samples.push(Sample {
            cycle_number: cell(row, cycle)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok()),
            time: cell(row, time).and_then(parse_time),
            latitude: cell(row, lat).and_then(Value::as_f64),
            longitude: cell(row, lon).and_then(Value::as_f64),
            pressure: cell(row, pres).and_then(Value::as_f64),
            temperature: cell(row, temp).and_then(Value::as_f64),
            salinity: cell(row, psal).and_then(Value::as_f64),
        });
    }

    Ok(Dataset::from_samples(float_id, samples))
}

fn cell(row: &[Value], idx: Option<usize>) -> Option<&Value> {
    idx.and_then(|j| row.get(j))
}

fn parse_time(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
