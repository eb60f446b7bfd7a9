//! Shared test harness for E2E conversation tests.
//!
//! Wires the real rule engine, dialogue router and figure renderer to a
//! memoizing fetcher over either the mock archive or a wiremock ERDDAP server.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ac_argo_data::{CachedFetcher, DatasetFetcher, ErddapConfig, ErddapFetcher, MockFetcher};
use ac_chat::{DialogueRouter, Session, TurnOutcome};
use ac_protocol::FloatId;

/// End-to-end harness: router + cache + the mock archive behind it.
pub struct TestHarness {
    pub router: DialogueRouter,
    /// Memoizing layer the router fetches through.
    pub cache: Arc<CachedFetcher>,
    /// Backing mock archive (None when backed by wiremock ERDDAP).
    pub mock: Option<Arc<MockFetcher>>,
}

impl TestHarness {
    /// Harness over the three sample floats (2903893, 2903892, 6902746).
    pub fn with_sample_floats() -> Self {
        Self::with_mock(MockFetcher::with_sample_floats())
    }

    pub fn with_mock(mock: MockFetcher) -> Self {
        let mock = Arc::new(mock);
        let inner: Arc<dyn DatasetFetcher> = mock.clone();
        let mut h = Self::over(inner);
        h.mock = Some(mock);
        h
    }

    /// Harness fetching from an ERDDAP server at `base_url`.
    pub fn with_erddap(base_url: &str) -> Self {
        let config = ErddapConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..ErddapConfig::default()
        };
        let erddap = ErddapFetcher::new(config).unwrap();
        Self::over(Arc::new(erddap))
    }

    fn over(inner: Arc<dyn DatasetFetcher>) -> Self {
        let cache = Arc::new(CachedFetcher::new(inner));
        let router = DialogueRouter::with_fetcher(cache.clone());
        Self {
            router,
            cache,
            mock: None,
        }
    }

    /// Run one turn.
    pub async fn say(&self, session: &mut Session, text: &str) -> TurnOutcome {
        self.router.handle_turn(session, text).await
    }

    /// Run several turns, returning the last outcome.
    pub async fn converse(&self, session: &mut Session, turns: &[&str]) -> TurnOutcome {
        let mut last = None;
        for text in turns {
            last = Some(self.say(session, text).await);
        }
        last.expect("at least one turn")
    }

    /// Calls that reached the mock archive (cache misses only).
    pub fn archive_calls(&self) -> Vec<FloatId> {
        self.mock.as_ref().map(|m| m.calls()).unwrap_or_default()
    }
}

/// An ERDDAP `.json` tabledap response with the standard Argo columns.
pub fn erddap_table(rows: Value) -> Value {
    json!({
        "table": {
            "columnNames": [
                "platform_number", "cycle_number", "time", "latitude",
                "longitude", "pres", "temp", "psal"
            ],
            "columnTypes": [
                "String", "int", "String", "double", "double", "float", "float", "float"
            ],
            "rows": rows
        }
    })
}

/// Mount a tabledap response for `float_id` on `server`.
pub async fn mount_float(server: &MockServer, float_id: u32, rows: Value) {
    Mock::given(method("GET"))
        .and(path("/erddap/tabledap/ArgoFloats.json"))
        .and(query_param("platform_number", format!("\"{float_id}\"")))
        .respond_with(ResponseTemplate::new(200).set_body_json(erddap_table(rows)))
        .mount(server)
        .await;
}

/// Mount an ERDDAP "no matching rows" answer for `float_id`.
pub async fn mount_missing(server: &MockServer, float_id: u32) {
    Mock::given(method("GET"))
        .and(path("/erddap/tabledap/ArgoFloats.json"))
        .and(query_param("platform_number", format!("\"{float_id}\"")))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            "Error {\n    code=404;\n    message=\"Not Found: Your query produced no matching results.\";\n}\n",
        ))
        .mount(server)
        .await;
}
