//! Mock fetcher for testing and offline demos — serves synthetic floats.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{TimeDelta, TimeZone, Utc};

use ac_protocol::{Dataset, FloatId, Sample};

use crate::error::{FetchError, FetchResult};
use crate::fetcher::DatasetFetcher;

/// Pressure levels (dbar) sampled by every synthetic profile.
const LEVELS: &[f64] = &[5.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 1500.0, 2000.0];

/// A mock fetcher that serves pre-loaded datasets by id and records calls.
pub struct MockFetcher {
    floats: HashMap<FloatId, Arc<Dataset>>,
    /// Ids that fail with an HTTP error instead of returning data.
    broken: HashSet<FloatId>,
    calls: Mutex<Vec<FloatId>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            floats: HashMap::new(),
            broken: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add (or replace) a dataset.
    pub fn add_float(&mut self, dataset: Dataset) {
        self.floats.insert(dataset.float_id(), Arc::new(dataset));
    }

    /// Make `float_id` fail with a transport error.
    pub fn break_float(&mut self, float_id: FloatId) {
        self.broken.insert(float_id);
    }

    /// Three synthetic Indian Ocean floats: 2903893, 2903892, 6902746.
    pub fn with_sample_floats() -> Self {
        let mut m = Self::new();
        m.add_float(synthetic_float(FloatId(2903893), 15.2, 65.5, 28.5, 5));
        m.add_float(synthetic_float(FloatId(2903892), 12.0, 88.0, 29.2, 4));
        m.add_float(synthetic_float(FloatId(6902746), -20.0, 75.0, 24.0, 6));
        m
    }

    /// Ids that have been requested, in call order.
    pub fn calls(&self) -> Vec<FloatId> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Ids this mock can serve, sorted.
    pub fn float_ids(&self) -> Vec<FloatId> {
        let mut ids: Vec<_> = self.floats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetFetcher for MockFetcher {
    async fn fetch(&self, float_id: FloatId) -> FetchResult<Arc<Dataset>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(float_id);

        if self.broken.contains(&float_id) {
            return Err(FetchError::Http(format!(
                "connection reset while fetching {float_id}"
            )));
        }
        self.floats
            .get(&float_id)
            .cloned()
            .ok_or(FetchError::NotFound(float_id))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Build a drifting float with `cycles` profiles ten days apart.
///
/// Temperature decays with depth from `surface_temp` toward ~2 °C; salinity
/// has a shallow maximum around 100 dbar.
pub fn synthetic_float(
    float_id: FloatId,
    start_lat: f64,
    start_lon: f64,
    surface_temp: f64,
    cycles: u32,
) -> Dataset {
    let start = Utc.with_ymd_and_hms(2024, 1, 5, 3, 30, 0).single();
    let mut samples = Vec::new();
    for cycle in 1..=cycles {
        let drift = f64::from(cycle);
        let time = start.map(|t| t + TimeDelta::days(10 * i64::from(cycle - 1)));
        for &pres in LEVELS {
            let temperature = 2.0 + (surface_temp - 2.0) * (-pres / 600.0).exp() - 0.05 * drift;
            let salinity = 34.8 + 0.6 * (-((pres - 100.0) / 150.0).powi(2)).exp();
            samples.push(Sample {
                cycle_number: Some(cycle),
                time,
                latitude: Some(start_lat + 0.15 * drift),
                longitude: Some(start_lon - 0.25 * drift),
                pressure: Some(pres),
                temperature: Some(temperature),
                salinity: Some(salinity),
            });
        }
    }
    Dataset::from_samples(float_id, samples)
}
