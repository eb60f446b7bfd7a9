//! In-memory measurement history of a single float.
//!
//! Stored column-wise: every column has one entry per sample, and the sample
//! order is the order the archive returned them in (chronological by cycle).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::float::{FloatId, Variable};

/// One measurement row as delivered by the archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub cycle_number: Option<u32>,
    pub time: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
    pub salinity: Option<f64>,
}

/// Read-only dataset handle for one float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    float_id: FloatId,
    cycle_number: Vec<Option<u32>>,
    time: Vec<Option<DateTime<Utc>>>,
    latitude: Vec<Option<f64>>,
    longitude: Vec<Option<f64>>,
    pressure: Vec<Option<f64>>,
    temperature: Vec<Option<f64>>,
    salinity: Vec<Option<f64>>,
}

impl Dataset {
    pub fn from_samples(float_id: FloatId, samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut ds = Self {
            float_id,
            cycle_number: Vec::new(),
            time: Vec::new(),
            latitude: Vec::new(),
            longitude: Vec::new(),
            pressure: Vec::new(),
            temperature: Vec::new(),
            salinity: Vec::new(),
        };
        for s in samples {
            ds.cycle_number.push(s.cycle_number);
            ds.time.push(s.time);
            ds.latitude.push(s.latitude);
            ds.longitude.push(s.longitude);
            ds.pressure.push(s.pressure);
            ds.temperature.push(s.temperature);
            ds.salinity.push(s.salinity);
        }
        ds
    }

    pub fn float_id(&self) -> FloatId {
        self.float_id
    }

    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Measurement column for a profile variable.
    pub fn column(&self, variable: Variable) -> &[Option<f64>] {
        match variable {
            Variable::Temperature => &self.temperature,
            Variable::Salinity => &self.salinity,
            Variable::Pressure => &self.pressure,
        }
    }

    pub fn latitude(&self) -> &[Option<f64>] {
        &self.latitude
    }

    pub fn longitude(&self) -> &[Option<f64>] {
        &self.longitude
    }

    pub fn cycle_number(&self) -> &[Option<u32>] {
        &self.cycle_number
    }

    pub fn time(&self) -> &[Option<DateTime<Utc>>] {
        &self.time
    }

    /// Latitude of the last sample.
    pub fn latest_latitude(&self) -> Option<f64> {
        self.latitude.last().copied().flatten()
    }

    /// Longitude of the last sample.
    pub fn latest_longitude(&self) -> Option<f64> {
        self.longitude.last().copied().flatten()
    }

    pub fn latest_cycle(&self) -> Option<u32> {
        self.cycle_number.last().copied().flatten()
    }

    pub fn latest_time(&self) -> Option<DateTime<Utc>> {
        self.time.last().copied().flatten()
    }

    /// All samples that carry both coordinates, in sample order.
    pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.latitude
            .iter()
            .zip(&self.longitude)
            .filter_map(|(lat, lon)| Some(((*lat)?, (*lon)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(cycle: u32, lat: Option<f64>, lon: Option<f64>, pres: f64) -> Sample {
        Sample {
            cycle_number: Some(cycle),
            time: Some(Utc.with_ymd_and_hms(2024, 3, cycle, 6, 0, 0).unwrap()),
            latitude: lat,
            longitude: lon,
            pressure: Some(pres),
            temperature: Some(28.0 - pres / 100.0),
            salinity: None,
        }
    }

    #[test]
    fn columns_stay_aligned() {
        let ds = Dataset::from_samples(
            FloatId(2903893),
            vec![
                sample(1, Some(10.5), Some(70.1), 5.0),
                sample(2, None, Some(70.4), 500.0),
                sample(3, Some(11.0), Some(71.0), 1000.0),
            ],
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column(Variable::Pressure)[1], Some(500.0));
        assert_eq!(ds.column(Variable::Temperature)[2], Some(18.0));
        assert!(ds.column(Variable::Salinity).iter().all(Option::is_none));
    }

    #[test]
    fn latest_values_come_from_last_sample() {
        let ds = Dataset::from_samples(
            FloatId(2903893),
            vec![
                sample(1, Some(10.5), Some(70.1), 5.0),
                sample(2, Some(11.0), None, 10.0),
            ],
        );
        assert_eq!(ds.latest_cycle(), Some(2));
        assert_eq!(ds.latest_latitude(), Some(11.0));
        // Missing in the last sample stays missing; no look-back.
        assert_eq!(ds.latest_longitude(), None);
        assert_eq!(
            ds.latest_time().unwrap().format("%Y-%m-%d").to_string(),
            "2024-03-02"
        );
    }

    #[test]
    fn positions_skip_partial_fixes() {
        let ds = Dataset::from_samples(
            FloatId(1),
            vec![
                sample(1, Some(1.0), Some(2.0), 0.0),
                sample(2, None, Some(3.0), 0.0),
                sample(3, Some(4.0), Some(5.0), 0.0),
            ],
        );
        let pos: Vec<_> = ds.positions().collect();
        assert_eq!(pos, vec![(1.0, 2.0), (4.0, 5.0)]);
    }

    #[test]
    fn empty_dataset() {
        let ds = Dataset::from_samples(FloatId(1), Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.latest_cycle(), None);
        assert_eq!(ds.positions().count(), 0);
    }
}
