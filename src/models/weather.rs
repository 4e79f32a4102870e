use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{FetchError, PollerError, Result};
use crate::models::Locality;

/// Conditions at one locality at the moment it was fetched.
///
/// Every measurement is optional: the provider reports `null` for sensors a
/// locality does not have. Measurements are kept exactly as reported; only the
/// configured locality fields are validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherRecord {
    #[serde(rename = "locality")]
    #[validate(length(min = 1))]
    pub locality_id: String,

    pub locality_name: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    // °C
    pub temperature: Option<f64>,

    // %
    pub humidity: Option<f64>,

    // accumulated mm
    pub rainfall: Option<f64>,

    // mm/h
    pub rain_intensity: Option<f64>,

    // km/h
    pub wind_speed: Option<f64>,

    // degrees
    pub wind_direction: Option<f64>,

    pub timestamp: DateTime<Local>,
}

impl WeatherRecord {
    pub fn builder() -> WeatherRecordBuilder {
        WeatherRecordBuilder::new()
    }

    pub fn has_measurements(&self) -> bool {
        self.temperature.is_some()
            || self.humidity.is_some()
            || self.rainfall.is_some()
            || self.rain_intensity.is_some()
            || self.wind_speed.is_some()
            || self.wind_direction.is_some()
    }
}

#[derive(Debug, Default)]
pub struct WeatherRecordBuilder {
    locality_id: Option<String>,
    locality_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    temperature: Option<f64>,
    humidity: Option<f64>,
    rainfall: Option<f64>,
    rain_intensity: Option<f64>,
    wind_speed: Option<f64>,
    wind_direction: Option<f64>,
    timestamp: Option<DateTime<Local>>,
}

impl WeatherRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies id, name and coordinates from a configured locality.
    pub fn locality(mut self, locality: &Locality) -> Self {
        self.locality_id = Some(locality.id.clone());
        // an empty name is written as an empty cell, which reads back as None
        self.locality_name = locality.name.clone().filter(|n| !n.is_empty());
        self.latitude = locality.latitude;
        self.longitude = locality.longitude;
        self
    }

    pub fn locality_id(mut self, id: impl Into<String>) -> Self {
        self.locality_id = Some(id.into());
        self
    }

    pub fn temperature(mut self, value: Option<f64>) -> Self {
        self.temperature = value;
        self
    }

    pub fn humidity(mut self, value: Option<f64>) -> Self {
        self.humidity = value;
        self
    }

    pub fn rainfall(mut self, value: Option<f64>) -> Self {
        self.rainfall = value;
        self
    }

    pub fn rain_intensity(mut self, value: Option<f64>) -> Self {
        self.rain_intensity = value;
        self
    }

    pub fn wind_speed(mut self, value: Option<f64>) -> Self {
        self.wind_speed = value;
        self
    }

    pub fn wind_direction(mut self, value: Option<f64>) -> Self {
        self.wind_direction = value;
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> Result<WeatherRecord> {
        let locality_id = self
            .locality_id
            .ok_or_else(|| PollerError::config("locality id is required"))?;

        let record = WeatherRecord {
            locality_id,
            locality_name: self.locality_name,
            latitude: self.latitude,
            longitude: self.longitude,
            temperature: self.temperature,
            humidity: self.humidity,
            rainfall: self.rainfall,
            rain_intensity: self.rain_intensity,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            timestamp: self.timestamp.unwrap_or_else(Local::now),
        };

        record.validate()?;
        Ok(record)
    }
}

/// A locality that could not be fetched during a run.
#[derive(Debug)]
pub struct FetchFailure {
    pub locality_id: String,
    pub key_index: usize,
    pub error: FetchError,
}

/// Everything collected during one run, in locality order.
#[derive(Debug)]
pub struct OutputBatch {
    started_at: DateTime<Local>,
    records: Vec<WeatherRecord>,
    failures: Vec<FetchFailure>,
}

impl OutputBatch {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            records: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn push_record(&mut self, record: WeatherRecord) {
        self.records.push(record);
    }

    pub fn push_failure(&mut self, failure: FetchFailure) {
        self.failures.push(failure);
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn failures(&self) -> &[FetchFailure] {
        &self.failures
    }

    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} localities attempted: {} succeeded, {} failed",
            self.attempted(),
            self.records.len(),
            self.failures.len()
        )
    }
}
