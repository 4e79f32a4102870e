//! Weather Union locality weather client.

use async_trait::async_trait;
use chrono::Local;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::ApiSettings;
use crate::error::{FetchError, PollerError, Result};
use crate::fetchers::LocalityFetcher;
use crate::models::{ApiKey, Locality, WeatherRecord};
use crate::utils::constants::{API_KEY_HEADER, LOCALITY_QUERY_PARAM};

#[derive(Debug, Deserialize)]
pub struct WeatherUnionResponse {
    pub status: Option<serde_json::Value>,
    pub message: Option<String>,
    pub locality_weather_data: Option<LocalityWeatherData>,
}

#[derive(Debug, Deserialize)]
pub struct LocalityWeatherData {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub rain_intensity: Option<f64>,
    pub rain_accumulation: Option<f64>,
}

impl WeatherUnionResponse {
    /// The body carries its own status; anything other than 200 is an API error.
    fn api_status_error(&self) -> Option<FetchError> {
        let status = match &self.status {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return None,
        };

        if status == "200" {
            None
        } else {
            Some(FetchError::Api {
                status,
                message: self.message.clone().unwrap_or_default(),
            })
        }
    }

    pub fn into_record(
        self,
        locality: &Locality,
    ) -> std::result::Result<WeatherRecord, FetchError> {
        if let Some(err) = self.api_status_error() {
            return Err(err);
        }

        let data = self.locality_weather_data.ok_or_else(|| {
            FetchError::MalformedResponse("missing locality_weather_data".to_string())
        })?;

        WeatherRecord::builder()
            .locality(locality)
            .temperature(data.temperature)
            .humidity(data.humidity)
            .rainfall(data.rain_accumulation)
            .rain_intensity(data.rain_intensity)
            .wind_speed(data.wind_speed)
            .wind_direction(data.wind_direction)
            .timestamp(Local::now())
            .build()
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct WeatherUnionClient {
    client: Client,
    base_url: String,
}

impl WeatherUnionClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let url = reqwest::Url::parse(&settings.base_url).map_err(|e| {
            PollerError::config(format!("invalid api.base_url '{}': {}", settings.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PollerError::config(format!(
                "api.base_url must be http or https, got '{}'",
                settings.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| PollerError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LocalityFetcher for WeatherUnionClient {
    #[instrument(skip_all, fields(locality = %locality.id, key = %key))]
    async fn fetch(
        &self,
        locality: &Locality,
        key: &ApiKey,
    ) -> std::result::Result<WeatherRecord, FetchError> {
        let resp = self
            .client
            .get(&self.base_url)
            .header(API_KEY_HEADER, key.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(&[(LOCALITY_QUERY_PARAM, locality.id.as_str())])
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(key = %key, "Quota limit reached");
            return Err(FetchError::QuotaExceeded);
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        let bytes = resp.bytes().await.map_err(FetchError::Network)?;
        let body: WeatherUnionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        debug!(status = ?body.status, "Received locality weather data");
        body.into_record(locality)
    }
}
