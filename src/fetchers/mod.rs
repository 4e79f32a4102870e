pub mod weather_union;

pub use weather_union::WeatherUnionClient;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{ApiKey, Locality, WeatherRecord};

/// One request for one locality with one credential. No retries.
#[async_trait]
pub trait LocalityFetcher: Send + Sync {
    async fn fetch(&self, locality: &Locality, key: &ApiKey) -> Result<WeatherRecord, FetchError>;
}

#[async_trait]
impl<T: LocalityFetcher + ?Sized> LocalityFetcher for &T {
    async fn fetch(&self, locality: &Locality, key: &ApiKey) -> Result<WeatherRecord, FetchError> {
        (**self).fetch(locality, key).await
    }
}
