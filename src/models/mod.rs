pub mod api_key;
pub mod locality;
pub mod weather;

pub use api_key::ApiKey;
pub use locality::Locality;
pub use weather::{FetchFailure, OutputBatch, WeatherRecord};
