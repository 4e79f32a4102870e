/// Weather Union API
pub const DEFAULT_BASE_URL: &str =
    "https://www.weatherunion.com/gw/weather/external/v0/get_locality_weather_data";
pub const API_KEY_HEADER: &str = "x-zomato-api-key";
pub const LOCALITY_QUERY_PARAM: &str = "locality_id";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration
pub const DEFAULT_CONFIG_NAME: &str = "config";
pub const ENV_PREFIX: &str = "LOCALITY_WEATHER";
pub const ENV_SEPARATOR: &str = "__";
pub const API_KEY_COLUMN: &str = "API_KEY";

/// Output layout
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const OUTPUT_FILE_PREFIX: &str = "weather_data_";
pub const DATE_DIR_FORMAT: &str = "%Y%m%d";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// CSV column order
pub const CSV_COLUMNS: [&str; 11] = [
    "locality",
    "locality_name",
    "latitude",
    "longitude",
    "temperature",
    "humidity",
    "rainfall",
    "rain_intensity",
    "wind_speed",
    "wind_direction",
    "timestamp",
];
