//! Layered configuration: defaults, then an optional config file, then
//! `LOCALITY_WEATHER__*` environment variables.

use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use validator::Validate;

use crate::error::{PollerError, Result};
use crate::models::{ApiKey, Locality};
use crate::readers::{KeyReader, LocalityReader};
use crate::utils::constants::{
    DEFAULT_BASE_URL, DEFAULT_CONFIG_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS, ENV_PREFIX,
    ENV_SEPARATOR,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default, deserialize_with = "string_list")]
    pub keys: Vec<String>,

    #[serde(default)]
    pub keys_csv: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListItem {
    Text(String),
    Number(i64),
}

impl ListItem {
    fn into_string(self) -> String {
        match self {
            ListItem::Text(s) => s,
            ListItem::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListValue {
    Many(Vec<ListItem>),
    One(ListItem),
}

/// Lists come as arrays from config files and as comma-separated strings from
/// the environment. Values are never reinterpreted, so `007123` stays `007123`.
fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match ListValue::deserialize(deserializer)? {
        ListValue::Many(items) => items.into_iter().map(ListItem::into_string).collect(),
        ListValue::One(item) => item
            .into_string()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    };
    Ok(values)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            keys: Vec::new(),
            keys_csv: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalitySettings {
    #[serde(default, deserialize_with = "string_list")]
    pub ids: Vec<String>,

    #[serde(default)]
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub base_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            base_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub localities: LocalitySettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Fully resolved, read-only inputs for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api: ApiSettings,
    pub localities: Vec<Locality>,
    pub keys: Vec<ApiKey>,
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Load from `path` (required when given) or `./config.*` (optional), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
    }

    pub(crate) fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let file = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(PollerError::config(format!(
                        "config file not found: {}",
                        p.display()
                    )));
                }
                File::from(p).required(true)
            }
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = Config::builder().add_source(file).add_source(env).build()?;
        let app: AppConfig = config.try_deserialize()?;

        if app.api.timeout_secs == 0 {
            return Err(PollerError::config("api.timeout_secs must be greater than zero"));
        }

        debug!(
            localities = ?app.localities,
            output = %app.output.base_dir.display(),
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Read CSV sources and merge them with inline lists. Does not reject empty lists;
    /// the key rotator and batch runner do that before any request is made.
    pub fn resolve(self) -> Result<RunConfig> {
        let mut localities: Vec<Locality> =
            self.localities.ids.iter().map(Locality::new).collect();
        if let Some(path) = &self.localities.csv {
            localities.extend(LocalityReader::new().read_localities(path)?);
        }

        for locality in &localities {
            locality.validate().map_err(|e| {
                PollerError::config(format!("invalid locality '{}': {}", locality.id, e))
            })?;
        }

        let mut keys: Vec<ApiKey> = self
            .api
            .keys
            .iter()
            .map(|k| ApiKey::new(k.as_str()))
            .collect();
        if let Some(path) = &self.api.keys_csv {
            keys.extend(KeyReader::new().read_keys(path)?);
        }

        info!(
            localities = localities.len(),
            keys = keys.len(),
            "Resolved run configuration"
        );

        Ok(RunConfig {
            api: self.api,
            localities,
            keys,
            output_dir: self.output.base_dir,
        })
    }
}
