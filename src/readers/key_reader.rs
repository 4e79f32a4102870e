use crate::error::{PollerError, Result};
use crate::models::ApiKey;
use crate::utils::constants::API_KEY_COLUMN;
use std::path::Path;

pub struct KeyReader {
    column: String,
}

impl KeyReader {
    pub fn new() -> Self {
        Self {
            column: API_KEY_COLUMN.to_string(),
        }
    }

    pub fn with_column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Read keys from the named column, skipping blank cells.
    pub fn read_keys(&self, path: &Path) -> Result<Vec<ApiKey>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                PollerError::config(format!("cannot read keys file '{}': {}", path.display(), e))
            })?;

        let headers = reader.headers()?.clone();
        let column = headers
            .iter()
            .position(|h| h == self.column)
            .ok_or_else(|| {
                PollerError::config(format!(
                    "column '{}' not found in '{}'",
                    self.column,
                    path.display()
                ))
            })?;

        let mut keys = Vec::new();
        for record in reader.records() {
            let record = record?;
            if let Some(value) = record.get(column) {
                let key = ApiKey::new(value);
                if !key.is_blank() {
                    keys.push(key);
                }
            }
        }

        Ok(keys)
    }
}

impl Default for KeyReader {
    fn default() -> Self {
        Self::new()
    }
}
