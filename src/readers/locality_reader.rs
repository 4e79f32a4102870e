use crate::error::{PollerError, Result};
use crate::models::Locality;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct LocalityRow {
    #[serde(rename = "localityId")]
    locality_id: String,
    #[serde(rename = "localityName", default)]
    locality_name: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

pub struct LocalityReader {
    skip_blank_ids: bool,
}

impl LocalityReader {
    pub fn new() -> Self {
        Self {
            skip_blank_ids: true,
        }
    }

    pub fn with_skip_blank_ids(skip_blank_ids: bool) -> Self {
        Self { skip_blank_ids }
    }

    /// Read localities from a CSV with a `localityId` column and optional
    /// `localityName`, `latitude`, `longitude` columns. Row order is kept.
    pub fn read_localities(&self, path: &Path) -> Result<Vec<Locality>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                PollerError::config(format!(
                    "cannot read locations file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        let mut localities = Vec::new();
        for (line, row) in reader.deserialize::<LocalityRow>().enumerate() {
            let row = row.map_err(|e| {
                PollerError::config(format!(
                    "invalid row {} in '{}': {}",
                    line + 2,
                    path.display(),
                    e
                ))
            })?;

            if row.locality_id.is_empty() {
                if self.skip_blank_ids {
                    continue;
                }
                return Err(PollerError::config(format!(
                    "blank localityId on row {} in '{}'",
                    line + 2,
                    path.display()
                )));
            }

            localities.push(Locality {
                id: row.locality_id,
                name: row.locality_name.filter(|n| !n.is_empty()),
                latitude: row.latitude,
                longitude: row.longitude,
            });
        }

        Ok(localities)
    }
}

impl Default for LocalityReader {
    fn default() -> Self {
        Self::new()
    }
}
