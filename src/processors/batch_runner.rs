use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::error::{FetchError, PollerError, Result};
use crate::fetchers::LocalityFetcher;
use crate::models::{FetchFailure, Locality, OutputBatch};
use crate::processors::KeyRotator;
use crate::utils::progress::ProgressReporter;

/// Fetches every configured locality once, in order, pairing the i-th
/// locality with the i-th rotated key.
pub struct BatchRunner<F> {
    fetcher: F,
    rotator: KeyRotator,
}

impl<F: LocalityFetcher> BatchRunner<F> {
    pub fn new(fetcher: F, rotator: KeyRotator) -> Self {
        Self { fetcher, rotator }
    }

    /// Best effort: a failed locality is recorded and the run continues.
    /// Only an empty locality list is fatal, and that is checked before any request.
    pub async fn run(
        &self,
        localities: &[Locality],
        progress: Option<&ProgressReporter>,
    ) -> Result<OutputBatch> {
        if localities.is_empty() {
            return Err(PollerError::config("no localities configured"));
        }

        info!(
            localities = localities.len(),
            keys = self.rotator.len(),
            max_calls_per_key = self.rotator.max_calls_per_key(localities.len()),
            "Starting batch"
        );

        let mut batch = OutputBatch::new(Local::now());

        for (index, locality) in localities.iter().enumerate() {
            if let Some(p) = progress {
                p.set_message(&format!("Fetching {}", locality.display_name()));
            }

            let key = self.rotator.key_for(index);
            match self.fetcher.fetch(locality, key).await {
                Ok(record) => {
                    if !record.has_measurements() {
                        debug!(locality = %locality.id, "No measurements reported");
                    }
                    batch.push_record(record);
                }
                Err(err) => {
                    match &err {
                        FetchError::QuotaExceeded => warn!(
                            locality = %locality.id,
                            key = %key,
                            "Skipping locality: quota exhausted"
                        ),
                        _ => error!(
                            locality = %locality.id,
                            key = %key,
                            error = %err,
                            "Fetch failed"
                        ),
                    }
                    batch.push_failure(FetchFailure {
                        locality_id: locality.id.clone(),
                        key_index: self.rotator.slot_for(index),
                        error: err,
                    });
                }
            }

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        info!("{}", batch.summary());
        Ok(batch)
    }
}
