use crate::error::Result;
use crate::models::{OutputBatch, WeatherRecord};
use crate::utils::constants::CSV_COLUMNS;
use crate::utils::filename::snapshot_path;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub failures: usize,
}

impl WriteSummary {
    pub fn summary(&self) -> String {
        format!(
            "Wrote {} records to {} ({} localities failed)",
            self.rows,
            self.path.display(),
            self.failures
        )
    }
}

pub struct CsvWriter {
    base_dir: PathBuf,
}

impl CsvWriter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Consume the batch and write it to {base}/{date}/weather_data_{timestamp}.csv,
    /// using the batch start time for both parts of the path.
    pub fn write_batch(&self, batch: OutputBatch) -> Result<WriteSummary> {
        let path = snapshot_path(&self.base_dir, &batch.started_at());
        let rows = self.write_records(batch.records(), &path)?;

        Ok(WriteSummary {
            path,
            rows,
            failures: batch.failures().len(),
        })
    }

    /// Header plus one row per record. The rows go to a temporary file next to
    /// `path` which is renamed into place once flushed, so a failed write leaves
    /// nothing behind.
    pub fn write_records(&self, records: &[WeatherRecord], path: &Path) -> Result<usize> {
        info!(path = %path.display(), rows = records.len(), "Writing CSV");

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut staging = NamedTempFile::new_in(&dir)?;
        {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(staging.as_file_mut());

            wtr.write_record(CSV_COLUMNS)?;
            for record in records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
        staging.as_file_mut().flush()?;
        staging.as_file().sync_all()?;
        staging.persist(path)?;

        info!(rows = records.len(), "CSV written successfully");
        Ok(records.len())
    }
}

/// Parse a file produced by [`CsvWriter`] back into records. Empty cells,
/// including an empty locality name, read back as `None`.
pub fn read_csv(path: &Path) -> Result<Vec<WeatherRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::{FetchFailure, Locality};
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record(id: &str, temperature: Option<f64>) -> WeatherRecord {
        WeatherRecord::builder()
            .locality(
                &Locality::new(id)
                    .with_name("Indiranagar, Bengaluru")
                    .with_coordinates(12.9719, 77.6412),
            )
            .temperature(temperature)
            .humidity(Some(55.5))
            .rainfall(Some(0.0))
            .wind_speed(None)
            .wind_direction(Some(135.0))
            .timestamp(Local.with_ymd_and_hms(2024, 6, 1, 14, 30, 5).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_header_and_rows() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");

        let written = CsvWriter::new(dir.path())
            .write_records(&[record("ZWL1", Some(21.5)), record("ZWL2", None)], &path)?;
        assert_eq!(written, 2);

        let content = fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_COLUMNS.join(","));
        assert!(lines[1].starts_with(
            "ZWL1,\"Indiranagar, Bengaluru\",12.9719,77.6412,21.5,55.5,0.0,,,135.0,"
        ));
        assert!(lines[2].starts_with("ZWL2,\"Indiranagar, Bengaluru\",12.9719,77.6412,,55.5"));

        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("out.csv");
        let original = vec![record("ZWL1", Some(-3.25)), record("ZWL2", None)];

        CsvWriter::new(dir.path()).write_records(&original, &path)?;
        let parsed = read_csv(&path)?;

        assert_eq!(parsed, original);
        Ok(())
    }

    #[test]
    fn test_write_batch_partitions_by_date() -> Result<()> {
        let dir = TempDir::new()?;
        let started = Local.with_ymd_and_hms(2024, 6, 1, 14, 30, 5).unwrap();

        let mut batch = OutputBatch::new(started);
        batch.push_record(record("ZWL1", Some(20.0)));
        batch.push_failure(FetchFailure {
            locality_id: "ZWL2".to_string(),
            key_index: 0,
            error: FetchError::QuotaExceeded,
        });

        let summary = CsvWriter::new(dir.path()).write_batch(batch)?;

        assert_eq!(
            summary.path,
            dir.path()
                .join("20240601")
                .join("weather_data_20240601_143005.csv")
        );
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.failures, 1);
        assert!(summary.path.exists());

        Ok(())
    }

    #[test]
    fn test_empty_batch_writes_header_only() -> Result<()> {
        let dir = TempDir::new()?;
        let batch = OutputBatch::new(Local::now());

        let summary = CsvWriter::new(dir.path()).write_batch(batch)?;

        let content = fs::read_to_string(&summary.path)?;
        assert_eq!(content.lines().count(), 1);
        assert_eq!(summary.rows, 0);

        Ok(())
    }

    #[test]
    fn test_no_staging_files_left_behind() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");

        CsvWriter::new(dir.path()).write_records(&[record("ZWL1", Some(1.0))], &path)?;

        let entries: Vec<_> = fs::read_dir(dir.path())?.collect::<std::io::Result<_>>()?;
        assert_eq!(entries.len(), 1);
        Ok(())
    }

    #[test]
    fn test_base_dir_is_a_file() -> Result<()> {
        let dir = TempDir::new()?;
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "occupied")?;

        let mut batch = OutputBatch::new(Local::now());
        batch.push_record(record("ZWL1", Some(20.0)));

        let err = CsvWriter::new(&blocker).write_batch(batch).unwrap_err();
        assert!(!err.is_config());
        assert_eq!(fs::read_to_string(&blocker)?, "occupied");

        let entries: Vec<_> = fs::read_dir(dir.path())?.collect::<std::io::Result<_>>()?;
        assert_eq!(entries.len(), 1);
        Ok(())
    }
}
