use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::utils::constants::{DATE_DIR_FORMAT, OUTPUT_FILE_PREFIX, TIMESTAMP_FORMAT};

/// Date partition folder: {base}/{YYYYMMDD}
pub fn date_partition_dir<Tz>(base: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    base.join(at.format(DATE_DIR_FORMAT).to_string())
}

/// Snapshot file name with format: weather_data_{YYYYMMDD_HHMMSS}.csv
pub fn snapshot_filename<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}{}.csv", OUTPUT_FILE_PREFIX, at.format(TIMESTAMP_FORMAT))
}

/// Full output path: {base}/{YYYYMMDD}/weather_data_{YYYYMMDD_HHMMSS}.csv
pub fn snapshot_path<Tz>(base: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date_partition_dir(base, at).join(snapshot_filename(at))
}
