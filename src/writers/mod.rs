pub mod csv_writer;

pub use csv_writer::{read_csv, CsvWriter, WriteSummary};
