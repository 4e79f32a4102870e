pub mod key_reader;
pub mod locality_reader;

pub use key_reader::KeyReader;
pub use locality_reader::LocalityReader;
