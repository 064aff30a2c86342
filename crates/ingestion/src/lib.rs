//! Data ingestion and normalization for the dayaxis system.
//!
//! This crate handles:
//! - Date decoding across ISO, European and US encodings
//! - Field records to raw rows, with header detection
//! - The per-date pre-pass (presence, bars, volumes)

pub mod date_normalizer;
pub mod day_table;
pub mod rows;

pub use date_normalizer::DateDecoder;
pub use day_table::{DayTable, IngestStats};
pub use rows::{parse_records, ParsedRecords};
