//! Export of results for external analysis
//!
//! # Available formats
//!
//! | Format  | Module  | Content                              |
//! |---------|---------|--------------------------------------|
//! | CSV     | [`csv`] | Result tables, FED curves            |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use bplot::output::export::{export_fed_csv, export_table_csv, CsvConfig};
//!
//! export_table_csv(results.outside(), "outside.csv", None)?;
//! export_fed_csv(&fed, "FED_CO", "fed_co.csv", Some(&CsvConfig::european()))?;
//! ```

pub mod csv;

pub use csv::{export_fed_csv, export_table_csv, CsvConfig, CsvMetadata};
