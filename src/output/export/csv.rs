//! CSV export of result tables and FED curves
//!
//! Files open in Excel, pandas and most analysis tools.
//!
//! ## Result table
//!
//! ```rust,ignore
//! use bplot::output::export::export_table_csv;
//!
//! export_table_csv(results.table("Lounge")?, "lounge.csv", None)?;
//! ```
//!
//! **Output** (`lounge.csv`):
//! ```csv
//! Time (sec),Layer Height (m),Upper Layer Temp (C),...
//! 0.000000,2.400000,20.000000,...
//! ```
//!
//! ## FED curve with metadata
//!
//! ```rust,ignore
//! use bplot::output::export::{export_fed_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::for_run("runs/apartment.zip", "Bedroom (0-120s) - Hall (120-600s)");
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_fed_csv(&fed, "FED_CO", "fed_co.csv", Some(&config))?;
//! ```
//!
//! **Output** (`fed_co.csv`):
//! ```csv
//! # B-RISK results
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Source: runs/apartment.zip
//! # Room: Bedroom (0-120s) - Hall (120-600s)
//! #
//! Time (s),FED_CO
//! 0.000000,0.000000
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::results::ResultTable;
use crate::tenability::FedCurve;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for CSV export
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include the `#` metadata header (default: false)
    pub include_metadata: bool,

    pub metadata: Option<CsvMetadata>,

    /// Header of the time column of FED files (default: "Time (s)")
    pub time_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (s)".to_string(),
        }
    }
}

impl CsvConfig {
    /// Semicolon delimited with decimal commas
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Header comments; only the fields that are set are written
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Results folder or archive the data was read from
    pub source: Option<String>,

    /// Room, or egress path description
    pub room: Option<String>,

    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn for_run(source: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            room: Some(room.into()),
            ..Default::default()
        }
    }

    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn write_metadata_header(out: &mut impl Write, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(out, "# B-RISK results")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(source) = &metadata.source {
        writeln!(out, "# Source: {}", source)?;
    }
    if let Some(room) = &metadata.room {
        writeln!(out, "# Room: {}", room)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Number with the configured precision and decimal separator; empty when not finite
fn format_number(value: f64, config: &CsvConfig) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let formatted = format!("{:.prec$}", value, prec = config.precision);
    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Quote a header field holding the delimiter or a quote
fn format_header(field: &str, config: &CsvConfig) -> String {
    if field.contains(config.delimiter) || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn create(path: &Path, config: &CsvConfig) -> Result<BufWriter<File>, Box<dyn Error>> {
    let mut out = BufWriter::new(File::create(path)?);
    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(&mut out, metadata)?;
        }
    }
    Ok(out)
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export every column of a result table, in table order.
///
/// Missing (non-finite) values are left empty.
pub fn export_table_csv(
    table: &ResultTable,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    if table.is_empty() {
        return Err(format!("Empty data: table '{}' has no rows", table.name()).into());
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let delimiter = configuration.delimiter.to_string();

    let columns = table
        .columns()
        .iter()
        .map(|c| table.column(c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = create(output_path.as_ref(), configuration)?;

    let header: Vec<String> = table.columns().iter().map(|c| format_header(c, configuration)).collect();
    writeln!(out, "{}", header.join(&delimiter))?;

    for i in 0..table.len() {
        let row: Vec<String> = columns.iter().map(|c| format_number(c[i], configuration)).collect();
        writeln!(out, "{}", row.join(&delimiter))?;
    }

    out.flush()?;
    Ok(())
}

/// Export a FED curve as `time, <label>` rows
pub fn export_fed_csv(
    curve: &FedCurve,
    label: &str,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    if curve.is_empty() {
        return Err(format!("Empty data: {label} curve has no points").into());
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut out = create(output_path.as_ref(), configuration)?;

    writeln!(
        out,
        "{}{}{}",
        format_header(&configuration.time_header, configuration),
        configuration.delimiter,
        format_header(label, configuration)
    )?;

    for (time, value) in curve.times().iter().zip(curve.values()) {
        writeln!(
            out,
            "{}{}{}",
            format_number(*time, configuration),
            configuration.delimiter,
            format_number(*value, configuration)
        )?;
    }

    out.flush()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
