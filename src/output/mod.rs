//! Output of B-RISK results
//!
//! - **Visualization**: PNG/SVG figures rendered with plotters
//! - **Export**: CSV files for further analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← Figures, annotations and the standard plots
//! │   ├── style.rs
//! │   ├── config.rs
//! │   ├── figure.rs
//! │   ├── annotations.rs
//! │   └── plots.rs
//! └── export/             ← Data export
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bplot::output::export::export_table_csv;
//!
//! results.plot_layer_height(None, true)?.save("layer_height.png")?;
//! export_table_csv(results.table("Lounge")?, "lounge.csv", None)?;
//! ```

pub mod export;
pub mod visualization;

pub use export::{export_fed_csv, export_table_csv, CsvConfig, CsvMetadata};
pub use visualization::{Figure, PlotConfig, Variable};
