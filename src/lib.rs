//! bplot: B-RISK results, tenability and plots
//!
//! Loads the result export of the B-RISK fire zone model, computes the
//! Fractional Effective Dose (FED) an occupant receives and produces report
//! ready figures.
//!
//! # Architecture
//!
//! bplot is built in three layers:
//!
//! 1. **Results** ([`results`])
//!    - Finds the log, input file and results workbook of a run (folder or zip)
//!    - Exposes one time series table per room plus `Outside`
//!
//! 2. **Tenability** ([`tenability`])
//!    - FED_CO and FED_thermal along an egress path
//!    - Dose models behind the [`tenability::DoseModel`] trait
//!
//! 3. **Output** ([`output`])
//!    - Figures with event, tenability and user annotations (PNG/SVG)
//!    - CSV export
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bplot::prelude::*;
//!
//! // 1. Load a run
//! let results = BriskResults::open("runs/apartment.zip")?;
//!
//! // 2. Plot a result column for every room
//! results.plot_upper_layer_temp(None, true)?.save("upper_layer_temp.png")?;
//!
//! // 3. Walk an egress path
//! let path = EgressPath::new(["Bedroom", "Hall"], [120.0])?;
//! let options = FedOptions::default();
//! let fed = results.calculate_fed_co_path(&path, &options)?;
//! println!("FED_CO reaches 0.3 at {:?} s", fed.threshold_time(0.3));
//!
//! results.plot_fed_co_path(&path, &options)?.save("fed_co_path.svg")?;
//! ```
//!
//! # Modules
//!
//! - [`results`]: Loading B-RISK exports
//! - [`tenability`]: FED calculations
//! - [`output`]: Figures and CSV export
//!
//! # Features
//!
//! - `parallel`: per-room FED curves are computed with rayon

pub mod output;
pub mod results;
pub mod tenability;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use bplot::prelude::*;
    //! ```
    pub use crate::output::export::{export_fed_csv, export_table_csv, CsvConfig};
    pub use crate::output::visualization::{Figure, PlotConfig, Variable};
    pub use crate::results::{BriskResults, ResultTable, RoomGeometry};
    pub use crate::tenability::{CoDose, DoseModel, EgressPath, FedCurve, FedOptions, ThermalDose};
}
