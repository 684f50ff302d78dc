//! Tenability: Fractional Effective Dose along an egress path
//!
//! An occupant walks through a sequence of rooms ([`EgressPath`]). In every
//! room the dose is accumulated from that room's results between the times
//! the occupant enters and leaves it, giving one [`FedCurve`] per path.
//!
//! Two dose models are provided, both following the NZ C/VM2 verification
//! method:
//!
//! - [`CoDose`]: carbon monoxide with CO2 hyperventilation and hypoxia
//! - [`ThermalDose`]: convected and radiated heat
//!
//! # Example
//!
//! ```rust,ignore
//! use bplot::results::BriskResults;
//! use bplot::tenability::{EgressPath, FedOptions};
//!
//! let results = BriskResults::open("runs/apartment")?;
//! let path = EgressPath::new(["Bedroom", "Hall"], [120.0])?;
//! let fed = results.calculate_fed_co_path(&path, &FedOptions::default())?;
//! println!("{:?}", fed.threshold_time(0.3));
//! ```

pub mod co;
pub mod curve;
pub mod path;
pub mod thermal;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use co::CoDose;
pub use curve::FedCurve;
pub use path::EgressPath;
pub use thermal::ThermalDose;

use crate::results::{BriskResults, Result, RoomGeometry};

// =================================================================================================
// Options
// =================================================================================================

/// Parameters shared by the dose calculations
#[derive(Debug, Clone, PartialEq)]
pub struct FedOptions {
    /// Height of the occupant's head above the floor (m)
    pub monitoring_height: f64,

    /// FED considered untenable
    pub threshold: f64,
}

impl Default for FedOptions {
    fn default() -> Self {
        Self {
            monitoring_height: 2.0,
            threshold: 0.3,
        }
    }
}

impl FedOptions {
    pub fn with_monitoring_height(mut self, height: f64) -> Self {
        self.monitoring_height = height;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

// =================================================================================================
// Dose model trait
// =================================================================================================

/// A dose accumulated step by step from room results
///
/// The calculation driver reads [`DoseModel::columns`] from the room table,
/// averages every pair of consecutive samples and asks the model for the dose
/// received over that step.
pub trait DoseModel: Send + Sync {
    /// Name used in logs and plot labels
    fn name(&self) -> &str;

    /// Columns read from the room results, in the order `increment` expects
    fn columns(&self) -> &[&'static str];

    /// Dose received over one step.
    ///
    /// `means` holds the mean of the two samples for every column of
    /// [`DoseModel::columns`]; `dt_minutes` is the step length.
    fn increment(&self, means: &[f64], dt_minutes: f64, room: &RoomGeometry, options: &FedOptions) -> f64;
}

// =================================================================================================
// Calculation
// =================================================================================================

impl BriskResults {
    /// FED_CO along an egress path
    pub fn calculate_fed_co_path(&self, path: &EgressPath, options: &FedOptions) -> Result<FedCurve> {
        self.calculate_fed_path(&CoDose, path, options)
    }

    /// FED_thermal along an egress path
    pub fn calculate_fed_thermal_path(&self, path: &EgressPath, options: &FedOptions) -> Result<FedCurve> {
        self.calculate_fed_path(&ThermalDose, path, options)
    }

    /// Accumulate any dose model along an egress path and log a summary.
    ///
    /// A path without a final transition time ends at the last time of the
    /// first room's results.
    pub fn calculate_fed_path<M: DoseModel + ?Sized>(
        &self,
        model: &M,
        path: &EgressPath,
        options: &FedOptions,
    ) -> Result<FedCurve> {
        let end_time = self.path_end_time(path)?;

        let mut curve = FedCurve::new();
        for (room, t0, t1) in path.segments(end_time) {
            accumulate_segment(self, model, room, t0, t1, options, &mut curve)?;
        }

        log_summary(model.name(), &path.describe(end_time), &curve, options.threshold);
        Ok(curve)
    }

    /// End of the last segment of a path without a final transition time:
    /// the last time in the results of the path's first room
    pub fn path_end_time(&self, path: &EgressPath) -> Result<f64> {
        match path.rooms().first() {
            Some(first) => self.room(first)?.table.max_time(),
            None => Ok(0.0),
        }
    }

    /// FED of an occupant staying in each room for the whole run.
    ///
    /// `rooms` defaults to every room. With the `parallel` feature the rooms
    /// are computed on the rayon thread pool.
    pub fn calculate_room_feds<M: DoseModel>(
        &self,
        model: &M,
        rooms: Option<&[&str]>,
        options: &FedOptions,
    ) -> Result<Vec<(String, FedCurve)>> {
        let names: Vec<String> = match rooms {
            Some(rooms) => rooms.iter().map(|r| r.to_string()).collect(),
            None => self.room_names().into_iter().map(str::to_string).collect(),
        };

        let single = |name: String| -> Result<(String, FedCurve)> {
            let curve = self.calculate_fed_path(model, &EgressPath::single(name.as_str()), options)?;
            Ok((name, curve))
        };

        #[cfg(feature = "parallel")]
        let curves = names.into_par_iter().map(single).collect();

        #[cfg(not(feature = "parallel"))]
        let curves = names.into_iter().map(single).collect();

        curves
    }
}

/// Add the dose received in `room` between `t0` and `t1` to `curve`
fn accumulate_segment<M: DoseModel + ?Sized>(
    results: &BriskResults,
    model: &M,
    room: &str,
    t0: f64,
    t1: f64,
    options: &FedOptions,
    curve: &mut FedCurve,
) -> Result<()> {
    let room = results.room(room)?;
    let segment = room.table.with_time(t0)?.with_time(t1)?.slice_between(t0, t1)?;

    let time = segment.time()?;
    let columns = model
        .columns()
        .iter()
        .map(|c| segment.column(c))
        .collect::<Result<Vec<_>>>()?;

    let mut means = vec![0.0; columns.len()];
    for i in 1..segment.len() {
        for (mean, column) in means.iter_mut().zip(&columns) {
            *mean = 0.5 * (column[i - 1] + column[i]);
        }

        let dt_minutes = (time[i] - time[i - 1]) / 60.0;
        curve.accumulate(time[i], model.increment(&means, dt_minutes, &room.geometry, options));
    }

    Ok(())
}

fn log_summary(name: &str, description: &str, curve: &FedCurve, threshold: f64) {
    match curve.threshold_time(threshold) {
        Some(t) => log::info!("{description}: {name} exceeds {threshold:.2} at {t:.0} s"),
        None => log::info!("{description}: Max {name} was {:.3}", curve.max()),
    }
}
