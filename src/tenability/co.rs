//! FED for carbon monoxide (C/VM2)
//!
//! ```text
//! dFED = CO · dt · f / 35000              f = exp(CO2 / 5) when CO2 > 0.02 %
//!      + dt / exp(8.13 - 0.54 (20.9 - O2))   only when O2 < 13 %
//! ```
//!
//! `CO` in ppm, `CO2` and `O2` in %, `dt` in minutes. Species are taken from
//! the layer at the monitoring height.

use super::{DoseModel, FedOptions};
use crate::results::columns::{CO2_LOWER, CO2_UPPER, CO_LOWER, CO_UPPER, LAYER_HEIGHT, O2_LOWER, O2_UPPER};
use crate::results::RoomGeometry;

const COLUMNS: [&str; 7] = [
    LAYER_HEIGHT,
    CO2_UPPER,
    CO_UPPER,
    O2_UPPER,
    CO2_LOWER,
    CO_LOWER,
    O2_LOWER,
];

/// CO exposure dose, with hypoxia below 13 % oxygen
#[derive(Debug, Clone, Copy, Default)]
pub struct CoDose;

impl DoseModel for CoDose {
    fn name(&self) -> &str {
        "FED_CO"
    }

    fn columns(&self) -> &[&'static str] {
        &COLUMNS
    }

    fn increment(&self, means: &[f64], dt_minutes: f64, _room: &RoomGeometry, options: &FedOptions) -> f64 {
        let &[layer, co2_upper, co_upper, o2_upper, co2_lower, co_lower, o2_lower] = means else {
            return 0.0;
        };

        let (co2, co, o2) = if layer > options.monitoring_height {
            (co2_lower, co_lower, o2_lower)
        } else {
            (co2_upper, co_upper, o2_upper)
        };

        co_increment(co, co2, o2, dt_minutes)
    }
}

/// Dose received over `dt` minutes at the given concentrations
pub fn co_increment(co_ppm: f64, co2_percent: f64, o2_percent: f64, dt_minutes: f64) -> f64 {
    let co2_factor = if co2_percent > 0.02 {
        (co2_percent / 5.0).exp()
    } else {
        1.0
    };

    let mut dose = co_ppm * dt_minutes * co2_factor / 35000.0;
    if o2_percent < 13.0 {
        dose += dt_minutes / (8.13 - 0.54 * (20.9 - o2_percent)).exp();
    }
    dose
}
