//! FED for heat (C/VM2)
//!
//! Convected heat from the gas at the monitoring height plus radiated heat
//! from the hot upper layer:
//!
//! ```text
//! t_conv = 5e7 · T^-3.4                 (9e9 when T < 25 °C)
//! q      = F · 5.67e-8 · (T_upper + 273)^4
//! t_rad  = 6.9 · (q / 1000)^-1.56       (9e9 when q < 2500 W/m²)
//! dFED   = (1 / t_conv + 1 / t_rad) · dt
//! ```
//!
//! Below the layer interface `T` is the lower layer temperature and `F` the
//! view factor of the layer seen from the monitoring height. Inside the upper
//! layer `T` is the upper layer temperature and `F = 1`.

use std::f64::consts::PI;

use super::{DoseModel, FedOptions};
use crate::results::columns::{LAYER_HEIGHT, LOWER_LAYER_TEMP, UPPER_LAYER_TEMP};
use crate::results::RoomGeometry;

const COLUMNS: [&str; 3] = [LAYER_HEIGHT, UPPER_LAYER_TEMP, LOWER_LAYER_TEMP];

const STEFAN_BOLTZMANN: f64 = 5.67e-8;
const EMISSIVITY: f64 = 1.0;

/// Tolerance time used when exposure is negligible (min)
const NO_EXPOSURE: f64 = 9e9;

/// Convective and radiant heat dose
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalDose;

impl DoseModel for ThermalDose {
    fn name(&self) -> &str {
        "FED_thermal"
    }

    fn columns(&self) -> &[&'static str] {
        &COLUMNS
    }

    fn increment(&self, means: &[f64], dt_minutes: f64, room: &RoomGeometry, options: &FedOptions) -> f64 {
        let &[layer, upper_temp, lower_temp] = means else {
            return 0.0;
        };

        let (gas_temp, view) = if layer > options.monitoring_height {
            let distance = layer - options.monitoring_height;
            (lower_temp, view_factor(room.length, room.width, distance))
        } else {
            (upper_temp, 1.0)
        };

        thermal_increment(gas_temp, upper_temp, view, dt_minutes)
    }
}

/// Dose received over `dt` minutes (temperatures in °C)
pub fn thermal_increment(gas_temp: f64, upper_temp: f64, view_factor: f64, dt_minutes: f64) -> f64 {
    let t_conv = if gas_temp < 25.0 {
        NO_EXPOSURE
    } else {
        5e7 * gas_temp.powf(-3.4)
    };

    let q = view_factor * EMISSIVITY * STEFAN_BOLTZMANN * (upper_temp + 273.0).powi(4);
    let t_rad = if q < 2500.0 {
        NO_EXPOSURE
    } else {
        6.9 * (q / 1000.0).powf(-1.56)
    };

    (1.0 / t_conv + 1.0 / t_rad) * dt_minutes
}

/// View factor from a point to a parallel `length × width` rectangle centred
/// `distance` above it
pub fn view_factor(length: f64, width: f64, distance: f64) -> f64 {
    let a = length / (2.0 * distance);
    let b = width / (2.0 * distance);
    let ra = (1.0 + a * a).sqrt();
    let rb = (1.0 + b * b).sqrt();

    2.0 / PI * (a / ra * (b / ra).atan() + b / rb * (a / rb).atan())
}
