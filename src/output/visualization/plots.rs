//! Standard B-RISK plots
//!
//! Every plot is a method on [`BriskResults`] returning a [`Figure`] ready to
//! be saved. All of them share the same axes formatting ([`BriskResults::format_plot`])
//! and mark smoke detector activations; most also mark sprinkler activations.
//!
//! # Example
//!
//! ```rust,ignore
//! use bplot::results::BriskResults;
//! use bplot::tenability::{EgressPath, FedOptions};
//!
//! let results = BriskResults::open("runs/apartment")?;
//!
//! results.plot_upper_layer_temp(None, true)?.save("upper_layer_temp.png")?;
//! results.plot_hrr(Some(&["Lounge"]), true, true)?.save("hrr.svg")?;
//!
//! let path = EgressPath::new(["Bedroom", "Hall"], [120.0])?;
//! results.plot_fed_co_path(&path, &FedOptions::default())?.save("fed_co.png")?;
//! ```

use crate::results::{columns, BriskResults, Result, OUTSIDE};
use crate::tenability::{CoDose, DoseModel, EgressPath, FedCurve, FedOptions, ThermalDose};

use super::annotations::{add_event_text, add_event_vline, add_span_text, add_tenability_hline, add_user_vline};
use super::figure::Figure;

/// x axis label of every plot
pub const TIME_LABEL: &str = "Time (s)";

/// Label of the FED line of an egress path
pub const PATH_LABEL: &str = "egress path";

// =================================================================================================
// Variables
// =================================================================================================

/// Result columns with a standard plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    MassLossRate,
    PlumeMassFlow,
    Hrr,
    LayerHeight,
    UpperLayerTemp,
    LowerLayerTemp,
    Pressure,
    Visibility,
    Co2Upper,
    Co2Lower,
    CoUpper,
    CoLower,
    O2Upper,
    O2Lower,
    HcnUpper,
    HcnLower,
    CeilingTemp,
    UpperWallTemp,
    LowerWallTemp,
    RadOnFloor,
    RadOnTarget,
    VentFlowUpper,
    VentFlowLower,
    VentFlowOutside,
}

impl Variable {
    pub const ALL: [Variable; 24] = [
        Variable::MassLossRate,
        Variable::PlumeMassFlow,
        Variable::Hrr,
        Variable::LayerHeight,
        Variable::UpperLayerTemp,
        Variable::LowerLayerTemp,
        Variable::Pressure,
        Variable::Visibility,
        Variable::Co2Upper,
        Variable::Co2Lower,
        Variable::CoUpper,
        Variable::CoLower,
        Variable::O2Upper,
        Variable::O2Lower,
        Variable::HcnUpper,
        Variable::HcnLower,
        Variable::CeilingTemp,
        Variable::UpperWallTemp,
        Variable::LowerWallTemp,
        Variable::RadOnFloor,
        Variable::RadOnTarget,
        Variable::VentFlowUpper,
        Variable::VentFlowLower,
        Variable::VentFlowOutside,
    ];

    /// Result column plotted (also the y axis label)
    pub fn column(self) -> &'static str {
        match self {
            Variable::MassLossRate => columns::MASS_LOSS_RATE,
            Variable::PlumeMassFlow => columns::PLUME_FLOW,
            Variable::Hrr => columns::HRR,
            Variable::LayerHeight => columns::LAYER_HEIGHT,
            Variable::UpperLayerTemp => columns::UPPER_LAYER_TEMP,
            Variable::LowerLayerTemp => columns::LOWER_LAYER_TEMP,
            Variable::Pressure => columns::PRESSURE,
            Variable::Visibility => columns::VISIBILITY,
            Variable::Co2Upper => columns::CO2_UPPER,
            Variable::Co2Lower => columns::CO2_LOWER,
            Variable::CoUpper => columns::CO_UPPER,
            Variable::CoLower => columns::CO_LOWER,
            Variable::O2Upper => columns::O2_UPPER,
            Variable::O2Lower => columns::O2_LOWER,
            Variable::HcnUpper => columns::HCN_UPPER,
            Variable::HcnLower => columns::HCN_LOWER,
            Variable::CeilingTemp => columns::CEILING_TEMP,
            Variable::UpperWallTemp => columns::UPPER_WALL_TEMP,
            Variable::LowerWallTemp => columns::LOWER_WALL_TEMP,
            Variable::RadOnFloor => columns::RAD_ON_FLOOR,
            Variable::RadOnTarget => columns::RAD_ON_TARGET,
            Variable::VentFlowUpper => columns::VENT_FLOW_UPPER,
            Variable::VentFlowLower => columns::VENT_FLOW_LOWER,
            Variable::VentFlowOutside => columns::VENT_FLOW_OUTSIDE,
        }
    }

    /// Name used for output files
    pub fn file_stem(self) -> &'static str {
        match self {
            Variable::MassLossRate => "mass_loss_rate",
            Variable::PlumeMassFlow => "plume_mass_flow",
            Variable::Hrr => "hrr",
            Variable::LayerHeight => "layer_height",
            Variable::UpperLayerTemp => "upper_layer_temp",
            Variable::LowerLayerTemp => "lower_layer_temp",
            Variable::Pressure => "pressure",
            Variable::Visibility => "visibility",
            Variable::Co2Upper => "co2_upper",
            Variable::Co2Lower => "co2_lower",
            Variable::CoUpper => "co_upper",
            Variable::CoLower => "co_lower",
            Variable::O2Upper => "o2_upper",
            Variable::O2Lower => "o2_lower",
            Variable::HcnUpper => "hcn_upper",
            Variable::HcnLower => "hcn_lower",
            Variable::CeilingTemp => "ceiling_temp",
            Variable::UpperWallTemp => "wall_temp_upper",
            Variable::LowerWallTemp => "wall_temp_lower",
            Variable::RadOnFloor => "rad_on_floor",
            Variable::RadOnTarget => "rad_on_target",
            Variable::VentFlowUpper => "vent_flow_upper",
            Variable::VentFlowLower => "vent_flow_lower",
            Variable::VentFlowOutside => "vent_flow_outside",
        }
    }

    /// Variables recorded once per analysis rather than per room of interest;
    /// their plots always show every room
    pub fn is_single(self) -> bool {
        matches!(self, Variable::MassLossRate | Variable::PlumeMassFlow)
    }
}

// =================================================================================================
// Plots
// =================================================================================================

impl BriskResults {
    /// Common axes formatting: time from 0 to the end of the results with a
    /// tick every whole number of minutes, y from 0
    pub fn format_plot(&self, fig: &mut Figure, ylabel: &str) {
        let max_time = self.max_time();

        fig.x_range = Some((0.0, max_time));
        fig.xlabel = TIME_LABEL.to_string();
        fig.x_tick_spacing = time_tick_spacing(max_time);
        fig.y_bottom = 0.0;
        fig.ylabel = ylabel.to_string();
    }

    /// Mark sprinkler activations
    pub fn add_sprinkler_lines(&self, fig: &mut Figure) {
        for event in self.sprinkler_events() {
            add_event_vline(fig, event.time);
            add_event_text(fig, event.time, &event.label(), None);
        }
    }

    /// Mark smoke detector activations
    pub fn add_smoke_detector_lines(&self, fig: &mut Figure) {
        for event in self.smoke_detector_events() {
            add_event_vline(fig, event.time);
            add_event_text(fig, event.time, &event.label(), None);
        }
    }

    /// One line per room for a result column.
    ///
    /// `rooms` defaults to every room and is ignored for single variables.
    pub fn plot_variable(&self, variable: Variable, rooms: Option<&[&str]>, show_sprinklers: bool) -> Result<Figure> {
        let all_rooms = self.room_names();
        let rooms = match rooms {
            Some(rooms) if !variable.is_single() => rooms,
            _ => all_rooms.as_slice(),
        };

        let mut fig = Figure::new();
        for room in rooms {
            fig.plot(*room, self.table(room)?.series(variable.column())?);
        }

        self.format_plot(&mut fig, variable.column());
        if show_sprinklers {
            self.add_sprinkler_lines(&mut fig);
        }
        self.add_smoke_detector_lines(&mut fig);
        Ok(fig)
    }

    /// Heat release rate per room, optionally with the fire burning at the
    /// vents (`Outside`)
    pub fn plot_hrr(&self, rooms: Option<&[&str]>, show_sprinklers: bool, plot_vent_fire: bool) -> Result<Figure> {
        let mut fig = self.plot_variable(Variable::Hrr, rooms, show_sprinklers)?;
        if plot_vent_fire {
            fig.plot(OUTSIDE, self.outside().series(columns::VENT_FIRE)?);
        }
        Ok(fig)
    }

    // ── FED ──────────────────────────────────────────────────────────────────

    /// FED_CO of an occupant staying in each room
    pub fn plot_room_fed_co(&self, rooms: Option<&[&str]>, options: &FedOptions) -> Result<Figure> {
        let mut fig = self.plot_room_fed(&CoDose, rooms, options)?;
        self.add_sprinkler_lines(&mut fig);
        self.add_smoke_detector_lines(&mut fig);
        Ok(fig)
    }

    /// FED_thermal of an occupant staying in each room
    pub fn plot_room_fed_thermal(&self, rooms: Option<&[&str]>, options: &FedOptions) -> Result<Figure> {
        let mut fig = self.plot_room_fed(&ThermalDose, rooms, options)?;
        self.add_smoke_detector_lines(&mut fig);
        Ok(fig)
    }

    /// FED_CO along an egress path, with the time spent in each room
    pub fn plot_fed_co_path(&self, path: &EgressPath, options: &FedOptions) -> Result<Figure> {
        self.plot_fed_path(&CoDose, path, options)
    }

    /// FED_thermal along an egress path, with the time spent in each room
    pub fn plot_fed_thermal_path(&self, path: &EgressPath, options: &FedOptions) -> Result<Figure> {
        self.plot_fed_path(&ThermalDose, path, options)
    }

    /// FED_thermal and FED_CO of an occupant staying in one room
    pub fn plot_room_feds(&self, room: &str, options: &FedOptions) -> Result<Figure> {
        let path = EgressPath::single(room);
        let thermal = self.calculate_fed_path(&ThermalDose, &path, options)?;
        let co = self.calculate_fed_path(&CoDose, &path, options)?;

        let mut fig = Figure::new();
        fig.plot(ThermalDose.name(), thermal.points());
        fig.plot(CoDose.name(), co.points());
        add_tenability_hline(&mut fig, options.threshold);
        self.format_plot(&mut fig, "FED");
        self.add_smoke_detector_lines(&mut fig);
        Ok(fig)
    }

    fn plot_room_fed<M: DoseModel>(&self, model: &M, rooms: Option<&[&str]>, options: &FedOptions) -> Result<Figure> {
        let mut fig = Figure::new();
        for (room, curve) in self.calculate_room_feds(model, rooms, options)? {
            fig.plot(room, curve.points());
        }
        add_tenability_hline(&mut fig, options.threshold);
        self.format_plot(&mut fig, model.name());
        Ok(fig)
    }

    fn plot_fed_path<M: DoseModel>(&self, model: &M, path: &EgressPath, options: &FedOptions) -> Result<Figure> {
        let curve = self.calculate_fed_path(model, path, options)?;
        self.plot_fed_path_curve(model, path, &curve, options)
    }

    /// Plot a FED curve already computed along `path` with `model`
    pub fn plot_fed_path_curve<M: DoseModel + ?Sized>(
        &self,
        model: &M,
        path: &EgressPath,
        curve: &FedCurve,
        options: &FedOptions,
    ) -> Result<Figure> {
        let mut fig = Figure::new();
        fig.plot(PATH_LABEL, curve.points());
        add_tenability_hline(&mut fig, options.threshold);
        self.format_plot(&mut fig, model.name());
        self.add_sprinkler_lines(&mut fig);
        self.add_smoke_detector_lines(&mut fig);

        for (room, t0, t1) in path.segments(self.path_end_time(path)?) {
            add_span_text(&mut fig, t0, t1, room);
            add_user_vline(&mut fig, t1);
        }
        Ok(fig)
    }
}

/// Whole minutes giving at most about ten ticks
fn time_tick_spacing(max_time: f64) -> Option<f64> {
    if !max_time.is_finite() || max_time <= 0.0 {
        return None;
    }
    Some((max_time / 10.0 / 60.0).ceil() * 60.0)
}

// =================================================================================================
// Named plots
// =================================================================================================

macro_rules! single_variable_plots {
    ($($(#[$doc:meta])* $name:ident => $variable:ident;)*) => {
        impl BriskResults {
            $(
                $(#[$doc])*
                pub fn $name(&self, show_sprinklers: bool) -> Result<Figure> {
                    self.plot_variable(Variable::$variable, None, show_sprinklers)
                }
            )*
        }
    };
}

macro_rules! room_variable_plots {
    ($($(#[$doc:meta])* $name:ident => $variable:ident;)*) => {
        impl BriskResults {
            $(
                $(#[$doc])*
                pub fn $name(&self, rooms: Option<&[&str]>, show_sprinklers: bool) -> Result<Figure> {
                    self.plot_variable(Variable::$variable, rooms, show_sprinklers)
                }
            )*
        }
    };
}

single_variable_plots! {
    plot_mass_loss_rate => MassLossRate;
    plot_plume_mass_flow => PlumeMassFlow;
}

room_variable_plots! {
    plot_layer_height => LayerHeight;
    plot_upper_layer_temp => UpperLayerTemp;
    plot_lower_layer_temp => LowerLayerTemp;
    plot_pressure => Pressure;
    plot_visibility => Visibility;

    plot_co2_upper => Co2Upper;
    plot_co2_lower => Co2Lower;
    plot_co_upper => CoUpper;
    plot_co_lower => CoLower;
    plot_o2_upper => O2Upper;
    plot_o2_lower => O2Lower;
    plot_hcn_upper => HcnUpper;
    plot_hcn_lower => HcnLower;

    plot_ceiling_temp => CeilingTemp;
    plot_wall_temp_upper => UpperWallTemp;
    plot_wall_temp_lower => LowerWallTemp;
    plot_rad_on_floor => RadOnFloor;
    plot_rad_on_target => RadOnTarget;

    plot_vent_flow_upper => VentFlowUpper;
    plot_vent_flow_lower => VentFlowLower;
    plot_vent_flow_outside => VentFlowOutside;
}

// =================================================================================================
// Tests
// =================================================================================================
