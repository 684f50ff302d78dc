//! Canonical B-RISK result column names
//!
//! Names as they appear after [`super::workbook::reconcile_columns`].

pub const MASS_LOSS_RATE: &str = "Mass Loss Rate (kg/s)";
pub const PLUME_FLOW: &str = "Plume (kg/s)";
pub const HRR: &str = "HRR (kW)";
pub const VENT_FIRE: &str = "Vent Fire (kW)";

pub const LAYER_HEIGHT: &str = "Layer Height (m)";
pub const UPPER_LAYER_TEMP: &str = "Upper Layer Temp (C)";
pub const LOWER_LAYER_TEMP: &str = "Lower Layer Temp (C)";
pub const PRESSURE: &str = "Pressure (Pa)";
pub const VISIBILITY: &str = "Visibility (m)";

// B-RISK writes the CO2 columns without the space before the unit
pub const CO2_UPPER: &str = "CO2 Upper(%)";
pub const CO2_LOWER: &str = "CO2 Lower(%)";
pub const CO_UPPER: &str = "CO Upper (ppm)";
pub const CO_LOWER: &str = "CO Lower (ppm)";
pub const O2_UPPER: &str = "O2 Upper (%)";
pub const O2_LOWER: &str = "O2 Lower (%)";
pub const HCN_UPPER: &str = "HCN Upper (ppm)";
pub const HCN_LOWER: &str = "HCN Lower (ppm)";

pub const CEILING_TEMP: &str = "Ceiling Temp (C)";
pub const UPPER_WALL_TEMP: &str = "Upper Wall Temp (C)";
pub const LOWER_WALL_TEMP: &str = "Lower Wall Temp (C)";
pub const RAD_ON_FLOOR: &str = "Rad on Floor (kW/m2)";
pub const RAD_ON_TARGET: &str = "Rad on Target (kW/m2)";

pub const VENT_FLOW_UPPER: &str = "Vent Flow to Upper Layer (kg/s)";
pub const VENT_FLOW_LOWER: &str = "Vent Flow to Lower Layer (kg/s)";
pub const VENT_FLOW_OUTSIDE: &str = "Vent Flow to Outside (m3/s)";
