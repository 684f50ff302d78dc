//! Figure configuration shared by every plot
//!
//! Figures are sized in millimetres, the way they are laid out in a report,
//! and rasterised at `dpi`.
//!
//! # Example
//!
//! ```rust,ignore
//! use bplot::output::visualization::PlotConfig;
//!
//! // Full page width figure for an A4 report
//! let config = PlotConfig::from_mm(170.0, 100.0).with_dpi(150.0);
//! let (w, h) = config.pixel_size();
//! ```

use plotters::prelude::*;

use super::style::{series_style, Dash, LineStyle, SERIES_COLORS, SERIES_DASHES};

const MM_PER_INCH: f64 = 25.4;
const POINTS_PER_INCH: f64 = 72.0;

/// Corner the legend is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl LegendPosition {
    pub(crate) fn to_plotters(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// Configuration for rendering figures
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Figure width in mm (default: 150)
    pub width_mm: f64,

    /// Figure height in mm (default: 150 / 1.6)
    pub height_mm: f64,

    /// Resolution of saved figures (default: 300)
    pub dpi: f64,

    /// Background colour (default: WHITE)
    pub background: RGBColor,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    pub font_family: String,

    /// Axis label and legend font size in points (default: 10)
    pub font_size: f64,

    /// Series line width in points (default: 2)
    pub line_width: f64,

    /// Colours cycled through for series
    pub series_colors: Vec<RGBColor>,

    /// Dash patterns cycled through once every colour is used
    pub series_dashes: Vec<Dash>,

    pub legend_position: LegendPosition,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width_mm: 150.0,
            height_mm: 150.0 / 1.6,
            dpi: 300.0,
            background: WHITE,
            show_grid: true,
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            line_width: 2.0,
            series_colors: SERIES_COLORS.to_vec(),
            series_dashes: SERIES_DASHES.to_vec(),
            legend_position: LegendPosition::UpperLeft,
        }
    }
}

impl PlotConfig {
    /// Default configuration with another figure size
    pub fn from_mm(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            ..Self::default()
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_series_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.series_colors = colors;
        self
    }

    pub fn with_legend_position(mut self, position: LegendPosition) -> Self {
        self.legend_position = position;
        self
    }

    /// Image size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |mm: f64| ((mm / MM_PER_INCH * self.dpi).round() as u32).max(1);
        (px(self.width_mm), px(self.height_mm))
    }

    /// Convert a length in points to pixels (at least 1)
    pub fn points_to_px(&self, points: f64) -> u32 {
        ((points * self.dpi / POINTS_PER_INCH).round() as u32).max(1)
    }

    /// Style of the series at `index` in the default cycle
    pub(crate) fn get_series_style(&self, index: usize) -> LineStyle {
        series_style(index, &self.series_colors, &self.series_dashes, self.line_width)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
