//! Line and annotation styles
//!
//! Widths and font sizes are in points (1/72 inch) and are converted to pixels
//! with the figure dpi when rendering, so a figure looks the same at any
//! resolution.

use plotters::prelude::*;

/// Stroke pattern of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl Dash {
    /// `(dash, gap)` lengths in multiples of the line width, `None` for solid.
    ///
    /// plotters draws uniform dash patterns only, so dash-dot is drawn as long
    /// dashes with short gaps.
    pub fn pattern(&self) -> Option<(f64, f64)> {
        match self {
            Dash::Solid => None,
            Dash::Dashed => Some((3.7, 1.6)),
            Dash::Dotted => Some((1.0, 1.65)),
            Dash::DashDot => Some((6.4, 1.6)),
        }
    }
}

// CSS named colours
pub const HOTPINK: RGBColor = RGBColor(255, 105, 180);
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const CORNFLOWERBLUE: RGBColor = RGBColor(100, 149, 237);
pub const BLUEVIOLET: RGBColor = RGBColor(138, 43, 226);
pub const GRAY: RGBColor = RGBColor(128, 128, 128);
pub const LIGHTBLUE: RGBColor = RGBColor(173, 216, 230);
pub const RED: RGBColor = RGBColor(255, 0, 0);

/// Colours cycled through for data series
pub const SERIES_COLORS: [RGBColor; 4] = [HOTPINK, ORANGE, CORNFLOWERBLUE, BLUEVIOLET];

/// Dash patterns cycled through once every colour has been used
pub const SERIES_DASHES: [Dash; 4] = [Dash::Solid, Dash::Dashed, Dash::Dotted, Dash::DashDot];

/// How a line is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: RGBColor,

    /// Width in points
    pub width: f64,

    pub dash: Dash,

    /// Opacity from 0 (invisible) to 1
    pub alpha: f64,
}

impl LineStyle {
    pub fn new(color: RGBColor, width: f64, dash: Dash) -> Self {
        Self {
            color,
            width,
            dash,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// plotters style for a stroke `stroke_width` pixels wide
    pub(crate) fn shape_style(&self, stroke_width: u32) -> ShapeStyle {
        ShapeStyle {
            color: self.color.mix(self.alpha),
            filled: false,
            stroke_width,
        }
    }
}

/// Style of a family of annotations (lines, their labels and span arrows)
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationStyle {
    pub line: LineStyle,

    /// Label font size in points
    pub font_size: f64,

    /// Label height as a fraction of the y axis top
    pub text_y: f64,

    /// Height of span arrows as a fraction of the y axis top
    pub arrow_y: Option<f64>,
}

impl AnnotationStyle {
    /// Sprinkler and detector activations
    pub fn event() -> Self {
        Self {
            line: LineStyle::new(GRAY, 1.0, Dash::Dotted).with_alpha(0.7),
            font_size: 6.0,
            text_y: 1.02,
            arrow_y: Some(1.15),
        }
    }

    /// Tenability limits (no labels)
    pub fn tenability() -> Self {
        Self {
            line: LineStyle::new(RED, 3.0, Dash::Solid).with_alpha(0.3),
            font_size: 0.0,
            text_y: 0.0,
            arrow_y: None,
        }
    }

    /// Marks added by the user, such as egress path transitions
    pub fn user() -> Self {
        Self {
            line: LineStyle::new(LIGHTBLUE, 2.0, Dash::Dashed),
            font_size: 6.0,
            text_y: 1.02,
            arrow_y: None,
        }
    }
}

/// Style of the `index`-th series: colours cycle fastest, then dash patterns
pub fn series_style(index: usize, colors: &[RGBColor], dashes: &[Dash], width: f64) -> LineStyle {
    let color = colors.get(index % colors.len().max(1)).copied().unwrap_or(BLACK);
    let dash = dashes
        .get((index / colors.len().max(1)) % dashes.len().max(1))
        .copied()
        .unwrap_or(Dash::Solid);

    LineStyle::new(color, width, dash)
}
