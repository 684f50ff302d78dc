//! Figures: series and annotations rendered with plotters
//!
//! A [`Figure`] is assembled first (series, labels, annotations) and drawn
//! only when saved, so the axis limits are known before anything is placed.
//! Annotation heights are fractions of the y axis top: `1.0` is the top of
//! the axes and values above 1 are drawn in the margin above them.
//!
//! # Example
//!
//! ```rust,ignore
//! use bplot::output::visualization::Figure;
//!
//! let mut fig = Figure::new();
//! fig.plot("Lounge", vec![(0.0, 20.0), (60.0, 85.0), (120.0, 140.0)]);
//! fig.xlabel = "Time (s)".to_string();
//! fig.ylabel = "Upper Layer Temp (C)".to_string();
//! fig.save("lounge.png")?;
//! ```

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use super::config::PlotConfig;
use super::style::LineStyle;

// =================================================================================================
// Figure content
// =================================================================================================

/// Horizontal text alignment relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Text placed on the figure
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    /// Position on the x axis (data units)
    pub x: f64,

    /// Height as a fraction of the y axis top
    pub y: f64,

    /// Text; `\n` starts a new line
    pub text: String,

    /// Font size in points
    pub font_size: f64,

    pub halign: HAlign,
    pub valign: VAlign,

    /// Rotate the text to read from bottom to top
    pub vertical: bool,

    /// Paint the figure background behind the text
    pub background: bool,
}

/// Something drawn on top of the series
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Vertical line across the axes at `x`
    VLine { x: f64, style: LineStyle },

    /// Horizontal line across the axes at `y`
    HLine { y: f64, style: LineStyle },

    Text(TextAnnotation),

    /// Double headed arrow from `x1` to `x2` at height `y` (fraction of the
    /// y axis top)
    Span { x1: f64, x2: f64, y: f64 },
}

/// One line on the figure
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,

    /// Explicit style, or `None` for the next style of the series cycle
    pub style: Option<LineStyle>,
}

/// A 2D line figure
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: Option<String>,
    pub xlabel: String,
    pub ylabel: String,

    /// Fixed x axis limits, or `None` to fit the data
    pub x_range: Option<(f64, f64)>,

    /// Distance between x ticks, or `None` for automatic spacing
    pub x_tick_spacing: Option<f64>,

    /// Bottom of the y axis
    pub y_bottom: f64,

    /// Fixed top of the y axis, or `None` for [`Figure::y_top`]
    pub y_max: Option<f64>,

    pub show_legend: bool,

    config: PlotConfig,
    series: Vec<Series>,
    annotations: Vec<Annotation>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    pub fn new() -> Self {
        Self::with_config(PlotConfig::default())
    }

    pub fn with_config(config: PlotConfig) -> Self {
        Self {
            title: None,
            xlabel: String::new(),
            ylabel: String::new(),
            x_range: None,
            x_tick_spacing: None,
            y_bottom: 0.0,
            y_max: None,
            show_legend: true,
            config,
            series: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PlotConfig) {
        self.config = config;
    }

    /// Add a line with the next style of the series cycle
    pub fn plot(&mut self, label: impl Into<String>, points: Vec<(f64, f64)>) -> &mut Self {
        self.series.push(Series {
            label: label.into(),
            points,
            style: None,
        });
        self
    }

    /// Add a line with an explicit style
    pub fn plot_styled(&mut self, label: impl Into<String>, points: Vec<(f64, f64)>, style: LineStyle) -> &mut Self {
        self.series.push(Series {
            label: label.into(),
            points,
            style: Some(style),
        });
        self
    }

    pub fn annotate(&mut self, annotation: Annotation) -> &mut Self {
        self.annotations.push(annotation);
        self
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// x axis limits: the fixed range, or the extent of the data
    pub fn x_limits(&self) -> (f64, f64) {
        let (lo, hi) = self.x_range.unwrap_or_else(|| {
            let xs = self
                .series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.0))
                .filter(|x| x.is_finite());
            xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(x), hi.max(x)))
        });

        if !lo.is_finite() || !hi.is_finite() {
            return (0.0, 1.0);
        }
        if hi <= lo {
            return (lo, lo + 1.0);
        }
        (lo, hi)
    }

    /// Top of the y axis.
    ///
    /// Unless fixed with `y_max`, 5 % above the largest finite series value or
    /// horizontal line.
    pub fn y_top(&self) -> f64 {
        if let Some(top) = self.y_max {
            return top;
        }

        let series_max = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1));
        let line_max = self.annotations.iter().filter_map(|a| match a {
            Annotation::HLine { y, .. } => Some(*y),
            _ => None,
        });

        let max = series_max
            .chain(line_max)
            .filter(|y| y.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);

        if max > self.y_bottom {
            self.y_bottom + (max - self.y_bottom) * 1.05
        } else {
            self.y_bottom + 1.0
        }
    }

    /// Tick positions on the x axis
    pub fn x_ticks(&self) -> Vec<f64> {
        let (lo, hi) = self.x_limits();
        let spacing = self
            .x_tick_spacing
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or_else(|| nice_step(hi - lo));

        let first = (lo / spacing).ceil() as i64;
        let last = (hi / spacing).floor() as i64;
        (first..=last).map(|k| k as f64 * spacing).collect()
    }

    /// Vertical lines outside the x limits are not drawn
    pub(crate) fn is_in_view(&self, annotation: &Annotation) -> bool {
        match annotation {
            Annotation::VLine { x, .. } => {
                let (lo, hi) = self.x_limits();
                (lo..=hi).contains(x)
            }
            _ => true,
        }
    }

    /// Whether anything is drawn above the axes
    fn has_annotations_above(&self) -> bool {
        self.annotations.iter().any(|a| match a {
            Annotation::Text(t) => t.y > 1.0,
            Annotation::Span { y, .. } => *y > 1.0,
            _ => false,
        })
    }

    // =============================================================================================
    // Rendering
    // =============================================================================================

    /// Save the figure; `.svg` files are vector images, anything else bitmaps
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        let path = path.as_ref();
        let size = self.config.pixel_size();

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "png".to_string());

        match ext.as_str() {
            "svg" => self.render(SVGBackend::new(path, size))?,
            _ => self.render(BitMapBackend::new(path, size))?,
        }

        log::debug!("saved {}", path.display());
        Ok(())
    }

    /// Draw the figure with any plotters backend
    pub fn render<DB: DrawingBackend>(&self, backend: DB) -> Result<(), Box<dyn Error>>
    where
        DB::ErrorType: 'static,
    {
        let cfg = &self.config;
        let root = backend.into_drawing_area();
        root.fill(&cfg.background)?;

        let (_, height) = root.dim_in_pixel();
        let font_px = cfg.points_to_px(cfg.font_size);
        let font_size = f64::from(font_px);
        let family = cfg.font_family.as_str();

        let top_margin = if self.has_annotations_above() {
            height / 5
        } else {
            font_px
        };

        let (x0, x1) = self.x_limits();
        let (y0, y1) = (self.y_bottom, self.y_top());
        let ticks = self.x_ticks();

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(font_px)
            .margin_top(top_margin)
            .x_label_area_size(font_px * 3)
            .y_label_area_size(font_px * 4);
        if let Some(title) = &self.title {
            builder.caption(title, (family, font_size * 1.2));
        }

        let x_axis = TickedAxis {
            inner: (x0..x1).into(),
            ticks,
        };
        let mut chart = builder.build_cartesian_2d(x_axis, y0..y1)?;

        let x_fmt = |x: &f64| format!("{x:.0}");
        let y_fmt = |y: &f64| format_tick(*y);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(self.xlabel.as_str())
            .y_desc(self.ylabel.as_str())
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style((family, font_size))
            .axis_desc_style((family, font_size));
        if !cfg.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        // ── Series ───────────────────────────────────────────────────────────
        let legend_len = font_px as i32 * 2;
        for (i, series) in self.series.iter().enumerate() {
            let style = series.style.unwrap_or_else(|| cfg.get_series_style(i));
            let width = cfg.points_to_px(style.width);
            let shape = style.shape_style(width);
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .copied()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();
            let label = Some(series.label.as_str()).filter(|l| !l.is_empty());

            match style.dash.pattern() {
                None => {
                    let anno = chart.draw_series(LineSeries::new(points, shape))?;
                    if let Some(label) = label {
                        anno.label(label).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + legend_len, y)], shape)
                        });
                    }
                }
                Some((dash, gap)) => {
                    let dash = scaled(dash, width);
                    let gap = scaled(gap, width);
                    let anno = chart.draw_series(DashedLineSeries::new(points, dash, gap, shape))?;
                    if let Some(label) = label {
                        anno.label(label).legend(move |(x, y)| {
                            DashedPathElement::new(vec![(x, y), (x + legend_len, y)], dash, gap, shape)
                        });
                    }
                }
            }
        }

        // ── Annotations ──────────────────────────────────────────────────────
        let (x_px, y_px) = chart.plotting_area().get_pixel_range();
        let frame = Frame {
            x_range: (x0, x1),
            x_px: (x_px.start, x_px.end),
            y_px: (y_px.end, y_px.start),
        };

        for annotation in self.annotations.iter().filter(|a| self.is_in_view(a)) {
            match annotation {
                Annotation::VLine { x, style } => {
                    let px = frame.x(*x);
                    draw_line(&root, (px, frame.y_px.0), (px, frame.y_px.1), style, cfg)?;
                }
                Annotation::HLine { y, style } => {
                    let py = frame.y((*y - y0) / (y1 - y0));
                    draw_line(&root, (frame.x_px.0, py), (frame.x_px.1, py), style, cfg)?;
                }
                Annotation::Text(text) => {
                    let fraction = (text.y * y1 - y0) / (y1 - y0);
                    draw_text(&root, (frame.x(text.x), frame.y(fraction)), text, cfg)?;
                }
                Annotation::Span { x1: from, x2: to, y } => {
                    let fraction = (*y * y1 - y0) / (y1 - y0);
                    let py = frame.y(fraction);
                    draw_span(&root, frame.x(*from), frame.x(*to), py, cfg)?;
                }
            }
        }

        if self.show_legend && self.series.iter().any(|s| !s.label.is_empty()) {
            chart
                .configure_series_labels()
                .position(cfg.legend_position.to_plotters())
                .label_font((family, font_size))
                .background_style(&cfg.background.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

// =================================================================================================
// Drawing helpers
// =================================================================================================

/// Linear f64 axis with its bold ticks at fixed positions
struct TickedAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            return Vec::new();
        }
        let max = hint.max_num_points().max(1);
        let stride = self.ticks.len().div_ceil(max).max(1);
        self.ticks.iter().step_by(stride).copied().collect()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

/// Maps axis positions to pixels
struct Frame {
    x_range: (f64, f64),
    x_px: (i32, i32),
    /// `(bottom, top)` pixel rows of the axes
    y_px: (i32, i32),
}

impl Frame {
    fn x(&self, x: f64) -> i32 {
        let (lo, hi) = self.x_range;
        let t = (x - lo) / (hi - lo);
        self.x_px.0 + (t * f64::from(self.x_px.1 - self.x_px.0)).round() as i32
    }

    /// `fraction` of the axes height above the bottom
    fn y(&self, fraction: f64) -> i32 {
        self.y_px.0 + (fraction * f64::from(self.y_px.1 - self.y_px.0)).round() as i32
    }
}

fn scaled(multiple: f64, width: u32) -> u32 {
    ((multiple * f64::from(width)).round() as u32).max(1)
}

/// Dash pieces of the straight line `from -> to`
pub(crate) fn dash_segments(from: (i32, i32), to: (i32, i32), dash: u32, gap: u32) -> Vec<[(i32, i32); 2]> {
    let (dx, dy) = (f64::from(to.0 - from.0), f64::from(to.1 - from.1));
    let length = dx.hypot(dy);
    if length == 0.0 || dash == 0 {
        return vec![[from, to]];
    }

    let point = |d: f64| {
        let t = (d / length).min(1.0);
        (
            from.0 + (t * dx).round() as i32,
            from.1 + (t * dy).round() as i32,
        )
    };

    let period = f64::from(dash + gap);
    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        segments.push([point(start), point(start + f64::from(dash))]);
        start += period;
    }
    segments
}

fn draw_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    from: (i32, i32),
    to: (i32, i32),
    style: &LineStyle,
    cfg: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let width = cfg.points_to_px(style.width);
    let shape = style.shape_style(width);

    let pieces = match style.dash.pattern() {
        None => vec![[from, to]],
        Some((dash, gap)) => dash_segments(from, to, scaled(dash, width), scaled(gap, width)),
    };
    for [a, b] in pieces {
        root.draw(&PathElement::new(vec![a, b], shape))?;
    }
    Ok(())
}

fn draw_text<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    anchor: (i32, i32),
    text: &TextAnnotation,
    cfg: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let size = f64::from(cfg.points_to_px(text.font_size));
    let line_height = (size * 1.2).round() as i32;
    let lines: Vec<&str> = text.text.lines().collect();
    let n = lines.len() as i32;
    let base = TextStyle::from((cfg.font_family.as_str(), size).into_font()).color(&BLACK);

    if text.vertical {
        // Rotated text runs upwards, so the vertical alignment picks the
        // horizontal anchor of the unrotated text.
        let hpos = match text.valign {
            VAlign::Bottom => HPos::Left,
            VAlign::Center => HPos::Center,
            VAlign::Top => HPos::Right,
        };
        let style = base.transform(FontTransform::Rotate270).pos(Pos::new(hpos, VPos::Center));

        for (k, line) in lines.iter().enumerate() {
            let x = anchor.0 + (2 * k as i32 - (n - 1)) * line_height / 2;
            if text.background {
                let (w, h) = root.estimate_text_size(line, &style)?;
                let (w, h) = (w as i32, h as i32);
                let (top, bottom) = match text.valign {
                    VAlign::Bottom => (anchor.1 - w, anchor.1),
                    VAlign::Center => (anchor.1 - w / 2, anchor.1 + w / 2),
                    VAlign::Top => (anchor.1, anchor.1 + w),
                };
                root.draw(&Rectangle::new(
                    [(x - h / 2, top), (x + h / 2, bottom)],
                    cfg.background.filled(),
                ))?;
            }
            root.draw(&Text::new(line.to_string(), (x, anchor.1), style.clone()))?;
        }
        return Ok(());
    }

    let hpos = match text.halign {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let style = base.pos(Pos::new(hpos, VPos::Top));

    let block = n * line_height;
    let top = match text.valign {
        VAlign::Top => anchor.1,
        VAlign::Center => anchor.1 - block / 2,
        VAlign::Bottom => anchor.1 - block,
    };

    for (k, line) in lines.iter().enumerate() {
        let y = top + k as i32 * line_height;
        if text.background {
            let (w, _) = root.estimate_text_size(line, &style)?;
            let w = w as i32;
            let (left, right) = match text.halign {
                HAlign::Left => (anchor.0, anchor.0 + w),
                HAlign::Center => (anchor.0 - w / 2, anchor.0 + w / 2),
                HAlign::Right => (anchor.0 - w, anchor.0),
            };
            root.draw(&Rectangle::new(
                [(left, y), (right, y + line_height)],
                cfg.background.filled(),
            ))?;
        }
        root.draw(&Text::new(line.to_string(), (anchor.0, y), style.clone()))?;
    }
    Ok(())
}

/// `<->` arrow between two pixel columns
fn draw_span<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    x1: i32,
    x2: i32,
    y: i32,
    cfg: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (left, right) = (x1.min(x2), x1.max(x2));
    let head_len = cfg.points_to_px(4.0) as i32;
    let head_half = cfg.points_to_px(1.5) as i32;
    let stroke = BLACK.stroke_width(cfg.points_to_px(0.8));

    root.draw(&PathElement::new(vec![(left, y), (right, y)], stroke))?;
    root.draw(&Polygon::new(
        vec![(left, y), (left + head_len, y - head_half), (left + head_len, y + head_half)],
        BLACK.filled(),
    ))?;
    root.draw(&Polygon::new(
        vec![(right, y), (right - head_len, y - head_half), (right - head_len, y + head_half)],
        BLACK.filled(),
    ))?;
    Ok(())
}

/// A step of 1, 2 or 5 times a power of ten giving about ten ticks
pub(crate) fn nice_step(span: f64) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }

    let raw = span / 10.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let factor = match raw / magnitude {
        r if r <= 1.0 => 1.0,
        r if r <= 2.0 => 2.0,
        r if r <= 5.0 => 5.0,
        _ => 10.0,
    };
    factor * magnitude
}

/// Tick label without trailing zeros
fn format_tick(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
