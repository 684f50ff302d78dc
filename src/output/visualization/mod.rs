//! Figures of B-RISK results
//!
//! Plots are built as a [`Figure`] (series plus annotations) and rendered with
//! `plotters` when saved, so they can be adjusted before being written.
//!
//! # Organization
//!
//! - **style**: colours, dash patterns and annotation styles
//! - **config**: figure size, resolution and fonts (`PlotConfig`)
//! - **figure**: the `Figure` model and its rendering
//! - **annotations**: event, tenability and user lines and texts
//! - **plots**: the standard plots, as methods on `BriskResults`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bplot::output::visualization::{add_user_vline_text, PlotConfig};
//!
//! let mut fig = results.plot_visibility(Some(&["Lounge", "Hall"]), true)?;
//! add_user_vline_text(&mut fig, 300.0, "Fire service arrives");
//! fig.set_config(PlotConfig::from_mm(170.0, 100.0));
//! fig.save("visibility.svg")?;
//! ```
//!
//! # Which plot
//!
//! | Use Case                              | Method                                 |
//! |---------------------------------------|----------------------------------------|
//! | Any room result column                | `plot_variable` / `plot_<variable>`    |
//! | Heat release rate with vent fire      | `plot_hrr`                             |
//! | Occupant staying in each room         | `plot_room_fed_co`, `plot_room_fed_thermal` |
//! | Both doses in one room                | `plot_room_feds`                       |
//! | Occupant walking an egress path       | `plot_fed_co_path`, `plot_fed_thermal_path` |

pub mod annotations;
pub mod config;
pub mod figure;
pub mod plots;
pub mod style;

pub use annotations::{
    add_event_text, add_event_vline, add_htext, add_span_text, add_tenability_hline, add_user_line_texts,
    add_user_text, add_user_vline, add_user_vline_text, add_vtext,
};
pub use config::{LegendPosition, PlotConfig};
pub use figure::{Annotation, Figure, HAlign, Series, TextAnnotation, VAlign};
pub use plots::Variable;
pub use style::{AnnotationStyle, Dash, LineStyle};
