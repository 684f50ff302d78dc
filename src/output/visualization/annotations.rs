//! Marks and labels added on top of the plotted series
//!
//! Three families of annotations share a look ([`AnnotationStyle`]):
//!
//! | Family     | Used for                                   | Line               |
//! |------------|--------------------------------------------|--------------------|
//! | event      | sprinkler and smoke detector activations   | gray, dotted       |
//! | tenability | FED limits                                 | red, thick, faded  |
//! | user       | anything else (egress path transitions)    | light blue, dashed |
//!
//! Text heights (`text_y`) are fractions of the y axis top, so `1.02` sits
//! just above the axes.

use super::figure::{Annotation, Figure, HAlign, TextAnnotation, VAlign};
use super::style::AnnotationStyle;

/// Vertical event line at `time`
pub fn add_event_vline(fig: &mut Figure, time: f64) {
    fig.annotate(Annotation::VLine {
        x: time,
        style: AnnotationStyle::event().line,
    });
}

/// Vertical user line at `time`
pub fn add_user_vline(fig: &mut Figure, time: f64) {
    fig.annotate(Annotation::VLine {
        x: time,
        style: AnnotationStyle::user().line,
    });
}

/// Horizontal tenability limit at `y`
pub fn add_tenability_hline(fig: &mut Figure, y: f64) {
    fig.annotate(Annotation::HLine {
        y,
        style: AnnotationStyle::tenability().line,
    });
}

/// Horizontal text centred on `time`, resting on `text_y`
pub fn add_htext(fig: &mut Figure, time: f64, text: &str, text_y: f64, font_size: f64) {
    fig.annotate(Annotation::Text(TextAnnotation {
        x: time,
        y: text_y,
        text: text.to_string(),
        font_size,
        halign: HAlign::Center,
        valign: VAlign::Bottom,
        vertical: false,
        background: false,
    }));
}

/// Vertical text on an opaque background.
///
/// Near the bottom of the axes (`text_y < 0.05`) the text starts at 2 % of
/// the height and reads upwards; near the top (`text_y > 0.95`) it ends at
/// 98 %; otherwise it is centred on `text_y`.
pub fn add_vtext(fig: &mut Figure, time: f64, text: &str, text_y: f64, font_size: f64) {
    let (y, valign) = vtext_placement(text_y);
    fig.annotate(Annotation::Text(TextAnnotation {
        x: time,
        y,
        text: text.to_string(),
        font_size,
        halign: HAlign::Center,
        valign,
        vertical: true,
        background: true,
    }));
}

fn vtext_placement(text_y: f64) -> (f64, VAlign) {
    if text_y < 0.05 {
        (0.02, VAlign::Bottom)
    } else if text_y > 0.95 {
        (0.98, VAlign::Top)
    } else {
        (text_y, VAlign::Center)
    }
}

/// Event style label, at the event text height unless `text_y` is given
pub fn add_event_text(fig: &mut Figure, time: f64, text: &str, text_y: Option<f64>) {
    let style = AnnotationStyle::event();
    add_htext(fig, time, text, text_y.unwrap_or(style.text_y), style.font_size);
}

/// User style label, at the user text height unless `text_y` is given
pub fn add_user_text(fig: &mut Figure, time: f64, text: &str, text_y: Option<f64>) {
    let style = AnnotationStyle::user();
    add_htext(fig, time, text, text_y.unwrap_or(style.text_y), style.font_size);
}

/// User line with its label above the axes
pub fn add_user_vline_text(fig: &mut Figure, time: f64, text: &str) {
    add_user_vline(fig, time);
    add_user_text(fig, time, text, None);
}

/// One labelled user line per `(time, text)` pair
pub fn add_user_line_texts<S: AsRef<str>>(fig: &mut Figure, lines_texts: &[(f64, S)]) {
    for (time, text) in lines_texts {
        add_user_vline_text(fig, *time, text.as_ref());
    }
}

/// Double headed arrow from `x1` to `x2` above the axes with `text` centred on it
pub fn add_span_text(fig: &mut Figure, x1: f64, x2: f64, text: &str) {
    let style = AnnotationStyle::event();
    let y = style.arrow_y.unwrap_or(style.text_y);

    fig.annotate(Annotation::Span { x1, x2, y });
    fig.annotate(Annotation::Text(TextAnnotation {
        x: 0.5 * (x1 + x2),
        y,
        text: text.to_string(),
        font_size: style.font_size,
        halign: HAlign::Center,
        valign: VAlign::Center,
        vertical: false,
        background: true,
    }));
}
