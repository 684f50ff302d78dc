//! Common utilities for integration tests

pub mod export;

// Re-export commonly used items
pub use export::{
    write_export, write_export_without, write_zip_export, ExportFixture, END_TIME, RUN_NAME, TIME_STEP,
};

/// Relative error, falling back to the absolute error around zero
pub fn relative_error(value: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-12 {
        value.abs()
    } else {
        ((value - expected) / expected).abs()
    }
}
