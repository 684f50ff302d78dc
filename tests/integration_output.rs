//! Integration tests: loaded results + figures and CSV export
//!
//! Every standard plot is rendered to disk (PNG and SVG) from a realistic
//! export; figures use a low resolution to keep the tests fast.

use std::fs;
use std::path::Path;

use bplot::output::export::{export_fed_csv, export_table_csv, CsvConfig, CsvMetadata};
use bplot::output::visualization::{add_user_vline_text, Annotation, Figure, PlotConfig, Variable};
use bplot::results::BriskResults;
use bplot::tenability::{EgressPath, FedOptions};
use tempfile::TempDir;

mod common;
use common::{ExportFixture, END_TIME};

fn small(mut fig: Figure) -> Figure {
    fig.set_config(PlotConfig::from_mm(120.0, 75.0).with_dpi(72.0));
    fig
}

fn assert_written(path: &Path) {
    assert!(path.exists(), "{} was not written", path.display());
    assert!(fs::metadata(path).unwrap().len() > 0);
}

// =================================================================================================
// Figures
// =================================================================================================

#[test]
fn test_every_variable_plot_renders() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();
    let out = TempDir::new().unwrap();

    for variable in Variable::ALL {
        let fig = small(results.plot_variable(variable, None, true).unwrap());
        assert_eq!(fig.series().len(), 2, "{variable:?}");
        assert_eq!(fig.x_range, Some((0.0, END_TIME)));

        let path = out.path().join(format!("{}.png", variable.file_stem()));
        fig.save(&path).unwrap();
        assert_written(&path);
    }
}

#[test]
fn test_hrr_with_vent_fire_svg() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.archive).unwrap();
    let out = TempDir::new().unwrap();

    let fig = small(results.plot_hrr(Some(&["Lounge"]), true, true).unwrap());
    let labels: Vec<&str> = fig.series().iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Lounge", "Outside"]);

    let path = out.path().join("hrr.svg");
    fig.save(&path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Sprinkler 1"));
    assert!(svg.contains("HRR (kW)"));
}

#[test]
fn test_named_plots_match_variable_dispatch() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();

    let named = results.plot_visibility(Some(&["Hall"]), false).unwrap();
    let dispatched = results
        .plot_variable(Variable::Visibility, Some(&["Hall"]), false)
        .unwrap();
    assert_eq!(named.series()[0].points, dispatched.series()[0].points);
    assert_eq!(named.annotations().len(), dispatched.annotations().len());

    // Plume flow is plotted for every room whatever the selection
    assert_eq!(results.plot_plume_mass_flow(true).unwrap().series().len(), 2);
}

#[test]
fn test_fed_plots_render() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();
    let options = FedOptions::default();
    let out = TempDir::new().unwrap();

    let path = EgressPath::new(["Lounge", "Hall"], [150.0]).unwrap();
    let figures = [
        ("fed_co", results.plot_room_fed_co(None, &options).unwrap()),
        ("fed_thermal", results.plot_room_fed_thermal(None, &options).unwrap()),
        ("feds_lounge", results.plot_room_feds("Lounge", &options).unwrap()),
        ("fed_co_path", results.plot_fed_co_path(&path, &options).unwrap()),
        ("fed_thermal_path", results.plot_fed_thermal_path(&path, &options).unwrap()),
    ];

    for (stem, fig) in figures {
        for ext in ["png", "svg"] {
            let file = out.path().join(format!("{stem}.{ext}"));
            small(fig.clone()).save(&file).unwrap();
            assert_written(&file);
        }
    }
}

#[test]
fn test_fed_path_plot_labels_rooms() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();
    let path = EgressPath::new(["Lounge", "Hall"], [150.0]).unwrap();

    let fig = results.plot_fed_co_path(&path, &FedOptions::default()).unwrap();
    let texts: Vec<&str> = fig
        .annotations()
        .iter()
        .filter_map(|a| match a {
            Annotation::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect();

    assert!(texts.contains(&"Lounge"));
    assert!(texts.contains(&"Hall"));
    assert!(texts.contains(&"Sprinkler 1\n(120 s)"));
}

#[test]
fn test_user_annotations_on_standard_plot() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();
    let out = TempDir::new().unwrap();

    let mut fig = small(results.plot_layer_height(None, true).unwrap());
    add_user_vline_text(&mut fig, 300.0, "Fire service\narrives");

    let path = out.path().join("layer_height.svg");
    fig.save(&path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("arrives"));
}

// =================================================================================================
// CSV
// =================================================================================================

#[test]
fn test_export_room_table() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();
    let out = TempDir::new().unwrap();

    let path = out.path().join("hall.csv");
    export_table_csv(results.table("Hall").unwrap(), &path, None).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Time (sec),Layer Height (m),"));
    assert_eq!(lines.count(), 11);
}

#[test]
fn test_export_path_fed() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();
    let out = TempDir::new().unwrap();

    let path = EgressPath::new(["Lounge", "Hall"], [150.0]).unwrap();
    let fed = results.calculate_fed_co_path(&path, &FedOptions::default()).unwrap();
    let description = path.describe(results.path_end_time(&path).unwrap());

    let config = CsvConfig::european().with_metadata(CsvMetadata::for_run("apartment", description));
    let file = out.path().join("fed_co_path.csv");
    export_fed_csv(&fed, "FED_CO", &file, Some(&config)).unwrap();

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("# Room: Lounge (0-150s) - Hall (150-600s)\n"));
    assert!(content.contains("Time (s);FED_CO\n"));
    assert!(content.contains("150,000000;0,250000\n"));
}
