//! Integration tests: loading an export + FED calculations
//!
//! These tests read a B-RISK export written to disk (folder and zip) and
//! check the dose an occupant receives against hand calculations.

use std::fs;

use bplot::results::{BriskResults, Error};
use bplot::tenability::thermal::thermal_increment;
use bplot::tenability::{CoDose, EgressPath, FedOptions, ThermalDose};

mod common;
use common::{relative_error, ExportFixture, END_TIME, RUN_NAME};

// =================================================================================================
// Loading
// =================================================================================================

#[test]
fn test_load_folder() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();

    assert_eq!(results.room_names(), vec!["Lounge", "Hall"]);
    assert_eq!(results.max_time(), END_TIME);
    assert_eq!(results.geometry("Hall").unwrap().length, 6.0);
    assert_eq!(results.geometry_by_id(1).unwrap().name, "Lounge");

    // Misspelt headers are reconciled, padding columns dropped
    let hall = results.table("Hall").unwrap();
    assert!(hall.has_column("Layer Height (m)"));
    assert!(hall.has_column("CO Lower (ppm)"));
    assert!(hall.columns().iter().all(|c| !c.is_empty()));
    assert_eq!(hall.name(), "Hall");
}

#[test]
fn test_load_events_from_log() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();

    let sprinklers = results.sprinkler_events();
    assert_eq!(sprinklers.len(), 1);
    assert_eq!(sprinklers[0].name, "Sprinkler 1");
    assert_eq!(sprinklers[0].time, 120.0);

    let detectors = results.smoke_detector_events();
    assert_eq!(detectors.len(), 1);
    assert_eq!(detectors[0].label(), "Smoke detector 1\n(45 s)");

    assert!(results.log_lines().iter().any(|l| l.contains("Simulation ended")));
}

#[test]
fn test_load_zip_with_and_without_extension() {
    let fixture = ExportFixture::new();

    let from_zip = BriskResults::open(&fixture.archive).unwrap();
    assert_eq!(from_zip.room_names(), vec!["Lounge", "Hall"]);

    let bare = fixture.dir.path().join(RUN_NAME);
    fs::remove_dir_all(&bare).unwrap();
    let from_name = BriskResults::open(&bare).unwrap();
    assert_eq!(from_name.max_time(), END_TIME);
}

#[test]
fn test_missing_and_ambiguous_files() {
    let fixture = ExportFixture::new();

    fs::copy(
        fixture.folder.join(format!("{RUN_NAME}_log.rtf")),
        fixture.folder.join("copy_log.rtf"),
    )
    .unwrap();
    assert!(matches!(
        BriskResults::open(&fixture.folder),
        Err(Error::AmbiguousFile { .. })
    ));

    fs::remove_file(fixture.folder.join("input1.xml")).unwrap();
    fs::remove_file(fixture.folder.join("copy_log.rtf")).unwrap();
    assert!(matches!(
        BriskResults::open(&fixture.folder),
        Err(Error::FileNotFound { .. })
    ));
}

#[test]
fn test_open_non_export() {
    let dir = tempfile::TempDir::new().unwrap();
    let text = dir.path().join("notes.txt");
    fs::write(&text, "not a zip").unwrap();

    assert!(matches!(BriskResults::open(&text), Err(Error::NotAResultSource(_))));
    assert!(matches!(
        BriskResults::open(dir.path().join("missing")),
        Err(Error::NotAResultSource(_))
    ));
}

// =================================================================================================
// FED
// =================================================================================================

#[test]
fn test_fed_co_in_smoke_layer() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();

    // 3500 ppm CO: 0.1 per minute, reaching the cap at the end of the run
    let fed = results
        .calculate_fed_co_path(&EgressPath::single("Lounge"), &FedOptions::default())
        .unwrap();
    assert!(relative_error(fed.values()[3], 0.3) < 1e-9);
    assert!(relative_error(fed.last_value(), 1.0) < 1e-9);
    assert!(fed.max() <= 1.0);
    assert!((fed.threshold_time(0.3).unwrap() - 180.0).abs() < 1e-6);
}

#[test]
fn test_fed_co_below_smoke_layer() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();

    // The hall layer stays above head height: clean lower layer air
    let fed = results
        .calculate_fed_co_path(&EgressPath::single("Hall"), &FedOptions::default())
        .unwrap();
    assert_eq!(fed.max(), 0.0);

    // Below the 1 m lounge layer the air is clean
    let low = FedOptions::default().with_monitoring_height(0.5);
    let fed = results.calculate_fed_co_path(&EgressPath::single("Lounge"), &low).unwrap();
    assert_eq!(fed.max(), 0.0);
}

#[test]
fn test_fed_co_egress_path() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();

    let path = EgressPath::new(["Lounge", "Hall"], [150.0]).unwrap();
    let fed = results.calculate_fed_co_path(&path, &FedOptions::default()).unwrap();

    // 2.5 minutes in the lounge then clean air
    assert!(relative_error(fed.last_value(), 0.25) < 1e-9);
    assert_eq!(fed.threshold_time(0.3), None);
    assert!(fed.times().contains(&150.0));
    assert_eq!(*fed.times().last().unwrap(), END_TIME);

    assert_eq!(
        path.describe(results.path_end_time(&path).unwrap()),
        "Lounge (0-150s) - Hall (150-600s)"
    );
}

#[test]
fn test_fed_thermal() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();
    let options = FedOptions::default();

    let lounge = results
        .calculate_fed_thermal_path(&EgressPath::single("Lounge"), &options)
        .unwrap();
    let per_minute = thermal_increment(100.0, 100.0, 1.0, 1.0);
    assert!(relative_error(lounge.values()[1], per_minute) < 1e-9);

    // 20 °C air and a weak radiating layer: no meaningful dose
    let hall = results
        .calculate_fed_thermal_path(&EgressPath::single("Hall"), &options)
        .unwrap();
    assert!(hall.max() < 1e-6);
}

#[test]
fn test_room_feds_follow_room_order() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.archive).unwrap();
    let options = FedOptions::default();

    let co = results.calculate_room_feds(&CoDose, None, &options).unwrap();
    let names: Vec<&str> = co.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Lounge", "Hall"]);

    let thermal = results
        .calculate_room_feds(&ThermalDose, Some(&["Hall"]), &options)
        .unwrap();
    assert_eq!(thermal.len(), 1);

    assert!(results.calculate_room_feds(&CoDose, Some(&["Attic"]), &options).is_err());
}

#[test]
fn test_path_transition_after_results_end() {
    let fixture = ExportFixture::new();
    let results = BriskResults::open(&fixture.folder).unwrap();

    let path = EgressPath::new(["Lounge"], [900.0]).unwrap();
    let fed = results.calculate_fed_co_path(&path, &FedOptions::default()).unwrap();
    assert_eq!(*fed.times().last().unwrap(), END_TIME);
}
