//! A small but complete B-RISK export written to disk
//!
//! Two rooms with conditions simple enough to check the FED by hand:
//!
//! | Room     | Layer  | Upper layer                    | Lower layer       |
//! |----------|--------|--------------------------------|-------------------|
//! | 1 Lounge | 1.0 m  | 3500 ppm CO, 100 °C            | 0 ppm CO, 20 °C   |
//! | 2 Hall   | 2.4 m  | 1000 ppm CO, 60 °C             | 0 ppm CO, 20 °C   |
//!
//! With the default 2.0 m monitoring height an occupant of the lounge is
//! immersed in the upper layer (FED_CO grows by 0.1 per minute) while an
//! occupant of the hall breathes clean lower layer air.
//!
//! The workbook reproduces B-RISK quirks: a header-less padding column and the
//! misspelt `Layer (m)`/`CO Lower(ppm)` headers in the hall sheet.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const RUN_NAME: &str = "apartment";
pub const TIME_STEP: f64 = 60.0;
pub const END_TIME: f64 = 600.0;

pub const LOG_RTF: &str = r"{\rtf1\ansi\deff0{\fonttbl{\f0 Arial;}}
{\colortbl;\red0\green0\blue0;}
\f0\fs20 B-RISK run apartment\par
0 sec Simulation started\par
45 sec Smoke detector 1 in room 2 operates\par
120 sec Sprinkler 1 in room 1 responded\par
600 sec Simulation ended\par
}";

pub const INPUT_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<simulation>
  <general><description>Apartment fire</description></general>
  <rooms>
    <room id="1">
      <description>Lounge</description>
      <max_height>2.4</max_height>
      <min_height>2.4</min_height>
      <length>5</length>
      <width>4</width>
    </room>
    <room id="2">
      <description>Hall</description>
      <max_height>2.4</max_height>
      <min_height>2.4</min_height>
      <length>6</length>
      <width>1.5</width>
    </room>
  </rooms>
</simulation>
"#;

/// Conditions of one room
struct RoomConditions {
    layer: f64,
    co_upper: f64,
    upper_temp: f64,
    hrr_peak: f64,
}

const LOUNGE: RoomConditions = RoomConditions {
    layer: 1.0,
    co_upper: 3500.0,
    upper_temp: 100.0,
    hrr_peak: 500.0,
};

const HALL: RoomConditions = RoomConditions {
    layer: 2.4,
    co_upper: 1000.0,
    upper_temp: 60.0,
    hrr_peak: 0.0,
};

fn times() -> Vec<f64> {
    let n = (END_TIME / TIME_STEP) as usize;
    (0..=n).map(|i| i as f64 * TIME_STEP).collect()
}

type Column = (&'static str, Box<dyn Fn(f64) -> f64>);

fn col(header: &'static str, value: impl Fn(f64) -> f64 + 'static) -> Column {
    (header, Box::new(value))
}

/// `(header, value at t)` for every column of a room sheet
fn room_columns(room: &RoomConditions, misspelt: bool) -> Vec<Column> {
    let RoomConditions {
        layer,
        co_upper,
        upper_temp,
        hrr_peak,
    } = *room;
    let ramp = move |peak: f64| move |t: f64| peak * t / END_TIME;

    vec![
        col("Time (sec)", |t| t),
        col(if misspelt { "Layer (m)" } else { "Layer Height (m)" }, move |_| layer),
        col("Upper Layer Temp (C)", move |_| upper_temp),
        col("Lower Layer Temp (C)", |_| 20.0),
        col("HRR (kW)", ramp(hrr_peak)),
        col("Mass Loss Rate (kg/s)", ramp(hrr_peak / 20_000.0)),
        col("Plume (kg/s)", ramp(hrr_peak / 500.0)),
        col("Pressure (Pa)", ramp(5.0)),
        col("Visibility (m)", |t| 10.0 - 9.0 * t / END_TIME),
        col("CO2 Upper(%)", |_| 0.0),
        col("CO2 Lower(%)", |_| 0.0),
        col("CO Upper (ppm)", move |_| co_upper),
        col(if misspelt { "CO Lower(ppm)" } else { "CO Lower (ppm)" }, |_| 0.0),
        col("O2 Upper (%)", |_| 20.9),
        col("O2 Lower (%)", |_| 20.9),
        col("HCN Upper (ppm)", ramp(20.0)),
        col("HCN Lower (ppm)", |_| 0.0),
        col("Ceiling Temp (C)", move |_| upper_temp + 10.0),
        col("Upper Wall Temp (C)", move |_| upper_temp - 10.0),
        col("Lower Wall Temp (C)", |_| 20.0),
        col("Rad on Floor (kW/m2)", ramp(2.0)),
        col("Rad on Target (kW/m2)", ramp(1.0)),
        col("Vent Flow to Upper Layer (kg/s)", ramp(0.2)),
        col("Vent Flow to Lower Layer (kg/s)", ramp(0.1)),
        col("Vent Flow to Outside (m3/s)", ramp(0.3)),
    ]
}

/// Bytes of the results workbook
pub fn results_workbook() -> Vec<u8> {
    results_workbook_without(&[])
}

/// Bytes of the results workbook, the `omitted` room columns left out
pub fn results_workbook_without(omitted: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let time = times();

    for (sheet_name, room, misspelt) in [("Room 1", &LOUNGE, false), ("Room 2", &HALL, true)] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();

        let mut columns = room_columns(room, misspelt);
        columns.retain(|(header, _)| !omitted.contains(header));
        for (col, (header, value)) in columns.iter().enumerate() {
            let col = col as u16;
            sheet.write_string(0, col, *header).unwrap();
            for (row, t) in time.iter().enumerate() {
                sheet.write_number(row as u32 + 1, col, value(*t)).unwrap();
            }
        }

        // Header-less padding column
        let padding = columns.len() as u16;
        for row in 1..=time.len() as u32 {
            sheet.write_number(row, padding, 0.0).unwrap();
        }
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Outside").unwrap();
    sheet.write_string(0, 0, "Time (sec)").unwrap();
    sheet.write_string(0, 1, "Vent Fire (kW)").unwrap();
    for (row, t) in time.iter().enumerate() {
        let row = row as u32 + 1;
        sheet.write_number(row, 0, *t).unwrap();
        sheet.write_number(row, 1, if *t >= 300.0 { 50.0 } else { 0.0 }).unwrap();
    }

    workbook.save_to_buffer().unwrap()
}

/// `(file name, content)` of every file of the export
pub fn export_files() -> Vec<(String, Vec<u8>)> {
    export_files_with(results_workbook())
}

fn export_files_with(workbook: Vec<u8>) -> Vec<(String, Vec<u8>)> {
    vec![
        (format!("{RUN_NAME}_log.rtf"), LOG_RTF.as_bytes().to_vec()),
        ("input1.xml".to_string(), INPUT_XML.as_bytes().to_vec()),
        (format!("{RUN_NAME}_results.xlsx"), workbook),
    ]
}

/// Write the export as a results folder `dir/<run>`
pub fn write_export(dir: &Path) -> PathBuf {
    write_files(dir, export_files())
}

/// Write an export whose room sheets lack the `omitted` columns
pub fn write_export_without(dir: &Path, omitted: &[&str]) -> PathBuf {
    write_files(dir, export_files_with(results_workbook_without(omitted)))
}

fn write_files(dir: &Path, files: Vec<(String, Vec<u8>)>) -> PathBuf {
    let run_dir = dir.join(RUN_NAME);
    fs::create_dir_all(&run_dir).unwrap();
    for (name, content) in files {
        fs::write(run_dir.join(name), content).unwrap();
    }
    run_dir
}

/// Write the export as `dir/<run>.zip`, files inside a `<run>/` folder
pub fn write_zip_export(dir: &Path) -> PathBuf {
    let path = dir.join(format!("{RUN_NAME}.zip"));
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    for (name, content) in export_files() {
        writer
            .start_file(format!("{RUN_NAME}/{name}"), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(&content).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Export folder and zip archive inside a temporary directory
pub struct ExportFixture {
    pub dir: TempDir,
    pub folder: PathBuf,
    pub archive: PathBuf,
}

impl ExportFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let folder = write_export(dir.path());
        let archive = write_zip_export(dir.path());
        Self { dir, folder, archive }
    }
}
