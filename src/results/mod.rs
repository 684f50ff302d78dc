//! Reading B-RISK results
//!
//! This module turns a B-RISK result export into a single [`BriskResults`]
//! value that the tenability calculations and the plots read from.
//!
//! # Files read
//!
//! | Suffix          | Module        | Content                                  |
//! |-----------------|---------------|------------------------------------------|
//! | `_log.rtf`      | [`log`]       | Sprinkler and smoke detector activations |
//! | `input1.xml`    | [`input`]     | Room names and geometry                  |
//! | `_results.xlsx` | [`workbook`]  | Time series per room and for `Outside`   |
//!
//! The export can be a folder or a zip of that folder ([`source`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use bplot::results::BriskResults;
//!
//! let results = BriskResults::open("runs/apartment.zip")?;
//! for room in results.room_names() {
//!     println!("{room}");
//! }
//! println!("Simulated until {} s", results.max_time());
//! ```

pub mod columns;
pub mod error;
pub mod input;
pub mod log;
pub mod source;
pub mod table;
pub mod workbook;

use std::collections::BTreeMap;
use std::path::Path;

pub use error::{Error, Result};
pub use input::RoomGeometry;
pub use log::{Event, EventKind, RunLog};
pub use source::ResultSource;
pub use table::{ResultTable, TIME_COLUMN};

/// Sheet holding the results outside the building
pub const OUTSIDE: &str = "Outside";

/// Suffixes of the files that make up a B-RISK export
pub const LOG_SUFFIX: &str = "_log.rtf";
pub const INPUT_SUFFIX: &str = "input1.xml";
pub const RESULTS_SUFFIX: &str = "_results.xlsx";

/// A room: its geometry and its result table
#[derive(Debug, Clone)]
pub struct Room {
    pub geometry: RoomGeometry,
    pub table: ResultTable,
}

/// All results of one B-RISK run
///
/// Rooms keep the order of the results workbook. Every room table carries the
/// room name from the input file instead of its `Room N` sheet name.
#[derive(Debug, Clone)]
pub struct BriskResults {
    log: RunLog,
    rooms: Vec<Room>,
    geometry_by_id: BTreeMap<u32, RoomGeometry>,
    outside: ResultTable,
}

impl BriskResults {
    /// Read the log, input file and results workbook of a run.
    ///
    /// `path` is the results folder, the zip archive, or the zip archive
    /// without its `.zip` extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ::log::info!(
            "bplot version: {} (run on {})",
            env!("CARGO_PKG_VERSION"),
            chrono::Local::now().format("%d-%m-%Y")
        );

        let source = ResultSource::open(path)?;
        Self::from_source(&source)
    }

    /// Read all result files from an already resolved source
    pub fn from_source(source: &ResultSource) -> Result<Self> {
        let run_log = RunLog::from_rtf_bytes(&source.read_by_suffix(LOG_SUFFIX)?);
        ::log::info!("READ log ({} lines)", run_log.lines.len());

        let xml = source.read_by_suffix(INPUT_SUFFIX)?;
        let geometry = input::parse_rooms(&String::from_utf8_lossy(&xml))?;
        ::log::info!("READ {INPUT_SUFFIX} ({} rooms)", geometry.len());

        let tables = workbook::read_workbook(&source.read_by_suffix(RESULTS_SUFFIX)?)?;
        let results = Self::from_parts(run_log, geometry, tables)?;

        ::log::info!(
            "READ results: from {} to {} seconds",
            results.outside.start_time()?,
            results.outside.end_time()?
        );

        Ok(results)
    }

    /// Assemble results from already parsed parts.
    ///
    /// `tables` are the workbook sheets: `Room N` sheets are matched to the
    /// room with id `N` and renamed after it; the `Outside` sheet is required.
    /// Other sheets are ignored.
    pub fn from_parts(
        log: RunLog,
        geometry: Vec<RoomGeometry>,
        tables: Vec<ResultTable>,
    ) -> Result<Self> {
        let geometry_by_id: BTreeMap<u32, RoomGeometry> =
            geometry.into_iter().map(|g| (g.id, g)).collect();

        let mut rooms = Vec::new();
        let mut outside = None;

        for mut table in tables {
            if table.name() == OUTSIDE {
                outside = Some(table);
                continue;
            }

            let Some(id) = room_sheet_id(table.name()) else {
                ::log::debug!("ignoring sheet {}", table.name());
                continue;
            };

            let geometry = geometry_by_id
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::UnknownRoom {
                    sheet: table.name().to_string(),
                })?;

            table.set_name(geometry.name.clone());
            rooms.push(Room { geometry, table });
        }

        let outside = outside.ok_or_else(|| Error::MissingSheet(OUTSIDE.to_string()))?;

        Ok(Self {
            log,
            rooms,
            geometry_by_id,
            outside,
        })
    }

    /// Room names in workbook order (excluding `Outside`)
    pub fn room_names(&self) -> Vec<&str> {
        self.rooms.iter().map(|r| r.geometry.name.as_str()).collect()
    }

    /// All rooms in workbook order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Look up a room by name
    pub fn room(&self, name: &str) -> Result<&Room> {
        self.rooms
            .iter()
            .find(|r| r.geometry.name == name)
            .ok_or_else(|| Error::UnknownRoomName(name.to_string()))
    }

    /// Result table of a room, or of `Outside`
    pub fn table(&self, name: &str) -> Result<&ResultTable> {
        if name == OUTSIDE {
            return Ok(&self.outside);
        }
        self.room(name).map(|r| &r.table)
    }

    /// Geometry of a room by name
    pub fn geometry(&self, name: &str) -> Result<&RoomGeometry> {
        self.room(name).map(|r| &r.geometry)
    }

    /// Geometry of a room by its input file id
    pub fn geometry_by_id(&self, id: u32) -> Option<&RoomGeometry> {
        self.geometry_by_id.get(&id)
    }

    /// Results outside the building
    pub fn outside(&self) -> &ResultTable {
        &self.outside
    }

    /// Last time with recorded results
    pub fn max_time(&self) -> f64 {
        self.outside.end_time().unwrap_or(0.0)
    }

    /// Plain-text lines of the run log
    pub fn log_lines(&self) -> &[String] {
        &self.log.lines
    }

    pub fn sprinkler_events(&self) -> &[Event] {
        &self.log.sprinklers
    }

    pub fn smoke_detector_events(&self) -> &[Event] {
        &self.log.smoke_detectors
    }
}

/// `Room 3` -> `3`
fn room_sheet_id(sheet: &str) -> Option<u32> {
    sheet.strip_prefix("Room ")?.trim().parse().ok()
}
