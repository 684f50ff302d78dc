//! bplot, plots and tenability of a B-RISK run

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser as _;

use bplot::output::export::{export_fed_csv, export_table_csv, CsvConfig, CsvMetadata};
use bplot::output::visualization::{Figure, Variable};
use bplot::results::{self, BriskResults};
use bplot::tenability::{CoDose, EgressPath, FedOptions, ThermalDose};

/// Logging verbosity
#[derive(Debug, clap::Args)]
struct LoggingArgs {
    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = clap::ArgAction::Count, group = "verbosity")]
    verbose: u8,
    /// Only show errors
    #[arg(short, long, group = "verbosity")]
    quiet: bool,
}

impl LoggingArgs {
    /// `Info` by default, `Error` with `-q`, `Debug`/`Trace` with `-v`/`-vv`.
    /// The `BPLOT_LOG` environment variable is applied first.
    fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Info);
        builder.parse_env("BPLOT_LOG");

        if self.quiet {
            builder.filter_level(log::LevelFilter::Error);
        } else if self.verbose > 0 {
            builder.filter_level(match self.verbose {
                1 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            });
        }
        builder.init();
    }
}

/// Plot the results of a B-RISK run and assess tenability
#[derive(clap::Parser, Debug)]
#[command(author, version, about)]
struct CliApp {
    #[command(flatten)]
    logging: LoggingArgs,
    /// Results folder or zip archive
    #[arg(value_name = "RESULTS")]
    results: PathBuf,
    /// Directory the plots and CSV files are written to
    #[arg(short, long = "output", default_value = "plots")]
    output: PathBuf,
    /// Write SVG instead of PNG
    #[arg(long)]
    svg: bool,
    /// Rooms to plot (default: all)
    #[arg(long = "room", value_name = "ROOM")]
    rooms: Vec<String>,
    /// Rooms of the egress path, in order
    #[arg(long = "path", value_name = "ROOM")]
    path: Vec<String>,
    /// Times the occupant leaves each room of the path (s)
    #[arg(long = "times", value_name = "SECONDS", requires = "path")]
    times: Vec<f64>,
    /// Height of the occupant's head (m)
    #[arg(long = "monitoring-height", default_value_t = 2.0)]
    monitoring_height: f64,
    /// FED considered untenable
    #[arg(long, default_value_t = 0.3)]
    threshold: f64,
    /// Also export every room table to CSV
    #[arg(long)]
    csv: bool,
}

struct Writer<'a> {
    directory: &'a Path,
    extension: &'static str,
}

impl Writer<'_> {
    fn save(&self, fig: &Figure, stem: &str) -> Result<(), Box<dyn Error>> {
        let path = self.directory.join(format!("{stem}.{}", self.extension));
        fig.save(&path)?;
        log::info!("WROTE {}", path.display());
        Ok(())
    }
}

/// `Bedroom 1` -> `bedroom_1`
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// File stems of the rooms; `_2`, `_3`, ... are appended to names that
/// collide with an earlier room
fn room_file_stems(rooms: &[&str]) -> Vec<String> {
    let mut taken = HashSet::new();
    rooms
        .iter()
        .map(|room| {
            let base = file_stem(room);
            let mut stem = base.clone();
            let mut n = 1;
            while !taken.insert(stem.clone()) {
                n += 1;
                stem = format!("{base}_{n}");
            }
            stem
        })
        .collect()
}

/// Plots of columns the run did not record are skipped
fn unless_missing<T>(result: results::Result<T>, plot: &str) -> Result<Option<T>, Box<dyn Error>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err @ results::Error::MissingColumn { .. }) => {
            log::warn!("skipping {plot}: {err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = CliApp::parse();
    cli.logging.initialize_logging();
    log::debug!("{cli:?}");

    let results = BriskResults::open(&cli.results)?;
    fs::create_dir_all(&cli.output)?;

    let writer = Writer {
        directory: &cli.output,
        extension: if cli.svg { "svg" } else { "png" },
    };
    let options = FedOptions::default()
        .with_monitoring_height(cli.monitoring_height)
        .with_threshold(cli.threshold);

    let selected: Vec<&str> = cli.rooms.iter().map(String::as_str).collect();
    let rooms = (!selected.is_empty()).then_some(selected.as_slice());

    // ── Result columns ──
    for variable in Variable::ALL {
        let fig = match variable {
            Variable::Hrr => results.plot_hrr(rooms, true, true),
            _ => results.plot_variable(variable, rooms, true),
        };
        if let Some(fig) = unless_missing(fig, variable.file_stem())? {
            writer.save(&fig, variable.file_stem())?;
        }
    }

    // ── FED per room ──
    if let Some(fig) = unless_missing(results.plot_room_fed_co(rooms, &options), "fed_co")? {
        writer.save(&fig, "fed_co")?;
    }
    if let Some(fig) = unless_missing(results.plot_room_fed_thermal(rooms, &options), "fed_thermal")? {
        writer.save(&fig, "fed_thermal")?;
    }

    let fed_rooms = match rooms {
        Some(rooms) => rooms.to_vec(),
        None => results.room_names(),
    };
    let stems = room_file_stems(&fed_rooms);
    for (room, stem) in fed_rooms.iter().zip(&stems) {
        let stem = format!("feds_{stem}");
        if let Some(fig) = unless_missing(results.plot_room_feds(room, &options), &stem)? {
            writer.save(&fig, &stem)?;
        }
    }

    // ── Egress path ──
    if !cli.path.is_empty() {
        let path = EgressPath::new(cli.path.iter().map(String::as_str), cli.times.iter().copied())?;
        let co = results.calculate_fed_co_path(&path, &options)?;
        let thermal = results.calculate_fed_thermal_path(&path, &options)?;

        writer.save(&results.plot_fed_path_curve(&CoDose, &path, &co, &options)?, "fed_co_path")?;
        writer.save(
            &results.plot_fed_path_curve(&ThermalDose, &path, &thermal, &options)?,
            "fed_thermal_path",
        )?;

        let description = path.describe(results.path_end_time(&path)?);
        let mut metadata = CsvMetadata::for_run(cli.results.display().to_string(), description);
        metadata.add_custom("Monitoring height", format!("{} m", options.monitoring_height));
        let config = CsvConfig::default().with_metadata(metadata);

        export_fed_csv(&co, "FED_CO", cli.output.join("fed_co_path.csv"), Some(&config))?;
        export_fed_csv(&thermal, "FED_thermal", cli.output.join("fed_thermal_path.csv"), Some(&config))?;
        log::info!("WROTE egress path FED to {}", cli.output.display());
    }

    if cli.csv {
        for (room, stem) in fed_rooms.iter().zip(&stems) {
            let path = cli.output.join(format!("{stem}.csv"));
            export_table_csv(results.table(room)?, &path, None)?;
            log::info!("WROTE {}", path.display());
        }
    }

    Ok(())
}
