#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # tmdsim
//!
//! Command-line front end for the [`pendulum`] crate.
//!
//! - `evaluate`: one trajectory to CSV/JSON, optionally a PNG chart
//! - `sweep`: the mass, length and mounting-position comparisons
//! - `scene`: the floating structure as JSON primitives
//! - `config`: the effective TOML configuration
//!
//! ## Quick start (library)
//!
//! ```rust
//! use tmdsim::{cli::Cli, run_with_writer};
//!
//! let cli = Cli::try_parse_from(["tmdsim", "evaluate", "--duration", "1", "--fps", "4"]).unwrap();
//! let mut out = Vec::new();
//! run_with_writer(&cli, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("time,z\n"));
//! ```
//!
//! ## Feature flags
//!
//! - `plot` (default): PNG charts via `plotters`

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
#[cfg(feature = "plot")]
pub mod plot;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use pendulum::{Primitive, SimulationParameters, StructureLayout, SweepRun, Trajectory};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::{Cli, Command, EvaluateArgs, SceneArgs, SweepArgs};
use crate::config::{Config, SimulationConfig};

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid model input.
    #[error(transparent)]
    Model(#[from] pendulum::Error),

    /// File or stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file did not parse.
    #[error("invalid config {}: {source}", path.display())]
    Config {
        /// File that failed.
        path: PathBuf,
        /// Parser error.
        source: toml::de::Error,
    },

    /// Configuration could not be rendered as TOML.
    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Sweep series disagree on their sample count.
    #[error("series '{label}' has {found} samples, expected {expected}")]
    RaggedSweep {
        /// Label of the mismatched series.
        label: String,
        /// Samples in the first series.
        expected: usize,
        /// Samples in this series.
        found: usize,
    },

    /// Chart rendering failed.
    #[error("plot error: {0}")]
    Plot(String),

    /// Built without the `plot` feature.
    #[error("plotting is not available: rebuild with the `plot` feature")]
    PlotUnavailable,
}

/// Runs the parsed command, writing primary output to stdout.
///
/// # Errors
///
/// Returns the first failure from configuration, evaluation or output.
pub fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    run_with_writer(cli, stdout.lock())
}

/// Runs the parsed command, writing primary output to `out`.
///
/// # Errors
///
/// Returns the first failure from configuration, evaluation or output.
pub fn run_with_writer<W: Write>(cli: &Cli, mut out: W) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        info!(path = %path.display(), "loaded config");
    }

    match &cli.command {
        Command::Evaluate(args) => evaluate(&config, args, &mut out),
        Command::Sweep(args) => sweep(&config, args, &mut out),
        Command::Scene(args) => scene(&config.structure, args, &mut out),
        Command::Config => {
            out.write_all(config.to_toml()?.as_bytes())?;
            Ok(())
        }
    }
}

fn evaluate<W: Write>(config: &Config, args: &EvaluateArgs, out: &mut W) -> Result<()> {
    let sim = SimulationConfig {
        gravity: args.gravity.unwrap_or(config.simulation.gravity),
        initial_angle_deg: args
            .initial_angle_deg
            .unwrap_or(config.simulation.initial_angle_deg),
        duration: args.duration.unwrap_or(config.simulation.duration),
        fps: args.fps.unwrap_or(config.simulation.fps),
    };

    let params = SimulationParameters::new(args.mass, args.length, args.damping_ratio)
        .with_offset(args.offset)
        .with_initial_angle(sim.initial_angle())
        .with_gravity(sim.gravity)
        .with_time_grid(sim.time_grid()?);
    let trajectory = params.evaluate()?;
    debug!(
        samples = trajectory.len(),
        min = ?trajectory.min_height(),
        max = ?trajectory.max_height(),
        "evaluated trajectory"
    );

    match &args.output {
        Some(path) => {
            output::write_trajectory(create(path)?, &trajectory, args.format)?;
            info!(path = %path.display(), "wrote trajectory");
        }
        None => output::write_trajectory(&mut *out, &trajectory, args.format)?,
    }

    if let Some(path) = &args.plot {
        let label = format!(
            "mass = {} kg, length = {} m, zeta = {}",
            args.mass, args.length, args.damping_ratio
        );
        render_trajectory_chart(path, &label, &trajectory)?;
        info!(path = %path.display(), "wrote chart");
    }
    Ok(())
}

fn sweep<W: Write>(config: &Config, args: &SweepArgs, out: &mut W) -> Result<()> {
    fs::create_dir_all(&args.out_dir)?;

    let plot = !args.no_plot && cfg!(feature = "plot");
    if !args.no_plot && !plot {
        warn!("built without the `plot` feature; skipping charts");
    }

    for kind in args.which.kinds() {
        let sweep = config.sweep(kind)?;
        debug!(kind = ?kind, cases = sweep.cases().len(), "running sweep");
        let run = sweep.run()?;

        let data_path = args
            .out_dir
            .join(format!("{}.{}", kind.file_stem(), args.format.extension()));
        output::write_sweep(create(&data_path)?, &run, args.format)?;
        info!(path = %data_path.display(), "wrote sweep data");
        writeln!(out, "{}", data_path.display())?;

        if plot {
            let chart_path = args.out_dir.join(format!("{}.png", kind.file_stem()));
            render_sweep_chart(&chart_path, &run)?;
            info!(path = %chart_path.display(), "wrote chart");
            writeln!(out, "{}", chart_path.display())?;
        }
    }
    Ok(())
}

/// JSON document emitted by `scene`.
#[derive(Debug, Serialize)]
struct SceneDocument<'a> {
    layout: &'a StructureLayout,
    pivot_height: f64,
    primitives: Vec<Primitive>,
}

fn scene<W: Write>(layout: &StructureLayout, args: &SceneArgs, out: &mut W) -> Result<()> {
    let doc = SceneDocument {
        layout,
        pivot_height: layout.pivot_height(),
        primitives: layout.primitives()?,
    };
    match &args.output {
        Some(path) => {
            let mut file = create(path)?;
            serde_json::to_writer_pretty(&mut file, &doc)?;
            writeln!(file)?;
            file.flush()?;
            info!(path = %path.display(), "wrote scene");
        }
        None => {
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

#[cfg(feature = "plot")]
fn render_sweep_chart(path: &Path, run: &SweepRun) -> Result<()> {
    plot::render_sweep(path, run)
}

#[cfg(not(feature = "plot"))]
fn render_sweep_chart(_path: &Path, _run: &SweepRun) -> Result<()> {
    Err(Error::PlotUnavailable)
}

#[cfg(feature = "plot")]
fn render_trajectory_chart(path: &Path, label: &str, trajectory: &Trajectory) -> Result<()> {
    plot::render_trajectory(path, "Damped Pendulum Trajectory", label, trajectory)
}

#[cfg(not(feature = "plot"))]
fn render_trajectory_chart(_path: &Path, _label: &str, _trajectory: &Trajectory) -> Result<()> {
    Err(Error::PlotUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run_with_writer(&cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn evaluate_writes_csv_rows() {
        let text = run_args(&["tmdsim", "evaluate", "--duration", "2", "--fps", "5"]).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "time,z");
        assert_eq!(lines.len(), 11);
        assert!(lines[1].starts_with("0,"));
        assert!(lines[10].starts_with("2,"));
    }

    #[test]
    fn evaluate_rejects_critical_damping() {
        let err = run_args(&["tmdsim", "evaluate", "--damping-ratio", "1"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Model(pendulum::Error::InvalidDampingRatio(_))
        ));
    }

    #[test]
    fn evaluate_rejects_zero_length() {
        let err = run_args(&["tmdsim", "evaluate", "--length", "0"]).unwrap_err();
        assert!(matches!(err, Error::Model(pendulum::Error::InvalidLength(_))));
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn scene_lists_primitives() {
        let text = run_args(&["tmdsim", "scene"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["primitives"].as_array().unwrap().len(), 6);
        assert_eq!(value["primitives"][3]["name"], "Central_Tower");
        assert_eq!(value["primitives"][4]["kind"], "sphere");
        assert_eq!(value["pivot_height"], 6.5);
    }

    #[test]
    fn config_prints_defaults() {
        let text = run_args(&["tmdsim", "config"]).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }

    #[test]
    fn sweep_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().to_str().unwrap();
        let text = run_args(&["tmdsim", "sweep", "mass", "--no-plot", "-d", out_dir]).unwrap();
        let csv_path = dir.path().join("pendulum_mass_variable_damping.csv");
        assert!(csv_path.exists());
        assert!(text.contains("pendulum_mass_variable_damping.csv"));
        let contents = fs::read_to_string(csv_path).unwrap();
        assert!(contents.starts_with("time,mass = 50 kg,"));
        assert_eq!(contents.lines().count(), 251);
    }
}
