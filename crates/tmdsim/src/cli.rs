//! Command-line interface for `tmdsim`.
//!
//! # Examples
//!
//! ```bash
//! # One trajectory as CSV on stdout
//! tmdsim evaluate --mass 200 --length 3 --damping-ratio 0.05
//!
//! # All reference sweeps, CSV + PNG into ./plots
//! tmdsim sweep all --out-dir plots
//!
//! # Structure geometry as JSON
//! tmdsim scene
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pendulum::SweepKind;

/// Tuned-mass-damper pendulum trajectories.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tmdsim",
    author,
    version,
    about = "Evaluate, sweep and plot tuned-mass-damper pendulum trajectories"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, short = 'c', global = true, env = "TMDSIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Evaluate a single trajectory
    Evaluate(EvaluateArgs),

    /// Run reference parameter sweeps
    Sweep(SweepArgs),

    /// Print the structure layout as JSON
    Scene(SceneArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for `evaluate`.
#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Bob mass (kg)
    #[arg(long, default_value_t = 200.0)]
    pub mass: f64,

    /// Pendulum length (m)
    #[arg(long, short = 'l', default_value_t = 3.0)]
    pub length: f64,

    /// Damping ratio, in [0, 1)
    #[arg(long, short = 'z', default_value_t = 0.05)]
    pub damping_ratio: f64,

    /// Mounting offset added to every height (m)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub offset: f64,

    /// Release angle in degrees (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    pub initial_angle_deg: Option<f64>,

    /// Gravitational acceleration (overrides config)
    #[arg(long)]
    pub gravity: Option<f64>,

    /// Simulated seconds (overrides config)
    #[arg(long)]
    pub duration: Option<f64>,

    /// Samples per second (overrides config)
    #[arg(long)]
    pub fps: Option<u32>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Also render a PNG chart to this path
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

/// Arguments for `sweep`.
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Which sweep to run
    #[arg(value_enum, default_value_t = SweepSelection::All)]
    pub which: SweepSelection,

    /// Directory for output files
    #[arg(long, short = 'd', default_value = ".", env = "TMDSIM_OUT_DIR")]
    pub out_dir: PathBuf,

    /// Data file format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Skip PNG charts
    #[arg(long)]
    pub no_plot: bool,
}

/// Arguments for `scene`.
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Data output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Sweep selection on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepSelection {
    /// Vary mass (damping follows mass)
    Mass,
    /// Vary pendulum length
    Length,
    /// Vary mounting position
    Position,
    /// All three
    All,
}

impl SweepSelection {
    /// Sweep kinds to run, in reference order.
    pub fn kinds(self) -> Vec<SweepKind> {
        match self {
            Self::Mass => vec![SweepKind::Mass],
            Self::Length => vec![SweepKind::Length],
            Self::Position => vec![SweepKind::Position],
            Self::All => SweepKind::ALL.to_vec(),
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Filter directive for `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["tmdsim"]).is_err());
    }

    #[test]
    fn cli_parses_evaluate_defaults() {
        let cli = Cli::try_parse_from(["tmdsim", "evaluate"]).unwrap();
        match cli.command {
            Command::Evaluate(args) => {
                assert!((args.mass - 200.0).abs() < f64::EPSILON);
                assert!((args.length - 3.0).abs() < f64::EPSILON);
                assert!((args.damping_ratio - 0.05).abs() < f64::EPSILON);
                assert!(args.offset.abs() < f64::EPSILON);
                assert!(args.gravity.is_none());
                assert_eq!(args.format, OutputFormat::Csv);
                assert!(args.output.is_none());
                assert!(args.plot.is_none());
            }
            other => panic!("Expected Evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_evaluate_overrides() {
        let cli = Cli::try_parse_from([
            "tmdsim",
            "evaluate",
            "--mass",
            "50",
            "-l",
            "2.5",
            "-z",
            "0.1",
            "--offset",
            "-0.2",
            "--fps",
            "50",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Command::Evaluate(args) => {
                assert!((args.mass - 50.0).abs() < f64::EPSILON);
                assert!((args.length - 2.5).abs() < f64::EPSILON);
                assert!((args.damping_ratio - 0.1).abs() < f64::EPSILON);
                assert!((args.offset + 0.2).abs() < f64::EPSILON);
                assert_eq!(args.fps, Some(50));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("Expected Evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_sweep() {
        let cli = Cli::try_parse_from(["tmdsim", "sweep"]).unwrap();
        match cli.command {
            Command::Sweep(args) => {
                assert_eq!(args.which, SweepSelection::All);
                assert!(!args.no_plot);
            }
            other => panic!("Expected Sweep command, got {other:?}"),
        }

        let cli = Cli::try_parse_from(["tmdsim", "sweep", "length", "--no-plot", "-d", "/tmp/x"])
            .unwrap();
        match cli.command {
            Command::Sweep(args) => {
                assert_eq!(args.which, SweepSelection::Length);
                assert!(args.no_plot);
                assert_eq!(args.out_dir, PathBuf::from("/tmp/x"));
            }
            other => panic!("Expected Sweep command, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_sweep() {
        assert!(Cli::try_parse_from(["tmdsim", "sweep", "wind"]).is_err());
    }

    #[test]
    fn cli_parses_global_config() {
        let cli = Cli::try_parse_from(["tmdsim", "scene", "--config", "rig.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("rig.toml")));
        assert!(matches!(cli.command, Command::Scene(_)));
    }

    #[test]
    fn cli_parses_verbose() {
        let cli = Cli::try_parse_from(["tmdsim", "config"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Warn);

        let cli = Cli::try_parse_from(["tmdsim", "-v", "config"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Info);

        let cli = Cli::try_parse_from(["tmdsim", "-vv", "config"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Debug);

        let cli = Cli::try_parse_from(["tmdsim", "-vvv", "config"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Trace);
    }

    #[test]
    fn sweep_selection_kinds() {
        assert_eq!(SweepSelection::Mass.kinds(), vec![SweepKind::Mass]);
        assert_eq!(SweepSelection::All.kinds().len(), 3);
    }

    #[test]
    fn output_format_extension() {
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
