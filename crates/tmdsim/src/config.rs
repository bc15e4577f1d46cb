//! TOML configuration.
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! reference setup:
//!
//! ```toml
//! [simulation]
//! gravity = 9.81
//! initial_angle_deg = 15.0
//! duration = 10.0
//! fps = 25
//!
//! [sweeps.mass]
//! masses = [50.0, 100.0, 150.0, 200.0, 250.0, 300.0]
//! length = 3.0
//! damping_coefficient = 0.2
//!
//! [structure]
//! pendulum_length = 3.5
//! ```

use std::fs;
use std::path::Path;

use pendulum::sweep::{
    REFERENCE_LENGTHS, REFERENCE_MASSES, REFERENCE_OFFSETS, REFERENCE_POSITIONS,
};
use pendulum::{
    DampingLaw, GRAVITY, StructureLayout, Sweep, SweepKind, SweepSettings, TimeGrid,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Settings shared by every evaluation.
    pub simulation: SimulationConfig,
    /// Sweep definitions.
    pub sweeps: SweepsConfig,
    /// Structure geometry.
    pub structure: StructureLayout,
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file can't be read and
    /// [`Error::Config`] when it doesn't parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TomlSerialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds the sweep of the given kind.
    ///
    /// # Errors
    ///
    /// Fails when the simulation section yields an invalid time grid.
    pub fn sweep(&self, kind: SweepKind) -> Result<Sweep> {
        let settings = self.simulation.settings()?;
        let sweeps = &self.sweeps;
        let sweep = match kind {
            SweepKind::Mass => Sweep::by_mass(
                &settings,
                &sweeps.mass.masses,
                sweeps.mass.length,
                DampingLaw::InverseSqrtMass {
                    coefficient: sweeps.mass.damping_coefficient,
                },
            ),
            SweepKind::Length => Sweep::by_length(
                &settings,
                &sweeps.length.lengths,
                sweeps.length.mass,
                sweeps.length.damping_ratio,
            ),
            SweepKind::Position => {
                let positions: Vec<_> = sweeps
                    .position
                    .positions
                    .iter()
                    .map(|p| (p.name.clone(), p.offset))
                    .collect();
                Sweep::by_position(
                    &settings,
                    &positions,
                    sweeps.position.mass,
                    sweeps.position.length,
                    sweeps.position.damping_ratio,
                )
            }
        };
        Ok(sweep)
    }
}

/// Settings shared by every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Release angle (degrees).
    pub initial_angle_deg: f64,
    /// Simulated seconds.
    pub duration: f64,
    /// Samples per second.
    pub fps: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            initial_angle_deg: 15.0,
            duration: pendulum::DEFAULT_DURATION,
            fps: pendulum::DEFAULT_FPS,
        }
    }
}

impl SimulationConfig {
    /// Release angle in radians.
    pub fn initial_angle(&self) -> f64 {
        self.initial_angle_deg.to_radians()
    }

    /// Time grid of `duration * fps` samples.
    ///
    /// # Errors
    ///
    /// Fails for a negative duration or a zero sample count.
    pub fn time_grid(&self) -> Result<TimeGrid> {
        Ok(TimeGrid::from_duration(self.duration, self.fps)?)
    }

    /// Sweep settings built from this section.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::time_grid`].
    pub fn settings(&self) -> Result<SweepSettings> {
        Ok(SweepSettings {
            initial_angle: self.initial_angle(),
            gravity: self.gravity,
            time_grid: self.time_grid()?,
        })
    }
}

/// All sweep definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepsConfig {
    /// Mass sweep.
    pub mass: MassSweepConfig,
    /// Length sweep.
    pub length: LengthSweepConfig,
    /// Mounting position sweep.
    pub position: PositionSweepConfig,
}

/// Mass sweep: damping is `damping_coefficient / sqrt(mass)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MassSweepConfig {
    /// Masses to compare (kg).
    pub masses: Vec<f64>,
    /// Pendulum length (m).
    pub length: f64,
    /// Damping ratio at unit mass.
    pub damping_coefficient: f64,
}

impl Default for MassSweepConfig {
    fn default() -> Self {
        Self {
            masses: REFERENCE_MASSES.to_vec(),
            length: 3.0,
            damping_coefficient: 0.2,
        }
    }
}

/// Length sweep at fixed mass and damping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LengthSweepConfig {
    /// Lengths to compare (m).
    pub lengths: Vec<f64>,
    /// Bob mass (kg).
    pub mass: f64,
    /// Damping ratio.
    pub damping_ratio: f64,
}

impl Default for LengthSweepConfig {
    fn default() -> Self {
        Self {
            lengths: REFERENCE_LENGTHS.to_vec(),
            mass: 200.0,
            damping_ratio: 0.05,
        }
    }
}

/// Mounting position sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PositionSweepConfig {
    /// Bob mass (kg).
    pub mass: f64,
    /// Pendulum length (m).
    pub length: f64,
    /// Damping ratio.
    pub damping_ratio: f64,
    /// Named offsets, top to bottom.
    pub positions: Vec<MountingPosition>,
}

impl Default for PositionSweepConfig {
    fn default() -> Self {
        Self {
            mass: 200.0,
            length: 3.0,
            damping_ratio: 0.05,
            positions: REFERENCE_POSITIONS
                .iter()
                .zip(REFERENCE_OFFSETS)
                .map(|(name, offset)| MountingPosition {
                    name: (*name).to_string(),
                    offset,
                })
                .collect(),
        }
    }
}

/// A named mounting offset on the tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MountingPosition {
    /// Legend label.
    pub name: String,
    /// Vertical offset (m).
    pub offset: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn default_sweeps_match_reference() {
        let config = Config::default();
        let settings = SweepSettings::default();
        for kind in SweepKind::ALL {
            assert_eq!(
                config.sweep(kind).unwrap(),
                Sweep::reference(kind, &settings),
                "{kind:?} sweep differs from reference"
            );
        }
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
[simulation]
fps = 50

[sweeps.length]
lengths = [1.0, 2.0]

[structure]
pendulum_length = 2.0
"#,
        )
        .unwrap();
        assert_eq!(config.simulation.fps, 50);
        assert!((config.simulation.gravity - GRAVITY).abs() < f64::EPSILON);
        assert_eq!(config.sweeps.length.lengths, vec![1.0, 2.0]);
        assert!((config.sweeps.length.mass - 200.0).abs() < f64::EPSILON);
        assert!((config.structure.pendulum_length - 2.0).abs() < f64::EPSILON);
        assert!((config.structure.tower_height - 10.0).abs() < f64::EPSILON);

        let sweep = config.sweep(SweepKind::Length).unwrap();
        assert_eq!(sweep.cases().len(), 2);
        assert_eq!(sweep.cases()[0].parameters.time_grid.len(), 500);
    }

    #[test]
    fn positions_table_array() {
        let config = Config::from_toml(
            r#"
[[sweeps.position.positions]]
name = "deck"
offset = 1.0

[[sweeps.position.positions]]
name = "keel"
offset = -1.0
"#,
        )
        .unwrap();
        let sweep = config.sweep(SweepKind::Position).unwrap();
        let labels: Vec<_> = sweep.cases().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["deck", "keel"]);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(Config::from_toml("[simulation]\nwind = 3.0\n").is_err());
    }

    #[test]
    fn invalid_grid_reported() {
        let config = Config::from_toml("[simulation]\nfps = 0\n").unwrap();
        assert!(matches!(
            config.sweep(SweepKind::Mass),
            Err(Error::Model(pendulum::Error::EmptyTimeGrid))
        ));
    }

    #[test]
    fn toml_round_trip() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[simulation]"));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/tmdsim.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
