//! Parameter sweeps over mass, length and mounting position.
//!
//! Each sweep is a titled family of labelled cases sharing one time grid.
//! The three reference sweeps compare six pendulums each.

use crate::error::{Error, Result};
use crate::grid::TimeGrid;
use crate::trajectory::{DEFAULT_INITIAL_ANGLE, GRAVITY, SimulationParameters, Trajectory};

/// Masses compared by [`Sweep::by_mass`] (kg).
pub const REFERENCE_MASSES: [f64; 6] = [50.0, 100.0, 150.0, 200.0, 250.0, 300.0];

/// Lengths compared by [`Sweep::by_length`] (m).
pub const REFERENCE_LENGTHS: [f64; 6] = [1.5, 2.0, 2.5, 3.0, 3.5, 4.0];

/// Mounting offsets compared by [`Sweep::by_position`] (m).
pub const REFERENCE_OFFSETS: [f64; 6] = [3.5, 3.0, 2.25, 0.75, 0.3, -0.2];

/// Names of the mounting positions, top to bottom.
pub const REFERENCE_POSITIONS: [&str; 6] = [
    "very top",
    "top",
    "upper middle",
    "lower middle",
    "bottom",
    "very bottom",
];

/// How a case's damping ratio is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DampingLaw {
    /// Same ratio for every mass.
    Fixed(f64),
    /// `coefficient / sqrt(mass)`: heavier bobs damp less.
    ///
    /// An example parameterization, not a physical law.
    InverseSqrtMass {
        /// Ratio at unit mass.
        coefficient: f64,
    },
}

impl DampingLaw {
    /// Damping ratio for a bob of `mass` kg.
    pub fn ratio(&self, mass: f64) -> f64 {
        match *self {
            Self::Fixed(ratio) => ratio,
            Self::InverseSqrtMass { coefficient } => coefficient / mass.sqrt(),
        }
    }
}

impl Default for DampingLaw {
    fn default() -> Self {
        Self::Fixed(0.05)
    }
}

/// Which quantity a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SweepKind {
    /// Bob mass, with damping derived from mass.
    Mass,
    /// Pendulum length.
    Length,
    /// Mounting offset on the tower.
    Position,
}

impl SweepKind {
    /// All kinds in reference order.
    pub const ALL: [Self; 3] = [Self::Mass, Self::Length, Self::Position];

    /// Chart title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Mass => "Damped Pendulum Trajectories by Mass",
            Self::Length => "Damped Pendulum Trajectories by Length",
            Self::Position => "Damped Pendulum Trajectories by Mounting Position",
        }
    }

    /// Output file name without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Mass => "pendulum_mass_variable_damping",
            Self::Length => "pendulum_length_variation",
            Self::Position => "pendulum_position_6variation",
        }
    }
}

/// Shared settings for building sweeps.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSettings {
    /// Release angle (radians).
    pub initial_angle: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Sample times shared by all cases.
    pub time_grid: TimeGrid,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            initial_angle: DEFAULT_INITIAL_ANGLE,
            gravity: GRAVITY,
            time_grid: TimeGrid::default(),
        }
    }
}

/// One labelled case of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepCase {
    /// Legend label.
    pub label: String,
    /// Parameters evaluated for this case.
    pub parameters: SimulationParameters,
}

/// A titled family of cases.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    kind: SweepKind,
    cases: Vec<SweepCase>,
}

impl Sweep {
    /// Varies mass at `length`, deriving damping through `law`.
    pub fn by_mass(
        settings: &SweepSettings,
        masses: &[f64],
        length: f64,
        law: DampingLaw,
    ) -> Self {
        let cases = masses
            .iter()
            .map(|&mass| SweepCase {
                label: format!("mass = {} kg", format_number(mass)),
                parameters: base(settings, mass, length, law.ratio(mass)),
            })
            .collect();
        Self {
            kind: SweepKind::Mass,
            cases,
        }
    }

    /// Varies length at fixed mass and damping.
    pub fn by_length(settings: &SweepSettings, lengths: &[f64], mass: f64, damping_ratio: f64) -> Self {
        let cases = lengths
            .iter()
            .map(|&length| SweepCase {
                label: format!("length = {length:?} m"),
                parameters: base(settings, mass, length, damping_ratio),
            })
            .collect();
        Self {
            kind: SweepKind::Length,
            cases,
        }
    }

    /// Varies mounting offset, one `(label, offset)` pair per case.
    pub fn by_position(
        settings: &SweepSettings,
        positions: &[(String, f64)],
        mass: f64,
        length: f64,
        damping_ratio: f64,
    ) -> Self {
        let cases = positions
            .iter()
            .map(|(label, offset)| SweepCase {
                label: label.clone(),
                parameters: base(settings, mass, length, damping_ratio).with_offset(*offset),
            })
            .collect();
        Self {
            kind: SweepKind::Position,
            cases,
        }
    }

    /// The reference sweep of the given kind.
    pub fn reference(kind: SweepKind, settings: &SweepSettings) -> Self {
        match kind {
            SweepKind::Mass => Self::by_mass(
                settings,
                &REFERENCE_MASSES,
                3.0,
                DampingLaw::InverseSqrtMass { coefficient: 0.2 },
            ),
            SweepKind::Length => Self::by_length(settings, &REFERENCE_LENGTHS, 200.0, 0.05),
            SweepKind::Position => Self::by_position(
                settings,
                &reference_positions(),
                200.0,
                3.0,
                0.05,
            ),
        }
    }

    /// Which quantity varies.
    pub fn kind(&self) -> SweepKind {
        self.kind
    }

    /// Chart title.
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Cases in order.
    pub fn cases(&self) -> &[SweepCase] {
        &self.cases
    }

    /// Evaluates every case in order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySweep`] when there are no cases; otherwise stops at the
    /// first case with invalid parameters.
    pub fn run(&self) -> Result<SweepRun> {
        if self.cases.is_empty() {
            return Err(Error::EmptySweep);
        }
        let series = self
            .cases
            .iter()
            .map(|case| {
                case.parameters.evaluate().map(|trajectory| Series {
                    label: case.label.clone(),
                    trajectory,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SweepRun {
            kind: self.kind,
            series,
        })
    }
}

/// Evaluated sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepRun {
    /// Which quantity varied.
    pub kind: SweepKind,
    /// One labelled trajectory per case.
    pub series: Vec<Series>,
}

impl SweepRun {
    /// Chart title.
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// A labelled trajectory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// Evaluated samples.
    pub trajectory: Trajectory,
}

/// Reference `(label, offset)` pairs.
pub fn reference_positions() -> Vec<(String, f64)> {
    REFERENCE_POSITIONS
        .iter()
        .zip(REFERENCE_OFFSETS)
        .map(|(name, offset)| ((*name).to_string(), offset))
        .collect()
}

fn base(settings: &SweepSettings, mass: f64, length: f64, damping_ratio: f64) -> SimulationParameters {
    SimulationParameters::new(mass, length, damping_ratio)
        .with_initial_angle(settings.initial_angle)
        .with_gravity(settings.gravity)
        .with_time_grid(settings.time_grid.clone())
}

// Whole masses print without a fractional part ("50", not "50.0").
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
