//! Closed-form trajectory of an underdamped pendulum.
//!
//! The bob is released from rest at `initial_angle` and the angle decays as a
//! linear damped oscillator:
//!
//! ```text
//! ωn   = sqrt(g / L)
//! ωd   = ωn * sqrt(1 - ζ²)
//! θ(t) = θ0 * exp(-ζ ωn t) * cos(ωd t)
//! z(t) = -L * cos(θ(t)) + offset
//! ```
//!
//! `z` is the vertical position of the bob relative to the pivot, shifted by
//! the mounting offset. The structure and the pendulum are not coupled.

use std::f64::consts::TAU;

use crate::error::{Error, Result, ensure_finite};
use crate::grid::{TimeGrid, validate_samples};

/// Standard gravity in m/s².
pub const GRAVITY: f64 = 9.81;

/// Release angle used by the reference sweeps: 15 degrees.
pub const DEFAULT_INITIAL_ANGLE: f64 = 15.0 * (std::f64::consts::PI / 180.0);

/// Inputs to a single trajectory evaluation.
///
/// # Example
///
/// ```rust
/// use pendulum::SimulationParameters;
///
/// let params = SimulationParameters::new(50.0, 3.0, 0.05).with_offset(1.0);
/// let trajectory = params.evaluate().unwrap();
/// assert_eq!(trajectory.len(), params.time_grid.len());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    /// Bob mass (kg). Not part of the formula; carried for sweeps that derive
    /// damping from it.
    pub mass: f64,
    /// Pendulum length (m).
    pub length: f64,
    /// Damping ratio ζ, dimensionless.
    pub damping_ratio: f64,
    /// Mounting offset added to every vertical position (m).
    pub vertical_offset: f64,
    /// Release angle θ0 (radians).
    pub initial_angle: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Sample times.
    pub time_grid: TimeGrid,
}

impl SimulationParameters {
    /// Parameters with zero offset, a 15° release, standard gravity and the
    /// default 10 s / 25 fps grid.
    pub fn new(mass: f64, length: f64, damping_ratio: f64) -> Self {
        Self {
            mass,
            length,
            damping_ratio,
            vertical_offset: 0.0,
            initial_angle: DEFAULT_INITIAL_ANGLE,
            gravity: GRAVITY,
            time_grid: TimeGrid::default(),
        }
    }

    /// Sets the mounting offset.
    pub fn with_offset(mut self, vertical_offset: f64) -> Self {
        self.vertical_offset = vertical_offset;
        self
    }

    /// Sets the release angle in radians.
    pub fn with_initial_angle(mut self, initial_angle: f64) -> Self {
        self.initial_angle = initial_angle;
        self
    }

    /// Sets gravitational acceleration.
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Replaces the time grid.
    pub fn with_time_grid(mut self, time_grid: TimeGrid) -> Self {
        self.time_grid = time_grid;
        self
    }

    /// Builds the validated model without sampling it.
    ///
    /// # Errors
    ///
    /// See [`DampedPendulum::new`].
    pub fn model(&self) -> Result<DampedPendulum> {
        ensure_positive_mass(self.mass)?;
        DampedPendulum::new(
            self.length,
            self.damping_ratio,
            self.vertical_offset,
            self.initial_angle,
            self.gravity,
        )
    }

    /// Evaluates the trajectory on the configured grid.
    ///
    /// # Errors
    ///
    /// Returns the first precondition violation found.
    pub fn evaluate(&self) -> Result<Trajectory> {
        Ok(self.model()?.trajectory(&self.time_grid))
    }
}

/// Evaluates `z(t)` for every entry of `time_grid`.
///
/// Inputs are checked before any sample is computed.
///
/// # Errors
///
/// - [`Error::InvalidMass`] when `mass <= 0`
/// - [`Error::InvalidLength`] when `length <= 0`
/// - [`Error::InvalidDampingRatio`] when `damping_ratio` is outside `[0, 1)`
/// - [`Error::InvalidGravity`] when `gravity <= 0`
/// - [`Error::NonFinite`], [`Error::EmptyTimeGrid`], [`Error::NegativeTime`]
///
/// # Example
///
/// ```rust
/// use pendulum::{evaluate, Error};
///
/// let z = evaluate(50.0, 3.0, 0.0, 0.0, 0.0, 9.81, &[0.0, 1.0]).unwrap();
/// assert_eq!(z.heights(), vec![-3.0, -3.0]);
///
/// let err = evaluate(50.0, 3.0, 1.0, 0.0, 0.1, 9.81, &[0.0]).unwrap_err();
/// assert_eq!(err, Error::InvalidDampingRatio(1.0));
/// ```
pub fn evaluate(
    mass: f64,
    length: f64,
    damping_ratio: f64,
    vertical_offset: f64,
    initial_angle: f64,
    gravity: f64,
    time_grid: &[f64],
) -> Result<Trajectory> {
    ensure_positive_mass(mass)?;
    let model = DampedPendulum::new(length, damping_ratio, vertical_offset, initial_angle, gravity)?;
    validate_samples(time_grid)?;
    Ok(model.sample(time_grid.iter().copied()))
}

fn ensure_positive_mass(mass: f64) -> Result<()> {
    if ensure_finite("mass", mass)? <= 0.0 {
        return Err(Error::InvalidMass(mass));
    }
    Ok(())
}

/// Validated pendulum with its frequencies precomputed.
///
/// Cheap to copy; evaluating any time is O(1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedPendulum {
    length: f64,
    damping_ratio: f64,
    vertical_offset: f64,
    initial_angle: f64,
    natural_frequency: f64,
    damped_frequency: f64,
}

impl DampedPendulum {
    /// Checks preconditions and precomputes `ωn` and `ωd`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLength`] when `length <= 0`
    /// - [`Error::InvalidDampingRatio`] when `damping_ratio` is outside `[0, 1)`
    /// - [`Error::InvalidGravity`] when `gravity <= 0`
    /// - [`Error::NonFinite`] when any input is NaN or infinite
    pub fn new(
        length: f64,
        damping_ratio: f64,
        vertical_offset: f64,
        initial_angle: f64,
        gravity: f64,
    ) -> Result<Self> {
        if ensure_finite("length", length)? <= 0.0 {
            return Err(Error::InvalidLength(length));
        }
        let zeta = ensure_finite("damping_ratio", damping_ratio)?;
        if !(0.0..1.0).contains(&zeta) {
            return Err(Error::InvalidDampingRatio(damping_ratio));
        }
        if ensure_finite("gravity", gravity)? <= 0.0 {
            return Err(Error::InvalidGravity(gravity));
        }
        ensure_finite("vertical_offset", vertical_offset)?;
        ensure_finite("initial_angle", initial_angle)?;

        let natural_frequency = (gravity / length).sqrt();
        let damped_frequency = natural_frequency * (1.0 - zeta * zeta).sqrt();

        Ok(Self {
            length,
            damping_ratio: zeta,
            vertical_offset,
            initial_angle,
            natural_frequency,
            damped_frequency,
        })
    }

    /// `ωn = sqrt(g / L)` in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        self.natural_frequency
    }

    /// `ωd = ωn sqrt(1 - ζ²)` in rad/s.
    pub fn damped_frequency(&self) -> f64 {
        self.damped_frequency
    }

    /// Exponential decay rate `ζ ωn` in 1/s.
    pub fn decay_rate(&self) -> f64 {
        self.damping_ratio * self.natural_frequency
    }

    /// Period of the damped oscillation, `2π / ωd`.
    pub fn damped_period(&self) -> f64 {
        TAU / self.damped_frequency
    }

    /// Angular displacement θ(t) in radians.
    #[inline]
    pub fn angle(&self, t: f64) -> f64 {
        self.envelope(t) * (self.damped_frequency * t).cos()
    }

    /// Decay envelope `θ0 exp(-ζ ωn t)`; bounds `|θ(t)|` for `θ0 >= 0`.
    #[inline]
    pub fn envelope(&self, t: f64) -> f64 {
        self.initial_angle * (-self.decay_rate() * t).exp()
    }

    /// Vertical position z(t) in metres.
    #[inline]
    pub fn height(&self, t: f64) -> f64 {
        -self.length * self.angle(t).cos() + self.vertical_offset
    }

    /// Position the bob settles to as θ → 0: `-L + offset`.
    pub fn rest_height(&self) -> f64 {
        -self.length + self.vertical_offset
    }

    /// Samples the model on a validated grid.
    pub fn trajectory(&self, grid: &TimeGrid) -> Trajectory {
        self.sample(grid.as_slice().iter().copied())
    }

    fn sample(&self, times: impl Iterator<Item = f64>) -> Trajectory {
        let points = times.map(|t| TrajectoryPoint {
            time: t,
            height: self.height(t),
        });
        Trajectory {
            points: points.collect(),
        }
    }
}

/// One sample of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    /// Seconds since release.
    pub time: f64,
    /// Vertical position (m). Serialized as `z`.
    #[cfg_attr(feature = "serde", serde(rename = "z"))]
    pub height: f64,
}

/// Vertical positions aligned index-for-index with the sampled grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All samples in grid order.
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// Iterates over samples.
    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    /// Sample times.
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Vertical positions.
    pub fn heights(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.height).collect()
    }

    /// Lowest vertical position, or `None` when empty.
    pub fn min_height(&self) -> Option<f64> {
        self.points.iter().map(|p| p.height).reduce(f64::min)
    }

    /// Highest vertical position, or `None` when empty.
    pub fn max_height(&self) -> Option<f64> {
        self.points.iter().map(|p| p.height).reduce(f64::max)
    }

    /// Position at the last sample.
    pub fn final_height(&self) -> Option<f64> {
        self.points.last().map(|p| p.height)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_frequencies() {
        let p = DampedPendulum::new(9.81, 0.6, 0.0, 0.1, 9.81).unwrap();
        assert!(approx_eq(p.natural_frequency(), 1.0));
        assert!(approx_eq(p.damped_frequency(), 0.8));
        assert!(approx_eq(p.decay_rate(), 0.6));
        assert!(approx_eq(p.damped_period(), TAU / 0.8));
    }

    #[test]
    fn test_initial_height() {
        let p = DampedPendulum::new(2.0, 0.1, 0.5, 0.3, GRAVITY).unwrap();
        assert!(approx_eq(p.angle(0.0), 0.3));
        assert!(approx_eq(p.height(0.0), -2.0 * 0.3f64.cos() + 0.5));
    }

    #[test]
    fn test_rest_height() {
        let p = DampedPendulum::new(3.0, 0.2, 1.25, 0.3, GRAVITY).unwrap();
        assert!(approx_eq(p.rest_height(), -1.75));
    }

    #[test]
    fn test_zero_angle_hangs_still() {
        let p = DampedPendulum::new(3.0, 0.2, 0.0, 0.0, GRAVITY).unwrap();
        for t in [0.0, 0.5, 7.0] {
            assert!(approx_eq(p.height(t), -3.0));
        }
    }

    #[test]
    fn test_rejects_bad_length() {
        assert_eq!(
            DampedPendulum::new(0.0, 0.1, 0.0, 0.1, GRAVITY),
            Err(Error::InvalidLength(0.0))
        );
        assert_eq!(
            DampedPendulum::new(-1.0, 0.1, 0.0, 0.1, GRAVITY),
            Err(Error::InvalidLength(-1.0))
        );
    }

    #[test]
    fn test_rejects_bad_damping() {
        for zeta in [1.0, 1.5, -0.1] {
            assert_eq!(
                DampedPendulum::new(1.0, zeta, 0.0, 0.1, GRAVITY),
                Err(Error::InvalidDampingRatio(zeta))
            );
        }
    }

    #[test]
    fn test_rejects_bad_gravity() {
        assert_eq!(
            DampedPendulum::new(1.0, 0.1, 0.0, 0.1, 0.0),
            Err(Error::InvalidGravity(0.0))
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            DampedPendulum::new(1.0, 0.1, f64::NAN, 0.1, GRAVITY),
            Err(Error::NonFinite {
                name: "vertical_offset",
                ..
            })
        ));
        assert!(matches!(
            DampedPendulum::new(f64::INFINITY, 0.1, 0.0, 0.1, GRAVITY),
            Err(Error::NonFinite { name: "length", .. })
        ));
    }

    #[test]
    fn test_evaluate_checks_mass() {
        assert_eq!(
            evaluate(0.0, 1.0, 0.1, 0.0, 0.1, GRAVITY, &[0.0]),
            Err(Error::InvalidMass(0.0))
        );
    }

    #[test]
    fn test_evaluate_checks_grid() {
        assert_eq!(
            evaluate(1.0, 1.0, 0.1, 0.0, 0.1, GRAVITY, &[]),
            Err(Error::EmptyTimeGrid)
        );
        assert_eq!(
            evaluate(1.0, 1.0, 0.1, 0.0, 0.1, GRAVITY, &[0.0, -0.5]),
            Err(Error::NegativeTime {
                index: 1,
                value: -0.5
            })
        );
    }

    #[test]
    fn test_parameters_and_free_function_agree() {
        let params = SimulationParameters::new(200.0, 2.5, 0.05).with_offset(0.75);
        let a = params.evaluate().unwrap();
        let b = evaluate(
            200.0,
            2.5,
            0.05,
            0.75,
            DEFAULT_INITIAL_ANGLE,
            GRAVITY,
            params.time_grid.as_slice(),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_trajectory_accessors() {
        let traj = evaluate(1.0, 1.0, 0.0, 0.0, 0.2, GRAVITY, &[0.0, 0.1, 0.2]).unwrap();
        assert_eq!(traj.len(), 3);
        assert!(!traj.is_empty());
        assert_eq!(traj.times(), vec![0.0, 0.1, 0.2]);
        assert_eq!(traj.heights().len(), 3);
        assert_eq!(traj.iter().count(), 3);
        assert_eq!((&traj).into_iter().count(), 3);
        let lo = traj.min_height().unwrap();
        let hi = traj.max_height().unwrap();
        assert!(lo <= hi);
        assert_eq!(traj.final_height(), Some(traj.points()[2].height));
    }

    #[test]
    fn test_model_is_copy() {
        let p = DampedPendulum::new(1.0, 0.1, 0.0, 0.1, GRAVITY).unwrap();
        let q = p;
        assert!(approx_eq(p.height(1.0), q.height(1.0)));
    }
}
