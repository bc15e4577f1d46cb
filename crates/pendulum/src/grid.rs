//! Time grids for sampling trajectories.

use crate::error::{Error, Result, ensure_finite};

/// Default simulated duration in seconds.
pub const DEFAULT_DURATION: f64 = 10.0;

/// Default sampling rate in frames per second.
pub const DEFAULT_FPS: u32 = 25;

/// Largest sample count a generated grid may hold.
pub const MAX_SAMPLES: usize = 10_000_000;

/// A validated, non-empty sequence of non-negative sample times (seconds).
///
/// Samples are conventionally increasing, but the order is not enforced:
/// every sample is evaluated independently.
///
/// # Example
///
/// ```rust
/// use pendulum::TimeGrid;
///
/// let grid = TimeGrid::from_duration(10.0, 25).unwrap();
/// assert_eq!(grid.len(), 250);
/// assert_eq!(grid.as_slice()[0], 0.0);
/// assert_eq!(*grid.as_slice().last().unwrap(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct TimeGrid {
    samples: Vec<f64>,
}

impl TimeGrid {
    /// Wraps explicit sample times.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTimeGrid`] for no samples, [`Error::NonFinite`] or
    /// [`Error::NegativeTime`] for a bad sample.
    pub fn new(samples: Vec<f64>) -> Result<Self> {
        validate_samples(&samples)?;
        Ok(Self { samples })
    }

    /// `samples` evenly spaced points over `[start, stop]`, both ends included.
    ///
    /// A single sample yields `[start]`.
    ///
    /// # Errors
    ///
    /// Fails for zero samples or for bounds that are negative or not finite.
    pub fn linspace(start: f64, stop: f64, samples: usize) -> Result<Self> {
        let start = ensure_finite("start", start)?;
        let stop = ensure_finite("stop", stop)?;
        if samples == 0 {
            return Err(Error::EmptyTimeGrid);
        }
        if samples > MAX_SAMPLES {
            return Err(too_many(samples as f64));
        }
        Self::new(linspace_values(start, stop, samples))
    }

    /// `duration * fps` samples spread over `[0, duration]`.
    ///
    /// # Errors
    ///
    /// Fails when the product rounds to zero samples or exceeds
    /// [`MAX_SAMPLES`], or when `duration` is invalid.
    pub fn from_duration(duration: f64, fps: u32) -> Result<Self> {
        let duration = ensure_finite("duration", duration)?;
        if duration < 0.0 {
            return Err(Error::NegativeTime {
                index: 0,
                value: duration,
            });
        }
        let requested = (duration * f64::from(fps)).round();
        if requested > MAX_SAMPLES as f64 {
            return Err(too_many(requested));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let samples = requested as usize;
        Self::linspace(0.0, duration, samples)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample times in seconds.
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Last sample time.
    pub fn end(&self) -> f64 {
        self.samples.last().copied().unwrap_or_default()
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (DEFAULT_DURATION as usize) * DEFAULT_FPS as usize;
        Self {
            samples: linspace_values(0.0, DEFAULT_DURATION, n),
        }
    }
}

impl TryFrom<Vec<f64>> for TimeGrid {
    type Error = Error;

    fn try_from(samples: Vec<f64>) -> Result<Self> {
        Self::new(samples)
    }
}

impl From<TimeGrid> for Vec<f64> {
    fn from(grid: TimeGrid) -> Self {
        grid.samples
    }
}

impl AsRef<[f64]> for TimeGrid {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

const fn too_many(requested: f64) -> Error {
    Error::TooManySamples {
        requested,
        limit: MAX_SAMPLES,
    }
}

fn linspace_values(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
        .collect()
}

pub(crate) fn validate_samples(samples: &[f64]) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::EmptyTimeGrid);
    }
    for (index, &value) in samples.iter().enumerate() {
        ensure_finite("time", value)?;
        if value < 0.0 {
            return Err(Error::NegativeTime { index, value });
        }
    }
    Ok(())
}
