#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

//! # Pendulum
//!
//! Closed-form trajectories of a tuned-mass-damper pendulum.
//!
//! Pendulum provides:
//! - **Evaluator**: vertical position of an underdamped pendulum over a time grid
//! - **Sweeps**: the reference comparisons by mass, length and mounting position
//! - **Structure**: geometry of the floating structure the pendulum hangs from
//!
//! ## Evaluating a trajectory
//!
//! ```rust
//! use pendulum::{evaluate, TimeGrid, DEFAULT_INITIAL_ANGLE, GRAVITY};
//!
//! let grid = TimeGrid::from_duration(10.0, 25).unwrap();
//! let zeta = 0.2 / 50f64.sqrt();
//! let z = evaluate(50.0, 3.0, zeta, 0.0, DEFAULT_INITIAL_ANGLE, GRAVITY, grid.as_slice())
//!     .unwrap();
//!
//! assert_eq!(z.len(), grid.len());
//! assert!((z.points()[0].height + 2.898).abs() < 1e-3);
//! ```
//!
//! ## Running a sweep
//!
//! ```rust
//! use pendulum::{Sweep, SweepKind, SweepSettings};
//!
//! let run = Sweep::reference(SweepKind::Length, &SweepSettings::default())
//!     .run()
//!     .unwrap();
//! assert_eq!(run.series.len(), 6);
//! ```
//!
//! ## Damping ratios
//!
//! Only the underdamped regime (0 ≤ ζ < 1) has the oscillating closed form
//! used here. Critically damped and overdamped ratios are rejected with
//! [`Error::InvalidDampingRatio`] instead of producing NaN.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for parameters, trajectories and layouts

mod error;
mod grid;
pub mod structure;
pub mod sweep;
mod trajectory;

pub use error::{Error, Result};
pub use grid::{DEFAULT_DURATION, DEFAULT_FPS, MAX_SAMPLES, TimeGrid};
pub use structure::{Primitive, StructureLayout};
pub use sweep::{DampingLaw, Series, Sweep, SweepKind, SweepRun, SweepSettings};
pub use trajectory::{
    DEFAULT_INITIAL_ANGLE, DampedPendulum, GRAVITY, SimulationParameters, Trajectory,
    TrajectoryPoint, evaluate,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::grid::TimeGrid;
    pub use crate::sweep::{DampingLaw, Sweep, SweepKind, SweepSettings};
    pub use crate::trajectory::{DampedPendulum, SimulationParameters, Trajectory, evaluate};
    pub use crate::{Error, Result};
}
