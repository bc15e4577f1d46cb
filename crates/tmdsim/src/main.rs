#![forbid(unsafe_code)]

//! # tmdsim CLI
//!
//! Damped pendulum trajectories for a tuned-mass-damper structure.
//!
//! ## Usage
//!
//! ```bash
//! tmdsim evaluate --length 3.5 --damping-ratio 0.03   # CSV on stdout
//! tmdsim sweep all --out-dir plots                     # reference charts
//! tmdsim scene > structure.json                        # geometry
//! ```

use tmdsim::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    tmdsim::logging::init(cli.log_level());

    tmdsim::run(&cli)?;
    Ok(())
}
