//! CSV and JSON writers for trajectories and sweeps.

use std::io::Write;

use pendulum::{SweepRun, Trajectory};

use crate::{Error, Result};
use crate::cli::OutputFormat;

/// Writes one trajectory as `time,z` rows or as a JSON array.
///
/// # Errors
///
/// Propagates CSV, JSON and I/O failures.
pub fn write_trajectory<W: Write>(
    writer: W,
    trajectory: &Trajectory,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            csv.write_record(["time", "z"])?;
            for point in trajectory {
                csv.write_record([point.time.to_string(), point.height.to_string()])?;
            }
            csv.flush()?;
        }
        OutputFormat::Json => write_json(writer, trajectory)?,
    }
    Ok(())
}

/// Writes a sweep: one `time` column plus one column per case, or JSON.
///
/// Rows line up by index, so every series must have the first series'
/// sample count.
///
/// # Errors
///
/// [`Error::RaggedSweep`] for mismatched series lengths; otherwise
/// propagates CSV, JSON and I/O failures.
pub fn write_sweep<W: Write>(writer: W, run: &SweepRun, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let Some(first) = run.series.first() else {
                let mut csv = csv::Writer::from_writer(writer);
                csv.write_record(["time"])?;
                csv.flush()?;
                return Ok(());
            };
            let expected = first.trajectory.len();
            if let Some(ragged) = run.series.iter().find(|s| s.trajectory.len() != expected) {
                return Err(Error::RaggedSweep {
                    label: ragged.label.clone(),
                    expected,
                    found: ragged.trajectory.len(),
                });
            }

            let mut csv = csv::Writer::from_writer(writer);
            let mut header = vec!["time".to_string()];
            header.extend(run.series.iter().map(|s| s.label.clone()));
            csv.write_record(&header)?;

            let mut columns: Vec<_> = run.series.iter().map(|s| s.trajectory.iter()).collect();
            for point in &first.trajectory {
                let mut record = vec![point.time.to_string()];
                record.extend(
                    columns
                        .iter_mut()
                        .filter_map(|column| column.next())
                        .map(|p| p.height.to_string()),
                );
                csv.write_record(&record)?;
            }
            csv.flush()?;
        }
        OutputFormat::Json => write_json(writer, run)?,
    }
    Ok(())
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
