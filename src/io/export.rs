//! CSV export of seasonal analysis telemetry.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::HOURS_PER_DAY;
use crate::devices::Season;
use crate::sim::engine::SeasonReport;

/// Column header for CSV telemetry export.
const HEADER: &str =
    "season,hour,original_kw,battery_kw,shifted_kw,discharge_kw,soc_percent";

/// Exports season reports to a CSV file at the given path.
///
/// Writes a header row followed by 24 data rows per season. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(runs: &[(Season, SeasonReport)], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(runs, buf)
}

/// Writes season reports as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(runs: &[(Season, SeasonReport)], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for (season, report) in runs {
        for hour in 0..HOURS_PER_DAY {
            let record = &report.discharge_schedule[hour];
            wtr.write_record(&[
                season.to_string(),
                hour.to_string(),
                format!("{:.4}", report.original_profile.at(hour)),
                format!("{:.4}", report.battery_profile.at(hour)),
                format!("{:.4}", report.shifted_profile.at(hour)),
                format!("{:.4}", record.discharge_kw),
                format!("{:.4}", record.soc_after_percent),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
