//! Tab-separated `pH / potential` tables.
//!
//! ```text
//! pH	URHE (V)
//! 0	2.257097
//! 1	2.239664
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use super::OutputError;
use crate::scale::PotentialScale;

/// Column header for the potential column
pub fn potential_header(scale: PotentialScale) -> String {
    format!("{} (V)", scale.symbol())
}

/// Render a pH value: integers without a decimal point, otherwise at most 6 decimals
pub fn format_ph(ph: f64) -> String {
    if ph.fract() == 0.0 && ph.abs() < 1e15 {
        format!("{}", ph as i64)
    } else {
        let text = format!("{:.6}", ph);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Write one series as a two-column table
pub fn write_series<W: Write>(
    writer: W,
    scale: PotentialScale,
    points: &[(f64, f64)],
) -> Result<(), OutputError> {
    let mut tsv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    tsv.write_record(["pH".to_string(), potential_header(scale)])?;
    for &(ph, potential) in points {
        tsv.write_record([format_ph(ph), format!("{:.6}", potential)])?;
    }
    tsv.flush()?;
    Ok(())
}

/// Write one series to a file
pub fn write_series_file<P: AsRef<Path>>(
    path: P,
    scale: PotentialScale,
    points: &[(f64, f64)],
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_series(BufWriter::new(file), scale, points)?;
    debug!("Wrote {} table: {}", scale, path.display());
    Ok(())
}
