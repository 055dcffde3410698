use std::{
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, TimeZone};

use crate::{
    accumulator::{ResultTable, COLUMNS},
    datatypes::EvaluationResult,
    error::{CmutError, Result},
};

/// Rows shown at each end of the printed summary
const SUMMARY_ROWS: usize = 5;

/// Builds a timestamped output path inside `dir`. If a file of that name
/// already exists a numeric suffix is appended.
///
/// # Arguments
/// * `dir` - The output directory
/// * `now` - Generation time embedded in the filename
pub fn output_path<Tz: TimeZone>(dir: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let stem = format!("design_{}", now.format("%Y%m%d_%H%M"));
    let mut path = dir.join(format!("{stem}.csv"));
    let mut suffix = 1;
    while path.exists() {
        path = dir.join(format!("{stem}_{suffix}.csv"));
        suffix += 1;
    }
    path
}

fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn format_row(row: &EvaluationResult) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{}\n",
        row.membrane,
        row.insulator,
        row.metal,
        row.membrane_radius,
        row.gap_height_original,
        row.membrane_thickness,
        row.insulator_thickness,
        row.metal_thickness,
        row.gap_height_effective,
        row.resonant_frequency,
        row.v_pullin,
        python_bool(row.freq_within_range),
    )
}

/// Writes the table as CSV: a header row, then one line per result
///
/// # Arguments
/// * `table` - The finished result table
/// * `writer` - Destination of the CSV text
pub fn write_csv<W: Write>(table: &ResultTable, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", COLUMNS.join(","))?;
    for row in table.rows() {
        writer.write_all(format_row(row).as_bytes())?;
    }
    Ok(())
}

/// Writes the table to a CSV file. The file is written in a single call
/// once the whole table has been rendered.
///
/// # Arguments
/// * `table` - The finished result table
/// * `output` - The path of the output csv
pub fn csv_output(table: &ResultTable, output: &Path) -> Result<()> {
    let mut buffer: Vec<u8> = Vec::new();
    if let Err(err) = write_csv(table, &mut buffer) {
        return Err(CmutError::Output(format!("Failed to render csv: {err}")));
    }

    if let Err(err) = std::fs::write(output, &buffer) {
        return Err(CmutError::Output(format!(
            "Failed to write {}: {err}",
            output.display()
        )));
    }

    println!("info: wrote {} rows to {}", table.len(), output.display());
    Ok(())
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Renders a short human-readable summary of the table
pub fn summary(table: &ResultTable) -> String {
    let mut out = format!(
        "{} rows, {} with resonant frequency inside the target band\n",
        table.len(),
        table.count_within_range()
    );

    let rows = table.rows();
    if let Some((lo, hi)) = min_max(rows.iter().map(|r| r.resonant_frequency)) {
        out.push_str(&format!("resonant_frequency: {lo:.4e} .. {hi:.4e} Hz\n"));
    }
    if let Some((lo, hi)) = min_max(rows.iter().map(|r| r.v_pullin)) {
        out.push_str(&format!("V_pullin: {lo:.4e} .. {hi:.4e} V\n"));
    }

    if table.is_empty() {
        return out;
    }

    out.push_str(&COLUMNS.join(","));
    out.push('\n');
    if rows.len() <= 2 * SUMMARY_ROWS {
        for row in rows {
            out.push_str(&format_row(row));
        }
    } else {
        for row in &rows[..SUMMARY_ROWS] {
            out.push_str(&format_row(row));
        }
        out.push_str("...\n");
        for row in &rows[rows.len() - SUMMARY_ROWS..] {
            out.push_str(&format_row(row));
        }
    }

    out
}
