//! `vdrive-check` — compare the result image with the golden product.
//!
//! Prints a short summary to stdout: element count, max and mean absolute
//! difference, and up to ten mismatching elements. At debug level the
//! operands, the golden product and the design's result are logged too.

use std::fmt::{Display, Write as _};

use vdrive_config::HarnessConfig;
use vdrive_designs::{check, CheckReport, Geometry, Matrix};

use crate::CommandResult;

const MAX_LISTED: usize = 10;

/// Runs the comparison. Exit code 0 when every element is within tolerance,
/// 1 otherwise.
pub fn run(config: &HarnessConfig) -> CommandResult {
    let geometry = Geometry::from_config(&config.testbench)?;
    let report = check::compare_files(
        &geometry,
        &config.testbench.input,
        &config.testbench.output,
        &config.check,
    )?;
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("A =\n{}", format_matrix(&report.a));
        log::debug!("B =\n{}", format_matrix(&report.b));
        log::debug!("golden =\n{}", format_matrix(&report.golden));
        log::debug!("hardware =\n{}", format_matrix(&report.hardware));
    }
    print!("{}", render(&report));
    Ok(if report.passed() { 0 } else { 1 })
}

/// Formats a matrix one row per line, columns right-aligned.
pub fn format_matrix<T: Copy + Default + Display>(m: &Matrix<T>) -> String {
    let cells: Vec<String> = m.as_slice().iter().map(|v| v.to_string()).collect();
    let width = cells.iter().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for row in cells.chunks(m.dim().max(1)) {
        let line: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

/// Formats a report the way `run` prints it.
pub fn render(report: &CheckReport) -> String {
    let mut out = format!(
        "compared {} elements: max |diff| = {:e}, mean |diff| = {:e}\n",
        report.total(),
        report.max_abs_diff,
        report.mean_abs_diff
    );
    for m in report.mismatches.iter().take(MAX_LISTED) {
        out.push_str(&format!(
            "  C[{}][{}]: expected {}, got {}\n",
            m.row, m.col, m.golden, m.hardware
        ));
    }
    if report.mismatches.len() > MAX_LISTED {
        out.push_str(&format!(
            "  ... and {} more\n",
            report.mismatches.len() - MAX_LISTED
        ));
    }
    if report.passed() {
        out.push_str("PASS\n");
    } else {
        out.push_str(&format!("FAIL: {} mismatches\n", report.mismatches.len()));
    }
    out
}
