//! Per-cycle report rendering.
//!
//! One block per cycle, followed by a blank line. The `INCORRECT COUNT`
//! line appears only once a mismatch has outlived a refresh.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

use pollwatch_core::CycleReport;

/// Determine whether color output should be enabled.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
}

/// Render one cycle report as the block printed to stdout.
pub fn render_report(report: &CycleReport, color: bool) -> String {
    let lockouts = if color && report.lockouts {
        report.lockouts.yellow().bold().to_string()
    } else {
        report.lockouts.to_string()
    };

    let mut lines = vec![
        format!("Lockouts: {lockouts}"),
        format!("expec points: {}", report.expected),
        format!("total points: {}", report.total),
        format!("    out:   {}", report.in_flight),
        format!("    poll:  {}", report.queue),
        format!("    stdby: {}", report.standby),
    ];

    if let Some(count) = report.incorrect_count {
        let line = format!("INCORRECT COUNT: {count}");
        lines.push(if color {
            line.red().bold().to_string()
        } else {
            line
        });
    }

    lines.join("\n")
}

/// Write a report followed by the blank separator line.
pub fn write_report<W: Write>(out: &mut W, report: &CycleReport, color: bool) -> io::Result<()> {
    writeln!(out, "{}\n", render_report(report, color))?;
    out.flush()
}

/// Print a report to stdout. A failed write (e.g. a closed pipe) is returned
/// so the run can end instead of polling with nowhere to report.
pub fn print_report(report: &CycleReport, color: bool) -> io::Result<()> {
    write_report(&mut io::stdout().lock(), report, color)
}
