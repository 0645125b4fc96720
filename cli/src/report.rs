//! Console output of a finished search.

use std::fmt::Display;
use std::io::{self, Write};
use std::time::Duration;

/// Figures printed after the path.
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub elapsed: Duration,
    pub reached: usize,
    pub path_len: usize,
    pub cost: f64,
}

/// Print path states one per line. A negative `limit` prints all of them.
pub fn write_path<W: Write, S: Display>(out: &mut W, path: &[S], limit: i64) -> io::Result<()> {
    let shown = usize::try_from(limit).map_or(path.len(), |n| n.min(path.len()));
    for s in &path[..shown] {
        writeln!(out, "{s}")?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "Path found in {:.2} seconds", summary.elapsed.as_secs_f64())?;
    writeln!(out, "{} states in the reached dict", summary.reached)?;
    writeln!(out, "{} states on path to goal", summary.path_len)?;
    writeln!(out, "cost is: {:.2}", summary.cost)
}
