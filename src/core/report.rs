//! Estimate output

use std::io::{self, Write};

use super::stats::PurityEstimate;

/// Header of the full report
pub const REPORT_HEADER: &str = "Lower\tBest\tUpper";

/// Write the estimate.
///
/// With `just_best` only the best value is written, without header or
/// trailing newline. Otherwise a header line and a tab separated value
/// line are written. All values use two decimals.
pub fn write_estimate<W: Write>(out: &mut W, estimate: &PurityEstimate, just_best: bool) -> io::Result<()> {
    if just_best {
        write!(out, "{:.2}", estimate.best)?;
    } else {
        writeln!(out, "{}", REPORT_HEADER)?;
        writeln!(
            out,
            "{:.2}\t{:.2}\t{:.2}",
            estimate.lower, estimate.best, estimate.upper
        )?;
    }
    out.flush()
}
