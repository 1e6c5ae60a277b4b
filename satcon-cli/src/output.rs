//! Result printing.

use std::io::Write;

use serde::Serialize;

use crate::error::CliResult;

/// Print a result as pretty JSON on stdout; `None` prints `null`.
pub fn print<T: Serialize>(value: &Option<T>) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
