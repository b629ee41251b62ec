//! History command implementation.

use anyhow::{Context, Result};

use decisiontrace_core::DecisionLog;

use crate::cli::HistoryArgs;
use crate::output::{Formatter, OutputFormat};

/// Print the last `limit` records from the log, oldest first.
pub fn execute_history(args: HistoryArgs, log: &DecisionLog) -> Result<()> {
    let formatter = Formatter::new(OutputFormat::from_json_flag(args.json));
    let records = log
        .tail(args.limit)
        .with_context(|| format!("Failed to read {}", log.path().display()))?;

    if records.is_empty() && formatter.format() == OutputFormat::Text {
        println!("No decisions logged in {}", log.path().display());
        return Ok(());
    }

    for record in &records {
        println!("{}", formatter.record(record));
    }
    Ok(())
}
