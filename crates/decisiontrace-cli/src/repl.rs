//! Interactive REPL mode.

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::output::Formatter;
use crate::session::{LineOutcome, Session};

const BANNER: &str = "DecisionTrace - auditable model decisions. Type 'exit' to quit.";
const PROMPT: &str = "Enter decision query (or exit): ";

/// Read queries until `exit` or end of input.
///
/// A failed query is reported and the loop keeps going.
pub async fn run_repl(session: &Session, formatter: &Formatter) -> Result<()> {
    println!("{}", BANNER);
    println!("Logging to {}", session.log().path().display());
    println!();

    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str()).ok();
                }

                match session.handle_line(&line).await {
                    Ok(LineOutcome::Exit) => break,
                    Ok(LineOutcome::Skip) => continue,
                    Ok(LineOutcome::Decision(record)) => {
                        println!("{}", formatter.record(&record));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Decision failed");
                        eprintln!("Error: {}", e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use 'exit' to quit");
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        }
    }

    Ok(())
}
