//! Ask command implementation.

use anyhow::Result;

use crate::cli::AskArgs;
use crate::output::{Formatter, OutputFormat};
use crate::session::Session;

/// Make one decision, print it, and return.
pub async fn execute_ask(args: AskArgs, session: &Session) -> Result<()> {
    let formatter = Formatter::new(OutputFormat::from_json_flag(args.json));
    let record = session.decide(&args.query()).await?;
    println!("{}", formatter.record(&record));
    Ok(())
}
