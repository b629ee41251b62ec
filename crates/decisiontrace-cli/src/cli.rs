//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Auditable model decisions: ask, classify risk, log.
#[derive(Debug, Parser)]
#[command(name = "decisiontrace", version, about)]
pub struct Cli {
    /// YAML configuration file (defaults to ./decisiontrace.yaml if present)
    #[arg(long, global = true, env = "DECISIONTRACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Decision log file (JSON Lines, append-only)
    #[arg(long, global = true, env = "DECISIONTRACE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// LLM provider type (openai, anthropic)
    #[arg(long, global = true, env = "DECISIONTRACE_PROVIDER")]
    pub provider: Option<String>,

    /// Model name passed to the provider
    #[arg(long, global = true, env = "DECISIONTRACE_MODEL")]
    pub model: Option<String>,

    /// Upper bound on the model call, e.g. "30s" (default: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout: Option<humantime::Duration>,

    /// Log debug diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive loop: one decision per line, `exit` to quit (default)
    Repl,

    /// Make a single decision and exit
    Ask(AskArgs),

    /// Show the most recent logged decisions
    History(HistoryArgs),

    /// List available LLM providers
    Providers,
}

#[derive(Debug, Args)]
pub struct AskArgs {
    /// The decision query
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub query: Vec<String>,

    /// Print the record as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl AskArgs {
    pub fn query(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of records to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,

    /// Print records as JSON Lines instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::try_parse_from(["decisiontrace"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["decisiontrace", "ask", "should", "we", "renew?"]).unwrap();
        match cli.command {
            Some(Command::Ask(args)) => assert_eq!(args.query(), "should we renew?"),
            other => panic!("Expected ask, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "decisiontrace",
            "history",
            "-n",
            "3",
            "--log-file",
            "audit.jsonl",
            "--timeout",
            "30s",
        ])
        .unwrap();

        assert_eq!(cli.log_file.as_deref(), Some(std::path::Path::new("audit.jsonl")));
        let timeout: Option<std::time::Duration> = cli.timeout.map(Into::into);
        assert_eq!(timeout, Some(std::time::Duration::from_secs(30)));
        match cli.command {
            Some(Command::History(args)) => assert_eq!(args.limit, 3),
            other => panic!("Expected history, got {:?}", other),
        }
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["decisiontrace", "ask"]).is_err());
    }
}
