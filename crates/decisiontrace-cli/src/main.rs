//! DecisionTrace CLI - ask a model for auditable decisions.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use decisiontrace_cli::commands;
use decisiontrace_cli::repl;
use decisiontrace_cli::{AppConfig, Cli, Command, Formatter, OutputFormat, Session};
use decisiontrace_core::DecisionLog;
use decisiontrace_runtime::ProviderRegistry;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);

    match cli.command {
        None | Some(Command::Repl) => {
            let session = Session::from_config(&config)?;
            repl::run_repl(&session, &Formatter::new(OutputFormat::Text)).await?;
        }
        Some(Command::Ask(args)) => {
            let session = Session::from_config(&config)?;
            commands::execute_ask(args, &session).await?;
        }
        Some(Command::History(args)) => {
            commands::execute_history(args, &DecisionLog::new(&config.log_file))?;
        }
        Some(Command::Providers) => {
            commands::execute_providers(&ProviderRegistry::with_defaults(), &config.provider);
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise `-v` selects debug and the default is warn.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
