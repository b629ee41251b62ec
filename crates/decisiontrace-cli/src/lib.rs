//! DecisionTrace CLI library.
//!
//! Argument parsing, YAML configuration, the interactive loop and the
//! one-shot commands around [`decisiontrace_runtime::DecisionEngine`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod repl;
pub mod session;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use output::{Formatter, OutputFormat};
pub use session::{LineOutcome, Session, SessionError};
