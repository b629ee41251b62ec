//! # decisiontrace-runtime
//!
//! LLM-backed half of DecisionTrace.
//!
//! The [`DecisionEngine`] sends one request per query to an [`LlmProvider`],
//! parses the structured reply, and hands the fields to `decisiontrace-core`
//! for risk classification and validation.
//!
//! ## Example
//!
//! ```rust,ignore
//! use decisiontrace_runtime::{DecisionEngine, EngineConfig, ProviderRegistry};
//!
//! let provider = ProviderRegistry::with_defaults().create("openai", &serde_json::json!({}))?;
//! let engine = DecisionEngine::new(provider, EngineConfig::default())?;
//!
//! let record = engine.generate("Should we renew the support contract?").await?;
//! println!("{} ({})", record.final_answer(), record.risk_level());
//! ```

pub mod config;
pub mod engine;
pub mod prompts;
pub mod providers;

pub use config::EngineConfig;
pub use engine::{parse_decision_fields, DecisionEngine, EngineError, UpstreamFormatError};
pub use prompts::DECISION_SYSTEM_PROMPT;
pub use providers::{
    ChatMessage, CompletionConfig, CompletionResponse, LlmProvider, ProviderError,
    ProviderFactory, ProviderRegistry, ScriptedProvider, TokenUsage,
};
