//! API credential handling for LLM providers.
//!
//! Keys are wrapped in [`secrecy::SecretString`] as soon as they are read.
//! The only way back to the plain value is [`ApiCredential::expose`], called
//! where the HTTP header is set.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value as JsonValue;
use std::fmt;

use super::ProviderError;

/// Where a credential was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Provider configuration object
    Config,
    /// Environment variable
    Environment,
    /// Passed in by the caller
    Programmatic,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Config => write!(f, "config"),
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// A provider API key that redacts itself in `Debug` and `Display`.
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl ApiCredential {
    pub fn new(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        Self {
            value: SecretString::from(value.into()),
            source,
            name,
        }
    }

    /// Load from the provider config, falling back to an environment variable.
    ///
    /// Lookup order:
    /// 1. `config[config_key]` if it is a non-empty string
    /// 2. `env_var` if it is set and non-empty
    pub fn from_config_or_env(
        config: &JsonValue,
        config_key: &str,
        env_var: &str,
        name: &'static str,
    ) -> Result<Self, ProviderError> {
        let credential = config[config_key]
            .as_str()
            .map(|value| Self::new(value, CredentialSource::Config, name))
            .filter(|c| !c.is_empty())
            .or_else(|| {
                std::env::var(env_var)
                    .ok()
                    .map(|value| Self::new(value, CredentialSource::Environment, name))
                    .filter(|c| !c.is_empty())
            });

        match credential {
            Some(credential) => {
                tracing::debug!(
                    credential = credential.name(),
                    source = %credential.source(),
                    "Loaded API credential"
                );
                Ok(credential)
            }
            None => Err(ProviderError::NotConfigured(format!(
                "{} required: set '{}' in config or {} environment variable",
                name, config_key, env_var
            ))),
        }
    }

    /// Whether a credential could be loaded, without loading it.
    pub fn is_available(config: &JsonValue, config_key: &str, env_var: &str) -> bool {
        config[config_key].as_str().is_some_and(|v| !v.is_empty())
            || std::env::var(env_var).is_ok_and(|v| !v.is_empty())
    }

    /// The plain key. Call only where the request header is built.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} [REDACTED]", self.name, self.source)
    }
}
