//! Provider registry: build an [`LlmProvider`] from a type name and a JSON config.
//!
//! ```ignore
//! let registry = ProviderRegistry::with_defaults();
//! let provider = registry.create("openai", &serde_json::json!({}))?;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::{LlmProvider, ProviderError};

/// Creates providers of one type from configuration.
pub trait ProviderFactory: Send + Sync {
    /// Unique identifier for this provider type, e.g. "openai".
    fn provider_type(&self) -> &'static str;

    /// Create a provider instance from its JSON configuration.
    fn create(&self, config: &JsonValue) -> Result<Arc<dyn LlmProvider>, ProviderError>;

    /// Check configuration without creating a provider.
    fn validate_config(&self, config: &JsonValue) -> Result<(), ProviderError>;

    /// Defaults for optional fields.
    fn default_config(&self) -> JsonValue {
        serde_json::json!({})
    }

    fn description(&self) -> &'static str {
        "LLM Provider"
    }
}

/// Registry of available provider factories, keyed by provider type.
#[derive(Default)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, Arc<dyn ProviderFactory>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `openai` and `anthropic` providers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::OpenAiProviderFactory));
        registry.register(Arc::new(super::AnthropicProviderFactory));
        registry
    }

    /// Register a factory, replacing any previous one of the same type.
    pub fn register(&mut self, factory: Arc<dyn ProviderFactory>) {
        self.factories
            .insert(factory.provider_type().to_string(), factory);
    }

    /// Validate `config` and create a provider of `provider_type`.
    pub fn create(
        &self,
        provider_type: &str,
        config: &JsonValue,
    ) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        let factory = self.factory(provider_type)?;
        factory.validate_config(config)?;
        let provider = factory.create(config)?;

        tracing::debug!(provider = provider_type, "Provider created");
        Ok(provider)
    }

    /// Validate configuration for a provider type.
    pub fn validate(&self, provider_type: &str, config: &JsonValue) -> Result<(), ProviderError> {
        self.factory(provider_type)?.validate_config(config)
    }

    /// Registered provider types, sorted.
    pub fn available_types(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    pub fn has_provider(&self, provider_type: &str) -> bool {
        self.factories.contains_key(provider_type)
    }

    /// Registered factories in type order.
    pub fn factories(&self) -> impl Iterator<Item = &Arc<dyn ProviderFactory>> {
        self.factories.values()
    }

    fn factory(&self, provider_type: &str) -> Result<&Arc<dyn ProviderFactory>, ProviderError> {
        self.factories.get(provider_type).ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "Unknown provider type: '{}'. Available: {:?}",
                provider_type,
                self.available_types()
            ))
        })
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.available_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ScriptedProvider;

    struct ScriptedFactory;

    impl ProviderFactory for ScriptedFactory {
        fn provider_type(&self) -> &'static str {
            "scripted"
        }

        fn create(&self, config: &JsonValue) -> Result<Arc<dyn LlmProvider>, ProviderError> {
            let reply = config["reply"].as_str().unwrap_or("{}");
            Ok(Arc::new(ScriptedProvider::new().with_reply(reply)))
        }

        fn validate_config(&self, config: &JsonValue) -> Result<(), ProviderError> {
            if config.get("forbidden").is_some() {
                return Err(ProviderError::NotConfigured("forbidden key".to_string()));
            }
            Ok(())
        }

        fn description(&self) -> &'static str {
            "Scripted provider for tests"
        }
    }

    #[test]
    fn test_defaults_register_builtin_providers() {
        let registry = ProviderRegistry::with_defaults();
        assert_eq!(registry.available_types(), vec!["anthropic", "openai"]);
        assert!(registry.has_provider("openai"));
    }

    #[test]
    fn test_register_and_create() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(ScriptedFactory));

        let provider = registry
            .create("scripted", &serde_json::json!({ "reply": "{}" }))
            .unwrap();
        assert_eq!(provider.name(), "scripted");
    }

    #[test]
    fn test_create_validates_first() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(ScriptedFactory));

        let result = registry.create("scripted", &serde_json::json!({ "forbidden": true }));
        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
    }

    #[test]
    fn test_unknown_provider() {
        let registry = ProviderRegistry::with_defaults();
        match registry.create("mystery", &serde_json::json!({})) {
            Err(ProviderError::NotConfigured(msg)) => {
                assert!(msg.contains("Unknown provider type"));
                assert!(msg.contains("openai"));
            }
            _ => panic!("Expected NotConfigured error"),
        }
        assert!(registry.validate("mystery", &serde_json::json!({})).is_err());
    }

    #[test]
    fn test_factories_iterate_in_type_order() {
        let registry = ProviderRegistry::with_defaults();
        let types: Vec<_> = registry.factories().map(|f| f.provider_type()).collect();
        assert_eq!(types, vec!["anthropic", "openai"]);
    }
}
