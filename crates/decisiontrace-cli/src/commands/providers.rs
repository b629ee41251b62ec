//! Providers command implementation.

use decisiontrace_runtime::ProviderRegistry;

/// List registered providers, marking the configured one.
pub fn execute_providers(registry: &ProviderRegistry, selected: &str) {
    let mut rows: Vec<(&str, &str)> = registry
        .factories()
        .map(|f| (f.provider_type(), f.description()))
        .collect();
    rows.sort_unstable();

    for (provider_type, description) in rows {
        let marker = if provider_type == selected { "*" } else { " " };
        println!("{} {:<10} {}", marker, provider_type, description);
    }

    if !registry.has_provider(selected) {
        eprintln!("Configured provider '{}' is not available", selected);
    }
}
