// Supported melody-generation providers
// A closed enum plus a capability record per provider; key lookup is
// injected so no global registry exists

use serde::{Deserialize, Serialize};

/// Supported backends for melody generation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Gemini,
    Anthropic,
    Cohere,
}

impl Provider {
    /// Every provider, in catalog order
    pub const ALL: [Provider; 4] = [
        Provider::OpenAI,
        Provider::Gemini,
        Provider::Anthropic,
        Provider::Cohere,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Gemini => "gemini",
            Provider::Anthropic => "anthropic",
            Provider::Cohere => "cohere",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Provider::OpenAI),
            "gemini" => Some(Provider::Gemini),
            "anthropic" => Some(Provider::Anthropic),
            "cohere" => Some(Provider::Cohere),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Gemini => "Google Gemini",
            Provider::Anthropic => "Anthropic Claude",
            Provider::Cohere => "Cohere",
        }
    }
}

/// Capability record for one provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderInfo {
    pub provider: Provider,
    pub display_name: &'static str,
    /// Whether an API key is configured for this provider
    pub has_key: bool,
}

/// Build the provider catalog from an injected key lookup
pub fn provider_catalog(has_key: impl Fn(Provider) -> bool) -> Vec<ProviderInfo> {
    Provider::ALL
        .iter()
        .map(|&provider| ProviderInfo {
            provider,
            display_name: provider.display_name(),
            has_key: has_key(provider),
        })
        .collect()
}
