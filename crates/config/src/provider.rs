/// An LLM backend the wizard can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderOption {
    pub display_name: &'static str,
    pub identifier: &'static str,
    /// Used when the model field is left blank.
    pub default_model: &'static str,
}

/// Known providers in display order. The first entry is preselected.
pub const PROVIDERS: &[ProviderOption] = &[
    ProviderOption {
        display_name: "Google Gemini",
        identifier: "google_genai",
        default_model: "gemini-2.5-flash",
    },
    ProviderOption {
        display_name: "OpenAI GPT",
        identifier: "openai",
        default_model: "gpt-4",
    },
    ProviderOption {
        display_name: "Ollama (Local)",
        identifier: "ollama",
        default_model: "llama2",
    },
    ProviderOption {
        display_name: "Anthropic Claude",
        identifier: "anthropic",
        default_model: "claude-3-sonnet-20240229",
    },
    ProviderOption {
        display_name: "Groq",
        identifier: "groq",
        default_model: "mixtral-8x7b-32768",
    },
];

pub const DEFAULT_PROVIDER_INDEX: usize = 0;

pub fn find_provider(identifier: &str) -> Option<&'static ProviderOption> {
    PROVIDERS.iter().find(|p| p.identifier == identifier)
}

pub fn provider_index(identifier: &str) -> Option<usize> {
    PROVIDERS.iter().position(|p| p.identifier == identifier)
}
