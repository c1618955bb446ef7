use crate::error::ValidationError;
use std::fmt;

pub const MIN_API_KEY_LEN: usize = 10;
const REDACTION_MASK: &str = "***";
const VISIBLE_KEY_TAIL: usize = 4;

pub const PROVIDER_KEY: &str = "llm_model_provider";
pub const MODEL_KEY: &str = "llm_model_name";
pub const API_KEY_KEY: &str = "llm_api_key";

/// A finalized provider/model/key triple ready to be written.
#[derive(Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    pub provider: String,
    pub model: String,
    pub api_key: String,
}

impl ConfigRecord {
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn to_env_string(&self) -> String {
        format!(
            "{PROVIDER_KEY}={}\n{MODEL_KEY}={}\n{API_KEY_KEY}={}\n",
            self.provider, self.model, self.api_key
        )
    }

    pub fn redacted_api_key(&self) -> String {
        redact_api_key(&self.api_key)
    }
}

impl fmt::Debug for ConfigRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRecord")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.redacted_api_key())
            .finish()
    }
}

/// Masks all but the last four characters. Keys too short to keep a tail
/// are masked entirely.
pub fn redact_api_key(key: &str) -> String {
    let len = key.chars().count();
    if len < VISIBLE_KEY_TAIL {
        return REDACTION_MASK.to_string();
    }
    let tail: String = key.chars().skip(len - VISIBLE_KEY_TAIL).collect();
    format!("{REDACTION_MASK}{tail}")
}

pub fn validate_model(model: &str) -> Result<&str, ValidationError> {
    let model = model.trim();
    if model.is_empty() {
        return Err(ValidationError::ModelRequired);
    }
    Ok(model)
}

/// Length is measured on the key as typed; whitespace-only counts as missing.
pub fn validate_api_key(key: &str) -> Result<&str, ValidationError> {
    if key.trim().is_empty() {
        return Err(ValidationError::ApiKeyRequired);
    }
    if key.chars().count() < MIN_API_KEY_LEN {
        return Err(ValidationError::ApiKeyTooShort);
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_three_lines_in_fixed_order() {
        let record = ConfigRecord::new("groq", "mixtral-8x7b-32768", "abcdefghij");
        assert_eq!(
            record.to_env_string(),
            "llm_model_provider=groq\nllm_model_name=mixtral-8x7b-32768\nllm_api_key=abcdefghij\n"
        );
    }

    #[test]
    fn redaction_keeps_only_the_tail() {
        assert_eq!(redact_api_key("sk-1234567890ab12"), "***ab12");
        assert_eq!(redact_api_key("abcd"), "***abcd");
    }

    #[test]
    fn redaction_guards_short_keys() {
        assert_eq!(redact_api_key(""), "***");
        assert_eq!(redact_api_key("abc"), "***");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let record = ConfigRecord::new("openai", "gpt-4", "sk-secretvalue9876");
        let debug = format!("{record:?}");
        assert!(!debug.contains("sk-secretvalue9876"));
        assert!(debug.contains("***9876"));
    }

    #[test]
    fn model_must_not_be_blank() {
        assert_eq!(validate_model(""), Err(ValidationError::ModelRequired));
        assert_eq!(validate_model("   "), Err(ValidationError::ModelRequired));
        assert_eq!(validate_model(" gpt-4 "), Ok("gpt-4"));
    }

    #[test]
    fn api_key_length_rules() {
        assert_eq!(validate_api_key(""), Err(ValidationError::ApiKeyRequired));
        for len in 1..MIN_API_KEY_LEN {
            let key = "k".repeat(len);
            assert_eq!(
                validate_api_key(&key),
                Err(ValidationError::ApiKeyTooShort),
                "length {len}"
            );
        }
        assert_eq!(validate_api_key("abcdefghij"), Ok("abcdefghij"));
    }

    #[test]
    fn api_key_length_counts_surrounding_spaces() {
        assert_eq!(validate_api_key("  abcdefgh  "), Ok("  abcdefgh  "));
        assert_eq!(validate_api_key("          "), Err(ValidationError::ApiKeyRequired));
    }

    #[test]
    fn validation_messages() {
        assert_eq!(ValidationError::ModelRequired.to_string(), "model name required");
        assert_eq!(ValidationError::ApiKeyRequired.to_string(), "API key required");
        assert_eq!(ValidationError::ApiKeyTooShort.to_string(), "API key too short");
    }
}
