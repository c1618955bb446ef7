//! Setup wizard state machine.
//!
//! Pure and synchronous: every method is an input event and nothing here
//! touches the terminal or the filesystem. The only output is the
//! [`ConfigRecord`] handed back when the user confirms.

use crate::input::TextInput;
use sassyshell_config::provider::{provider_index, DEFAULT_PROVIDER_INDEX};
use sassyshell_config::record::{redact_api_key, validate_api_key, validate_model};
use sassyshell_config::{ConfigRecord, ProviderOption, ValidationError, PROVIDERS};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    ChooseProvider,
    EnterModel,
    EnterApiKey,
    Confirm,
    Complete,
}

impl SetupStep {
    /// Steps shown in the progress line; `Complete` is not counted.
    pub const COUNT: usize = 4;

    /// 1-based position, `None` once complete.
    pub fn number(&self) -> Option<usize> {
        match self {
            Self::ChooseProvider => Some(1),
            Self::EnterModel => Some(2),
            Self::EnterApiKey => Some(3),
            Self::Confirm => Some(4),
            Self::Complete => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ChooseProvider => "Provider",
            Self::EnterModel => "Model",
            Self::EnterApiKey => "API Key",
            Self::Confirm => "Confirm",
            Self::Complete => "Complete!",
        }
    }

    pub fn is_text_entry(&self) -> bool {
        matches!(self, Self::EnterModel | Self::EnterApiKey)
    }

    fn next(self) -> Self {
        match self {
            Self::ChooseProvider => Self::EnterModel,
            Self::EnterModel => Self::EnterApiKey,
            Self::EnterApiKey => Self::Confirm,
            Self::Confirm => Self::Complete,
            Self::Complete => Self::Complete,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            Self::ChooseProvider => None,
            Self::EnterModel => Some(Self::ChooseProvider),
            Self::EnterApiKey => Some(Self::EnterModel),
            Self::Confirm => Some(Self::EnterApiKey),
            Self::Complete => None,
        }
    }
}

/// What to do when the model field is submitted blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelPolicy {
    #[default]
    ProviderDefault,
    Required,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Transition {
    Stayed,
    Moved(SetupStep),
    Cancelled,
    /// Emitted once, on the Confirm to Complete transition.
    Confirmed(ConfigRecord),
}

/// Provider and model of a configuration found on disk. The key is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingConfig {
    pub provider: String,
    pub model: String,
}

#[derive(Debug)]
pub struct WizardState {
    step: SetupStep,
    selected_provider: usize,
    pub model: TextInput,
    pub api_key: TextInput,
    cancelled: bool,
    error: Option<ValidationError>,
    model_policy: ModelPolicy,
    existing: Option<ExistingConfig>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: SetupStep::ChooseProvider,
            selected_provider: DEFAULT_PROVIDER_INDEX,
            model: TextInput::new(),
            api_key: TextInput::new(),
            cancelled: false,
            error: None,
            model_policy: ModelPolicy::default(),
            existing: None,
        }
    }

    pub fn with_model_policy(mut self, policy: ModelPolicy) -> Self {
        self.model_policy = policy;
        self
    }

    /// Remembers the saved provider and model, and preselects that provider
    /// when it is one of the known options.
    pub fn with_existing(mut self, record: &ConfigRecord) -> Self {
        if let Some(index) = provider_index(&record.provider) {
            self.selected_provider = index;
        }
        self.existing = Some(ExistingConfig {
            provider: record.provider.clone(),
            model: record.model.clone(),
        });
        self
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.step == SetupStep::Complete
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn existing(&self) -> Option<&ExistingConfig> {
        self.existing.as_ref()
    }

    pub fn selected_provider(&self) -> usize {
        self.selected_provider
    }

    pub fn provider(&self) -> &'static ProviderOption {
        &PROVIDERS[self.selected_provider]
    }

    pub fn redacted_api_key(&self) -> String {
        redact_api_key(self.api_key.value())
    }

    pub fn select_next_provider(&mut self) {
        if self.accepts(SetupStep::ChooseProvider) {
            self.selected_provider = (self.selected_provider + 1).min(PROVIDERS.len() - 1);
        }
    }

    pub fn select_previous_provider(&mut self) {
        if self.accepts(SetupStep::ChooseProvider) {
            self.selected_provider = self.selected_provider.saturating_sub(1);
        }
    }

    /// Selects by zero-based index; out-of-range indices are ignored.
    pub fn select_provider(&mut self, index: usize) -> bool {
        if !self.accepts(SetupStep::ChooseProvider) || index >= PROVIDERS.len() {
            return false;
        }
        self.selected_provider = index;
        true
    }

    /// The text field being edited on the current step, if any.
    pub fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        if self.cancelled {
            return None;
        }
        match self.step {
            SetupStep::EnterModel => Some(&mut self.model),
            SetupStep::EnterApiKey => Some(&mut self.api_key),
            _ => None,
        }
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut TextInput)) {
        if let Some(input) = self.active_input_mut() {
            f(input);
            self.error = None;
        }
    }

    pub fn submit(&mut self) -> Result<Transition, ValidationError> {
        if self.cancelled {
            return Ok(Transition::Stayed);
        }

        let result = match self.step {
            SetupStep::ChooseProvider => Ok(self.advance()),
            SetupStep::EnterModel => self.submit_model(),
            SetupStep::EnterApiKey => self.submit_api_key(),
            SetupStep::Confirm => Ok(self.confirm()),
            SetupStep::Complete => Ok(Transition::Stayed),
        };

        self.error = result.as_ref().err().copied();
        result
    }

    /// Returns to the previous step; on the first step this cancels.
    pub fn back(&mut self) -> Transition {
        if self.cancelled || self.step == SetupStep::Complete {
            return Transition::Stayed;
        }
        self.error = None;
        match self.step.previous() {
            None => self.cancel(),
            Some(previous) => {
                debug!(from = ?self.step, to = ?previous, "wizard step back");
                self.step = previous;
                Transition::Moved(previous)
            }
        }
    }

    pub fn cancel(&mut self) -> Transition {
        if self.step == SetupStep::Complete {
            return Transition::Stayed;
        }
        self.cancelled = true;
        Transition::Cancelled
    }

    fn accepts(&self, step: SetupStep) -> bool {
        !self.cancelled && self.step == step
    }

    fn advance(&mut self) -> Transition {
        let next = self.step.next();
        debug!(from = ?self.step, to = ?next, "wizard step forward");
        self.step = next;
        Transition::Moved(next)
    }

    fn submit_model(&mut self) -> Result<Transition, ValidationError> {
        let model = match validate_model(self.model.value()) {
            Ok(model) => model.to_string(),
            Err(_) if self.model_policy == ModelPolicy::ProviderDefault => {
                self.provider().default_model.to_string()
            }
            Err(e) => return Err(e),
        };
        self.model.set(&model);
        Ok(self.advance())
    }

    fn submit_api_key(&mut self) -> Result<Transition, ValidationError> {
        validate_api_key(self.api_key.value())?;
        Ok(self.advance())
    }

    fn confirm(&mut self) -> Transition {
        let record = ConfigRecord::new(
            self.provider().identifier,
            self.model.value().trim(),
            self.api_key.value(),
        );
        self.advance();
        Transition::Confirmed(record)
    }
}
