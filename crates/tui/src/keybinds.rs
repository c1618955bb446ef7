use crate::onboarding::SetupStep;

pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    /// Footer line for a step; nothing is shown once setup is complete.
    pub fn footer(&self, step: SetupStep) -> Option<&'static str> {
        match step {
            SetupStep::ChooseProvider => {
                Some("↑/↓ or 1-5 to choose • Enter to continue • q or Esc to quit")
            }
            SetupStep::EnterModel | SetupStep::EnterApiKey => {
                Some("Press Enter to continue • Esc to go back • Ctrl+C to quit")
            }
            SetupStep::Confirm => {
                Some("Enter/y to save • n or Esc to go back • Ctrl+C to quit")
            }
            SetupStep::Complete => None,
        }
    }
}
