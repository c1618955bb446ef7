use crate::onboarding::{SetupStep, Transition, WizardState};
use crate::ui::{render_wizard, Theme};
use anyhow::{Context, Result};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};
use sassyshell_config::EnvFileStore;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    Saved(PathBuf),
    Cancelled,
}

pub struct SetupApp {
    pub wizard: WizardState,
    pub should_quit: bool,
    store: EnvFileStore,
    theme: Theme,
    saved_path: Option<PathBuf>,
}

impl SetupApp {
    pub fn new(wizard: WizardState, store: EnvFileStore, theme: Theme) -> Self {
        Self {
            wizard,
            should_quit: false,
            store,
            theme,
            saved_path: None,
        }
    }

    pub fn outcome(&self) -> SetupOutcome {
        match &self.saved_path {
            Some(path) => SetupOutcome::Saved(path.clone()),
            None => SetupOutcome::Cancelled,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<SetupOutcome> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(POLL_INTERVAL)? {
                let event = event::read()?;
                if self.handle_event(event)? {
                    break;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(self.outcome())
    }

    pub fn render(&self, frame: &mut Frame) {
        render_wizard(frame, &self.wizard, self.saved_path.as_deref(), &self.theme);
    }

    /// Returns `true` once the UI should close. Persistence failures are
    /// returned as errors and end the run.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key_event(key),
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.wizard.cancel();
            self.should_quit = true;
            return Ok(true);
        }

        let step = self.wizard.step();
        if step == SetupStep::Complete {
            self.should_quit = true;
            return Ok(true);
        }

        match key.code {
            KeyCode::Esc => {
                self.wizard.back();
            }
            KeyCode::Enter => self.submit()?,
            _ if step.is_text_entry() => self.handle_text_key(key),
            KeyCode::Char('q') => {
                self.wizard.cancel();
            }
            KeyCode::Up | KeyCode::Char('k') => self.wizard.select_previous_provider(),
            KeyCode::Down | KeyCode::Char('j') => self.wizard.select_next_provider(),
            KeyCode::Char(c @ '1'..='9') if step == SetupStep::ChooseProvider => {
                let index = c as usize - '1' as usize;
                self.wizard.select_provider(index);
            }
            KeyCode::Char('y') if step == SetupStep::Confirm => self.submit()?,
            KeyCode::Char('n') if step == SetupStep::Confirm => {
                self.wizard.back();
            }
            _ => {}
        }

        self.should_quit = self.wizard.is_cancelled();
        Ok(self.should_quit)
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.wizard.edit(|input| input.handle_char(c));
            }
            KeyCode::Backspace => self.wizard.edit(|input| input.handle_backspace()),
            KeyCode::Left => self.wizard.edit(|input| input.move_left()),
            KeyCode::Right => self.wizard.edit(|input| input.move_right()),
            KeyCode::Home => self.wizard.edit(|input| input.move_home()),
            KeyCode::End => self.wizard.edit(|input| input.move_end()),
            _ => {}
        }
    }

    fn submit(&mut self) -> Result<()> {
        match self.wizard.submit() {
            Ok(Transition::Confirmed(record)) => {
                let path = self
                    .store
                    .persist(&record)
                    .context("saving configuration")?;
                self.saved_path = Some(path);
            }
            Ok(_) => {}
            Err(e) => warn!(step = ?self.wizard.step(), "rejected input: {e}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sassyshell_config::PersistError;
    use tempfile::TempDir;

    fn app() -> (TempDir, SetupApp) {
        let home = TempDir::new().expect("temp home");
        let store = EnvFileStore::with_home(home.path());
        (home, SetupApp::new(WizardState::new(), store, Theme::default()))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(app: &mut SetupApp, code: KeyCode) -> bool {
        app.handle_event(key(code)).expect("handle key")
    }

    fn type_text(app: &mut SetupApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn env_file(home: &TempDir) -> String {
        std::fs::read_to_string(home.path().join(".config/sassyshell/.env")).expect("env file")
    }

    #[test]
    fn end_to_end_writes_exact_file() {
        let (home, mut app) = app();

        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "mixtral-8x7b-32768");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "abcdefghij");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.wizard.step(), SetupStep::Confirm);

        assert!(!press(&mut app, KeyCode::Enter));
        assert_eq!(app.wizard.step(), SetupStep::Complete);
        assert_eq!(
            env_file(&home),
            "llm_model_provider=groq\nllm_model_name=mixtral-8x7b-32768\nllm_api_key=abcdefghij\n"
        );

        assert!(press(&mut app, KeyCode::Char('x')));
        assert_eq!(
            app.outcome(),
            SetupOutcome::Saved(home.path().join(".config/sassyshell/.env"))
        );
    }

    #[test]
    fn blank_model_defaults_for_gemini() {
        let (home, mut app) = app();

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "AIzaSy-0123456789");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('y'));

        assert!(env_file(&home).contains("llm_model_name=gemini-2.5-flash\n"));
    }

    #[test]
    fn letters_are_typed_not_treated_as_shortcuts() {
        let (_home, mut app) = app();
        press(&mut app, KeyCode::Enter);

        type_text(&mut app, "qwen-jk-ny");
        assert_eq!(app.wizard.model.value(), "qwen-jk-ny");
        assert!(!app.should_quit);
    }

    #[test]
    fn short_key_keeps_wizard_on_key_step() {
        let (home, mut app) = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "123456789");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.wizard.step(), SetupStep::EnterApiKey);
        assert_eq!(
            app.wizard.error(),
            Some(sassyshell_config::ValidationError::ApiKeyTooShort)
        );
        assert!(!home.path().join(".config/sassyshell/.env").exists());
    }

    #[test]
    fn arrows_and_vim_keys_move_selection() {
        let (_home, mut app) = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.wizard.provider().identifier, "openai");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.wizard.provider().identifier, "google_genai");
    }

    #[test]
    fn ctrl_c_cancels_without_writing() {
        let (home, mut app) = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "gpt-4");

        let quit = app
            .handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            )))
            .expect("ctrl+c");

        assert!(quit);
        assert_eq!(app.outcome(), SetupOutcome::Cancelled);
        assert!(!home.path().join(".config").exists());
    }

    #[test]
    fn escape_on_first_step_quits() {
        let (_home, mut app) = app();
        assert!(press(&mut app, KeyCode::Esc));
        assert!(app.wizard.is_cancelled());
    }

    #[test]
    fn no_on_confirm_goes_back_to_key_step() {
        let (_home, mut app) = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "gemini-2.5-pro");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "AIzaSy-0123456789");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.wizard.step(), SetupStep::EnterApiKey);
        assert_eq!(app.wizard.api_key.value(), "AIzaSy-0123456789");
    }

    #[test]
    fn persistence_failure_is_fatal() {
        let (home, mut app) = app();
        std::fs::create_dir_all(home.path().join(".config")).expect(".config");
        std::fs::write(home.path().join(".config/sassyshell"), b"file").expect("blocker");

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "AIzaSy-0123456789");
        press(&mut app, KeyCode::Enter);

        let err = app.handle_event(key(KeyCode::Enter)).expect_err("persist fails");
        assert!(matches!(
            err.downcast_ref::<PersistError>(),
            Some(PersistError::DirectoryCreateFailed { .. })
        ));
        assert_eq!(app.outcome(), SetupOutcome::Cancelled);
    }
}
