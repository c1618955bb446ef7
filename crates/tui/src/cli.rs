use crate::app::{SetupApp, SetupOutcome};
use crate::config::Config;
use crate::onboarding::WizardState;
use crate::ui::Theme;
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use sassyshell_config::EnvFileStore;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::warn;

pub const USAGE: &str = "Usage: sassysh-tui <command>
Commands:
  setup    Run interactive setup wizard";

#[derive(Parser, Debug)]
#[command(name = "sassysh-tui", version, about = "Terminal setup for SassyShell")]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run interactive setup wizard
    Setup,

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        None => {
            println!("{USAGE}");
            Ok(ExitCode::FAILURE)
        }
        Some(Command::Unknown(args)) => {
            println!("Unknown command: {}", args.first().map(String::as_str).unwrap_or(""));
            Ok(ExitCode::FAILURE)
        }
        Some(Command::Setup) => run_setup(),
    }
}

fn run_setup() -> Result<ExitCode> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("setup needs an interactive terminal");
    }

    let store = EnvFileStore::for_current_user()?;
    let config = Config::load_or_default(&Config::path_in(store.dir()));
    let theme = Theme::from_config(&config.theme);

    let mut wizard = WizardState::new();
    match store.load() {
        Ok(Some(existing)) => wizard = wizard.with_existing(&existing),
        Ok(None) => {}
        Err(e) => warn!("existing configuration not readable: {e}"),
    }

    let mut app = SetupApp::new(wizard, store, theme);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    match result? {
        SetupOutcome::Saved(path) => {
            println!("✅ Setup complete!");
            println!("\n📁 Configuration saved to {}", path.display());
            println!("🎉 You can now use sassysh ask to query your AI assistant!");
            Ok(ExitCode::SUCCESS)
        }
        SetupOutcome::Cancelled => {
            println!("👋 Setup cancelled. Run again anytime!");
            Ok(ExitCode::FAILURE)
        }
    }
}
