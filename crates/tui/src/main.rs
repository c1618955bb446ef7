use clap::Parser;
use sassyshell_config::PersistError;
use sassyshell_tui::cli::{self, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stderr only, errors by default: the wizard owns the screen
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            println!("❌ Error: {e:#}");
            if let Some(persist) = e.downcast_ref::<PersistError>() {
                println!("   {}", persist.user_message());
            }
            ExitCode::FAILURE
        }
    }
}
