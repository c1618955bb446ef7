pub mod app;
pub mod cli;
pub mod config;
pub mod input;
pub mod keybinds;
pub mod onboarding;
pub mod ui;

pub use config::Config;
