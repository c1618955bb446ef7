use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "tui.toml";

/// Presentation settings read from `tui.toml` next to the saved `.env`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
}

/// Colours as ratatui colour names or `#RRGGBB`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub accent: String,
    pub muted: String,
    pub hint: String,
    pub success: String,
    pub error: String,
    pub highlight: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#7C3AED".to_string(),
            muted: "#6B7280".to_string(),
            hint: "#9CA3AF".to_string(),
            success: "#10B981".to_string(),
            error: "#EF4444".to_string(),
            highlight: "#A78BFA".to_string(),
        }
    }
}

impl Config {
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(SETTINGS_FILE_NAME)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("ignoring UI settings: {e:#}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let config = Config::load_or_default(&Config::path_in(dir.path()));
        assert_eq!(config.theme.accent, "#7C3AED");
    }

    #[test]
    fn partial_theme_keeps_other_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = Config::path_in(dir.path());
        std::fs::write(&path, "[theme]\naccent = \"cyan\"\n").expect("write settings");

        let config = Config::load(&path).expect("load");
        assert_eq!(config.theme.accent, "cyan");
        assert_eq!(config.theme.success, "#10B981");
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = TempDir::new().expect("temp dir");
        let path = Config::path_in(dir.path());
        std::fs::write(&path, "theme = [").expect("write settings");

        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path).theme.hint, "#9CA3AF");
    }
}
