use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CalmlineError, Result};

/// Top-level configuration for Calmline.
///
/// Loaded from `~/.calmline/config.toml` by default. Every section falls back
/// to its defaults when missing from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalmlineConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub speech: SpeechCommandConfig,
}

impl CalmlineConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CalmlineConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CalmlineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Platform default config location: `~/.calmline/config.toml`.
///
/// Falls back to the working directory when no home directory is set.
pub fn default_config_path() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".calmline")
        .join("config.toml")
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Spoken reply settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Whether replies are read aloud.
    pub enabled: bool,
    /// Substring matched against voice names when choosing a voice.
    pub preferred_name: String,
    /// Locale prefix used when no voice name matches.
    pub lang_prefix: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            preferred_name: "Samantha".to_string(),
            lang_prefix: "en".to_string(),
        }
    }
}

/// External synthesizer program used by the terminal host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechCommandConfig {
    /// Program name or path, looked up on `PATH`.
    pub program: String,
    /// Flag preceding the selected voice name. Empty disables voice passing.
    pub voice_flag: String,
    /// Arguments that make the program print its voice table.
    pub list_voices_args: Vec<String>,
    /// Layout of that table.
    pub voice_table: VoiceTableFormat,
}

/// Voice listing layouts understood by the terminal host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceTableFormat {
    /// `espeak`/`espeak-ng --voices`: `Pty Language Age/Gender VoiceName ...`.
    #[default]
    Espeak,
    /// macOS `say -v ?`: `Name  locale  # sample text`.
    Say,
}

impl Default for SpeechCommandConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
            voice_flag: "-v".to_string(),
            list_voices_args: vec!["--voices".to_string()],
            voice_table: VoiceTableFormat::Espeak,
        }
    }
}
