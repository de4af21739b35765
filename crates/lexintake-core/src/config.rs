use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{IntakeError, Result};

/// Top-level configuration for the lexintake application.
///
/// Loaded from `lexintake.toml` by default. Each section corresponds to a
/// bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub narration: NarrationConfig,
}

impl IntakeConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: IntakeConfig = toml::from_str(&content)?;
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
            toml::to_string_pretty(self).map_err(|e| IntakeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Port the HTTP server binds on (localhost only).
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            port: 3040,
            log_level: "info".to_string(),
        }
    }
}

/// How strictly contact fields are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactValidation {
    /// Email must contain `@` and `.`; phone needs at least 7 digits.
    Strict,
    /// Any non-empty text is accepted.
    Permissive,
}

/// Dialogue flow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Ask for the caller's name before the role question.
    pub collect_name: bool,
    /// Collect email and phone between the case description and scheduling.
    pub collect_contact: bool,
    /// Validation strictness for email and phone.
    pub contact_validation: ContactValidation,
    /// Minimum trimmed length for an unrecognized message to count as a
    /// case description.
    pub description_min_chars: usize,
    /// Minutes of silence after which a session is dropped.
    pub session_timeout_minutes: u32,
    /// Maximum accepted message length in characters.
    pub max_message_chars: usize,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            collect_name: false,
            collect_contact: true,
            contact_validation: ContactValidation::Strict,
            description_min_chars: 20,
            session_timeout_minutes: 30,
            max_message_chars: 2000,
        }
    }
}

/// Narration (text-to-speech) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Whether the narration endpoint is enabled.
    pub enabled: bool,
    /// Engine name: "browser" (client-side fallback) or "remote".
    pub engine: String,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            engine: "browser".to_string(),
        }
    }
}
