//! Configuration management and validation.
//!
//! Decoder tunables (the sea-level-pressure heuristic, named visual approaches,
//! extra advisory phrases) plus output and logging settings for the
//! command-line tool. Configuration is layered: built-in defaults, then an
//! optional TOML file, then command-line overrides.

use crate::constants::{DEFAULT_NAMED_VISUAL_APPROACHES, DEFAULT_SLP_SPLIT_THRESHOLD};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory under the platform config dir that holds `config.toml`
pub const CONFIG_DIR_NAME: &str = "wxdecode";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Tunables that change how reports are decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Coded `SLPnnn` values below this read as 10nn.n hPa, the rest as 9nn.n hPa
    pub slp_split_threshold: u16,

    /// Named visual approach procedures recognized in broadcasts
    pub named_visual_approaches: Vec<String>,

    /// Additional phrases reported as custom advisories
    pub advisory_phrases_extra: Vec<String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            slp_split_threshold: DEFAULT_SLP_SPLIT_THRESHOLD,
            named_visual_approaches: DEFAULT_NAMED_VISUAL_APPROACHES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            advisory_phrases_extra: Vec::new(),
        }
    }
}

impl DecoderConfig {
    /// Set the sea-level-pressure cut-over
    pub fn with_slp_split_threshold(mut self, threshold: u16) -> Self {
        self.slp_split_threshold = threshold;
        self
    }

    /// Recognize an additional named visual approach
    pub fn with_named_visual_approach(mut self, name: impl Into<String>) -> Self {
        self.named_visual_approaches.push(name.into().to_uppercase());
        self
    }

    /// Report sentences containing `phrase` as custom advisories
    pub fn with_advisory_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.advisory_phrases_extra.push(phrase.into().to_uppercase());
        self
    }

    /// Validate decoder settings
    pub fn validate(&self) -> Result<()> {
        if !(1..=999).contains(&self.slp_split_threshold) {
            return Err(Error::configuration(format!(
                "slp_split_threshold must be between 1 and 999, got {}",
                self.slp_split_threshold
            )));
        }
        if self
            .named_visual_approaches
            .iter()
            .chain(&self.advisory_phrases_extra)
            .any(|p| p.trim().is_empty())
        {
            return Err(Error::configuration(
                "phrases in named_visual_approaches and advisory_phrases_extra must not be blank",
            ));
        }
        Ok(())
    }
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputStyle,

    /// Colored section headings in human output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputStyle::Human,
            color: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when neither `-v` nor `-q` is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Complete configuration for the decoder and its command-line front end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub decoder: DecoderConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Default config file location (`<config dir>/wxdecode/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| Error::config_parse(path, e))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, or from the default location when it exists
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file silently yields the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) if !path.exists() => return Err(Error::input_not_found(path)),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No configuration file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace decoder settings
    pub fn with_decoder(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }

    /// Set output style
    pub fn with_output_style(mut self, style: OutputStyle) -> Self {
        self.output.format = style;
        self
    }

    /// Disable colored output
    pub fn without_color(mut self) -> Self {
        self.output.color = false;
        self
    }

    /// Validate all settings
    pub fn validate(&self) -> Result<()> {
        self.decoder.validate()?;
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::configuration(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.decoder.slp_split_threshold, 500);
        assert_eq!(config.decoder.named_visual_approaches.len(), 3);
        assert_eq!(config.output.format, OutputStyle::Human);
    }

    #[test]
    fn test_builders() {
        let decoder = DecoderConfig::default()
            .with_slp_split_threshold(550)
            .with_named_visual_approach("river visual")
            .with_advisory_phrase("wake turbulence");
        assert_eq!(decoder.slp_split_threshold, 550);
        assert!(decoder.named_visual_approaches.contains(&"RIVER VISUAL".to_string()));
        assert_eq!(decoder.advisory_phrases_extra, vec!["WAKE TURBULENCE"]);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = Config::default().with_decoder(DecoderConfig::default().with_slp_split_threshold(0));
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));

        let config = Config::default().with_decoder(DecoderConfig::default().with_advisory_phrase("  "));
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[decoder]\nslp_split_threshold = 600\n\n[output]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.decoder.slp_split_threshold, 600);
        assert_eq!(config.decoder.named_visual_approaches.len(), 3);
        assert_eq!(config.output.format, OutputStyle::Json);
        assert!(config.output.color);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_malformed_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[decoder\nslp_split_threshold = ").unwrap();
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(Error::ConfigParse { .. })
        ));
    }
}
