//! Configuration for letter-rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::content::{Product, TextDirection};
use crate::error::{ComposeError, Result};
use crate::theme::{ThemeConfig, ThemeRegistry, DEFAULT_THEME};

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Sender identity
    pub product: Product,
    /// Theme selection and extra themes
    #[serde(default)]
    pub theme: ThemeSection,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Theme configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeSection {
    /// Theme used when a render does not pick one
    #[serde(default = "default_theme_name")]
    pub default: String,
    /// Reading direction of the markup output
    #[serde(default)]
    pub text_direction: TextDirection,
    /// Additional named themes
    #[serde(default)]
    pub themes: BTreeMap<String, ThemeConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_theme_name() -> String {
    DEFAULT_THEME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ThemeSection {
    fn default() -> Self {
        Self {
            default: default_theme_name(),
            text_direction: TextDirection::default(),
            themes: BTreeMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ComposeError::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Create a default development configuration
    pub fn development() -> Self {
        Self {
            product: Product::new("letter-rs", "http://localhost/"),
            theme: ThemeSection::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.product.link).map_err(|e| {
            ComposeError::Configuration(format!(
                "Invalid product link '{}': {}",
                self.product.link, e
            ))
        })?;

        if self.theme.themes.contains_key(DEFAULT_THEME) {
            return Err(ComposeError::Configuration(format!(
                "Theme name '{}' is reserved",
                DEFAULT_THEME
            )));
        }

        let builtin = ThemeRegistry::new();
        let default = self.theme.default.as_str();
        if !builtin.contains(default) && !self.theme.themes.contains_key(default) {
            return Err(ComposeError::Configuration(format!(
                "Default theme '{}' is not defined",
                self.theme.default
            )));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ComposeError::Configuration(format!(
                "Unknown logging format '{}'",
                other
            ))),
        }
    }

    /// Build a registry holding the built-in and configured themes
    pub fn theme_registry(&self) -> Result<ThemeRegistry> {
        let mut registry = ThemeRegistry::new();
        for (name, theme) in &self.theme.themes {
            registry.register(name.as_str(), theme.clone())?;
        }
        Ok(registry)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme.default, DEFAULT_THEME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r##"
[product]
name = "Acme"
link = "https://acme.test/"
logo = "https://acme.test/logo.png"

[theme]
default = "brand"
text_direction = "rtl"

[theme.themes.brand]
icon = "https://acme.test/icon.png"
logo_width = 150

[theme.themes.brand.tokens]
button_color = "#FF6600"
"##;
        let config = Config::from_toml(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.product.name, "Acme");
        assert!(config.product.trouble_text.contains("{ACTION}"));
        assert_eq!(config.theme.text_direction, TextDirection::RightToLeft);
        assert_eq!(config.logging.format, "pretty");

        let registry = config.theme_registry().unwrap();
        let brand = registry.lookup("brand").unwrap();
        assert_eq!(brand.logo_width.map(|w| w.get()), Some(150));
        assert_eq!(brand.tokens.get("button_color").map(String::as_str), Some("#FF6600"));
    }

    #[test]
    fn test_validate_unknown_default_theme() {
        let mut config = Config::default();
        config.theme.default = "missing".to_string();
        assert!(matches!(config.validate(), Err(ComposeError::Configuration(_))));
    }

    #[test]
    fn test_validate_reserved_theme() {
        let mut config = Config::default();
        config
            .theme
            .themes
            .insert(DEFAULT_THEME.to_string(), ThemeConfig::default());
        assert!(config.validate().is_err());
        assert!(config.theme_registry().is_err());
    }

    #[test]
    fn test_validate_logging_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_zero_logo_width() {
        let toml = r#"
[product]
name = "Acme"
link = "https://acme.test/"

[theme.themes.brand]
logo_width = 0
"#;
        assert!(Config::from_toml(toml).is_err());
    }
}
