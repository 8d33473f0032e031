//! Theme registry
//!
//! Themes are partial bundles of visual settings. A render resolves its
//! theme by layering, field by field, the built-in default theme, the
//! selected base theme and the per-email override, the later layer winning
//! whenever it sets a field.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;
use tracing::{debug, info, warn};

use crate::error::{ComposeError, Result};

/// Reserved name of the built-in theme every other theme falls back to
pub const DEFAULT_THEME: &str = "default";

/// Name of the second built-in theme
pub const FLAT_THEME: &str = "flat";

const DEFAULT_LOGO_WIDTH: NonZeroU32 = match NonZeroU32::new(120) {
    Some(width) => width,
    None => panic!("logo width must be positive"),
};

/// Well-known token keys read by the markup templates
pub mod tokens {
    pub const BACKGROUND_COLOR: &str = "background_color";
    pub const BODY_COLOR: &str = "body_color";
    pub const TEXT_COLOR: &str = "text_color";
    pub const HEADING_COLOR: &str = "heading_color";
    pub const MUTED_COLOR: &str = "muted_color";
    pub const BORDER_COLOR: &str = "border_color";
    pub const BUTTON_COLOR: &str = "button_color";
    pub const BUTTON_TEXT_COLOR: &str = "button_text_color";
    pub const FONT_FAMILY: &str = "font_family";
}

/// Visual parameters of a theme, every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Icon reference shown left of the product name
    pub icon: Option<String>,
    /// Logo width in pixels
    pub logo_width: Option<NonZeroU32>,
    /// Color and font tokens, opaque to the engine
    pub tokens: BTreeMap<String, String>,
}

impl ThemeConfig {
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_logo_width(mut self, width: NonZeroU32) -> Self {
        self.logo_width = Some(width);
        self
    }

    pub fn with_token(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(key.into(), value.into());
        self
    }

    /// Layer `over` on top of `self`: set fields in `over` win
    pub fn merge(mut self, over: &ThemeConfig) -> ThemeConfig {
        if over.icon.is_some() {
            self.icon = over.icon.clone();
        }
        if over.logo_width.is_some() {
            self.logo_width = over.logo_width;
        }
        for (key, value) in &over.tokens {
            self.tokens.insert(key.clone(), value.clone());
        }
        self
    }
}

/// Per-email override of a few theme fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverride {
    pub icon: Option<String>,
    pub logo_width: Option<NonZeroU32>,
}

impl From<&ThemeOverride> for ThemeConfig {
    fn from(over: &ThemeOverride) -> Self {
        ThemeConfig {
            icon: over.icon.clone(),
            logo_width: over.logo_width,
            tokens: BTreeMap::new(),
        }
    }
}

/// How a render picks its base theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSelector {
    /// Theme registered under this name
    Named(String),
    /// Theme supplied by the caller for this render only
    Inline(ThemeConfig),
}

impl ThemeSelector {
    pub fn named(name: impl Into<String>) -> Self {
        ThemeSelector::Named(name.into())
    }
}

/// Fully merged theme handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub icon: Option<String>,
    pub logo_width: u32,
    pub tokens: BTreeMap<String, String>,
}

impl ResolvedTheme {
    /// Token value, empty when neither the theme nor the default defines it
    pub fn token(&self, key: &str) -> &str {
        self.tokens.get(key).map(String::as_str).unwrap_or_default()
    }
}

/// Named themes available to renders
///
/// Populated through `&mut self` before rendering starts, then shared
/// read-only (the `Mailer` keeps it behind an `Arc`).
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: HashMap<String, ThemeConfig>,
}

impl ThemeRegistry {
    /// Create a registry holding the built-in themes
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        themes.insert(DEFAULT_THEME.to_string(), Self::default_theme());
        themes.insert(FLAT_THEME.to_string(), Self::flat_theme());
        Self { themes }
    }

    fn default_theme() -> ThemeConfig {
        ThemeConfig {
            icon: None,
            logo_width: Some(DEFAULT_LOGO_WIDTH),
            tokens: BTreeMap::new(),
        }
        .with_token(tokens::BACKGROUND_COLOR, "#F2F4F6")
        .with_token(tokens::BODY_COLOR, "#FFFFFF")
        .with_token(tokens::TEXT_COLOR, "#51545E")
        .with_token(tokens::HEADING_COLOR, "#333333")
        .with_token(tokens::MUTED_COLOR, "#A8AAAF")
        .with_token(tokens::BORDER_COLOR, "#EAEAEC")
        .with_token(tokens::BUTTON_COLOR, "#3869D4")
        .with_token(tokens::BUTTON_TEXT_COLOR, "#FFFFFF")
        .with_token(
            tokens::FONT_FAMILY,
            "'Nunito Sans', Helvetica, Arial, sans-serif",
        )
    }

    fn flat_theme() -> ThemeConfig {
        ThemeConfig::default()
            .with_token(tokens::BACKGROUND_COLOR, "#FFFFFF")
            .with_token(tokens::TEXT_COLOR, "#74787E")
            .with_token(tokens::HEADING_COLOR, "#2F3133")
            .with_token(tokens::BUTTON_COLOR, "#414EF9")
            .with_token(tokens::FONT_FAMILY, "Helvetica, Arial, sans-serif")
    }

    /// Register a theme under `name`, replacing any previous theme of that name
    pub fn register(&mut self, name: impl Into<String>, config: ThemeConfig) -> Result<()> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(ComposeError::Configuration(
                "Theme name cannot be empty".to_string(),
            ));
        }

        if name == DEFAULT_THEME {
            return Err(ComposeError::Configuration(format!(
                "Theme name '{}' is reserved",
                DEFAULT_THEME
            )));
        }

        info!("Registering theme: {}", name);
        self.themes.insert(name, config);

        Ok(())
    }

    /// Look up a registered theme
    pub fn lookup(&self, name: &str) -> Option<&ThemeConfig> {
        self.themes.get(name)
    }

    /// Whether a theme is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Registered theme names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Merge default theme, selected base theme and per-email override
    pub fn resolve(
        &self,
        selector: &ThemeSelector,
        over: Option<&ThemeOverride>,
    ) -> Result<ResolvedTheme> {
        let default = self
            .themes
            .get(DEFAULT_THEME)
            .cloned()
            .unwrap_or_else(Self::default_theme);

        let base = match selector {
            ThemeSelector::Inline(config) => Some(config),
            ThemeSelector::Named(name) => match self.themes.get(name.as_str()) {
                Some(config) => Some(config),
                None if over.is_some() => {
                    warn!(
                        "Theme '{}' not registered, using '{}' as base for the override",
                        name, DEFAULT_THEME
                    );
                    None
                }
                None => {
                    return Err(ComposeError::Configuration(format!(
                        "Unknown theme '{}'",
                        name
                    )));
                }
            },
        };

        let mut merged = match base {
            Some(base) => default.merge(base),
            None => default,
        };
        if let Some(over) = over {
            merged = merged.merge(&ThemeConfig::from(over));
        }

        debug!(
            "Resolved theme: icon={:?}, logo_width={:?}",
            merged.icon, merged.logo_width
        );

        let logo_width = merged.logo_width.unwrap_or(DEFAULT_LOGO_WIDTH).get();

        Ok(ResolvedTheme {
            icon: merged.icon,
            logo_width,
            tokens: merged.tokens,
        })
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
