//! Render entry point

use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::content::{Action, Email, Product, RenderResult, TextDirection};
use crate::error::{ComposeError, Result};
use crate::render::render;
use crate::section::compose;
use crate::theme::{ThemeRegistry, ThemeSelector, DEFAULT_THEME};

/// URL schemes accepted for action buttons
const ACTION_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Renders emails for one product
///
/// The theme registry is frozen once it is handed to a `Mailer`; clones share
/// it, so a single `Mailer` can serve renders from many threads.
#[derive(Debug, Clone)]
pub struct Mailer {
    product: Product,
    registry: Arc<ThemeRegistry>,
    theme: String,
    direction: TextDirection,
}

impl Mailer {
    /// Create a mailer using the default theme
    pub fn new(product: Product, registry: ThemeRegistry) -> Self {
        Self {
            product,
            registry: Arc::new(registry),
            theme: DEFAULT_THEME.to_string(),
            direction: TextDirection::default(),
        }
    }

    /// Build a mailer from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let registry = config.theme_registry()?;

        Ok(Self::new(config.product.clone(), registry)
            .with_theme(config.theme.default.as_str())
            .with_text_direction(config.theme.text_direction))
    }

    /// Theme used by [`Mailer::render`]
    pub fn with_theme(mut self, name: impl Into<String>) -> Self {
        self.theme = name.into();
        self
    }

    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Render `email` with the mailer's theme
    pub fn render(&self, email: &Email) -> Result<RenderResult> {
        self.render_with(email, &ThemeSelector::Named(self.theme.clone()))
    }

    /// Render `email` with an explicit theme name or inline theme
    ///
    /// Fails without producing any output when the theme cannot be resolved
    /// or the action is malformed.
    pub fn render_with(&self, email: &Email, selector: &ThemeSelector) -> Result<RenderResult> {
        let body = &email.body;

        let theme = self.registry.resolve(selector, body.theme.as_ref())?;

        if let Some(action) = &body.action {
            validate_action(action)?;
        }

        let sections = compose(body, &self.product);
        debug!(
            "Composed {} sections (greeting hidden: {}, signature hidden: {})",
            sections.len(),
            body.hide_greeting,
            body.hide_signature
        );

        render(&sections, &theme, &self.product, self.direction)
    }
}

/// Reject actions that have only one of label and URL, or an unusable URL
///
/// An action with both fields blank counts as absent.
pub fn validate_action(action: &Action) -> Result<()> {
    if action.is_blank() {
        return Ok(());
    }

    let label = action.label.trim();
    let url = action.url.trim();

    if label.is_empty() {
        return Err(ComposeError::MalformedAction(format!(
            "Action pointing to '{}' has no label",
            url
        )));
    }

    if url.is_empty() {
        return Err(ComposeError::MalformedAction(format!(
            "Action '{}' has no URL",
            label
        )));
    }

    let parsed = Url::parse(url).map_err(|e| {
        ComposeError::MalformedAction(format!("Action '{}' has invalid URL '{}': {}", label, url, e))
    })?;

    if !ACTION_SCHEMES.contains(&parsed.scheme()) {
        return Err(ComposeError::MalformedAction(format!(
            "Action '{}' uses unsupported URL scheme '{}'",
            label,
            parsed.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_action() {
        assert!(validate_action(&Action::new("Confirm", "https://example.test/x")).is_ok());
        assert!(validate_action(&Action::new("Write us", "mailto:help@example.test")).is_ok());
        assert!(validate_action(&Action::default()).is_ok());
    }

    #[test]
    fn test_validate_dangling_action() {
        let missing_url = validate_action(&Action::new("Confirm", ""));
        assert!(matches!(missing_url, Err(ComposeError::MalformedAction(_))));

        let missing_label = validate_action(&Action::new("", "https://example.test/x"));
        assert!(matches!(missing_label, Err(ComposeError::MalformedAction(_))));
    }

    #[test]
    fn test_validate_invalid_url() {
        assert!(validate_action(&Action::new("Confirm", "/relative/path")).is_err());
        assert!(validate_action(&Action::new("Confirm", "not a url")).is_err());
        assert!(validate_action(&Action::new("Confirm", "javascript:alert(1)")).is_err());
    }

    #[test]
    fn test_mailer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mailer>();
    }
}
