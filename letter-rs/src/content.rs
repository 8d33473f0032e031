//! Email content model
//!
//! Plain data describing one email. Callers build these values directly;
//! the engine only ever reads them.

use serde::{Deserialize, Serialize};

use crate::theme::ThemeOverride;

/// Default greeting word when the body does not supply one
pub const DEFAULT_GREETING: &str = "Hi";

/// Default sign-off word when the body does not supply one
pub const DEFAULT_SIGNATURE: &str = "Yours truly";

/// A transactional email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub body: Body,
}

impl Email {
    pub fn new(body: Body) -> Self {
        Self { body }
    }
}

/// Caller-authored content of one email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    /// Recipient display name
    pub name: Option<String>,
    /// Paragraphs shown after the greeting
    pub intros: Vec<String>,
    /// Key/value pairs shown after the intros
    pub dictionary: Vec<Entry>,
    /// Data table shown before the action
    pub table: Option<Table>,
    /// Call-to-action button
    pub action: Option<Action>,
    /// Paragraphs shown before the signature
    pub outros: Vec<String>,
    /// Greeting word ("Hi" when unset)
    pub greeting: Option<String>,
    /// Sign-off word ("Yours truly" when unset)
    pub signature: Option<String>,
    /// Replaces the whole greeting line when set
    pub title: Option<String>,
    pub hide_greeting: bool,
    pub hide_signature: bool,
    /// Per-email icon and logo sizing
    pub theme: Option<ThemeOverride>,
}

/// A single key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Tabular data with optional column headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// A table with neither headers nor rows has nothing to show
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Number of columns, taking ragged rows into account
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.columns.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Call-to-action button
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    /// Button text
    pub label: String,
    /// Absolute destination URL
    pub url: String,
    /// Paragraph shown above the button
    pub instructions: Option<String>,
    /// Button background, overrides the theme token
    pub color: Option<String>,
    /// Button text color, overrides the theme token
    pub text_color: Option<String>,
}

impl Action {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Both label and URL are blank
    pub fn is_blank(&self) -> bool {
        self.label.trim().is_empty() && self.url.trim().is_empty()
    }
}

/// Sender identity shown in the masthead, signature and footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub link: String,
    /// Logo image URL
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    /// Footer hint under an action button, `{ACTION}` is replaced by the label
    #[serde(default = "default_trouble_text")]
    pub trouble_text: String,
}

fn default_trouble_text() -> String {
    "If you're having trouble with the button '{ACTION}', copy and paste the URL below into your web browser.".to_string()
}

impl Product {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            logo: None,
            copyright: None,
            trouble_text: default_trouble_text(),
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }
}

/// Reading direction of the markup output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDirection {
    #[default]
    #[serde(rename = "ltr")]
    LeftToRight,
    #[serde(rename = "rtl")]
    RightToLeft,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::LeftToRight => "ltr",
            TextDirection::RightToLeft => "rtl",
        }
    }
}

/// Output of a render call, detached from its inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Embeddable HTML fragment
    pub markup: String,
    /// Plain-text alternative
    pub plain_text: String,
}
