//! letter-rs: Transactional email composer
//!
//! Describe an email as plain data (greeting, paragraphs, a key/value
//! dictionary, a table, a call-to-action and a signature) and render it into
//! an HTML fragment and a plain-text alternative using a named theme.
//!
//! # Example
//!
//! ```
//! use letter_rs::{Action, Body, Email, Mailer, Product, ThemeRegistry};
//!
//! let product = Product::new("Acme", "https://acme.test/");
//! let mailer = Mailer::new(product, ThemeRegistry::new());
//!
//! let email = Email::new(Body {
//!     name: Some("Jon Snow".to_string()),
//!     intros: vec!["Welcome to Acme!".to_string()],
//!     action: Some(Action::new("Confirm your account", "https://acme.test/confirm")),
//!     ..Default::default()
//! });
//!
//! let rendered = mailer.render(&email).unwrap();
//! assert!(rendered.plain_text.starts_with("Hi, Jon Snow,"));
//! assert!(rendered.plain_text.contains("Confirm your account: https://acme.test/confirm"));
//! ```
//!
//! # Modules
//!
//! - [`content`]: Email content model
//! - [`section`]: Visible section composition
//! - [`render`]: HTML and plain-text writers
//! - [`escape`]: Text escaping per output format
//! - [`theme`]: Theme registry and override merging
//! - [`config`]: Configuration management
//! - [`logging`]: Subscriber setup
//! - [`error`]: Error types

pub mod config;
pub mod content;
pub mod error;
pub mod escape;
pub mod logging;
pub mod mailer;
pub mod render;
pub mod section;
pub mod theme;

// Re-export commonly used types
pub use config::Config;
pub use content::{Action, Body, Email, Entry, Product, RenderResult, Table, TextDirection};
pub use error::{ComposeError, Result};
pub use mailer::Mailer;
pub use theme::{ThemeConfig, ThemeOverride, ThemeRegistry, ThemeSelector};
