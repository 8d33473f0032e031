//! HTML fragment writer
//!
//! Templates are compiled with escaping disabled: every caller string is
//! passed through [`escape`] before it reaches a template field.

use askama::Template;

use super::SectionWriter;
use crate::content::{Action, Entry, Product, Table, TextDirection};
use crate::error::Result;
use crate::escape::{escape, Format};
use crate::theme::{tokens, ResolvedTheme};

/// Render `template` and append it to the section list
fn push<T: Template>(body: &mut Vec<String>, template: T) -> Result<()> {
    body.push(template.render()?);
    Ok(())
}

fn esc(raw: &str) -> String {
    escape(raw, Format::Markup).into_owned()
}

/// Escape multi-line text and turn its line breaks into `<br>`
fn esc_lines(raw: &str) -> String {
    let normalized = escape(raw, Format::PlainText);
    esc(&normalized).replace('\n', "<br>\n")
}

#[derive(Template)]
#[template(path = "markup/greeting.html", escape = "none")]
struct GreetingMarkup<'a> {
    text: String,
    heading_color: &'a str,
}

#[derive(Template)]
#[template(path = "markup/paragraph.html", escape = "none")]
struct ParagraphMarkup<'a> {
    text: String,
    text_color: &'a str,
}

struct EntryMarkup {
    key: String,
    value: String,
}

#[derive(Template)]
#[template(path = "markup/dictionary.html", escape = "none")]
struct DictionaryMarkup<'a> {
    entries: Vec<EntryMarkup>,
    text_color: &'a str,
}

#[derive(Template)]
#[template(path = "markup/table.html", escape = "none")]
struct TableMarkup<'a> {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    text_color: &'a str,
    border_color: &'a str,
    muted_color: &'a str,
}

#[derive(Template)]
#[template(path = "markup/action.html", escape = "none")]
struct ActionMarkup<'a> {
    instructions: Option<String>,
    label: String,
    url: String,
    text_color: &'a str,
    button_color: String,
    button_text_color: String,
}

#[derive(Template)]
#[template(path = "markup/signature.html", escape = "none")]
struct SignatureMarkup<'a> {
    closing: String,
    product: String,
    icon: Option<&'a str>,
    text_color: &'a str,
}

struct TroubleLine {
    text: String,
    url: String,
}

#[derive(Template)]
#[template(path = "markup/layout.html", escape = "none")]
struct LayoutMarkup<'a> {
    direction: &'static str,
    product_name: String,
    product_link: String,
    logo: Option<String>,
    logo_width: u32,
    icon: Option<&'a str>,
    body: String,
    troubles: Vec<TroubleLine>,
    copyright: Option<String>,
    background_color: &'a str,
    body_color: &'a str,
    heading_color: &'a str,
    muted_color: &'a str,
    font_family: &'a str,
}

/// Theme values escaped once for attribute use
struct Palette {
    icon: Option<String>,
    background_color: String,
    body_color: String,
    text_color: String,
    heading_color: String,
    muted_color: String,
    border_color: String,
    button_color: String,
    button_text_color: String,
    font_family: String,
}

impl Palette {
    fn new(theme: &ResolvedTheme) -> Self {
        let token = |key: &str| esc(theme.token(key));
        Self {
            icon: theme.icon.as_deref().map(esc),
            background_color: token(tokens::BACKGROUND_COLOR),
            body_color: token(tokens::BODY_COLOR),
            text_color: token(tokens::TEXT_COLOR),
            heading_color: token(tokens::HEADING_COLOR),
            muted_color: token(tokens::MUTED_COLOR),
            border_color: token(tokens::BORDER_COLOR),
            button_color: token(tokens::BUTTON_COLOR),
            button_text_color: token(tokens::BUTTON_TEXT_COLOR),
            font_family: token(tokens::FONT_FAMILY),
        }
    }
}

/// Writes sections as HTML elements inside a themed wrapper
pub struct MarkupWriter<'a> {
    palette: Palette,
    logo_width: u32,
    product: &'a Product,
    direction: TextDirection,
    body: Vec<String>,
    troubles: Vec<TroubleLine>,
}

impl<'a> MarkupWriter<'a> {
    pub fn new(theme: &ResolvedTheme, product: &'a Product, direction: TextDirection) -> Self {
        Self {
            palette: Palette::new(theme),
            logo_width: theme.logo_width,
            product,
            direction,
            body: Vec::new(),
            troubles: Vec::new(),
        }
    }
}

impl SectionWriter for MarkupWriter<'_> {
    fn greeting(&mut self, text: &str) -> Result<()> {
        push(
            &mut self.body,
            GreetingMarkup {
                text: esc(text),
                heading_color: &self.palette.heading_color,
            },
        )
    }

    fn paragraph(&mut self, text: &str) -> Result<()> {
        push(
            &mut self.body,
            ParagraphMarkup {
                text: esc_lines(text),
                text_color: &self.palette.text_color,
            },
        )
    }

    fn dictionary(&mut self, entries: &[Entry]) -> Result<()> {
        let entries = entries
            .iter()
            .map(|entry| EntryMarkup {
                key: esc(&entry.key),
                value: esc(&entry.value),
            })
            .collect();
        push(
            &mut self.body,
            DictionaryMarkup {
                entries,
                text_color: &self.palette.text_color,
            },
        )
    }

    fn table(&mut self, table: &Table) -> Result<()> {
        let width = table.width();
        let pad = |row: &[String]| -> Vec<String> {
            (0..width)
                .map(|i| row.get(i).map(|cell| esc(cell)).unwrap_or_default())
                .collect()
        };

        let columns = if table.columns.is_empty() {
            Vec::new()
        } else {
            pad(&table.columns)
        };
        let rows = table.rows.iter().map(|row| pad(row)).collect();

        push(
            &mut self.body,
            TableMarkup {
                columns,
                rows,
                text_color: &self.palette.text_color,
                border_color: &self.palette.border_color,
                muted_color: &self.palette.muted_color,
            },
        )
    }

    fn action(&mut self, action: &Action) -> Result<()> {
        let button_color = match action.color.as_deref() {
            Some(color) => esc(color),
            None => self.palette.button_color.clone(),
        };
        let button_text_color = match action.text_color.as_deref() {
            Some(color) => esc(color),
            None => self.palette.button_text_color.clone(),
        };

        let label = esc(&action.label);
        let url = esc(&action.url);

        self.troubles.push(TroubleLine {
            text: esc(&self.product.trouble_text.replace("{ACTION}", &action.label)),
            url: url.clone(),
        });

        push(
            &mut self.body,
            ActionMarkup {
                instructions: action.instructions.as_deref().map(esc_lines),
                label,
                url,
                text_color: &self.palette.text_color,
                button_color,
                button_text_color,
            },
        )
    }

    fn signature(&mut self, closing: &str, product: &str) -> Result<()> {
        push(
            &mut self.body,
            SignatureMarkup {
                closing: esc(closing),
                product: esc(product),
                icon: self.palette.icon.as_deref(),
                text_color: &self.palette.text_color,
            },
        )
    }

    fn finish(self) -> Result<String> {
        let layout = LayoutMarkup {
            direction: self.direction.as_str(),
            product_name: esc(&self.product.name),
            product_link: esc(&self.product.link),
            logo: self.product.logo.as_deref().map(esc),
            logo_width: self.logo_width,
            icon: self.palette.icon.as_deref(),
            body: self.body.join("\n"),
            troubles: self.troubles,
            copyright: self.product.copyright.as_deref().map(esc),
            background_color: &self.palette.background_color,
            body_color: &self.palette.body_color,
            heading_color: &self.palette.heading_color,
            muted_color: &self.palette.muted_color,
            font_family: &self.palette.font_family,
        };

        Ok(layout.render()?)
    }
}
