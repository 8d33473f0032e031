//! Plain-text writer

use askama::Template;

use super::SectionWriter;
use crate::content::{Action, Entry, Product, Table};
use crate::error::Result;
use crate::escape::{escape, Format};

const SEPARATOR: &str = "\n\n";

/// Stand-in for a table row whose cells are all empty
const EMPTY_ROW: &str = "-";

/// Normalize caller text and drop its blank lines, which would otherwise
/// read as a block separator
fn esc(raw: &str) -> String {
    escape(raw, Format::PlainText)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Template)]
#[template(source = "{{ text }}", ext = "txt", escape = "none")]
struct GreetingText {
    text: String,
}

#[derive(Template)]
#[template(source = "{{ text }}", ext = "txt", escape = "none")]
struct ParagraphText {
    text: String,
}

struct EntryText {
    key: String,
    value: String,
}

#[derive(Template)]
#[template(
    source = "{% for entry in entries %}{% if !loop.first %}\n{% endif %}{{ entry.key }}: {{ entry.value }}{% endfor %}",
    ext = "txt",
    escape = "none"
)]
struct DictionaryText {
    entries: Vec<EntryText>,
}

#[derive(Template)]
#[template(
    source = "{% for line in lines %}{% if !loop.first %}\n{% endif %}{{ line }}{% endfor %}",
    ext = "txt",
    escape = "none"
)]
struct TableText {
    lines: Vec<String>,
}

#[derive(Template)]
#[template(
    source = "{% match instructions %}{% when Some with (instructions) %}{{ instructions }}\n{% when None %}{% endmatch %}{{ label }}: {{ url }}",
    ext = "txt",
    escape = "none"
)]
struct ActionText {
    instructions: Option<String>,
    label: String,
    url: String,
}

#[derive(Template)]
#[template(source = "{{ closing }},\n{{ product }}", ext = "txt", escape = "none")]
struct SignatureText {
    closing: String,
    product: String,
}

/// Writes sections as blank-line separated plain-text blocks
pub struct PlainTextWriter {
    blocks: Vec<String>,
    copyright: Option<String>,
}

impl PlainTextWriter {
    pub fn new(product: &Product) -> Self {
        Self {
            blocks: Vec::new(),
            copyright: product.copyright.as_deref().map(esc),
        }
    }

    fn push<T: Template>(&mut self, template: T) -> Result<()> {
        self.blocks.push(template.render()?);
        Ok(())
    }
}

/// Lay out a table as aligned, pipe-separated columns
fn table_lines(table: &Table) -> Vec<String> {
    let width = table.width();
    let pad_row = |row: &[String]| -> Vec<String> {
        (0..width)
            .map(|i| row.get(i).map(|cell| esc(cell)).unwrap_or_default())
            .collect()
    };

    let header = (!table.columns.is_empty()).then(|| pad_row(&table.columns));
    let rows: Vec<Vec<String>> = table.rows.iter().map(|row| pad_row(row)).collect();

    let mut widths = vec![0usize; width];
    for row in header.iter().chain(rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_row = |row: &[String]| -> String {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        let line = cells.join(" | ").trim_end().to_string();
        if line.is_empty() {
            EMPTY_ROW.to_string()
        } else {
            line
        }
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    if let Some(header) = &header {
        lines.push(format_row(header));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat((*w).max(1))).collect();
        lines.push(rule.join("-+-"));
    }
    lines.extend(rows.iter().map(|row| format_row(row)));
    lines
}

impl SectionWriter for PlainTextWriter {
    fn greeting(&mut self, text: &str) -> Result<()> {
        self.push(GreetingText { text: esc(text) })
    }

    fn paragraph(&mut self, text: &str) -> Result<()> {
        self.push(ParagraphText { text: esc(text) })
    }

    fn dictionary(&mut self, entries: &[Entry]) -> Result<()> {
        let entries = entries
            .iter()
            .map(|entry| EntryText {
                key: esc(&entry.key),
                value: esc(&entry.value),
            })
            .collect();
        self.push(DictionaryText { entries })
    }

    fn table(&mut self, table: &Table) -> Result<()> {
        self.push(TableText {
            lines: table_lines(table),
        })
    }

    fn action(&mut self, action: &Action) -> Result<()> {
        self.push(ActionText {
            instructions: action.instructions.as_deref().map(esc),
            label: esc(&action.label),
            url: esc(&action.url),
        })
    }

    fn signature(&mut self, closing: &str, product: &str) -> Result<()> {
        self.push(SignatureText {
            closing: esc(closing),
            product: esc(product),
        })
    }

    fn finish(mut self) -> Result<String> {
        if let Some(copyright) = self.copyright.take() {
            self.blocks.push(format!("---\n{}", copyright));
        }

        let mut text = self.blocks.join(SEPARATOR).trim_end().to_string();
        if !text.is_empty() {
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lines_aligned() {
        let table = Table {
            columns: vec!["Item".to_string(), "Price".to_string()],
            rows: vec![
                vec!["Golang".to_string(), "$10.99".to_string()],
                vec!["Rust".to_string(), "$1".to_string()],
            ],
        };

        assert_eq!(
            table_lines(&table),
            vec![
                "Item   | Price",
                "-------+-------",
                "Golang | $10.99",
                "Rust   | $1",
            ]
        );
    }

    #[test]
    fn test_table_lines_headers_only() {
        let table = Table {
            columns: vec!["Item".to_string()],
            rows: vec![],
        };
        assert_eq!(table_lines(&table), vec!["Item", "----"]);
    }

    #[test]
    fn test_action_with_instructions() {
        let product = Product::new("Acme", "https://acme.test/");
        let mut writer = PlainTextWriter::new(&product);
        writer
            .action(
                &Action::new("Confirm", "https://example.test/x")
                    .with_instructions("Click below:"),
            )
            .unwrap();

        assert_eq!(
            writer.finish().unwrap(),
            "Click below:\nConfirm: https://example.test/x\n"
        );
    }

    #[test]
    fn test_copyright_footer() {
        let product = Product::new("Acme", "https://acme.test/").with_copyright("© 2026 Acme");
        let mut writer = PlainTextWriter::new(&product);
        writer.paragraph("Hello  ").unwrap();

        assert_eq!(writer.finish().unwrap(), "Hello\n\n---\n© 2026 Acme\n");
    }

    #[test]
    fn test_paragraph_blank_lines_collapsed() {
        let product = Product::new("Acme", "https://acme.test/");
        let mut writer = PlainTextWriter::new(&product);
        writer.paragraph("line1\n\n  \nline2").unwrap();
        writer.paragraph("\nA").unwrap();

        assert_eq!(writer.finish().unwrap(), "line1\nline2\n\nA\n");
    }

    #[test]
    fn test_table_lines_empty_row() {
        let table = Table {
            columns: vec!["Item".to_string()],
            rows: vec![vec![String::new()], vec!["Rust".to_string()]],
        };
        assert_eq!(table_lines(&table), vec!["Item", "----", "-", "Rust"]);
    }
}
