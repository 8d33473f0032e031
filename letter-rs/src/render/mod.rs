//! Dual-format renderer
//!
//! One pass over the composed sections feeds two writers, one producing the
//! HTML fragment and one the plain-text alternative. Both see every section
//! in the same order, so the outputs cannot disagree on structure.

mod markup;
mod plain;

use tracing::debug;

use crate::content::{Action, Entry, Product, RenderResult, Table, TextDirection};
use crate::error::Result;
use crate::section::Section;
use crate::theme::ResolvedTheme;

pub use markup::MarkupWriter;
pub use plain::PlainTextWriter;

/// Sink for one output format
///
/// Every section kind has exactly one method, so adding a kind forces both
/// formats to handle it.
pub trait SectionWriter {
    fn greeting(&mut self, text: &str) -> Result<()>;
    fn paragraph(&mut self, text: &str) -> Result<()>;
    fn dictionary(&mut self, entries: &[Entry]) -> Result<()>;
    fn table(&mut self, table: &Table) -> Result<()>;
    fn action(&mut self, action: &Action) -> Result<()>;
    fn signature(&mut self, closing: &str, product: &str) -> Result<()>;

    /// Close the document and return it
    fn finish(self) -> Result<String>;
}

fn write_section<W: SectionWriter>(writer: &mut W, section: &Section) -> Result<()> {
    match section {
        Section::Greeting(text) => writer.greeting(text),
        Section::Paragraph(text) => writer.paragraph(text),
        Section::Dictionary(entries) => writer.dictionary(entries),
        Section::Table(table) => writer.table(table),
        Section::Action(action) => writer.action(action),
        Section::Signature { closing, product } => writer.signature(closing, product),
    }
}

/// Render `sections` into markup and plain text
///
/// Pure and deterministic: identical inputs always give identical output.
pub fn render(
    sections: &[Section],
    theme: &ResolvedTheme,
    product: &Product,
    direction: TextDirection,
) -> Result<RenderResult> {
    let mut markup = MarkupWriter::new(theme, product, direction);
    let mut plain = PlainTextWriter::new(product);

    for section in sections {
        write_section(&mut markup, section)?;
        write_section(&mut plain, section)?;
    }

    let result = RenderResult {
        markup: markup.finish()?,
        plain_text: plain.finish()?,
    };

    debug!(
        "Rendered {} sections ({} markup bytes, {} text bytes)",
        sections.len(),
        result.markup.len(),
        result.plain_text.len()
    );

    Ok(result)
}
