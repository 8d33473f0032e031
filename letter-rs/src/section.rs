//! Section composer
//!
//! Turns a [`Body`] into the ordered list of sections that are actually
//! visible. Visibility flags and defaults are decided here once, so both
//! output formats render the exact same sequence.

use crate::content::{Action, Body, Entry, Product, Table, DEFAULT_GREETING, DEFAULT_SIGNATURE};

/// One unit of rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Opening line, e.g. "Hi, Jon,"
    Greeting(String),
    /// Intro or outro paragraph
    Paragraph(String),
    /// Key/value pairs
    Dictionary(Vec<Entry>),
    Table(Table),
    Action(Action),
    /// Sign-off word and product name
    Signature { closing: String, product: String },
}

impl Section {
    /// Stable name of the section kind
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Greeting(_) => "greeting",
            Section::Paragraph(_) => "paragraph",
            Section::Dictionary(_) => "dictionary",
            Section::Table(_) => "table",
            Section::Action(_) => "action",
            Section::Signature { .. } => "signature",
        }
    }
}

/// Build the visible sections of `body`, in display order
///
/// Total over every body: an empty body with both hide flags set composes to
/// an empty list.
pub fn compose(body: &Body, product: &Product) -> Vec<Section> {
    let mut sections = Vec::with_capacity(body.intros.len() + body.outros.len() + 5);

    if !body.hide_greeting {
        sections.push(Section::Greeting(greeting_line(body)));
    }

    sections.extend(paragraphs(&body.intros));

    if !body.dictionary.is_empty() {
        sections.push(Section::Dictionary(body.dictionary.clone()));
    }

    if let Some(table) = body.table.as_ref().filter(|t| !t.is_empty()) {
        sections.push(Section::Table(table.clone()));
    }

    if let Some(action) = body.action.as_ref().filter(|a| is_complete(a)) {
        sections.push(Section::Action(Action {
            label: action.label.trim().to_string(),
            url: action.url.trim().to_string(),
            ..action.clone()
        }));
    }

    sections.extend(paragraphs(&body.outros));

    if !body.hide_signature {
        let closing = non_empty(body.signature.as_deref()).unwrap_or(DEFAULT_SIGNATURE);
        sections.push(Section::Signature {
            closing: closing.to_string(),
            product: product.name.clone(),
        });
    }

    sections
}

/// Intro or outro lines that carry text; blank ones produce no section
fn paragraphs(lines: &[String]) -> impl Iterator<Item = Section> + '_ {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .map(Section::Paragraph)
}

fn greeting_line(body: &Body) -> String {
    if let Some(title) = non_empty(body.title.as_deref()) {
        return title.to_string();
    }

    let greeting = non_empty(body.greeting.as_deref()).unwrap_or(DEFAULT_GREETING);

    match non_empty(body.name.as_deref()) {
        Some(name) => format!("{}, {},", greeting, name),
        None => format!("{},", greeting),
    }
}

fn is_complete(action: &Action) -> bool {
    !action.label.trim().is_empty() && !action.url.trim().is_empty()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::new("Acme", "https://acme.test/")
    }

    fn kinds(sections: &[Section]) -> Vec<&'static str> {
        sections.iter().map(Section::kind).collect()
    }

    #[test]
    fn test_full_body_order() {
        let body = Body {
            name: Some("Jon".to_string()),
            intros: vec!["A".to_string(), "B".to_string()],
            dictionary: vec![Entry::new("Plan", "Pro")],
            table: Some(Table {
                columns: vec!["Item".to_string()],
                rows: vec![vec!["Widget".to_string()]],
            }),
            action: Some(Action::new("Confirm", "https://example.test/x")),
            outros: vec!["C".to_string()],
            ..Default::default()
        };

        let sections = compose(&body, &product());
        assert_eq!(
            kinds(&sections),
            vec![
                "greeting",
                "paragraph",
                "paragraph",
                "dictionary",
                "table",
                "action",
                "paragraph",
                "signature"
            ]
        );
        assert_eq!(sections[0], Section::Greeting("Hi, Jon,".to_string()));
        assert_eq!(
            sections[7],
            Section::Signature {
                closing: "Yours truly".to_string(),
                product: "Acme".to_string()
            }
        );
    }

    #[test]
    fn test_generic_greeting_without_name() {
        let sections = compose(&Body::default(), &product());
        assert_eq!(sections[0], Section::Greeting("Hi,".to_string()));

        let body = Body {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let sections = compose(&body, &product());
        assert_eq!(sections[0], Section::Greeting("Hi,".to_string()));
    }

    #[test]
    fn test_custom_greeting_and_title() {
        let body = Body {
            name: Some("Jon".to_string()),
            greeting: Some("Dear".to_string()),
            signature: Some("Cheers".to_string()),
            ..Default::default()
        };
        let sections = compose(&body, &product());
        assert_eq!(sections[0], Section::Greeting("Dear, Jon,".to_string()));
        assert!(matches!(
            &sections[1],
            Section::Signature { closing, .. } if closing == "Cheers"
        ));

        let body = Body {
            name: Some("Jon".to_string()),
            title: Some("Welcome aboard!".to_string()),
            ..Default::default()
        };
        let sections = compose(&body, &product());
        assert_eq!(sections[0], Section::Greeting("Welcome aboard!".to_string()));
    }

    #[test]
    fn test_hidden_greeting_and_signature() {
        let body = Body {
            name: Some("Test User".to_string()),
            intros: vec!["Only line".to_string()],
            hide_greeting: true,
            hide_signature: true,
            ..Default::default()
        };
        let sections = compose(&body, &product());
        assert_eq!(sections, vec![Section::Paragraph("Only line".to_string())]);
    }

    #[test]
    fn test_empty_body_composes_to_nothing() {
        let body = Body {
            hide_greeting: true,
            hide_signature: true,
            ..Default::default()
        };
        assert!(compose(&body, &product()).is_empty());
    }

    #[test]
    fn test_table_visibility() {
        let headers_only = Body {
            table: Some(Table {
                columns: vec!["Item".to_string(), "Price".to_string()],
                rows: vec![],
            }),
            hide_greeting: true,
            hide_signature: true,
            ..Default::default()
        };
        assert_eq!(kinds(&compose(&headers_only, &product())), vec!["table"]);

        let empty = Body {
            table: Some(Table::default()),
            hide_greeting: true,
            hide_signature: true,
            ..Default::default()
        };
        assert!(compose(&empty, &product()).is_empty());
    }

    #[test]
    fn test_blank_action_skipped() {
        let body = Body {
            action: Some(Action::default()),
            hide_greeting: true,
            hide_signature: true,
            ..Default::default()
        };
        assert!(compose(&body, &product()).is_empty());
    }

    #[test]
    fn test_blank_paragraphs_skipped() {
        let body = Body {
            intros: vec!["A".to_string(), String::new(), "   ".to_string()],
            outros: vec!["\n".to_string(), "B".to_string()],
            hide_greeting: true,
            hide_signature: true,
            ..Default::default()
        };
        assert_eq!(
            compose(&body, &product()),
            vec![
                Section::Paragraph("A".to_string()),
                Section::Paragraph("B".to_string())
            ]
        );
    }

    #[test]
    fn test_action_label_and_url_trimmed() {
        let body = Body {
            action: Some(
                Action::new(" Confirm ", " https://example.test/x ").with_instructions("Click:"),
            ),
            hide_greeting: true,
            hide_signature: true,
            ..Default::default()
        };
        let sections = compose(&body, &product());
        assert_eq!(
            sections,
            vec![Section::Action(
                Action::new("Confirm", "https://example.test/x").with_instructions("Click:")
            )]
        );
    }
}
