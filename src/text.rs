use crate::model::{Body, Document, Entry};
use crate::style::{ListStyle, StyleConfig};

fn push_aside_line(out: &mut String, text: &str, aside: &str) {
    let text = text.trim();
    let aside = aside.trim();
    match (text.is_empty(), aside.is_empty()) {
        (true, true) => return,
        (false, true) => out.push_str(text),
        (true, false) => out.push_str(aside),
        (false, false) => {
            out.push_str(text);
            out.push_str(" | ");
            out.push_str(aside);
        }
    }
    out.push('\n');
}

fn push_entry(out: &mut String, entry: &Entry, glyph: char) {
    push_aside_line(out, &entry.heading, &entry.heading_aside);
    push_aside_line(out, &entry.subheading, &entry.subheading_aside);
    for bullet in entry.bullets.iter().map(|b| b.trim()).filter(|b| !b.is_empty()) {
        out.push_str(&format!("  {glyph} {bullet}\n"));
    }
}

/// Serialize a document as plain text for `.txt` export and clipboard use.
pub(crate) fn render(doc: &Document, style: &StyleConfig) -> String {
    let mut out = String::new();

    if let Some(header) = &doc.header {
        let name = header.name.trim();
        if !name.is_empty() {
            out.push_str(name);
            out.push('\n');
        }
        let details: Vec<&str> = header
            .details
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .collect();
        if !details.is_empty() {
            out.push_str(&details.join(" | "));
            out.push('\n');
        }
    }

    for section in doc.sections.iter().filter(|s| !s.body.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        if let Some(title) = section.title.as_deref().filter(|t| !t.trim().is_empty()) {
            let title = style.title_text(title.trim());
            out.push_str(&title);
            out.push('\n');
            out.push_str(&"-".repeat(title.chars().count()));
            out.push('\n');
        }
        match &section.body {
            Body::Text(text) => {
                out.push_str(text.trim_end());
                out.push('\n');
            }
            Body::Entries(entries) => {
                let entries: Vec<&Entry> = entries.iter().filter(|e| !e.is_blank()).collect();
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    push_entry(&mut out, entry, style.bullet_glyph);
                }
            }
            Body::List(items) => {
                let items = items.iter().map(|i| i.trim()).filter(|i| !i.is_empty());
                match style.list_style {
                    ListStyle::Comma => {
                        out.push_str(&items.collect::<Vec<_>>().join(", "));
                        out.push('\n');
                    }
                    ListStyle::Bulleted => {
                        for item in items {
                            out.push_str(&format!("{} {item}\n", style.bullet_glyph));
                        }
                    }
                }
            }
        }
    }
    out
}
