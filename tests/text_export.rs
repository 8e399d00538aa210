mod common;

use careerdoc_pdf::{Body, Entry, Header, ListStyle, Section, StyleConfig, Template, render_text};
use common::*;

fn resume() -> careerdoc_pdf::Document {
    let mut doc = doc(vec![
        text_section(Some("Summary"), "Analyst.\nEngine enthusiast."),
        text_section(Some("Hobbies"), "   "),
        Section::new(
            Some("Experience"),
            Body::Entries(vec![
                Entry {
                    heading: "Engineer".to_string(),
                    heading_aside: "2020".to_string(),
                    subheading: "Acme".to_string(),
                    subheading_aside: "Remote".to_string(),
                    bullets: vec!["Built engines".to_string(), " ".to_string()],
                },
                Entry {
                    heading: "Intern".to_string(),
                    ..Entry::default()
                },
            ]),
        ),
        Section::new(
            Some("Skills"),
            Body::List(vec!["Rust".to_string(), "".to_string(), "SQL".to_string()]),
        )
        .in_sidebar(),
    ]);
    doc.header = Some(Header {
        name: "Ada Lovelace".to_string(),
        details: vec!["ada@example.com".to_string(), "London".to_string()],
    });
    doc
}

#[test]
fn classic_text_export() {
    let text = render_text(&resume(), &Template::Classic.style());
    let expected = "\
Ada Lovelace
ada@example.com | London

SUMMARY
-------
Analyst.
Engine enthusiast.

EXPERIENCE
----------
Engineer | 2020
Acme | Remote
  \u{2022} Built engines

Intern

SKILLS
------
Rust, SQL
";
    assert_eq!(text, expected);
}

#[test]
fn bulleted_list_and_plain_titles() {
    let style = StyleConfig {
        list_style: ListStyle::Bulleted,
        uppercase_titles: false,
        bullet_glyph: '*',
        ..StyleConfig::default()
    };
    let doc = doc(vec![Section::new(
        Some("Skills"),
        Body::List(vec!["Rust".to_string(), "SQL".to_string()]),
    )]);
    assert_eq!(render_text(&doc, &style), "Skills\n------\n* Rust\n* SQL\n");
}

#[test]
fn untitled_sections_are_separated_by_blank_lines() {
    let doc = doc(vec![
        text_section(None, "October 18, 2026"),
        text_section(None, "Dear team,"),
    ]);
    assert_eq!(
        render_text(&doc, &Template::Minimal.style()),
        "October 18, 2026\n\nDear team,\n"
    );
}

#[test]
fn empty_document_is_empty_text() {
    assert_eq!(render_text(&doc(Vec::new()), &StyleConfig::default()), "");
}
