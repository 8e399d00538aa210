mod common;

use careerdoc_pdf::layout::wrap_text;
use careerdoc_pdf::{
    Body, Document, DrawOp, Entry, FontFace, FontSpec, Header, ListStyle, PageGeometry, Paper,
    Section, StyleConfig, Template,
};
use common::*;

#[test]
fn text_overflows_onto_second_page() {
    let geometry = small_page();
    let doc = doc(vec![text_section(None, &numbered_lines("line", 20))]);
    let pages = render(&doc, &geometry, &plain_style());

    assert_eq!(pages.len(), 2);
    let first = page_texts(&pages[0]);
    assert_eq!(first.len(), 16);
    assert_eq!(first[0], "line 1");
    assert_eq!(first[15], "line 16");
    assert_eq!(page_texts(&pages[1]), vec!["line 17", "line 18", "line 19", "line 20"]);

    for (k, op) in pages[0].ops.iter().enumerate() {
        assert_eq!(op.y(), 10.0 + 5.0 * k as f32);
        assert!(op.y() + 5.0 <= geometry.content_bottom());
    }
    assert_eq!(pages[1].ops[0].y(), 10.0);
}

#[test]
fn long_bullet_splits_but_heading_stays_with_first_line() {
    let words: Vec<String> = (1..=300).map(|i| format!("w{i:03}")).collect();
    let entry = Entry {
        heading: "Engineer".to_string(),
        heading_aside: "2020".to_string(),
        subheading: "Acme".to_string(),
        subheading_aside: "Remote".to_string(),
        bullets: vec![words.join(" ")],
    };
    let doc = doc(vec![Section::new(None, Body::Entries(vec![entry]))]);
    let pages = render(&doc, &small_page(), &plain_style());

    assert_eq!(pages.len(), 2);
    let first = page_texts(&pages[0]);
    for expected in ["Engineer", "2020", "Acme", "Remote", "\u{2022}"] {
        assert!(first.contains(&expected), "page 1 is missing {expected:?}");
    }

    // 15 four-character words per 78-wide line: 20 lines, 14 of them on page 1.
    let bullet_lines = |page: &careerdoc_pdf::RenderedPage| -> Vec<String> {
        text_ops(page)
            .into_iter()
            .filter(|t| t.x == 12.0)
            .map(|t| t.text.clone())
            .collect()
    };
    let page1 = bullet_lines(&pages[0]);
    let page2 = bullet_lines(&pages[1]);
    assert_eq!(page1.len(), 14);
    assert_eq!(page2.len(), 6);
    assert_eq!(pages[1].ops.len(), 6, "no heading or glyph repeated on page 2");

    let rejoined = page1.iter().chain(&page2).cloned().collect::<Vec<_>>().join(" ");
    assert_eq!(rejoined, words.join(" "));
}

#[test]
fn empty_sections_are_skipped() {
    let doc = doc(vec![
        text_section(Some("One"), "alpha"),
        text_section(Some("Two"), "   \n  "),
        Section::new(Some("Empty list"), Body::List(vec![" ".to_string()])),
        Section::new(Some("No entries"), Body::Entries(vec![Entry::default()])),
        text_section(Some("Three"), "gamma"),
    ]);
    let pages = render(&doc, &small_page(), &plain_style());

    assert_eq!(pages.len(), 1);
    assert_eq!(page_texts(&pages[0]), vec!["One", "alpha", "Three", "gamma"]);
}

#[test]
fn empty_section_at_page_end_does_not_break() {
    let doc = doc(vec![
        text_section(None, &numbered_lines("line", 15)),
        text_section(Some("Nothing here"), ""),
    ]);
    let pages = render(&doc, &small_page(), &plain_style());
    assert_eq!(pages.len(), 1);
}

#[test]
fn comma_list_wraps_as_one_paragraph() {
    let geometry = PageGeometry::uniform(40.0, 100.0, 10.0, 5.0);
    let items: Vec<String> = (1..=5).map(|i| format!("skill{i}")).collect();
    let doc = doc(vec![Section::new(None, Body::List(items))]);
    let pages = render(&doc, &geometry, &plain_style());

    let expected = wrap_text(
        "skill1, skill2, skill3, skill4, skill5",
        20.0,
        FontSpec::new(FontFace::Regular, 5.0),
        &mono,
    );
    assert_eq!(expected, vec!["skill1, skill2,", "skill3, skill4,", "skill5"]);
    assert_eq!(page_texts(&pages[0]), expected);
}

#[test]
fn bulleted_list_draws_one_glyph_per_item() {
    let style = StyleConfig {
        list_style: ListStyle::Bulleted,
        bullet_glyph: '-',
        ..plain_style()
    };
    let doc = doc(vec![Section::new(
        None,
        Body::List(vec!["rust".to_string(), "go".to_string()]),
    )]);
    let pages = render(&doc, &small_page(), &style);
    assert_eq!(page_texts(&pages[0]), vec!["-", "rust", "-", "go"]);
}

#[test]
fn title_may_end_a_page_by_default() {
    let doc = doc(vec![
        text_section(None, &numbered_lines("line", 15)),
        text_section(Some("Two"), "body"),
    ]);
    let pages = render(&doc, &small_page(), &plain_style());

    assert_eq!(pages.len(), 2);
    assert_eq!(page_texts(&pages[0]).last(), Some(&"Two"));
    assert_eq!(page_texts(&pages[1]), vec!["body"]);
}

#[test]
fn keep_title_with_lines_moves_title_to_next_page() {
    let style = StyleConfig {
        keep_title_with_lines: Some(1),
        ..plain_style()
    };
    let doc = doc(vec![
        text_section(None, &numbered_lines("line", 15)),
        text_section(Some("Two"), "body"),
    ]);
    let pages = render(&doc, &small_page(), &style);

    assert_eq!(pages.len(), 2);
    assert_eq!(page_texts(&pages[0]).len(), 15);
    assert_eq!(page_texts(&pages[1]), vec!["Two", "body"]);
    assert_eq!(pages[1].ops[0].y(), 10.0);
}

#[test]
fn entry_heading_group_moves_to_next_page() {
    let entry = Entry {
        heading: "Role".to_string(),
        heading_aside: "2021".to_string(),
        subheading: "Org".to_string(),
        bullets: vec!["did things".to_string()],
        ..Entry::default()
    };
    let doc = doc(vec![
        text_section(None, &numbered_lines("line", 14)),
        Section::new(None, Body::Entries(vec![entry])),
    ]);
    let pages = render(&doc, &small_page(), &plain_style());

    assert_eq!(pages.len(), 2);
    assert_eq!(page_texts(&pages[0]).len(), 14);
    assert_eq!(page_texts(&pages[1])[0], "Role");
    assert_eq!(pages[1].ops[0].y(), 10.0);
}

#[test]
fn aside_is_right_aligned_on_first_line() {
    let entry = Entry {
        heading: "Role".to_string(),
        heading_aside: "2021".to_string(),
        ..Entry::default()
    };
    let doc = doc(vec![Section::new(None, Body::Entries(vec![entry]))]);
    let pages = render(&doc, &small_page(), &plain_style());

    let ops = text_ops(&pages[0]);
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].x, 10.0);
    assert_eq!(ops[1].text, "2021");
    assert_eq!(ops[1].x, 90.0 - 4.0);
    assert_eq!(ops[0].y, ops[1].y);
}

#[test]
fn blank_lines_advance_mid_page() {
    let doc = doc(vec![text_section(None, "a\n\nb")]);
    let pages = render(&doc, &small_page(), &plain_style());
    let ys: Vec<f32> = pages[0].ops.iter().map(DrawOp::y).collect();
    assert_eq!(ys, vec![10.0, 20.0]);
}

#[test]
fn trailing_blank_lines_never_add_a_page() {
    let text = format!("{}\n\n\n", numbered_lines("line", 16));
    let doc = doc(vec![text_section(None, &text)]);
    assert_eq!(render(&doc, &small_page(), &plain_style()).len(), 1);

    let text = format!("{}\n\nafter", numbered_lines("line", 16));
    let doc = common::doc(vec![text_section(None, &text)]);
    let pages = render(&doc, &small_page(), &plain_style());
    assert_eq!(pages.len(), 2);
    assert_eq!(page_texts(&pages[1]), vec!["after"]);
    assert_eq!(pages[1].ops[0].y(), 10.0);
}

#[test]
fn header_is_centered_and_empty_header_skipped() {
    let style = StyleConfig {
        center_header: true,
        ..plain_style()
    };
    let mut doc = doc(Vec::new());
    doc.header = Some(Header {
        name: "Ada".to_string(),
        details: vec!["a@b.c".to_string(), " ".to_string(), "555".to_string()],
    });
    let pages = render(&doc, &small_page(), &style);
    let ops = text_ops(&pages[0]);
    assert_eq!(ops[0].text, "Ada");
    assert_eq!(ops[0].x, 10.0 + (80.0 - 3.0) / 2.0);
    assert_eq!(ops[0].font.face, FontFace::Bold);
    assert_eq!(ops[1].text, "a@b.c | 555");
    assert_eq!(ops[1].x, 10.0 + (80.0 - 11.0) / 2.0);

    doc.header = Some(Header {
        name: "  ".to_string(),
        details: Vec::new(),
    });
    assert!(render(&doc, &small_page(), &style).is_empty());
}

#[test]
fn sidebar_sections_flow_in_their_own_column() {
    let style = StyleConfig {
        sidebar_width: 30.0,
        sidebar_gutter: 5.0,
        list_style: ListStyle::Bulleted,
        ..plain_style()
    };
    let doc = doc(vec![
        text_section(None, "main text"),
        Section::new(None, Body::List(vec!["rust".to_string(), "go".to_string()])).in_sidebar(),
    ]);
    let pages = render(&doc, &small_page(), &style);

    assert_eq!(pages.len(), 1);
    assert_eq!(page_texts(&pages[0]), vec!["main text", "\u{2022}", "rust", "\u{2022}", "go"]);
    let ops = text_ops(&pages[0]);
    assert_eq!(ops[0].x, 45.0);
    assert_eq!(ops[0].y, 10.0);
    assert_eq!(ops[1].x, 10.0);
    assert_eq!(ops[1].y, 10.0);
    assert_eq!(ops[2].x, 12.0);
}

#[test]
fn longer_sidebar_extends_the_page_count() {
    let style = StyleConfig {
        sidebar_width: 30.0,
        sidebar_gutter: 5.0,
        ..plain_style()
    };
    let doc = doc(vec![
        text_section(None, "main"),
        text_section(None, &numbered_lines("side", 40)).in_sidebar(),
    ]);
    let pages = render(&doc, &small_page(), &style);

    assert_eq!(pages.len(), 3);
    assert_eq!(page_texts(&pages[0])[0], "main");
    assert_eq!(page_texts(&pages[0]).len(), 17);
    assert!(text_ops(&pages[1]).iter().all(|t| t.x == 10.0));
    assert_eq!(page_texts(&pages[2]).len(), 8);
}

#[test]
fn sidebar_placement_ignored_without_sidebar() {
    let doc = doc(vec![text_section(Some("Skills"), "rust").in_sidebar()]);
    let pages = render(&doc, &small_page(), &plain_style());
    assert!(text_ops(&pages[0]).iter().all(|t| t.x == 10.0));
}

fn busy_document() -> Document {
    let entries: Vec<Entry> = (1..=12)
        .map(|i| Entry {
            heading: format!("Position {i}"),
            heading_aside: format!("20{i:02} - 20{:02}", i + 1),
            subheading: format!("Company {i}"),
            subheading_aside: "Somewhere".to_string(),
            bullets: (1..=4)
                .map(|b| format!("Accomplishment {b} of role {i}, described at some length so that it wraps"))
                .collect(),
        })
        .collect();
    let mut doc = doc(vec![
        text_section(Some("Summary"), &"Seasoned engineer. ".repeat(40)),
        Section::new(Some("Experience"), Body::Entries(entries)),
        Section::new(
            Some("Skills"),
            Body::List((1..=30).map(|i| format!("skill{i}")).collect()),
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
fn rendering_is_deterministic() {
    let _ = env_logger::try_init();
    let geometry = PageGeometry::uniform(300.0, 400.0, 20.0, 12.0);
    let doc = busy_document();
    for template in [Template::Classic, Template::Modern, Template::Minimal] {
        let style = template.style();
        assert_eq!(render(&doc, &geometry, &style), render(&doc, &geometry, &style));
    }
}

#[test]
fn pages_are_numbered_nonempty_and_unclipped() {
    let geometry = PageGeometry::uniform(300.0, 400.0, 20.0, 12.0);
    let doc = busy_document();
    for template in [Template::Classic, Template::Minimal] {
        let style = template.style();
        let pages = render(&doc, &geometry, &style);
        assert!(pages.len() > 1);

        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.number, i + 1);
            assert!(!page.ops.is_empty());
            let ys: Vec<f32> = page.ops.iter().map(DrawOp::y).collect();
            assert!(ys.windows(2).all(|w| w[0] <= w[1]), "y goes backwards on page {}", page.number);
            for t in text_ops(page) {
                let h = style.line_height_for(t.font.size, &geometry);
                assert!(t.y + h <= geometry.content_bottom() + 0.01);
            }
        }
    }
}

#[test]
fn letter_paper_fits_a_short_document_on_one_page() {
    let geometry = Paper::Letter.geometry();
    let doc = doc(vec![text_section(Some("Summary"), "Short.")]);
    let pages = render(&doc, &geometry, &Template::Classic.style());
    assert_eq!(pages.len(), 1);
    assert_eq!(page_texts(&pages[0]), vec!["SUMMARY", "Short."]);
}

#[test]
fn wide_aside_moves_below_the_heading() {
    let aside = "x".repeat(65);
    let entry = Entry {
        heading: "Role title".to_string(),
        heading_aside: aside.clone(),
        ..Entry::default()
    };
    let doc = doc(vec![Section::new(None, Body::Entries(vec![entry]))]);
    let pages = render(&doc, &small_page(), &plain_style());

    let ops = text_ops(&pages[0]);
    assert_eq!(ops.len(), 2);
    assert_eq!((ops[0].text.as_str(), ops[0].x, ops[0].y), ("Role title", 10.0, 10.0));
    assert_eq!(ops[1].text, aside);
    assert_eq!(ops[1].y, 15.0);
    assert_eq!(ops[1].x, 90.0 - 65.0);
}
