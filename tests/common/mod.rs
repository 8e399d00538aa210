#![allow(dead_code)]

use std::path::{Path, PathBuf};

use careerdoc_pdf::{
    Body, Document, DrawOp, FontSpec, PageGeometry, RenderedPage, Section, StyleConfig, layout,
};

/// Every character is one unit wide, whatever the face or size.
pub fn mono(text: &str, _font: FontSpec) -> f32 {
    text.chars().count() as f32
}

/// 100×100 page, 10 margin, 5 line height: 16 lines per page.
pub fn small_page() -> PageGeometry {
    PageGeometry::uniform(100.0, 100.0, 10.0, 5.0)
}

/// No gaps, no rule, every size equal to the body so every line is 5 units tall.
pub fn plain_style() -> StyleConfig {
    StyleConfig {
        body_size: 5.0,
        heading_size: 5.0,
        name_size: 5.0,
        rule_color: None,
        rule_offset: 0.0,
        title_gap: 0.0,
        section_gap: 0.0,
        entry_gap: 0.0,
        bullet_indent: 2.0,
        aside_gap: 1.0,
        uppercase_titles: false,
        center_header: false,
        ..StyleConfig::default()
    }
}

pub fn doc(sections: Vec<Section>) -> Document {
    Document {
        title: "test".to_string(),
        header: None,
        sections,
    }
}

pub fn numbered_lines(prefix: &str, count: usize) -> String {
    (1..=count)
        .map(|i| format!("{prefix} {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn text_section(title: Option<&str>, text: &str) -> Section {
    Section::new(title, Body::Text(text.to_string()))
}

pub fn render(doc: &Document, geometry: &PageGeometry, style: &StyleConfig) -> Vec<RenderedPage> {
    layout::render(doc, geometry, style, &mono)
}

pub fn page_texts(page: &RenderedPage) -> Vec<&str> {
    page.texts().collect()
}

pub fn all_texts(pages: &[RenderedPage]) -> Vec<&str> {
    pages.iter().flat_map(|p| p.texts()).collect()
}

pub fn text_ops(page: &RenderedPage) -> Vec<&careerdoc_pdf::TextRun> {
    page.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            DrawOp::Rule(_) => None,
        })
        .collect()
}

/// Bundled DejaVu Sans. `None` (and a note on stderr) when the fixture is absent.
pub fn fixture_font() -> Option<PathBuf> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSans.ttf");
    if path.exists() {
        Some(path)
    } else {
        eprintln!("Skipping: {} not found", path.display());
        None
    }
}
