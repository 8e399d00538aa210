//! Document → fixed-size pages of positioned text.
//!
//! One linear pass per column: every wrapped line is space-checked against the page
//! bottom before it is placed, and nothing is re-laid out once committed.

mod cursor;
mod section;
mod wrap;

use crate::fonts::TextMeasure;
use crate::model::{Document, DrawOp, PageGeometry, Placement, RenderedPage};
use crate::style::StyleConfig;

use cursor::PageCursor;
use section::{Column, SectionRenderer};

pub use wrap::{Lines, Wrap, wrap_text};

/// Main and sidebar columns. The sidebar has zero width for single-column styles.
fn columns(geometry: &PageGeometry, style: &StyleConfig) -> (Column, Column) {
    let left = geometry.margins.left;
    let usable = geometry.usable_width();
    if !style.has_sidebar() {
        return (
            Column { x: left, width: usable },
            Column { x: left, width: 0.0 },
        );
    }
    let side = style.sidebar_width.min(usable);
    let offset = side + style.sidebar_gutter;
    (
        Column {
            x: left + offset,
            width: (usable - offset).max(0.0),
        },
        Column { x: left, width: side },
    )
}

/// Lay out `doc` into pages. Pure: identical inputs give identical pages.
pub fn render(
    doc: &Document,
    geometry: &PageGeometry,
    style: &StyleConfig,
    measure: &dyn TextMeasure,
) -> Vec<RenderedPage> {
    let t0 = std::time::Instant::now();
    let (main_col, side_col) = columns(geometry, style);
    let renderer = SectionRenderer::new(style, geometry, measure);
    let mut main = PageCursor::new(geometry);
    let mut side = PageCursor::new(geometry);

    if let Some(header) = &doc.header
        && !(header.name.trim().is_empty() && header.details.iter().all(|d| d.trim().is_empty()))
    {
        renderer.render_header(&mut main, main_col, header);
    }

    for section in &doc.sections {
        if section.body.is_empty() {
            log::debug!("skipping empty section {:?}", section.title);
            continue;
        }
        let (cursor, col) = if style.has_sidebar() && section.placement == Placement::Sidebar {
            (&mut side, side_col)
        } else {
            (&mut main, main_col)
        };
        renderer.render_section(cursor, col, section);
        cursor.advance(style.section_gap);
    }

    let pages = merge_flows(main.finish(), side.finish());
    log::debug!(
        "layout: {} sections → {} pages in {:.1}ms",
        doc.sections.len(),
        pages.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    pages
}

/// Zip the two column flows page by page; main column ops come first on each page.
fn merge_flows(main: Vec<Vec<DrawOp>>, side: Vec<Vec<DrawOp>>) -> Vec<RenderedPage> {
    let count = main.len().max(side.len());
    let mut main = main.into_iter();
    let mut side = side.into_iter();
    (1..=count)
        .map(|number| {
            let mut ops = main.next().unwrap_or_default();
            ops.extend(side.next().unwrap_or_default());
            RenderedPage { number, ops }
        })
        .collect()
}
