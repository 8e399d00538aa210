use std::collections::HashSet;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{FontBook, RegisteredFont, register_font};
use crate::model::{DrawOp, FontFace, PageGeometry, RenderedPage, Rule, TextRun};
use crate::style::StyleConfig;

fn set_fill(content: &mut Content, [r, g, b]: [u8; 3]) {
    content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

fn draw_text(
    content: &mut Content,
    run: &TextRun,
    font: &RegisteredFont,
    ascender_ratio: f32,
    page_height: f32,
) {
    let baseline_y = page_height - run.y - run.font.size * ascender_ratio;
    content.begin_text();
    content.set_font(Name(font.pdf_name.as_bytes()), run.font.size);
    content.next_line(run.x, baseline_y);
    content.show(Str(&font.encode(&run.text)));
    content.end_text();
}

fn draw_rule(content: &mut Content, rule: &Rule, page_height: f32) {
    let [r, g, b] = rule.color;
    let y = page_height - rule.y;
    content.save_state();
    content.set_stroke_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    content.set_line_width(rule.thickness);
    content.move_to(rule.x1, y);
    content.line_to(rule.x2, y);
    content.stroke();
    content.restore_state();
}

/// Serialize laid-out pages into a PDF.
pub(crate) fn write(
    pages: &[RenderedPage],
    geometry: &PageGeometry,
    style: &StyleConfig,
    fonts: &FontBook,
    title: &str,
) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let blank;
    let pages = if pages.is_empty() {
        log::info!("no content to lay out, writing a single blank page");
        blank = [RenderedPage {
            number: 1,
            ops: Vec::new(),
        }];
        &blank[..]
    } else {
        pages
    };

    // Phase 1: register each face that is actually drawn, with the characters it needs
    let mut used: [Option<HashSet<char>>; 4] = Default::default();
    for op in pages.iter().flat_map(|p| &p.ops) {
        if let DrawOp::Text(run) = op {
            used[run.font.face.index()]
                .get_or_insert_with(HashSet::new)
                .extend(run.text.chars());
        }
    }
    let mut registered: [Option<RegisteredFont>; 4] = Default::default();
    for face in FontFace::ALL {
        if let Some(chars) = &used[face.index()] {
            let pdf_name = format!("F{}", face.index() + 1);
            registered[face.index()] = Some(register_font(
                &mut pdf,
                fonts.entry(face),
                pdf_name,
                chars,
                &mut alloc,
            ));
        }
    }
    let t_fonts = t0.elapsed();

    // Phase 2: one content stream per page
    let band_width = if style.has_sidebar() {
        geometry.margins.left + style.sidebar_width + style.sidebar_gutter / 2.0
    } else {
        0.0
    };
    let mut all_contents: Vec<Content> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut content = Content::new();
        if let Some(color) = style.sidebar_color
            && band_width > 0.0
        {
            content.save_state();
            set_fill(&mut content, color);
            content.rect(0.0, 0.0, band_width, geometry.height);
            content.fill_nonzero();
            content.restore_state();
        }

        let mut current_color: Option<[u8; 3]> = None;
        for op in &page.ops {
            match op {
                DrawOp::Text(run) => {
                    let face = run.font.face;
                    let Some(font) = registered[face.index()].as_ref() else {
                        return Err(Error::Pdf(format!("face {face:?} drawn but not registered")));
                    };
                    if current_color != Some(run.color) {
                        set_fill(&mut content, run.color);
                        current_color = Some(run.color);
                    }
                    let ascender = fonts.entry(face).ascender_ratio;
                    draw_text(&mut content, run, font, ascender, geometry.height);
                }
                DrawOp::Rule(rule) => draw_rule(&mut content, rule, geometry.height),
            }
        }
        all_contents.push(content);
    }
    let t_pages = t0.elapsed();

    // Phase 3: page tree
    let n = all_contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, c) in all_contents.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr("careerdoc-pdf"));

    let font_pairs: Vec<(String, Ref)> = registered
        .iter()
        .flatten()
        .map(|f| (f.pdf_name.clone(), f.font_ref))
        .collect();

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geometry.width, geometry.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for (name, font_ref) in &font_pairs {
            font_dict.pair(Name(name.as_bytes()), *font_ref);
        }
    }

    log::info!(
        "PDF phases: fonts={:.1}ms, pages={:.1}ms, assembly={:.1}ms ({} pages)",
        t_fonts.as_secs_f64() * 1000.0,
        (t_pages - t_fonts).as_secs_f64() * 1000.0,
        (t0.elapsed() - t_pages).as_secs_f64() * 1000.0,
        n,
    );

    Ok(pdf.finish())
}
