pub mod content;
mod error;
mod fonts;
pub mod layout;
mod model;
mod pdf;
mod style;
mod text;

pub use content::{DocumentKind, GeneratedContent};
pub use error::Error;
pub use fonts::{FontBook, FontFiles, TextMeasure};
pub use model::{
    Body, Document, DrawOp, Entry, FontFace, FontSpec, Header, Margins, PageGeometry, Paper,
    Placement, RenderedPage, Rule, Section, TextRun,
};
pub use style::{FontFamily, ListStyle, StyleConfig, Template};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Lay out `doc` and write it as PDF bytes.
pub fn render_pdf(
    doc: &Document,
    geometry: &PageGeometry,
    style: &StyleConfig,
    fonts: &FontBook,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let pages = layout::render(doc, geometry, style, fonts);
    let t_layout = t0.elapsed();

    let bytes = pdf::write(&pages, geometry, style, fonts, &doc.title)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, pdf={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        pages.len(),
        bytes.len(),
    );

    Ok(bytes)
}

/// Plain-text rendition of `doc`, for `.txt` export.
pub fn render_text(doc: &Document, style: &StyleConfig) -> String {
    text::render(doc, style)
}

/// Settings for [`convert_json`].
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    pub paper: Paper,
    pub style: StyleConfig,
    pub fonts: FontFiles,
    /// Also write a `.txt` next to each PDF.
    pub write_text: bool,
    /// Date for a cover letter that has none of its own.
    pub date: Option<String>,
}

/// Read generated content from `input` and write one PDF per document it holds into
/// `out_dir`. Returns the paths written.
pub fn convert_json(input: &Path, out_dir: &Path, options: &ConvertOptions) -> Result<Vec<PathBuf>, Error> {
    let t0 = Instant::now();

    let content = GeneratedContent::from_path(input)?;
    let docs = content.documents(options.date.as_deref());
    if docs.is_empty() {
        log::warn!("{}: no resume, cover letter or interview answers found", input.display());
    }

    let fonts = FontBook::load(options.style.font_family, &options.fonts)?;
    let geometry = options.paper.geometry();
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for (kind, doc) in &docs {
        let pdf_path = out_dir.join(format!("{}.pdf", kind.file_stem()));
        let bytes = render_pdf(doc, &geometry, &options.style, &fonts)?;
        std::fs::write(&pdf_path, &bytes)?;
        written.push(pdf_path);

        if options.write_text {
            let txt_path = out_dir.join(format!("{}.txt", kind.file_stem()));
            std::fs::write(&txt_path, render_text(doc, &options.style))?;
            written.push(txt_path);
        }
    }

    log::info!(
        "Converted {} in {:.1}ms → {} files",
        input.display(),
        t0.elapsed().as_secs_f64() * 1000.0,
        written.len(),
    );

    Ok(written)
}
