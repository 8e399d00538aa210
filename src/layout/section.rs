use crate::fonts::TextMeasure;
use crate::model::{Body, DrawOp, Entry, FontFace, FontSpec, Header, PageGeometry, Rule, Section, TextRun};
use crate::style::{ListStyle, StyleConfig};

use super::cursor::PageCursor;
use super::wrap::Wrap;

/// Horizontal band a flow is laid out in.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Column {
    pub(crate) x: f32,
    pub(crate) width: f32,
}

/// Wrapped text lines plus the row, if any, that carries the right-aligned aside.
struct AsideLines {
    lines: Vec<String>,
    aside_row: Option<usize>,
}

impl Column {
    fn right(&self) -> f32 {
        self.x + self.width
    }
}

pub(crate) struct SectionRenderer<'a> {
    style: &'a StyleConfig,
    geometry: &'a PageGeometry,
    measure: &'a dyn TextMeasure,
}

impl<'a> SectionRenderer<'a> {
    pub(crate) fn new(
        style: &'a StyleConfig,
        geometry: &'a PageGeometry,
        measure: &'a dyn TextMeasure,
    ) -> Self {
        Self {
            style,
            geometry,
            measure,
        }
    }

    fn font(&self, face: FontFace) -> FontSpec {
        FontSpec::new(face, self.style.body_size)
    }

    fn width(&self, text: &str, font: FontSpec) -> f32 {
        self.measure.text_width(text, font)
    }

    fn wrap<'t>(&'t self, text: &'t str, max_width: f32, font: FontSpec) -> Wrap<'t> {
        Wrap::new(text, max_width, font, self.measure)
    }

    fn text_op(&self, text: String, x: f32, y: f32, font: FontSpec, color: [u8; 3]) -> DrawOp {
        DrawOp::Text(TextRun {
            text,
            x,
            y,
            font,
            color,
        })
    }

    /// Space-check, draw and advance one line of body text.
    fn line(&self, cursor: &mut PageCursor, x: f32, text: String, font: FontSpec, line_h: f32) {
        cursor.ensure_space(line_h);
        cursor.draw(self.text_op(text, x, cursor.y(), font, self.style.text_color));
        cursor.advance(line_h);
    }

    pub(crate) fn render_header(&self, cursor: &mut PageCursor, col: Column, header: &Header) {
        let name_font = FontSpec::new(FontFace::Bold, self.style.name_size);
        let name_h = self.style.line_height_for(self.style.name_size, self.geometry);
        let detail_font = self.font(FontFace::Regular);
        let line_h = self.geometry.line_height;

        let x_for = |text: &str, font: FontSpec| {
            if self.style.center_header {
                col.x + ((col.width - self.width(text, font)) / 2.0).max(0.0)
            } else {
                col.x
            }
        };

        for line in self.wrap(&header.name, col.width, name_font).lines() {
            cursor.ensure_space(name_h);
            let x = x_for(&line, name_font);
            cursor.draw(self.text_op(line, x, cursor.y(), name_font, self.style.heading_color));
            cursor.advance(name_h);
        }

        let details = header
            .details
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join(" | ");
        for line in self.wrap(&details, col.width, detail_font).lines() {
            let x = x_for(&line, detail_font);
            self.line(cursor, x, line, detail_font, line_h);
        }
        cursor.advance(self.style.section_gap);
    }

    pub(crate) fn render_section(&self, cursor: &mut PageCursor, col: Column, section: &Section) {
        if let Some(title) = section.title.as_deref().filter(|t| !t.trim().is_empty()) {
            self.render_title(cursor, col, title);
        }
        match &section.body {
            Body::Text(text) => self.render_text(cursor, col, text),
            Body::Entries(entries) => {
                let mut first = true;
                for entry in entries.iter().filter(|e| !e.is_blank()) {
                    if !first {
                        cursor.advance(self.style.entry_gap);
                    }
                    self.render_entry(cursor, col, entry);
                    first = false;
                }
            }
            Body::List(items) => self.render_list(cursor, col, items),
        }
    }

    /// Title line(s), then a rule and a fixed gap, space-checked as one block.
    fn render_title(&self, cursor: &mut PageCursor, col: Column, title: &str) {
        let font = FontSpec::new(FontFace::Bold, self.style.heading_size);
        let title_h = self.style.line_height_for(self.style.heading_size, self.geometry);
        let text = self.style.title_text(title);
        let lines: Vec<String> = self.wrap(&text, col.width, font).lines().collect();

        let block = lines.len() as f32 * title_h + self.style.rule_offset + self.style.title_gap;
        let keep = match self.style.keep_title_with_lines {
            Some(n) => block + n as f32 * self.geometry.line_height,
            None => block,
        };
        cursor.ensure_space(if keep <= cursor.page_capacity() { keep } else { block });

        for line in lines {
            cursor.draw(self.text_op(line, col.x, cursor.y(), font, self.style.heading_color));
            cursor.advance(title_h);
        }
        if let Some(color) = self.style.rule_color {
            cursor.draw(DrawOp::Rule(Rule {
                x1: col.x,
                x2: col.right(),
                y: cursor.y() + self.style.rule_offset / 2.0,
                thickness: self.style.rule_thickness,
                color,
            }));
        }
        cursor.advance(self.style.rule_offset + self.style.title_gap);
    }

    fn render_text(&self, cursor: &mut PageCursor, col: Column, text: &str) {
        let font = self.font(FontFace::Regular);
        let line_h = self.geometry.line_height;
        for paragraph in text.lines() {
            if paragraph.trim().is_empty() {
                if cursor.remaining() >= line_h {
                    cursor.advance(line_h);
                } else {
                    log::debug!("dropping blank line at y={:.1}", cursor.y());
                }
                continue;
            }
            for line in self.wrap(paragraph, col.width, font).lines() {
                self.line(cursor, col.x, line, font, line_h);
            }
        }
    }

    /// Wrap `text` beside a right-aligned `aside` on its first line. An aside wider than
    /// three quarters of the column gets a line of its own below the text instead.
    fn aside_lines(&self, text: &str, aside: &str, font: FontSpec, aside_font: FontSpec, col: Column) -> AsideLines {
        let aside = aside.trim();
        if aside.is_empty() {
            return AsideLines {
                lines: self.wrap(text, col.width, font).lines().collect(),
                aside_row: None,
            };
        }
        let aside_w = self.width(aside, aside_font) + self.style.aside_gap;
        if aside_w <= col.width * 0.75 {
            let mut lines: Vec<String> = self.wrap(text, col.width - aside_w, font).lines().collect();
            if lines.is_empty() {
                lines.push(String::new());
            }
            return AsideLines {
                lines,
                aside_row: Some(0),
            };
        }
        let mut lines: Vec<String> = self.wrap(text, col.width, font).lines().collect();
        lines.push(String::new());
        AsideLines {
            aside_row: Some(lines.len() - 1),
            lines,
        }
    }

    fn draw_aside_lines(
        &self,
        cursor: &mut PageCursor,
        col: Column,
        block: AsideLines,
        aside: &str,
        (font, aside_font): (FontSpec, FontSpec),
    ) {
        let line_h = self.geometry.line_height;
        let aside = aside.trim();
        for (i, line) in block.lines.into_iter().enumerate() {
            cursor.ensure_space(line_h);
            let y = cursor.y();
            if !line.is_empty() {
                cursor.draw(self.text_op(line, col.x, y, font, self.style.text_color));
            }
            if block.aside_row == Some(i) {
                let x = col.right() - self.width(aside, aside_font);
                cursor.draw(self.text_op(aside.to_string(), x, y, aside_font, self.style.text_color));
            }
            cursor.advance(line_h);
        }
    }

    fn render_entry(&self, cursor: &mut PageCursor, col: Column, entry: &Entry) {
        let line_h = self.geometry.line_height;
        let heading_fonts = (self.font(FontFace::Bold), self.font(FontFace::Regular));
        let sub_fonts = (self.font(FontFace::Italic), self.font(FontFace::Italic));

        let heading = self.aside_lines(&entry.heading, &entry.heading_aside, heading_fonts.0, heading_fonts.1, col);
        let sub = self.aside_lines(&entry.subheading, &entry.subheading_aside, sub_fonts.0, sub_fonts.1, col);
        let bullets: Vec<&str> = entry
            .bullets
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect();

        // Soft lookahead: heading, subheading and the first bullet line together.
        let group_lines = heading.lines.len() + sub.lines.len() + usize::from(!bullets.is_empty());
        let group = group_lines as f32 * line_h;
        if group <= cursor.page_capacity() {
            cursor.ensure_space(group);
        }

        self.draw_aside_lines(cursor, col, heading, &entry.heading_aside, heading_fonts);
        self.draw_aside_lines(cursor, col, sub, &entry.subheading_aside, sub_fonts);
        for bullet in bullets {
            self.render_bullet(cursor, col, bullet);
        }
    }

    /// Glyph at the column edge, text wrapped at the bullet indent.
    fn render_bullet(&self, cursor: &mut PageCursor, col: Column, text: &str) {
        let font = self.font(FontFace::Regular);
        let line_h = self.geometry.line_height;
        let text_x = col.x + self.style.bullet_indent;
        let width = col.width - self.style.bullet_indent;
        for (i, line) in self.wrap(text, width, font).lines().enumerate() {
            cursor.ensure_space(line_h);
            let y = cursor.y();
            if i == 0 {
                let glyph = self.style.bullet_glyph.to_string();
                cursor.draw(self.text_op(glyph, col.x, y, font, self.style.text_color));
            }
            cursor.draw(self.text_op(line, text_x, y, font, self.style.text_color));
            cursor.advance(line_h);
        }
    }

    fn render_list(&self, cursor: &mut PageCursor, col: Column, items: &[String]) {
        let items = items.iter().map(|i| i.trim()).filter(|i| !i.is_empty());
        match self.style.list_style {
            ListStyle::Comma => {
                let joined = items.collect::<Vec<_>>().join(", ");
                let font = self.font(FontFace::Regular);
                for line in self.wrap(&joined, col.width, font).lines() {
                    self.line(cursor, col.x, line, font, self.geometry.line_height);
                }
            }
            ListStyle::Bulleted => {
                for item in items {
                    self.render_bullet(cursor, col, item);
                }
            }
        }
    }
}
