#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Regular,
        FontFace::Bold,
        FontFace::Italic,
        FontFace::BoldItalic,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            FontFace::Regular => 0,
            FontFace::Bold => 1,
            FontFace::Italic => 2,
            FontFace::BoldItalic => 3,
        }
    }
}

/// Face and size of a run of text. The family comes from the style in effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub face: FontFace,
    pub size: f32, // points
}

impl FontSpec {
    pub fn new(face: FontFace, size: f32) -> Self {
        Self { face, size }
    }
}

/// Name and contact line printed above the first section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    pub name: String,
    pub details: Vec<String>,
}

/// One experience/education item: heading + subheading + bullets.
/// The asides are drawn right-aligned on the same line (dates, locations).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    pub heading: String,
    pub heading_aside: String,
    pub subheading: String,
    pub subheading_aside: String,
    pub bullets: Vec<String>,
}

impl Entry {
    pub fn is_blank(&self) -> bool {
        self.heading.trim().is_empty()
            && self.heading_aside.trim().is_empty()
            && self.subheading.trim().is_empty()
            && self.subheading_aside.trim().is_empty()
            && self.bullets.iter().all(|b| b.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// A paragraph string; `\n` forces a line break, an empty line is a blank separator.
    Text(String),
    Entries(Vec<Entry>),
    /// Short items (skills, links) rendered comma-joined or bulleted, per style.
    List(Vec<String>),
}

impl Body {
    /// True when rendering the body would produce no draw operations.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Text(text) => text.trim().is_empty(),
            Body::Entries(entries) => entries.iter().all(Entry::is_blank),
            Body::List(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Main,
    /// Flows in the sidebar column when the style has one, otherwise in the main column.
    Sidebar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub title: Option<String>,
    pub body: Body,
    pub placement: Placement,
}

impl Section {
    pub fn new(title: Option<&str>, body: Body) -> Self {
        Self {
            title: title.map(str::to_string),
            body,
            placement: Placement::Main,
        }
    }

    pub fn in_sidebar(mut self) -> Self {
        self.placement = Placement::Sidebar;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Used for the PDF document-info title; never drawn.
    pub title: String,
    pub header: Option<Header>,
    pub sections: Vec<Section>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(m: f32) -> Self {
        Self {
            top: m,
            right: m,
            bottom: m,
            left: m,
        }
    }
}

/// Page size, margins and base line height, all in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub line_height: f32,
}

impl PageGeometry {
    pub fn uniform(width: f32, height: f32, margin: f32, line_height: f32) -> Self {
        Self {
            width,
            height,
            margins: Margins::uniform(margin),
            line_height,
        }
    }

    pub fn usable_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// Lowest y (top-down) a line box may reach.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margins.bottom
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Paper {
    #[default]
    Letter,
    A4,
}

impl Paper {
    pub fn geometry(self) -> PageGeometry {
        match self {
            Paper::Letter => PageGeometry::uniform(612.0, 792.0, 54.0, 14.0),
            Paper::A4 => PageGeometry::uniform(595.28, 841.89, 54.0, 14.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32, // top of the line box, measured down from the page top
    pub font: FontSpec,
    pub color: [u8; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
    pub color: [u8; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    Rule(Rule),
}

impl DrawOp {
    pub fn y(&self) -> f32 {
        match self {
            DrawOp::Text(t) => t.y,
            DrawOp::Rule(r) => r.y,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text(t) => Some(&t.text),
            DrawOp::Rule(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPage {
    pub number: usize, // 1-based
    pub ops: Vec<DrawOp>,
}

impl RenderedPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }
}
