use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Name, Pdf, Rect, Ref, Str};
use ttf_parser::Face;

use crate::error::Error;
use crate::model::{FontFace, FontSpec};
use crate::style::FontFamily;

/// Width of text in points for a given face and size.
///
/// Layout only ever asks this question, so the wrapper and section renderer can be
/// driven by real font metrics or by a fixed-width stand-in.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: FontSpec) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, FontSpec) -> f32,
{
    fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        self(text, font)
    }
}

struct TrueTypeData {
    path: PathBuf,
    data: Mmap,
    family: String,
}

/// Advances in 1000-units.
enum Widths {
    /// Base-14 fonts: WinAnsi bytes 32..=255.
    WinAnsi(Vec<f32>),
    /// TrueType: every codepoint the font's Unicode cmap maps to a glyph.
    PerChar(HashMap<char, f32>),
}

pub(crate) struct FontEntry {
    /// Standard font used when nothing is embedded (or embedding fails).
    pub(crate) base14_name: &'static str,
    widths: Widths,
    /// Advance of whatever gets drawn for a character the font lacks.
    missing_width_1000: f32,
    pub(crate) ascender_ratio: f32,
    truetype: Option<TrueTypeData>,
}

impl FontEntry {
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        match &self.widths {
            Widths::PerChar(map) => map.get(&ch).copied().unwrap_or(self.missing_width_1000),
            Widths::WinAnsi(table) => match char_to_winansi(ch) {
                byte @ 32.. => table[(byte - 32) as usize],
                _ => self.missing_width_1000,
            },
        }
    }

    pub(crate) fn word_width(&self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    fn base14(family: FontFamily, face: FontFace) -> Self {
        let ascender_ratio = match family {
            FontFamily::Helvetica => 0.718,
            FontFamily::Times => 0.683,
            FontFamily::Courier => 0.629,
        };
        FontEntry {
            base14_name: base14_name(family, face),
            widths: Widths::WinAnsi(base14_widths(family, face)),
            missing_width_1000: 0.0,
            ascender_ratio,
            truetype: None,
        }
    }
}

/// TrueType files for the four faces. Missing faces fall back to the regular file.
#[derive(Clone, Debug, Default)]
pub struct FontFiles {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
    pub bold_italic: Option<PathBuf>,
}

impl FontFiles {
    /// Read CAREERDOC_FONT, CAREERDOC_BOLD_FONT, CAREERDOC_ITALIC_FONT and
    /// CAREERDOC_BOLD_ITALIC_FONT.
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        FontFiles {
            regular: var("CAREERDOC_FONT"),
            bold: var("CAREERDOC_BOLD_FONT"),
            italic: var("CAREERDOC_ITALIC_FONT"),
            bold_italic: var("CAREERDOC_BOLD_ITALIC_FONT"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.bold_italic.is_none()
    }

    fn for_face(&self, face: FontFace) -> Option<&Path> {
        let specific = match face {
            FontFace::Regular => self.regular.as_deref(),
            FontFace::Bold => self.bold.as_deref(),
            FontFace::Italic => self.italic.as_deref(),
            FontFace::BoldItalic => self.bold_italic.as_deref().or(self.bold.as_deref()),
        };
        specific.or(self.regular.as_deref())
    }
}

/// Metrics for the four faces a document can use.
pub struct FontBook {
    faces: [FontEntry; 4],
}

impl FontBook {
    pub fn builtin(family: FontFamily) -> Self {
        FontBook {
            faces: FontFace::ALL.map(|face| FontEntry::base14(family, face)),
        }
    }

    /// Load TrueType metrics for each face that has a file; the rest use `family`.
    pub fn load(family: FontFamily, files: &FontFiles) -> Result<Self, Error> {
        let mut book = Self::builtin(family);
        if files.is_empty() {
            log::debug!("no TrueType files, using base-14 {family:?} metrics");
            return Ok(book);
        }
        for face in FontFace::ALL {
            if let Some(path) = files.for_face(face) {
                let mut entry = load_truetype(path)?;
                entry.base14_name = base14_name(family, face);
                book.faces[face.index()] = entry;
            }
        }
        Ok(book)
    }

    pub(crate) fn entry(&self, face: FontFace) -> &FontEntry {
        &self.faces[face.index()]
    }
}

impl TextMeasure for FontBook {
    fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        self.entry(font.face).word_width(text, font.size)
    }
}

fn font_family_name(face: &Face) -> Option<String> {
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::FAMILY
            && name.is_unicode()
            && let Some(s) = name.to_string()
        {
            return Some(s);
        }
    }
    None
}

fn load_truetype(path: &Path) -> Result<FontEntry, Error> {
    let t0 = std::time::Instant::now();
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Font(format!("{}: {e}", path.display())))?;
    let data = unsafe { Mmap::map(&file) }
        .map_err(|e| Error::Font(format!("{}: {e}", path.display())))?;

    let (char_widths, missing_width_1000, ascender_ratio, family) = {
        let face = Face::parse(&data, 0)
            .map_err(|e| Error::Font(format!("{}: {e}", path.display())))?;
        let per_1000 = 1000.0 / face.units_per_em() as f32;
        let advance = |gid: ttf_parser::GlyphId| {
            face.glyph_hor_advance(gid).unwrap_or(0) as f32 * per_1000
        };

        let mut char_widths = HashMap::new();
        let subtables = face.tables().cmap.into_iter().flat_map(|cmap| cmap.subtables);
        for subtable in subtables.filter(|st| st.is_unicode()) {
            subtable.codepoints(|cp| {
                if let Some(ch) = char::from_u32(cp)
                    && let Some(gid) = face.glyph_index(ch)
                {
                    char_widths.entry(ch).or_insert_with(|| advance(gid));
                }
            });
        }

        let missing = advance(ttf_parser::GlyphId(0));
        let ascender_ratio = face.ascender() as f32 / face.units_per_em() as f32;
        let family = font_family_name(&face).unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Embedded".to_string())
        });
        (char_widths, missing, ascender_ratio, family)
    };

    log::debug!(
        "load_truetype: {} ({family}, {} chars) → {:.1}ms",
        path.display(),
        char_widths.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(FontEntry {
        base14_name: "Helvetica",
        widths: Widths::PerChar(char_widths),
        missing_width_1000,
        ascender_ratio,
        truetype: Some(TrueTypeData {
            path: path.to_path_buf(),
            data,
            family,
        }),
    })
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    let bytes: Vec<u8> = s
        .chars()
        .filter_map(|c| match char_to_winansi(c) {
            0 => None,
            b => Some(b),
        })
        .collect();
    if bytes.len() != s.chars().count() {
        log::warn!("Dropped characters outside WinAnsi while encoding {s:?}");
    }
    bytes
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

fn base14_name(family: FontFamily, face: FontFace) -> &'static str {
    match (family, face) {
        (FontFamily::Helvetica, FontFace::Regular) => "Helvetica",
        (FontFamily::Helvetica, FontFace::Bold) => "Helvetica-Bold",
        (FontFamily::Helvetica, FontFace::Italic) => "Helvetica-Oblique",
        (FontFamily::Helvetica, FontFace::BoldItalic) => "Helvetica-BoldOblique",
        (FontFamily::Times, FontFace::Regular) => "Times-Roman",
        (FontFamily::Times, FontFace::Bold) => "Times-Bold",
        (FontFamily::Times, FontFace::Italic) => "Times-Italic",
        (FontFamily::Times, FontFace::BoldItalic) => "Times-BoldItalic",
        (FontFamily::Courier, FontFace::Regular) => "Courier",
        (FontFamily::Courier, FontFace::Bold) => "Courier-Bold",
        (FontFamily::Courier, FontFace::Italic) => "Courier-Oblique",
        (FontFamily::Courier, FontFace::BoldItalic) => "Courier-BoldOblique",
    }
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            0x95 => 350.0,                        // bullet
            0x96 => 556.0,                        // en dash
            0x97 => 1000.0,                       // em dash
            _ => 556.0,
        })
        .collect()
}

/// Approximate Times-Roman widths at 1000 units/em for WinAnsi chars 32..=255.
fn times_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 250.0,
            33..=47 => 333.0,
            48..=57 => 500.0,
            58..=64 => 278.0,
            73 => 333.0,
            74 => 389.0,
            77 => 889.0,
            87 => 944.0,
            65..=90 => 694.0,
            91..=96 => 333.0,
            102 | 105 | 106 | 108 | 116 => 278.0,
            109 => 778.0,
            119 => 722.0,
            97..=122 => 458.0,
            0x95 => 350.0,
            0x96 => 500.0,
            0x97 => 1000.0,
            _ => 500.0,
        })
        .collect()
}

fn base14_widths(family: FontFamily, face: FontFace) -> Vec<f32> {
    let bold = matches!(face, FontFace::Bold | FontFace::BoldItalic);
    match family {
        FontFamily::Courier => vec![600.0; 224],
        FontFamily::Helvetica | FontFamily::Times => {
            let base = if family == FontFamily::Helvetica {
                helvetica_widths()
            } else {
                times_widths()
            };
            if !bold {
                return base;
            }
            // Bold cuts run roughly 6% wider; spaces keep their width.
            base.into_iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { w } else { w * 1.06 })
                .collect()
        }
    }
}

/// A face as written into the PDF: its resource name and how to encode text for it.
pub(crate) struct RegisteredFont {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    char_to_gid: Option<HashMap<char, u16>>,
}

impl RegisteredFont {
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => to_winansi_bytes(text),
        }
    }
}

/// Glyphs a document draws with one TrueType face, renumbered for the subset.
struct GlyphSubset {
    remapper: subsetter::GlyphRemapper,
    char_to_gid: HashMap<char, u16>,
    /// (subset gid, advance in 1000-units), sorted by gid.
    widths: Vec<(u16, f32)>,
}

fn collect_glyphs(face: &Face, used_chars: &HashSet<char>) -> GlyphSubset {
    let per_1000 = 1000.0 / face.units_per_em() as f32;
    let mut chars: Vec<char> = used_chars.iter().copied().collect();
    chars.sort_unstable();

    let mut subset = GlyphSubset {
        remapper: subsetter::GlyphRemapper::new(),
        char_to_gid: HashMap::new(),
        widths: Vec::new(),
    };
    for ch in chars {
        let Some(gid) = face.glyph_index(ch) else {
            continue;
        };
        let new_gid = subset.remapper.remap(gid.0);
        subset.char_to_gid.insert(ch, new_gid);
        let advance = face.glyph_hor_advance(gid).unwrap_or(0);
        subset.widths.push((new_gid, advance as f32 * per_1000));
    }
    subset.widths.sort_by_key(|&(gid, _)| gid);
    subset.widths.dedup_by_key(|&mut (gid, _)| gid);
    subset
}

fn identity_info() -> SystemInfo<'static> {
    SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    }
}

/// Write `tt` as a subsetted Type0/CIDFontType2 font under `font_ref`.
/// Returns the char → subset gid map text must be encoded with.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    tt: &TrueTypeData,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Option<HashMap<char, u16>> {
    let face = Face::parse(&tt.data, 0).ok()?;
    let per_1000 = 1000.0 / face.units_per_em() as f32;
    let glyphs = collect_glyphs(&face, used_chars);

    let font_data = match subsetter::subset(&tt.data, 0, &glyphs.remapper) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("{}: subsetting failed ({e}), embedding whole file", tt.path.display());
            tt.data.to_vec()
        }
    };
    let font_len = i32::try_from(font_data.len()).ok()?;
    let ps_name = tt.family.replace(' ', "");

    let [file_ref, descriptor_ref, cid_ref, cmap_ref] = [alloc(), alloc(), alloc(), alloc()];

    pdf.stream(file_ref, &font_data).pair(Name(b"Length1"), font_len);

    let bb = face.global_bounding_box();
    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(Rect::new(
            bb.x_min as f32 * per_1000,
            bb.y_min as f32 * per_1000,
            bb.x_max as f32 * per_1000,
            bb.y_max as f32 * per_1000,
        ))
        .italic_angle(0.0)
        .ascent(face.ascender() as f32 * per_1000)
        .descent(face.descender() as f32 * per_1000)
        .cap_height(face.capital_height().map_or(700.0, |h| h as f32 * per_1000))
        .stem_v(80.0)
        .font_file2(file_ref);

    let mut cid = pdf.cid_font(cid_ref);
    cid.subtype(CidFontType::Type2)
        .base_font(Name(ps_name.as_bytes()))
        .system_info(identity_info())
        .font_descriptor(descriptor_ref)
        .default_width(0.0)
        .cid_to_gid_map_predefined(Name(b"Identity"));
    if !glyphs.widths.is_empty() {
        let mut widths = cid.widths();
        for &(gid, width) in &glyphs.widths {
            widths.consecutive(gid, [width]);
        }
    }
    drop(cid);

    let cmap_name = format!("{ps_name}-UTF16");
    let mut cmap = UnicodeCmap::new(Name(cmap_name.as_bytes()), identity_info());
    for (&ch, &gid) in &glyphs.char_to_gid {
        cmap.pair(gid, ch);
    }
    pdf.stream(cmap_ref, cmap.finish().as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_ref)
        .to_unicode(cmap_ref);

    Some(glyphs.char_to_gid)
}

pub(crate) fn register_font(
    pdf: &mut Pdf,
    entry: &FontEntry,
    pdf_name: String,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> RegisteredFont {
    let t0 = std::time::Instant::now();
    let font_ref = alloc();

    let char_to_gid = entry
        .truetype
        .as_ref()
        .and_then(|tt| embed_truetype(pdf, font_ref, tt, used_chars, alloc));

    if char_to_gid.is_none() {
        if let Some(tt) = &entry.truetype {
            log::warn!(
                "Could not embed {}, using {}",
                tt.path.display(),
                entry.base14_name
            );
        }
        pdf.type1_font(font_ref)
            .base_font(Name(entry.base14_name.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    log::debug!(
        "register_font: {pdf_name} ({}) → {:.1}ms",
        entry.base14_name,
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    RegisteredFont {
        pdf_name,
        font_ref,
        char_to_gid,
    }
}
