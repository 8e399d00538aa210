use serde::{Deserialize, Serialize};

use crate::model::PageGeometry;

/// Base-14 family used when no TrueType files are supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListStyle {
    /// `a, b, c` wrapped as one paragraph.
    #[default]
    Comma,
    /// One bullet line per item.
    Bulleted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    #[default]
    Classic,
    Modern,
    Minimal,
}

impl Template {
    pub fn style(self) -> StyleConfig {
        match self {
            Template::Classic => StyleConfig::default(),
            Template::Modern => StyleConfig {
                font_family: FontFamily::Helvetica,
                text_color: [0x33, 0x33, 0x33],
                heading_color: [0x1F, 0x4E, 0x79],
                rule_color: Some([0x1F, 0x4E, 0x79]),
                sidebar_width: 150.0,
                sidebar_gutter: 20.0,
                sidebar_color: Some([0xEE, 0xF2, 0xF7]),
                list_style: ListStyle::Bulleted,
                body_size: 10.0,
                name_size: 22.0,
                uppercase_titles: false,
                center_header: false,
                ..StyleConfig::default()
            },
            Template::Minimal => StyleConfig {
                font_family: FontFamily::Helvetica,
                text_color: [0x22, 0x22, 0x22],
                heading_color: [0x22, 0x22, 0x22],
                rule_color: None,
                bullet_glyph: '-',
                body_size: 10.0,
                heading_size: 11.0,
                name_size: 18.0,
                uppercase_titles: false,
                center_header: false,
                ..StyleConfig::default()
            },
        }
    }
}

/// Fonts, colors and spacing for one template.
/// Sizes and gaps are in points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font_family: FontFamily,
    pub text_color: [u8; 3],
    pub heading_color: [u8; 3],
    /// Rule under section titles; `None` draws no rule but keeps the spacing.
    pub rule_color: Option<[u8; 3]>,
    pub rule_thickness: f32,
    /// 0 for single-column templates.
    pub sidebar_width: f32,
    pub sidebar_gutter: f32,
    pub sidebar_color: Option<[u8; 3]>,
    pub bullet_glyph: char,
    pub bullet_indent: f32,
    pub list_style: ListStyle,
    pub body_size: f32,
    pub heading_size: f32,
    pub name_size: f32,
    pub uppercase_titles: bool,
    pub center_header: bool,
    pub rule_offset: f32,
    pub title_gap: f32,
    pub section_gap: f32,
    pub entry_gap: f32,
    /// Minimum space kept between a heading and its right-aligned aside.
    pub aside_gap: f32,
    /// Keep a section title together with this many body lines. `None` keeps only the
    /// title block itself together.
    pub keep_title_with_lines: Option<usize>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Times,
            text_color: [0, 0, 0],
            heading_color: [0, 0, 0],
            rule_color: Some([0x80, 0x80, 0x80]),
            rule_thickness: 0.75,
            sidebar_width: 0.0,
            sidebar_gutter: 0.0,
            sidebar_color: None,
            bullet_glyph: '\u{2022}',
            bullet_indent: 12.0,
            list_style: ListStyle::Comma,
            body_size: 10.5,
            heading_size: 12.0,
            name_size: 20.0,
            uppercase_titles: true,
            center_header: true,
            rule_offset: 3.0,
            title_gap: 4.0,
            section_gap: 10.0,
            entry_gap: 6.0,
            aside_gap: 12.0,
            keep_title_with_lines: None,
        }
    }
}

impl StyleConfig {
    /// Line height for text of `size`, scaled from the geometry's body line height.
    pub fn line_height_for(&self, size: f32, geometry: &PageGeometry) -> f32 {
        if self.body_size <= 0.0 {
            return geometry.line_height;
        }
        geometry.line_height * size / self.body_size
    }

    pub fn has_sidebar(&self) -> bool {
        self.sidebar_width > 0.0
    }

    pub fn title_text(&self, title: &str) -> String {
        if self.uppercase_titles {
            title.to_uppercase()
        } else {
            title.to_string()
        }
    }

    /// Parse a JSON override. Keys not present keep the preset's values.
    pub fn with_overrides(&self, json: &str) -> Result<StyleConfig, crate::Error> {
        let mut base = serde_json::to_value(self)?;
        let patch: serde_json::Value = serde_json::from_str(json)?;
        let (Some(base_map), Some(patch_map)) = (base.as_object_mut(), patch.as_object()) else {
            return Err(crate::Error::InvalidContent(
                "style override must be a JSON object".into(),
            ));
        };
        for (k, v) in patch_map {
            base_map.insert(k.clone(), v.clone());
        }
        Ok(serde_json::from_value(base)?)
    }
}
