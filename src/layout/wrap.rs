use std::iter::Peekable;
use std::str::SplitWhitespace;

use crate::fonts::TextMeasure;
use crate::model::FontSpec;

/// Greedy word wrap of one paragraph at `max_width`.
///
/// Lines break only at whitespace and are rejoined with single spaces. A word wider
/// than `max_width` gets a line of its own and overflows. `lines()` can be called
/// any number of times; each call starts a fresh, lazily evaluated pass.
#[derive(Clone, Copy)]
pub struct Wrap<'a> {
    text: &'a str,
    max_width: f32,
    font: FontSpec,
    measure: &'a dyn TextMeasure,
}

impl<'a> Wrap<'a> {
    pub fn new(text: &'a str, max_width: f32, font: FontSpec, measure: &'a dyn TextMeasure) -> Self {
        Self {
            text,
            max_width,
            font,
            measure,
        }
    }

    pub fn lines(&self) -> Lines<'a> {
        Lines {
            words: self.text.split_whitespace().peekable(),
            max_width: self.max_width,
            font: self.font,
            measure: self.measure,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Total height of the wrapped paragraph at `line_height` per line.
    pub fn height(&self, line_height: f32) -> f32 {
        self.line_count() as f32 * line_height
    }
}

impl<'a> IntoIterator for Wrap<'a> {
    type Item = String;
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Lines<'a> {
        self.lines()
    }
}

#[derive(Clone)]
pub struct Lines<'a> {
    words: Peekable<SplitWhitespace<'a>>,
    max_width: f32,
    font: FontSpec,
    measure: &'a dyn TextMeasure,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.words.next()?;
        let mut line = String::from(first);
        let mut width = self.measure.text_width(first, self.font);
        let space_w = self.measure.text_width(" ", self.font);

        while let Some(&word) = self.words.peek() {
            let word_w = self.measure.text_width(word, self.font);
            if width + space_w + word_w > self.max_width {
                break;
            }
            line.push(' ');
            line.push_str(word);
            width += space_w + word_w;
            self.words.next();
        }
        Some(line)
    }
}

/// Convenience for callers that want every line at once.
pub fn wrap_text(text: &str, max_width: f32, font: FontSpec, measure: &dyn TextMeasure) -> Vec<String> {
    Wrap::new(text, max_width, font, measure).lines().collect()
}
