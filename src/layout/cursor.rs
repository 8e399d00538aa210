use crate::model::{DrawOp, PageGeometry};

/// Vertical cursor for one column flow plus the pages it has filled so far.
///
/// `y` is the top of the next line box, measured down from the page top. A page is only
/// recorded once something has been drawn on it, so breaks never produce blank pages.
pub(crate) struct PageCursor {
    top: f32,
    bottom: f32,
    y: f32,
    current: Vec<DrawOp>,
    pages: Vec<Vec<DrawOp>>,
}

impl PageCursor {
    pub(crate) fn new(geometry: &PageGeometry) -> Self {
        Self {
            top: geometry.margins.top,
            bottom: geometry.content_bottom(),
            y: geometry.margins.top,
            current: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub(crate) fn y(&self) -> f32 {
        self.y
    }

    pub(crate) fn remaining(&self) -> f32 {
        self.bottom - self.y
    }

    /// Full printable height of a fresh page.
    pub(crate) fn page_capacity(&self) -> f32 {
        self.bottom - self.top
    }

    pub(crate) fn at_page_top(&self) -> bool {
        (self.y - self.top).abs() < 0.01
    }

    /// Break to a new page unless `height` still fits. At the very top of a page nothing
    /// is gained by breaking, so an oversize unit is placed there and overflows.
    pub(crate) fn ensure_space(&mut self, height: f32) {
        if self.remaining() < height && !self.at_page_top() {
            self.break_page();
        }
    }

    pub(crate) fn advance(&mut self, height: f32) {
        self.y += height;
    }

    pub(crate) fn draw(&mut self, op: DrawOp) {
        self.current.push(op);
    }

    fn break_page(&mut self) {
        if !self.current.is_empty() {
            log::debug!(
                "page break after page {} at y={:.1}",
                self.pages.len() + 1,
                self.y
            );
            self.pages.push(std::mem::take(&mut self.current));
        }
        self.y = self.top;
    }

    /// Pages in order, index 0 = page 1. The page in progress is kept if it has content.
    pub(crate) fn finish(mut self) -> Vec<Vec<DrawOp>> {
        if !self.current.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}
