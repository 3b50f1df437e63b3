use std::ops::Range;

/// Default logical row height, in the same unit as the scroll offset.
pub const DEFAULT_ROW_HEIGHT: usize = 28;
/// Extra rows kept rendered past the visible bottom edge to avoid flicker
/// while scrolling.
pub const DEFAULT_OVERSCAN: usize = 10;

/// Maps a scroll position onto the slice of flattened rows that actually
/// needs rendering.
///
/// All lengths share one unit: a pixel-like measure for GUI embeddings, or
/// simply terminal cells with `row_height = 1`. With windowing disabled the
/// range is always `0..total` — correct on small trees, wasteful on big ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_offset: usize,
    pub viewport_height: usize,
    pub row_height: usize,
    pub overscan: usize,
    pub enabled: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            viewport_height: 0,
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            enabled: true,
        }
    }
}

impl Viewport {
    pub fn new(row_height: usize, overscan: usize, enabled: bool) -> Self {
        Self {
            row_height: row_height.max(1),
            overscan,
            enabled,
            ..Self::default()
        }
    }

    /// Index of the first row intersecting the viewport.
    pub fn first_row(&self) -> usize {
        self.scroll_offset / self.row_height.max(1)
    }

    /// Rows that fit in the viewport, before overscan.
    pub fn base_count(&self) -> usize {
        self.viewport_height.div_ceil(self.row_height.max(1))
    }

    /// The row range to render, clamped to `total` rows.
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        if !self.enabled {
            return 0..total;
        }
        let start = self.first_row().min(total);
        let end = (start + self.base_count() + self.overscan).min(total);
        start..end
    }

    /// Full scrollable height of the list.
    pub fn total_height(&self, total: usize) -> usize {
        total * self.row_height
    }

    /// Height of the leading spacer standing in for the rows before the
    /// window, so native scrollbar geometry stays correct.
    pub fn spacer_height(&self, total: usize) -> usize {
        self.visible_range(total).start * self.row_height
    }

    /// Clamp-set the scroll position against the list's total height.
    pub fn scroll_to(&mut self, offset: usize, total: usize) {
        let max = self
            .total_height(total)
            .saturating_sub(self.viewport_height);
        self.scroll_offset = offset.min(max);
    }

    /// Nudge the scroll offset the minimal distance that brings `row` inside
    /// the viewport (not just the overscan window).
    pub fn ensure_visible(&mut self, row: usize) {
        let row_top = row * self.row_height;
        let row_bottom = row_top + self.row_height;
        if row_top < self.scroll_offset {
            self.scroll_offset = row_top;
        } else if row_bottom > self.scroll_offset + self.viewport_height {
            self.scroll_offset = row_bottom.saturating_sub(self.viewport_height);
        }
    }
}
