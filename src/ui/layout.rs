//! Feedback list paging
//!
//! The list shows as many cards as fit and pages so the selected card is
//! always on screen.

use std::ops::Range;

/// Vertical list of fixed-height cards
#[derive(Debug, Clone, Copy)]
pub struct ListLayout {
    /// Lines per card
    pub card_height: u16,
    /// Blank lines between cards
    pub gap: u16,
}

impl ListLayout {
    pub fn new(card_height: u16, gap: u16) -> Self {
        Self {
            card_height: card_height.max(1),
            gap,
        }
    }

    /// Number of cards that fit in `height` lines (at least one)
    pub fn visible_count(&self, height: u16) -> usize {
        let stride = self.card_height + self.gap;
        // The last card doesn't need a trailing gap
        (((height + self.gap) / stride) as usize).max(1)
    }

    /// Range of entries on the page containing `selected`
    pub fn visible_range(&self, selected: usize, total: usize, height: u16) -> Range<usize> {
        if total == 0 {
            return 0..0;
        }

        let page_size = self.visible_count(height);
        let page = selected.min(total - 1) / page_size;
        let start = page * page_size;
        let end = (start + page_size).min(total);
        start..end
    }

    /// Offset of the card at page-local `index` from the top
    pub fn card_offset(&self, index: usize) -> u16 {
        index as u16 * (self.card_height + self.gap)
    }
}
