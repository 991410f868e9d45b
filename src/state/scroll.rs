//! Scroll position and row geometry.
//!
//! A logical line renders into one or more display rows. A [`ScrollPosition`]
//! names the row at the top of the content area as (line, sub-line).
//! [`RowLayout`] moves positions by whole display rows.

use super::search::{SearchDirection, SearchPattern};
use super::wrap::wrap_line;
use crate::model::LineIndex;
use crate::source::Reader;
use std::ops::{Range, RangeInclusive};

// ===== ScrollPosition =====

/// The display row anchored at the top of the content area.
///
/// Ordered by line, then sub-line, which is display order.
///
/// # Invariant
/// `sub_line` is below the number of rows `line` renders into. The pager
/// restores this through clamping whenever width or wrapping changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ScrollPosition {
    line: LineIndex,
    sub_line: usize,
}

impl ScrollPosition {
    /// Create a position at a given sub-line of a logical line.
    pub fn new(line: LineIndex, sub_line: usize) -> Self {
        Self { line, sub_line }
    }

    /// Position at the first row of a logical line.
    pub fn at_line(line: LineIndex) -> Self {
        Self { line, sub_line: 0 }
    }

    /// The logical line.
    pub fn line(&self) -> LineIndex {
        self.line
    }

    /// The wrapped segment of `line`, 0 for its first row.
    pub fn sub_line(&self) -> usize {
        self.sub_line
    }
}

// ===== RowLayout =====

/// Row geometry for the lines currently in a reader.
///
/// Line count is re-read on every step, so a layout stays valid while the
/// reader grows.
#[derive(Debug, Clone, Copy)]
pub struct RowLayout<'a> {
    reader: &'a Reader,
    wrap: bool,
    width: usize,
}

impl<'a> RowLayout<'a> {
    /// Layout for `reader` rendered `width` columns wide.
    pub fn new(reader: &'a Reader, wrap: bool, width: usize) -> Self {
        Self {
            reader,
            wrap,
            width: width.max(1),
        }
    }

    /// Byte ranges of the rows `text` renders into. Never empty.
    pub fn segments(&self, text: &str) -> Vec<Range<usize>> {
        if self.wrap {
            wrap_line(text, self.width)
        } else {
            vec![0..text.len()]
        }
    }

    /// Number of rows `line` renders into, at least 1.
    pub fn rows(&self, line: LineIndex) -> usize {
        if !self.wrap {
            return 1;
        }
        self.reader
            .line(line)
            .map_or(1, |text| self.segments(&text).len())
    }

    /// Position of the row holding the first occurrence of `pattern` in
    /// `line`, or `None` if the line does not match or does not exist.
    pub fn hit_in_line(&self, pattern: &SearchPattern, line: LineIndex) -> Option<ScrollPosition> {
        let text = self.reader.line(line)?;
        if !pattern.is_match(&text) {
            return None;
        }
        let row = pattern.first_hit_row(&text, &self.segments(&text))?;
        Some(ScrollPosition::new(line, row))
    }

    /// Hit of `pattern` in `line` restricted to the rows in `rows`.
    ///
    /// Forward returns the first such row, backward the last, so the hit is
    /// the one nearest to where a scan in `direction` enters the range.
    pub fn hit_in_rows(
        &self,
        pattern: &SearchPattern,
        line: LineIndex,
        rows: RangeInclusive<usize>,
        direction: SearchDirection,
    ) -> Option<ScrollPosition> {
        let text = self.reader.line(line)?;
        if !pattern.is_match(&text) {
            return None;
        }
        let hit_rows = pattern.hit_rows(&text, &self.segments(&text));
        let mut in_range = hit_rows.into_iter().filter(|row| rows.contains(row));
        let row = match direction {
            SearchDirection::Forward => in_range.next(),
            SearchDirection::Backward => in_range.last(),
        }?;
        Some(ScrollPosition::new(line, row))
    }

    /// The last display row of all content, `None` when there is no content.
    pub fn last_row(&self) -> Option<ScrollPosition> {
        let last = LineIndex::new(self.reader.line_count().checked_sub(1)?);
        Some(ScrollPosition::new(last, self.rows(last) - 1))
    }

    /// Move `rows` display rows down, stopping at the last row.
    pub fn advance(&self, mut position: ScrollPosition, rows: usize) -> ScrollPosition {
        for _ in 0..rows {
            if position.sub_line + 1 < self.rows(position.line) {
                position.sub_line += 1;
            } else if position.line.next().index() < self.reader.line_count() {
                position = ScrollPosition::at_line(position.line.next());
            } else {
                break;
            }
        }
        position
    }

    /// Move `rows` display rows up, stopping at the first row.
    pub fn retreat(&self, mut position: ScrollPosition, rows: usize) -> ScrollPosition {
        for _ in 0..rows {
            if position.sub_line > 0 {
                position.sub_line -= 1;
            } else if let Some(previous) = position.line.checked_prev() {
                position = ScrollPosition::new(previous, self.rows(previous) - 1);
            } else {
                break;
            }
        }
        position
    }

    /// Top position that puts the last row at the bottom of a `height`-row
    /// content area. Content shorter than the area pins to the first line.
    pub fn end_position(&self, height: usize) -> ScrollPosition {
        match self.last_row() {
            Some(last) => self.retreat(last, height.saturating_sub(1)),
            None => ScrollPosition::default(),
        }
    }

    /// Bring `position` back inside the content.
    ///
    /// Never points past the last line, never splits past a line's last
    /// row, and never leaves blank rows below the content when there is
    /// enough of it to fill `height` rows.
    pub fn clamp(&self, position: ScrollPosition, height: usize) -> ScrollPosition {
        let Some(last) = self.last_row() else {
            return ScrollPosition::default();
        };

        let position = if position.line > last.line {
            last
        } else {
            let sub_line = position.sub_line.min(self.rows(position.line) - 1);
            ScrollPosition::new(position.line, sub_line)
        };

        position.min(self.end_position(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_lines() -> Reader {
        Reader::from_text(None, "a\nb\nc\nd\ne\nf\n")
    }

    fn pos(line: usize, sub_line: usize) -> ScrollPosition {
        ScrollPosition::new(LineIndex::new(line), sub_line)
    }

    #[test]
    fn positions_order_by_line_then_sub_line() {
        assert!(pos(0, 5) < pos(1, 0));
        assert!(pos(1, 0) < pos(1, 1));
    }

    #[test]
    fn rows_is_one_without_wrapping() {
        let reader = Reader::from_text(None, "a very long line indeed\n");
        let layout = RowLayout::new(&reader, false, 4);
        assert_eq!(layout.rows(LineIndex::ZERO), 1);
    }

    #[test]
    fn rows_counts_wrapped_segments() {
        let reader = Reader::from_text(None, "aaaa bbbb cccc\n");
        let layout = RowLayout::new(&reader, true, 4);
        assert_eq!(layout.rows(LineIndex::ZERO), 3);
    }

    #[test]
    fn end_position_fills_viewport_from_bottom() {
        let reader = six_lines();
        let layout = RowLayout::new(&reader, false, 20);
        assert_eq!(layout.end_position(2), pos(4, 0));
        assert_eq!(layout.end_position(3), pos(3, 0));
    }

    #[test]
    fn end_position_pins_short_content_to_top() {
        let reader = six_lines();
        let layout = RowLayout::new(&reader, false, 20);
        assert_eq!(layout.end_position(10), pos(0, 0));
    }

    #[test]
    fn end_position_without_content_is_origin() {
        let reader = Reader::from_text(None, "");
        let layout = RowLayout::new(&reader, true, 20);
        assert_eq!(layout.end_position(5), ScrollPosition::default());
    }

    #[test]
    fn end_position_counts_wrapped_rows() {
        // Line 1 wraps into three rows at width 4
        let reader = Reader::from_text(None, "x\naaaa bbbb cccc\ny\n");
        let layout = RowLayout::new(&reader, true, 4);
        assert_eq!(layout.end_position(3), pos(1, 1));
    }

    #[test]
    fn advance_walks_sub_lines_then_lines() {
        let reader = Reader::from_text(None, "aaaa bbbb\nc\n");
        let layout = RowLayout::new(&reader, true, 4);
        assert_eq!(layout.advance(pos(0, 0), 1), pos(0, 1));
        assert_eq!(layout.advance(pos(0, 0), 2), pos(1, 0));
        assert_eq!(layout.advance(pos(0, 0), 99), pos(1, 0));
    }

    #[test]
    fn retreat_lands_on_last_sub_line_of_previous_line() {
        let reader = Reader::from_text(None, "aaaa bbbb\nc\n");
        let layout = RowLayout::new(&reader, true, 4);
        assert_eq!(layout.retreat(pos(1, 0), 1), pos(0, 1));
        assert_eq!(layout.retreat(pos(1, 0), 99), pos(0, 0));
    }

    #[test]
    fn clamp_pulls_back_positions_past_the_end() {
        let reader = six_lines();
        let layout = RowLayout::new(&reader, false, 20);
        assert_eq!(layout.clamp(pos(100, 0), 2), pos(4, 0));
        assert_eq!(layout.clamp(pos(5, 0), 2), pos(4, 0));
    }

    #[test]
    fn clamp_keeps_valid_positions() {
        let reader = six_lines();
        let layout = RowLayout::new(&reader, false, 20);
        assert_eq!(layout.clamp(pos(2, 0), 2), pos(2, 0));
    }

    #[test]
    fn clamp_fixes_sub_line_past_line_rows() {
        let reader = Reader::from_text(None, "aaaa bbbb\nc\nd\ne\n");
        let layout = RowLayout::new(&reader, true, 4);
        assert_eq!(layout.clamp(pos(0, 7), 2), pos(0, 1));
    }

    #[test]
    fn hit_in_line_reports_wrapped_row() {
        let reader = Reader::from_text(None, "aaaa bbbb cccc\n");
        let layout = RowLayout::new(&reader, true, 4);
        let pattern = crate::state::search::to_pattern("cc").unwrap();
        assert_eq!(layout.hit_in_line(&pattern, LineIndex::ZERO), Some(pos(0, 2)));
        assert_eq!(layout.hit_in_line(&pattern, LineIndex::new(1)), None);
    }

    #[test]
    fn hit_in_line_without_wrapping_is_first_row() {
        let reader = Reader::from_text(None, "aaaa bbbb cccc\n");
        let layout = RowLayout::new(&reader, false, 4);
        let pattern = crate::state::search::to_pattern("cc").unwrap();
        assert_eq!(layout.hit_in_line(&pattern, LineIndex::ZERO), Some(pos(0, 0)));
    }

    #[test]
    fn hit_in_rows_picks_nearest_row_for_direction() {
        let reader = Reader::from_text(None, "zzzz aaaa zzzz bbbb zzzz\n");
        let layout = RowLayout::new(&reader, true, 4);
        let pattern = crate::state::search::to_pattern("zz").unwrap();
        let line = LineIndex::ZERO;

        assert_eq!(
            layout.hit_in_rows(&pattern, line, 1..=usize::MAX, SearchDirection::Forward),
            Some(pos(0, 2))
        );
        assert_eq!(
            layout.hit_in_rows(&pattern, line, 0..=3, SearchDirection::Backward),
            Some(pos(0, 2))
        );
        assert_eq!(
            layout.hit_in_rows(&pattern, line, 0..=1, SearchDirection::Backward),
            Some(pos(0, 0))
        );
        assert_eq!(
            layout.hit_in_rows(&pattern, line, 3..=3, SearchDirection::Forward),
            None
        );
    }

    #[test]
    fn clamp_on_empty_content_is_origin() {
        let reader = Reader::from_text(None, "");
        let layout = RowLayout::new(&reader, false, 20);
        assert_eq!(layout.clamp(pos(3, 2), 2), ScrollPosition::default());
    }
}
