//! The pager core: mode, scroll position and search navigation.
//!
//! All mutation of the scroll position and the mode goes through `Pager`
//! methods. Key events arrive one at a time through [`Pager::handle_key`]
//! and run to completion before the next one; there is no background
//! scanning.
//!
//! # Streaming content
//! Searches never block waiting for input. Lines that have not arrived yet
//! end the scan just like the end of the content does, and the next hit
//! navigation sees whatever arrived in the meantime.

use super::mode::{GotoLineMode, PagerMode, SearchMode};
use super::scroll::{RowLayout, ScrollPosition};
use super::search::{to_pattern, SearchDirection, SearchPattern};
use crate::config::KeyBindings;
use crate::model::{KeyAction, LineIndex};
use crate::source::Reader;
use crossterm::event::KeyEvent;
use std::ops::Range;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

/// Columns moved per horizontal scroll step.
const HORIZONTAL_STEP: usize = 16;

/// Viewport dimensions in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportDimensions {
    /// Width in terminal columns.
    pub width: u16,
    /// Height in terminal rows.
    pub height: u16,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportDimensions {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// One display row of content, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    /// Logical line this row belongs to.
    pub line: LineIndex,
    /// Wrapped segment of `line`, 0 for the line's first row.
    pub sub_line: usize,
    /// Row text. The whole line when wrapping is off.
    pub text: String,
    /// Byte ranges of search hits within `text`.
    pub hits: Vec<Range<usize>>,
}

/// Interactive pager over the lines of a [`Reader`].
#[derive(Debug)]
pub struct Pager {
    reader: Reader,
    mode: PagerMode,
    scroll_position: ScrollPosition,
    viewport: ViewportDimensions,
    left_column: usize,

    search_string: String,
    search_pattern: Option<SearchPattern>,
    search_direction: SearchDirection,
    /// Pattern being typed in the search prompt, not yet committed.
    preview_pattern: Option<SearchPattern>,

    key_bindings: KeyBindings,

    wrap_long_lines: bool,
    show_status_bar: bool,
    show_line_numbers: bool,
}

impl Pager {
    /// Create a pager at the top of `reader`, in Viewing mode.
    pub fn new(reader: Reader) -> Self {
        Self {
            reader,
            mode: PagerMode::Viewing,
            scroll_position: ScrollPosition::default(),
            viewport: ViewportDimensions::default(),
            left_column: 0,
            search_string: String::new(),
            search_pattern: None,
            search_direction: SearchDirection::Forward,
            preview_pattern: None,
            key_bindings: KeyBindings::default(),
            wrap_long_lines: false,
            show_status_bar: true,
            show_line_numbers: true,
        }
    }

    // ===== Accessors =====

    /// The content being paged.
    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    /// The active mode.
    pub fn mode(&self) -> &PagerMode {
        &self.mode
    }

    /// Display label of the active mode.
    pub fn mode_name(&self) -> &'static str {
        self.mode.name()
    }

    /// Row at the top of the content area.
    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll_position
    }

    /// Logical line at the top of the content area.
    pub fn line_index(&self) -> LineIndex {
        self.scroll_position.line()
    }

    /// Current screen size.
    pub fn viewport(&self) -> ViewportDimensions {
        self.viewport
    }

    /// First displayed column when long lines are not wrapped.
    pub fn left_column(&self) -> usize {
        self.left_column
    }

    /// The committed search query, empty when there is none.
    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    /// The committed search pattern.
    pub fn search_pattern(&self) -> Option<&SearchPattern> {
        self.search_pattern.as_ref()
    }

    /// Direction of the committed search.
    pub fn search_direction(&self) -> SearchDirection {
        self.search_direction
    }

    /// Pattern to highlight: the one being typed while searching, otherwise
    /// the committed one.
    pub fn highlight_pattern(&self) -> Option<&SearchPattern> {
        match self.mode {
            PagerMode::Search(_) => self.preview_pattern.as_ref(),
            _ => self.search_pattern.as_ref(),
        }
    }

    /// Whether long lines wrap onto several rows.
    pub fn wrap_long_lines(&self) -> bool {
        self.wrap_long_lines
    }

    /// Whether the bottom row is reserved for the status bar.
    pub fn show_status_bar(&self) -> bool {
        self.show_status_bar
    }

    /// Whether a line number gutter is shown.
    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    // ===== Configuration =====

    /// Replace the key bindings used in Viewing mode.
    pub fn set_key_bindings(&mut self, key_bindings: KeyBindings) {
        self.key_bindings = key_bindings;
    }

    /// Update the screen size, e.g. after a resize.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        debug!(width, height, "Viewport changed");
        self.viewport = ViewportDimensions::new(width, height);
        self.clamp();
    }

    /// Enable or disable wrapping. Keeps the top logical line in view.
    pub fn set_wrap_long_lines(&mut self, wrap: bool) {
        self.wrap_long_lines = wrap;
        self.left_column = 0;
        self.scroll_position = ScrollPosition::at_line(self.scroll_position.line());
        self.clamp();
    }

    /// Reserve, or stop reserving, the bottom row for the status bar.
    pub fn set_show_status_bar(&mut self, show: bool) {
        self.show_status_bar = show;
        self.clamp();
    }

    /// Show or hide the line number gutter.
    pub fn set_show_line_numbers(&mut self, show: bool) {
        self.show_line_numbers = show;
        self.clamp();
    }

    // ===== Geometry =====

    /// Rows available for content: the screen minus the status bar row.
    pub fn content_height(&self) -> usize {
        let reserved = usize::from(self.show_status_bar);
        usize::from(self.viewport.height)
            .saturating_sub(reserved)
            .max(1)
    }

    /// Width of the line number gutter including its separator, 0 when hidden.
    pub fn gutter_width(&self) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let digits = self.reader.line_count().max(1).to_string().len();
        digits + 1
    }

    /// Columns available for line text.
    pub fn content_width(&self) -> usize {
        usize::from(self.viewport.width)
            .saturating_sub(self.gutter_width())
            .max(1)
    }

    fn layout(&self) -> RowLayout<'_> {
        RowLayout::new(&self.reader, self.wrap_long_lines, self.content_width())
    }

    /// Row at the bottom of the content area, or the last row of content if
    /// the content ends above it.
    pub fn last_visible_position(&self) -> ScrollPosition {
        self.layout()
            .advance(self.scroll_position, self.content_height() - 1)
    }

    /// First and last logical line with at least one visible row.
    pub fn visible_line_range(&self) -> Option<(LineIndex, LineIndex)> {
        if self.reader.line_count() == 0 {
            return None;
        }
        Some((
            self.scroll_position.line(),
            self.last_visible_position().line(),
        ))
    }

    /// The rows currently in the content area, top to bottom.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let layout = self.layout();
        let height = self.content_height();
        let pattern = self.highlight_pattern();

        let mut rows = Vec::with_capacity(height);
        let mut line = self.scroll_position.line();
        let mut first_sub_line = self.scroll_position.sub_line();

        while rows.len() < height {
            let Some(text) = self.reader.line(line) else {
                break;
            };
            let hits = pattern.map(|p| p.find_ranges(&text)).unwrap_or_default();

            for (sub_line, segment) in layout.segments(&text).into_iter().enumerate() {
                if sub_line < first_sub_line {
                    continue;
                }
                if rows.len() >= height {
                    break;
                }
                rows.push(VisibleRow {
                    line,
                    sub_line,
                    text: text[segment.clone()].to_string(),
                    hits: clip_hits(&hits, &segment),
                });
            }

            first_sub_line = 0;
            line = line.next();
        }

        rows
    }

    // ===== Scrolling =====

    /// Restore the scroll position invariants after any change.
    fn clamp(&mut self) {
        let position = self
            .layout()
            .clamp(self.scroll_position, self.content_height());
        self.scroll_position = position;
    }

    /// Scroll so the last line is on the bottom content row.
    pub fn scroll_to_end(&mut self) {
        self.scroll_position = self.layout().end_position(self.content_height());
    }

    /// Scroll to the first line.
    pub fn scroll_to_top(&mut self) {
        self.scroll_position = ScrollPosition::default();
    }

    /// Scroll down by display rows.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_position = self.layout().advance(self.scroll_position, rows);
        self.clamp();
    }

    /// Scroll up by display rows.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_position = self.layout().retreat(self.scroll_position, rows);
    }

    /// Shift unwrapped lines right, revealing text further left.
    pub fn scroll_left(&mut self) {
        self.left_column = self.left_column.saturating_sub(HORIZONTAL_STEP);
    }

    /// Shift unwrapped lines left, revealing text further right. Stops once
    /// the widest visible line's end is on screen.
    pub fn scroll_right(&mut self) {
        if self.wrap_long_lines {
            return;
        }
        let widest = self
            .visible_rows()
            .iter()
            .map(|row| row.text.width())
            .max()
            .unwrap_or(0);
        let max_column = widest.saturating_sub(self.content_width());
        self.left_column = (self.left_column + HORIZONTAL_STEP).min(max_column);
    }

    /// Put `line` at the top of the content area, clamped to the content.
    pub fn goto_line(&mut self, line: LineIndex) {
        debug!(line = line.display(), "Going to line");
        self.scroll_position = ScrollPosition::at_line(line);
        self.clamp();
    }

    /// Put `position` at the top of the content area, clamped.
    fn show_row_at_top(&mut self, position: ScrollPosition) {
        self.scroll_position = position;
        self.clamp();
    }

    /// Put `position` on the bottom content row, clamped.
    fn show_row_at_bottom(&mut self, position: ScrollPosition) {
        self.scroll_position = self
            .layout()
            .retreat(position, self.content_height() - 1);
        self.clamp();
    }

    /// Put the last row of `hit`'s line on the bottom content row, unless
    /// that pushes the hit row itself above the top.
    fn show_line_ending_at_bottom(&mut self, hit: ScrollPosition) {
        let layout = self.layout();
        let line_end = ScrollPosition::new(hit.line(), layout.rows(hit.line()) - 1);
        let top = layout.retreat(line_end, self.content_height() - 1);
        self.scroll_position = top.min(hit);
        self.clamp();
    }

    // ===== Search =====

    /// Commit a search query without going through the prompt.
    pub fn set_search_string(&mut self, query: &str) {
        self.search_string = query.to_string();
        self.search_pattern = to_pattern(query);
    }

    /// Move to the next hit in the forward direction.
    ///
    /// From Viewing, the scan starts on the row below the last visible one,
    /// so hidden rows of a partly visible line are searched too, and stops
    /// at the end of the content; without a hit the mode
    /// becomes NotFound and the position does not change. From NotFound
    /// the scan restarts at the first line.
    pub fn scroll_to_next_search_hit(&mut self) {
        self.scroll_to_search_hit(SearchDirection::Forward);
    }

    /// Mirror of [`scroll_to_next_search_hit`](Self::scroll_to_next_search_hit)
    /// scanning towards the first line; wraps to the last line from NotFound.
    pub fn scroll_to_previous_search_hit(&mut self) {
        self.scroll_to_search_hit(SearchDirection::Backward);
    }

    /// Put the first hit of the committed search on the top row, scanning
    /// from the first line.
    ///
    /// Returns false, leaving the view alone, if nothing has matched yet.
    pub fn scroll_to_first_search_hit(&mut self) -> bool {
        let Some(pattern) = self.search_pattern.clone() else {
            return false;
        };
        match self.find_first_hit(&pattern, LineIndex::ZERO, SearchDirection::Forward) {
            Some(hit) => {
                self.show_row_at_top(hit);
                true
            }
            None => false,
        }
    }

    fn scroll_to_search_hit(&mut self, direction: SearchDirection) {
        let Some(pattern) = self.search_pattern.clone() else {
            debug!("No search pattern, nothing to scroll to");
            return;
        };

        let hit = match self.mode {
            PagerMode::Viewing => self.find_hit_beyond_view(&pattern, direction),
            PagerMode::NotFound => {
                let start = match direction {
                    SearchDirection::Forward => Some(LineIndex::ZERO),
                    SearchDirection::Backward => {
                        self.reader.line_count().checked_sub(1).map(LineIndex::new)
                    }
                };
                start.and_then(|start| self.find_first_hit(&pattern, start, direction))
            }
            PagerMode::Search(_) | PagerMode::GotoLine(_) => {
                unreachable!("search hits are navigated from Viewing or NotFound only")
            }
        };

        let Some(hit) = hit else {
            info!(query = pattern.query(), ?direction, "No search hit");
            self.set_mode(PagerMode::NotFound);
            return;
        };

        debug!(line = hit.line().display(), sub_line = hit.sub_line(), "Search hit");
        self.set_mode(PagerMode::Viewing);
        match direction {
            SearchDirection::Forward => self.show_line_ending_at_bottom(hit),
            SearchDirection::Backward => self.show_row_at_top(hit),
        }
    }

    /// First hit outside the viewport in `direction`.
    ///
    /// The scan begins one display row past the edge of the view. When that
    /// row belongs to a line that is partly on screen, only the hidden rows
    /// of that line count before moving on to the next whole line.
    fn find_hit_beyond_view(
        &self,
        pattern: &SearchPattern,
        direction: SearchDirection,
    ) -> Option<ScrollPosition> {
        let layout = self.layout();
        let (edge, beyond) = match direction {
            SearchDirection::Forward => {
                let edge = self.last_visible_position();
                (edge, layout.advance(edge, 1))
            }
            SearchDirection::Backward => {
                let edge = self.scroll_position;
                (edge, layout.retreat(edge, 1))
            }
        };
        if beyond == edge {
            return None;
        }
        if beyond.line() != edge.line() {
            return self.find_first_hit(pattern, beyond.line(), direction);
        }

        let line = beyond.line();
        match direction {
            SearchDirection::Forward => layout
                .hit_in_rows(pattern, line, beyond.sub_line()..=usize::MAX, direction)
                .or_else(|| self.find_first_hit(pattern, line.next(), direction)),
            SearchDirection::Backward => layout
                .hit_in_rows(pattern, line, 0..=beyond.sub_line(), direction)
                .or_else(|| {
                    let previous = line.checked_prev()?;
                    self.find_first_hit(pattern, previous, direction)
                }),
        }
    }

    /// First hit at or beyond `start` in `direction`.
    ///
    /// The line count is re-read on every step, so lines arriving during
    /// the scan are included and lines that never arrive end it.
    fn find_first_hit(
        &self,
        pattern: &SearchPattern,
        start: LineIndex,
        direction: SearchDirection,
    ) -> Option<ScrollPosition> {
        let layout = self.layout();
        match direction {
            SearchDirection::Forward => {
                let mut line = start;
                while line.index() < self.reader.line_count() {
                    if let Some(hit) = layout.hit_in_line(pattern, line) {
                        return Some(hit);
                    }
                    line = line.next();
                }
                None
            }
            SearchDirection::Backward => {
                let last = self.reader.line_count().checked_sub(1)?;
                (0..=start.index().min(last))
                    .rev()
                    .find_map(|index| layout.hit_in_line(pattern, LineIndex::new(index)))
            }
        }
    }

    /// Scroll for a query being typed, starting over from `origin`.
    ///
    /// A hit that is already visible from `origin` leaves the view alone.
    /// Otherwise forward searches put the hit row on top, backward searches
    /// put it at the bottom.
    pub(crate) fn live_search(
        &mut self,
        query: &str,
        origin: ScrollPosition,
        direction: SearchDirection,
    ) {
        self.scroll_position = origin;
        self.clamp();
        self.preview_pattern = to_pattern(query);
        let Some(pattern) = self.preview_pattern.clone() else {
            return;
        };

        let top = self.scroll_position;
        let bottom = self.last_visible_position();
        let start = match direction {
            SearchDirection::Forward => top.line(),
            SearchDirection::Backward => bottom.line(),
        };

        let Some(hit) = self.find_first_hit(&pattern, start, direction) else {
            debug!(query, "Live search found nothing");
            return;
        };
        if top <= hit && hit <= bottom {
            return;
        }

        match direction {
            SearchDirection::Forward => self.show_row_at_top(hit),
            SearchDirection::Backward => self.show_row_at_bottom(hit),
        }
    }

    pub(crate) fn commit_search(&mut self, query: &str, direction: SearchDirection) {
        info!(query, ?direction, "Search committed");
        self.set_search_string(query);
        self.search_direction = direction;
        self.preview_pattern = None;
    }

    pub(crate) fn cancel_search(&mut self, origin: ScrollPosition) {
        debug!("Search cancelled");
        self.scroll_position = origin;
        self.preview_pattern = None;
        self.clamp();
    }

    pub(crate) fn confirm_goto_line(&mut self, text: &str) {
        match text.parse::<usize>() {
            Ok(number) => self.goto_line(LineIndex::from_one_based(number)),
            Err(error) => debug!(text, %error, "Ignoring goto-line input"),
        }
    }

    // ===== Modes =====

    fn set_mode(&mut self, mode: PagerMode) {
        if self.mode.name() != mode.name() {
            debug!(from = self.mode.name(), to = mode.name(), "Mode change");
        }
        self.mode = mode;
    }

    /// Open the search prompt. Live search starts from the current position.
    pub fn start_search(&mut self, direction: SearchDirection) {
        self.preview_pattern = None;
        self.set_mode(PagerMode::Search(SearchMode::new(
            self.scroll_position,
            direction,
        )));
    }

    /// Open the goto-line prompt.
    pub fn start_goto_line(&mut self) {
        self.set_mode(PagerMode::GotoLine(GotoLineMode::new()));
    }

    /// Replace the text of the active prompt, as if typed.
    ///
    /// Fires the prompt's change callback. Does nothing outside the prompt
    /// modes.
    pub fn set_input_text(&mut self, text: &str) {
        let mut mode = std::mem::take(&mut self.mode);
        if let Some(input_box) = mode.input_box_mut() {
            input_box.set_text(text, self);
        }
        self.mode = mode;
    }

    /// Handle one key press. Returns true if the pager should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Prompt modes are detached while they run so their input box
        // callbacks can borrow the pager mutably
        match std::mem::take(&mut self.mode) {
            PagerMode::Search(search) => {
                let next = search.handle_key(key, self);
                self.set_mode(next);
                false
            }
            PagerMode::GotoLine(goto) => {
                let next = goto.handle_key(key, self);
                self.set_mode(next);
                false
            }
            stateless => {
                self.mode = stateless;
                self.handle_viewing_key(key)
            }
        }
    }

    fn handle_viewing_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        if !matches!(action, KeyAction::NextMatch | KeyAction::PrevMatch) {
            self.set_mode(PagerMode::Viewing);
        }

        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollUp => self.scroll_up(1),
            KeyAction::ScrollDown => self.scroll_down(1),
            KeyAction::PageUp => self.scroll_up(self.content_height()),
            KeyAction::PageDown => self.scroll_down(self.content_height()),
            KeyAction::ScrollToTop => self.scroll_to_top(),
            KeyAction::ScrollToBottom => self.scroll_to_end(),
            KeyAction::ScrollLeft => self.scroll_left(),
            KeyAction::ScrollRight => self.scroll_right(),
            KeyAction::StartSearchForward => self.start_search(SearchDirection::Forward),
            KeyAction::StartSearchBackward => self.start_search(SearchDirection::Backward),
            KeyAction::NextMatch => self.scroll_to_search_hit(self.search_direction),
            KeyAction::PrevMatch => self.scroll_to_search_hit(self.search_direction.reversed()),
            KeyAction::GotoLine => self.start_goto_line(),
            KeyAction::ToggleWrap => self.set_wrap_long_lines(!self.wrap_long_lines),
            KeyAction::ToggleLineNumbers => self.set_show_line_numbers(!self.show_line_numbers),
            KeyAction::ToggleStatusBar => self.set_show_status_bar(!self.show_status_bar),
        }
        false
    }
}

/// Intersect `hits` with `segment`, relative to the segment start.
fn clip_hits(hits: &[Range<usize>], segment: &Range<usize>) -> Vec<Range<usize>> {
    hits.iter()
        .filter_map(|hit| {
            let start = hit.start.max(segment.start);
            let end = hit.end.min(segment.end);
            (start < end).then(|| start - segment.start..end - segment.start)
        })
        .collect()
}

// ===== Tests =====

#[cfg(test)]
#[path = "pager_tests.rs"]
mod tests;
