//! Pager widget: content rows plus the status row.

use super::status_bar::StatusBar;
use super::styles::PagerStyles;
use crate::state::{Pager, VisibleRow};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Draws a [`Pager`] into the full frame.
///
/// The status row is drawn on the bottom row when the status bar is on.
/// With it off, the search and goto-line prompts still take over the
/// bottom row while active.
pub struct PagerView<'a> {
    pager: &'a Pager,
    styles: &'a PagerStyles,
}

impl<'a> PagerView<'a> {
    /// Create a view of `pager`.
    pub fn new(pager: &'a Pager, styles: &'a PagerStyles) -> Self {
        Self { pager, styles }
    }

    fn row_line(&self, row: &VisibleRow) -> Line<'static> {
        let mut spans = Vec::new();

        let gutter_width = self.pager.gutter_width();
        if gutter_width > 0 {
            let number = if row.sub_line == 0 {
                row.line.display().to_string()
            } else {
                String::new()
            };
            let digits = gutter_width - 1;
            spans.push(Span::styled(format!("{number:>digits$} "), self.styles.gutter));
        }

        let left_column = if self.pager.wrap_long_lines() {
            0
        } else {
            self.pager.left_column()
        };
        spans.extend(text_spans(row, left_column, self.styles.hit));

        Line::from(spans)
    }
}

/// Split `row` into plain and hit spans, dropping the first `left_column`
/// display columns.
///
/// A wide character cut by the left edge is replaced by spaces so the
/// rest of the row keeps its columns.
fn text_spans(row: &VisibleRow, left_column: usize, hit_style: Style) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_is_hit = false;
    let mut column = 0;

    for (offset, ch) in row.text.char_indices() {
        let width = ch.width().unwrap_or(0);
        let start = column;
        column += width;
        if column <= left_column {
            continue;
        }

        let is_hit = row.hits.iter().any(|hit| hit.contains(&offset));
        if is_hit != current_is_hit && !current.is_empty() {
            spans.push(styled_span(std::mem::take(&mut current), current_is_hit, hit_style));
        }
        current_is_hit = is_hit;

        if start < left_column {
            current.push_str(&" ".repeat(column - left_column));
        } else {
            current.push(ch);
        }
    }

    if !current.is_empty() {
        spans.push(styled_span(current, current_is_hit, hit_style));
    }
    spans
}

fn styled_span(text: String, is_hit: bool, hit_style: Style) -> Span<'static> {
    if is_hit {
        Span::styled(text, hit_style)
    } else {
        Span::raw(text)
    }
}

impl Widget for PagerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let content_rows = u16::try_from(self.pager.content_height())
            .unwrap_or(u16::MAX)
            .min(area.height);

        for (offset, row) in (0..content_rows).zip(self.pager.visible_rows()) {
            let line = self.row_line(&row);
            buf.set_line(area.x, area.y + offset, &line, area.width);
        }

        let prompting = self.pager.mode().input_box().is_some();
        if self.pager.show_status_bar() || prompting {
            let status_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            Clear.render(status_area, buf);
            StatusBar::new(self.pager, self.styles).render(status_area, buf);
        }
    }
}

#[cfg(test)]
#[path = "pager_view_tests.rs"]
mod tests;
