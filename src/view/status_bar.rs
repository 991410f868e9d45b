//! Status row: position summary or the active prompt.

use super::styles::PagerStyles;
use crate::state::{InputBox, Pager, PagerMode, SearchDirection};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// Name shown for content without a file name, such as piped input.
const UNNAMED: &str = "stdin";

/// Status text for Viewing mode: `name: first-last/count pct%`.
pub fn position_text(pager: &Pager) -> String {
    let reader = pager.reader();
    let name = reader.name().unwrap_or(UNNAMED);
    // Lines may arrive while this runs; everything is measured against one count
    let count = reader.line_count();

    let range = pager.visible_line_range().filter(|_| count > 0);
    let Some((first, last)) = range else {
        return format!("{name}: <empty>");
    };

    let last = last.display().min(count);
    let first = first.display().min(last);
    let percent = last * 100 / count;
    format!("{name}: {first}-{last}/{count} {percent}%")
}

/// Label in front of the prompt text.
fn prompt_label(mode: &PagerMode) -> &'static str {
    match mode {
        PagerMode::Search(search) => match search.direction() {
            SearchDirection::Forward => "Search: ",
            SearchDirection::Backward => "Search backwards: ",
        },
        PagerMode::GotoLine(_) => "Go to line number: ",
        PagerMode::Viewing | PagerMode::NotFound => "",
    }
}

/// Widget for the bottom row.
pub struct StatusBar<'a> {
    pager: &'a Pager,
    styles: &'a PagerStyles,
}

impl<'a> StatusBar<'a> {
    /// Create a status bar for `pager`.
    pub fn new(pager: &'a Pager, styles: &'a PagerStyles) -> Self {
        Self { pager, styles }
    }

    fn prompt_line(&self, label: &'static str, input_box: &InputBox) -> Line<'static> {
        let text = input_box.text();
        let before: String = text.chars().take(input_box.cursor()).collect();
        let mut after = text.chars().skip(input_box.cursor());
        let under_cursor = after.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = after.collect();

        Line::from(vec![
            Span::raw(label),
            Span::raw(before),
            Span::styled(under_cursor, self.styles.cursor),
            Span::raw(after),
        ])
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = self.pager.mode();
        let line = match mode {
            PagerMode::Viewing => {
                Line::styled(position_text(self.pager), self.styles.status)
            }
            PagerMode::NotFound => Line::styled(
                format!("Not found: {}", self.pager.search_string()),
                self.styles.status,
            ),
            PagerMode::Search(search) => self.prompt_line(prompt_label(mode), search.input_box()),
            PagerMode::GotoLine(goto) => self.prompt_line(prompt_label(mode), goto.input_box()),
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
