//! Screen read-back tests for the pager widget.

use super::*;
use crate::source::Reader;
use crate::state::SearchDirection;
use ratatui::backend::TestBackend;
use ratatui::style::Modifier;
use ratatui::Terminal;

// ===== Test Helpers =====

fn draw(pager: &Pager) -> Terminal<TestBackend> {
    let viewport = pager.viewport();
    let mut terminal = Terminal::new(TestBackend::new(viewport.width, viewport.height)).unwrap();
    let styles = PagerStyles::default();
    terminal
        .draw(|frame| frame.render_widget(PagerView::new(pager, &styles), frame.area()))
        .unwrap();
    terminal
}

fn screen_rows(pager: &Pager) -> Vec<String> {
    let terminal = draw(pager);
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn pager_with(text: &str, width: u16, height: u16) -> Pager {
    let mut pager = Pager::new(Reader::from_text(Some("test.txt"), text));
    pager.set_viewport(width, height);
    pager
}

// ===== Content rows =====

#[test]
fn renders_numbered_rows_and_status() {
    let pager = pager_with("alpha\nbeta\ngamma\n", 20, 3);
    assert_eq!(
        screen_rows(&pager),
        vec!["1 alpha", "2 beta", "test.txt: 1-2/3 66%"]
    );
}

#[test]
fn gutter_right_aligns_numbers() {
    let text: String = (1..=10).map(|n| format!("line {n}\n")).collect();
    let mut pager = pager_with(&text, 20, 4);
    pager.scroll_to_end();
    assert_eq!(
        screen_rows(&pager)[..3],
        [" 8 line 8", " 9 line 9", "10 line 10"]
    );
}

#[test]
fn without_status_bar_every_row_is_content() {
    let mut pager = pager_with("a\nb\nc\nd\n", 20, 3);
    pager.set_show_status_bar(false);
    pager.set_show_line_numbers(false);
    assert_eq!(screen_rows(&pager), vec!["a", "b", "c"]);
}

#[test]
fn wrapped_continuation_rows_have_blank_gutter() {
    let mut pager = pager_with("aaaa bbbb\nc\n", 6, 4);
    pager.set_wrap_long_lines(true);
    assert_eq!(screen_rows(&pager)[..3], ["1 aaaa", "  bbbb", "2 c"]);
}

#[test]
fn sub_line_hit_row_is_rendered() {
    let mut pager = Pager::new(Reader::from_text(
        None,
        "1miss 2träff 3miss 4miss 5träff 6miss 7miss 8träff 9miss",
    ));
    pager.set_wrap_long_lines(true);
    pager.set_show_status_bar(false);
    pager.set_show_line_numbers(false);
    pager.set_viewport(10, 3);

    pager.start_search(SearchDirection::Forward);
    pager.set_input_text("träff");

    // The prompt overlays the bottom row while typing
    let rows = screen_rows(&pager);
    assert!(rows.contains(&"2träff".to_string()), "rows: {rows:?}");
    assert!(rows[2].starts_with("Search: "), "rows: {rows:?}");
}

#[test]
fn long_lines_are_truncated_and_shift_with_left_column() {
    let mut pager = pager_with("0123456789abcdefghijklmnopqrstuvwxyz\n", 12, 2);
    pager.set_show_line_numbers(false);
    assert_eq!(screen_rows(&pager)[0], "0123456789ab");

    pager.scroll_right();
    assert_eq!(screen_rows(&pager)[0], "ghijklmnopqr");
}

#[test]
fn wide_character_cut_by_left_edge_becomes_space() {
    let row = VisibleRow {
        line: crate::model::LineIndex::ZERO,
        sub_line: 0,
        text: "a世界".to_string(),
        hits: Vec::new(),
    };
    let spans = text_spans(&row, 2, Style::default());
    let text: String = spans.iter().map(|span| span.content.as_ref()).collect();
    assert_eq!(text, " 界");
}

// ===== Highlighting =====

#[test]
fn committed_hits_are_reversed() {
    let mut pager = pager_with("xx needle yy\n", 20, 2);
    pager.set_show_line_numbers(false);
    pager.set_search_string("needle");

    let terminal = draw(&pager);
    let buffer = terminal.backend().buffer();

    assert!(buffer[(3, 0)].modifier.contains(Modifier::REVERSED));
    assert!(buffer[(8, 0)].modifier.contains(Modifier::REVERSED));
    assert!(!buffer[(2, 0)].modifier.contains(Modifier::REVERSED));
    assert!(!buffer[(9, 0)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn text_spans_split_at_hit_boundaries() {
    let row = VisibleRow {
        line: crate::model::LineIndex::ZERO,
        sub_line: 0,
        text: "ab cd ab".to_string(),
        hits: vec![0..2, 6..8],
    };
    let spans = text_spans(&row, 0, Style::default().add_modifier(Modifier::REVERSED));
    let parts: Vec<&str> = spans.iter().map(|span| span.content.as_ref()).collect();
    assert_eq!(parts, vec!["ab", " cd ", "ab"]);
}

// ===== Status row =====

#[test]
fn not_found_status_is_shown() {
    let mut pager = pager_with("a\nb\n", 20, 3);
    pager.set_search_string("nope");
    pager.scroll_to_next_search_hit();
    assert_eq!(screen_rows(&pager)[2], "Not found: nope");
}

#[test]
fn hidden_status_bar_draws_nothing_when_viewing() {
    let mut pager = pager_with("a\n", 20, 3);
    pager.set_show_status_bar(false);
    assert_eq!(screen_rows(&pager), vec!["1 a", "", ""]);
}

#[test]
fn goto_prompt_replaces_status() {
    let mut pager = pager_with("a\nb\nc\n", 30, 3);
    pager.start_goto_line();
    pager.set_input_text("2");
    assert_eq!(screen_rows(&pager)[2], "Go to line number: 2");
}
