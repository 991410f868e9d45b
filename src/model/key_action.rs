//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions available while viewing content.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Keys typed into the search and goto-line prompts never go through
/// this mapping; the active input box consumes them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll up by one row. Default: k/↑
    ScrollUp,
    /// Scroll down by one row. Default: j/↓/Enter
    ScrollDown,
    /// Scroll horizontally left when line wrapping is disabled. Default: ←
    ScrollLeft,
    /// Scroll horizontally right when line wrapping is disabled. Default: →
    ScrollRight,
    /// Scroll up by one page. Default: b/Page Up
    PageUp,
    /// Scroll down by one page. Default: Space/f/Page Down
    PageDown,
    /// Jump to the first line. Default: </Home
    ScrollToTop,
    /// Jump so the last line is at the bottom. Default: >/G/End
    ScrollToBottom,

    // Search
    /// Open the search prompt, searching forward. Default: /
    StartSearchForward,
    /// Open the search prompt, searching backward. Default: ?
    StartSearchBackward,
    /// Move to the next hit in the committed search direction. Default: n
    NextMatch,
    /// Move to the next hit against the committed search direction. Default: N
    PrevMatch,

    // Navigation
    /// Open the goto-line prompt. Default: g/:
    GotoLine,

    // Display
    /// Toggle wrapping of long lines. Default: w
    ToggleWrap,
    /// Toggle the line number gutter. Default: #
    ToggleLineNumbers,
    /// Toggle the status bar. Default: =
    ToggleStatusBar,

    // Application
    /// Exit the pager. Default: q
    Quit,
}
