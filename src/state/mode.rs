//! Pager mode state machine.
//!
//! PagerMode is a sum type: exactly one mode is active, and switching
//! replaces it wholesale. The stateless modes are handled by the pager's
//! key bindings; the prompt modes own an [`InputBox`] and consume keys
//! themselves.

use super::input_box::{InputBox, InputFilter};
use super::pager::Pager;
use super::scroll::ScrollPosition;
use super::search::SearchDirection;
use crossterm::event::{KeyCode, KeyEvent};

// ===== PagerMode =====

/// The active pager mode.
#[derive(Debug, Default)]
pub enum PagerMode {
    /// Plain viewing. The default.
    #[default]
    Viewing,
    /// The last hit navigation reached the end of the content without a
    /// hit. The next hit navigation wraps around; anything else returns to
    /// Viewing.
    NotFound,
    /// Typing a search query.
    Search(SearchMode),
    /// Typing a line number to jump to.
    GotoLine(GotoLineMode),
}

impl PagerMode {
    /// Display label of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Viewing => "Viewing",
            Self::NotFound => "NotFound",
            Self::Search(_) => "Search",
            Self::GotoLine(_) => "GotoLine",
        }
    }

    /// The prompt's input box, for modes that have one.
    pub fn input_box(&self) -> Option<&InputBox> {
        match self {
            Self::Search(search) => Some(&search.input_box),
            Self::GotoLine(goto) => Some(&goto.input_box),
            Self::Viewing | Self::NotFound => None,
        }
    }

    pub(crate) fn input_box_mut(&mut self) -> Option<&mut InputBox> {
        match self {
            Self::Search(search) => Some(&mut search.input_box),
            Self::GotoLine(goto) => Some(&mut goto.input_box),
            Self::Viewing | Self::NotFound => None,
        }
    }
}

// ===== SearchMode =====

/// State of the search prompt.
#[derive(Debug)]
pub struct SearchMode {
    input_box: InputBox,
    origin: ScrollPosition,
    direction: SearchDirection,
}

impl SearchMode {
    /// Start a search prompt. `origin` is restored on cancel and is where
    /// live search starts looking from.
    pub fn new(origin: ScrollPosition, direction: SearchDirection) -> Self {
        let input_box = InputBox::new(InputFilter::Any).with_on_text_changed(move |pager, text| {
            pager.live_search(text, origin, direction);
        });
        Self {
            input_box,
            origin,
            direction,
        }
    }

    /// Scroll position when the prompt was opened.
    pub fn origin(&self) -> ScrollPosition {
        self.origin
    }

    /// Direction this search scans in.
    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// The query being typed.
    pub fn input_box(&self) -> &InputBox {
        &self.input_box
    }

    pub(crate) fn handle_key(mut self, key: KeyEvent, pager: &mut Pager) -> PagerMode {
        match key.code {
            KeyCode::Esc => {
                pager.cancel_search(self.origin);
                PagerMode::Viewing
            }
            KeyCode::Enter => {
                pager.commit_search(self.input_box.text(), self.direction);
                PagerMode::Viewing
            }
            _ => {
                self.input_box.handle_key(key, pager);
                PagerMode::Search(self)
            }
        }
    }
}

// ===== GotoLineMode =====

/// State of the goto-line prompt.
#[derive(Debug)]
pub struct GotoLineMode {
    input_box: InputBox,
}

impl Default for GotoLineMode {
    fn default() -> Self {
        Self::new()
    }
}

impl GotoLineMode {
    /// Start a goto-line prompt accepting digits only.
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(InputFilter::Digits),
        }
    }

    /// The line number being typed.
    pub fn input_box(&self) -> &InputBox {
        &self.input_box
    }

    pub(crate) fn handle_key(mut self, key: KeyEvent, pager: &mut Pager) -> PagerMode {
        match key.code {
            KeyCode::Esc => PagerMode::Viewing,
            KeyCode::Enter => {
                pager.confirm_goto_line(self.input_box.text());
                PagerMode::Viewing
            }
            _ => {
                self.input_box.handle_key(key, pager);
                PagerMode::GotoLine(self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_viewing() {
        assert_eq!(PagerMode::default().name(), "Viewing");
    }

    #[test]
    fn names_are_distinct() {
        let modes = [
            PagerMode::Viewing,
            PagerMode::NotFound,
            PagerMode::Search(SearchMode::new(
                ScrollPosition::default(),
                SearchDirection::Forward,
            )),
            PagerMode::GotoLine(GotoLineMode::new()),
        ];
        let names: Vec<_> = modes.iter().map(PagerMode::name).collect();
        assert_eq!(names, vec!["Viewing", "NotFound", "Search", "GotoLine"]);
    }

    #[test]
    fn only_prompt_modes_have_input_boxes() {
        assert!(PagerMode::Viewing.input_box().is_none());
        assert!(PagerMode::NotFound.input_box().is_none());
        assert!(PagerMode::GotoLine(GotoLineMode::new()).input_box().is_some());
    }

    #[test]
    fn search_mode_starts_empty_with_origin_and_direction() {
        let origin = ScrollPosition::at_line(crate::model::LineIndex::new(3));
        let search = SearchMode::new(origin, SearchDirection::Backward);
        assert_eq!(search.input_box().text(), "");
        assert_eq!(search.origin(), origin);
        assert_eq!(search.direction(), SearchDirection::Backward);
    }
}
