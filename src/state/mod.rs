//! Pager state machine (pure).
//!
//! Everything here is testable without a terminal: keys go in through
//! [`Pager::handle_key`], rows come out through [`Pager::visible_rows`].

pub mod input_box;
pub mod mode;
pub mod pager;
pub mod scroll;
pub mod search;
pub mod wrap;

// Re-export for convenience
pub use input_box::{InputBox, InputFilter};
pub use mode::{GotoLineMode, PagerMode, SearchMode};
pub use pager::{Pager, ViewportDimensions, VisibleRow};
pub use scroll::{RowLayout, ScrollPosition};
pub use search::{to_pattern, SearchDirection, SearchPattern};
pub use wrap::wrap_line;
