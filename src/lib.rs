//! pagr: an interactive terminal pager
//!
//! Pages through a file or piped input with incremental search, line
//! wrapping and goto-line. Input is read on a background thread, so the
//! pager is usable while content is still streaming in.
//!
//! The library splits into a pure core and an impure shell:
//! - [`state`] holds the pager state machine and is testable without a
//!   terminal.
//! - [`source`] reads content, [`view`] owns the terminal, and
//!   [`config`]/[`logging`] set things up at startup.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
