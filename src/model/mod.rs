//! Domain model types (pure).

pub mod error;
pub mod key_action;
pub mod line_index;

// Re-export for convenience
pub use error::{AppError, InputError};
pub use key_action::KeyAction;
pub use line_index::LineIndex;
