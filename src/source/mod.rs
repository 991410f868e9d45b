//! Content sources.
//!
//! Everything the pager shows comes through a [`Reader`]: a file, piped
//! stdin, or static text.

use crate::model::error::InputError;
use std::io::IsTerminal;
use std::path::PathBuf;

pub mod reader;

pub use reader::Reader;

/// Detect and open the appropriate input source.
///
/// # Logic:
/// 1. If a file path is provided: stream that file
/// 2. If stdin is piped: stream stdin
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for I/O errors while opening the file.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<Reader, InputError> {
    match file {
        Some(path) => Reader::from_file(path),
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(InputError::NoInput);
            }
            Ok(Reader::from_stream(None, stdin))
        }
    }
}
