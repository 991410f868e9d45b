//! Line buffer shared between a background reading thread and the pager.
//!
//! The pager only ever sees what has arrived so far. `line_count()` may grow
//! between two calls, so callers re-query it instead of caching it.

use crate::model::error::InputError;
use crate::model::LineIndex;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;
use tracing::{info, warn};

/// Tab stops are every this many columns.
const TAB_WIDTH: usize = 8;

#[derive(Debug, Default)]
struct ReaderState {
    lines: Vec<String>,
    done: bool,
}

/// Cheaply cloneable handle to a growing list of logical lines.
#[derive(Debug, Clone)]
pub struct Reader {
    name: Option<String>,
    state: Arc<RwLock<ReaderState>>,
}

impl Reader {
    /// Create a complete reader from static text.
    ///
    /// Lines are split on `\n`; a trailing newline does not produce an
    /// extra empty line.
    pub fn from_text(name: Option<&str>, text: &str) -> Self {
        let reader = Self::empty(name);
        for line in text.lines() {
            reader.push_line(line);
        }
        reader.mark_done();
        reader
    }

    /// Create a reader that is filled from `stream` by a background thread.
    ///
    /// Returns immediately. Lines become visible as they arrive.
    pub fn from_stream<R>(name: Option<&str>, stream: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let reader = Self::empty(name);
        let feeder = reader.clone();
        thread::spawn(move || feeder.consume(stream));
        reader
    }

    /// Open a file and stream it in the background.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` if it cannot be opened.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        Ok(Self::from_stream(name.as_deref(), file))
    }

    fn empty(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            state: Arc::new(RwLock::new(ReaderState::default())),
        }
    }

    /// Display name of the content, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of lines available right now.
    pub fn line_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .len()
    }

    /// Text of one logical line, or `None` if it has not arrived (yet).
    pub fn line(&self, index: LineIndex) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .get(index.index())
            .cloned()
    }

    /// True once the source has reached EOF. No more lines will arrive.
    pub fn is_done(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .done
    }

    /// Append one raw line. Carriage returns are stripped and tabs expanded.
    pub fn push_line(&self, raw: &str) {
        let line = expand_tabs(raw.strip_suffix('\r').unwrap_or(raw));
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .push(line);
    }

    fn mark_done(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .done = true;
    }

    fn consume<R: Read>(&self, stream: R) {
        let mut stream = BufReader::new(stream);
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match stream.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => {
                    let bytes = buffer.strip_suffix(b"\n").unwrap_or(&buffer);
                    self.push_line(&String::from_utf8_lossy(bytes));
                }
                Err(error) if error.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(error) => {
                    warn!(%error, "Reading input failed, treating as end of input");
                    break;
                }
            }
        }
        let count = self.line_count();
        info!(lines = count, name = ?self.name, "Input complete");
        self.mark_done();
    }
}

/// Replace tabs with spaces up to the next tab stop.
fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let mut expanded = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            expanded.push_str(&" ".repeat(spaces));
            column += spaces;
        } else {
            expanded.push(ch);
            column += unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_until_done(reader: &Reader) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !reader.is_done() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(reader.is_done(), "Reader should finish within deadline");
    }

    #[test]
    fn from_text_splits_lines_without_trailing_empty_line() {
        let reader = Reader::from_text(None, "a\nb\nc\n");
        assert_eq!(reader.line_count(), 3);
        assert_eq!(reader.line(LineIndex::new(2)), Some("c".to_string()));
        assert!(reader.is_done());
    }

    #[test]
    fn from_text_keeps_unterminated_last_line() {
        let reader = Reader::from_text(None, "first\nlast");
        assert_eq!(reader.line_count(), 2);
        assert_eq!(reader.line(LineIndex::new(1)), Some("last".to_string()));
    }

    #[test]
    fn line_out_of_range_is_none() {
        let reader = Reader::from_text(None, "only\n");
        assert_eq!(reader.line(LineIndex::new(1)), None);
        assert_eq!(reader.line(LineIndex::new(usize::MAX)), None);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let reader = Reader::from_text(Some("empty"), "");
        assert_eq!(reader.line_count(), 0);
        assert_eq!(reader.name(), Some("empty"));
    }

    #[test]
    fn carriage_returns_are_stripped() {
        let reader = Reader::from_text(None, "dos\r\nline\r\n");
        assert_eq!(reader.line(LineIndex::ZERO), Some("dos".to_string()));
        assert_eq!(reader.line(LineIndex::new(1)), Some("line".to_string()));
    }

    #[test]
    fn tabs_expand_to_tab_stops() {
        assert_eq!(expand_tabs("a\tb"), "a       b");
        assert_eq!(expand_tabs("\tx"), "        x");
        assert_eq!(expand_tabs("12345678\ty"), "12345678        y");
    }

    #[test]
    fn push_line_grows_count_for_all_clones() {
        let reader = Reader::from_text(None, "one\n");
        let other = reader.clone();
        reader.push_line("two");
        assert_eq!(other.line_count(), 2);
        assert_eq!(other.line(LineIndex::new(1)), Some("two".to_string()));
    }

    #[test]
    fn from_stream_reads_all_lines_in_background() {
        let data: &'static [u8] = b"alpha\nbeta\ngamma";
        let reader = Reader::from_stream(Some("stdin"), data);
        wait_until_done(&reader);

        assert_eq!(reader.line_count(), 3);
        assert_eq!(reader.line(LineIndex::new(2)), Some("gamma".to_string()));
    }

    #[test]
    fn from_stream_replaces_invalid_utf8() {
        let data: &'static [u8] = b"ok\n\xff\xfe\n";
        let reader = Reader::from_stream(None, data);
        wait_until_done(&reader);

        assert_eq!(reader.line_count(), 2);
        let bad = reader.line(LineIndex::new(1)).unwrap();
        assert!(bad.contains('\u{FFFD}'));
    }

    #[test]
    fn from_file_returns_file_not_found_for_missing_file() {
        let missing = std::env::temp_dir().join("pagr_nonexistent_file_12345.txt");
        let result = Reader::from_file(&missing);
        assert!(matches!(result, Err(InputError::FileNotFound { .. })));
    }

    #[test]
    fn from_file_reads_content_and_uses_file_name() {
        let path = std::env::temp_dir().join("pagr_reader_from_file.txt");
        std::fs::write(&path, "x\ny\n").unwrap();

        let reader = Reader::from_file(&path).unwrap();
        wait_until_done(&reader);
        let _ = std::fs::remove_file(&path);

        assert_eq!(reader.name(), Some("pagr_reader_from_file.txt"));
        assert_eq!(reader.line_count(), 2);
    }
}
