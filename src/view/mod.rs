//! TUI rendering and terminal management (impure shell)

mod pager_view;
mod status_bar;
mod styles;

pub use pager_view::PagerView;
pub use status_bar::{position_text, StatusBar};
pub use styles::{ColorConfig, PagerStyles};

use crate::model::LineIndex;
use crate::state::Pager;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// How long to wait for a terminal event before checking for new input.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),
}

/// Where to scroll once the content needed for it has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupTarget {
    /// Put this line at the top.
    Line(LineIndex),
    /// Put the first hit of the committed search at the top.
    FirstSearchHit,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    pager: Pager,
    styles: PagerStyles,
    /// Line count and completion as of the last draw
    drawn_input: (usize, bool),
    /// Initial jump still waiting for its content
    startup_target: Option<StartupTarget>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(pager: Pager) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;

        let old_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Err(err) = restore_terminal() {
                eprintln!("Failed to restore terminal: {err}");
            }
            old_hook(info);
        }));

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Self::with_terminal(terminal, pager)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Redraws on key presses and resizes,
    /// and on poll timeouts when the reader has produced more lines.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(POLL_INTERVAL)? {
                if self.handle_event(event::read()?) {
                    return Ok(());
                }
                self.draw()?;
            } else if self.input_changed() {
                self.resolve_startup_target();
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an already set up terminal.
    ///
    /// The pager viewport is sized to the terminal.
    pub fn with_terminal(terminal: Terminal<B>, mut pager: Pager) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        pager.set_viewport(size.width, size.height);
        Ok(Self {
            terminal,
            pager,
            styles: PagerStyles::default(),
            drawn_input: (0, false),
            startup_target: None,
        })
    }

    /// Scroll to `target` as soon as the content for it is available.
    pub fn set_startup_target(&mut self, target: StartupTarget) {
        self.startup_target = Some(target);
        self.resolve_startup_target();
    }

    /// Apply the pending startup target if its content has arrived, or drop
    /// it once the input is complete. Any key press also drops it.
    fn resolve_startup_target(&mut self) {
        let Some(target) = self.startup_target else {
            return;
        };
        let reader = self.pager.reader();
        let done = reader.is_done();

        let resolved = match target {
            StartupTarget::Line(line) => {
                if line.index() < reader.line_count() || done {
                    self.pager.goto_line(line);
                    true
                } else {
                    false
                }
            }
            StartupTarget::FirstSearchHit => self.pager.scroll_to_first_search_hit() || done,
        };

        if resolved {
            debug!(?target, "Startup target resolved");
            self.startup_target = None;
        }
    }

    /// The pager being shown.
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single terminal event
    ///
    /// Returns true if app should quit
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => {
                self.pager.set_viewport(width, height);
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.startup_target = None;
        // Ctrl+C quits from every mode, prompts included
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Quit requested with Ctrl+C");
            return true;
        }
        self.pager.handle_key(key)
    }

    fn input_changed(&self) -> bool {
        let reader = self.pager.reader();
        (reader.line_count(), reader.is_done()) != self.drawn_input
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let reader = self.pager.reader();
        self.drawn_input = (reader.line_count(), reader.is_done());

        let pager = &self.pager;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            frame.render_widget(PagerView::new(pager, styles), frame.area());
        })?;
        Ok(())
    }
}

/// Initialize and run the TUI application for `pager`
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    pager: Pager,
    startup_target: Option<StartupTarget>,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(pager)?;
    debug!("Terminal initialized");
    if let Some(target) = startup_target {
        app.set_startup_target(target);
    }

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
