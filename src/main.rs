//! pagr - Entry Point

use clap::Parser;
use pagr::model::{AppError, LineIndex};
use pagr::state::Pager;
use pagr::view::StartupTarget;
use std::path::PathBuf;
use tracing::info;

/// pagr - an interactive terminal pager with incremental search
#[derive(Parser, Debug)]
#[command(name = "pagr")]
#[command(version)]
#[command(about = "Page through a file or piped input with incremental search")]
pub struct Args {
    /// File to page through (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Wrap long lines instead of scrolling horizontally
    #[arg(short, long)]
    pub wrap: bool,

    /// Don't reserve the bottom row for the status bar
    #[arg(long = "no-statusbar")]
    pub no_statusbar: bool,

    /// Don't show line numbers
    #[arg(long = "no-linenumbers")]
    pub no_linenumbers: bool,

    /// Start at specific line number (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub line: Option<u32>,

    /// Start with search query active, scrolled to its first hit
    #[arg(short, long)]
    pub search: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// The initial jump requested on the command line. A search wins over
    /// a line number.
    fn startup_target(&self) -> Option<StartupTarget> {
        if self.search.is_some() {
            Some(StartupTarget::FirstSearchHit)
        } else {
            self.line
                .map(|line| StartupTarget::Line(LineIndex::from_one_based(line as usize)))
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = pagr::config::load_config_with_precedence(args.config.clone())?;
        let merged = pagr::config::merge_config(config_file);
        let with_env = pagr::config::apply_env_overrides(merged);

        // Flags can only switch things away from the defaults
        let wrap_override = args.wrap.then_some(true);
        let status_bar_override = args.no_statusbar.then_some(false);
        let line_numbers_override = args.no_linenumbers.then_some(false);

        pagr::config::apply_cli_overrides(
            with_env,
            wrap_override,
            status_bar_override,
            line_numbers_override,
        )
    };

    pagr::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let reader = pagr::source::detect_input_source(args.file.clone())?;

    let mut pager = Pager::new(reader);
    pager.set_wrap_long_lines(config.wrap_long_lines);
    pager.set_show_status_bar(config.show_status_bar);
    pager.set_show_line_numbers(config.show_line_numbers);
    if let Some(query) = &args.search {
        pager.set_search_string(query);
    }

    pagr::view::run_with_source(pager, args.startup_target())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["pagr", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["pagr", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["pagr"]);
        assert_eq!(args.file, None);
        assert!(!args.wrap);
        assert!(!args.no_statusbar);
        assert!(!args.no_linenumbers);
        assert_eq!(args.line, None);
        assert_eq!(args.search, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
        assert_eq!(args.startup_target(), None);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["pagr", "notes.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn test_display_flags() {
        let args = Args::parse_from(["pagr", "-w", "--no-statusbar", "--no-linenumbers"]);
        assert!(args.wrap);
        assert!(args.no_statusbar);
        assert!(args.no_linenumbers);

        let args = Args::parse_from(["pagr", "--wrap"]);
        assert!(args.wrap);
    }

    #[test]
    fn test_line_flag_is_one_based() {
        let args = Args::parse_from(["pagr", "-l", "42"]);
        assert_eq!(args.line, Some(42));
        assert_eq!(
            args.startup_target(),
            Some(StartupTarget::Line(LineIndex::new(41)))
        );
    }

    #[test]
    fn test_line_zero_is_rejected() {
        let result = Args::try_parse_from(["pagr", "--line", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_flag() {
        let args = Args::parse_from(["pagr", "-s", "needle", "file.txt"]);
        assert_eq!(args.search.as_deref(), Some("needle"));
        assert_eq!(args.file, Some(PathBuf::from("file.txt")));
    }

    #[test]
    fn test_search_wins_over_line() {
        let args = Args::parse_from(["pagr", "-l", "5", "--search", "x"]);
        assert_eq!(args.startup_target(), Some(StartupTarget::FirstSearchHit));
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["pagr", "--config", "/tmp/pagr.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/pagr.toml")));
    }
}
