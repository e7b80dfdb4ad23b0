//! Operator-facing terminal output for the triage flow.
//!
//! Notices, menus and prompts go to stdout, colored when the terminal allows it.
//! Diagnostic logging goes through tracing on stderr and is independent of this.

use crate::plex::EpisodeRecord;
use crate::triage::ShowAction;
use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
}

impl UiConfig {
    /// Create UI config from the environment
    pub fn new() -> Self {
        Self {
            colors_enabled: should_use_colors(),
        }
    }

    pub fn plain() -> Self {
        Self {
            colors_enabled: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // Check NO_COLOR env (standard: https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stdout().is_terminal()
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI writing to stdout
    pub fn new(config: UiConfig) -> Self {
        Self::with_writer(config, Box::new(io::stdout()))
    }

    /// Create UI with custom writer (for testing)
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    /// `Show: <name>`
    pub fn show_header(&mut self, show: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "Show:".bold(), show.bold().cyan());
        } else {
            let _ = writeln!(self.writer, "Show: {}", show);
        }
    }

    /// A one-line notice about what is about to happen
    pub fn notice(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.cyan());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    pub fn episode(&mut self, episode: &EpisodeRecord) {
        let _ = writeln!(self.writer, " - {}...", episode.label());
    }

    /// The six-way action menu for one show
    pub fn menu(&mut self, show: &str, count: usize) {
        let _ = writeln!(self.writer);
        let question = format!(
            "Would you like to delete watched episodes from series {}?",
            show
        );
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", question.bold());
        } else {
            let _ = writeln!(self.writer, "{}", question);
        }
        for action in ShowAction::ALL {
            let _ = writeln!(self.writer, "- {}", action.describe(show, count));
        }
        let _ = writeln!(self.writer);
        let _ = self.writer.flush();
    }

    /// Per-episode question, left open on the same line for the answer
    pub fn confirm_prompt(&mut self, episode: &EpisodeRecord) {
        let _ = write!(self.writer, "Remove {}? (y/n) ", episode.label());
        let _ = self.writer.flush();
    }

    pub fn unrecognized(&mut self, input: &str, expected: &str) {
        let msg = format!("Unrecognized choice {:?}, expected one of: {}", input, expected);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
        let _ = self.writer.flush();
    }

    pub fn removing(&mut self, episode: &EpisodeRecord) {
        let line = format!(" - Removing {}...", episode.label());
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.red());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
        let _ = self.writer.flush();
    }

    pub fn skipping(&mut self, episode: &EpisodeRecord) {
        let line = format!(" - Skipping {}...", episode.label());
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    /// Print a success message with checkmark
    pub fn success(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    /// Print a dim/muted message
    pub fn dim(&mut self, msg: &str) {
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a blank line
    pub fn blank(&mut self) {
        let _ = writeln!(self.writer);
    }
}
