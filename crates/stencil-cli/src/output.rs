//! Output management and formatting.
//!
//! Human lines go through [`console::Term`]; JSON documents are written
//! whole so they stay parseable when piped.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2713}", msg, Tone::Green)
    }

    /// Error indicator: `✗ <msg>`.  Never suppressed.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = self.paint("\u{2717}", msg, Tone::Red);
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{26a0}", msg, Tone::Yellow)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2139}", msg, Tone::Blue)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON document. Written even in quiet mode: a caller
    /// asking for JSON wants the document.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` when the caller asked for JSON.
    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn marked(&self, mark: &str, msg: &str, tone: Tone) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = self.paint(mark, msg, tone);
        self.term.write_line(&line)
    }

    fn paint(&self, mark: &str, msg: &str, tone: Tone) -> String {
        if self.no_color {
            return format!("{mark} {msg}");
        }
        match tone {
            Tone::Green => format!("{} {}", mark.green().bold(), msg.green()),
            Tone::Red => format!("{} {}", mark.red().bold(), msg.red()),
            Tone::Yellow => format!("{} {}", mark.yellow().bold(), msg.yellow()),
            Tone::Blue => format!("{} {}", mark.blue().bold(), msg.blue()),
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Green,
    Red,
    Yellow,
    Blue,
}

// ── tests ─────────────────────────────────────────────────────────────────────
