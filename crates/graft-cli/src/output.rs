//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use chrono::{DateTime, Utc};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use graft_core::{
    application::ports::EventSink,
    domain::{Event, ProgressIndication, events::icons},
};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `--output-format` wins over `[output] format`; `Auto` resolves to
    /// Human on a TTY and Plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            verbose: args.verbose > 0,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// A dimmed line, e.g. a diff context or a digest.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        if self.is_silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout, printed even in quiet mode.
    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidInput {
            message: format!("Failed to serialise output: {e}"),
            source: Some(Box::new(e)),
        })?;
        self.term.write_line(&text)?;
        Ok(())
    }

    /// Event sink rendering scaffold progress for this output mode.
    pub fn events(&self) -> ProgressEvents {
        let bar = (self.resolved_format == OutputFormat::Human
            && !self.quiet
            && io::stderr().is_terminal())
        .then(spinner);

        ProgressEvents {
            bar,
            silent: self.is_silent(),
            verbose: self.verbose,
            no_color: self.no_color,
            term: self.term.clone(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// `true` when stdout is reserved for a JSON document.
    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn is_silent(&self) -> bool {
        self.quiet || self.is_json()
    }
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar
}

/// Wraps a serialisable result with a timestamp for `--output-format json`.
#[derive(Debug, Serialize)]
pub struct JsonEnvelope<'a, T: Serialize> {
    pub command: &'a str,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: T,
}

impl<'a, T: Serialize> JsonEnvelope<'a, T> {
    pub fn new(command: &'a str, body: T) -> Self {
        Self {
            command,
            generated_at: Utc::now(),
            body,
        }
    }
}

// ── progress events ───────────────────────────────────────────────────────────

/// [`EventSink`] that drives an `indicatif` spinner on a terminal and falls
/// back to one line per finished step elsewhere. Clones drive the same spinner.
#[derive(Clone)]
pub struct ProgressEvents {
    bar: Option<ProgressBar>,
    silent: bool,
    verbose: bool,
    no_color: bool,
    term: Term,
}

impl ProgressEvents {
    /// Stop the spinner without printing, e.g. before a prompt.
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    fn line(&self, event: &Event) -> String {
        let Some(icon) = event.icon else {
            return event.message.clone();
        };
        if self.no_color {
            return format!("{icon} {}", event.message);
        }
        let icon = match icon {
            icons::OK | icons::CREATED => icon.green().bold().to_string(),
            icons::NOT_OK => icon.red().bold().to_string(),
            icons::MODIFIED => icon.yellow().bold().to_string(),
            other => other.to_string(),
        };
        format!("{icon} {}", event.message)
    }
}

impl EventSink for ProgressEvents {
    fn send(&self, event: Event) {
        if self.silent || (event.verbose && !self.verbose) {
            return;
        }

        let line = self.line(&event);
        match &self.bar {
            Some(bar) => match event.progress {
                ProgressIndication::Start => {
                    bar.set_message(event.message);
                    bar.enable_steady_tick(Duration::from_millis(80));
                }
                ProgressIndication::Update if event.icon.is_none() => {
                    bar.set_message(event.message);
                }
                ProgressIndication::Finish => {
                    bar.finish_and_clear();
                    let _ = self.term.write_line(&line);
                }
                _ if bar.is_finished() => {
                    let _ = self.term.write_line(&line);
                }
                _ => bar.println(line),
            },
            None => {
                // Only settled steps are worth a line without a spinner.
                if event.icon.is_some() || !event.in_progress() {
                    let _ = self.term.write_line(&line);
                }
            }
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
