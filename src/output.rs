//! Output mode selection.
//!
//! Commands ask the [`OutputContext`] how to render: machine-readable JSON,
//! styled terminal output, or plain text for pipes and `NO_COLOR`.

use std::io::IsTerminal;

use anyhow::Result;
use gorodplus_lib::{Notification, Status};
use rich_rust::prelude::*;
use serde::Serialize;

const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Plain,
    Json,
    Rich,
}

/// Styles shared by the rich renderers.
#[derive(Clone)]
pub struct Theme {
    pub emphasis: Style,
    pub dimmed: Style,
    pub section: Style,
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub panel_title: Style,
}

fn color(name: &str) -> Color {
    Color::parse(name).unwrap_or_default()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            emphasis: Style::new().bold(),
            dimmed: Style::new().dim(),
            section: Style::new().bold().color(color("cyan")),
            accent: Style::new().color(color("blue")),
            success: Style::new().bold().color(color("green")),
            error: Style::new().bold().color(color("red")),
            panel_title: Style::new().bold().color(color("magenta")),
        }
    }
}

impl Theme {
    /// Terminal color matching the status badge.
    #[must_use]
    pub fn status(&self, status: &Status) -> Style {
        match status {
            Status::InProgress => Style::new().bold().color(color("blue")),
            Status::Resolved => Style::new().bold().color(color("green")),
            Status::Pending | Status::Custom(_) => Style::new().bold().color(color("yellow")),
        }
    }
}

#[derive(Clone)]
pub struct OutputContext {
    mode: OutputMode,
    width: usize,
    theme: Theme,
}

impl OutputContext {
    /// Pick a mode from the `--json` flag and the terminal we are attached to.
    #[must_use]
    pub fn from_flags(json: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
            OutputMode::Rich
        } else {
            OutputMode::Plain
        };
        let width = crossterm::terminal::size()
            .map(|(cols, _)| usize::from(cols))
            .ok()
            .filter(|cols| *cols > 0)
            .unwrap_or(DEFAULT_WIDTH);
        Self::with_mode(mode, width)
    }

    #[must_use]
    pub fn with_mode(mode: OutputMode, width: usize) -> Self {
        Self {
            mode,
            width,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.mode, OutputMode::Json)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Print a value as pretty JSON on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Show a notification. Successes go to stdout, errors to stderr.
    ///
    /// In JSON mode notifications are part of the command payload instead.
    pub fn notify(&self, notification: &Notification) {
        match self.mode {
            OutputMode::Json => {}
            OutputMode::Rich => {
                let console = Console::default();
                let mut text = rich_rust::Text::new("");
                if notification.is_success() {
                    text.append_styled("\u{2713} ", self.theme.success.clone());
                    text.append(notification.message());
                    console.print_renderable(&text);
                } else {
                    eprintln!("\u{2717} {}", notification.message());
                }
            }
            OutputMode::Plain => {
                if notification.is_success() {
                    println!("\u{2713} {}", notification.message());
                } else {
                    eprintln!("\u{2717} {}", notification.message());
                }
            }
        }
    }
}
