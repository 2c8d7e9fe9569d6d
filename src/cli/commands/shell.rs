//! Shell command implementation.
//!
//! Reads one command per line from stdin against a single session, so
//! submissions and votes are visible to later lines. A failing line is
//! reported and the loop carries on; `quit`, `exit` or end of input stop it.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::cli::{SessionCommand, execute_session_command};
use crate::output::OutputContext;
use crate::session::Session;

const PROMPT: &str = "gp> ";

/// One shell line, parsed with the same definitions as `gp <command>`.
#[derive(Parser, Debug)]
#[command(name = "gp", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    #[command(flatten)]
    Session(SessionCommand),

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Summary of one shell run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShellStats {
    pub executed: usize,
    pub failed: usize,
}

/// Execute the shell command on stdin.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub fn execute(session: &mut Session, ctx: &OutputContext) -> Result<()> {
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let stats = run_lines(stdin.lock(), session, ctx, interactive)?;
    info!(
        executed = stats.executed,
        failed = stats.failed,
        "Shell session finished"
    );
    Ok(())
}

/// Drive the shell from any line source.
///
/// # Errors
///
/// Returns an error if reading from `input` fails.
pub fn run_lines<R: BufRead>(
    input: R,
    session: &mut Session,
    ctx: &OutputContext,
    interactive: bool,
) -> Result<ShellStats> {
    let mut stats = ShellStats::default();
    prompt(interactive);

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            prompt(interactive);
            continue;
        }

        let tokens = match split_line(trimmed) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("Error: {e}");
                prompt(interactive);
                continue;
            }
        };

        match ShellLine::try_parse_from(tokens) {
            Ok(ShellLine {
                command: ShellCommand::Quit,
            }) => break,
            Ok(ShellLine {
                command: ShellCommand::Session(command),
            }) => {
                debug!(command = command.name(), "Shell command");
                stats.executed += 1;
                if let Err(e) = execute_session_command(&command, session, ctx) {
                    stats.failed += 1;
                    eprintln!("Error: {e}");
                }
            }
            Err(err) => {
                if let Err(e) = err.print() {
                    warn!(error = %e, "Failed to print shell parse error");
                }
            }
        }
        prompt(interactive);
    }

    Ok(stats)
}

fn prompt(interactive: bool) {
    if interactive {
        print!("{PROMPT}");
        let _ = std::io::stdout().flush();
    }
}

/// Split a line into words. Single and double quotes group words; a
/// backslash escapes the next character outside single quotes.
///
/// # Errors
///
/// Returns an error on an unterminated quote or a trailing backslash.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => bail!("trailing backslash"),
            },
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("unterminated {q} quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
