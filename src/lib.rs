//! `gorodplus` - civic issue board
//!
//! Command-line front end for [`gorodplus_lib`]: a session-scoped board of
//! city problems that residents report, vote on, and browse as a list, a
//! map, or a short personal profile.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap, including the interactive shell
//! - [`config`] - YAML configuration with environment overrides
//! - [`session`] - One in-memory store plus the settings it was opened with
//! - [`format`] - Text and JSON renderings of the presentation views
//! - [`output`] - Output mode selection (plain, rich, JSON)
//! - [`logging`] - `tracing` subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod output;
pub mod session;

pub use gorodplus_lib::{GorodError, Result};
pub use session::Session;
