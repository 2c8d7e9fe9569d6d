//! Command implementations.

pub mod completions;
pub mod list;
pub mod map;
pub mod profile;
pub mod schema;
pub mod shell;
pub mod stats;
pub mod submit;
pub mod vote;
