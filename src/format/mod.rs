//! Output formatting for `gorodplus`.
//!
//! Plain text renderings of the presentation views, and the JSON envelopes
//! commands print in `--json` mode.
//!
//! # JSON Output Types
//!
//! - [`StatsOutput`] - Statistics plus the dashboard cards (stats)
//! - [`SubmitOutput`] - Notification plus the created card (submit)
//! - [`VoteOutput`] - One result per requested id (vote)

mod output;
mod text;

pub use output::{StatsOutput, SubmitOutput, VoteOutput, VoteResult};
pub use text::{
    format_card_details, format_marker_line, format_profile_line, format_status_icon,
    format_summary, format_votes, pad_display,
};
