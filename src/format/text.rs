//! Text formatting functions for `gorodplus`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ✓)
//! - Card details, map marker and profile rows
//! - The dashboard summary block

use gorodplus_lib::Status;
use gorodplus_lib::present::{IssueCard, MapMarker, ProfileEntry, SummaryCard};
use unicode_width::UnicodeWidthStr;

/// Status icon characters.
pub mod icons {
    /// Waiting for review (hollow circle).
    pub const PENDING: &str = "○";
    /// Being fixed (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Fixed (checkmark).
    pub const RESOLVED: &str = "✓";
    /// Unknown status.
    pub const UNKNOWN: &str = "?";
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: &Status) -> &'static str {
    match status {
        Status::Pending => icons::PENDING,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Resolved => icons::RESOLVED,
        Status::Custom(_) => icons::UNKNOWN,
    }
}

#[must_use]
pub fn format_votes(votes: u64) -> String {
    format!("▲ {votes}")
}

/// Pad `text` with spaces to `width` terminal columns.
#[must_use]
pub fn pad_display(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(used));
    padded.push_str(text);
    padded.push_str(&" ".repeat(width.saturating_sub(used)));
    padded
}

/// Multi-line card body used by `list`.
#[must_use]
pub fn format_card_details(card: &IssueCard) -> String {
    let mut out = format!(
        "{} {} [{}] {}\n",
        format_status_icon(&card.status),
        card.id,
        card.badge.label,
        card.title
    );
    out.push_str(&format!("    {}\n", card.description));
    out.push_str(&format!(
        "    {} · {} · {} · {}\n",
        card.category,
        card.location,
        card.date,
        format_votes(card.votes)
    ));
    if let Some(url) = &card.image_url {
        out.push_str(&format!("    {url}\n"));
    }
    if let Some(note) = card.resolved_note {
        out.push_str(&format!("    {} {note}\n", icons::RESOLVED));
    }
    out
}

/// One map pin: `{icon} {id} {lat},{lng} {color} {title}`.
#[must_use]
pub fn format_marker_line(marker: &MapMarker) -> String {
    format!(
        "{} {} {:.4},{:.4} {} {}",
        format_status_icon(&marker.status),
        marker.id,
        marker.lat,
        marker.lng,
        marker.marker_color,
        marker.popup.title
    )
}

#[must_use]
pub fn format_profile_line(entry: &ProfileEntry) -> String {
    format!(
        "{} {} {} · {} [{}]",
        format_status_icon(&entry.status),
        entry.id,
        entry.title,
        entry.location,
        entry.badge.label
    )
}

/// Dashboard tiles as aligned `title  value` rows.
#[must_use]
pub fn format_summary(cards: &[SummaryCard]) -> String {
    let width = cards
        .iter()
        .map(|card| UnicodeWidthStr::width(card.title))
        .max()
        .unwrap_or(0);
    cards
        .iter()
        .map(|card| format!("{}  {}\n", pad_display(card.title, width), card.value))
        .collect()
}
