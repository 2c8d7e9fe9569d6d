//! Presentation adapter.
//!
//! Pure projections from a [`Snapshot`] to the list, map and profile views
//! and the dashboard summary cards, plus intent dispatch back into the store.
//! Nothing here keeps state between renders.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GorodError;
use crate::model::{Issue, IssueId, NewIssue, Status};
use crate::snapshot::Snapshot;
use crate::stats::Statistics;
use crate::store::IssueStore;

// ============================================================================
// Status lookup
// ============================================================================

/// How a status is drawn: badge classes, marker fill and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusBadge {
    pub color_token: &'static str,
    pub marker_color: &'static str,
    pub label: &'static str,
}

pub const PENDING_BADGE: StatusBadge = StatusBadge {
    color_token: "bg-yellow-100 text-yellow-800",
    marker_color: "#eab308",
    label: "На рассмотрении",
};

pub const IN_PROGRESS_BADGE: StatusBadge = StatusBadge {
    color_token: "bg-blue-100 text-blue-800",
    marker_color: "#3b82f6",
    label: "В работе",
};

pub const RESOLVED_BADGE: StatusBadge = StatusBadge {
    color_token: "bg-green-100 text-green-800",
    marker_color: "#10b981",
    label: "Решено",
};

/// The single status lookup shared by every view. Unknown statuses render as pending.
#[must_use]
pub const fn status_badge(status: &Status) -> StatusBadge {
    match status {
        Status::InProgress => IN_PROGRESS_BADGE,
        Status::Resolved => RESOLVED_BADGE,
        Status::Pending | Status::Custom(_) => PENDING_BADGE,
    }
}

/// Note shown under resolved issues in the list.
pub const RESOLVED_NOTE: &str = "Проблема решена!";

/// Format a creation date the way the list view shows it (`DD.MM.YYYY`).
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

// ============================================================================
// List view
// ============================================================================

/// One card in the "all issues" list.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueCard {
    pub id: IssueId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub status: Status,
    pub badge: StatusBadge,
    pub votes: u64,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_note: Option<&'static str>,
}

impl From<&Issue> for IssueCard {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id,
            title: issue.title.clone(),
            description: issue.description.clone(),
            category: issue.category.clone(),
            location: issue.location.clone(),
            status: issue.status.clone(),
            badge: status_badge(&issue.status),
            votes: issue.votes,
            date: format_date(issue.date),
            image_url: issue.image_url.clone(),
            resolved_note: issue.status.is_resolved().then_some(RESOLVED_NOTE),
        }
    }
}

/// Every issue as a card, in snapshot order.
#[must_use]
pub fn list_view(snapshot: &Snapshot) -> Vec<IssueCard> {
    snapshot.iter().map(IssueCard::from).collect()
}

// ============================================================================
// Map view
// ============================================================================

/// Tile provider and viewport for the map collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_lat: 55.7558,
            center_lng: 37.6173,
            zoom: 12,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution:
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                    .to_string(),
        }
    }
}

/// A pin on the map with its popup content.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: IssueId,
    pub lat: f64,
    pub lng: f64,
    pub status: Status,
    pub marker_color: &'static str,
    pub popup: IssueCard,
}

/// Everything the map collaborator needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct MapView {
    pub settings: MapSettings,
    pub markers: Vec<MapMarker>,
}

/// Markers for issues carrying both coordinates, in snapshot order.
#[must_use]
pub fn map_view(snapshot: &Snapshot, settings: &MapSettings) -> MapView {
    let markers = snapshot
        .iter()
        .filter_map(|issue| {
            let point = issue.coordinates()?;
            let popup = IssueCard::from(issue);
            Some(MapMarker {
                id: issue.id,
                lat: point.lat,
                lng: point.lng,
                status: issue.status.clone(),
                marker_color: popup.badge.marker_color,
                popup,
            })
        })
        .collect();

    MapView {
        settings: settings.clone(),
        markers,
    }
}

// ============================================================================
// Profile view
// ============================================================================

/// Default number of issues on the profile tab.
pub const DEFAULT_PROFILE_LIMIT: usize = 2;

/// Condensed row on the profile tab.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ProfileEntry {
    pub id: IssueId,
    pub title: String,
    pub location: String,
    pub status: Status,
    pub badge: StatusBadge,
}

/// The first `limit` issues of the snapshot.
#[must_use]
pub fn profile_view(snapshot: &Snapshot, limit: usize) -> Vec<ProfileEntry> {
    snapshot
        .iter()
        .take(limit)
        .map(|issue| ProfileEntry {
            id: issue.id,
            title: issue.title.clone(),
            location: issue.location.clone(),
            status: issue.status.clone(),
            badge: status_badge(&issue.status),
        })
        .collect()
}

// ============================================================================
// Summary cards
// ============================================================================

/// One dashboard tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
}

/// The four dashboard tiles in display order.
#[must_use]
pub fn summary_cards(stats: &Statistics) -> [SummaryCard; 4] {
    [
        SummaryCard {
            title: "Всего предложений",
            value: stats.total.to_string(),
        },
        SummaryCard {
            title: "В работе",
            value: stats.in_progress.to_string(),
        },
        SummaryCard {
            title: "Решено",
            value: stats.resolved.to_string(),
        },
        SummaryCard {
            title: "Эффективность",
            value: format!("{}%", stats.efficiency_percent()),
        },
    ]
}

// ============================================================================
// Intents and notifications
// ============================================================================

/// A user action forwarded to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Vote(IssueId),
    Submit(NewIssue),
}

/// Success or failure message for the notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }
}

pub const VOTE_RECORDED: &str = "Ваш голос учтён!";
pub const SUBMIT_ACCEPTED: &str = "Предложение успешно отправлено!";
pub const FIELDS_REQUIRED: &str = "Заполните все обязательные поля";

/// Apply an intent to the store and describe the outcome.
///
/// The store is left unchanged whenever an error notification is returned.
pub fn dispatch(store: &mut IssueStore, intent: &Intent) -> Notification {
    let outcome = match intent {
        Intent::Vote(id) => store.vote(*id).map(|_| VOTE_RECORDED),
        Intent::Submit(input) => store.submit(input).map(|_| SUBMIT_ACCEPTED),
    };

    match outcome {
        Ok(message) => Notification::Success(message.to_string()),
        Err(err) => {
            tracing::warn!(?intent, error = %err, "Intent rejected");
            Notification::Error(describe_error(&err))
        }
    }
}

fn describe_error(err: &GorodError) -> String {
    match err {
        GorodError::IssueNotFound { id } => format!("Предложение {id} не найдено"),
        err if err.is_validation() => {
            format!("{FIELDS_REQUIRED}: {}", err.invalid_fields().join(", "))
        }
        other => other.to_string(),
    }
}

// ============================================================================
// Submit form
// ============================================================================

/// Free-text fields of the "new issue" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
}

impl SubmitForm {
    /// Assemble the payload for `IssueStore::submit`.
    #[must_use]
    pub fn to_new_issue(&self) -> NewIssue {
        let category = self.category.trim();
        NewIssue {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            category: (!category.is_empty()).then(|| category.to_string()),
        }
    }

    /// Submit through [`dispatch`]; the form is cleared only on success.
    pub fn submit(&mut self, store: &mut IssueStore) -> Notification {
        let notification = dispatch(store, &Intent::Submit(self.to_new_issue()));
        if notification.is_success() {
            *self = Self::default();
        }
        notification
    }
}
