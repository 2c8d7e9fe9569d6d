use gorodplus_lib::present::{IssueCard, SummaryCard, summary_cards};
use gorodplus_lib::{IssueId, Notification, Statistics};
use schemars::JsonSchema;
use serde::Serialize;

/// Aggregate statistics with the four dashboard tiles.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct StatsOutput {
    pub statistics: Statistics,
    pub cards: Vec<SummaryCard>,
}

impl From<Statistics> for StatsOutput {
    fn from(statistics: Statistics) -> Self {
        Self {
            statistics,
            cards: summary_cards(&statistics).to_vec(),
        }
    }
}

/// Result of `submit`. `issue` is present only when the submission was accepted.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SubmitOutput {
    pub notification: Notification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueCard>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct VoteResult {
    pub id: IssueId,
    pub notification: Notification,
    /// Vote count after the vote; absent when the vote was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct VoteOutput {
    pub results: Vec<VoteResult>,
}

impl VoteOutput {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.notification.is_success())
    }
}
