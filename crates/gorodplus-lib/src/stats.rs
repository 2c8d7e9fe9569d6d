//! Aggregate statistics over an issue collection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Issue, Status};

/// Counts shown on the dashboard summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub resolved: usize,
    pub in_progress: usize,
    pub pending: usize,
    /// Share of resolved issues in `0.0..=1.0`; zero for an empty collection.
    pub efficiency: f64,
}

impl Statistics {
    /// Efficiency as a whole percentage, rounded half away from zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn efficiency_percent(&self) -> u8 {
        (self.efficiency * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Issues whose status is none of the three known ones.
    #[must_use]
    pub const fn other(&self) -> usize {
        self.total
            .saturating_sub(self.resolved + self.in_progress + self.pending)
    }
}

/// Compute statistics for any sequence of issues.
#[must_use]
pub fn compute_statistics<'a, I>(issues: I) -> Statistics
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut stats = Statistics::default();
    for issue in issues {
        stats.total += 1;
        match issue.status {
            Status::Resolved => stats.resolved += 1,
            Status::InProgress => stats.in_progress += 1,
            Status::Pending => stats.pending += 1,
            Status::Custom(_) => {}
        }
    }
    stats.efficiency = if stats.total == 0 {
        0.0
    } else {
        stats.resolved as f64 / stats.total as f64
    };
    stats
}
