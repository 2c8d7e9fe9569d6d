//! The in-memory issue store.
//!
//! The store owns the current [`Snapshot`] and replaces it wholesale on every
//! mutation. `submit` and `vote` are the only mutating operations.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::error::{GorodError, Result};
use crate::model::{DEFAULT_CATEGORY, Issue, IssueId, NewIssue, Status};
use crate::seed;
use crate::snapshot::Snapshot;
use crate::stats::{Statistics, compute_statistics};
use crate::validation::{IssueValidator, SubmissionValidator};

/// Canonical issue collection for one session.
#[derive(Debug, Clone)]
pub struct IssueStore {
    snapshot: Snapshot,
    /// `None` once every `u64` id has been handed out.
    next_id: Option<u64>,
    default_category: String,
    fixed_date: Option<NaiveDate>,
}

impl IssueStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot::default(),
            next_id: Some(1),
            default_category: DEFAULT_CATEGORY.to_string(),
            fixed_date: None,
        }
    }

    /// Create a store holding `issues` in the given order.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` if two issues share an ID, or a validation
    /// error if any record is malformed.
    pub fn with_issues(issues: Vec<Issue>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(issues.len());
        for issue in &issues {
            if !seen.insert(issue.id) {
                return Err(GorodError::IdCollision { id: issue.id });
            }
            IssueValidator::validate(issue).map_err(GorodError::from_validation_errors)?;
        }

        let next_id = issues
            .iter()
            .map(|issue| issue.id.0)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));

        Ok(Self {
            snapshot: Snapshot::from_issues(issues),
            next_id,
            default_category: DEFAULT_CATEGORY.to_string(),
            fixed_date: None,
        })
    }

    /// Store holding the built-in demo issues.
    #[must_use]
    pub fn seeded() -> Self {
        let issues = seed::demo_issues();
        let next_id = issues.iter().map(|i| i.id.0).max().unwrap_or(0).checked_add(1);
        Self {
            snapshot: Snapshot::from_issues(issues),
            next_id,
            default_category: DEFAULT_CATEGORY.to_string(),
            fixed_date: None,
        }
    }

    /// Replace the category used for blank submissions.
    #[must_use]
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    #[must_use]
    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Date every `submit` uses instead of the current UTC day.
    #[must_use]
    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Submit a new issue dated today (UTC), or the fixed date if one is set.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming every blank required field. The
    /// collection is unchanged on error.
    pub fn submit(&mut self, input: &NewIssue) -> Result<Snapshot> {
        let date = self.fixed_date.unwrap_or_else(|| Utc::now().date_naive());
        self.submit_on(input, date)
    }

    /// Submit a new issue with an explicit creation date.
    ///
    /// The issue starts `pending` with zero votes and is placed first.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming every blank required field, or
    /// `IdExhausted` if no unused id is left. The collection is unchanged on error.
    pub fn submit_on(&mut self, input: &NewIssue, date: NaiveDate) -> Result<Snapshot> {
        SubmissionValidator::validate(input).map_err(GorodError::from_validation_errors)?;
        let id = self.next_id.ok_or(GorodError::IdExhausted)?;

        let issue = Issue {
            id: IssueId(id),
            title: input.title.clone(),
            description: input.description.clone(),
            category: input.category_or(&self.default_category).to_string(),
            status: Status::Pending,
            votes: 0,
            location: input.location.clone(),
            lat: None,
            lng: None,
            image_url: None,
            date,
        };

        let mut issues = Vec::with_capacity(self.snapshot.len() + 1);
        issues.push(Arc::new(issue));
        issues.extend(self.snapshot.shared().iter().cloned());

        tracing::debug!(id, total = issues.len(), "Issue submitted");
        self.next_id = id.checked_add(1);
        self.snapshot = Snapshot::from_shared(issues);
        Ok(self.snapshot.clone())
    }

    /// Add one vote to the issue with `id`.
    ///
    /// Every other issue in the new snapshot is shared with the old one.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no issue has that ID; the collection is
    /// unchanged.
    pub fn vote(&mut self, id: IssueId) -> Result<Snapshot> {
        let position = self
            .snapshot
            .shared()
            .iter()
            .position(|issue| issue.id == id)
            .ok_or(GorodError::IssueNotFound { id })?;

        let issues: Vec<Arc<Issue>> = self
            .snapshot
            .shared()
            .iter()
            .enumerate()
            .map(|(idx, issue)| {
                if idx == position {
                    Arc::new(issue.with_vote())
                } else {
                    Arc::clone(issue)
                }
            })
            .collect();

        tracing::debug!(%id, votes = issues[position].votes, "Vote recorded");
        self.snapshot = Snapshot::from_shared(issues);
        Ok(self.snapshot.clone())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    /// Get a single issue by ID.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn get_issue(&self, id: IssueId) -> Result<&Issue> {
        self.snapshot.get(id).ok_or(GorodError::IssueNotFound { id })
    }

    /// Statistics for the current snapshot.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        compute_statistics(&self.snapshot)
    }

    /// ID the next successful submit will receive.
    #[must_use]
    pub fn next_id(&self) -> Option<IssueId> {
        self.next_id.map(IssueId)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

impl Default for IssueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    fn pothole() -> NewIssue {
        NewIssue::new("Pothole", "Deep hole", "Main St").with_category("")
    }

    #[test]
    fn test_submit_prepends_pending_issue() {
        let mut store = IssueStore::seeded();
        let snapshot = store.submit_on(&pothole(), today()).unwrap();

        assert_eq!(snapshot.len(), 5);
        let first = snapshot.first().unwrap();
        assert_eq!(first.id, IssueId(5));
        assert_eq!(first.category, "Общее");
        assert_eq!(first.status, Status::Pending);
        assert_eq!(first.votes, 0);
        assert_eq!(first.date, today());
        assert!(first.coordinates().is_none());
    }

    #[test]
    fn test_submit_keeps_given_category() {
        let mut store = IssueStore::seeded();
        let input = NewIssue::new("Pothole", "Deep hole", "Main St").with_category("Дороги");
        let snapshot = store.submit_on(&input, today()).unwrap();
        assert_eq!(snapshot.first().unwrap().category, "Дороги");
    }

    #[test]
    fn test_submit_uses_configured_default_category() {
        let mut store = IssueStore::new().with_default_category("Разное");
        let snapshot = store
            .submit_on(&NewIssue::new("t", "d", "l"), today())
            .unwrap();
        assert_eq!(snapshot.first().unwrap().category, "Разное");
        assert_eq!(snapshot.first().unwrap().id, IssueId(1));
    }

    #[test]
    fn test_submit_rejects_missing_fields() {
        let mut store = IssueStore::seeded();
        let before = store.snapshot();

        let err = store
            .submit_on(&NewIssue::new("Pothole", "", "Main St"), today())
            .unwrap_err();
        assert!(matches!(err, GorodError::Validation { ref field, .. } if field == "description"));
        assert!(store.snapshot().ptr_eq(&before));
        assert_eq!(store.next_id(), Some(IssueId(5)));
    }

    #[test]
    fn test_submit_shares_existing_issues() {
        let mut store = IssueStore::seeded();
        let before = store.snapshot();
        let after = store.submit_on(&pothole(), today()).unwrap();
        for (old, new) in before.shared().iter().zip(&after.shared()[1..]) {
            assert!(Arc::ptr_eq(old, new));
        }
    }

    #[test]
    fn test_submit_uses_fixed_date() {
        let mut store = IssueStore::seeded().with_fixed_date(today());
        let snapshot = store.submit(&pothole()).unwrap();
        assert_eq!(snapshot.first().unwrap().date, today());
    }

    #[test]
    fn test_ids_stay_unique_with_gaps() {
        let mut issues = seed::demo_issues();
        issues[0].id = IssueId(10);
        let mut store = IssueStore::with_issues(issues).unwrap();
        let snapshot = store.submit_on(&pothole(), today()).unwrap();
        assert_eq!(snapshot.first().unwrap().id, IssueId(11));
        let snapshot = store.submit_on(&pothole(), today()).unwrap();
        assert_eq!(snapshot.first().unwrap().id, IssueId(12));
    }

    #[test]
    fn test_vote_increments_single_issue() {
        let mut store = IssueStore::seeded();
        let before = store.snapshot();
        let after = store.vote(IssueId(2)).unwrap();

        assert_eq!(after.get(IssueId(2)).unwrap().votes, 90);
        for (old, new) in before.shared().iter().zip(after.shared()) {
            if old.id == IssueId(2) {
                assert!(!Arc::ptr_eq(old, new));
            } else {
                assert!(Arc::ptr_eq(old, new));
            }
        }
        // The old snapshot is untouched.
        assert_eq!(before.get(IssueId(2)).unwrap().votes, 89);
    }

    #[test]
    fn test_vote_unknown_id_is_not_found() {
        let mut store = IssueStore::seeded();
        let before = store.snapshot();
        let result = store.vote(IssueId(42));
        assert!(matches!(
            result,
            Err(GorodError::IssueNotFound { id: IssueId(42) })
        ));
        assert!(store.snapshot().ptr_eq(&before));
    }

    #[test]
    fn test_vote_keeps_order() {
        let mut store = IssueStore::seeded();
        store.vote(IssueId(4)).unwrap();
        let ids: Vec<u64> = store.snapshot().iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_with_issues_rejects_duplicate_ids() {
        let mut issues = seed::demo_issues();
        issues[1].id = IssueId(1);
        let result = IssueStore::with_issues(issues);
        assert!(matches!(
            result,
            Err(GorodError::IdCollision { id: IssueId(1) })
        ));
    }

    #[test]
    fn test_submit_after_max_id_fails_without_change() {
        let mut issues = seed::demo_issues();
        issues[0].id = IssueId(u64::MAX);
        let mut store = IssueStore::with_issues(issues).unwrap();
        assert_eq!(store.next_id(), None);
        let before = store.snapshot();

        let result = store.submit_on(&pothole(), today());

        assert!(matches!(result, Err(GorodError::IdExhausted)));
        assert!(store.snapshot().ptr_eq(&before));
        let ids: HashSet<IssueId> = store.snapshot().iter().map(|issue| issue.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_last_id_is_handed_out_once() {
        let mut issues = seed::demo_issues();
        issues[0].id = IssueId(u64::MAX - 1);
        let mut store = IssueStore::with_issues(issues).unwrap();

        let snapshot = store.submit_on(&pothole(), today()).unwrap();
        assert_eq!(snapshot.first().unwrap().id, IssueId(u64::MAX));
        assert_eq!(store.next_id(), None);

        let result = store.submit_on(&pothole(), today());
        assert!(matches!(result, Err(GorodError::IdExhausted)));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_with_issues_rejects_invalid_records() {
        let mut issues = seed::demo_issues();
        issues[2].title = String::new();
        let result = IssueStore::with_issues(issues);
        assert!(matches!(result, Err(GorodError::Validation { .. })));
    }

    #[test]
    fn test_statistics_follow_snapshot() {
        let mut store = IssueStore::seeded();
        assert_eq!(store.statistics().total, 4);
        store.submit_on(&pothole(), today()).unwrap();
        let stats = store.statistics();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 3);
        assert!((stats.efficiency - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_store() {
        let store = IssueStore::new();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), Some(IssueId(1)));
        assert!(store.get_issue(IssueId(1)).is_err());
        assert_eq!(store.statistics().efficiency, 0.0);
    }
}
