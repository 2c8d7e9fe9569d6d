//! Immutable views of the issue collection.
//!
//! A `Snapshot` is a reference-counted spine of reference-counted issues.
//! Cloning one is cheap, and consecutive snapshots share every issue that
//! a mutation did not touch.

use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::model::{Issue, IssueId};

/// The full issue collection at one point in time, most recent first.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    issues: Arc<[Arc<Issue>]>,
}

impl Snapshot {
    pub(crate) fn from_shared(issues: Vec<Arc<Issue>>) -> Self {
        Self {
            issues: issues.into(),
        }
    }

    /// Build a snapshot from owned issues, keeping their order.
    #[must_use]
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self::from_shared(issues.into_iter().map(Arc::new).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().map(unshare)
    }

    /// Shared handles, for callers that want to keep issues past this snapshot.
    #[must_use]
    pub fn shared(&self) -> &[Arc<Issue>] {
        &self.issues
    }

    #[must_use]
    pub fn get(&self, id: IssueId) -> Option<&Issue> {
        self.iter().find(|issue| issue.id == id)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Issue> {
        self.issues.first().map(unshare)
    }

    /// Owned copy of every issue, in snapshot order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Issue> {
        self.iter().cloned().collect()
    }

    /// Issues matching `keep`, in order, sharing each kept issue.
    #[must_use]
    pub fn filter<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Issue) -> bool,
    {
        Self::from_shared(
            self.issues
                .iter()
                .filter(|issue| keep(issue))
                .cloned()
                .collect(),
        )
    }

    /// True when both snapshots hold the same spine allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.issues, &other.issues)
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Issue;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Arc<Issue>>, fn(&Arc<Issue>) -> &Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter().map(unshare as fn(&Arc<Issue>) -> &Issue)
    }
}

fn unshare(issue: &Arc<Issue>) -> &Issue {
    issue
}
