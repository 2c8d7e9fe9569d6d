//! `gorodplus-lib` — in-memory civic issue store.
//!
//! Holds the reported city problems for one session, the two mutations
//! users can perform on them (submit, vote), the dashboard statistics, and
//! pure projections of the collection into list, map and profile views.
//!
//! # Quick Start
//!
//! ```
//! use gorodplus_lib::{IssueId, IssueStore, NewIssue};
//!
//! let mut store = IssueStore::seeded();
//!
//! let snapshot = store
//!     .submit(&NewIssue::new("Pothole", "Deep hole", "Main St"))
//!     .unwrap();
//! assert_eq!(snapshot.first().unwrap().id, IssueId(5));
//!
//! store.vote(IssueId(5)).unwrap();
//! assert_eq!(store.statistics().total, 5);
//! ```

pub mod error;
pub mod model;
pub mod present;
pub mod seed;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod validation;

pub use error::{GorodError, Result, ValidationError};
pub use model::{DEFAULT_CATEGORY, GeoPoint, Issue, IssueId, NewIssue, Status};
pub use present::{Intent, MapSettings, Notification, StatusBadge, status_badge};
pub use snapshot::Snapshot;
pub use stats::{Statistics, compute_statistics};
pub use store::IssueStore;
