//! Validation helpers.
//!
//! These routines check submissions and seed records and return structured
//! validation errors without touching the store.

use crate::error::ValidationError;
use crate::model::{Issue, NewIssue};

/// Validates the form payload passed to `IssueStore::submit`.
pub struct SubmissionValidator;

impl SubmissionValidator {
    /// Validate a submission and return every missing required field.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if title, description or location is blank.
    pub fn validate(input: &NewIssue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        require_text(&mut errors, "title", &input.title);
        require_text(&mut errors, "description", &input.description);
        require_text(&mut errors, "location", &input.location);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Validates issue records loaded from a seed collection.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate an issue and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(issue: &Issue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        require_text(&mut errors, "title", &issue.title);
        require_text(&mut errors, "description", &issue.description);
        require_text(&mut errors, "location", &issue.location);

        // Coordinates: both or neither, WGS84 ranges.
        match (issue.lat, issue.lng) {
            (Some(lat), Some(lng)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    errors.push(ValidationError::new("lat", "must be within -90..=90"));
                }
                if !(-180.0..=180.0).contains(&lng) {
                    errors.push(ValidationError::new("lng", "must be within -180..=180"));
                }
            }
            (Some(_), None) => errors.push(ValidationError::new("lng", "required when lat is set")),
            (None, Some(_)) => errors.push(ValidationError::new("lat", "required when lng is set")),
            (None, None) => {}
        }

        if issue
            .image_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            errors.push(ValidationError::new("imageUrl", "cannot be blank"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn require_text(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "cannot be empty"));
    }
}
