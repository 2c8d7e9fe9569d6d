//! Seed data for a fresh session.
//!
//! Either the built-in demo collection or a JSON Lines file with one
//! complete issue per line. Seed files are read-only input.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{GorodError, Result};
use crate::model::{Issue, IssueId, Status};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The four demo issues a new session starts with, most recent first by id.
#[must_use]
pub fn demo_issues() -> Vec<Issue> {
    vec![
        Issue {
            id: IssueId(1),
            title: "Разбитый асфальт на ул. Ленина".to_string(),
            description: "Большие ямы на дороге, опасно для автомобилей и пешеходов".to_string(),
            category: "Дороги".to_string(),
            status: Status::InProgress,
            votes: 124,
            location: "ул. Ленина, 45".to_string(),
            lat: Some(55.7601),
            lng: Some(37.6189),
            image_url: None,
            date: day(2026, 1, 10),
        },
        Issue {
            id: IssueId(2),
            title: "Нет освещения в парке".to_string(),
            description: "Темные аллеи парка создают небезопасную обстановку вечером".to_string(),
            category: "Освещение".to_string(),
            status: Status::Pending,
            votes: 89,
            location: "Центральный парк".to_string(),
            lat: Some(55.7312),
            lng: Some(37.6011),
            image_url: None,
            date: day(2026, 1, 12),
        },
        Issue {
            id: IssueId(3),
            title: "Нужны скамейки на детской площадке".to_string(),
            description: "Родителям негде посидеть, пока дети играют".to_string(),
            category: "Благоустройство".to_string(),
            status: Status::Resolved,
            votes: 67,
            location: "ул. Мира, двор 12".to_string(),
            lat: Some(55.7814),
            lng: Some(37.6339),
            image_url: None,
            date: day(2026, 1, 8),
        },
        Issue {
            id: IssueId(4),
            title: "Отсутствие урн возле магазина".to_string(),
            description: "Люди оставляют мусор на тротуаре".to_string(),
            category: "Чистота".to_string(),
            status: Status::Pending,
            votes: 45,
            location: "пр. Победы, 78".to_string(),
            lat: Some(55.7423),
            lng: Some(37.5652),
            image_url: None,
            date: day(2026, 1, 13),
        },
    ]
}

/// Load issues from a JSON Lines seed file, keeping file order.
///
/// # Errors
///
/// Returns `FileNotFound` if the file is missing, `Io` if it cannot be read,
/// or `SeedParse` with the 1-based line number if any line is invalid.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GorodError::FileNotFound(path.to_path_buf())
        } else {
            GorodError::Io(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut issues = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let issue: Issue = serde_json::from_str(trimmed).map_err(|e| GorodError::SeedParse {
            line: line_num + 1,
            reason: e.to_string(),
        })?;
        issues.push(issue);
    }

    tracing::debug!(path = %path.display(), count = issues.len(), "Loaded seed file");
    Ok(issues)
}
