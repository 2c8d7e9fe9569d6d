//! Configuration management for `gorodplus`.
//!
//! Configuration is loaded from a single YAML file, the first found of:
//! - the path given with `--config` (must exist)
//! - `./gorodplus.yaml`
//! - `$XDG_CONFIG_HOME/gorodplus/config.yaml` (or `~/.config/gorodplus/config.yaml`)
//!
//! `GORODPLUS_*` environment variables then override individual keys.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use gorodplus_lib::present::{DEFAULT_PROFILE_LIMIT, MapSettings};
use gorodplus_lib::{DEFAULT_CATEGORY, GorodError, IssueStore, Result, seed};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const WORKSPACE_CONFIG: &str = "gorodplus.yaml";
const MAX_ZOOM: u8 = 19;

/// Resolved settings for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_category: String,
    pub profile_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
    pub map: MapSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            profile_limit: DEFAULT_PROFILE_LIMIT,
            seed_file: None,
            map: MapSettings::default(),
        }
    }
}

/// Global flags that influence how the session is opened.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub seed: Option<PathBuf>,
    pub empty: bool,
    pub today: Option<NaiveDate>,
}

impl Config {
    /// Discover, parse, override from the environment, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config path is missing, the YAML is
    /// malformed, or a value is out of range.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match discover(explicit)? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse one YAML file. Relative `seed_file` paths resolve against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config");
        let raw = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&raw)
            .map_err(|e| GorodError::Config(format!("{}: {e}", path.display())))?;
        if let Some(seed) = config.seed_file.take() {
            let resolved = if seed.is_relative() {
                path.parent().map_or_else(|| seed.clone(), |dir| dir.join(&seed))
            } else {
                seed
            };
            config.seed_file = Some(resolved);
        }
        Ok(config)
    }

    /// Parse YAML text. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML or unknown keys.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|e| GorodError::Config(e.to_string()))
    }

    /// Apply `GORODPLUS_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric override does not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(category) = lookup("GORODPLUS_DEFAULT_CATEGORY") {
            self.default_category = category;
        }
        if let Some(limit) = lookup("GORODPLUS_PROFILE_LIMIT") {
            self.profile_limit = parse_env("GORODPLUS_PROFILE_LIMIT", &limit)?;
        }
        if let Some(zoom) = lookup("GORODPLUS_MAP_ZOOM") {
            self.map.zoom = parse_env("GORODPLUS_MAP_ZOOM", &zoom)?;
        }
        Ok(())
    }

    /// Reject values no view can use.
    ///
    /// # Errors
    ///
    /// Returns [`GorodError::Config`] naming the first bad key.
    pub fn validate(&self) -> Result<()> {
        if self.default_category.trim().is_empty() {
            return Err(GorodError::Config(
                "default_category must not be empty".to_string(),
            ));
        }
        if self.map.zoom > MAX_ZOOM {
            return Err(GorodError::Config(format!(
                "map.zoom must be at most {MAX_ZOOM}, got {}",
                self.map.zoom
            )));
        }
        if !(-90.0..=90.0).contains(&self.map.center_lat) {
            return Err(GorodError::Config(format!(
                "map.center_lat out of range: {}",
                self.map.center_lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.map.center_lng) {
            return Err(GorodError::Config(format!(
                "map.center_lng out of range: {}",
                self.map.center_lng
            )));
        }
        if self.map.tile_url.trim().is_empty() {
            return Err(GorodError::Config("map.tile_url must not be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GorodError::Config(format!("{key}: invalid value '{value}'")))
}

/// Locate the config file to read, if any.
///
/// # Errors
///
/// Returns [`GorodError::FileNotFound`] if `explicit` does not exist.
pub fn discover(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(GorodError::FileNotFound(path.to_path_buf()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let workspace = PathBuf::from(WORKSPACE_CONFIG);
    if workspace.is_file() {
        return Ok(Some(workspace));
    }

    Ok(user_config_path().filter(|path| path.is_file()))
}

fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("gorodplus").join("config.yaml"))
}

/// Open the store a session starts from.
///
/// `--empty` beats `--seed`, which beats `seed_file`, which beats the demo data.
///
/// # Errors
///
/// Returns an error if a seed file cannot be read or contains invalid issues.
pub fn build_store(config: &Config, overrides: &CliOverrides) -> Result<IssueStore> {
    let seed_path = overrides.seed.as_deref().or(config.seed_file.as_deref());

    let store = if overrides.empty {
        IssueStore::new()
    } else if let Some(path) = seed_path {
        IssueStore::with_issues(seed::load(path)?)?
    } else {
        IssueStore::seeded()
    };
    debug!(issues = store.len(), next_id = ?store.next_id(), "Store opened");

    let store = store.with_default_category(config.default_category.trim());
    Ok(match overrides.today {
        Some(date) => store.with_fixed_date(date),
        None => store,
    })
}
