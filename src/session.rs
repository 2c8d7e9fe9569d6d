//! A session: one issue store plus the configuration it was opened with.
//!
//! A one-shot command and the interactive shell both run against a
//! `Session`; only the shell keeps it alive across commands.

use gorodplus_lib::present::{self, Intent, Notification};
use gorodplus_lib::{IssueStore, Result};

use crate::config::{CliOverrides, Config, build_store};

pub struct Session {
    store: IssueStore,
    config: Config,
}

impl Session {
    /// Load configuration and open the store.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or seed data cannot be loaded.
    pub fn open(overrides: &CliOverrides) -> Result<Self> {
        let config = Config::load(overrides.config.as_deref())?;
        let store = build_store(&config, overrides)?;
        Ok(Self { store, config })
    }

    #[must_use]
    pub const fn new(store: IssueStore, config: Config) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub const fn store(&self) -> &IssueStore {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut IssueStore {
        &mut self.store
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Forward a user intent to the store.
    pub fn dispatch(&mut self, intent: &Intent) -> Notification {
        present::dispatch(&mut self.store, intent)
    }
}
