//! Persistent user state: theme preference and recent searches. Each store
//! owns a handle to [Storage] and keeps an in-memory copy that is loaded
//! once, then written through on every change.

use crate::storage::Storage;
use anyhow::{anyhow, Context};
use indexmap::IndexSet;
use log::{error, info, warn};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Stored as its lowercase name, see [Theme::as_str]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(anyhow!("Unknown theme `{s}`")),
        }
    }
}

/// Theme preference, persisted as a plain string
#[derive(Debug)]
pub struct ThemeStore<S> {
    storage: S,
    theme: Theme,
}

impl<S: Storage> ThemeStore<S> {
    const KEY: &'static str = "theme";

    /// Load the stored theme. Missing or unrecognized values fall back to
    /// the default.
    pub fn load(storage: S) -> Self {
        let theme = match storage.get(Self::KEY) {
            None => Theme::default(),
            Some(value) => value.parse().unwrap_or_else(|err| {
                warn!("Ignoring stored theme: {err}");
                Theme::default()
            }),
        };
        Self { storage, theme }
    }

    pub fn get(&self) -> Theme {
        self.theme
    }

    /// Update the theme and persist it. The in-memory value changes even if
    /// the write fails.
    pub fn set(&mut self, theme: Theme) -> anyhow::Result<()> {
        self.theme = theme;
        self.storage.set(Self::KEY, theme.as_str())
    }
}

/// Recently searched city names, most recent first. Entries are unique and
/// there are never more than [HistoryStore::CAPACITY] of them.
#[derive(Debug)]
pub struct HistoryStore<S> {
    storage: S,
    entries: IndexSet<String>,
}

impl<S: Storage> HistoryStore<S> {
    pub const CAPACITY: usize = 5;
    const KEY: &'static str = "weatherHistory";

    /// Load the stored history. Anything unparsable is treated as empty.
    /// Duplicates collapse and the list is cut down to capacity.
    pub fn load(storage: S) -> Self {
        let mut entries = storage
            .get(Self::KEY)
            .and_then(|value| {
                serde_json::from_str::<IndexSet<String>>(&value)
                    .map_err(|err| error!("Ignoring stored history: {err}"))
                    .ok()
            })
            .unwrap_or_default();
        entries.truncate(Self::CAPACITY);
        Self { storage, entries }
    }

    /// Snapshot of the current entries
    pub fn all(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Add a city to the front of the history, evicting the oldest entry if
    /// full. Adding a city that's already present does nothing. Returns
    /// whether the history changed. On a failed write the in-memory history
    /// is still updated.
    pub fn add(&mut self, city: &str) -> anyhow::Result<bool> {
        if self.entries.contains(city) {
            return Ok(false);
        }
        self.entries.shift_insert(0, city.to_owned());
        self.entries.truncate(Self::CAPACITY);

        info!("Saving history: {:?}", &self.entries);
        let serialized = serde_json::to_string(&self.entries)?;
        self.storage
            .set(Self::KEY, &serialized)
            .context("Error saving search history")?;
        Ok(true)
    }
}
