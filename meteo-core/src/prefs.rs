//! Durable storage for [`Preferences`].
//!
//! Persistence is best-effort: loading falls back to defaults entry by entry
//! and saving only logs failures.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{config::Config, model::Location, model::Preferences, units::UnitSystem};

const UNITS_KEY: &str = "units";
const LAST_LOCATION_KEY: &str = "last_location";

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = Config::project_dirs()?;
        Ok(Self::new(dirs.data_dir().join("preferences.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: anything missing or unreadable yields its default.
    pub fn load(&self) -> Preferences {
        let table = match self.read_table() {
            Ok(Some(table)) => table,
            Ok(None) => return Preferences::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences: {e:#}");
                return Preferences::default();
            }
        };

        let units = table
            .get(UNITS_KEY)
            .and_then(|v| v.as_str())
            .and_then(|s| UnitSystem::try_from(s).ok())
            .unwrap_or_default();

        let last_location = table
            .get(LAST_LOCATION_KEY)
            .cloned()
            .and_then(|v| match v.try_into::<Location>() {
                Ok(loc) => Some(loc),
                Err(e) => {
                    tracing::warn!("Ignoring stored location: {e}");
                    None
                }
            });

        Preferences {
            units,
            last_location,
        }
    }

    /// Best-effort write; failures are logged and dropped.
    pub fn save(&self, prefs: &Preferences) {
        if let Err(e) = self.write(prefs) {
            tracing::warn!("Failed to save preferences: {e:#}");
        }
    }

    fn read_table(&self) -> Result<Option<toml::Table>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let table = contents
            .parse::<toml::Table>()
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        Ok(Some(table))
    }

    fn write(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut table = toml::Table::new();
        table.insert(UNITS_KEY.into(), prefs.units.as_str().into());
        if let Some(loc) = &prefs.last_location {
            let value = toml::Value::try_from(loc).context("Failed to serialize location")?;
            table.insert(LAST_LOCATION_KEY.into(), value);
        }

        let contents = toml::to_string_pretty(&table).context("Failed to serialize preferences")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}
