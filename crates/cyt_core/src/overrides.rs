//! Player override store and its persistence.
//!
//! The [`OverrideStore`] maps an asset path to the id of the source the player chose
//! for it. It is the only state that outlives a session. Sources are reloaded on
//! every start, so the store is persisted by id as two parallel sequences (paths and
//! source ids) and re-resolved against the loaded sources when restored. Entries
//! whose source is gone are dropped.

use crate::asset_path::AssetPath;
use crate::error::Result;
use crate::source::{SourceId, SourceSet};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current settings schema version.
const SETTINGS_VERSION: u32 = 1;

/// Durable asset path -> source id mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideStore {
    chosen: HashMap<AssetPath, SourceId>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The source recorded for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&SourceId> {
        self.chosen.get(path)
    }

    /// Record `source` for `path`, replacing any previous choice.
    pub fn set(&mut self, path: AssetPath, source: SourceId) {
        self.chosen.insert(path, source);
    }

    pub fn remove(&mut self, path: &str) -> Option<SourceId> {
        self.chosen.remove(path)
    }

    /// Forget every override.
    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Entries sorted by path.
    pub fn entries(&self) -> Vec<(&AssetPath, &SourceId)> {
        let mut entries: Vec<_> = self.chosen.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Snapshot for persistence, sorted by path.
    pub fn to_settings(&self) -> OverrideSettings {
        let mut settings = OverrideSettings::default();
        for (path, source) in self.entries() {
            settings.paths.push(path.clone());
            settings.sources.push(source.to_string());
        }
        settings
    }

    /// Rebuild a store from persisted settings, keeping only entries whose source is
    /// currently loaded.
    pub fn restore(settings: &OverrideSettings, sources: &SourceSet) -> (Self, RestoreReport) {
        let mut store = Self::new();
        let mut report = RestoreReport::default();

        if settings.paths.len() != settings.sources.len() {
            tracing::warn!(
                "Override settings have {} paths but {} sources; ignoring unpaired entries",
                settings.paths.len(),
                settings.sources.len()
            );
            report.unpaired = settings.paths.len().abs_diff(settings.sources.len());
        }

        for (path, source) in settings.paths.iter().zip(&settings.sources) {
            let id = SourceId::new(source.clone());
            if sources.get(&id).is_none() {
                tracing::debug!("Dropping override {} -> '{}': source not loaded", path, id);
                report.dropped.push(path.clone());
                continue;
            }
            store.set(path.clone(), id);
        }
        report.restored = store.len();

        if !report.dropped.is_empty() {
            tracing::info!(
                "Dropped {} override(s) for packages that are no longer loaded",
                report.dropped.len()
            );
        }

        (store, report)
    }
}

/// Outcome of [`OverrideStore::restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: usize,
    /// Paths whose recorded source is no longer loaded.
    pub dropped: Vec<AssetPath>,
    /// Entries without a partner in the other sequence.
    pub unpaired: usize,
}

/// Persisted form of the override store.
///
/// # JSON format
///
/// ```json
/// {
///   "version": 1,
///   "paths": ["Things/Pawn/Goat/Goat_east", "Things/Pawn/Goat/Goat_west"],
///   "sources": ["better.goats", "better.goats"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub paths: Vec<AssetPath>,
    #[serde(default)]
    pub sources: Vec<String>,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for OverrideSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            paths: Vec::new(),
            sources: Vec::new(),
        }
    }
}

/// Where override settings are persisted.
pub trait OverridePersistence {
    /// Load persisted settings. Returns empty settings when nothing was saved yet.
    fn load_persisted(&self) -> Result<OverrideSettings>;

    fn save_persisted(&self, settings: &OverrideSettings) -> Result<()>;
}

/// JSON file persistence.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: Utf8PathBuf,
}

impl SettingsFile {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl OverridePersistence for SettingsFile {
    fn load_persisted(&self) -> Result<OverrideSettings> {
        if !self.path.as_std_path().exists() {
            return Ok(OverrideSettings::default());
        }

        let contents = std::fs::read_to_string(self.path.as_std_path())?;
        let settings: OverrideSettings = serde_json::from_str(&contents)?;
        if settings.version != SETTINGS_VERSION {
            tracing::warn!(
                "Override settings version {} (expected {}) at {}",
                settings.version,
                SETTINGS_VERSION,
                self.path
            );
        }
        Ok(settings)
    }

    fn save_persisted(&self, settings: &OverrideSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_str().is_empty() {
                std::fs::create_dir_all(parent.as_std_path())?;
            }
        }

        let contents = serde_json::to_string_pretty(settings)?;
        std::fs::write(self.path.as_std_path(), contents)?;
        tracing::debug!("Saved {} override(s) to {}", settings.paths.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ContentSource, MemorySource};
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::{tempdir, NamedTempFile};

    fn sources(ids: &[&str]) -> SourceSet {
        SourceSet::new(
            ids.iter()
                .map(|id| Arc::new(MemorySource::new(*id)) as Arc<dyn ContentSource>)
                .collect(),
        )
    }

    fn sample_store() -> OverrideStore {
        let mut store = OverrideStore::new();
        store.set("Goat_east".into(), "goats".into());
        store.set("Goat_west".into(), "goats".into());
        store.set("Cow_east".into(), "cows".into());
        store
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut store = OverrideStore::new();
        store.set("P".into(), "s".into());
        store.set("P".into(), "s".into());

        assert_eq!(store.get("P"), Some(&SourceId::from("s")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = OverrideStore::new();
        store.set("P".into(), "a".into());
        store.set("P".into(), "b".into());

        assert_eq!(store.get("P"), Some(&SourceId::from("b")));
    }

    #[test]
    fn test_remove() {
        let mut store = sample_store();

        assert_eq!(store.remove("Cow_east"), Some(SourceId::from("cows")));
        assert_eq!(store.remove("Cow_east"), None);
        assert!(store.get("Cow_east").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_settings_without_version_default_to_current() {
        let settings: OverrideSettings =
            serde_json::from_str(r#"{"paths":["Goat_east"],"sources":["goats"]}"#).unwrap();

        assert_eq!(settings.version, 1);
        assert_eq!(settings.paths, vec![AssetPath::from("Goat_east")]);
    }

    #[test]
    fn test_get_absent() {
        let store = OverrideStore::new();
        assert!(store.get("P").is_none());
    }

    #[test]
    fn test_settings_are_parallel_and_sorted() {
        let settings = sample_store().to_settings();

        assert_eq!(settings.version, 1);
        assert_eq!(
            settings.paths,
            vec![
                AssetPath::from("Cow_east"),
                AssetPath::from("Goat_east"),
                AssetPath::from("Goat_west"),
            ]
        );
        assert_eq!(settings.sources, vec!["cows", "goats", "goats"]);
    }

    #[test]
    fn test_round_trip_all_sources_present() {
        let store = sample_store();
        let (restored, report) =
            OverrideStore::restore(&store.to_settings(), &sources(&["goats", "cows"]));

        assert_eq!(restored, store);
        assert_eq!(report.restored, 3);
        assert!(report.dropped.is_empty());
    }

    #[test]
    fn test_restore_drops_missing_source_only() {
        let store = sample_store();
        let (restored, report) =
            OverrideStore::restore(&store.to_settings(), &sources(&["goats"]));

        assert_eq!(restored.len(), 2);
        assert!(restored.get("Cow_east").is_none());
        assert_eq!(restored.get("Goat_east"), Some(&SourceId::from("goats")));
        assert_eq!(restored.get("Goat_west"), Some(&SourceId::from("goats")));
        assert_eq!(report.dropped, vec![AssetPath::from("Cow_east")]);
    }

    #[test]
    fn test_restore_unpaired_entries() {
        let settings = OverrideSettings {
            version: 1,
            paths: vec!["A".into(), "B".into()],
            sources: vec!["goats".to_string()],
        };
        let (restored, report) = OverrideStore::restore(&settings, &sources(&["goats"]));

        assert_eq!(restored.len(), 1);
        assert_eq!(report.unpaired, 1);
    }

    #[test]
    fn test_clear() {
        let mut store = sample_store();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_settings_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("cfg").join("overrides.json")).unwrap();
        let file = SettingsFile::new(path);

        let settings = sample_store().to_settings();
        file.save_persisted(&settings).unwrap();

        assert_eq!(file.load_persisted().unwrap(), settings);
    }

    #[test]
    fn test_settings_file_missing() {
        let dir = tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("overrides.json")).unwrap();
        let settings = SettingsFile::new(path).load_persisted().unwrap();

        assert_eq!(settings, OverrideSettings::default());
    }

    #[test]
    fn test_settings_file_invalid_json() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{ invalid json }").unwrap();
        temp.flush().unwrap();

        let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        assert!(SettingsFile::new(path).load_persisted().is_err());
    }

    #[test]
    fn test_serialization_format() {
        let json = serde_json::to_string(&sample_store().to_settings()).unwrap();

        assert!(json.contains("\"version\":1"));
        assert!(json.contains("\"paths\":[\"Cow_east\""));
        assert!(json.contains("\"sources\":[\"cows\""));
    }
}
