//! Picker configuration stored in `choose-textures.toml`.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "choose-textures.toml";

/// How the official/built-in source takes part in the path index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OfficialFallback {
    /// Index the official source like any other package.
    #[default]
    Always,
    /// Add the official source last, only to paths another package already provides.
    ContestedOnly,
    /// Never offer the official source.
    Never,
}

/// Configuration for a picker session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PickerConfig {
    /// Package directories, in load order.
    #[serde(default)]
    pub packages: Vec<Utf8PathBuf>,

    /// JSON definition catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defs: Option<Utf8PathBuf>,

    /// Override settings file.
    #[serde(default = "default_settings_path")]
    pub settings: Utf8PathBuf,

    #[serde(default)]
    pub official_fallback: OfficialFallback,
}

fn default_settings_path() -> Utf8PathBuf {
    Utf8PathBuf::from("overrides.json")
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            packages: Vec::new(),
            defs: None,
            settings: default_settings_path(),
            official_fallback: OfficialFallback::default(),
        }
    }
}

impl PickerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns the default configuration if the file doesn't exist, and an error if
    /// it exists but cannot be parsed. Relative paths are resolved against the
    /// directory containing the file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.as_std_path().exists() {
            tracing::debug!("No config at {}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path.as_std_path())?;
        let mut config: Self = toml::from_str(&contents)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Save configuration as pretty TOML, creating parent directories if needed.
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() {
                std::fs::create_dir_all(parent.as_std_path())?;
            }
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::InvalidConfig(e.to_string()))?;
        std::fs::write(path.as_std_path(), contents)?;
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Utf8Path) {
        let resolve = |p: &Utf8PathBuf| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.clone()
            }
        };
        self.packages = self.packages.iter().map(resolve).collect();
        self.defs = self.defs.as_ref().map(resolve);
        self.settings = resolve(&self.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_default_config() {
        let config = PickerConfig::default();
        assert!(config.packages.is_empty());
        assert_eq!(config.settings, Utf8PathBuf::from("overrides.json"));
        assert_eq!(config.official_fallback, OfficialFallback::Always);
    }

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(PickerConfig::load(&path).unwrap(), PickerConfig::default());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let path = root.join(CONFIG_FILE_NAME);
        std::fs::write(
            path.as_std_path(),
            r#"
packages = ["Data/Core", "/abs/Mods/Goats"]
defs = "defs.json"
official_fallback = "contested-only"
"#,
        )
        .unwrap();

        let config = PickerConfig::load(&path).unwrap();
        assert_eq!(config.packages[0], root.join("Data/Core"));
        assert_eq!(config.packages[1], Utf8PathBuf::from("/abs/Mods/Goats"));
        assert_eq!(config.defs, Some(root.join("defs.json")));
        assert_eq!(config.settings, root.join("overrides.json"));
        assert_eq!(config.official_fallback, OfficialFallback::ContestedOnly);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"packages = [unterminated").unwrap();
        temp.flush().unwrap();

        let path = Utf8Path::from_path(temp.path()).unwrap();
        assert!(matches!(
            PickerConfig::load(path),
            Err(crate::Error::Toml(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let path = root.join("nested").join(CONFIG_FILE_NAME);

        let config = PickerConfig {
            packages: vec![root.join("Core")],
            defs: Some(root.join("defs.json")),
            settings: root.join("overrides.json"),
            official_fallback: OfficialFallback::Never,
        };
        config.save(&path).unwrap();

        assert_eq!(PickerConfig::load(&path).unwrap(), config);
    }
}
