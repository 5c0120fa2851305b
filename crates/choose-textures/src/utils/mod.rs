use crate::errors::CliError;
use camino::{Utf8Path, Utf8PathBuf};
use cyt_core::{
    ContentSource, DefCatalog, FsContentSource, IndexOptions, PickerConfig, Session, SettingsFile,
    SourceSet,
};
use miette::Result;
use std::sync::Arc;

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

/// Everything a command needs: the open session and where to save it.
pub struct Workspace {
    pub config: PickerConfig,
    pub session: Session,
    pub settings: SettingsFile,
}

impl Workspace {
    /// Load the definition catalog named by the configuration.
    pub fn load_defs(&self) -> Result<DefCatalog> {
        let path = self.config.defs.as_ref().ok_or(CliError::NoDefinitions)?;
        Ok(DefCatalog::load(path).map_err(CliError::from)?)
    }

    pub fn save(&self) -> Result<()> {
        self.session
            .save(&self.settings)
            .map_err(CliError::from)?;
        Ok(())
    }
}

/// Load the configuration file. A missing file is an error for the CLI.
pub fn load_config(config_path: &str) -> Result<PickerConfig> {
    let path = Utf8Path::new(config_path);
    if !path.as_std_path().exists() {
        return Err(CliError::config_not_found(path.as_std_path().to_path_buf()).into());
    }
    Ok(PickerConfig::load(path).map_err(CliError::from)?)
}

/// Open every configured package, in load order.
pub fn open_sources(packages: &[Utf8PathBuf]) -> Result<SourceSet> {
    if packages.is_empty() {
        return Err(CliError::NoPackages.into());
    }

    let mut sources: Vec<Arc<dyn ContentSource>> = Vec::with_capacity(packages.len());
    for dir in packages {
        let source = FsContentSource::open(dir.clone())
            .map_err(|e| CliError::invalid_package(dir.as_std_path().to_path_buf(), e))?;
        sources.push(Arc::new(source));
    }
    Ok(SourceSet::new(sources))
}

/// Load configuration, packages, body types and persisted overrides.
pub fn open_workspace(config_path: &str) -> Result<Workspace> {
    let config = load_config(config_path)?;
    let sources = open_sources(&config.packages)?;

    let body_types = match &config.defs {
        Some(path) => DefCatalog::load(path)
            .map_err(CliError::from)?
            .body_types,
        None => Vec::new(),
    };

    let settings = SettingsFile::new(config.settings.clone());
    tracing::debug!(
        "Opening {} packages, overrides at {}",
        config.packages.len(),
        settings.path()
    );
    let options = IndexOptions {
        official_fallback: config.official_fallback,
    };
    let session = Session::open(sources, body_types, options, &settings);

    Ok(Workspace {
        config,
        session,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("choose-textures.toml");
        assert!(load_config(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_open_workspace() {
        let dir = tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        for (pkg, official) in [("Core", true), ("Goats", false)] {
            let textures = root.join(pkg).join("Textures/Things");
            fs::create_dir_all(&textures).unwrap();
            fs::write(textures.join("Goat_east.png"), pkg).unwrap();
            fs::write(
                root.join(pkg).join("package.json"),
                format!(r#"{{ "id": "{}", "official": {} }}"#, pkg.to_lowercase(), official),
            )
            .unwrap();
        }
        fs::write(root.join("defs.json"), r#"{ "bodyTypes": ["Male"] }"#).unwrap();
        let config = root.join("choose-textures.toml");
        fs::write(
            &config,
            "packages = [\"Core\", \"Goats\"]\ndefs = \"defs.json\"\n",
        )
        .unwrap();

        let workspace = open_workspace(config.as_str()).unwrap();
        assert_eq!(workspace.session.sources().len(), 2);
        assert_eq!(workspace.session.body_types(), &["Male".to_string()]);
        assert!(workspace.session.index().is_contested("Things/Goat_east"));
        assert_eq!(workspace.settings.path(), root.join("overrides.json"));
    }
}
