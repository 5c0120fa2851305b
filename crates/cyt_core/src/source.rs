//! Content source abstraction.
//!
//! This module defines the [`ContentSource`] trait that decouples the resolution
//! engine from how a package stores its textures. Implementations provide:
//!
//! - A stable identity and a display name
//! - Whether the package is the official/built-in content
//! - The set of asset paths the package declares
//! - Raw asset bytes for a declared path
//!
//! The crate ships [`FsContentSource`] for package directories on disk and
//! [`MemorySource`] for hosts that already hold their content in memory.

use crate::asset_path::AssetPath;
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// File extensions recognized as textures inside a package's `Textures/` folder.
const TEXTURE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "psd", "dds"];

/// Stable identifier of a content source.
///
/// Identifiers survive process restarts, which is why overrides are persisted by id
/// and re-resolved against the currently loaded sources on every start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A loaded content package that may supply textures.
///
/// Implementations must be [`Send`] + [`Sync`] so sources can be shared between
/// the index, the override store and the interceptor behind an [`Arc`].
pub trait ContentSource: Send + Sync {
    /// Stable identifier (package id).
    fn id(&self) -> &SourceId;

    /// Human-readable package name, if the package declares one.
    fn name(&self) -> Option<&str>;

    /// Whether this is the official/built-in content.
    fn is_official(&self) -> bool;

    /// Every asset path this source declares.
    fn declared_paths(&self) -> Vec<AssetPath>;

    /// Whether this source declares `path`.
    fn provides(&self, path: &str) -> bool;

    /// Fetch the raw bytes stored at `path`.
    ///
    /// Returns [`Error::AssetMissing`] when the source does not declare the path.
    fn fetch_asset(&self, path: &str) -> Result<Vec<u8>>;

    /// Name shown to the player: the package name, else its id, else `(unknown)`.
    fn display_name(&self) -> &str {
        match self.name() {
            Some(name) => name,
            None if !self.id().as_str().is_empty() => self.id().as_str(),
            None => "(unknown)",
        }
    }
}

/// The host's built-in asset loading convention.
///
/// The official source is not necessarily loaded through its own package content
/// holder; hosts typically resolve it through a bundled resource loader instead.
pub trait BuiltinAssets: Send + Sync {
    fn load_builtin(&self, path: &str) -> Option<Vec<u8>>;
}

/// The set of currently loaded sources, in package load order.
#[derive(Clone, Default)]
pub struct SourceSet {
    sources: Vec<Arc<dyn ContentSource>>,
}

impl SourceSet {
    pub fn new(sources: Vec<Arc<dyn ContentSource>>) -> Self {
        Self { sources }
    }

    /// Sources in load order (earliest loaded first).
    pub fn in_load_order(&self) -> &[Arc<dyn ContentSource>] {
        &self.sources
    }

    /// Look a source up by its stable id.
    pub fn get(&self, id: &SourceId) -> Option<&Arc<dyn ContentSource>> {
        self.sources.iter().find(|s| s.id() == id)
    }

    pub fn official(&self) -> Option<&Arc<dyn ContentSource>> {
        self.sources.iter().find(|s| s.is_official())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|s| s.id()))
            .finish()
    }
}

/// In-memory content source.
#[derive(Debug, Clone)]
pub struct MemorySource {
    id: SourceId,
    name: Option<String>,
    official: bool,
    assets: HashMap<AssetPath, Vec<u8>>,
}

impl MemorySource {
    pub fn new(id: impl Into<SourceId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            official: false,
            assets: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn official(mut self) -> Self {
        self.official = true;
        self
    }

    pub fn with_asset(mut self, path: impl Into<AssetPath>, bytes: impl Into<Vec<u8>>) -> Self {
        self.assets.insert(path.into(), bytes.into());
        self
    }

    /// Add several assets whose content is their own path.
    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<AssetPath>,
    {
        for path in paths {
            let path = path.into();
            let bytes = path.as_str().as_bytes().to_vec();
            self.assets.insert(path, bytes);
        }
        self
    }

    pub fn remove_asset(&mut self, path: &str) -> Option<Vec<u8>> {
        self.assets.remove(path)
    }
}

impl ContentSource for MemorySource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_official(&self) -> bool {
        self.official
    }

    fn declared_paths(&self) -> Vec<AssetPath> {
        let mut paths: Vec<AssetPath> = self.assets.keys().cloned().collect();
        paths.sort();
        paths
    }

    fn provides(&self, path: &str) -> bool {
        self.assets.contains_key(path)
    }

    fn fetch_asset(&self, path: &str) -> Result<Vec<u8>> {
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| Error::AssetMissing {
                source_id: self.id.to_string(),
                path: path.to_string(),
            })
    }
}

/// Optional `package.json` manifest at the root of a package directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub official: bool,
}

/// Filesystem-backed content source.
///
/// Reads a package directory laid out as:
///
/// ```text
/// package_dir/
///   package.json                 # Optional: { "id", "name", "official" }
///   Textures/
///     Things/
///       Item/
///         Silver/
///           Silver_a.png         # Asset path = Things/Item/Silver/Silver_a
/// ```
///
/// The id defaults to the directory name. Asset paths are relative to `Textures/`,
/// use forward slashes and have their extension stripped. When two files differ only
/// by extension, the first one found wins.
#[derive(Debug)]
pub struct FsContentSource {
    root: Utf8PathBuf,
    id: SourceId,
    name: Option<String>,
    official: bool,
    files: HashMap<AssetPath, Utf8PathBuf>,
}

impl FsContentSource {
    /// Scan a package directory.
    pub fn open(root: Utf8PathBuf) -> Result<Self> {
        if !root.as_std_path().is_dir() {
            return Err(Error::InvalidPackage(root));
        }

        let manifest_path = root.join("package.json");
        let manifest: PackageManifest = if manifest_path.as_std_path().exists() {
            let contents = std::fs::read_to_string(manifest_path.as_std_path())?;
            serde_json::from_str(&contents)?
        } else {
            PackageManifest::default()
        };

        let id = match manifest.id {
            Some(id) => SourceId::new(id),
            None => match root.file_name() {
                Some(name) => SourceId::new(name),
                None => return Err(Error::InvalidPackage(root)),
            },
        };

        let files = scan_textures(&root.join("Textures"));

        tracing::debug!("Package '{}' at {} declares {} textures", id, root, files.len());

        Ok(Self {
            root,
            id,
            name: manifest.name,
            official: manifest.official,
            files,
        })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl ContentSource for FsContentSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_official(&self) -> bool {
        self.official
    }

    fn declared_paths(&self) -> Vec<AssetPath> {
        let mut paths: Vec<AssetPath> = self.files.keys().cloned().collect();
        paths.sort();
        paths
    }

    fn provides(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn fetch_asset(&self, path: &str) -> Result<Vec<u8>> {
        let file = self.files.get(path).ok_or_else(|| Error::AssetMissing {
            source_id: self.id.to_string(),
            path: path.to_string(),
        })?;
        Ok(std::fs::read(file.as_std_path())?)
    }
}

/// Walk a `Textures/` directory and map asset paths to files.
///
/// A missing directory yields an empty map; unreadable entries are skipped.
fn scan_textures(textures_dir: &Utf8Path) -> HashMap<AssetPath, Utf8PathBuf> {
    let mut files = HashMap::new();
    if !textures_dir.as_std_path().is_dir() {
        return files;
    }

    for entry in walkdir::WalkDir::new(textures_dir.as_std_path()).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", textures_dir, e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(p) => p,
            Err(p) => {
                tracing::warn!("Skipping non-UTF-8 path: {}", p.display());
                continue;
            }
        };

        let Some(ext) = path.extension() else {
            continue;
        };
        if !TEXTURE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            continue;
        }

        let Ok(rel) = path.strip_prefix(textures_dir) else {
            continue;
        };
        let key = rel.with_extension("").as_str().replace('\\', "/");

        files.entry(AssetPath::new(key)).or_insert(path);
    }

    files
}
