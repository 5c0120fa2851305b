//! Explicitly owned resolution context.
//!
//! A [`Session`] bundles everything resolution needs: the loaded sources, the
//! [`PathIndex`] built from them, the player's [`OverrideStore`], the known body
//! types and the [`ResolutionInterceptor`]. Nothing is global; hosts create one
//! session at startup and route every texture lookup through [`Session::resolve`].

use crate::asset_path::AssetPath;
use crate::error::Result;
use crate::interceptor::{Interception, ResolutionInterceptor};
use crate::overrides::{OverridePersistence, OverrideSettings, OverrideStore, RestoreReport};
use crate::path_index::{IndexOptions, PathIndex};
use crate::path_set::ResolveContext;
use crate::source::{BuiltinAssets, SourceId, SourceSet};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Texture shown on a picker tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Texture(Vec<u8>),
    /// The source could not supply the path; draw a placeholder.
    Missing,
}

/// Owned state for override resolution.
pub struct Session {
    sources: SourceSet,
    index: PathIndex,
    options: IndexOptions,
    overrides: OverrideStore,
    body_types: Vec<String>,
    interceptor: ResolutionInterceptor,
    /// Paths whose preview already failed to load.
    failed_previews: Mutex<HashSet<AssetPath>>,
}

impl Session {
    /// Build the index and restore persisted overrides.
    ///
    /// Settings that cannot be read are treated as empty, so the session always
    /// opens and resolution behaves as if no override existed.
    pub fn open(
        sources: SourceSet,
        body_types: Vec<String>,
        options: IndexOptions,
        persistence: &dyn OverridePersistence,
    ) -> Self {
        let settings = load_or_empty(persistence);
        let (overrides, report) = OverrideStore::restore(&settings, &sources);
        let session = Self::with_overrides(sources, body_types, options, overrides);

        tracing::info!(
            "Session opened: {} sources, {} overrides restored, {} dropped",
            session.sources.len(),
            report.restored,
            report.dropped.len()
        );
        session
    }

    /// Build a session around an existing store.
    pub fn with_overrides(
        sources: SourceSet,
        body_types: Vec<String>,
        options: IndexOptions,
        overrides: OverrideStore,
    ) -> Self {
        let index = PathIndex::build_with(&sources, &options);
        Self {
            sources,
            index,
            options,
            overrides,
            body_types,
            interceptor: ResolutionInterceptor::new(),
            failed_previews: Mutex::new(HashSet::new()),
        }
    }

    /// Use the host's built-in loader for the official source.
    pub fn with_builtin(mut self, builtin: Arc<dyn BuiltinAssets>) -> Self {
        self.interceptor = self.interceptor.with_builtin(builtin);
        self
    }

    /// Replace the loaded sources and rebuild the index from scratch.
    ///
    /// Overrides are kept as recorded; entries pointing at sources that are no
    /// longer loaded surface as stale lookups rather than being dropped.
    pub fn reload_sources(&mut self, sources: SourceSet) {
        self.sources = sources;
        self.rebuild_index();
    }

    /// Rebuild the index from the current sources.
    pub fn rebuild_index(&mut self) {
        self.index = PathIndex::build_with(&self.sources, &self.options);
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    pub fn overrides_mut(&mut self) -> &mut OverrideStore {
        &mut self.overrides
    }

    pub fn body_types(&self) -> &[String] {
        &self.body_types
    }

    pub fn interceptor(&self) -> &ResolutionInterceptor {
        &self.interceptor
    }

    /// Context handed to path set strategies.
    pub fn resolve_context(&self) -> ResolveContext<'_> {
        ResolveContext::new(&self.index, &self.body_types)
    }

    /// Intercept a lookup of `path`.
    pub fn intercept(&self, path: &str) -> Interception {
        self.interceptor
            .intercept(path, &self.overrides, &self.sources)
    }

    /// Resolve `path`, deferring to `host_lookup` unless an override substitutes it.
    pub fn resolve<F>(&self, path: &str, host_lookup: F) -> Option<Vec<u8>>
    where
        F: FnOnce(&str) -> Option<Vec<u8>>,
    {
        self.interceptor
            .resolve(path, &self.overrides, &self.sources, host_lookup)
    }

    /// Fetch the texture a picker tile shows for `path` in `source`.
    pub fn preview(&self, path: &str, source: &SourceId) -> Preview {
        let asset = self
            .sources
            .get(source)
            .and_then(|s| self.interceptor.fetch(s.as_ref(), path));

        match asset {
            Some(bytes) => Preview::Texture(bytes),
            None => {
                let first = match self.failed_previews.lock() {
                    Ok(mut failed) => failed.insert(AssetPath::from(path)),
                    Err(poisoned) => poisoned.into_inner().insert(AssetPath::from(path)),
                };
                if first {
                    tracing::error!("Failed to retrieve texture {} from '{}'", path, source);
                }
                Preview::Missing
            }
        }
    }

    /// Persist the current overrides.
    pub fn save(&self, persistence: &dyn OverridePersistence) -> Result<()> {
        persistence.save_persisted(&self.overrides.to_settings())
    }

    /// Restore overrides from `persistence`, replacing the current store.
    ///
    /// Unreadable settings leave the session with no overrides.
    pub fn reload_overrides(&mut self, persistence: &dyn OverridePersistence) -> RestoreReport {
        let settings = load_or_empty(persistence);
        let (overrides, report) = OverrideStore::restore(&settings, &self.sources);
        self.overrides = overrides;
        report
    }
}

fn load_or_empty(persistence: &dyn OverridePersistence) -> OverrideSettings {
    match persistence.load_persisted() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Ignoring unreadable override settings: {}", e);
            OverrideSettings::default()
        }
    }
}
