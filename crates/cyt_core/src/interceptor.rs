//! Asset lookup interception.
//!
//! Every texture-by-path lookup the host performs is offered to the
//! [`ResolutionInterceptor`] first. With no override recorded the lookup passes
//! through untouched. With an override, the asset is fetched from the chosen source
//! and the host's own resolution is skipped. If the chosen source can no longer
//! supply the path the override is stale: the interceptor reports it (once per path)
//! and the host resolves normally.

use crate::asset_path::AssetPath;
use crate::overrides::OverrideStore;
use crate::source::{BuiltinAssets, ContentSource, SourceId, SourceSet};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Outcome of intercepting one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
    /// No override recorded; the host resolves the path itself.
    PassThrough,
    /// The override's source supplied the asset.
    Substituted { source: SourceId, asset: Vec<u8> },
    /// An override exists but its source cannot supply the path.
    Stale { source: SourceId },
}

/// Redirects asset lookups to the sources recorded in an [`OverrideStore`].
#[derive(Default)]
pub struct ResolutionInterceptor {
    builtin: Option<Arc<dyn BuiltinAssets>>,
    /// Paths already reported as stale.
    reported_stale: Mutex<HashSet<AssetPath>>,
}

impl ResolutionInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load assets of the official source through the host's built-in loader.
    pub fn with_builtin(mut self, builtin: Arc<dyn BuiltinAssets>) -> Self {
        self.builtin = Some(builtin);
        self
    }

    /// Decide how the lookup of `path` is resolved.
    pub fn intercept(
        &self,
        path: &str,
        overrides: &OverrideStore,
        sources: &SourceSet,
    ) -> Interception {
        let Some(id) = overrides.get(path) else {
            return Interception::PassThrough;
        };

        let asset = sources.get(id).and_then(|source| self.fetch(source.as_ref(), path));
        match asset {
            Some(asset) => Interception::Substituted {
                source: id.clone(),
                asset,
            },
            None => {
                self.report_stale(path, id);
                Interception::Stale { source: id.clone() }
            }
        }
    }

    /// Resolve `path`, calling `host_lookup` whenever the interceptor does not
    /// substitute an asset.
    pub fn resolve<F>(
        &self,
        path: &str,
        overrides: &OverrideStore,
        sources: &SourceSet,
        host_lookup: F,
    ) -> Option<Vec<u8>>
    where
        F: FnOnce(&str) -> Option<Vec<u8>>,
    {
        match self.intercept(path, overrides, sources) {
            Interception::Substituted { asset, .. } => Some(asset),
            Interception::PassThrough | Interception::Stale { .. } => host_lookup(path),
        }
    }

    /// Fetch `path` from `source` using the loading convention that applies to it.
    pub fn fetch(&self, source: &dyn ContentSource, path: &str) -> Option<Vec<u8>> {
        if source.is_official() {
            if let Some(builtin) = &self.builtin {
                return builtin.load_builtin(path);
            }
        }
        source.fetch_asset(path).ok()
    }

    fn report_stale(&self, path: &str, id: &SourceId) {
        let first = match self.reported_stale.lock() {
            Ok(mut reported) => reported.insert(AssetPath::from(path)),
            Err(poisoned) => poisoned.into_inner().insert(AssetPath::from(path)),
        };
        if first {
            tracing::warn!(
                "Override for '{}' points at '{}', which no longer provides it; using default resolution",
                path,
                id
            );
        }
    }

    /// Number of distinct paths reported as stale so far.
    pub fn stale_count(&self) -> usize {
        match self.reported_stale.lock() {
            Ok(reported) => reported.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl fmt::Debug for ResolutionInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionInterceptor")
            .field("builtin", &self.builtin.is_some())
            .field("stale", &self.stale_count())
            .finish()
    }
}
