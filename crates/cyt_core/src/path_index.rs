//! Asset path indexing across content sources.
//!
//! The [`PathIndex`] is built once per session by asking every loaded source which
//! asset paths it declares. It answers two questions the rest of the crate relies on:
//!
//! 1. **Source lookup** ([`sources_for`](PathIndex::sources_for)) — which sources
//!    supply a path, in precedence order. The first entry is the source the host
//!    would use when no override is recorded.
//! 2. **Contestedness** ([`is_contested`](PathIndex::is_contested)) — whether two or
//!    more sources supply the same path.
//!
//! The index is never updated in place. Any change to the loaded sources requires a
//! fresh [`build`](PathIndex::build), and contestedness is always read from the
//! current lists so nothing can go stale between builds.

use crate::asset_path::AssetPath;
use crate::config::OfficialFallback;
use crate::source::{ContentSource, SourceSet};
use std::collections::HashMap;
use std::sync::Arc;

/// Options controlling how the index treats the official source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
    pub official_fallback: OfficialFallback,
}

/// Index of asset path -> sources that provide it.
#[derive(Default)]
pub struct PathIndex {
    /// Asset path -> providing sources, in the order they were supplied to `build`.
    entries: HashMap<AssetPath, Vec<Arc<dyn ContentSource>>>,
}

impl PathIndex {
    /// Build an index from sources in precedence order.
    ///
    /// For every source, in the given order, every declared path gets the source
    /// appended to its list. Callers pass the most recently loaded package first.
    /// Every source is treated alike, including the official one.
    pub fn build<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<dyn ContentSource>>,
    {
        let mut entries: HashMap<AssetPath, Vec<Arc<dyn ContentSource>>> = HashMap::new();
        let mut source_count = 0;

        for source in sources {
            source_count += 1;
            let paths = source.declared_paths();
            if paths.is_empty() {
                tracing::debug!("Source '{}' declares no textures", source.id());
                continue;
            }
            for path in paths {
                entries.entry(path).or_default().push(Arc::clone(source));
            }
        }

        let index = Self { entries };
        tracing::info!(
            "Path index built: {} sources, {} paths, {} contested",
            source_count,
            index.len(),
            index.contested_paths().count()
        );
        index
    }

    /// Build an index from a load-ordered [`SourceSet`], applying `options`.
    ///
    /// Sources are indexed latest-loaded first. The official source is handled
    /// according to [`OfficialFallback`]:
    ///
    /// - `Always`: indexed in its load-order position like any other source.
    /// - `ContestedOnly`: appended last, and only to paths that some other source
    ///   already provides.
    /// - `Never`: left out of the index.
    pub fn build_with(sources: &SourceSet, options: &IndexOptions) -> Self {
        let reversed = sources.in_load_order().iter().rev();

        match options.official_fallback {
            OfficialFallback::Always => Self::build(reversed),
            OfficialFallback::Never => Self::build(reversed.filter(|s| !s.is_official())),
            OfficialFallback::ContestedOnly => {
                let mut index = Self::build(reversed.filter(|s| !s.is_official()));
                if let Some(official) = sources.official() {
                    let mut matched = 0;
                    for (path, list) in index.entries.iter_mut() {
                        if official.provides(path.as_str()) {
                            list.push(Arc::clone(official));
                            matched += 1;
                        }
                    }
                    tracing::info!(
                        "Official source '{}' matched {} modded paths",
                        official.id(),
                        matched
                    );
                }
                index
            }
        }
    }

    /// Sources providing `path`, in precedence order. Empty if unknown.
    pub fn sources_for(&self, path: &str) -> &[Arc<dyn ContentSource>] {
        self.entries.get(path).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Whether two or more sources provide `path`.
    pub fn is_contested(&self, path: &str) -> bool {
        self.sources_for(path).len() >= 2
    }

    /// Whether any source provides `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// The source the host uses when nothing overrides `path`.
    pub fn default_source(&self, path: &str) -> Option<&Arc<dyn ContentSource>> {
        self.sources_for(path).first()
    }

    /// All contested paths, in no particular order.
    pub fn contested_paths(&self) -> impl Iterator<Item = &AssetPath> {
        self.entries
            .iter()
            .filter(|(_, sources)| sources.len() >= 2)
            .map(|(path, _)| path)
    }

    /// Number of distinct indexed paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn source(id: &str, paths: &[&str]) -> Arc<dyn ContentSource> {
        Arc::new(MemorySource::new(id).with_paths(paths.iter().copied()))
    }

    fn ids(index: &PathIndex, path: &str) -> Vec<String> {
        index
            .sources_for(path)
            .iter()
            .map(|s| s.id().to_string())
            .collect()
    }

    #[test]
    fn test_build_preserves_supplied_order() {
        let sources = vec![
            source("late", &["A", "B"]),
            source("early", &["A"]),
        ];
        let index = PathIndex::build(&sources);

        assert_eq!(ids(&index, "A"), vec!["late", "early"]);
        assert_eq!(ids(&index, "B"), vec!["late"]);
        assert_eq!(index.default_source("A").unwrap().id().as_str(), "late");
    }

    #[test]
    fn test_contested_matches_source_count() {
        let sources = vec![
            source("a", &["P", "Q"]),
            source("b", &["P"]),
            source("c", &["P", "R"]),
        ];
        let index = PathIndex::build(&sources);

        for path in ["P", "Q", "R", "unknown"] {
            assert_eq!(
                index.is_contested(path),
                index.sources_for(path).len() >= 2,
                "contestedness mismatch for {}",
                path
            );
        }
        assert!(index.is_contested("P"));
        assert!(!index.is_contested("Q"));
        assert!(!index.is_contested("unknown"));
        assert!(index.sources_for("unknown").is_empty());
        assert_eq!(index.contested_paths().count(), 1);
    }

    #[test]
    fn test_rebuild_recomputes_contestedness() {
        let first = vec![source("a", &["P"]), source("b", &["P"])];
        let index = PathIndex::build(&first);
        assert!(index.is_contested("P"));

        let second = vec![source("a", &["P"])];
        let index = PathIndex::build(&second);
        assert!(!index.is_contested("P"));
        assert_eq!(index.sources_for("P").len(), 1);
    }

    #[test]
    fn test_empty_sources_contribute_nothing() {
        let sources = vec![source("empty", &[]), source("a", &["P"])];
        let index = PathIndex::build(&sources);

        assert_eq!(index.len(), 1);
        assert!(index.contains("P"));
    }

    fn load_ordered() -> SourceSet {
        SourceSet::new(vec![
            Arc::new(MemorySource::new("core").official().with_paths(["Goat", "Cow"]))
                as Arc<dyn ContentSource>,
            Arc::new(MemorySource::new("goats").with_paths(["Goat"])),
            Arc::new(MemorySource::new("goats2").with_paths(["Goat", "Sheep"])),
        ])
    }

    #[test]
    fn test_build_with_latest_loaded_first() {
        let index = PathIndex::build_with(&load_ordered(), &IndexOptions::default());

        assert_eq!(ids(&index, "Goat"), vec!["goats2", "goats", "core"]);
        assert_eq!(ids(&index, "Cow"), vec!["core"]);
    }

    #[test]
    fn test_build_with_official_never() {
        let options = IndexOptions {
            official_fallback: OfficialFallback::Never,
        };
        let index = PathIndex::build_with(&load_ordered(), &options);

        assert_eq!(ids(&index, "Goat"), vec!["goats2", "goats"]);
        assert!(!index.contains("Cow"));
    }

    #[test]
    fn test_build_with_official_contested_only() {
        let options = IndexOptions {
            official_fallback: OfficialFallback::ContestedOnly,
        };
        let index = PathIndex::build_with(&load_ordered(), &options);

        assert_eq!(ids(&index, "Goat"), vec!["goats2", "goats", "core"]);
        assert_eq!(ids(&index, "Sheep"), vec!["goats2"]);
        // Paths only the official source provides are not indexed.
        assert!(!index.contains("Cow"));
    }
}
