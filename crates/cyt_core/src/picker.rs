//! Picker session logic.
//!
//! A [`Picker`] backs one open texture picker: it finds the definitions whose
//! representative path is contested, filters and orders them for a search string,
//! lists the candidate sources for each entry and records the player's selections
//! in the session's [`OverrideStore`](crate::OverrideStore). Layout and drawing are
//! left to the host UI.

use crate::entity::EntityDef;
use crate::error::{Error, Result};
use crate::path_set::{PathSet, PathSetStrategy};
use crate::session::Session;
use crate::source::SourceId;
use std::collections::BTreeSet;

/// A contested definition shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    /// Position of the definition in the picker's definition list.
    pub def_index: usize,
    pub def_name: String,
    pub label: String,
    pub default_set: PathSet,
}

/// One candidate source for an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub source: SourceId,
    pub display_name: String,
    pub official: bool,
    /// Whether the player already chose this source for the entry.
    pub chosen: bool,
}

/// Picker over one kind of definition.
pub struct Picker<'d, S: PathSetStrategy> {
    strategy: S,
    defs: &'d [S::Def],
    /// Contested entries, unfiltered.
    contested: Vec<PickerEntry>,
    /// Last search string and the entries it produced.
    cache: Option<(String, Vec<PickerEntry>)>,
    /// Definitions whose overrides changed while the picker was open.
    touched: BTreeSet<String>,
}

impl<'d, S> Picker<'d, S>
where
    S: PathSetStrategy,
    S::Def: EntityDef,
{
    /// Compute default path sets for every definition and keep the contested ones.
    pub fn open(strategy: S, defs: &'d [S::Def], session: &Session) -> Self {
        let ctx = session.resolve_context();
        let contested: Vec<PickerEntry> = defs
            .iter()
            .enumerate()
            .filter_map(|(def_index, def)| {
                let default_set = strategy.default_path_set(def, &ctx);
                let representative = default_set.representative.as_ref()?;
                if !session.index().is_contested(representative.as_str()) {
                    return None;
                }
                Some(PickerEntry {
                    def_index,
                    def_name: def.def_name().to_string(),
                    label: def.sort_label().to_string(),
                    default_set,
                })
            })
            .collect();

        tracing::info!(
            "Picker opened: {} of {} definitions contested",
            contested.len(),
            defs.len()
        );

        Self {
            strategy,
            defs,
            contested,
            cache: None,
            touched: BTreeSet::new(),
        }
    }

    /// Number of contested entries before filtering.
    pub fn contested_count(&self) -> usize {
        self.contested.len()
    }

    /// Contested entries matching `search`, ordered by label (ignoring case) then def name.
    ///
    /// Matching is a case-insensitive substring test on the label. The result is
    /// cached until the search string changes.
    pub fn entries(&mut self, search: &str) -> &[PickerEntry] {
        let stale = match &self.cache {
            Some((cached, _)) => cached != search,
            None => true,
        };

        if stale {
            let needle = search.to_lowercase();
            let mut entries: Vec<PickerEntry> = self
                .contested
                .iter()
                .filter(|e| needle.is_empty() || e.label.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            entries.sort_by_cached_key(|e| (e.label.to_lowercase(), e.def_name.clone()));
            self.cache = Some((search.to_string(), entries));
        }

        match &self.cache {
            Some((_, entries)) => entries.as_slice(),
            None => &[],
        }
    }

    /// Candidate sources for an entry, in index order.
    pub fn tiles(&self, entry: &PickerEntry, session: &Session) -> Vec<Tile> {
        let Some(representative) = &entry.default_set.representative else {
            return Vec::new();
        };
        let chosen = session.overrides().get(representative.as_str());

        session
            .index()
            .sources_for(representative.as_str())
            .iter()
            .map(|source| Tile {
                source: source.id().clone(),
                display_name: source.display_name().to_string(),
                official: source.is_official(),
                chosen: chosen == Some(source.id()),
            })
            .collect()
    }

    /// Assign `source` to every path of the entry's graphic. Returns the number of
    /// overrides written.
    pub fn select(
        &mut self,
        entry: &PickerEntry,
        source: &SourceId,
        session: &mut Session,
    ) -> Result<usize> {
        let def = self
            .defs
            .get(entry.def_index)
            .ok_or_else(|| Error::Other(format!("No definition at {}", entry.def_index)))?;
        let content = session
            .sources()
            .get(source)
            .cloned()
            .ok_or_else(|| Error::UnknownSource(source.to_string()))?;

        let full_set = self
            .strategy
            .full_path_set(def, content.as_ref(), &session.resolve_context());

        let overrides = session.overrides_mut();
        for path in &full_set.paths {
            overrides.set(path.clone(), source.clone());
        }

        tracing::info!(
            "{}: {} path(s) now use '{}'",
            entry.def_name,
            full_set.len(),
            source
        );
        self.touched.insert(entry.def_name.clone());
        Ok(full_set.len())
    }

    /// Look up an entry by def name among all contested entries.
    pub fn find(&self, def_name: &str) -> Option<&PickerEntry> {
        self.contested.iter().find(|e| e.def_name == def_name)
    }

    /// Close the picker. Returns the def names whose graphics must be re-initialized
    /// so the host picks up the new overrides.
    pub fn close(self) -> Vec<String> {
        self.touched.into_iter().collect()
    }
}
