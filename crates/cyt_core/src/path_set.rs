//! Entity graphic path sets.
//!
//! A player picks a source for an *entity*, but the host looks textures up by
//! *path*, and one entity graphic spans many paths: four directions, per-body-type
//! directions, stack-count variants and, for pawn kinds, every slot of every life
//! stage. A [`PathSet`] captures all of them together with a single representative
//! path used to test contestedness and to key the picker entry.
//!
//! Expansion rules differ per entity kind, so they live behind the
//! [`PathSetStrategy`] trait with one implementation per kind:
//!
//! - [`ThingPathSets`] for [`ThingDef`]s (single / multi / stack-count graphics)
//! - [`PawnKindPathSets`] for [`PawnKindDef`]s (life stages x graphic slots)

use crate::asset_path::AssetPath;
use crate::entity::{GraphicKind, PawnKindDef, SlotGraphics, ThingDef};
use crate::path_index::PathIndex;
use crate::source::ContentSource;
use std::collections::BTreeSet;

/// Upper bound of the numeric stack-count run (`_0` .. `_9999`).
const MAX_NUMERIC_STACK_SUFFIX: u32 = 10_000;

/// Every path belonging to one entity graphic, plus its representative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    pub paths: BTreeSet<AssetPath>,
    pub representative: Option<AssetPath>,
}

impl PathSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A set holding only `path`, which is also the representative.
    pub fn single(path: AssetPath) -> Self {
        let mut paths = BTreeSet::new();
        paths.insert(path.clone());
        Self {
            paths,
            representative: Some(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}

/// Data the strategies consult while expanding paths.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub index: &'a PathIndex,
    /// Names of every known body type.
    pub body_types: &'a [String],
}

impl<'a> ResolveContext<'a> {
    pub fn new(index: &'a PathIndex, body_types: &'a [String]) -> Self {
        Self { index, body_types }
    }
}

/// Expansion rules for one kind of entity definition.
pub trait PathSetStrategy {
    type Def;

    /// The representative single-path set, independent of any source.
    fn default_path_set(&self, def: &Self::Def, ctx: &ResolveContext<'_>) -> PathSet;

    /// Every variant path that `source` provides for `def`.
    fn full_path_set(
        &self,
        def: &Self::Def,
        source: &dyn ContentSource,
        ctx: &ResolveContext<'_>,
    ) -> PathSet;
}

/// Path expansion for thing definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThingPathSets;

impl PathSetStrategy for ThingPathSets {
    type Def = ThingDef;

    fn default_path_set(&self, def: &ThingDef, ctx: &ResolveContext<'_>) -> PathSet {
        let Some(graphic) = &def.graphic_data else {
            return PathSet::empty();
        };
        let Some(base) = graphic.base_path() else {
            return PathSet::empty();
        };

        match graphic.graphic_class {
            GraphicKind::Single => PathSet::single(base),
            GraphicKind::StackCount => {
                PathSet::single(stack_count_base(&base, ctx.index).with_suffix("_a"))
            }
            GraphicKind::Multi => PathSet::single(base.east()),
            GraphicKind::Other(ref class) => {
                tracing::debug!("{}: unsupported graphic class '{}'", def.def_name, class);
                PathSet::empty()
            }
        }
    }

    fn full_path_set(
        &self,
        def: &ThingDef,
        source: &dyn ContentSource,
        ctx: &ResolveContext<'_>,
    ) -> PathSet {
        let Some(graphic) = &def.graphic_data else {
            return PathSet::empty();
        };
        let Some(base) = graphic.base_path() else {
            return PathSet::empty();
        };

        match graphic.graphic_class {
            GraphicKind::Single => PathSet::single(base),
            GraphicKind::Multi => {
                let paths: BTreeSet<AssetPath> = directional_paths(&base, ctx.body_types)
                    .filter(|p| source.provides(p.as_str()))
                    .collect();
                let east = base.east();
                // Without an `_east` in this source the base path represents the set
                // without being part of it.
                let representative = if source.provides(east.as_str()) {
                    east
                } else {
                    base
                };
                PathSet {
                    paths,
                    representative: Some(representative),
                }
            }
            GraphicKind::StackCount => {
                let stack_base = stack_count_base(&base, ctx.index);
                let ordered = stack_count_paths(&stack_base, ctx.index);
                let representative = ordered.first().cloned();
                PathSet {
                    paths: ordered.into_iter().collect(),
                    representative,
                }
            }
            GraphicKind::Other(_) => PathSet::empty(),
        }
    }
}

/// Path expansion for pawn kind definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PawnKindPathSets;

impl PathSetStrategy for PawnKindPathSets {
    type Def = PawnKindDef;

    /// Scans life stages from last to first and returns the `_east` variant of the
    /// first populated slot whose `_east` texture is indexed.
    fn default_path_set(&self, def: &PawnKindDef, ctx: &ResolveContext<'_>) -> PathSet {
        for stage in def.life_stages.iter().rev() {
            for (_, base) in stage.populated_slots() {
                let east = base.east();
                if ctx.index.contains(east.as_str()) {
                    return PathSet::single(east);
                }
            }
        }
        tracing::debug!("{}: no indexed _east texture in any life stage", def.def_name);
        PathSet::empty()
    }

    fn full_path_set(
        &self,
        def: &PawnKindDef,
        source: &dyn ContentSource,
        ctx: &ResolveContext<'_>,
    ) -> PathSet {
        let mut set = PathSet::empty();

        for stage in &def.life_stages {
            for (_, base) in stage.populated_slots() {
                for path in directional_paths(&base, ctx.body_types) {
                    if !source.provides(path.as_str()) {
                        continue;
                    }
                    if set.representative.is_none() && path.is_east() {
                        set.representative = Some(path.clone());
                    }
                    set.paths.insert(path);
                }
            }
        }

        set
    }
}

/// Direction variants followed by body-type direction variants.
fn directional_paths<'a>(
    base: &'a AssetPath,
    body_types: &'a [String],
) -> impl Iterator<Item = AssetPath> + 'a {
    base.direction_variants()
        .chain(base.body_type_variants(body_types))
}

/// The base a stack-count graphic enumerates its variants from.
///
/// Stack-count textures live in a folder named by `tex_path`, each file repeating the
/// folder name: `Things/Item/Silver` expands to `Things/Item/Silver/Silver_a`. When
/// that folder form has no `_a` texture but `<tex_path>_a` is indexed, the flat form
/// is used instead.
pub fn stack_count_base(tex_path: &AssetPath, index: &PathIndex) -> AssetPath {
    let folder = AssetPath::new(format!("{}/{}", tex_path, tex_path.file_name()));
    if !index.contains(folder.with_suffix("_a").as_str())
        && index.contains(tex_path.with_suffix("_a").as_str())
    {
        return tex_path.clone();
    }
    folder
}

/// Enumerate stack-count variants of `base` that exist anywhere in the index.
///
/// Letters `_a`..`_z` are tried first and the run stops at the first missing letter;
/// numbers `_0`, `_1`, ... follow and stop at the first missing number.
pub fn stack_count_paths(base: &AssetPath, index: &PathIndex) -> Vec<AssetPath> {
    let mut paths = Vec::new();

    for ch in 'a'..='z' {
        let path = base.with_suffix(&format!("_{}", ch));
        if !index.contains(path.as_str()) {
            break;
        }
        paths.push(path);
    }

    for n in 0..MAX_NUMERIC_STACK_SUFFIX {
        let path = base.with_suffix(&format!("_{}", n));
        if !index.contains(path.as_str()) {
            break;
        }
        paths.push(path);
    }

    paths
}
