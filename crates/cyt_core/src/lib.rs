//! Texture override resolution for simulation game content packages.
//!
//! When several installed content packages ship a texture at the same logical path,
//! the host normally picks one by load order. This crate lets a player override that
//! choice per entity graphic and applies the choice whenever the host looks a texture
//! up. It provides:
//!
//! - **Path indexing**: Map every asset path to the sources that provide it
//! - **Path sets**: Expand an entity's graphic into every directional, body-type,
//!   life-stage and stack-count variant that must move together
//! - **Overrides**: A durable path -> source mapping edited by the player
//! - **Interception**: Substitute the chosen source on every asset lookup
//!
//! # Example
//!
//! ```no_run
//! use cyt_core::{FsContentSource, IndexOptions, Session, SettingsFile, SourceSet};
//! use camino::Utf8PathBuf;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let core = FsContentSource::open(Utf8PathBuf::from("Data/Core"))?;
//! let goats = FsContentSource::open(Utf8PathBuf::from("Mods/BetterGoats"))?;
//! let sources = SourceSet::new(vec![Arc::new(core), Arc::new(goats)]);
//!
//! let settings = SettingsFile::new(Utf8PathBuf::from("overrides.json"));
//! let session = Session::open(sources, Vec::new(), IndexOptions::default(), &settings);
//!
//! let texture = session.resolve("Things/Pawn/Animal/Goat/Goat_east", |_| None);
//! println!("resolved {} bytes", texture.map(|t| t.len()).unwrap_or(0));
//! # Ok(())
//! # }
//! ```

pub mod asset_path;
pub mod config;
pub mod entity;
pub mod error;
pub mod interceptor;
pub mod overrides;
pub mod path_index;
pub mod path_set;
pub mod picker;
pub mod session;
pub mod source;

// Re-export main types
pub use asset_path::AssetPath;
pub use config::{OfficialFallback, PickerConfig};
pub use entity::{
    DefCatalog, DefDatabase, EntityDef, GraphicData, GraphicKind, GraphicSlot, PawnKindDef,
    PawnKindLifeStage, SlotGraphics, ThingDef,
};
pub use error::{Error, Result};
pub use interceptor::{Interception, ResolutionInterceptor};
pub use overrides::{OverridePersistence, OverrideSettings, OverrideStore, RestoreReport, SettingsFile};
pub use path_index::{IndexOptions, PathIndex};
pub use path_set::{PathSet, PathSetStrategy, PawnKindPathSets, ResolveContext, ThingPathSets};
pub use picker::{Picker, PickerEntry, Tile};
pub use session::{Preview, Session};
pub use source::{BuiltinAssets, ContentSource, FsContentSource, MemorySource, SourceId, SourceSet};
