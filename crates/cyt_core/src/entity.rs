//! Entity definitions that own graphics.
//!
//! Two kinds of definitions carry textures:
//!
//! - [`ThingDef`]: a single [`GraphicData`] whose [`GraphicKind`] decides how the
//!   base path expands into variants.
//! - [`PawnKindDef`]: a list of life stages, each with twelve optional graphic slots
//!   enumerated by [`GraphicSlot`].
//!
//! Definitions are read-only input. A [`DefCatalog`] loaded from JSON stands in for
//! the host's definition database.

use crate::asset_path::AssetPath;
use crate::error::Result;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// How a graphic's base path expands into concrete texture paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphicKind {
    /// One texture at the base path.
    Single,
    /// Directional textures (`_north`, `_south`, `_east`, `_west`), optionally per body type.
    Multi,
    /// A folder of textures picked by stack size (`_a`, `_b`, ... then `_0`, `_1`, ...).
    StackCount,
    /// Any other graphic class; contributes no paths.
    #[serde(untagged)]
    Other(String),
}

/// Graphic metadata attached to a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicData {
    #[serde(default)]
    pub tex_path: String,
    pub graphic_class: GraphicKind,
}

impl GraphicData {
    pub fn new(tex_path: impl Into<String>, graphic_class: GraphicKind) -> Self {
        Self {
            tex_path: tex_path.into(),
            graphic_class,
        }
    }

    /// The base path, or `None` when it is empty.
    pub fn base_path(&self) -> Option<AssetPath> {
        if self.tex_path.is_empty() {
            None
        } else {
            Some(AssetPath::new(self.tex_path.clone()))
        }
    }
}

/// Common surface of every definition shown in a picker.
pub trait EntityDef {
    fn def_name(&self) -> &str;

    fn label(&self) -> Option<&str>;

    /// Label used for searching and ordering: the label, else the def name.
    fn sort_label(&self) -> &str {
        self.label().unwrap_or_else(|| self.def_name())
    }
}

/// An inanimate entity with at most one graphic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingDef {
    pub def_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphic_data: Option<GraphicData>,
}

impl EntityDef for ThingDef {
    fn def_name(&self) -> &str {
        &self.def_name
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Named graphic slots of a life stage, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicSlot {
    Body,
    FemaleBody,
    Dessicated,
    FemaleDessicated,
    Swimming,
    FemaleSwimming,
    Silhouette,
    FemaleSilhouette,
    Rotting,
    FemaleRotting,
    Stationary,
    FemaleStationary,
}

impl GraphicSlot {
    pub const ALL: [GraphicSlot; 12] = [
        GraphicSlot::Body,
        GraphicSlot::FemaleBody,
        GraphicSlot::Dessicated,
        GraphicSlot::FemaleDessicated,
        GraphicSlot::Swimming,
        GraphicSlot::FemaleSwimming,
        GraphicSlot::Silhouette,
        GraphicSlot::FemaleSilhouette,
        GraphicSlot::Rotting,
        GraphicSlot::FemaleRotting,
        GraphicSlot::Stationary,
        GraphicSlot::FemaleStationary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GraphicSlot::Body => "bodyGraphicData",
            GraphicSlot::FemaleBody => "femaleGraphicData",
            GraphicSlot::Dessicated => "dessicatedBodyGraphicData",
            GraphicSlot::FemaleDessicated => "femaleDessicatedBodyGraphicData",
            GraphicSlot::Swimming => "swimmingGraphicData",
            GraphicSlot::FemaleSwimming => "femaleSwimmingGraphicData",
            GraphicSlot::Silhouette => "silhouetteGraphicData",
            GraphicSlot::FemaleSilhouette => "femaleSilhouetteGraphicData",
            GraphicSlot::Rotting => "rottingGraphicData",
            GraphicSlot::FemaleRotting => "femaleRottingGraphicData",
            GraphicSlot::Stationary => "stationaryGraphicData",
            GraphicSlot::FemaleStationary => "femaleStationaryGraphicData",
        }
    }
}

/// Access to the graphic slots of a staged entity's life stage.
pub trait SlotGraphics {
    fn slot(&self, slot: GraphicSlot) -> Option<&GraphicData>;

    /// Populated slots with a non-empty base path, in [`GraphicSlot::ALL`] order.
    fn populated_slots(&self) -> Vec<(GraphicSlot, AssetPath)> {
        GraphicSlot::ALL
            .iter()
            .filter_map(|&slot| {
                let base = self.slot(slot)?.base_path()?;
                Some((slot, base))
            })
            .collect()
    }
}

/// Graphics of one life stage of a pawn kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PawnKindLifeStage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dessicated_body_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_dessicated_body_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swimming_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_swimming_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silhouette_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_silhouette_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotting_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_rotting_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stationary_graphic_data: Option<GraphicData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_stationary_graphic_data: Option<GraphicData>,
}

impl PawnKindLifeStage {
    /// A life stage with only its body slot populated.
    pub fn with_body(graphic: GraphicData) -> Self {
        Self {
            body_graphic_data: Some(graphic),
            ..Default::default()
        }
    }
}

impl SlotGraphics for PawnKindLifeStage {
    fn slot(&self, slot: GraphicSlot) -> Option<&GraphicData> {
        match slot {
            GraphicSlot::Body => self.body_graphic_data.as_ref(),
            GraphicSlot::FemaleBody => self.female_graphic_data.as_ref(),
            GraphicSlot::Dessicated => self.dessicated_body_graphic_data.as_ref(),
            GraphicSlot::FemaleDessicated => self.female_dessicated_body_graphic_data.as_ref(),
            GraphicSlot::Swimming => self.swimming_graphic_data.as_ref(),
            GraphicSlot::FemaleSwimming => self.female_swimming_graphic_data.as_ref(),
            GraphicSlot::Silhouette => self.silhouette_graphic_data.as_ref(),
            GraphicSlot::FemaleSilhouette => self.female_silhouette_graphic_data.as_ref(),
            GraphicSlot::Rotting => self.rotting_graphic_data.as_ref(),
            GraphicSlot::FemaleRotting => self.female_rotting_graphic_data.as_ref(),
            GraphicSlot::Stationary => self.stationary_graphic_data.as_ref(),
            GraphicSlot::FemaleStationary => self.female_stationary_graphic_data.as_ref(),
        }
    }
}

/// An animate entity whose graphics vary by life stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PawnKindDef {
    pub def_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub life_stages: Vec<PawnKindLifeStage>,
}

impl EntityDef for PawnKindDef {
    fn def_name(&self) -> &str {
        &self.def_name
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Read-only access to the host's definition database.
pub trait DefDatabase {
    fn things(&self) -> &[ThingDef];

    fn pawn_kinds(&self) -> &[PawnKindDef];

    /// Names of every known body type (e.g. `Male`, `Female`, `Thin`).
    fn body_types(&self) -> &[String];
}

/// Definition catalog loaded from JSON.
///
/// # JSON format
///
/// ```json
/// {
///   "bodyTypes": ["Male", "Female"],
///   "things": [
///     { "defName": "Silver", "label": "silver",
///       "graphicData": { "texPath": "Things/Item/Silver", "graphicClass": "StackCount" } }
///   ],
///   "pawnKinds": [
///     { "defName": "Goat", "lifeStages": [
///       { "bodyGraphicData": { "texPath": "Things/Pawn/Goat", "graphicClass": "Multi" } }
///     ] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefCatalog {
    #[serde(default)]
    pub things: Vec<ThingDef>,
    #[serde(default)]
    pub pawn_kinds: Vec<PawnKindDef>,
    #[serde(default)]
    pub body_types: Vec<String>,
}

impl DefCatalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_std_path())?;
        let catalog: Self = serde_json::from_str(&contents)?;
        tracing::info!(
            "Loaded {} thing defs, {} pawn kinds, {} body types from {}",
            catalog.things.len(),
            catalog.pawn_kinds.len(),
            catalog.body_types.len(),
            path
        );
        Ok(catalog)
    }
}

impl DefDatabase for DefCatalog {
    fn things(&self) -> &[ThingDef] {
        &self.things
    }

    fn pawn_kinds(&self) -> &[PawnKindDef] {
        &self.pawn_kinds
    }

    fn body_types(&self) -> &[String] {
        &self.body_types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_label_falls_back_to_def_name() {
        let labelled = ThingDef {
            def_name: "Silver".to_string(),
            label: Some("silver".to_string()),
            graphic_data: None,
        };
        let unlabelled = ThingDef {
            def_name: "Gold".to_string(),
            label: None,
            graphic_data: None,
        };
        assert_eq!(labelled.sort_label(), "silver");
        assert_eq!(unlabelled.sort_label(), "Gold");
    }

    #[test]
    fn test_populated_slots_skip_empty_paths() {
        let stage = PawnKindLifeStage {
            body_graphic_data: Some(GraphicData::new("Goat/Body", GraphicKind::Multi)),
            female_graphic_data: Some(GraphicData::new("", GraphicKind::Multi)),
            rotting_graphic_data: Some(GraphicData::new("Goat/Rot", GraphicKind::Multi)),
            ..Default::default()
        };

        let slots = stage.populated_slots();
        assert_eq!(
            slots,
            vec![
                (GraphicSlot::Body, AssetPath::from("Goat/Body")),
                (GraphicSlot::Rotting, AssetPath::from("Goat/Rot")),
            ]
        );
    }

    #[test]
    fn test_slot_accessors_cover_all_slots() {
        let graphic = GraphicData::new("X", GraphicKind::Multi);
        let stage = PawnKindLifeStage {
            body_graphic_data: Some(graphic.clone()),
            female_graphic_data: Some(graphic.clone()),
            dessicated_body_graphic_data: Some(graphic.clone()),
            female_dessicated_body_graphic_data: Some(graphic.clone()),
            swimming_graphic_data: Some(graphic.clone()),
            female_swimming_graphic_data: Some(graphic.clone()),
            silhouette_graphic_data: Some(graphic.clone()),
            female_silhouette_graphic_data: Some(graphic.clone()),
            rotting_graphic_data: Some(graphic.clone()),
            female_rotting_graphic_data: Some(graphic.clone()),
            stationary_graphic_data: Some(graphic.clone()),
            female_stationary_graphic_data: Some(graphic),
        };
        for slot in GraphicSlot::ALL {
            assert!(stage.slot(slot).is_some(), "{} not wired", slot.name());
        }
    }

    #[test]
    fn test_catalog_json() {
        let json = r#"{
            "bodyTypes": ["Male", "Thin"],
            "things": [
                { "defName": "Silver", "label": "silver",
                  "graphicData": { "texPath": "Things/Item/Silver", "graphicClass": "StackCount" } },
                { "defName": "Lamp",
                  "graphicData": { "texPath": "Things/Lamp", "graphicClass": "Graphic_Flicker" } },
                { "defName": "Ghost" }
            ],
            "pawnKinds": [
                { "defName": "Goat", "lifeStages": [
                    { "bodyGraphicData": { "texPath": "Things/Pawn/Goat", "graphicClass": "Multi" } },
                    {}
                ] }
            ]
        }"#;

        let catalog: DefCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.body_types(), &["Male".to_string(), "Thin".to_string()]);
        assert_eq!(
            catalog.things[0].graphic_data.as_ref().unwrap().graphic_class,
            GraphicKind::StackCount
        );
        assert_eq!(
            catalog.things[1].graphic_data.as_ref().unwrap().graphic_class,
            GraphicKind::Other("Graphic_Flicker".to_string())
        );
        assert!(catalog.things[2].graphic_data.is_none());
        assert_eq!(catalog.pawn_kinds()[0].life_stages.len(), 2);
    }
}
