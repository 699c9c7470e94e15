#![warn(missing_docs)]

//! Building configuration data model for the shedwright ecosystem.
//!
//! This crate defines the declarative description of a timber-framed garden
//! building: sizing, roof style, wall variant, openings, skylights, internal
//! dividers, and secondary attached structures. It is purely declarative —
//! no mesh data, just the parameters a build pass consumes.
//!
//! All lengths are millimetres. Geometry construction is handled separately
//! by the build engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Millimetre length (f64, conventionally ground-referenced for heights).
pub type Mm = f64;

/// Errors returned when loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document declares a schema version this build does not understand.
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Which of three dimension tiers the configured width/depth refer to.
///
/// The frame footprint is always the canonical tier; the other two derive
/// from it (`frame = base + gap`, `roof = frame + overhangs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Width/depth describe the base (floor) footprint.
    Base,
    /// Width/depth describe the wall frame footprint.
    Frame,
    /// Width/depth describe the roof outer extents.
    Roof,
}

/// Mode-tagged sizing input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeInput {
    /// Which tier the width/depth values refer to.
    pub mode: SizingMode,
    /// Configured width in mm.
    pub width_mm: Mm,
    /// Configured depth in mm.
    pub depth_mm: Mm,
}

impl Default for SizeInput {
    fn default() -> Self {
        Self {
            mode: SizingMode::Frame,
            width_mm: 2400.0,
            depth_mm: 1800.0,
        }
    }
}

/// Per-side roof overhang configuration.
///
/// Unset sides fall back to `uniform_mm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overhangs {
    /// Fallback overhang applied to any side without an explicit value.
    pub uniform_mm: Mm,
    /// Left-side override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_mm: Option<Mm>,
    /// Right-side override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_mm: Option<Mm>,
    /// Front-side override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_mm: Option<Mm>,
    /// Back-side override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_mm: Option<Mm>,
}

impl Default for Overhangs {
    fn default() -> Self {
        Self {
            uniform_mm: 150.0,
            left_mm: None,
            right_mm: None,
            front_mm: None,
            back_mm: None,
        }
    }
}

/// A side of the building, viewed in plan.
///
/// Front/back walls run along X (the width axis); left/right walls run
/// along Z (the depth axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wall {
    /// Wall at Z = 0, running along X.
    Front,
    /// Wall at Z = depth, running along X.
    Back,
    /// Wall at X = 0, running along Z.
    Left,
    /// Wall at X = width, running along Z.
    Right,
}

impl Wall {
    /// All four walls in build order.
    pub const ALL: [Wall; 4] = [Wall::Front, Wall::Back, Wall::Left, Wall::Right];

    /// True for front/back (walls running along the X axis).
    pub fn runs_along_x(self) -> bool {
        matches!(self, Wall::Front | Wall::Back)
    }
}

/// Roof style with style-specific control heights.
///
/// Apex/hipped heights are absolute ground-referenced mm; pent heights are
/// the low and high wall-top heights across the slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum RoofConfig {
    /// Symmetric dual-pitch roof with a central ridge along Z.
    Apex {
        /// Ground-referenced eaves height.
        eaves_mm: Mm,
        /// Ground-referenced visible crest height (clamped ≥ eaves + sheathing).
        crest_mm: Mm,
    },
    /// Single sloped plane.
    Pent {
        /// Wall-top height on the low side.
        min_height_mm: Mm,
        /// Wall-top height on the high side.
        max_height_mm: Mm,
        /// Side toward which the roof rises.
        high_side: Wall,
    },
    /// Apex main slopes plus triangular hip faces at both gable ends.
    Hipped {
        /// Ground-referenced eaves height.
        eaves_mm: Mm,
        /// Ground-referenced visible crest height.
        crest_mm: Mm,
    },
}

impl Default for RoofConfig {
    fn default() -> Self {
        RoofConfig::Apex {
            eaves_mm: 1850.0,
            crest_mm: 2300.0,
        }
    }
}

/// Wall construction variant, selecting stud section and spacing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallVariant {
    /// 50×75 studs, no fixed spacing, long walls split into ≤2400mm panels.
    Basic,
    /// 50×100 studs at fixed 400mm spacing, no panel splitting.
    Insulated,
}

impl Default for WallVariant {
    fn default() -> Self {
        WallVariant::Basic
    }
}

/// Explicit stud section override, replacing the variant's default gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameGauge {
    /// Stud width (along the wall) in mm.
    pub width_mm: Mm,
    /// Stud depth (through the wall) in mm.
    pub depth_mm: Mm,
}

/// Kind of wall opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningKind {
    /// Full-height framed door.
    Door,
    /// Framed window with a sill.
    Window,
}

/// Door construction style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorStyle {
    /// Vertical boards, three ledges, Z-pattern braces, T-hinges.
    LedgedBraced,
    /// Two glazed panels with rail/stile frames and kickboards.
    French,
    /// Boarded show face over a full stile/rail back frame, lever handle.
    MortiseTenon,
}

/// A door or window opening on an exterior wall.
///
/// `position_mm` is measured along the wall from its start corner.
/// Invariant expected of callers: `position + width ≤ wall length`; ids are
/// unique per wall. Violations are not rejected — the caller may flag the
/// offending ids for alert rendering instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    /// Unique id, used for invalid-opening flagging.
    pub id: String,
    /// Which wall the opening sits on.
    pub wall: Wall,
    /// Door or window.
    pub kind: OpeningKind,
    /// Distance from the wall start corner to the opening's near edge.
    pub position_mm: Mm,
    /// Opening width.
    pub width_mm: Mm,
    /// Opening height (from wall base for doors; pane height for windows).
    pub height_mm: Mm,
    /// Door style (ignored for windows).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<DoorStyle>,
    /// Sill height above the wall base (windows only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sill_mm: Option<Mm>,
}

/// A roof face that can carry a skylight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofFace {
    /// Left main slope (apex/hipped) or the single pent plane.
    Left,
    /// Right main slope (apex/hipped).
    Right,
    /// Front hip triangle (hipped only).
    Front,
    /// Back hip triangle (hipped only).
    Back,
}

/// A skylight, positioned in wall-referenced slope coordinates.
///
/// `x_mm` runs along the eaves from the left end of the face; `y_mm` runs
/// up-slope from the wall plate. Wall-referenced coordinates keep the
/// apparent position stable when overhang values change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skylight {
    /// Which roof face carries the skylight.
    pub face: RoofFace,
    /// Distance along the eaves from the face's left end.
    pub x_mm: Mm,
    /// Distance up-slope from the wall plate.
    pub y_mm: Mm,
    /// Width along the eaves direction.
    pub width_mm: Mm,
    /// Height along the slope direction.
    pub height_mm: Mm,
}

/// Axis an internal divider runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividerAxis {
    /// Partition runs along X (parallel to front/back walls).
    X,
    /// Partition runs along Z (parallel to left/right walls).
    Z,
}

/// How tall an internal divider is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividerHeightMode {
    /// Stop at the nominal wall height.
    Walls,
    /// Extend a gable infill up to the roof underside.
    Roof,
}

/// Covering applied to one face of a divider panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceCovering {
    /// Bare frame.
    None,
    /// OSB sheet covering.
    Osb,
    /// Cladding-board covering.
    Cladding,
}

/// A door aperture in an internal divider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerOpening {
    /// Distance along the divider from its start.
    pub position_mm: Mm,
    /// Opening width.
    pub width_mm: Mm,
    /// Opening height.
    pub height_mm: Mm,
}

/// An internal partition wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    /// Unique id.
    pub id: String,
    /// Axis the partition runs along.
    pub axis: DividerAxis,
    /// Position along the perpendicular axis, from the frame origin.
    pub position_mm: Mm,
    /// Flat-top or roof-following height.
    pub height_mode: DividerHeightMode,
    /// Door apertures in the partition.
    #[serde(default)]
    pub openings: Vec<DividerOpening>,
    /// Covering on the near face (lower X or Z side).
    #[serde(default = "default_face_covering")]
    pub covering_near: FaceCovering,
    /// Covering on the far face.
    #[serde(default = "default_face_covering")]
    pub covering_far: FaceCovering,
}

fn default_face_covering() -> FaceCovering {
    FaceCovering::None
}

/// Roof style for an attachment (reduced set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentRoofStyle {
    /// Single plane sloping away from the host wall.
    Pent,
    /// Small apex with its ridge parallel to the host wall.
    Apex,
}

/// Where an attachment snaps onto the main building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachAnchor {
    /// Host wall the attachment shares.
    pub wall: Wall,
    /// Offset of the attachment centre from the host wall's centre.
    #[serde(default)]
    pub offset_from_centre_mm: Mm,
}

/// A secondary lean-to / apex sub-structure attached to one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique id.
    pub id: String,
    /// Host wall and lateral offset.
    pub attach_to: AttachAnchor,
    /// Width along the host wall.
    pub width_mm: Mm,
    /// Depth away from the host wall.
    pub depth_mm: Mm,
    /// Attachment roof style.
    pub roof: AttachmentRoofStyle,
    /// Roof overhang overrides for the attachment.
    #[serde(default)]
    pub overhangs: Overhangs,
    /// Wall construction variant for the attachment walls.
    #[serde(default)]
    pub wall_variant: WallVariant,
    /// Openings on the attachment's three exterior walls, positioned along
    /// the attachment's own wall runs.
    #[serde(default)]
    pub openings: Vec<Opening>,
}

/// Root configuration for one building — the complete input to a build pass.
///
/// Immutable per pass: the engine rebuilds every component from scratch on
/// any change (no incremental diffing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    /// Schema version string.
    pub version: String,
    /// Mode-tagged footprint sizing.
    pub size: SizeInput,
    /// Roof overhang configuration.
    #[serde(default)]
    pub overhangs: Overhangs,
    /// Roof style and control heights.
    #[serde(default)]
    pub roof: RoofConfig,
    /// Wall construction variant.
    #[serde(default)]
    pub wall_variant: WallVariant,
    /// Explicit stud section override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_gauge: Option<FrameGauge>,
    /// Nominal wall height. For apex/hipped roofs the effective wall height
    /// derives from the eaves height instead; this value is used for pent
    /// low-side fallbacks and dividers.
    pub wall_height_mm: Mm,
    /// Door and window openings.
    #[serde(default)]
    pub openings: Vec<Opening>,
    /// Roof skylights.
    #[serde(default)]
    pub skylights: Vec<Skylight>,
    /// Internal partition walls.
    #[serde(default)]
    pub dividers: Vec<Divider>,
    /// Secondary attached structures.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Schema version emitted by this build.
pub const CONFIG_VERSION: &str = "1";

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            size: SizeInput::default(),
            overhangs: Overhangs::default(),
            roof: RoofConfig::default(),
            wall_variant: WallVariant::default(),
            frame_gauge: None,
            wall_height_mm: 1900.0,
            openings: Vec::new(),
            skylights: Vec::new(),
            dividers: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

impl BuildingConfig {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON, checking the schema version.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: BuildingConfig = serde_json::from_str(json)?;
        if cfg.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(cfg.version));
        }
        Ok(cfg)
    }

    /// Openings on a given exterior wall, in declaration order.
    pub fn openings_on(&self, wall: Wall) -> impl Iterator<Item = &Opening> {
        self.openings.iter().filter(move |o| o.wall == wall)
    }

    /// A complete example configuration: apex garden room with a ledged
    /// door, one window, a skylight, a divider, and a pent log-store
    /// attachment. Used by the CLI `example` subcommand and tests.
    pub fn example() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            size: SizeInput {
                mode: SizingMode::Frame,
                width_mm: 3600.0,
                depth_mm: 2400.0,
            },
            overhangs: Overhangs {
                uniform_mm: 150.0,
                front_mm: Some(250.0),
                ..Overhangs::default()
            },
            roof: RoofConfig::Apex {
                eaves_mm: 1950.0,
                crest_mm: 2450.0,
            },
            wall_variant: WallVariant::Basic,
            frame_gauge: None,
            wall_height_mm: 1900.0,
            openings: vec![
                Opening {
                    id: "door-1".to_string(),
                    wall: Wall::Front,
                    kind: OpeningKind::Door,
                    position_mm: 600.0,
                    width_mm: 838.0,
                    height_mm: 1850.0,
                    style: Some(DoorStyle::LedgedBraced),
                    sill_mm: None,
                },
                Opening {
                    id: "window-1".to_string(),
                    wall: Wall::Right,
                    kind: OpeningKind::Window,
                    position_mm: 500.0,
                    width_mm: 900.0,
                    height_mm: 750.0,
                    style: None,
                    sill_mm: Some(900.0),
                },
            ],
            skylights: vec![Skylight {
                face: RoofFace::Left,
                x_mm: 1200.0,
                y_mm: 300.0,
                width_mm: 600.0,
                height_mm: 780.0,
            }],
            dividers: vec![Divider {
                id: "divider-1".to_string(),
                axis: DividerAxis::Z,
                position_mm: 2300.0,
                height_mode: DividerHeightMode::Roof,
                openings: vec![DividerOpening {
                    position_mm: 700.0,
                    width_mm: 750.0,
                    height_mm: 1850.0,
                }],
                covering_near: FaceCovering::Osb,
                covering_far: FaceCovering::None,
            }],
            attachments: vec![Attachment {
                id: "log-store".to_string(),
                attach_to: AttachAnchor {
                    wall: Wall::Right,
                    offset_from_centre_mm: 0.0,
                },
                width_mm: 1500.0,
                depth_mm: 900.0,
                roof: AttachmentRoofStyle::Pent,
                overhangs: Overhangs {
                    uniform_mm: 100.0,
                    ..Overhangs::default()
                },
                wall_variant: WallVariant::Basic,
                openings: Vec::new(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_default_config() {
        let cfg = BuildingConfig::default();
        let json = cfg.to_json().expect("serialize");
        let restored = BuildingConfig::from_json(&json).expect("deserialize");
        assert_eq!(cfg, restored);
    }

    #[test]
    fn roundtrip_example_config() {
        let cfg = BuildingConfig::example();
        let json = cfg.to_json().expect("serialize");
        let restored = BuildingConfig::from_json(&json).expect("deserialize");
        assert_eq!(cfg, restored);
        assert_eq!(restored.openings.len(), 2);
        assert_eq!(restored.attachments.len(), 1);
    }

    #[test]
    fn version_check() {
        let mut cfg = BuildingConfig::default();
        cfg.version = "99".to_string();
        let json = cfg.to_json().unwrap();
        match BuildingConfig::from_json(&json) {
            Err(ConfigError::UnsupportedVersion(v)) => assert_eq!(v, "99"),
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn roof_style_tagged_serde() {
        let roof = RoofConfig::Pent {
            min_height_mm: 2100.0,
            max_height_mm: 2400.0,
            high_side: Wall::Back,
        };
        let json = serde_json::to_string(&roof).unwrap();
        assert!(json.contains(r#""style":"pent""#), "json: {json}");
        let restored: RoofConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(roof, restored);
    }

    #[test]
    fn openings_on_filters_by_wall() {
        let cfg = BuildingConfig::example();
        let front: Vec<_> = cfg.openings_on(Wall::Front).collect();
        assert_eq!(front.len(), 1);
        assert_eq!(front[0].id, "door-1");
        assert_eq!(cfg.openings_on(Wall::Back).count(), 0);
    }

    #[test]
    fn wall_axis_convention() {
        assert!(Wall::Front.runs_along_x());
        assert!(Wall::Back.runs_along_x());
        assert!(!Wall::Left.runs_along_x());
        assert!(!Wall::Right.runs_along_x());
    }

    #[test]
    fn defaults_fill_missing_fields() {
        // A minimal document relying on serde defaults.
        let json = r#"{
            "version": "1",
            "size": { "mode": "frame", "width_mm": 2000, "depth_mm": 1500 },
            "wall_height_mm": 1900
        }"#;
        let cfg = BuildingConfig::from_json(json).expect("minimal config");
        assert_eq!(cfg.wall_variant, WallVariant::Basic);
        assert!(cfg.openings.is_empty());
        assert!(matches!(cfg.roof, RoofConfig::Apex { .. }));
    }
}
