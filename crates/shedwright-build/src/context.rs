//! Build context and piece records.
//!
//! A [`BuildContext`] carries the per-pass inputs that are not part of the
//! building description itself: the caller's invalid-opening flags, the
//! door-swing toggle, and the build generation token used by the deferred
//! cladding phase. There are no ambient globals — every builder receives
//! the context explicitly.

use std::collections::BTreeSet;

use shedwright_mesh::TriMesh;

/// Material key: treated structural timber.
pub const MAT_TIMBER: &str = "timber";
/// Material key: planed joinery timber (doors, windows, trim).
pub const MAT_JOINERY: &str = "joinery";
/// Material key: OSB sheet.
pub const MAT_OSB: &str = "osb";
/// Material key: exterior cladding boards.
pub const MAT_CLADDING: &str = "cladding";
/// Material key: roof covering membrane.
pub const MAT_FELT: &str = "felt";
/// Material key: glazing.
pub const MAT_GLASS: &str = "glass";
/// Material key: steel fittings (hinges, handles).
pub const MAT_STEEL: &str = "steel";
/// Material key: insulation slab.
pub const MAT_INSULATION: &str = "insulation";
/// Material key: ground grid tile.
pub const MAT_GROUND: &str = "ground";
/// Material key: alert rendering for caller-flagged invalid openings.
pub const MAT_ALERT: &str = "alert";

/// Which top-level component a piece belongs to. Components are disposed
/// and rebuilt as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Component {
    /// Ground grid, joists, insulation, decking.
    Base,
    /// Wall frames: plates, studs, opening framing.
    Walls,
    /// Exterior cladding courses.
    Cladding,
    /// Roof structure: trusses, purlins, sheathing, covering, fascia.
    Roof,
    /// Doors, windows, skylights.
    Openings,
    /// Internal partition walls.
    Dividers,
    /// Secondary attached structures.
    Attachments,
}

/// What a piece physically is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    /// Ground grid tile.
    GroundTile,
    /// Rim or inner floor joist.
    Joist,
    /// Insulation bay slab.
    Insulation,
    /// Floor decking sheet or strip.
    Deck,
    /// Wall top or bottom plate.
    Plate,
    /// Vertical wall stud (common, jamb, or end).
    Stud,
    /// Header over an opening.
    Header,
    /// Short stud above a header or below a sill.
    Cripple,
    /// Window sill rail.
    Sill,
    /// Merged cladding courses for one panel.
    Cladding,
    /// Sloped roof rafter.
    Rafter,
    /// Horizontal truss tie beam or collar tie.
    Tie,
    /// Purlin running parallel to the ridge.
    Purlin,
    /// Roof or floor sheathing slab.
    Sheathing,
    /// Roof covering membrane.
    Covering,
    /// Fascia or barge board.
    Fascia,
    /// Gable infill panel.
    GableInfill,
    /// Door/window/skylight frame member.
    FrameRail,
    /// Door face board, ledge, or brace.
    Board,
    /// Glazing pane.
    Glass,
    /// Hinge, handle, or other fitting.
    Hardware,
}

/// One named, material-tagged mesh in the build output.
#[derive(Debug, Clone)]
pub struct Piece {
    /// Human-readable name (e.g. `wall-front-panel0-stud2`).
    pub name: String,
    /// Owning component.
    pub component: Component,
    /// Physical kind.
    pub kind: PieceKind,
    /// Material key into the caller's material database.
    pub material: String,
    /// World-space geometry, millimetres.
    pub mesh: TriMesh,
}

impl Piece {
    /// Construct a piece.
    pub fn new(
        name: impl Into<String>,
        component: Component,
        kind: PieceKind,
        material: &str,
        mesh: TriMesh,
    ) -> Self {
        Self {
            name: name.into(),
            component,
            kind,
            material: material.to_string(),
            mesh,
        }
    }
}

/// Per-pass build inputs beyond the building description.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Opening ids the caller has flagged as invalid; their assemblies are
    /// built with [`MAT_ALERT`] instead of being rejected.
    pub invalid_openings: BTreeSet<String>,
    /// Monotonically increasing build generation. Deferred cladding
    /// executions carrying a stale generation no-op.
    pub generation: u64,
    /// Apply the ±90° door swing rotation to door assemblies.
    pub open_doors: bool,
}

impl BuildContext {
    /// Context for generation zero with no flags.
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Material for an opening assembly: alert if the caller flagged the id.
    pub fn opening_material(&self, id: &str, default: &'static str) -> &'static str {
        if self.invalid_openings.contains(id) {
            MAT_ALERT
        } else {
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_material_flags_alert() {
        let mut ctx = BuildContext::new(1);
        ctx.invalid_openings.insert("door-9".to_string());
        assert_eq!(ctx.opening_material("door-9", MAT_JOINERY), MAT_ALERT);
        assert_eq!(ctx.opening_material("door-1", MAT_JOINERY), MAT_JOINERY);
    }
}
