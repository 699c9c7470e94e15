//! Material take-off report.
//!
//! Aggregates a built piece list into ordering quantities: timber linear
//! metres keyed by section, sheet counts, and cladding/glazing areas.
//! Sections and lengths come from each piece's axis-aligned bounds, so
//! rotated members (braces, sloped plates, hip rafters) are approximated
//! by their world-aligned extents; good enough for an estimate, not a
//! cutting list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::consts::BOARD_PITCH_MM;
use crate::context::{Component, Piece, PieceKind};

/// Aggregated material quantities for one build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuantityReport {
    /// Total number of pieces.
    pub piece_count: usize,
    /// Piece counts per top-level component.
    pub pieces_by_component: BTreeMap<String, usize>,
    /// Timber linear metres keyed by section label (e.g. `"50x75"`).
    pub timber_linear_m: BTreeMap<String, f64>,
    /// Decking and sheathing sheet/strip count.
    pub sheet_count: usize,
    /// Exterior cladding area in m², both dividers and walls.
    pub cladding_area_m2: f64,
    /// Cladding board linear metres, estimated from area at the course
    /// pitch.
    pub cladding_linear_m: f64,
    /// Glazing area in m².
    pub glass_area_m2: f64,
    /// Insulation volume in m³.
    pub insulation_m3: f64,
}

fn component_label(c: Component) -> &'static str {
    match c {
        Component::Base => "base",
        Component::Walls => "walls",
        Component::Cladding => "cladding",
        Component::Roof => "roof",
        Component::Openings => "openings",
        Component::Dividers => "dividers",
        Component::Attachments => "attachments",
    }
}

fn is_timber(kind: PieceKind) -> bool {
    matches!(
        kind,
        PieceKind::Joist
            | PieceKind::Plate
            | PieceKind::Stud
            | PieceKind::Header
            | PieceKind::Cripple
            | PieceKind::Sill
            | PieceKind::Rafter
            | PieceKind::Tie
            | PieceKind::Purlin
            | PieceKind::Fascia
            | PieceKind::Board
            | PieceKind::FrameRail
    )
}

/// Sorted piece extents in mm, smallest first.
fn sorted_extents(p: &Piece) -> [f64; 3] {
    let bb = p.mesh.aabb();
    let mut dims = [
        bb.max[0] - bb.min[0],
        bb.max[1] - bb.min[1],
        bb.max[2] - bb.min[2],
    ];
    dims.sort_by(f64::total_cmp);
    dims
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Aggregate a piece list into a [`QuantityReport`].
pub fn quantities(pieces: &[Piece]) -> QuantityReport {
    let mut report = QuantityReport {
        piece_count: pieces.len(),
        ..QuantityReport::default()
    };
    for p in pieces {
        *report
            .pieces_by_component
            .entry(component_label(p.component).to_string())
            .or_insert(0) += 1;
        let [a, b, len] = sorted_extents(p);
        match p.kind {
            kind if is_timber(kind) => {
                let label = format!("{}x{}", a.round() as i64, b.round() as i64);
                *report.timber_linear_m.entry(label).or_insert(0.0) += len / 1000.0;
            }
            PieceKind::Deck | PieceKind::Sheathing => {
                report.sheet_count += 1;
            }
            PieceKind::Cladding => {
                // two-sided shell: one face is half the surface
                report.cladding_area_m2 += p.mesh.surface_area() / 2.0 / 1e6;
            }
            PieceKind::Glass => {
                report.glass_area_m2 += b * len / 1e6;
            }
            PieceKind::Insulation => {
                report.insulation_m3 += a * b * len / 1e9;
            }
            _ => {}
        }
    }
    for v in report.timber_linear_m.values_mut() {
        *v = round3(*v);
    }
    report.cladding_linear_m = round3(report.cladding_area_m2 / (BOARD_PITCH_MM / 1000.0));
    report.cladding_area_m2 = round3(report.cladding_area_m2);
    report.glass_area_m2 = round3(report.glass_area_m2);
    report.insulation_m3 = round3(report.insulation_m3);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{MAT_GLASS, MAT_TIMBER};
    use shedwright_mesh::TriMesh;

    fn piece(kind: PieceKind, mesh: TriMesh) -> Piece {
        Piece::new("p", Component::Walls, kind, MAT_TIMBER, mesh)
    }

    #[test]
    fn studs_accumulate_by_section() {
        let pieces = vec![
            piece(PieceKind::Stud, TriMesh::cuboid(50.0, 2000.0, 75.0)),
            piece(PieceKind::Stud, TriMesh::cuboid(50.0, 1500.0, 75.0)),
            piece(PieceKind::Plate, TriMesh::cuboid(2400.0, 50.0, 75.0)),
        ];
        let r = quantities(&pieces);
        assert_eq!(r.piece_count, 3);
        assert_eq!(r.timber_linear_m.len(), 1);
        assert!((r.timber_linear_m["50x75"] - 5.9).abs() < 1e-9);
    }

    #[test]
    fn sheets_glass_and_insulation_are_tallied() {
        let pieces = vec![
            piece(PieceKind::Deck, TriMesh::cuboid(1220.0, 18.0, 2440.0)),
            piece(PieceKind::Sheathing, TriMesh::cuboid(1200.0, 18.0, 2400.0)),
            Piece::new(
                "glass",
                Component::Openings,
                PieceKind::Glass,
                MAT_GLASS,
                TriMesh::cuboid(900.0, 750.0, 4.0),
            ),
            piece(PieceKind::Insulation, TriMesh::cuboid(1000.0, 75.0, 2000.0)),
        ];
        let r = quantities(&pieces);
        assert_eq!(r.sheet_count, 2);
        assert!((r.glass_area_m2 - 0.675).abs() < 1e-9);
        assert!((r.insulation_m3 - 0.15).abs() < 1e-9);
    }

    #[test]
    fn cladding_counts_one_face_of_the_shell() {
        let mesh = TriMesh::cuboid(2000.0, 1000.0, 18.0);
        let pieces = vec![Piece::new(
            "clad",
            Component::Cladding,
            PieceKind::Cladding,
            "cladding",
            mesh,
        )];
        let r = quantities(&pieces);
        // half of the closed-box surface: 2·10⁶ face + edge strips
        assert!(
            r.cladding_area_m2 > 2.0 && r.cladding_area_m2 < 2.2,
            "{}",
            r.cladding_area_m2
        );
    }

    #[test]
    fn deck_sheet_count_matches_the_geometry() {
        use crate::base::build_base;
        use crate::dims::resolve_dims;
        use shedwright_config::{Overhangs, SizeInput, SizingMode, WallVariant};

        let size = SizeInput {
            mode: SizingMode::Frame,
            width_mm: 3600.0,
            depth_mm: 2400.0,
        };
        let dims = resolve_dims(&size, &Overhangs::default());
        let pieces = build_base(&dims, WallVariant::Basic);
        let deck = pieces.iter().filter(|p| p.kind == PieceKind::Deck).count();
        let r = quantities(&pieces);
        assert!(deck > 0);
        assert_eq!(r.sheet_count, deck);
    }

    #[test]
    fn report_serializes_to_json() {
        let pieces = vec![piece(PieceKind::Stud, TriMesh::cuboid(50.0, 1000.0, 75.0))];
        let r = quantities(&pieces);
        let json = serde_json::to_string(&r).expect("serialize");
        assert!(json.contains("\"50x75\":1.0"), "{json}");
        assert!(json.contains("\"piece_count\":1"));
    }

    #[test]
    fn components_are_labelled() {
        let pieces = vec![
            Piece::new(
                "tile",
                Component::Base,
                PieceKind::GroundTile,
                "ground",
                TriMesh::cuboid(500.0, 40.0, 500.0),
            ),
            piece(PieceKind::Stud, TriMesh::cuboid(50.0, 1000.0, 75.0)),
        ];
        let r = quantities(&pieces);
        assert_eq!(r.pieces_by_component["base"], 1);
        assert_eq!(r.pieces_by_component["walls"], 1);
    }
}
