//! Base and floor builder.
//!
//! Produces the ground grid, the joist deck (two rim joists plus inner
//! joists at a fixed pitch), optional insulation bays, and the decking
//! sheet layout. Decking uses a deterministic non-stagger tiling: a grid
//! of full sheets, a remainder strip along each axis, and a corner piece.
//!
//! The base footprint is centred inside the frame footprint (the frame is
//! one gap larger per dimension), so every piece here is offset by half a
//! gap from the frame origin.

use shedwright_config::WallVariant;
use shedwright_mesh::TriMesh;

use crate::consts::{
    BASE_FRAME_GAP_MM, DECK_SHEET_LONG_MM, DECK_SHEET_SHORT_MM, GROUND_CELL_MM,
    GROUND_TILE_THICKNESS_MM, INSULATION_CHUNK_MM, INSULATION_THICKNESS_MM, JOIST_DEPTH_MM,
    JOIST_SPACING_MM, JOIST_WIDTH_MM, OSB_THICKNESS_MM,
};
use crate::context::{
    Component, Piece, PieceKind, MAT_GROUND, MAT_INSULATION, MAT_OSB, MAT_TIMBER,
};
use crate::dims::ResolvedDims;

/// One axis-aligned rectangle of the deck tiling, in local (A, B) floor
/// coordinates where A is the short footprint axis and B the long one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    /// Offset along A.
    pub a0: f64,
    /// Offset along B.
    pub b0: f64,
    /// Extent along A.
    pub a_len: f64,
    /// Extent along B.
    pub b_len: f64,
}

/// Non-stagger decking layout for an `extent_a × extent_b` floor using
/// `sheet_a × sheet_b` sheets.
///
/// Layout: a full-sheet grid anchored at the origin, one strip of the A
/// remainder beside the grid (split per B column), one strip of the B
/// remainder (split per A row), and a single corner piece. Degenerate
/// remainders (< 1mm) are dropped, so exact-fit floors produce only the
/// grid.
pub fn deck_tiles(extent_a: f64, extent_b: f64, sheet_a: f64, sheet_b: f64) -> Vec<TileRect> {
    let mut tiles = Vec::new();
    if extent_a <= 0.0 || extent_b <= 0.0 {
        return tiles;
    }
    let na = (extent_a / sheet_a).floor() as usize;
    let nb = (extent_b / sheet_b).floor() as usize;
    let rem_a = extent_a - na as f64 * sheet_a;
    let rem_b = extent_b - nb as f64 * sheet_b;

    for ia in 0..na {
        for ib in 0..nb {
            tiles.push(TileRect {
                a0: ia as f64 * sheet_a,
                b0: ib as f64 * sheet_b,
                a_len: sheet_a,
                b_len: sheet_b,
            });
        }
    }
    if rem_a >= 1.0 {
        for ib in 0..nb {
            tiles.push(TileRect {
                a0: na as f64 * sheet_a,
                b0: ib as f64 * sheet_b,
                a_len: rem_a,
                b_len: sheet_b,
            });
        }
    }
    if rem_b >= 1.0 {
        for ia in 0..na {
            tiles.push(TileRect {
                a0: ia as f64 * sheet_a,
                b0: nb as f64 * sheet_b,
                a_len: sheet_a,
                b_len: rem_b,
            });
        }
    }
    if rem_a >= 1.0 && rem_b >= 1.0 {
        tiles.push(TileRect {
            a0: na as f64 * sheet_a,
            b0: nb as f64 * sheet_b,
            a_len: rem_a,
            b_len: rem_b,
        });
    }
    tiles
}

/// Joist centre-line stations across an extent: both rims half a width in
/// from the edges, inner joists at the fixed pitch, and a final joist
/// pulled back to the far rim position.
fn joist_stations(extent: f64) -> Vec<f64> {
    let first = JOIST_WIDTH_MM / 2.0;
    let last = extent - JOIST_WIDTH_MM / 2.0;
    let mut stations = vec![first];
    let mut s = first + JOIST_SPACING_MM;
    while s < last - JOIST_WIDTH_MM {
        stations.push(s);
        s += JOIST_SPACING_MM;
    }
    if last > first {
        stations.push(last);
    }
    stations
}

/// World X/Z of the base origin (the base sits half a gap inside the frame).
fn base_origin() -> f64 {
    BASE_FRAME_GAP_MM / 2.0
}

/// Place a floor-local cuboid. `a`/`b` are the short/long floor axes; when
/// `long_is_x` the B axis maps to world X, otherwise to world Z.
fn floor_cuboid(a0: f64, b0: f64, y0: f64, a_len: f64, b_len: f64, h: f64, long_is_x: bool) -> TriMesh {
    let org = base_origin();
    if long_is_x {
        TriMesh::cuboid(b_len, h, a_len).translated(org + b0, y0, org + a0)
    } else {
        TriMesh::cuboid(a_len, h, b_len).translated(org + a0, y0, org + b0)
    }
}

/// Build the ground grid, joists, insulation, and decking for the base
/// footprint.
pub fn build_base(dims: &ResolvedDims, variant: WallVariant) -> Vec<Piece> {
    let base_w = dims.base.width_mm;
    let base_d = dims.base.depth_mm;
    let long_is_x = base_w >= base_d;
    let (short, long) = if long_is_x {
        (base_d, base_w)
    } else {
        (base_w, base_d)
    };

    let mut pieces = Vec::new();
    let org = base_origin();

    // ground grid tiles, edge-clipped to the base footprint
    let mut gi = 0usize;
    let mut gx = 0.0;
    while gx < base_w {
        let tw = (base_w - gx).min(GROUND_CELL_MM);
        let mut gz = 0.0;
        while gz < base_d {
            let td = (base_d - gz).min(GROUND_CELL_MM);
            pieces.push(Piece::new(
                format!("base-ground-{gi}"),
                Component::Base,
                PieceKind::GroundTile,
                MAT_GROUND,
                TriMesh::cuboid(tw, GROUND_TILE_THICKNESS_MM, td).translated(
                    org + gx,
                    -GROUND_TILE_THICKNESS_MM,
                    org + gz,
                ),
            ));
            gi += 1;
            gz += GROUND_CELL_MM;
        }
        gx += GROUND_CELL_MM;
    }

    // rim joists run the long axis on both edges of the short axis
    for (i, a0) in [0.0, short - JOIST_WIDTH_MM].into_iter().enumerate() {
        pieces.push(Piece::new(
            format!("base-rim-{i}"),
            Component::Base,
            PieceKind::Joist,
            MAT_TIMBER,
            floor_cuboid(a0, 0.0, 0.0, JOIST_WIDTH_MM, long, JOIST_DEPTH_MM, long_is_x),
        ));
    }

    // inner joists span the short axis, distributed along the long axis
    let stations = joist_stations(long);
    let inner_len = (short - 2.0 * JOIST_WIDTH_MM).max(0.0);
    for (i, centre) in stations.iter().enumerate() {
        pieces.push(Piece::new(
            format!("base-joist-{i}"),
            Component::Base,
            PieceKind::Joist,
            MAT_TIMBER,
            floor_cuboid(
                JOIST_WIDTH_MM,
                centre - JOIST_WIDTH_MM / 2.0,
                0.0,
                inner_len,
                JOIST_WIDTH_MM,
                JOIST_DEPTH_MM,
                long_is_x,
            ),
        ));
    }

    // insulation bays between consecutive joists, chunked along the bay
    if variant == WallVariant::Insulated {
        let mut ii = 0usize;
        for pair in stations.windows(2) {
            let bay_start = pair[0] + JOIST_WIDTH_MM / 2.0;
            let bay_len = pair[1] - JOIST_WIDTH_MM / 2.0 - bay_start;
            if bay_len < 1.0 {
                continue;
            }
            let mut a = JOIST_WIDTH_MM;
            let a_end = short - JOIST_WIDTH_MM;
            while a < a_end {
                let chunk = (a_end - a).min(INSULATION_CHUNK_MM);
                pieces.push(Piece::new(
                    format!("base-insulation-{ii}"),
                    Component::Base,
                    PieceKind::Insulation,
                    MAT_INSULATION,
                    floor_cuboid(
                        a,
                        bay_start,
                        JOIST_DEPTH_MM - INSULATION_THICKNESS_MM,
                        chunk,
                        bay_len,
                        INSULATION_THICKNESS_MM,
                        long_is_x,
                    ),
                ));
                ii += 1;
                a += chunk;
            }
        }
    }

    // decking sheets on top of the joists
    for (i, tile) in deck_tiles(short, long, DECK_SHEET_SHORT_MM, DECK_SHEET_LONG_MM)
        .into_iter()
        .enumerate()
    {
        pieces.push(Piece::new(
            format!("base-deck-{i}"),
            Component::Base,
            PieceKind::Deck,
            MAT_OSB,
            floor_cuboid(
                tile.a0,
                tile.b0,
                JOIST_DEPTH_MM,
                tile.a_len,
                tile.b_len,
                OSB_THICKNESS_MM,
                long_is_x,
            ),
        ));
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::resolve_dims;
    use shedwright_config::{Overhangs, SizeInput, SizingMode};

    #[test]
    fn deck_tiles_cover_without_overlap() {
        for &(a, b) in &[
            (2350.0, 1750.0),
            (2500.0, 3000.0),
            (1220.0, 2440.0),
            (600.0, 900.0),
            (3333.0, 5555.0),
        ] {
            let tiles = deck_tiles(a, b, DECK_SHEET_SHORT_MM, DECK_SHEET_LONG_MM);
            let area: f64 = tiles.iter().map(|t| t.a_len * t.b_len).sum();
            assert!(
                (area - a * b).abs() < 1.0,
                "{a}x{b}: tiled {area}, want {}",
                a * b
            );
            for t in &tiles {
                assert!(t.a0 >= -1e-9 && t.b0 >= -1e-9);
                assert!(t.a0 + t.a_len <= a + 1e-9);
                assert!(t.b0 + t.b_len <= b + 1e-9);
            }
            // pairwise non-overlap
            for (i, t) in tiles.iter().enumerate() {
                for u in &tiles[i + 1..] {
                    let sep = t.a0 + t.a_len <= u.a0 + 1e-9
                        || u.a0 + u.a_len <= t.a0 + 1e-9
                        || t.b0 + t.b_len <= u.b0 + 1e-9
                        || u.b0 + u.b_len <= t.b0 + 1e-9;
                    assert!(sep, "tiles overlap: {t:?} vs {u:?}");
                }
            }
        }
    }

    #[test]
    fn deck_tiles_grid_plus_strips_plus_corner() {
        // 2500 across the sheets, 3000 along: two full sheets, one strip
        // per axis pattern, one corner
        let tiles = deck_tiles(2500.0, 3000.0, DECK_SHEET_SHORT_MM, DECK_SHEET_LONG_MM);
        let full = tiles
            .iter()
            .filter(|t| t.a_len == DECK_SHEET_SHORT_MM && t.b_len == DECK_SHEET_LONG_MM)
            .count();
        assert_eq!(full, 2);
        assert_eq!(tiles.len(), 6);
    }

    #[test]
    fn deck_tiles_exact_fit_has_no_strips() {
        let tiles = deck_tiles(2440.0, 2440.0, 1220.0, 2440.0);
        assert_eq!(tiles.len(), 2);
        assert!(tiles
            .iter()
            .all(|t| t.a_len == 1220.0 && t.b_len == 2440.0));
    }

    #[test]
    fn joist_stations_pitch_and_rims() {
        let s = joist_stations(2350.0);
        assert_eq!(s[0], 25.0);
        assert_eq!(*s.last().unwrap(), 2325.0);
        for pair in s.windows(2) {
            assert!(pair[1] - pair[0] <= JOIST_SPACING_MM + 1e-9);
        }
    }

    #[test]
    fn base_pieces_fit_inside_frame_footprint() {
        let size = SizeInput {
            mode: SizingMode::Frame,
            width_mm: 3600.0,
            depth_mm: 2400.0,
        };
        let dims = resolve_dims(&size, &Overhangs::default());
        let pieces = build_base(&dims, WallVariant::Basic);
        assert!(!pieces.is_empty());
        for p in &pieces {
            let bb = p.mesh.aabb();
            assert!(bb.min[0] >= -1e-6, "{}: min x {}", p.name, bb.min[0]);
            assert!(
                bb.max[0] <= dims.frame.width_mm + 1e-6,
                "{}: max x {}",
                p.name,
                bb.max[0]
            );
            assert!(bb.max[2] <= dims.frame.depth_mm + 1e-6);
            assert!(
                bb.max[1] <= JOIST_DEPTH_MM + OSB_THICKNESS_MM + 1e-6,
                "{}: floor stack exceeded",
                p.name
            );
        }
    }

    #[test]
    fn insulated_base_fills_bays() {
        let size = SizeInput {
            mode: SizingMode::Frame,
            width_mm: 3600.0,
            depth_mm: 2400.0,
        };
        let dims = resolve_dims(&size, &Overhangs::default());
        let basic = build_base(&dims, WallVariant::Basic);
        let insulated = build_base(&dims, WallVariant::Insulated);
        assert!(basic
            .iter()
            .all(|p| p.kind != PieceKind::Insulation));
        assert!(insulated
            .iter()
            .any(|p| p.kind == PieceKind::Insulation));
    }
}
