//! Wall panel builder.
//!
//! Frames the four exterior walls: bottom/top plates, common studs, and
//! opening framing (jambs, headers, cripples, window sills). Walls meet at
//! corner joins — front/back walls run the full frame width, left/right
//! walls run between them — so opening positions are measured along each
//! wall's own run from its start corner (front/back start at X = 0,
//! left/right at Z = wall thickness).
//!
//! The basic variant splits long walls into panels no longer than the
//! panel limit. Panel seams never cut through an opening: segmentation is
//! a recursive midpoint split that diverts any cut landing inside an
//! opening cluster to the cluster's nearest edge.

use shedwright_config::{BuildingConfig, Opening, OpeningKind, Wall};
use shedwright_mesh::{Aabb, Point3, TriMesh};

use crate::consts::{PANEL_MAX_MM, PLATE_MM};
use crate::context::{BuildContext, Component, Piece, PieceKind, MAT_TIMBER};
use crate::dims::WorldFrame;
use crate::profile::StudProfile;
use crate::roof::RoofSolver;

/// A closed interval along a wall run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Distance from the wall start corner.
    pub start_mm: f64,
    /// Extent along the wall.
    pub len_mm: f64,
}

impl Span {
    /// End coordinate.
    pub fn end(&self) -> f64 {
        self.start_mm + self.len_mm
    }

    /// True if `u` lies strictly inside the span.
    pub fn contains(&self, u: f64) -> bool {
        u > self.start_mm && u < self.end()
    }

    /// True if the spans overlap (closed comparison).
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start_mm <= other.end() && other.start_mm <= self.end()
    }
}

/// Top-plate placement record for one wall panel, consumed by the
/// cladding planner (and by hosts that substitute measured bounds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateRecord {
    /// Which wall.
    pub wall: Wall,
    /// Panel index along the wall.
    pub panel_index: usize,
    /// World bounds of the panel's top plate.
    pub aabb: Aabb,
    /// Panel span along the wall run.
    pub span: Span,
}

/// Wall framing output: geometry pieces plus the plate records cladding
/// plans against.
#[derive(Debug, Clone, Default)]
pub struct WallsOutput {
    /// Framing geometry.
    pub pieces: Vec<Piece>,
    /// One record per wall panel.
    pub plates: Vec<PlateRecord>,
}

// =============================================================================
// Wall placement
// =============================================================================

/// Run length of a wall between its corner joins.
pub fn wall_run_len(wall: Wall, wf: &WorldFrame, thickness: f64) -> f64 {
    if wall.runs_along_x() {
        wf.frame_w
    } else {
        (wf.frame_d - 2.0 * thickness).max(0.0)
    }
}

/// World X (front/back) or Z (left/right) of a point `u` along a wall run.
pub fn wall_world_u(wall: Wall, thickness: f64, u: f64) -> f64 {
    if wall.runs_along_x() {
        u
    } else {
        thickness + u
    }
}

/// Place a box given in wall-local coordinates: `u` along the run from the
/// wall start corner, `y` world-vertical, `d` through-wall depth measured
/// outward from the wall's exterior plane (so the frame itself occupies
/// `d ∈ [-thickness, 0]` and cladding sits at `d ≥ 0`).
pub fn wall_box(
    wall: Wall,
    wf: &WorldFrame,
    thickness: f64,
    u0: f64,
    u_len: f64,
    y0: f64,
    h: f64,
    d0: f64,
    d_len: f64,
) -> TriMesh {
    match wall {
        Wall::Front => TriMesh::cuboid(u_len, h, d_len).translated(u0, y0, -d0 - d_len),
        Wall::Back => TriMesh::cuboid(u_len, h, d_len).translated(u0, y0, wf.frame_d + d0),
        Wall::Left => {
            TriMesh::cuboid(d_len, h, u_len).translated(-d0 - d_len, y0, thickness + u0)
        }
        Wall::Right => {
            TriMesh::cuboid(d_len, h, u_len).translated(wf.frame_w + d0, y0, thickness + u0)
        }
    }
}

// =============================================================================
// Panel segmentation
// =============================================================================

/// Merge opening spans into protected clusters: overlapping spans always
/// merge; adjacent clusters also merge while the combined span still fits
/// in one panel. Clusters wider than `max_mm` cannot be protected and are
/// dropped.
fn opening_clusters(openings: &[Span], max_mm: f64) -> Vec<Span> {
    let mut spans: Vec<Span> = openings.to_vec();
    spans.sort_by(|a, b| a.start_mm.total_cmp(&b.start_mm));
    let mut clusters: Vec<Span> = Vec::new();
    for s in spans {
        if let Some(last) = clusters.last_mut() {
            let merged_end = last.end().max(s.end());
            let merged_len = merged_end - last.start_mm;
            if s.start_mm <= last.end() || merged_len <= max_mm {
                last.len_mm = merged_end - last.start_mm;
                continue;
            }
        }
        clusters.push(s);
    }
    clusters.retain(|c| c.len_mm <= max_mm);
    clusters
}

fn split_range(start: f64, end: f64, clusters: &[Span], max_mm: f64, out: &mut Vec<Span>) {
    let len = end - start;
    if len <= max_mm + 1e-6 {
        if len > 1e-6 {
            out.push(Span {
                start_mm: start,
                len_mm: len,
            });
        }
        return;
    }
    let mid = 0.5 * (start + end);
    let cut = match clusters.iter().find(|c| c.contains(mid)) {
        Some(c) => {
            // a cluster is at most max_mm long and this range is longer,
            // so at least one edge is strictly inside; a sliver panel at
            // the far side beats a seam through the cluster
            let lo_ok = c.start_mm > start + 1e-6;
            let hi_ok = c.end() < end - 1e-6;
            if lo_ok && hi_ok {
                if mid - c.start_mm <= c.end() - mid {
                    c.start_mm
                } else {
                    c.end()
                }
            } else if lo_ok {
                c.start_mm
            } else if hi_ok {
                c.end()
            } else {
                mid
            }
        }
        None => mid,
    };
    split_range(start, cut, clusters, max_mm, out);
    split_range(cut, end, clusters, max_mm, out);
}

/// Split a wall run into panels no longer than `max_mm`, keeping every
/// opening cluster inside a single panel where geometrically possible.
///
/// A run that already fits is returned whole. Seams come from recursive
/// midpoint splitting; a seam that would land inside a protected cluster
/// is diverted to the cluster's nearest edge.
pub fn segment_wall(length: f64, openings: &[Span], max_mm: f64) -> Vec<Span> {
    if length <= 0.0 {
        return Vec::new();
    }
    if length <= max_mm {
        return vec![Span {
            start_mm: 0.0,
            len_mm: length,
        }];
    }
    let clusters = opening_clusters(openings, max_mm);
    let mut out = Vec::new();
    split_range(0.0, length, &clusters, max_mm, &mut out);
    out
}

// =============================================================================
// Framing
// =============================================================================

/// Protected span of an opening: the aperture plus a jamb stud each side.
fn protected_span(o: &Opening, stud_w: f64) -> Span {
    Span {
        start_mm: o.position_mm - stud_w,
        len_mm: o.width_mm + 2.0 * stud_w,
    }
}

struct WallFramer<'a> {
    wf: &'a WorldFrame,
    profile: &'a StudProfile,
    solver: &'a RoofSolver,
    wall: Wall,
    base_y: f64,
}

impl<'a> WallFramer<'a> {
    /// Ground-referenced wall-top height at `u` along the run.
    fn top_at(&self, u: f64) -> f64 {
        self.solver
            .wall_top_at(self.wall, wall_world_u(self.wall, self.profile.wall_thickness(), u))
    }

    /// Ground-referenced framing ceiling at `u`: the roof underside on
    /// apex gable walls (tall doors frame into the gable), the wall top
    /// elsewhere.
    fn frame_top_at(&self, u: f64) -> f64 {
        if self.solver.is_gable_wall(self.wall) {
            self.solver
                .y_under_at(wall_world_u(self.wall, self.profile.wall_thickness(), u))
        } else {
            self.top_at(u)
        }
    }

    fn timber(&self, name: String, kind: PieceKind, mesh: TriMesh) -> Piece {
        Piece::new(name, Component::Walls, kind, MAT_TIMBER, mesh)
    }

    fn member(&self, u0: f64, u_len: f64, y0: f64, h: f64) -> TriMesh {
        let t = self.profile.wall_thickness();
        wall_box(self.wall, self.wf, t, u0, u_len, y0, h, -t, t)
    }

    /// Sloped top plate for a slope-following panel: a flat plate rotated
    /// to the wall-top pitch about the panel's low end.
    fn sloped_top_plate(&self, panel: &Span, h0: f64, h1: f64) -> TriMesh {
        let t = self.profile.wall_thickness();
        let pitch = (h1 - h0).atan2(panel.len_mm);
        let plate_len = panel.len_mm / pitch.cos();
        let flat = self.member(panel.start_mm, plate_len, h0 - PLATE_MM, PLATE_MM);
        let u_world = wall_world_u(self.wall, t, panel.start_mm);
        if self.wall.runs_along_x() {
            let pivot = Point3::new(u_world, h0 - PLATE_MM, 0.0);
            flat.rotated_z_about(pitch.to_degrees(), pivot)
        } else {
            let pivot = Point3::new(0.0, h0 - PLATE_MM, u_world);
            flat.rotated_x_about(-pitch.to_degrees(), pivot)
        }
    }

    /// Common stud stations for one panel, before opening suppression.
    fn stud_stations(&self, panel: &Span) -> Vec<f64> {
        let w = self.profile.stud_width_mm;
        let start = panel.start_mm;
        let end = panel.end() - w;
        let mut stations = vec![start];
        match self.profile.spacing_mm {
            Some(pitch) => {
                let mut s = start + pitch;
                while s < end - w {
                    stations.push(s);
                    s += pitch;
                }
            }
            None => {
                let mid = start + (panel.len_mm - w) / 2.0;
                if mid > start + w && mid < end - w {
                    stations.push(mid);
                }
            }
        }
        if end > start {
            stations.push(end);
        }
        stations
    }

    fn frame_panel(
        &self,
        panel: &Span,
        panel_index: usize,
        openings: &[&Opening],
        out: &mut WallsOutput,
    ) {
        let wall_name = wall_label(self.wall);
        let prefix = format!("wall-{wall_name}-panel{panel_index}");
        let w = self.profile.stud_width_mm;
        let base = self.base_y;

        // bottom plate
        out.pieces.push(self.timber(
            format!("{prefix}-bottom-plate"),
            PieceKind::Plate,
            self.member(panel.start_mm, panel.len_mm, base, PLATE_MM),
        ));

        // top plate: flat or slope-following
        let h0 = self.top_at(panel.start_mm);
        let h1 = self.top_at(panel.end());
        let top_plate = if (h1 - h0).abs() < 1e-6 {
            self.member(panel.start_mm, panel.len_mm, h0 - PLATE_MM, PLATE_MM)
        } else {
            self.sloped_top_plate(panel, h0, h1)
        };
        out.plates.push(PlateRecord {
            wall: self.wall,
            panel_index,
            aabb: top_plate.aabb(),
            span: *panel,
        });
        out.pieces.push(self.timber(
            format!("{prefix}-top-plate"),
            PieceKind::Plate,
            top_plate,
        ));

        // common studs, suppressed where an opening's protected span sits
        let protected: Vec<Span> = openings
            .iter()
            .map(|o| protected_span(o, w))
            .collect();
        let mut stud_i = 0usize;
        for u in self.stud_stations(panel) {
            let stud_span = Span {
                start_mm: u,
                len_mm: w,
            };
            if protected.iter().any(|p| p.overlaps(&stud_span)) {
                continue;
            }
            let top = self.top_at(u + w / 2.0) - PLATE_MM;
            let h = top - (base + PLATE_MM);
            if h < 1.0 {
                continue;
            }
            out.pieces.push(self.timber(
                format!("{prefix}-stud{stud_i}"),
                PieceKind::Stud,
                self.member(u, w, base + PLATE_MM, h),
            ));
            stud_i += 1;
        }

        // opening framing
        for o in openings {
            self.frame_opening(o, &prefix, out);
        }
    }

    fn frame_opening(&self, o: &Opening, prefix: &str, out: &mut WallsOutput) {
        let w = self.profile.stud_width_mm;
        let base = self.base_y;
        let (bottom_y, top_y) = match o.kind {
            OpeningKind::Door => (base, base + o.height_mm),
            OpeningKind::Window => {
                let sill = base + o.sill_mm.unwrap_or(900.0);
                (sill, sill + o.height_mm)
            }
        };
        let id = &o.id;

        // jamb studs each side, reaching at least the header seat
        for (side, u) in [("l", o.position_mm - w), ("r", o.position_mm + o.width_mm)] {
            let plate_bottom = self.top_at(u + w / 2.0) - PLATE_MM;
            let jamb_top = top_y.max(plate_bottom);
            let h = jamb_top - (base + PLATE_MM);
            if h < 1.0 {
                continue;
            }
            out.pieces.push(self.timber(
                format!("{prefix}-{id}-jamb-{side}"),
                PieceKind::Stud,
                self.member(u, w, base + PLATE_MM, h),
            ));
        }

        // header spanning the aperture plus both jambs
        out.pieces.push(self.timber(
            format!("{prefix}-{id}-header"),
            PieceKind::Header,
            self.member(o.position_mm - w, o.width_mm + 2.0 * w, top_y, w),
        ));

        // cripples above the header up to the framing ceiling
        let header_top = top_y + w;
        let mut ci = 0usize;
        for u in member_stations(o.position_mm, o.width_mm, w) {
            let ceiling = self.frame_top_at(u + w / 2.0) - PLATE_MM;
            let h = ceiling - header_top;
            if h < 30.0 {
                continue;
            }
            out.pieces.push(self.timber(
                format!("{prefix}-{id}-cripple{ci}"),
                PieceKind::Cripple,
                self.member(u, w, header_top, h),
            ));
            ci += 1;
        }

        // window sill rail and under-sill cripples
        if o.kind == OpeningKind::Window {
            out.pieces.push(self.timber(
                format!("{prefix}-{id}-sill"),
                PieceKind::Sill,
                self.member(o.position_mm, o.width_mm, bottom_y - w, w),
            ));
            let mut si = 0usize;
            for u in member_stations(o.position_mm, o.width_mm, w) {
                let h = (bottom_y - w) - (base + PLATE_MM);
                if h < 30.0 {
                    continue;
                }
                out.pieces.push(self.timber(
                    format!("{prefix}-{id}-sill-cripple{si}"),
                    PieceKind::Cripple,
                    self.member(u, w, base + PLATE_MM, h),
                ));
                si += 1;
            }
        }
    }
}

/// Stud stations across an aperture at a 400mm pitch, edges included.
fn member_stations(start: f64, width: f64, stud_w: f64) -> Vec<f64> {
    let end = start + width - stud_w;
    let mut stations = vec![start];
    let mut u = start + 400.0;
    while u < end - stud_w {
        stations.push(u);
        u += 400.0;
    }
    if end > start {
        stations.push(end);
    }
    stations
}

fn wall_label(wall: Wall) -> &'static str {
    match wall {
        Wall::Front => "front",
        Wall::Back => "back",
        Wall::Left => "left",
        Wall::Right => "right",
    }
}

/// Frame all four exterior walls.
pub fn build_walls(
    cfg: &BuildingConfig,
    wf: &WorldFrame,
    profile: &StudProfile,
    solver: &RoofSolver,
    ctx: &BuildContext,
) -> WallsOutput {
    build_wall_subset(cfg, wf, profile, solver, ctx, &Wall::ALL)
}

/// Frame a subset of the exterior walls. Attachments use this to leave the
/// side shared with the host building open.
pub fn build_wall_subset(
    cfg: &BuildingConfig,
    wf: &WorldFrame,
    profile: &StudProfile,
    solver: &RoofSolver,
    _ctx: &BuildContext,
    walls: &[Wall],
) -> WallsOutput {
    let mut out = WallsOutput::default();
    let t = profile.wall_thickness();
    for &wall in walls {
        let run_len = wall_run_len(wall, wf, t);
        if run_len < 1.0 {
            continue;
        }
        let framer = WallFramer {
            wf,
            profile,
            solver,
            wall,
            base_y: wf.wall_base_y(),
        };
        let wall_openings: Vec<&Opening> = cfg.openings_on(wall).collect();
        let spans: Vec<Span> = wall_openings
            .iter()
            .map(|o| protected_span(o, profile.stud_width_mm))
            .collect();
        let panels = if profile.spacing_mm.is_none() {
            segment_wall(run_len, &spans, PANEL_MAX_MM)
        } else {
            vec![Span {
                start_mm: 0.0,
                len_mm: run_len,
            }]
        };
        for (i, panel) in panels.iter().enumerate() {
            let panel_openings: Vec<&Opening> = wall_openings
                .iter()
                .copied()
                .filter(|o| {
                    let s = protected_span(o, profile.stud_width_mm);
                    s.start_mm < panel.end() && s.end() > panel.start_mm
                })
                .collect();
            framer.frame_panel(panel, i, &panel_openings, &mut out);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::resolve_dims;
    use crate::profile::resolve_profile;
    use shedwright_config::{
        BuildingConfig, DoorStyle, Overhangs, RoofConfig, SizeInput, SizingMode, WallVariant,
    };

    fn span(start: f64, len: f64) -> Span {
        Span {
            start_mm: start,
            len_mm: len,
        }
    }

    #[test]
    fn short_wall_is_one_panel() {
        let panels = segment_wall(2400.0, &[], PANEL_MAX_MM);
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].len_mm, 2400.0);
    }

    #[test]
    fn long_wall_splits_under_limit() {
        for len in [2401.0, 3600.0, 5000.0, 7300.0] {
            let panels = segment_wall(len, &[], PANEL_MAX_MM);
            assert!(panels.len() >= 2, "len {len}");
            let total: f64 = panels.iter().map(|p| p.len_mm).sum();
            assert!((total - len).abs() < 1e-6, "len {len}: total {total}");
            for p in &panels {
                assert!(p.len_mm <= PANEL_MAX_MM + 1e-6, "len {len}: panel {p:?}");
            }
        }
    }

    #[test]
    fn seam_avoids_opening_cluster() {
        // door protected span straddles the 1800 midpoint of a 3600 wall
        let door = span(1450.0, 900.0);
        let panels = segment_wall(3600.0, &[door], PANEL_MAX_MM);
        for p in &panels {
            assert!(p.len_mm <= PANEL_MAX_MM + 1e-6);
            let cut = p.start_mm;
            assert!(
                !(door.contains(cut)),
                "seam at {cut} cuts the opening {door:?}"
            );
        }
        // one panel holds the whole cluster
        assert!(panels
            .iter()
            .any(|p| p.start_mm <= door.start_mm + 1e-6 && p.end() >= door.end() - 1e-6));
    }

    #[test]
    fn near_full_width_cluster_pushes_seam_to_a_sliver() {
        // 2401 run with an opening whose cluster edges sit 0.5mm from
        // both ends: the seam must divert to an edge, not cut the cluster
        let door = span(0.5, 2400.0);
        let panels = segment_wall(2401.0, &[door], PANEL_MAX_MM);
        let total: f64 = panels.iter().map(|p| p.len_mm).sum();
        assert!((total - 2401.0).abs() < 1e-6, "total {total}");
        for p in &panels {
            assert!(p.len_mm <= PANEL_MAX_MM + 1e-6, "panel {p:?}");
            assert!(
                !(p.start_mm > door.start_mm + 1e-6 && p.start_mm < door.end() - 1e-6),
                "seam at {} cuts the opening {door:?}",
                p.start_mm
            );
        }
        assert!(panels
            .iter()
            .any(|p| p.start_mm <= door.start_mm + 1e-6 && p.end() >= door.end() - 1e-6));
    }

    #[test]
    fn adjacent_openings_merge_into_one_cluster() {
        let clusters = opening_clusters(&[span(1000.0, 600.0), span(1700.0, 600.0)], 2400.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].start_mm, 1000.0);
        assert_eq!(clusters[0].end(), 2300.0);
    }

    #[test]
    fn oversized_cluster_is_unprotected() {
        let clusters = opening_clusters(&[span(100.0, 3000.0)], 2400.0);
        assert!(clusters.is_empty());
    }

    fn example_walls() -> WallsOutput {
        let cfg = BuildingConfig::example();
        let dims = resolve_dims(&cfg.size, &cfg.overhangs);
        let wf = WorldFrame::new(&dims);
        let profile = resolve_profile(cfg.wall_variant, cfg.frame_gauge.as_ref());
        let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
        build_walls(&cfg, &wf, &profile, &solver, &BuildContext::new(0))
    }

    #[test]
    fn example_builds_plates_per_panel() {
        let out = example_walls();
        // front/back 3600 walls split into 2 panels; left/right fit in one
        let front: Vec<_> = out
            .plates
            .iter()
            .filter(|p| p.wall == Wall::Front)
            .collect();
        assert_eq!(front.len(), 2);
        let left: Vec<_> = out.plates.iter().filter(|p| p.wall == Wall::Left).collect();
        assert_eq!(left.len(), 1);
        // plate bounds sit at the eaves line
        for p in &front {
            assert!((p.aabb.max[1] - 1950.0).abs() < 1e-6, "{:?}", p.aabb);
        }
    }

    #[test]
    fn studs_do_not_cross_openings() {
        let out = example_walls();
        let cfg = BuildingConfig::example();
        let door = &cfg.openings[0];
        // door is on the front wall; world x span of the aperture
        let x0 = door.position_mm;
        let x1 = door.position_mm + door.width_mm;
        for p in out
            .pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Stud && p.name.contains("front"))
        {
            if p.name.contains("jamb") {
                continue;
            }
            let bb = p.mesh.aabb();
            let clear = bb.max[0] <= x0 + 1e-6 || bb.min[0] >= x1 - 1e-6;
            assert!(clear, "{} intrudes into the door aperture", p.name);
        }
    }

    #[test]
    fn tall_door_frames_into_gable() {
        // door top (118 + 1850) sits above the 1950 eaves minus plate, so
        // its header must ride above the common plate line
        let out = example_walls();
        let header = out
            .pieces
            .iter()
            .find(|p| p.name.contains("door-1-header"))
            .expect("door header");
        let bb = header.mesh.aabb();
        assert!((bb.min[1] - (118.0 + 1850.0)).abs() < 1e-6, "{bb:?}");
        // cripples above reach toward the roofline
        assert!(out
            .pieces
            .iter()
            .any(|p| p.name.contains("door-1-cripple")));
    }

    #[test]
    fn window_gets_sill_and_cripples() {
        let out = example_walls();
        assert!(out.pieces.iter().any(|p| p.name.contains("window-1-sill")));
        let sill = out
            .pieces
            .iter()
            .find(|p| p.kind == PieceKind::Sill)
            .unwrap();
        let bb = sill.mesh.aabb();
        // sill rail tops out at base + sill height
        assert!((bb.max[1] - (118.0 + 900.0)).abs() < 1e-6, "{bb:?}");
    }

    #[test]
    fn pent_wall_studs_follow_slope() {
        let mut cfg = BuildingConfig::example();
        cfg.openings.clear();
        cfg.skylights.clear();
        cfg.roof = RoofConfig::Pent {
            min_height_mm: 2100.0,
            max_height_mm: 2400.0,
            high_side: Wall::Right,
        };
        let dims = resolve_dims(&cfg.size, &cfg.overhangs);
        let wf = WorldFrame::new(&dims);
        let profile = resolve_profile(WallVariant::Basic, None);
        let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
        let out = build_walls(&cfg, &wf, &profile, &solver, &BuildContext::new(0));
        // front wall studs get taller toward the right (high) side
        let mut studs: Vec<_> = out
            .pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Stud && p.name.contains("front"))
            .map(|p| p.mesh.aabb())
            .collect();
        studs.sort_by(|a, b| a.min[0].total_cmp(&b.min[0]));
        let first = studs.first().unwrap();
        let last = studs.last().unwrap();
        assert!(
            last.max[1] > first.max[1] + 10.0,
            "expected rising stud tops: {} vs {}",
            first.max[1],
            last.max[1]
        );
    }

    #[test]
    fn insulated_walls_use_fixed_pitch_single_panel() {
        let mut cfg = BuildingConfig::example();
        cfg.openings.clear();
        cfg.wall_variant = WallVariant::Insulated;
        let dims = resolve_dims(&cfg.size, &cfg.overhangs);
        let wf = WorldFrame::new(&dims);
        let profile = resolve_profile(cfg.wall_variant, None);
        let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
        let out = build_walls(&cfg, &wf, &profile, &solver, &BuildContext::new(0));
        // no panel splitting
        assert!(out
            .plates
            .iter()
            .filter(|p| p.wall == Wall::Front)
            .all(|p| p.panel_index == 0));
        // fixed-pitch stud count on the 3600 front wall: stations every
        // 400mm plus the end stud
        let front_studs = out
            .pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Stud && p.name.contains("front"))
            .count();
        assert!(front_studs >= 8, "got {front_studs} studs");
    }

    #[test]
    fn door_style_is_irrelevant_to_framing() {
        let mut a = BuildingConfig::example();
        let mut b = BuildingConfig::example();
        a.openings[0].style = Some(DoorStyle::LedgedBraced);
        b.openings[0].style = Some(DoorStyle::French);
        let dims = resolve_dims(&a.size, &a.overhangs);
        let wf = WorldFrame::new(&dims);
        let profile = resolve_profile(a.wall_variant, None);
        let solver = RoofSolver::new(&a.roof, dims.frame, a.wall_height_mm);
        let pa = build_walls(&a, &wf, &profile, &solver, &BuildContext::new(0));
        let pb = build_walls(&b, &wf, &profile, &solver, &BuildContext::new(0));
        assert_eq!(pa.pieces.len(), pb.pieces.len());
    }
}
