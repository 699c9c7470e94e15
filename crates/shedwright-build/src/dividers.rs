//! Internal partition walls.
//!
//! A divider is a stud partition spanning the interior between two
//! opposite walls, either across the width (axis X) or across the depth
//! (axis Z). In `Walls` height mode it stops at the nominal wall height;
//! in `Roof` mode its studs run to the roof underside, which for a
//! partition crossing an apex ridge means a gabled top with a collar tie.
//! Each face can optionally carry an OSB or cladding skin with doorway
//! apertures cut out.

use shedwright_config::{
    BuildingConfig, Divider, DividerAxis, DividerHeightMode, DividerOpening, FaceCovering,
};
use shedwright_csg::{subtract_all, ConvexCutter};
use shedwright_mesh::{Point3, TriMesh};

use crate::consts::{
    CLAD_THICKNESS_MM, DIVIDER_STUD_SPACING_MM, OSB_THICKNESS_MM, PLATE_MM,
};
use crate::context::{
    Component, Piece, PieceKind, MAT_CLADDING, MAT_OSB, MAT_TIMBER,
};
use crate::dims::WorldFrame;
use crate::profile::StudProfile;
use crate::roof::RoofSolver;
use crate::walls::Span;

/// One divider's resolved placement: run axis, run origin, and thickness.
struct DividerRun {
    axis: DividerAxis,
    /// Centreline position along the perpendicular axis.
    position: f64,
    /// World coordinate where `u = 0` lies (inner face of the start wall).
    start: f64,
    /// Interior run length.
    len: f64,
    /// Partition thickness (stud depth).
    thickness: f64,
    base_y: f64,
}

impl DividerRun {
    /// Axis-aligned box at `u ∈ [u0, u0+u_len]`, `y ∈ [y0, y0+h]`, full
    /// partition thickness plus `grow` on both faces.
    fn member(&self, u0: f64, u_len: f64, y0: f64, h: f64, grow: f64) -> TriMesh {
        let t = self.thickness + 2.0 * grow;
        let p0 = self.position - t / 2.0;
        match self.axis {
            DividerAxis::Z => {
                TriMesh::cuboid(t, h, u_len).translated(p0, y0, self.start + u0)
            }
            DividerAxis::X => {
                TriMesh::cuboid(u_len, h, t).translated(self.start + u0, y0, p0)
            }
        }
    }

    /// World (x, z) of a point `u` along the run.
    fn world_at(&self, u: f64) -> (f64, f64) {
        match self.axis {
            DividerAxis::Z => (self.position, self.start + u),
            DividerAxis::X => (self.start + u, self.position),
        }
    }

    /// Sloped top plate from `(u0, y0)` to `(u1, y1)`, plate underside on
    /// the line.
    fn sloped_plate(&self, u0: f64, y0: f64, u1: f64, y1: f64) -> TriMesh {
        let du = u1 - u0;
        let dy = y1 - y0;
        let len = (du * du + dy * dy).sqrt();
        let angle = dy.atan2(du).to_degrees();
        let flat = run_cuboid(self.axis, len, PLATE_MM, self.thickness);
        let pivot = Point3::origin();
        let bar = match self.axis {
            DividerAxis::X => flat.rotated_z_about(angle, pivot),
            // run along +Z: a rise along the run is a negative rotation
            // about X
            DividerAxis::Z => flat.rotated_x_about(-angle, pivot),
        };
        let (x0, z0) = self.world_at(u0);
        let t = self.thickness;
        match self.axis {
            DividerAxis::X => bar.translated(x0, y0 - PLATE_MM, self.position - t / 2.0),
            DividerAxis::Z => bar.translated(self.position - t / 2.0, y0 - PLATE_MM, z0),
        }
    }
}

/// Cuboid with its length laid along a divider's run axis.
fn run_cuboid(axis: DividerAxis, len: f64, h: f64, t: f64) -> TriMesh {
    match axis {
        DividerAxis::X => TriMesh::cuboid(len, h, t),
        DividerAxis::Z => TriMesh::cuboid(t, h, len),
    }
}

/// Top-of-partition height at `u` along the run.
fn top_at(run: &DividerRun, d: &Divider, cfg: &BuildingConfig, solver: &RoofSolver, u: f64) -> f64 {
    match d.height_mode {
        DividerHeightMode::Walls => cfg.wall_height_mm,
        DividerHeightMode::Roof => {
            let (x, z) = run.world_at(u);
            solver.underside_at(x, z)
        }
    }
}

/// Whether the top profile varies along the run (within 1mm).
fn top_varies(run: &DividerRun, d: &Divider, cfg: &BuildingConfig, solver: &RoofSolver) -> bool {
    let n = 8;
    let y0 = top_at(run, d, cfg, solver, 0.0);
    (1..=n).any(|i| {
        let u = run.len * i as f64 / n as f64;
        (top_at(run, d, cfg, solver, u) - y0).abs() > 1.0
    })
}

fn doorway_spans(d: &Divider) -> Vec<Span> {
    let mut spans: Vec<Span> = d
        .openings
        .iter()
        .map(|o| Span {
            start_mm: o.position_mm,
            len_mm: o.width_mm,
        })
        .collect();
    spans.sort_by(|a, b| a.start_mm.total_cmp(&b.start_mm));
    spans
}

struct DividerFramer<'a> {
    run: DividerRun,
    d: &'a Divider,
    cfg: &'a BuildingConfig,
    solver: &'a RoofSolver,
    profile: &'a StudProfile,
    pieces: Vec<Piece>,
}

impl<'a> DividerFramer<'a> {
    fn push(&mut self, tag: String, kind: PieceKind, material: &str, mesh: TriMesh) {
        self.pieces.push(Piece::new(
            format!("divider-{}-{tag}", self.d.id),
            Component::Dividers,
            kind,
            material,
            mesh,
        ));
    }

    fn top(&self, u: f64) -> f64 {
        top_at(&self.run, self.d, self.cfg, self.solver, u)
    }

    /// Bottom plate, interrupted at doorways.
    fn bottom_plates(&mut self, doorways: &[Span]) {
        let mut u = 0.0;
        let mut i = 0usize;
        for dw in doorways {
            let seg = dw.start_mm - u;
            if seg > 1.0 {
                let mesh = self.run.member(u, seg, self.run.base_y, PLATE_MM, 0.0);
                self.push(format!("plate-bottom{i}"), PieceKind::Plate, MAT_TIMBER, mesh);
                i += 1;
            }
            u = dw.end();
        }
        if self.run.len - u > 1.0 {
            let mesh = self
                .run
                .member(u, self.run.len - u, self.run.base_y, PLATE_MM, 0.0);
            self.push(format!("plate-bottom{i}"), PieceKind::Plate, MAT_TIMBER, mesh);
        }
    }

    /// Top plate(s): flat, or sloped segments following the roofline with a
    /// break at the ridge when the partition crosses it.
    fn top_plates(&mut self) {
        let varies = top_varies(&self.run, self.d, self.cfg, self.solver);
        if !varies {
            let y = self.top(0.0);
            let mesh = self.run.member(0.0, self.run.len, y - PLATE_MM, PLATE_MM, 0.0);
            self.push("plate-top".to_string(), PieceKind::Plate, MAT_TIMBER, mesh);
            return;
        }
        // break the run where the slope direction can change
        let mut knots = vec![0.0, self.run.len];
        let ridge_u = match self.run.axis {
            DividerAxis::X => self.solver.ridge_x() - self.run.start,
            DividerAxis::Z => f64::NAN,
        };
        if ridge_u.is_finite() && ridge_u > 1.0 && ridge_u < self.run.len - 1.0 {
            knots.insert(1, ridge_u);
        }
        for (i, pair) in knots.windows(2).enumerate() {
            let (u0, u1) = (pair[0], pair[1]);
            let mesh = self
                .run
                .sloped_plate(u0, self.top(u0), u1, self.top(u1));
            self.push(format!("plate-top{i}"), PieceKind::Plate, MAT_TIMBER, mesh);
        }
    }

    fn stud(&mut self, tag: String, kind: PieceKind, u0: f64, w: f64) {
        let y0 = self.run.base_y + PLATE_MM;
        let y1 = self.top(u0 + w / 2.0) - PLATE_MM;
        if y1 - y0 < 1.0 {
            return;
        }
        let mesh = self.run.member(u0, w, y0, y1 - y0, 0.0);
        self.push(tag, kind, MAT_TIMBER, mesh);
    }

    /// Common studs at the divider pitch, skipping any that land in a
    /// doorway (jambs frame those).
    fn common_studs(&mut self, doorways: &[Span]) {
        let sw = self.profile.stud_width_mm;
        let mut stations = vec![0.0];
        let mut u = DIVIDER_STUD_SPACING_MM;
        while u < self.run.len - sw {
            stations.push(u);
            u += DIVIDER_STUD_SPACING_MM;
        }
        stations.push(self.run.len - sw);
        let mut i = 0usize;
        for s in stations {
            let span = Span {
                start_mm: s,
                len_mm: sw,
            };
            let blocked = doorways.iter().any(|dw| {
                Span {
                    start_mm: dw.start_mm - sw,
                    len_mm: dw.len_mm + 2.0 * sw,
                }
                .overlaps(&span)
            });
            if blocked {
                continue;
            }
            self.stud(format!("stud{i}"), PieceKind::Stud, s, sw);
            i += 1;
        }
    }

    /// Jambs, header, and header cripples around one doorway.
    fn doorway_frame(&mut self, index: usize, o: &DividerOpening) {
        let sw = self.profile.stud_width_mm;
        let a0 = o.position_mm;
        let a1 = o.position_mm + o.width_mm;
        // header tucks under the top plate when the doorway is taller than
        // the partition
        let cap = self.top((a0 + a1) / 2.0) - PLATE_MM - sw;
        let top_y = (self.run.base_y + o.height_mm).min(cap);
        for (tag, u) in [("jamb-l", a0 - sw), ("jamb-r", a1)] {
            self.stud(format!("door{index}-{tag}"), PieceKind::Stud, u.max(0.0), sw);
        }
        let header = self
            .run
            .member(a0 - sw, o.width_mm + 2.0 * sw, top_y, sw, 0.0);
        self.push(format!("door{index}-header"), PieceKind::Header, MAT_TIMBER, header);
        // cripples from the header to the top plate
        let mut u = a0;
        let mut i = 0usize;
        while u < a1 - sw {
            let y0 = top_y + sw;
            let y1 = self.top(u + sw / 2.0) - PLATE_MM;
            if y1 - y0 >= 30.0 {
                let mesh = self.run.member(u, sw, y0, y1 - y0, 0.0);
                self.push(
                    format!("door{index}-cripple{i}"),
                    PieceKind::Cripple,
                    MAT_TIMBER,
                    mesh,
                );
                i += 1;
            }
            u += DIVIDER_STUD_SPACING_MM;
        }
    }

    /// Collar tie across a gabled partition, at the eaves line.
    fn collar_tie(&mut self) {
        let eaves = self.solver.eaves_y();
        let mesh = self.run.member(0.0, self.run.len, eaves - PLATE_MM, PLATE_MM, 0.0);
        self.push("collar-tie".to_string(), PieceKind::Tie, MAT_TIMBER, mesh);
    }

    /// One face skin, roofline-trimmed and doorway-cut.
    fn covering(&mut self, side: &str, covering: FaceCovering, far: bool) {
        let (material, kind, th) = match covering {
            FaceCovering::None => return,
            FaceCovering::Osb => (MAT_OSB, PieceKind::Sheathing, OSB_THICKNESS_MM),
            FaceCovering::Cladding => (MAT_CLADDING, PieceKind::Cladding, CLAD_THICKNESS_MM),
        };
        let top_max = (0..=8)
            .map(|i| self.top(self.run.len * i as f64 / 8.0))
            .fold(f64::MIN, f64::max);
        let h = top_max - self.run.base_y;
        let t = self.run.thickness;
        let p_face = if far {
            self.run.position + t / 2.0
        } else {
            self.run.position - t / 2.0 - th
        };
        let mesh = match self.run.axis {
            DividerAxis::Z => {
                TriMesh::cuboid(th, h, self.run.len).translated(p_face, self.run.base_y, self.run.start)
            }
            DividerAxis::X => {
                TriMesh::cuboid(self.run.len, h, th).translated(self.run.start, self.run.base_y, p_face)
            }
        };
        let mut cutters = Vec::new();
        // doorway apertures
        for o in &self.d.openings {
            let aperture = self.run.member(
                o.position_mm,
                o.width_mm,
                self.run.base_y,
                o.height_mm,
                th + 1.0,
            );
            let bb = aperture.aabb();
            cutters.push(ConvexCutter::from_aabb(bb.min.into(), bb.max.into()));
        }
        // roofline trim: everything above the sampled top profile, one slab
        // per sample interval
        if top_varies(&self.run, self.d, self.cfg, self.solver) {
            let n = 16;
            for i in 0..n {
                let u0 = self.run.len * i as f64 / n as f64;
                let u1 = self.run.len * (i + 1) as f64 / n as f64;
                let lid = self.top(u0).min(self.top(u1));
                let slab = self.run.member(u0, u1 - u0, lid, top_max - lid + 1.0, th + 1.0);
                let bb = slab.aabb();
                cutters.push(ConvexCutter::from_aabb(bb.min.into(), bb.max.into()));
            }
        }
        let trimmed = match subtract_all(&mesh, &cutters) {
            Ok(m) => m,
            Err(err) => {
                log::warn!("divider {} {side} covering trim failed: {err}", self.d.id);
                mesh
            }
        };
        self.push(format!("cover-{side}"), kind, material, trimmed);
    }
}

/// Build all configured dividers.
pub fn build_dividers(
    cfg: &BuildingConfig,
    wf: &WorldFrame,
    profile: &StudProfile,
    solver: &RoofSolver,
) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let t = profile.wall_thickness();
    for d in &cfg.dividers {
        let (extent, run_full) = match d.axis {
            DividerAxis::Z => (wf.frame_w, wf.frame_d),
            DividerAxis::X => (wf.frame_d, wf.frame_w),
        };
        let position = d.position_mm.clamp(t, extent - t);
        let run = DividerRun {
            axis: d.axis,
            position,
            start: t,
            len: run_full - 2.0 * t,
            thickness: t,
            base_y: wf.wall_base_y(),
        };
        if run.len < 3.0 * profile.stud_width_mm {
            log::warn!("divider {} run too short, skipping", d.id);
            continue;
        }
        let doorways = doorway_spans(d);
        let mut framer = DividerFramer {
            run,
            d,
            cfg,
            solver,
            profile,
            pieces: Vec::new(),
        };
        framer.bottom_plates(&doorways);
        framer.top_plates();
        framer.common_studs(&doorways);
        for (i, o) in d.openings.iter().enumerate() {
            framer.doorway_frame(i, o);
        }
        let gabled = d.height_mode == DividerHeightMode::Roof
            && d.axis == DividerAxis::X
            && top_varies(&framer.run, d, cfg, solver);
        if gabled {
            framer.collar_tie();
        }
        framer.covering("near", d.covering_near, false);
        framer.covering("far", d.covering_far, true);
        pieces.extend(framer.pieces);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::resolve_dims;
    use crate::profile::resolve_profile;
    use shedwright_config::BuildingConfig;

    fn build(cfg: &BuildingConfig) -> Vec<Piece> {
        let dims = resolve_dims(&cfg.size, &cfg.overhangs);
        let wf = WorldFrame::new(&dims);
        let profile = resolve_profile(cfg.wall_variant, cfg.frame_gauge.as_ref());
        let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
        build_dividers(cfg, &wf, &profile, &solver)
    }

    #[test]
    fn example_divider_fits_between_walls_under_roof() {
        let cfg = BuildingConfig::example();
        let pieces = build(&cfg);
        assert!(!pieces.is_empty());
        let dims = resolve_dims(&cfg.size, &cfg.overhangs);
        let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
        let t = 75.0;
        for p in &pieces {
            let bb = p.mesh.aabb();
            // stays on the partition plane x = 2300 (plus skin thickness)
            assert!(bb.min[0] >= 2300.0 - t / 2.0 - OSB_THICKNESS_MM - 1e-6, "{}", p.name);
            assert!(bb.max[0] <= 2300.0 + t / 2.0 + 1e-6, "{}", p.name);
            // between the front and back wall inner faces
            assert!(bb.min[2] >= t - 1e-6 && bb.max[2] <= 2400.0 - t + 1e-6, "{}", p.name);
            // never pokes through the roof underside at its own station
            assert!(
                bb.max[1] <= solver.underside_at(2300.0, 0.0) + 1e-6,
                "{}: {bb:?}",
                p.name
            );
        }
        // Roof mode partition parallel to the ridge has a flat top plate
        assert!(pieces.iter().any(|p| p.name == "divider-divider-1-plate-top"));
    }

    #[test]
    fn doorway_splits_bottom_plate_and_keeps_aperture_clear() {
        let cfg = BuildingConfig::example();
        let pieces = build(&cfg);
        let plates: Vec<_> = pieces
            .iter()
            .filter(|p| p.name.contains("plate-bottom"))
            .collect();
        assert_eq!(plates.len(), 2, "doorway should split the bottom plate");
        // aperture interior z ∈ [75+700, 75+1450], y up to base+1850
        let base = 118.0;
        for p in pieces.iter().filter(|p| p.kind == PieceKind::Stud) {
            let bb = p.mesh.aabb();
            let clear = bb.max[2] <= 775.0 + 1e-6 || bb.min[2] >= 1525.0 - 1e-6;
            assert!(clear, "{} intrudes into the doorway: {bb:?}", p.name);
        }
        let header = pieces
            .iter()
            .find(|p| p.name.contains("door0-header"))
            .expect("doorway header");
        assert!((header.mesh.aabb().min[1] - (base + 1850.0)).abs() < 1e-6);
    }

    #[test]
    fn walls_mode_stops_at_nominal_height() {
        let mut cfg = BuildingConfig::example();
        cfg.dividers[0].height_mode = DividerHeightMode::Walls;
        let pieces = build(&cfg);
        for p in &pieces {
            assert!(
                p.mesh.aabb().max[1] <= cfg.wall_height_mm + 1e-6,
                "{} above the nominal wall height",
                p.name
            );
        }
    }

    #[test]
    fn cross_ridge_partition_gables_with_collar_tie() {
        let mut cfg = BuildingConfig::example();
        cfg.dividers[0].axis = DividerAxis::X;
        cfg.dividers[0].position_mm = 1200.0;
        cfg.dividers[0].openings.clear();
        let pieces = build(&cfg);
        assert!(pieces.iter().any(|p| p.name.contains("collar-tie")));
        // two sloped top plates meeting at the ridge
        let tops: Vec<_> = pieces
            .iter()
            .filter(|p| p.name.contains("plate-top"))
            .collect();
        assert_eq!(tops.len(), 2);
        // the tallest stud sits nearest the ridge at x = 1800
        let tallest = pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Stud)
            .max_by(|a, b| a.mesh.aabb().max[1].total_cmp(&b.mesh.aabb().max[1]))
            .expect("studs");
        let bb = tallest.mesh.aabb();
        assert!(
            (bb.min[0] + bb.max[0]) / 2.0 > 1400.0 && (bb.min[0] + bb.max[0]) / 2.0 < 2200.0,
            "tallest stud at {bb:?}"
        );
    }

    #[test]
    fn near_covering_only_for_example() {
        let cfg = BuildingConfig::example();
        let pieces = build(&cfg);
        assert!(pieces.iter().any(|p| p.name.contains("cover-near")));
        assert!(!pieces.iter().any(|p| p.name.contains("cover-far")));
        let cover = pieces
            .iter()
            .find(|p| p.name.contains("cover-near"))
            .unwrap();
        assert_eq!(cover.material, MAT_OSB);
        // doorway cut: no vertex strictly inside the aperture
        let t = 75.0;
        for v in cover.mesh.vertices.chunks(3) {
            let inside = v[2] > t + 700.0 + 1e-6
                && v[2] < t + 1450.0 - 1e-6
                && v[1] < 118.0 + 1850.0 - 1e-6
                && v[1] > 118.0 + 1e-6;
            assert!(!inside, "covering vertex inside the doorway: {v:?}");
        }
    }
}
