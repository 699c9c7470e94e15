//! Roof structure builder.
//!
//! Frames and sheets the roof for all three styles. Apex roofs get paired
//! rafters with a tie per truss station, purlins at slope stations, OSB
//! gable infill, sheathing and covering slabs, fascia and barge boards.
//! Pent roofs are a single rafter deck under one sloped slab stack. Hipped
//! roofs reuse the apex main structure over a shortened ridge, with
//! triangular hip faces and corner hip rafters at the ends.
//!
//! Sloped members are placed with an orthonormal face basis (eaves
//! direction, up-slope direction, outward normal) rather than chained
//! axis rotations, so every style shares one placement path. Skylight
//! apertures are cut from the slab stack per face; a failed cut keeps the
//! uncut slab and warns.

use shedwright_config::{BuildingConfig, RoofFace, Skylight, Wall};
use shedwright_csg::{subtract_all, ConvexCutter, Plane};
use shedwright_mesh::{Point2, Point3, Transform, TriMesh, Vec3};

use crate::consts::{
    COVERING_THICKNESS_MM, FASCIA_HEIGHT_MM, FASCIA_THICKNESS_MM, OSB_THICKNESS_MM, PURLIN_MM,
    PURLIN_SPACING_MM, RAFTER_DEPTH_MM, RAFTER_WIDTH_MM, SKYLIGHT_EDGE_GAP_MM, TRUSS_SPACING_MM,
};
use crate::context::{Component, Piece, PieceKind, MAT_FELT, MAT_OSB, MAT_TIMBER};
use crate::dims::WorldFrame;
use crate::roof::{RoofKind, RoofSolver};

// =============================================================================
// Face basis
// =============================================================================

/// Orthonormal placement frame for one roof face.
///
/// `origin` sits on the face underside at the wall plate, at the face's
/// left end viewed from outside. `e` runs along the eaves, `u` up the
/// slope, `n` outward. Skylights address the face in `(e, u)` coordinates
/// from this origin, which keeps their apparent position stable when
/// overhangs change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    /// Underside origin at the wall plate.
    pub origin: Point3,
    /// Unit vector along the eaves.
    pub e: Vec3,
    /// Unit vector up the slope.
    pub u: Vec3,
    /// Outward unit normal.
    pub n: Vec3,
    /// Face extent along the eaves at the wall line.
    pub eaves_len: f64,
    /// Face extent up the slope from wall plate to ridge (or high edge).
    pub slope_len: f64,
    /// Slope distance from the outer eaves edge to the wall plate (the
    /// overhang portion below the origin).
    pub eaves_ext: f64,
}

impl FaceFrame {
    /// Transform from face-local `(x along e, y along u, z along n)` to
    /// world coordinates.
    pub fn transform(&self) -> Transform {
        Transform::from_basis(self.origin, self.e, self.u, self.n)
    }

    /// World point for face-local coordinates.
    pub fn point(&self, x: f64, y: f64, z: f64) -> Point3 {
        self.origin + self.e * x + self.u * y + self.n * z
    }
}

/// Resolve the placement frame for a roof face, or `None` when the face
/// does not exist under the solved style (hip faces on an apex roof, the
/// right face of a pent).
pub fn face_frame(solver: &RoofSolver, wf: &WorldFrame, face: RoofFace) -> Option<FaceFrame> {
    let oh = &wf.overhangs;
    let (w, d) = (wf.frame_w, wf.frame_d);
    match solver.kind {
        RoofKind::Apex { eaves_y, .. } | RoofKind::Hipped { eaves_y, .. } => {
            let pitch = solver.pitch();
            let (cos_p, sin_p) = (pitch.cos(), pitch.sin());
            let slope_len = (w / 2.0) / cos_p;
            match face {
                RoofFace::Left => Some(FaceFrame {
                    origin: Point3::new(0.0, eaves_y, 0.0),
                    e: Vec3::new(0.0, 0.0, 1.0),
                    u: Vec3::new(cos_p, sin_p, 0.0),
                    n: Vec3::new(-sin_p, cos_p, 0.0),
                    eaves_len: d,
                    slope_len,
                    eaves_ext: oh.left / cos_p,
                }),
                RoofFace::Right => Some(FaceFrame {
                    origin: Point3::new(w, eaves_y, d),
                    e: Vec3::new(0.0, 0.0, -1.0),
                    u: Vec3::new(-cos_p, sin_p, 0.0),
                    n: Vec3::new(sin_p, cos_p, 0.0),
                    eaves_len: d,
                    slope_len,
                    eaves_ext: oh.right / cos_p,
                }),
                RoofFace::Front | RoofFace::Back => {
                    if !matches!(solver.kind, RoofKind::Hipped { .. }) {
                        return None;
                    }
                    let hp = solver.hip_pitch();
                    let (cos_h, sin_h) = (hp.cos(), hp.sin());
                    let hip_len = (w / 2.0) / cos_h;
                    if face == RoofFace::Front {
                        Some(FaceFrame {
                            origin: Point3::new(w, eaves_y, 0.0),
                            e: Vec3::new(-1.0, 0.0, 0.0),
                            u: Vec3::new(0.0, sin_h, cos_h),
                            n: Vec3::new(0.0, cos_h, -sin_h),
                            eaves_len: w,
                            slope_len: hip_len,
                            eaves_ext: oh.front / cos_h,
                        })
                    } else {
                        Some(FaceFrame {
                            origin: Point3::new(0.0, eaves_y, d),
                            e: Vec3::new(1.0, 0.0, 0.0),
                            u: Vec3::new(0.0, sin_h, -cos_h),
                            n: Vec3::new(0.0, cos_h, sin_h),
                            eaves_len: w,
                            slope_len: hip_len,
                            eaves_ext: oh.back / cos_h,
                        })
                    }
                }
            }
        }
        RoofKind::Pent {
            min_y, high_side, ..
        } => {
            if face != RoofFace::Left {
                return None;
            }
            let pitch = solver.pitch();
            let (cos_p, sin_p) = (pitch.cos(), pitch.sin());
            match high_side {
                Wall::Right => Some(FaceFrame {
                    origin: Point3::new(0.0, min_y, 0.0),
                    e: Vec3::new(0.0, 0.0, 1.0),
                    u: Vec3::new(cos_p, sin_p, 0.0),
                    n: Vec3::new(-sin_p, cos_p, 0.0),
                    eaves_len: d,
                    slope_len: w / cos_p,
                    eaves_ext: oh.left / cos_p,
                }),
                Wall::Left => Some(FaceFrame {
                    origin: Point3::new(w, min_y, d),
                    e: Vec3::new(0.0, 0.0, -1.0),
                    u: Vec3::new(-cos_p, sin_p, 0.0),
                    n: Vec3::new(sin_p, cos_p, 0.0),
                    eaves_len: d,
                    slope_len: w / cos_p,
                    eaves_ext: oh.right / cos_p,
                }),
                Wall::Back => Some(FaceFrame {
                    origin: Point3::new(w, min_y, 0.0),
                    e: Vec3::new(-1.0, 0.0, 0.0),
                    u: Vec3::new(0.0, sin_p, cos_p),
                    n: Vec3::new(0.0, cos_p, -sin_p),
                    eaves_len: w,
                    slope_len: d / cos_p,
                    eaves_ext: oh.front / cos_p,
                }),
                Wall::Front => Some(FaceFrame {
                    origin: Point3::new(0.0, min_y, d),
                    e: Vec3::new(1.0, 0.0, 0.0),
                    u: Vec3::new(0.0, sin_p, -cos_p),
                    n: Vec3::new(0.0, cos_p, sin_p),
                    eaves_len: w,
                    slope_len: d / cos_p,
                    eaves_ext: oh.back / cos_p,
                }),
            }
        }
    }
}

/// Clamp a skylight's up-slope position so the unit keeps the minimum
/// clearance from both the eaves line and the ridge.
pub fn clamp_skylight_y(sk: &Skylight, slope_len: f64) -> f64 {
    let max_y = (slope_len - sk.height_mm - SKYLIGHT_EDGE_GAP_MM).max(SKYLIGHT_EDGE_GAP_MM);
    sk.y_mm.clamp(SKYLIGHT_EDGE_GAP_MM, max_y)
}

// =============================================================================
// Placement helpers
// =============================================================================

/// A bar along the slope: face-local footprint `[x0, x0+width]` across the
/// eaves and `[y0, y0+len]` up the slope, thickness `depth` below the face
/// underside (`z ∈ [-depth, 0]`).
fn slope_bar(frame: &FaceFrame, x0: f64, width: f64, y0: f64, len: f64, depth: f64) -> TriMesh {
    TriMesh::cuboid(width, len, depth)
        .translated(x0, y0, -depth)
        .transformed(&frame.transform())
}

/// A slab on the face: convex profile in face-local `(x, y)`, extruded
/// `thickness` outward from `z = z0`.
fn face_slab(frame: &FaceFrame, profile: &[Point2], z0: f64, thickness: f64) -> TriMesh {
    TriMesh::extrude_polygon_z(profile, thickness)
        .translated(0.0, 0.0, z0)
        .transformed(&frame.transform())
}

fn rect(x0: f64, y0: f64, w: f64, h: f64) -> Vec<Point2> {
    vec![
        Point2::new(x0, y0),
        Point2::new(x0 + w, y0),
        Point2::new(x0 + w, y0 + h),
        Point2::new(x0, y0 + h),
    ]
}

/// Bar stations (member centres) across an extent at a fixed pitch, with
/// the first and last pulled half a member width in from the edges.
fn stations(extent: f64, member_w: f64, pitch: f64) -> Vec<f64> {
    let first = member_w / 2.0;
    let last = extent - member_w / 2.0;
    let mut out = vec![first];
    let mut s = first + pitch;
    while s < last - member_w {
        out.push(s);
        s += pitch;
    }
    if last > first {
        out.push(last);
    }
    out
}

/// Prism cutter for a skylight aperture: four planes bounding the unit in
/// face coordinates, unbounded through the slab thickness.
fn skylight_cutter(frame: &FaceFrame, x0: f64, y0: f64, w: f64, h: f64) -> ConvexCutter {
    ConvexCutter::from_planes(vec![
        Plane::from_point_normal(frame.point(x0, 0.0, 0.0), -frame.e),
        Plane::from_point_normal(frame.point(x0 + w, 0.0, 0.0), frame.e),
        Plane::from_point_normal(frame.point(0.0, y0, 0.0), -frame.u),
        Plane::from_point_normal(frame.point(0.0, y0 + h, 0.0), frame.u),
    ])
}

// =============================================================================
// Builder
// =============================================================================

struct RoofBuilder<'a> {
    cfg: &'a BuildingConfig,
    wf: &'a WorldFrame,
    solver: &'a RoofSolver,
    pieces: Vec<Piece>,
}

impl<'a> RoofBuilder<'a> {
    fn push(&mut self, name: String, kind: PieceKind, material: &str, mesh: TriMesh) {
        self.pieces
            .push(Piece::new(name, Component::Roof, kind, material, mesh));
    }

    /// Sheathing + covering stack for one face, with skylight cutouts.
    fn sheet_face(&mut self, face: RoofFace, frame: &FaceFrame, profile: &[Point2]) {
        let cutters: Vec<ConvexCutter> = self
            .cfg
            .skylights
            .iter()
            .filter(|sk| sk.face == face)
            .map(|sk| {
                let y = clamp_skylight_y(sk, frame.slope_len);
                skylight_cutter(frame, sk.x_mm, y, sk.width_mm, sk.height_mm)
            })
            .collect();
        let label = face_label(face);
        for (kind, material, z0, th, tag) in [
            (
                PieceKind::Sheathing,
                MAT_OSB,
                0.0,
                OSB_THICKNESS_MM,
                "sheathing",
            ),
            (
                PieceKind::Covering,
                MAT_FELT,
                OSB_THICKNESS_MM,
                COVERING_THICKNESS_MM,
                "covering",
            ),
        ] {
            let slab = face_slab(frame, profile, z0, th);
            let mesh = if cutters.is_empty() {
                slab
            } else {
                match subtract_all(&slab, &cutters) {
                    Ok(m) => m,
                    Err(e) => {
                        log::warn!("skylight cutout failed on roof {label} {tag}: {e}");
                        slab
                    }
                }
            };
            self.push(format!("roof-{label}-{tag}"), kind, material, mesh);
        }
    }

    /// Rafters and purlins for one face. Rafters run up the slope at truss
    /// stations across the eaves; purlins run across at slope stations.
    fn frame_face(&mut self, face: RoofFace, frame: &FaceFrame) {
        let label = face_label(face);
        let total_len = frame.eaves_ext + frame.slope_len;
        for (i, s) in stations(frame.eaves_len, RAFTER_WIDTH_MM, TRUSS_SPACING_MM)
            .iter()
            .enumerate()
        {
            self.push(
                format!("roof-{label}-rafter{i}"),
                PieceKind::Rafter,
                MAT_TIMBER,
                slope_bar(
                    frame,
                    s - RAFTER_WIDTH_MM / 2.0,
                    RAFTER_WIDTH_MM,
                    -frame.eaves_ext,
                    total_len,
                    RAFTER_DEPTH_MM,
                ),
            );
        }
        let mut pi = 0usize;
        let mut y = PURLIN_SPACING_MM;
        while y < frame.slope_len - PURLIN_MM {
            self.push(
                format!("roof-{label}-purlin{pi}"),
                PieceKind::Purlin,
                MAT_TIMBER,
                slope_bar(frame, 0.0, frame.eaves_len, y, PURLIN_MM, PURLIN_MM),
            );
            pi += 1;
            y += PURLIN_SPACING_MM;
        }
    }

    /// Vertical fascia board under a face's outer eaves edge.
    fn eaves_fascia(&mut self, face: RoofFace, frame: &FaceFrame) {
        let label = face_label(face);
        // outer eaves edge endpoints, dropped to a vertical board
        let p0 = frame.point(0.0, -frame.eaves_ext, 0.0);
        let top_y = p0.y + OSB_THICKNESS_MM;
        let out_dir = horizontal_outward(frame);
        let origin = Point3::new(p0.x, top_y - FASCIA_HEIGHT_MM, p0.z);
        let basis =
            Transform::from_basis(origin, frame.e, Vec3::new(0.0, 1.0, 0.0), out_dir);
        let mesh = TriMesh::cuboid(frame.eaves_len, FASCIA_HEIGHT_MM, FASCIA_THICKNESS_MM)
            .transformed(&basis);
        self.push(format!("roof-{label}-fascia"), PieceKind::Fascia, MAT_TIMBER, mesh);
    }

    /// Barge boards along the sloped edges of an apex/pent face.
    fn barge_boards(&mut self, face: RoofFace, frame: &FaceFrame) {
        let label = face_label(face);
        let total_len = frame.eaves_ext + frame.slope_len;
        for (tag, x0) in [("near", -FASCIA_THICKNESS_MM), ("far", frame.eaves_len)] {
            self.push(
                format!("roof-{label}-barge-{tag}"),
                PieceKind::Fascia,
                MAT_TIMBER,
                slope_bar(
                    frame,
                    x0,
                    FASCIA_THICKNESS_MM,
                    -frame.eaves_ext,
                    total_len,
                    FASCIA_HEIGHT_MM,
                ),
            );
        }
    }

    fn build_apex(&mut self, eaves_y: f64, rise: f64) {
        let (w, d) = (self.wf.frame_w, self.wf.frame_d);
        let oh = self.wf.overhangs;
        let left = face_frame(self.solver, self.wf, RoofFace::Left).expect("left face");
        let right = face_frame(self.solver, self.wf, RoofFace::Right).expect("right face");

        // rafters + purlins per slope
        self.frame_face(RoofFace::Left, &left);
        self.frame_face(RoofFace::Right, &right);

        // tie beams at truss stations
        for (i, z) in stations(d, RAFTER_WIDTH_MM, TRUSS_SPACING_MM).iter().enumerate() {
            self.push(
                format!("roof-tie{i}"),
                PieceKind::Tie,
                MAT_TIMBER,
                TriMesh::cuboid(w, RAFTER_WIDTH_MM, RAFTER_WIDTH_MM).translated(
                    0.0,
                    eaves_y,
                    z - RAFTER_WIDTH_MM / 2.0,
                ),
            );
        }

        // gable infill panels above the front/back plates
        let profile = vec![
            Point2::new(0.0, eaves_y),
            Point2::new(w, eaves_y),
            Point2::new(w / 2.0, eaves_y + rise),
        ];
        let t = OSB_THICKNESS_MM;
        for (tag, z0) in [("front", 0.0), ("back", d - t)] {
            self.push(
                format!("roof-gable-{tag}"),
                PieceKind::GableInfill,
                MAT_OSB,
                TriMesh::extrude_polygon_z(&profile, t).translated(0.0, 0.0, z0),
            );
        }

        // slab stacks: each face covers its overhangs along the eaves and
        // extends below the plate by the eaves extension
        for (face, frame, oh_near, oh_far) in [
            (RoofFace::Left, &left, oh.front, oh.back),
            (RoofFace::Right, &right, oh.back, oh.front),
        ] {
            let prof = rect(
                -oh_near,
                -frame.eaves_ext,
                frame.eaves_len + oh_near + oh_far,
                frame.eaves_ext + frame.slope_len,
            );
            self.sheet_face(face, frame, &prof);
            self.eaves_fascia(face, frame);
            self.barge_boards(face, frame);
        }
    }

    fn build_pent(&mut self) {
        let frame = face_frame(self.solver, self.wf, RoofFace::Left).expect("pent face");
        self.frame_face(RoofFace::Left, &frame);
        // overhang along the eaves direction on both ends, plus the
        // up-slope extension past the high wall
        let oh = self.wf.overhangs;
        let (oh_near, oh_far, oh_high) = match self.solver.kind {
            RoofKind::Pent { high_side, .. } => match high_side {
                Wall::Right => (oh.front, oh.back, oh.right),
                Wall::Left => (oh.back, oh.front, oh.left),
                Wall::Back => (oh.right, oh.left, oh.back),
                Wall::Front => (oh.left, oh.right, oh.front),
            },
            _ => (0.0, 0.0, 0.0),
        };
        let high_ext = oh_high / self.solver.pitch().cos();
        let prof = rect(
            -oh_near,
            -frame.eaves_ext,
            frame.eaves_len + oh_near + oh_far,
            frame.eaves_ext + frame.slope_len + high_ext,
        );
        self.sheet_face(RoofFace::Left, &frame, &prof);
        self.eaves_fascia(RoofFace::Left, &frame);
        self.barge_boards(RoofFace::Left, &frame);
    }

    fn build_hipped(&mut self, eaves_y: f64, rise: f64, ridge_len: f64) {
        let (w, d) = (self.wf.frame_w, self.wf.frame_d);
        let oh = self.wf.overhangs;
        let left = face_frame(self.solver, self.wf, RoofFace::Left).expect("left face");
        let right = face_frame(self.solver, self.wf, RoofFace::Right).expect("right face");
        let front = face_frame(self.solver, self.wf, RoofFace::Front).expect("front face");
        let back = face_frame(self.solver, self.wf, RoofFace::Back).expect("back face");

        let ridge_z0 = (d - ridge_len) / 2.0;
        let ridge_z1 = ridge_z0 + ridge_len;

        // main-slope rafters only within the ridge extent, ties with them
        for (i, z) in stations(ridge_len, RAFTER_WIDTH_MM, TRUSS_SPACING_MM)
            .iter()
            .map(|s| s + ridge_z0)
            .enumerate()
        {
            for (tag, frame) in [("left", &left), ("right", &right)] {
                let x0 = if frame.e.z > 0.0 { z } else { d - z };
                self.push(
                    format!("roof-{tag}-rafter{i}"),
                    PieceKind::Rafter,
                    MAT_TIMBER,
                    slope_bar(
                        frame,
                        x0 - RAFTER_WIDTH_MM / 2.0,
                        RAFTER_WIDTH_MM,
                        -frame.eaves_ext,
                        frame.eaves_ext + frame.slope_len,
                        RAFTER_DEPTH_MM,
                    ),
                );
            }
            self.push(
                format!("roof-tie{i}"),
                PieceKind::Tie,
                MAT_TIMBER,
                TriMesh::cuboid(w, RAFTER_WIDTH_MM, RAFTER_WIDTH_MM).translated(
                    0.0,
                    eaves_y,
                    z - RAFTER_WIDTH_MM / 2.0,
                ),
            );
        }

        // hip rafters from each outer eaves corner up to a ridge end
        let ridge_y = eaves_y + rise;
        let corners = [
            (Point3::new(-oh.left, eaves_y, -oh.front), ridge_z0),
            (Point3::new(w + oh.right, eaves_y, -oh.front), ridge_z0),
            (Point3::new(-oh.left, eaves_y, d + oh.back), ridge_z1),
            (Point3::new(w + oh.right, eaves_y, d + oh.back), ridge_z1),
        ];
        for (i, (corner, rz)) in corners.iter().enumerate() {
            let top = Point3::new(w / 2.0, ridge_y, *rz);
            self.push(
                format!("roof-hip-rafter{i}"),
                PieceKind::Rafter,
                MAT_TIMBER,
                diagonal_bar(*corner, top, RAFTER_WIDTH_MM, RAFTER_DEPTH_MM),
            );
        }

        // main slabs are trapezoids shortened to the ridge
        for (face, frame, oh_near, oh_far) in [
            (RoofFace::Left, &left, oh.front, oh.back),
            (RoofFace::Right, &right, oh.back, oh.front),
        ] {
            let (rz_near, rz_far) = if frame.e.z > 0.0 {
                (ridge_z0, d - ridge_z1)
            } else {
                (d - ridge_z1, ridge_z0)
            };
            let prof = vec![
                Point2::new(-oh_near, -frame.eaves_ext),
                Point2::new(frame.eaves_len + oh_far, -frame.eaves_ext),
                Point2::new(frame.eaves_len - rz_far, frame.slope_len),
                Point2::new(rz_near, frame.slope_len),
            ];
            self.sheet_face(face, frame, &prof);
            self.eaves_fascia(face, frame);
        }

        // hip faces: triangular slabs and short jack rafters
        for (face, frame, oh_near, oh_far) in [
            (RoofFace::Front, &front, oh.right, oh.left),
            (RoofFace::Back, &back, oh.left, oh.right),
        ] {
            let prof = vec![
                Point2::new(-oh_near, -frame.eaves_ext),
                Point2::new(frame.eaves_len + oh_far, -frame.eaves_ext),
                Point2::new(frame.eaves_len / 2.0, frame.slope_len),
            ];
            self.sheet_face(face, frame, &prof);
            self.eaves_fascia(face, frame);
        }
    }
}

/// Bar between two points: local X along the run, section `width × depth`
/// hung below the line.
fn diagonal_bar(a: Point3, b: Point3, width: f64, depth: f64) -> TriMesh {
    let dir = b - a;
    let len = dir.norm();
    let ex = dir / len;
    let up = Vec3::new(0.0, 1.0, 0.0);
    let ez = {
        let c = ex.cross(&up);
        if c.norm() < 1e-9 {
            Vec3::new(0.0, 0.0, 1.0)
        } else {
            c.normalize()
        }
    };
    let ey = ez.cross(&ex);
    TriMesh::cuboid(len, depth, width)
        .translated(0.0, -depth, -width / 2.0)
        .transformed(&Transform::from_basis(a, ex, ey, ez))
}

/// Horizontal outward direction at a face's eaves edge.
fn horizontal_outward(frame: &FaceFrame) -> Vec3 {
    let mut v = Vec3::new(-frame.u.x, 0.0, -frame.u.z);
    if v.norm() < 1e-9 {
        v = frame.n;
    }
    v.normalize()
}

fn face_label(face: RoofFace) -> &'static str {
    match face {
        RoofFace::Left => "left",
        RoofFace::Right => "right",
        RoofFace::Front => "front",
        RoofFace::Back => "back",
    }
}

/// Build the roof structure for the solved style.
pub fn build_roof(cfg: &BuildingConfig, wf: &WorldFrame, solver: &RoofSolver) -> Vec<Piece> {
    let mut builder = RoofBuilder {
        cfg,
        wf,
        solver,
        pieces: Vec::new(),
    };
    match solver.kind {
        RoofKind::Apex { eaves_y, rise } => builder.build_apex(eaves_y, rise),
        RoofKind::Pent { .. } => builder.build_pent(),
        RoofKind::Hipped {
            eaves_y,
            rise,
            ridge_len,
        } => builder.build_hipped(eaves_y, rise, ridge_len),
    }
    builder.pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::resolve_dims;
    use crate::roof::RoofSolver;
    use shedwright_config::{BuildingConfig, Overhangs, RoofConfig, SizeInput, SizingMode};

    fn setup(roof: RoofConfig) -> (BuildingConfig, WorldFrame, RoofSolver) {
        let mut cfg = BuildingConfig::example();
        cfg.roof = roof;
        let dims = resolve_dims(&cfg.size, &cfg.overhangs);
        let wf = WorldFrame::new(&dims);
        let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
        (cfg, wf, solver)
    }

    #[test]
    fn apex_builds_trusses_and_slabs() {
        let (cfg, wf, solver) = setup(RoofConfig::Apex {
            eaves_mm: 1950.0,
            crest_mm: 2450.0,
        });
        let pieces = build_roof(&cfg, &wf, &solver);
        let rafters = pieces.iter().filter(|p| p.kind == PieceKind::Rafter).count();
        let ties = pieces.iter().filter(|p| p.kind == PieceKind::Tie).count();
        // 2400 deep at 600 pitch: stations at 25, 625, 1225, 1825(?), 2375
        assert!(ties >= 4, "got {ties} ties");
        assert_eq!(rafters, 2 * ties, "rafter pairs per truss");
        assert_eq!(
            pieces.iter().filter(|p| p.kind == PieceKind::Sheathing).count(),
            2
        );
        assert_eq!(
            pieces.iter().filter(|p| p.kind == PieceKind::GableInfill).count(),
            2
        );
        // ridge line tops out at the frame ridge plus the slab stack
        let top = pieces
            .iter()
            .map(|p| p.mesh.aabb().max[1])
            .fold(f64::MIN, f64::max);
        let crest = solver.ridge_y()
            + (OSB_THICKNESS_MM + COVERING_THICKNESS_MM) * solver.pitch().cos();
        assert!(
            (top - crest).abs() < 2.0,
            "roof top {top}, expected about {crest}"
        );
    }

    #[test]
    fn apex_slabs_cover_overhangs() {
        let (cfg, wf, solver) = setup(RoofConfig::Apex {
            eaves_mm: 1950.0,
            crest_mm: 2450.0,
        });
        let pieces = build_roof(&cfg, &wf, &solver);
        let bb = pieces
            .iter()
            .filter(|p| p.kind == PieceKind::Sheathing)
            .map(|p| p.mesh.aabb())
            .fold(shedwright_mesh::Aabb::empty(), |acc, b| acc.union(&b));
        // example overhangs: 150 uniform with 250 at the front
        assert!(bb.min[0] < -140.0, "left overhang missing: {}", bb.min[0]);
        assert!(bb.max[0] > wf.frame_w + 140.0);
        assert!(bb.min[2] < -240.0, "front overhang missing: {}", bb.min[2]);
        assert!(bb.max[2] > wf.frame_d + 140.0);
    }

    #[test]
    fn skylight_cuts_sheathing() {
        let (cfg, wf, solver) = setup(RoofConfig::Apex {
            eaves_mm: 1950.0,
            crest_mm: 2450.0,
        });
        assert_eq!(cfg.skylights.len(), 1);
        let pieces = build_roof(&cfg, &wf, &solver);
        let with_cut = pieces
            .iter()
            .find(|p| p.name == "roof-left-sheathing")
            .unwrap();
        let without = {
            let mut c2 = cfg.clone();
            c2.skylights.clear();
            let p2 = build_roof(&c2, &wf, &solver);
            p2.iter()
                .find(|p| p.name == "roof-left-sheathing")
                .unwrap()
                .mesh
                .clone()
        };
        assert!(
            with_cut.mesh.num_triangles() > without.num_triangles(),
            "cutout should add clipped geometry"
        );
    }

    #[test]
    fn pent_builds_single_slope() {
        let (cfg, wf, solver) = setup(RoofConfig::Pent {
            min_height_mm: 2100.0,
            max_height_mm: 2400.0,
            high_side: Wall::Right,
        });
        let pieces = build_roof(&cfg, &wf, &solver);
        assert_eq!(
            pieces.iter().filter(|p| p.kind == PieceKind::Sheathing).count(),
            1
        );
        assert!(pieces.iter().all(|p| p.kind != PieceKind::GableInfill));
        // slab rises toward the high side
        let slab = pieces
            .iter()
            .find(|p| p.kind == PieceKind::Sheathing)
            .unwrap();
        let bb = slab.mesh.aabb();
        assert!(bb.max[1] > 2400.0 - 1.0, "high edge: {}", bb.max[1]);
    }

    #[test]
    fn hipped_builds_four_faces() {
        let mut cfg = BuildingConfig::example();
        cfg.size = SizeInput {
            mode: SizingMode::Frame,
            width_mm: 2400.0,
            depth_mm: 3600.0,
        };
        cfg.skylights.clear();
        cfg.roof = RoofConfig::Hipped {
            eaves_mm: 1950.0,
            crest_mm: 2400.0,
        };
        cfg.overhangs = Overhangs::default();
        let dims = resolve_dims(&cfg.size, &cfg.overhangs);
        let wf = WorldFrame::new(&dims);
        let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
        let pieces = build_roof(&cfg, &wf, &solver);
        assert_eq!(
            pieces.iter().filter(|p| p.kind == PieceKind::Sheathing).count(),
            4
        );
        let hip_rafters = pieces
            .iter()
            .filter(|p| p.name.starts_with("roof-hip-rafter"))
            .count();
        assert_eq!(hip_rafters, 4);
        // nothing rises above the solved crest line
        let top = pieces
            .iter()
            .map(|p| p.mesh.aabb().max[1])
            .fold(f64::MIN, f64::max);
        assert!(top <= solver.ridge_y() + OSB_THICKNESS_MM + COVERING_THICKNESS_MM + 1.0);
    }

    #[test]
    fn face_frames_respect_style() {
        let (_, wf, apex) = setup(RoofConfig::Apex {
            eaves_mm: 1950.0,
            crest_mm: 2450.0,
        });
        assert!(face_frame(&apex, &wf, RoofFace::Left).is_some());
        assert!(face_frame(&apex, &wf, RoofFace::Front).is_none());
        let (_, wf2, pent) = setup(RoofConfig::Pent {
            min_height_mm: 2100.0,
            max_height_mm: 2400.0,
            high_side: Wall::Right,
        });
        assert!(face_frame(&pent, &wf2, RoofFace::Left).is_some());
        assert!(face_frame(&pent, &wf2, RoofFace::Right).is_none());
    }

    #[test]
    fn face_basis_is_orthonormal() {
        let (_, wf, solver) = setup(RoofConfig::Apex {
            eaves_mm: 1950.0,
            crest_mm: 2450.0,
        });
        for face in [RoofFace::Left, RoofFace::Right] {
            let f = face_frame(&solver, &wf, face).unwrap();
            assert!((f.e.norm() - 1.0).abs() < 1e-9);
            assert!((f.u.norm() - 1.0).abs() < 1e-9);
            assert!(f.e.dot(&f.u).abs() < 1e-9);
            let n = f.e.cross(&f.u);
            assert!((n - f.n).norm() < 1e-9, "{face:?}: n mismatch");
        }
    }

    #[test]
    fn skylight_clamps_to_edge_gap() {
        use shedwright_config::Skylight;
        let sk = Skylight {
            face: RoofFace::Left,
            x_mm: 500.0,
            y_mm: 0.0,
            width_mm: 600.0,
            height_mm: 700.0,
        };
        assert_eq!(clamp_skylight_y(&sk, 2000.0), SKYLIGHT_EDGE_GAP_MM);
        let high = Skylight { y_mm: 5000.0, ..sk.clone() };
        assert_eq!(clamp_skylight_y(&high, 2000.0), 2000.0 - 700.0 - 150.0);
    }
}
