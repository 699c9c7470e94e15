//! Cladding course generator.
//!
//! Clads each wall panel in horizontal shiplap courses: a full-thickness
//! drip lip at the bottom of every course with a recessed face strip
//! above. Courses are generated over-tall, merged into one mesh per
//! panel, then trimmed: opening apertures are cut out and everything
//! above the roofline is removed with wedge or half-space cutters.
//!
//! The pass is split in two. [`plan_cladding`] emits self-contained
//! [`CladdingJob`]s against the framed plate records; [`execute_cladding`]
//! turns jobs into geometry, optionally against host-measured plate
//! bounds instead of the computed ones. Jobs carry the build generation,
//! so a deferred execution against a newer build quietly produces
//! nothing.

use std::collections::HashMap;

use shedwright_config::{BuildingConfig, OpeningKind, Wall};
use shedwright_csg::{subtract_all, ConvexCutter, Plane};
use shedwright_mesh::{Aabb, Point3, TriMesh, Vec3};

use crate::consts::{
    BOARD_FACE_MM, BOARD_LIP_MM, BOARD_PITCH_MM, CLAD_DROP_MM, CLAD_FACE_THICKNESS_MM,
    CLAD_THICKNESS_MM,
};
use crate::context::{BuildContext, Component, Piece, PieceKind, MAT_CLADDING};
use crate::dims::WorldFrame;
use crate::profile::StudProfile;
use crate::roof::RoofSolver;
use crate::walls::{wall_box, wall_world_u, PlateRecord, Span};

/// The roofline a panel's cladding is trimmed against, in wall-run
/// coordinates (`u` along the run, heights ground-referenced).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopLine {
    /// Horizontal plate top.
    Flat(f64),
    /// Linear slope across the whole wall run (pent slope-following wall).
    Sloped {
        /// Height at the start of the run.
        y_start: f64,
        /// Height at the end of the run.
        y_end: f64,
    },
    /// Apex gable profile: eaves lines rising to a ridge point.
    Gable {
        /// Eaves height at both ends of the run.
        eaves_y: f64,
        /// Ridge height.
        ridge_y: f64,
        /// Ridge position along the run.
        ridge_u: f64,
    },
}

impl TopLine {
    /// Highest point of the line (the course generator's reach target).
    pub fn y_max(&self) -> f64 {
        match *self {
            TopLine::Flat(y) => y,
            TopLine::Sloped { y_start, y_end } => y_start.max(y_end),
            TopLine::Gable { ridge_y, .. } => ridge_y,
        }
    }
}

/// A rectangular aperture to cut from a panel's cladding, in wall-run
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aperture {
    /// Aperture span along the wall run.
    pub span: Span,
    /// Bottom of the aperture, ground-referenced.
    pub y0: f64,
    /// Top of the aperture.
    pub y1: f64,
}

/// One panel's worth of deferred cladding work.
#[derive(Debug, Clone, PartialEq)]
pub struct CladdingJob {
    /// Which wall.
    pub wall: Wall,
    /// Panel index along the wall.
    pub panel_index: usize,
    /// Panel span along the wall run.
    pub span: Span,
    /// Wall base height (courses anchor one drip drop below this).
    pub base_y: f64,
    /// Roofline to trim against.
    pub top: TopLine,
    /// Opening apertures intersecting this panel.
    pub apertures: Vec<Aperture>,
    /// Wall frame thickness (cladding sits outside it).
    pub wall_thickness: f64,
    /// Build generation this job belongs to.
    pub generation: u64,
}

/// Host-measured plate bounds keyed by wall and panel index. Hosts that
/// render the frame first can feed real top-plate bounds back in; panels
/// without a measurement fall back to the computed roofline.
#[derive(Debug, Clone, Default)]
pub struct MeasuredBounds {
    bounds: HashMap<(Wall, usize), Aabb>,
}

impl MeasuredBounds {
    /// No measurements: every job falls back to its computed bounds.
    pub fn none() -> Self {
        Self::default()
    }

    /// Record a measured top-plate bound for one panel.
    pub fn insert(&mut self, wall: Wall, panel_index: usize, aabb: Aabb) {
        self.bounds.insert((wall, panel_index), aabb);
    }

    fn get(&self, wall: Wall, panel_index: usize) -> Option<&Aabb> {
        self.bounds.get(&(wall, panel_index))
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Plan cladding jobs for every framed wall panel.
pub fn plan_cladding(
    cfg: &BuildingConfig,
    wf: &WorldFrame,
    profile: &StudProfile,
    solver: &RoofSolver,
    plates: &[PlateRecord],
    ctx: &BuildContext,
) -> Vec<CladdingJob> {
    let t = profile.wall_thickness();
    let base_y = wf.wall_base_y();
    plates
        .iter()
        .map(|plate| {
            let wall = plate.wall;
            let top = if solver.is_gable_wall(wall) {
                TopLine::Gable {
                    eaves_y: solver.eaves_y(),
                    ridge_y: solver.ridge_y(),
                    ridge_u: solver.ridge_x(),
                }
            } else {
                let y0 = solver.wall_top_at(wall, wall_world_u(wall, t, plate.span.start_mm));
                let y1 = solver.wall_top_at(wall, wall_world_u(wall, t, plate.span.end()));
                if (y1 - y0).abs() < 1e-6 {
                    TopLine::Flat(y0)
                } else {
                    TopLine::Sloped {
                        y_start: y0,
                        y_end: y1,
                    }
                }
            };
            let apertures = cfg
                .openings_on(wall)
                .filter(|o| {
                    o.position_mm < plate.span.end() && o.position_mm + o.width_mm > plate.span.start_mm
                })
                .map(|o| {
                    let (y0, y1) = match o.kind {
                        OpeningKind::Door => (base_y, base_y + o.height_mm),
                        OpeningKind::Window => {
                            let sill = base_y + o.sill_mm.unwrap_or(900.0);
                            (sill, sill + o.height_mm)
                        }
                    };
                    Aperture {
                        span: Span {
                            start_mm: o.position_mm,
                            len_mm: o.width_mm,
                        },
                        y0,
                        y1,
                    }
                })
                .collect();
            CladdingJob {
                wall,
                panel_index: plate.panel_index,
                span: plate.span,
                base_y,
                top,
                apertures,
                wall_thickness: t,
                generation: ctx.generation,
            }
        })
        .collect()
}

// =============================================================================
// Execution
// =============================================================================

/// Unit vector along a wall's run axis.
fn run_axis(wall: Wall) -> Vec3 {
    if wall.runs_along_x() {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::new(0.0, 0.0, 1.0)
    }
}

/// World point at `u` along the run at height `y` (the d-position is
/// irrelevant to the trim planes, which are unbounded through the wall).
fn run_point(wall: Wall, thickness: f64, u: f64, y: f64) -> Point3 {
    let uw = wall_world_u(wall, thickness, u);
    if wall.runs_along_x() {
        Point3::new(uw, y, 0.0)
    } else {
        Point3::new(0.0, y, uw)
    }
}

/// Cutter removing everything above the line from `(u0, y0)` to
/// `(u1, y1)`, optionally restricted to one side of `u = u_split`.
fn above_line_cutter(
    wall: Wall,
    thickness: f64,
    u0: f64,
    y0: f64,
    u1: f64,
    y1: f64,
    split: Option<(f64, bool)>,
) -> ConvexCutter {
    let axis = run_axis(wall);
    let up = Vec3::new(0.0, 1.0, 0.0);
    // line direction in the (run, up) plane; the cut region is above the
    // line, so the outward normal points below it
    let dir = axis * (u1 - u0) + up * (y1 - y0);
    let below = Vec3::new(
        dir.y * axis.x,
        -(dir.x * axis.x + dir.z * axis.z),
        dir.y * axis.z,
    );
    let mut planes = vec![Plane::from_point_normal(
        run_point(wall, thickness, u0, y0),
        below,
    )];
    if let Some((u_split, keep_low_side)) = split {
        // restrict the cut region to one side of the split station
        let normal = if keep_low_side { axis } else { -axis };
        planes.push(Plane::from_point_normal(
            run_point(wall, thickness, u_split, 0.0),
            normal,
        ));
    }
    ConvexCutter::from_planes(planes)
}

/// Roofline cutters for a job's top line.
fn roofline_cutters(job: &CladdingJob) -> Vec<ConvexCutter> {
    let t = job.wall_thickness;
    match job.top {
        TopLine::Flat(y) => vec![ConvexCutter::half_space(Plane::from_point_normal(
            run_point(job.wall, t, 0.0, y),
            Vec3::new(0.0, -1.0, 0.0),
        ))],
        TopLine::Sloped { y_start, y_end } => {
            let (u0, u1) = (job.span.start_mm, job.span.end());
            vec![above_line_cutter(job.wall, t, u0, y_start, u1, y_end, None)]
        }
        TopLine::Gable {
            eaves_y,
            ridge_y,
            ridge_u,
        } => {
            // the region above a tent profile is not convex: one wedge per
            // slope, split at the ridge
            vec![
                above_line_cutter(
                    job.wall,
                    t,
                    0.0,
                    eaves_y,
                    ridge_u,
                    ridge_y,
                    Some((ridge_u, true)),
                ),
                above_line_cutter(
                    job.wall,
                    t,
                    ridge_u,
                    ridge_y,
                    2.0 * ridge_u,
                    eaves_y,
                    Some((ridge_u, false)),
                ),
            ]
        }
    }
}

/// World-space box cutter for an aperture, padded through the cladding
/// thickness on both sides.
fn aperture_cutter(job: &CladdingJob, wf: &WorldFrame, a: &Aperture) -> ConvexCutter {
    let bb = wall_box(
        job.wall,
        wf,
        job.wall_thickness,
        a.span.start_mm,
        a.span.len_mm,
        a.y0,
        a.y1 - a.y0,
        -1.0,
        CLAD_THICKNESS_MM + 2.0,
    )
    .aabb();
    ConvexCutter::from_aabb(
        Point3::new(bb.min[0], bb.min[1], bb.min[2]),
        Point3::new(bb.max[0], bb.max[1], bb.max[2]),
    )
}

/// Generate the course stack for one panel, untrimmed.
fn course_stack(job: &CladdingJob, wf: &WorldFrame, top_max: f64) -> TriMesh {
    let mut mesh = TriMesh::new();
    let mut bottom = job.base_y - CLAD_DROP_MM;
    while bottom < top_max {
        let lip = wall_box(
            job.wall,
            wf,
            job.wall_thickness,
            job.span.start_mm,
            job.span.len_mm,
            bottom,
            BOARD_LIP_MM,
            0.0,
            CLAD_THICKNESS_MM,
        );
        let face = wall_box(
            job.wall,
            wf,
            job.wall_thickness,
            job.span.start_mm,
            job.span.len_mm,
            bottom + BOARD_LIP_MM,
            BOARD_FACE_MM,
            0.0,
            CLAD_FACE_THICKNESS_MM,
        );
        mesh.merge(&lip);
        mesh.merge(&face);
        bottom += BOARD_PITCH_MM;
    }
    mesh
}

/// Execute cladding jobs against the current build generation.
///
/// Stale jobs (from an older generation) are skipped. A panel whose trim
/// fails keeps its untrimmed course stack and logs a warning — cladding
/// must never abort a build.
pub fn execute_cladding(
    jobs: &[CladdingJob],
    wf: &WorldFrame,
    measured: &MeasuredBounds,
    generation: u64,
) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for job in jobs {
        if job.generation != generation {
            log::debug!(
                "skipping stale cladding job (wall {:?} panel {}): generation {} != {}",
                job.wall,
                job.panel_index,
                job.generation,
                generation
            );
            continue;
        }
        // measured plate bounds override the computed flat top
        let (top, top_max) = match measured.get(job.wall, job.panel_index) {
            Some(bb) if matches!(job.top, TopLine::Flat(_)) => {
                (TopLine::Flat(bb.max[1]), bb.max[1])
            }
            _ => (job.top, job.top.y_max()),
        };
        let trimmed_job = CladdingJob { top, ..job.clone() };

        let stack = course_stack(job, wf, top_max);
        let mut cutters = roofline_cutters(&trimmed_job);
        for a in &job.apertures {
            cutters.push(aperture_cutter(job, wf, a));
        }
        let mesh = match subtract_all(&stack, &cutters) {
            Ok(m) => m,
            Err(e) => {
                log::warn!(
                    "cladding trim failed on {:?} panel {}: {e}; keeping untrimmed courses",
                    job.wall,
                    job.panel_index
                );
                stack
            }
        };
        pieces.push(Piece::new(
            format!("clad-{:?}-panel{}", job.wall, job.panel_index).to_lowercase(),
            Component::Cladding,
            PieceKind::Cladding,
            MAT_CLADDING,
            mesh,
        ));
    }
    pieces
}
