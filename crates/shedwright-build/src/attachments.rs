//! Attached lean-to / apex sub-structures.
//!
//! An attachment is a small three-walled building sharing one wall with
//! the host: its own base, frame, cladding, openings, and a pent or apex
//! roof whose highest point is capped below the host's wall top so it
//! tucks under the host eaves. The attachment is built in a local frame
//! with the shared side at local `x = depth` (the local right wall, which
//! is left open), then placed against the host wall with a yaw-only basis
//! transform. That way an apex ridge, which always runs along local Z,
//! comes out parallel to the host wall for every anchor side.

use shedwright_config::{
    Attachment, AttachmentRoofStyle, BuildingConfig, Opening, RoofConfig, SizeInput, SizingMode,
    Wall,
};
use shedwright_mesh::{Point3, Transform, Vec3};

use crate::base::build_base;
use crate::cladding::{execute_cladding, plan_cladding, MeasuredBounds};
use crate::consts::{COVERING_THICKNESS_MM, OSB_THICKNESS_MM, RAFTER_DEPTH_MM};
use crate::context::{BuildContext, Component, Piece};
use crate::dims::{resolve_dims, WorldFrame};
use crate::openings::build_openings;
use crate::profile::resolve_profile;
use crate::roof::RoofSolver;
use crate::roof_frame::build_roof;
use crate::walls::build_wall_subset;

/// Headroom kept between the attachment's highest point and the host wall
/// top: rafter depth, sheathing, covering, and a margin.
const ROOF_CLEARANCE_MM: f64 = RAFTER_DEPTH_MM + OSB_THICKNESS_MM + COVERING_THICKNESS_MM + 26.0;

/// The three attachment walls that get framed; the local right wall is the
/// shared side and stays open.
const EXTERIOR_WALLS: [Wall; 3] = [Wall::Front, Wall::Back, Wall::Left];

/// Placement of an attachment's local frame against a host wall.
///
/// Local X runs away from the host (interface at `x = depth`), local Z
/// runs along the host wall.
fn anchor_transform(host_wall: Wall, wf: &WorldFrame, a: &Attachment, centre: f64) -> Transform {
    let (w, d) = (wf.frame_w, wf.frame_d);
    let half = a.width_mm / 2.0;
    let depth = a.depth_mm;
    let ey = Vec3::new(0.0, 1.0, 0.0);
    let (origin, ex, ez) = match host_wall {
        Wall::Right => (
            Point3::new(w + depth, 0.0, centre + half),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ),
        Wall::Left => (
            Point3::new(-depth, 0.0, centre - half),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ),
        Wall::Front => (
            Point3::new(centre + half, 0.0, -depth),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ),
        Wall::Back => (
            Point3::new(centre - half, 0.0, d + depth),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ),
    };
    Transform::from_basis(origin, ex, ey, ez)
}

/// Anchor centre along the host wall's axis, clamped so the attachment
/// stays on the wall when it fits.
fn anchor_centre(host_wall: Wall, wf: &WorldFrame, a: &Attachment) -> f64 {
    let run = if host_wall.runs_along_x() {
        wf.frame_w
    } else {
        wf.frame_d
    };
    let centre = run / 2.0 + a.attach_to.offset_from_centre_mm;
    let half = a.width_mm / 2.0;
    if a.width_mm < run {
        centre.clamp(half, run - half)
    } else {
        run / 2.0
    }
}

/// Synthesize the attachment's own building description.
///
/// The roof heights are derived, not configured: the highest point is
/// capped at the host wall top minus clearance, and the slope drops a
/// quarter of the attachment depth (pent) or rises over a quarter of it
/// (apex), floored at 60% of the cap.
fn sub_config(a: &Attachment, cap: f64) -> BuildingConfig {
    let high = cap - ROOF_CLEARANCE_MM;
    let low = (high - a.depth_mm / 4.0).max(high * 0.6);
    let mut overhangs = a.overhangs;
    // no overhang into the host wall
    overhangs.right_mm = Some(0.0);
    let roof = match a.roof {
        AttachmentRoofStyle::Pent => RoofConfig::Pent {
            min_height_mm: low,
            max_height_mm: high,
            high_side: Wall::Right,
        },
        AttachmentRoofStyle::Apex => RoofConfig::Apex {
            eaves_mm: low,
            crest_mm: high,
        },
    };
    let openings: Vec<Opening> = a
        .openings
        .iter()
        .filter(|o| o.wall != Wall::Right)
        .cloned()
        .collect();
    BuildingConfig {
        size: SizeInput {
            mode: SizingMode::Frame,
            width_mm: a.depth_mm,
            depth_mm: a.width_mm,
        },
        overhangs,
        roof,
        wall_variant: a.wall_variant,
        frame_gauge: None,
        wall_height_mm: low,
        openings,
        skylights: Vec::new(),
        dividers: Vec::new(),
        attachments: Vec::new(),
        ..BuildingConfig::default()
    }
}

/// Build one attachment in its local frame and place it on the host.
fn build_attachment(
    a: &Attachment,
    host_wf: &WorldFrame,
    host_solver: &RoofSolver,
    ctx: &BuildContext,
    out: &mut Vec<Piece>,
) {
    let host_wall = a.attach_to.wall;
    let centre = anchor_centre(host_wall, host_wf, a);
    let cap = host_solver.wall_top_at(host_wall, centre);
    let cfg = sub_config(a, cap);

    let dims = resolve_dims(&cfg.size, &cfg.overhangs);
    let wf = WorldFrame::new(&dims);
    let profile = resolve_profile(cfg.wall_variant, cfg.frame_gauge.as_ref());
    let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);

    let mut local = build_base(&dims, cfg.wall_variant);
    let walls = build_wall_subset(&cfg, &wf, &profile, &solver, ctx, &EXTERIOR_WALLS);
    local.extend(walls.pieces);
    let jobs = plan_cladding(&cfg, &wf, &profile, &solver, &walls.plates, ctx);
    local.extend(execute_cladding(&jobs, &wf, &MeasuredBounds::none(), ctx.generation));
    local.extend(build_roof(&cfg, &wf, &solver));
    local.extend(build_openings(&cfg, &wf, &profile, &solver, ctx));

    let place = anchor_transform(host_wall, host_wf, a, centre);
    for p in local {
        out.push(Piece::new(
            format!("att-{}-{}", a.id, p.name),
            Component::Attachments,
            p.kind,
            &p.material,
            p.mesh.transformed(&place),
        ));
    }
}

/// Build all configured attachments.
pub fn build_attachments(
    cfg: &BuildingConfig,
    wf: &WorldFrame,
    solver: &RoofSolver,
    ctx: &BuildContext,
) -> Vec<Piece> {
    let mut out = Vec::new();
    for a in &cfg.attachments {
        if a.width_mm < 300.0 || a.depth_mm < 300.0 {
            log::warn!("attachment {} too small to frame, skipping", a.id);
            continue;
        }
        build_attachment(a, wf, solver, ctx, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shedwright_config::AttachAnchor;

    fn host() -> (BuildingConfig, WorldFrame, RoofSolver) {
        let cfg = BuildingConfig::example();
        let dims = resolve_dims(&cfg.size, &cfg.overhangs);
        let wf = WorldFrame::new(&dims);
        let solver = RoofSolver::new(&cfg.roof, dims.frame, cfg.wall_height_mm);
        (cfg, wf, solver)
    }

    #[test]
    fn log_store_sits_against_the_right_wall() {
        let (cfg, wf, solver) = host();
        let pieces = build_attachments(&cfg, &wf, &solver, &BuildContext::new(0));
        assert!(!pieces.is_empty());
        for p in &pieces {
            let bb = p.mesh.aabb();
            // off the right wall (x = 3600), never intruding into the host
            assert!(bb.min[0] >= wf.frame_w - 1e-6, "{}: {bb:?}", p.name);
            assert!(bb.max[0] <= wf.frame_w + 900.0 + 150.0, "{}: {bb:?}", p.name);
            // centred on the host wall: 1500 wide about z = 1200, plus
            // overhangs
            assert!(bb.min[2] >= 450.0 - 150.0 && bb.max[2] <= 1950.0 + 150.0, "{}: {bb:?}", p.name);
            assert_eq!(p.component, Component::Attachments);
        }
    }

    #[test]
    fn roof_stays_below_the_host_wall_top() {
        let (cfg, wf, solver) = host();
        let pieces = build_attachments(&cfg, &wf, &solver, &BuildContext::new(0));
        let cap = solver.wall_top_at(Wall::Right, 1200.0);
        for p in &pieces {
            assert!(
                p.mesh.aabb().max[1] <= cap + 1e-6,
                "{} pokes above the host wall top: {:?}",
                p.name,
                p.mesh.aabb()
            );
        }
    }

    #[test]
    fn shared_side_is_left_open() {
        let (cfg, wf, solver) = host();
        let pieces = build_attachments(&cfg, &wf, &solver, &BuildContext::new(0));
        // no frame or cladding on the local right wall (the host side)
        assert!(!pieces.iter().any(|p| p.name.contains("wall-right")));
        assert!(!pieces.iter().any(|p| p.name.contains("clad-right")));
        // but the outward-facing local left wall is framed
        assert!(pieces.iter().any(|p| p.name.contains("wall-left")));
    }

    #[test]
    fn apex_attachment_ridge_runs_parallel_to_the_host_wall() {
        let (mut cfg, wf, solver) = host();
        cfg.attachments[0].roof = shedwright_config::AttachmentRoofStyle::Apex;
        cfg.attachments[0].depth_mm = 1200.0;
        let pieces = build_attachments(&cfg, &wf, &solver, &BuildContext::new(0));
        // the ridge line sits at a constant world X = 3600 + 1200/2, so the
        // tallest frame pieces cluster there
        let tallest = pieces
            .iter()
            .max_by(|a, b| a.mesh.aabb().max[1].total_cmp(&b.mesh.aabb().max[1]))
            .expect("pieces");
        let bb = tallest.mesh.aabb();
        let mid = (bb.min[0] + bb.max[0]) / 2.0;
        assert!(
            (mid - (wf.frame_w + 600.0)).abs() < 650.0,
            "tallest piece not near the ridge: {bb:?}"
        );
        let cap = solver.wall_top_at(Wall::Right, 1200.0);
        assert!(bb.max[1] <= cap + 1e-6);
    }

    #[test]
    fn anchored_on_the_front_wall_with_offset() {
        let (mut cfg, wf, solver) = host();
        cfg.attachments[0].attach_to = AttachAnchor {
            wall: Wall::Front,
            offset_from_centre_mm: 600.0,
        };
        let pieces = build_attachments(&cfg, &wf, &solver, &BuildContext::new(0));
        for p in &pieces {
            let bb = p.mesh.aabb();
            assert!(bb.max[2] <= 1e-6, "{} should sit in front of z = 0: {bb:?}", p.name);
            // centre 1800 + 600, width 1500, plus cladding and overhangs
            assert!(bb.min[0] >= 1650.0 - 150.0, "{}: {bb:?}", p.name);
            assert!(bb.max[0] <= 3150.0 + 150.0, "{}: {bb:?}", p.name);
        }
    }

    #[test]
    fn oversized_offset_clamps_onto_the_wall() {
        let (mut cfg, wf, solver) = host();
        cfg.attachments[0].attach_to.offset_from_centre_mm = 10_000.0;
        let centre = anchor_centre(Wall::Right, &wf, &cfg.attachments[0]);
        assert_eq!(centre, wf.frame_d - 750.0);
    }
}
