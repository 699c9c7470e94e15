//! Door, window, and skylight assemblies.
//!
//! Assemblies are modelled in an opening-local frame (`x` across the
//! aperture, `y` up from the aperture bottom, `z` outward through the
//! wall) and placed with a rigid basis transform per wall, so the same
//! construction serves all four walls without mirroring. Doors can be
//! posed open: the leaf group swings about its hinge line before
//! placement.
//!
//! Openings the caller has flagged invalid are still built, in the alert
//! material, so the problem is visible in the rendered model instead of
//! silently vanishing.

use shedwright_config::{
    BuildingConfig, DoorStyle, Opening, OpeningKind, Skylight, Wall,
};
use shedwright_mesh::{Point3, Transform, TriMesh, Vec3};

use crate::consts::{
    COVERING_THICKNESS_MM, DOOR_BOARD_THICKNESS_MM, DOOR_BOARD_WIDTH_MM, DOOR_FRAME_THICKNESS_MM,
    DOOR_GAP_MM, DOOR_RAIL_MM, DOOR_RAIL_THICKNESS_MM, GLASS_MM, OPENING_FRAME_MM,
    OSB_THICKNESS_MM,
};
use crate::context::{
    BuildContext, Component, Piece, PieceKind, MAT_GLASS, MAT_JOINERY, MAT_STEEL,
};
use crate::dims::WorldFrame;
use crate::profile::StudProfile;
use crate::roof::RoofSolver;
use crate::roof_frame::{clamp_skylight_y, face_frame};

/// One local-space part of an assembly, before placement.
struct Part {
    tag: String,
    kind: PieceKind,
    material: &'static str,
    mesh: TriMesh,
    /// Parts of the leaf group swing with the door; liners do not.
    swings: bool,
}

impl Part {
    fn fixed(tag: &str, kind: PieceKind, material: &'static str, mesh: TriMesh) -> Self {
        Self {
            tag: tag.to_string(),
            kind,
            material,
            mesh,
            swings: false,
        }
    }

    fn leaf(tag: String, kind: PieceKind, material: &'static str, mesh: TriMesh) -> Self {
        Self {
            tag,
            kind,
            material,
            mesh,
            swings: true,
        }
    }
}

/// Placement transform for an opening-local assembly onto a wall.
///
/// Local `x ∈ [0, opening_w]` spans the aperture, `y` rises from
/// `bottom_y`, `z` points outward through the wall's exterior plane.
fn wall_opening_transform(
    wall: Wall,
    wf: &WorldFrame,
    thickness: f64,
    u_pos: f64,
    opening_w: f64,
    bottom_y: f64,
) -> Transform {
    let ey = Vec3::new(0.0, 1.0, 0.0);
    let (origin, ex, ez) = match wall {
        Wall::Front => (
            Point3::new(u_pos + opening_w, bottom_y, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ),
        Wall::Back => (
            Point3::new(u_pos, bottom_y, wf.frame_d),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ),
        Wall::Left => (
            Point3::new(0.0, bottom_y, thickness + u_pos),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ),
        Wall::Right => (
            Point3::new(wf.frame_w, bottom_y, thickness + u_pos + opening_w),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ),
    };
    Transform::from_basis(origin, ex, ey, ez)
}

// =============================================================================
// Door leaves
// =============================================================================

/// Vertical face boards filling `[x0, x0+w] × [y0, y0+h]` at `z ∈
/// [z0, z0 + board thickness]`.
fn face_boards(
    parts: &mut Vec<Part>,
    prefix: &str,
    material: &'static str,
    x0: f64,
    w: f64,
    y0: f64,
    h: f64,
    z0: f64,
) {
    let mut x = x0;
    let mut i = 0usize;
    while x < x0 + w - 0.5 {
        let bw = (x0 + w - x).min(DOOR_BOARD_WIDTH_MM);
        parts.push(Part::leaf(
            format!("{prefix}-board{i}"),
            PieceKind::Board,
            material,
            TriMesh::cuboid(bw, h, DOOR_BOARD_THICKNESS_MM).translated(x, y0, z0),
        ));
        x += bw;
        i += 1;
    }
}

/// Diagonal brace between two ledge ends, in the leaf plane.
fn brace(x0: f64, y0: f64, x1: f64, y1: f64, z0: f64) -> TriMesh {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len = (dx * dx + dy * dy).sqrt();
    let angle = dy.atan2(dx).to_degrees();
    TriMesh::cuboid(len, DOOR_RAIL_MM, DOOR_RAIL_THICKNESS_MM)
        .rotated_z_about(angle, Point3::origin())
        .translated(x0, y0, z0)
}

/// Ledged-and-braced leaf: vertical boards, three ledges, Z-pattern
/// braces, T-hinges and a latch handle.
fn ledged_braced_leaf(
    parts: &mut Vec<Part>,
    mat: &'static str,
    steel: &'static str,
    x0: f64,
    w: f64,
    y0: f64,
    h: f64,
) {
    let board_z = -DOOR_GAP_MM - DOOR_BOARD_THICKNESS_MM;
    face_boards(parts, "leaf", mat, x0, w, y0, h, board_z);

    let rail_z = board_z - DOOR_RAIL_THICKNESS_MM;
    let ledge_ys = [
        y0 + 100.0,
        y0 + (h - DOOR_RAIL_MM) / 2.0,
        y0 + h - 100.0 - DOOR_RAIL_MM,
    ];
    for (i, ly) in ledge_ys.iter().enumerate() {
        parts.push(Part::leaf(
            format!("ledge{i}"),
            PieceKind::Board,
            mat,
            TriMesh::cuboid(w, DOOR_RAIL_MM, DOOR_RAIL_THICKNESS_MM).translated(x0, *ly, rail_z),
        ));
    }
    // Z braces rise toward the hinge side between consecutive ledges
    for (i, pair) in ledge_ys.windows(2).enumerate() {
        parts.push(Part::leaf(
            format!("brace{i}"),
            PieceKind::Board,
            mat,
            brace(
                x0 + w - DOOR_RAIL_MM,
                pair[0] + DOOR_RAIL_MM,
                x0,
                pair[1],
                rail_z,
            ),
        ));
    }
    // T-hinges over the top and bottom ledges, handle on the far stile
    for (i, ly) in [ledge_ys[0], ledge_ys[2]].iter().enumerate() {
        parts.push(Part::leaf(
            format!("hinge{i}"),
            PieceKind::Hardware,
            steel,
            TriMesh::cuboid(w * 0.6, 60.0, 4.0).translated(
                x0,
                ly + (DOOR_RAIL_MM - 60.0) / 2.0,
                board_z - 4.0,
            ),
        ));
    }
    parts.push(Part::leaf(
        "handle".to_string(),
        PieceKind::Hardware,
        steel,
        TriMesh::cuboid(40.0, 140.0, 35.0).translated(
            x0 + w - 70.0,
            y0 + h / 2.0 - 70.0,
            board_z - 35.0,
        ),
    ));
}

/// One glazed French-door leaf: stile/rail frame, kickboard below the mid
/// rail, glass above it.
fn french_leaf(
    parts: &mut Vec<Part>,
    prefix: &str,
    mat: &'static str,
    glass: &'static str,
    x0: f64,
    w: f64,
    y0: f64,
    h: f64,
) {
    let t = DOOR_FRAME_THICKNESS_MM;
    let z0 = -DOOR_GAP_MM - t;
    let s = DOOR_RAIL_MM;
    let mid_y = y0 + h * 0.35;
    // stiles
    for (tag, sx) in [("stile-l", x0), ("stile-r", x0 + w - s)] {
        parts.push(Part::leaf(
            format!("{prefix}-{tag}"),
            PieceKind::FrameRail,
            mat,
            TriMesh::cuboid(s, h, t).translated(sx, y0, z0),
        ));
    }
    // bottom, mid, top rails between the stiles
    let inner_w = w - 2.0 * s;
    for (tag, ry, rh) in [
        ("rail-bottom", y0, 1.5 * s),
        ("rail-mid", mid_y, s),
        ("rail-top", y0 + h - s, s),
    ] {
        parts.push(Part::leaf(
            format!("{prefix}-{tag}"),
            PieceKind::FrameRail,
            mat,
            TriMesh::cuboid(inner_w, rh, t).translated(x0 + s, ry, z0),
        ));
    }
    // kickboard panel below the mid rail
    parts.push(Part::leaf(
        format!("{prefix}-kickboard"),
        PieceKind::Board,
        mat,
        TriMesh::cuboid(inner_w, mid_y - (y0 + 1.5 * s), DOOR_BOARD_THICKNESS_MM).translated(
            x0 + s,
            y0 + 1.5 * s,
            z0 + (t - DOOR_BOARD_THICKNESS_MM) / 2.0,
        ),
    ));
    // glazing above it
    parts.push(Part::leaf(
        format!("{prefix}-glass"),
        PieceKind::Glass,
        glass,
        TriMesh::cuboid(inner_w, (y0 + h - s) - (mid_y + s), GLASS_MM).translated(
            x0 + s,
            mid_y + s,
            z0 + (t - GLASS_MM) / 2.0,
        ),
    ));
}

/// Mortise-and-tenon leaf: full stile/rail back frame with a boarded show
/// face and a lever handle.
fn mortise_tenon_leaf(
    parts: &mut Vec<Part>,
    mat: &'static str,
    steel: &'static str,
    x0: f64,
    w: f64,
    y0: f64,
    h: f64,
) {
    let board_z = -DOOR_GAP_MM - DOOR_BOARD_THICKNESS_MM;
    face_boards(parts, "face", mat, x0, w, y0, h, board_z);
    let t = DOOR_FRAME_THICKNESS_MM;
    let z0 = board_z - t;
    let s = DOOR_RAIL_MM;
    for (tag, sx) in [("stile-l", x0), ("stile-r", x0 + w - s)] {
        parts.push(Part::leaf(
            tag.to_string(),
            PieceKind::FrameRail,
            mat,
            TriMesh::cuboid(s, h, t).translated(sx, y0, z0),
        ));
    }
    let inner_w = w - 2.0 * s;
    for (tag, ry) in [
        ("rail-bottom", y0),
        ("rail-mid", y0 + (h - s) / 2.0),
        ("rail-top", y0 + h - s),
    ] {
        parts.push(Part::leaf(
            tag.to_string(),
            PieceKind::FrameRail,
            mat,
            TriMesh::cuboid(inner_w, s, t).translated(x0 + s, ry, z0),
        ));
    }
    parts.push(Part::leaf(
        "handle".to_string(),
        PieceKind::Hardware,
        steel,
        TriMesh::cuboid(140.0, 40.0, 30.0).translated(
            x0 + w - 180.0,
            y0 + h * 0.45,
            board_z - 30.0,
        ),
    ));
}

// =============================================================================
// Assemblies
// =============================================================================

/// Aperture liner: jamb boards both sides plus a head board, full wall
/// thickness.
fn liner_parts(parts: &mut Vec<Part>, mat: &'static str, w: f64, h: f64, t: f64, with_sill: bool) {
    let f = OPENING_FRAME_MM;
    for (tag, x) in [("liner-l", 0.0), ("liner-r", w - f)] {
        parts.push(Part::fixed(
            tag,
            PieceKind::FrameRail,
            mat,
            TriMesh::cuboid(f, h, t).translated(x, 0.0, -t),
        ));
    }
    parts.push(Part::fixed(
        "liner-head",
        PieceKind::FrameRail,
        mat,
        TriMesh::cuboid(w - 2.0 * f, f, t).translated(f, h - f, -t),
    ));
    if with_sill {
        parts.push(Part::fixed(
            "liner-sill",
            PieceKind::FrameRail,
            mat,
            TriMesh::cuboid(w - 2.0 * f, f, t).translated(f, 0.0, -t),
        ));
    }
}

fn door_parts(o: &Opening, t: f64, mat: &'static str, steel: &'static str, glass: &'static str) -> Vec<Part> {
    let mut parts = Vec::new();
    liner_parts(&mut parts, mat, o.width_mm, o.height_mm, t, false);
    let f = OPENING_FRAME_MM;
    let leaf_x = f + DOOR_GAP_MM;
    let leaf_w = o.width_mm - 2.0 * (f + DOOR_GAP_MM);
    let leaf_y = DOOR_GAP_MM;
    let leaf_h = o.height_mm - f - 2.0 * DOOR_GAP_MM;
    match o.style.unwrap_or(DoorStyle::LedgedBraced) {
        DoorStyle::LedgedBraced => {
            ledged_braced_leaf(&mut parts, mat, steel, leaf_x, leaf_w, leaf_y, leaf_h)
        }
        DoorStyle::French => {
            let half = (leaf_w - 2.0 * DOOR_GAP_MM) / 2.0;
            french_leaf(&mut parts, "left", mat, glass, leaf_x, half, leaf_y, leaf_h);
            french_leaf(
                &mut parts,
                "right",
                mat,
                glass,
                leaf_x + half + 2.0 * DOOR_GAP_MM,
                half,
                leaf_y,
                leaf_h,
            );
        }
        DoorStyle::MortiseTenon => {
            mortise_tenon_leaf(&mut parts, mat, steel, leaf_x, leaf_w, leaf_y, leaf_h)
        }
    }
    parts
}

fn window_parts(o: &Opening, t: f64, mat: &'static str, glass: &'static str) -> Vec<Part> {
    let mut parts = Vec::new();
    liner_parts(&mut parts, mat, o.width_mm, o.height_mm, t, true);
    let f = OPENING_FRAME_MM;
    // pane held at the outer third of the wall thickness
    parts.push(Part::fixed(
        "glass",
        PieceKind::Glass,
        glass,
        TriMesh::cuboid(o.width_mm - 2.0 * f, o.height_mm - 2.0 * f, GLASS_MM).translated(
            f,
            f,
            -t / 3.0,
        ),
    ));
    // external drip sill
    parts.push(Part::fixed(
        "drip-sill",
        PieceKind::Sill,
        mat,
        TriMesh::cuboid(o.width_mm + 2.0 * f, 30.0, 45.0).translated(-f, -30.0, 0.0),
    ));
    parts
}

/// Build one wall opening into placed pieces.
fn build_opening(
    o: &Opening,
    wf: &WorldFrame,
    profile: &StudProfile,
    ctx: &BuildContext,
    pieces: &mut Vec<Piece>,
) {
    let t = profile.wall_thickness();
    let mat = ctx.opening_material(&o.id, MAT_JOINERY);
    let steel = ctx.opening_material(&o.id, MAT_STEEL);
    let glass = ctx.opening_material(&o.id, MAT_GLASS);
    let (bottom_y, parts) = match o.kind {
        OpeningKind::Door => (wf.wall_base_y(), door_parts(o, t, mat, steel, glass)),
        OpeningKind::Window => (
            wf.wall_base_y() + o.sill_mm.unwrap_or(900.0),
            window_parts(o, t, mat, glass),
        ),
    };
    let place = wall_opening_transform(o.wall, wf, t, o.position_mm, o.width_mm, bottom_y);
    // hinge line at the aperture's local x = 0 edge, leaf swings outward
    let swing = (ctx.open_doors && o.kind == OpeningKind::Door)
        .then(|| Transform::rotation_y(-80.0_f64.to_radians()));
    for part in parts {
        let mesh = if part.swings {
            match &swing {
                Some(s) => part.mesh.transformed(s).transformed(&place),
                None => part.mesh.transformed(&place),
            }
        } else {
            part.mesh.transformed(&place)
        };
        pieces.push(Piece::new(
            format!("opening-{}-{}", o.id, part.tag),
            Component::Openings,
            part.kind,
            part.material,
            mesh,
        ));
    }
}

/// Build one skylight: a curb frame above the covering plus a glazed pane,
/// in roof-face slope coordinates.
fn build_skylight(
    index: usize,
    sk: &Skylight,
    wf: &WorldFrame,
    solver: &RoofSolver,
    pieces: &mut Vec<Piece>,
) {
    let Some(frame) = face_frame(solver, wf, sk.face) else {
        log::warn!(
            "skylight {index} addresses roof face {:?} which does not exist for this roof style",
            sk.face
        );
        return;
    };
    let y = clamp_skylight_y(sk, frame.slope_len);
    let f = OPENING_FRAME_MM;
    let z0 = OSB_THICKNESS_MM + COVERING_THICKNESS_MM;
    let place = frame.transform();
    let (w, h) = (sk.width_mm, sk.height_mm);
    let rails = [
        ("curb-low", sk.x_mm - f, y - f, w + 2.0 * f, f),
        ("curb-high", sk.x_mm - f, y + h, w + 2.0 * f, f),
        ("curb-l", sk.x_mm - f, y, f, h),
        ("curb-r", sk.x_mm + w, y, f, h),
    ];
    for (tag, rx, ry, rw, rh) in rails {
        pieces.push(Piece::new(
            format!("skylight-{index}-{tag}"),
            Component::Openings,
            PieceKind::FrameRail,
            MAT_JOINERY,
            TriMesh::cuboid(rw, rh, f)
                .translated(rx, ry, z0)
                .transformed(&place),
        ));
    }
    pieces.push(Piece::new(
        format!("skylight-{index}-glass"),
        Component::Openings,
        PieceKind::Glass,
        MAT_GLASS,
        TriMesh::cuboid(w + 2.0 * f, h + 2.0 * f, GLASS_MM)
            .translated(sk.x_mm - f, y - f, z0 + f)
            .transformed(&place),
    ));
}

/// Build every door, window, and skylight assembly.
pub fn build_openings(
    cfg: &BuildingConfig,
    wf: &WorldFrame,
    profile: &StudProfile,
    solver: &RoofSolver,
    ctx: &BuildContext,
) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for o in &cfg.openings {
        build_opening(o, wf, profile, ctx, &mut pieces);
    }
    for (i, sk) in cfg.skylights.iter().enumerate() {
        build_skylight(i, sk, wf, solver, &mut pieces);
    }
    pieces
}
