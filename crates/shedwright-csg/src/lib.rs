#![warn(missing_docs)]

//! Boolean trimming for shedwright meshes.
//!
//! Every cut the construction engine makes — door/window apertures, roof-line
//! trims, gable wedges — subtracts a *convex* region (an intersection of
//! half-spaces) from a triangle mesh. That restriction allows a robust
//! plane-clipping pipeline instead of general mesh booleans:
//!
//! 1. classify each triangle against the cutter planes,
//! 2. peel off the portion outside each plane in turn (that portion is
//!    definitively kept),
//! 3. whatever survives inside every plane is discarded.
//!
//! Non-convex cut regions (the apex roof-line, unions of apertures) are
//! expressed as a list of convex cutters subtracted sequentially.
//!
//! The trim boundary is fallible by contract: callers receive
//! `Result<TriMesh, TrimError>` and are expected to keep the untrimmed mesh
//! on failure rather than dropping the geometry.
//!
//! Cut faces are left open (no cap generation); the results are preview
//! solids, not watertight B-reps.

use shedwright_mesh::{Point3, TriMesh, Vec3};
use thiserror::Error;

/// Distance tolerance for plane classification, in mm.
const EPS: f64 = 1e-6;

/// Errors from the trimming pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrimError {
    /// A cutter plane has a zero-length or non-finite normal.
    #[error("degenerate cutter: {0}")]
    DegenerateCutter(&'static str),
    /// The input mesh contains non-finite vertex data.
    #[error("non-finite vertex in input mesh")]
    NonFiniteMesh,
}

/// An oriented plane `normal · p = offset`.
///
/// The normal points *out of* the cut region: points with positive signed
/// distance are outside the cutter (kept).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal (not required to be unit length, but non-zero).
    pub normal: Vec3,
    /// Plane offset along the normal.
    pub offset: f64,
}

impl Plane {
    /// Construct from a normal and a point on the plane.
    pub fn from_point_normal(point: Point3, normal: Vec3) -> Self {
        Self {
            normal,
            offset: normal.dot(&point.coords),
        }
    }

    /// Signed distance of a point (positive = outside the cut region).
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) - self.offset
    }
}

/// A convex cut region: the intersection of half-spaces `sd(p) ≤ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexCutter {
    planes: Vec<Plane>,
}

impl ConvexCutter {
    /// Build from an explicit plane list.
    pub fn from_planes(planes: Vec<Plane>) -> Self {
        Self { planes }
    }

    /// Axis-aligned box cutter between `min` and `max` corners.
    pub fn from_aabb(min: Point3, max: Point3) -> Self {
        let planes = vec![
            Plane::from_point_normal(max, Vec3::x()),
            Plane::from_point_normal(min, -Vec3::x()),
            Plane::from_point_normal(max, Vec3::y()),
            Plane::from_point_normal(min, -Vec3::y()),
            Plane::from_point_normal(max, Vec3::z()),
            Plane::from_point_normal(min, -Vec3::z()),
        ];
        Self { planes }
    }

    /// Single half-space cutter: removes everything on the inner side of
    /// the plane. Used for roof-line trims, where the cut region extends
    /// unbounded above a sloped plane.
    pub fn half_space(plane: Plane) -> Self {
        Self {
            planes: vec![plane],
        }
    }

    /// The planes of this cutter.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// True if a point is inside the cut region (within tolerance).
    pub fn contains(&self, p: &Point3) -> bool {
        self.planes.iter().all(|pl| pl.signed_distance(p) <= EPS)
    }

    fn validate(&self) -> Result<(), TrimError> {
        if self.planes.is_empty() {
            return Err(TrimError::DegenerateCutter("no planes"));
        }
        for pl in &self.planes {
            let n = pl.normal.norm();
            if !n.is_finite() || n < 1e-9 {
                return Err(TrimError::DegenerateCutter("zero or non-finite normal"));
            }
            if !pl.offset.is_finite() {
                return Err(TrimError::DegenerateCutter("non-finite offset"));
            }
        }
        Ok(())
    }
}

/// A convex polygon fragment produced during clipping (3 or 4+ vertices).
type Fragment = Vec<Point3>;

/// Split a convex polygon by a plane.
///
/// Returns `(inside, outside)` portions; either may be `None` when the
/// polygon lies entirely on one side. Sutherland-Hodgman on both sides.
fn split_fragment(frag: &Fragment, plane: &Plane) -> (Option<Fragment>, Option<Fragment>) {
    let dists: Vec<f64> = frag.iter().map(|p| plane.signed_distance(p)).collect();
    let any_inside = dists.iter().any(|&d| d < -EPS);
    let any_outside = dists.iter().any(|&d| d > EPS);
    if !any_outside {
        return (Some(frag.clone()), None);
    }
    if !any_inside {
        return (None, Some(frag.clone()));
    }

    let mut inside = Fragment::new();
    let mut outside = Fragment::new();
    let n = frag.len();
    for i in 0..n {
        let j = (i + 1) % n;
        let (p_i, p_j) = (frag[i], frag[j]);
        let (d_i, d_j) = (dists[i], dists[j]);

        if d_i <= EPS {
            inside.push(p_i);
        }
        if d_i >= -EPS {
            outside.push(p_i);
        }
        // Edge crosses the plane: insert the intersection into both halves.
        if (d_i < -EPS && d_j > EPS) || (d_i > EPS && d_j < -EPS) {
            let t = d_i / (d_i - d_j);
            let x = p_i + (p_j - p_i) * t;
            inside.push(x);
            outside.push(x);
        }
    }

    let inside = (inside.len() >= 3).then_some(inside);
    let outside = (outside.len() >= 3).then_some(outside);
    (inside, outside)
}

/// Fan-triangulate a convex fragment into the output mesh.
fn emit_fragment(out: &mut TriMesh, frag: &Fragment) {
    if frag.len() < 3 {
        return;
    }
    let base = out.push_vertex(frag[0]);
    let mut prev = out.push_vertex(frag[1]);
    for p in &frag[2..] {
        let cur = out.push_vertex(*p);
        out.push_triangle(base, prev, cur);
        prev = cur;
    }
}

/// Subtract a convex cut region from a mesh.
///
/// Triangles fully outside the cutter are kept verbatim; triangles fully
/// inside are dropped; straddling triangles are clipped so that exactly the
/// portion outside the cutter survives. Cut faces are not capped.
pub fn subtract(mesh: &TriMesh, cutter: &ConvexCutter) -> Result<TriMesh, TrimError> {
    cutter.validate()?;
    if mesh.vertices.iter().any(|v| !v.is_finite()) {
        return Err(TrimError::NonFiniteMesh);
    }

    let mut out = TriMesh::new();
    for tri in mesh.indices.chunks(3) {
        let frag: Fragment = vec![
            mesh.vertex(tri[0] as usize),
            mesh.vertex(tri[1] as usize),
            mesh.vertex(tri[2] as usize),
        ];

        // Peel: portions outside any plane are kept; what survives inside
        // every plane is inside the cutter and discarded.
        let mut pending = vec![frag];
        for plane in cutter.planes() {
            let mut next = Vec::with_capacity(pending.len());
            for f in &pending {
                let (inside, outside) = split_fragment(f, plane);
                if let Some(o) = outside {
                    emit_fragment(&mut out, &o);
                }
                if let Some(i) = inside {
                    next.push(i);
                }
            }
            pending = next;
            if pending.is_empty() {
                break;
            }
        }
        // `pending` now holds the inside-the-cutter remainder: dropped.
    }
    Ok(out)
}

/// Subtract a union of convex cut regions, in order.
///
/// Equivalent to `mesh − (c₀ ∪ c₁ ∪ …)`; each cutter is applied to the
/// running result. Any single failure aborts with the error so the caller
/// can fall back to the pre-trim mesh.
pub fn subtract_all(mesh: &TriMesh, cutters: &[ConvexCutter]) -> Result<TriMesh, TrimError> {
    let mut current = mesh.clone();
    for cutter in cutters {
        current = subtract(&current, cutter)?;
    }
    Ok(current)
}
