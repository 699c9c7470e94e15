#![warn(missing_docs)]

//! Triangle-mesh value types for the shedwright geometry engine.
//!
//! Every framing member, board, and sheet in a build is a [`TriMesh`]: a flat
//! f64 vertex buffer plus a u32 index buffer, in world millimetres. The
//! constructors here cover the shapes timber construction needs — axis-aligned
//! cuboids, sloped prisms (plates under a pitched roof), and extruded
//! polygons (wedge cutters, gable infill) — plus transforms and AABB queries.
//!
//! Meshes are plain values: merge concatenates buffers with index rebasing,
//! transforms return new meshes. There is no scene graph and no retained
//! engine state.

use nalgebra::{Matrix4, Vector4};

/// A point in 3D space (f64, millimetres).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// A 2D point used for extrusion profiles.
pub type Point2 = nalgebra::Point2<f64>;

// =============================================================================
// Transform
// =============================================================================

/// A 4x4 affine transform over mesh vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Affine frame from an origin and three basis vectors: local X maps
    /// to `ex`, Y to `ey`, Z to `ez`. The basis should be orthonormal and
    /// right-handed if the transform is to preserve winding.
    pub fn from_basis(origin: Point3, ex: Vec3, ey: Vec3, ez: Vec3) -> Self {
        let mut m = Matrix4::identity();
        for (col, v) in [(0, ex), (1, ey), (2, ez)] {
            m[(0, col)] = v.x;
            m[(1, col)] = v.y;
            m[(2, col)] = v.z;
        }
        m[(0, 3)] = origin.x;
        m[(1, 3)] = origin.y;
        m[(2, 3)] = origin.z;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Compose: apply `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

// =============================================================================
// Aabb
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

impl Aabb {
    /// An inverted box, identity for [`Aabb::union`].
    pub fn empty() -> Self {
        Self {
            min: [f64::MAX; 3],
            max: [f64::MIN; 3],
        }
    }

    /// Expand to contain a point.
    pub fn grow(&mut self, p: &Point3) {
        let c = [p.x, p.y, p.z];
        for i in 0..3 {
            self.min[i] = self.min[i].min(c[i]);
            self.max[i] = self.max[i].max(c[i]);
        }
    }

    /// Union of two boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    /// True if the boxes overlap (closed interval comparison).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }

    /// Extent along each axis.
    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Centre point.
    pub fn centre(&self) -> Point3 {
        Point3::new(
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        )
    }
}

// =============================================================================
// TriMesh
// =============================================================================

/// A triangle mesh: flat vertex buffer + index buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    /// Flat array of vertex positions `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f64>,
    /// Flat array of triangle indices `[i0, i1, i2, ...]`, CCW outward.
    pub indices: Vec<u32>,
}

impl TriMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex position at index `i`.
    pub fn vertex(&self, i: usize) -> Point3 {
        Point3::new(
            self.vertices[i * 3],
            self.vertices[i * 3 + 1],
            self.vertices[i * 3 + 2],
        )
    }

    /// Push a vertex, returning its index.
    pub fn push_vertex(&mut self, p: Point3) -> u32 {
        let idx = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&[p.x, p.y, p.z]);
        idx
    }

    /// Push a triangle by vertex indices.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Merge another mesh into this one, rebasing its indices.
    pub fn merge(&mut self, other: &TriMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Axis-aligned bounding box over all vertices.
    pub fn aabb(&self) -> Aabb {
        let mut bb = Aabb::empty();
        for i in 0..self.num_vertices() {
            bb.grow(&self.vertex(i));
        }
        bb
    }

    /// Apply a transform, returning a new mesh.
    pub fn transformed(&self, t: &Transform) -> TriMesh {
        let mut out = self.clone();
        for chunk in out.vertices.chunks_mut(3) {
            let p = t.apply_point(&Point3::new(chunk[0], chunk[1], chunk[2]));
            chunk[0] = p.x;
            chunk[1] = p.y;
            chunk[2] = p.z;
        }
        out
    }

    /// Translate by `(dx, dy, dz)`.
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> TriMesh {
        self.transformed(&Transform::translation(dx, dy, dz))
    }

    /// Rotate about the world Y axis by `deg` degrees around a pivot point.
    pub fn rotated_y_about(&self, deg: f64, pivot: Point3) -> TriMesh {
        let t = Transform::translation(pivot.x, pivot.y, pivot.z)
            .then(&Transform::rotation_y(deg.to_radians()))
            .then(&Transform::translation(-pivot.x, -pivot.y, -pivot.z));
        self.transformed(&t)
    }

    /// Rotate about the world X axis by `deg` degrees around a pivot point.
    pub fn rotated_x_about(&self, deg: f64, pivot: Point3) -> TriMesh {
        let t = Transform::translation(pivot.x, pivot.y, pivot.z)
            .then(&Transform::rotation_x(deg.to_radians()))
            .then(&Transform::translation(-pivot.x, -pivot.y, -pivot.z));
        self.transformed(&t)
    }

    /// Rotate about the world Z axis by `deg` degrees around a pivot point.
    pub fn rotated_z_about(&self, deg: f64, pivot: Point3) -> TriMesh {
        let t = Transform::translation(pivot.x, pivot.y, pivot.z)
            .then(&Transform::rotation_z(deg.to_radians()))
            .then(&Transform::translation(-pivot.x, -pivot.y, -pivot.z));
        self.transformed(&t)
    }

    /// Total surface area of all triangles.
    pub fn surface_area(&self) -> f64 {
        let mut area = 0.0;
        for tri in self.indices.chunks(3) {
            let v0 = self.vertex(tri[0] as usize);
            let v1 = self.vertex(tri[1] as usize);
            let v2 = self.vertex(tri[2] as usize);
            area += (v1 - v0).cross(&(v2 - v0)).norm() / 2.0;
        }
        area
    }

    // =========================================================================
    // Primitive constructors
    // =========================================================================

    /// Axis-aligned cuboid with min corner at origin and size `(sx, sy, sz)`.
    ///
    /// 8 vertices, 12 triangles, outward CCW winding:
    /// ```text
    ///     v4----v5
    ///    /|    /|
    ///   v7----v6|    y
    ///   | v0--|-v1   | z
    ///   |/    |/     |/
    ///   v3----v2     +---x
    /// ```
    pub fn cuboid(sx: f64, sy: f64, sz: f64) -> TriMesh {
        let mut m = TriMesh::new();
        let verts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(sx, 0.0, 0.0),
            Point3::new(sx, 0.0, sz),
            Point3::new(0.0, 0.0, sz),
            Point3::new(0.0, sy, 0.0),
            Point3::new(sx, sy, 0.0),
            Point3::new(sx, sy, sz),
            Point3::new(0.0, sy, sz),
        ];
        for v in verts {
            m.push_vertex(v);
        }
        // Quads as index groups: bottom, top, front(z=0), back(z=sz), left, right
        const QUADS: [[u32; 4]; 6] = [
            [0, 1, 2, 3], // bottom (-Y)
            [4, 7, 6, 5], // top (+Y)
            [0, 4, 5, 1], // z=0 (-Z)
            [3, 2, 6, 7], // z=sz (+Z)
            [0, 3, 7, 4], // x=0 (-X)
            [1, 5, 6, 2], // x=sx (+X)
        ];
        for q in QUADS {
            m.push_triangle(q[0], q[1], q[2]);
            m.push_triangle(q[0], q[2], q[3]);
        }
        m
    }

    /// Cuboid positioned with its min corner at `origin`.
    pub fn cuboid_at(origin: Point3, sx: f64, sy: f64, sz: f64) -> TriMesh {
        Self::cuboid(sx, sy, sz).translated(origin.x, origin.y, origin.z)
    }

    /// Sloped prism: a cuboid whose top face tilts along X.
    ///
    /// Footprint `len × depth` in X/Z with the min corner at origin; the
    /// underside is flat at `y = 0` and the top face runs linearly from
    /// `h_start` (at x=0) to `h_end` (at x=len). Used for top plates and wall
    /// caps under a pent roof. 8 vertices, 12 triangles.
    pub fn sloped_prism_x(len: f64, depth: f64, h_start: f64, h_end: f64) -> TriMesh {
        let mut m = TriMesh::new();
        let verts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(len, 0.0, 0.0),
            Point3::new(len, 0.0, depth),
            Point3::new(0.0, 0.0, depth),
            Point3::new(0.0, h_start, 0.0),
            Point3::new(len, h_end, 0.0),
            Point3::new(len, h_end, depth),
            Point3::new(0.0, h_start, depth),
        ];
        for v in verts {
            m.push_vertex(v);
        }
        const QUADS: [[u32; 4]; 6] = [
            [0, 1, 2, 3],
            [4, 7, 6, 5],
            [0, 4, 5, 1],
            [3, 2, 6, 7],
            [0, 3, 7, 4],
            [1, 5, 6, 2],
        ];
        for q in QUADS {
            m.push_triangle(q[0], q[1], q[2]);
            m.push_triangle(q[0], q[2], q[3]);
        }
        m
    }

    /// Extrude a convex polygon in the XY plane along +Z by `depth`.
    ///
    /// The profile must be convex and wound CCW when viewed from +Z.
    /// Faces are fan-triangulated; used for gable triangles and wedge
    /// cutters. Returns an empty mesh for profiles with fewer than 3 points.
    pub fn extrude_polygon_z(profile: &[Point2], depth: f64) -> TriMesh {
        let n = profile.len();
        if n < 3 {
            return TriMesh::new();
        }
        let mut m = TriMesh::new();
        // Near ring (z=0) then far ring (z=depth).
        for p in profile {
            m.push_vertex(Point3::new(p.x, p.y, 0.0));
        }
        for p in profile {
            m.push_vertex(Point3::new(p.x, p.y, depth));
        }
        let n = n as u32;
        // Near cap faces -Z: CCW profile viewed from +Z must be reversed.
        for i in 1..n - 1 {
            m.push_triangle(0, i + 1, i);
        }
        // Far cap faces +Z: keep profile winding.
        for i in 1..n - 1 {
            m.push_triangle(n, n + i, n + i + 1);
        }
        // Side quads.
        for i in 0..n {
            let j = (i + 1) % n;
            m.push_triangle(i, j, n + j);
            m.push_triangle(i, n + j, n + i);
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_counts_and_bounds() {
        let m = TriMesh::cuboid(100.0, 50.0, 25.0);
        assert_eq!(m.num_vertices(), 8);
        assert_eq!(m.num_triangles(), 12);
        let bb = m.aabb();
        assert_eq!(bb.min, [0.0, 0.0, 0.0]);
        assert_eq!(bb.max, [100.0, 50.0, 25.0]);
    }

    #[test]
    fn cuboid_surface_area() {
        let m = TriMesh::cuboid(10.0, 10.0, 10.0);
        let area = m.surface_area();
        assert!((area - 600.0).abs() < 1e-9, "expected 600, got {area}");
    }

    #[test]
    fn merge_rebases_indices() {
        let mut a = TriMesh::cuboid(10.0, 10.0, 10.0);
        let b = TriMesh::cuboid(5.0, 5.0, 5.0).translated(20.0, 0.0, 0.0);
        a.merge(&b);
        assert_eq!(a.num_vertices(), 16);
        assert_eq!(a.num_triangles(), 24);
        // All indices must be in range.
        assert!(a.indices.iter().all(|&i| (i as usize) < a.num_vertices()));
        let bb = a.aabb();
        assert!((bb.max[0] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn translated_moves_bounds() {
        let m = TriMesh::cuboid(10.0, 10.0, 10.0).translated(100.0, 200.0, 300.0);
        let bb = m.aabb();
        assert_eq!(bb.min, [100.0, 200.0, 300.0]);
        assert_eq!(bb.max, [110.0, 210.0, 310.0]);
    }

    #[test]
    fn from_basis_maps_axes() {
        let t = Transform::from_basis(
            Point3::new(10.0, 20.0, 30.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        );
        let p = t.apply_point(&Point3::new(5.0, 0.0, 0.0));
        assert!((p - Point3::new(10.0, 20.0, 35.0)).norm() < 1e-12);
        let q = t.apply_point(&Point3::new(0.0, 0.0, 2.0));
        assert!((q - Point3::new(8.0, 20.0, 30.0)).norm() < 1e-12);
    }

    #[test]
    fn rotation_y_about_pivot() {
        // Cuboid spanning x 0..10; rotate 180° about its own centre.
        let m = TriMesh::cuboid(10.0, 10.0, 10.0);
        let pivot = Point3::new(5.0, 5.0, 5.0);
        let r = m.rotated_y_about(180.0, pivot);
        let bb = r.aabb();
        assert!((bb.min[0] - 0.0).abs() < 1e-9, "min x: {}", bb.min[0]);
        assert!((bb.max[0] - 10.0).abs() < 1e-9, "max x: {}", bb.max[0]);
    }

    #[test]
    fn rotation_z_tilts_height() {
        // A 100-long bar rotated 90° about Z ends up vertical.
        let m = TriMesh::cuboid(100.0, 10.0, 10.0);
        let r = m.rotated_z_about(90.0, Point3::origin());
        let bb = r.aabb();
        assert!((bb.max[1] - 100.0).abs() < 1e-9, "max y: {}", bb.max[1]);
    }

    #[test]
    fn sloped_prism_heights() {
        let m = TriMesh::sloped_prism_x(1000.0, 50.0, 100.0, 300.0);
        let bb = m.aabb();
        assert!((bb.max[1] - 300.0).abs() < 1e-9);
        // Top vertices at x=0 sit at h_start.
        let has_start_top = (0..m.num_vertices())
            .map(|i| m.vertex(i))
            .any(|v| v.x == 0.0 && (v.y - 100.0).abs() < 1e-9);
        assert!(has_start_top, "expected top vertex at (0, 100)");
    }

    #[test]
    fn extrude_triangle_counts() {
        let profile = [
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(50.0, 80.0),
        ];
        let m = TriMesh::extrude_polygon_z(&profile, 50.0);
        assert_eq!(m.num_vertices(), 6);
        // 2 caps (1 tri each) + 3 side quads (2 tris each) = 8
        assert_eq!(m.num_triangles(), 8);
        let bb = m.aabb();
        assert_eq!(bb.max, [100.0, 80.0, 50.0]);
    }

    #[test]
    fn extrude_degenerate_profile_is_empty() {
        let profile = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        let m = TriMesh::extrude_polygon_z(&profile, 10.0);
        assert!(m.is_empty());
    }

    #[test]
    fn aabb_overlap() {
        let a = TriMesh::cuboid(10.0, 10.0, 10.0).aabb();
        let b = TriMesh::cuboid(10.0, 10.0, 10.0).translated(5.0, 0.0, 0.0).aabb();
        let c = TriMesh::cuboid(10.0, 10.0, 10.0).translated(50.0, 0.0, 0.0).aabb();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
