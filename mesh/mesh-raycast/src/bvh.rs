//! Bounding volume hierarchy and ray-triangle intersection.

use mesh_types::{Aabb, IndexedMesh, MeshTopology, Point3, Triangle, Vector3};
use tracing::debug;

/// A ray with a precomputed inverse direction for slab tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Point3<f64>,
    /// Direction; need not be unit length.
    pub direction: Vector3<f64>,
    inv_direction: Vector3<f64>,
}

impl Ray {
    /// Create a ray.
    ///
    /// Direction components with magnitude at or below `epsilon` get a huge
    /// finite inverse so that slab tests never multiply zero by infinity.
    #[must_use]
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>, epsilon: f64) -> Self {
        let inv_direction =
            direction.map(|d| if d.abs() > epsilon { d.recip() } else { f64::MAX });
        Self {
            origin,
            direction,
            inv_direction,
        }
    }

    /// Vertical ray pointing down `-Z` from `origin`.
    #[must_use]
    pub fn down(origin: Point3<f64>) -> Self {
        Self::new(origin, -Vector3::z(), 0.0)
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + t * self.direction
    }
}

/// Nearest intersection of a ray with a [`Bvh`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter of the hit.
    pub t: f64,
    /// Index of the struck face in the source mesh.
    pub face: usize,
    /// Hit position.
    pub point: Point3<f64>,
}

/// Ray parameter where `origin + t * direction` crosses `tri`.
///
/// Möller–Trumbore test. Only hits with `t > epsilon` count. A ray is
/// treated as parallel when the determinant is at most `epsilon` times the
/// product of the two edge lengths. Barycentric coordinates may undershoot
/// `0` or overshoot `1` by `tolerance`, so rays through a shared edge or
/// vertex still register.
///
/// # Example
///
/// ```
/// use mesh_raycast::ray_triangle_intersect;
/// use mesh_types::{Point3, Triangle, Vector3};
///
/// let floor = Triangle::new(
///     Point3::origin(),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let down = -Vector3::z();
///
/// let t = ray_triangle_intersect(&Point3::new(0.25, 0.25, 2.0), &down, &floor, 1e-9, 0.0);
/// assert_eq!(t, Some(2.0));
/// ```
#[must_use]
pub fn ray_triangle_intersect(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    tri: &Triangle,
    epsilon: f64,
    tolerance: f64,
) -> Option<f64> {
    let (e1, e2) = tri.edges();
    let pvec = direction.cross(&e2);
    let det = e1.dot(&pvec);
    if !det.is_finite() || det.abs() <= epsilon * e1.norm() * e2.norm() {
        return None;
    }
    let inv_det = det.recip();

    let tvec = origin - tri.v0;
    let u = tvec.dot(&pvec) * inv_det;
    if !(-tolerance..=1.0 + tolerance).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(&e1);
    let v = direction.dot(&qvec) * inv_det;
    if v < -tolerance || u + v > 1.0 + tolerance {
        return None;
    }

    let t = e2.dot(&qvec) * inv_det;
    (t > epsilon).then_some(t)
}

/// Entry and exit parameters of `ray` through `aabb`, entry clipped to 0.
fn slab_interval(aabb: &Aabb, ray: &Ray) -> Option<(f64, f64)> {
    let mut enter = f64::NEG_INFINITY;
    let mut exit = f64::INFINITY;
    for axis in 0..3 {
        let near = (aabb.min[axis] - ray.origin[axis]) * ray.inv_direction[axis];
        let far = (aabb.max[axis] - ray.origin[axis]) * ray.inv_direction[axis];
        enter = enter.max(near.min(far));
        exit = exit.min(near.max(far));
    }
    (exit >= enter && exit >= 0.0).then(|| (enter.max(0.0), exit))
}

fn triangle_bounds(tri: &Triangle) -> Aabb {
    Aabb::from_points(tri.vertices().iter())
}

#[derive(Debug)]
enum BvhNode {
    Leaf {
        aabb: Aabb,
        slot: usize,
    },
    Internal {
        aabb: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    /// Build over `slots`, splitting at the centroid median of the longest axis.
    fn build(
        triangles: &[Triangle],
        centroids: &[Point3<f64>],
        slots: &mut [usize],
        epsilon: f64,
    ) -> Option<Self> {
        match slots {
            [] => None,
            [slot] => Some(Self::Leaf {
                aabb: triangle_bounds(&triangles[*slot]).expanded(epsilon),
                slot: *slot,
            }),
            _ => {
                let aabb = slots
                    .iter()
                    .map(|&s| triangle_bounds(&triangles[s]))
                    .fold(Aabb::empty(), |acc, b| acc.union(&b))
                    .expanded(epsilon);

                let axis = aabb.longest_axis();
                slots.sort_by(|&a, &b| centroids[a][axis].total_cmp(&centroids[b][axis]));

                let mid = slots.len() / 2;
                let (left_slots, right_slots) = slots.split_at_mut(mid);
                let left = Self::build(triangles, centroids, left_slots, epsilon);
                let right = Self::build(triangles, centroids, right_slots, epsilon);

                match (left, right) {
                    (Some(l), Some(r)) => Some(Self::Internal {
                        aabb,
                        left: Box::new(l),
                        right: Box::new(r),
                    }),
                    (Some(n), None) | (None, Some(n)) => Some(n),
                    (None, None) => None,
                }
            }
        }
    }

    const fn aabb(&self) -> &Aabb {
        match self {
            Self::Leaf { aabb, .. } | Self::Internal { aabb, .. } => aabb,
        }
    }
}

/// Bounding volume hierarchy over the finite triangles of a mesh.
///
/// Triangles with a non-finite corner (gap vertices) are left out and can
/// never be hit.
///
/// # Example
///
/// ```
/// use mesh_raycast::{Bvh, Ray};
/// use mesh_types::{IndexedMesh, Point3, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 1.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 1.0));
/// mesh.faces.push([0, 1, 2]);
///
/// let bvh = Bvh::build(&mesh, 1e-9);
/// let hit = bvh.cast(&Ray::down(Point3::new(0.2, 0.2, 5.0)), f64::INFINITY).unwrap();
/// assert_eq!(hit.face, 0);
/// assert!((hit.point.z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Bvh {
    root: Option<BvhNode>,
    triangles: Vec<Triangle>,
    faces: Vec<usize>,
    epsilon: f64,
    tolerance: f64,
}

impl Bvh {
    /// Build a hierarchy over the mesh's faces.
    ///
    /// `epsilon` pads every bounding box and is the parallel-ray threshold;
    /// it also seeds the barycentric tolerance.
    #[must_use]
    pub fn build(mesh: &IndexedMesh, epsilon: f64) -> Self {
        let (faces, triangles): (Vec<usize>, Vec<Triangle>) = (0..mesh.face_count())
            .filter_map(|face| mesh.triangle(face).map(|tri| (face, tri)))
            .filter(|(_, tri)| tri.is_finite())
            .unzip();

        let centroids: Vec<Point3<f64>> = triangles.iter().map(Triangle::centroid).collect();
        let mut slots: Vec<usize> = (0..triangles.len()).collect();
        let root = BvhNode::build(&triangles, &centroids, &mut slots, epsilon);

        debug!(
            faces = mesh.face_count(),
            indexed = triangles.len(),
            skipped = mesh.face_count() - triangles.len(),
            "Built BVH"
        );

        Self {
            root,
            triangles,
            faces,
            epsilon,
            tolerance: epsilon,
        }
    }

    /// Set the barycentric tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Number of indexed triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether no triangle can be hit.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Bounds of all indexed triangles.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        self.root.as_ref().map(|node| *node.aabb())
    }

    /// Nearest hit within `max_dist` along the ray.
    #[must_use]
    pub fn cast(&self, ray: &Ray, max_dist: f64) -> Option<RayHit> {
        let root = self.root.as_ref()?;
        self.trace(root, ray, max_dist).map(|(t, slot)| RayHit {
            t,
            face: self.faces[slot],
            point: ray.at(t),
        })
    }

    fn trace(&self, node: &BvhNode, ray: &Ray, max_dist: f64) -> Option<(f64, usize)> {
        let (enter, _) = slab_interval(node.aabb(), ray)?;
        if enter > max_dist {
            return None;
        }

        match node {
            BvhNode::Leaf { slot, .. } => {
                let tri = &self.triangles[*slot];
                let eps = self.epsilon;
                ray_triangle_intersect(&ray.origin, &ray.direction, tri, eps, self.tolerance)
                    .filter(|&t| t <= max_dist)
                    .map(|t| (t, *slot))
            }
            BvhNode::Internal { left, right, .. } => {
                let first = self.trace(left, ray, max_dist);
                let limit = first.map_or(max_dist, |(t, _)| t);
                let second = self.trace(right, ray, limit);
                match (first, second) {
                    (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
                    (hit, None) | (None, hit) => hit,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::Vertex;

    fn down() -> Vector3<f64> {
        -Vector3::z()
    }

    fn floor(z: f64) -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(0.5, 1.0, z),
        )
    }

    /// 2x2 sample grid at z = 1 under a second one at z = 3.
    fn two_terraces() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        for z in [1.0, 3.0] {
            for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
                mesh.vertices.push(Vertex::from_coords(x, y, z));
            }
        }
        for base in [0, 4] {
            mesh.faces.push([base, base + 1, base + 2]);
            mesh.faces.push([base + 1, base + 3, base + 2]);
        }
        mesh
    }

    #[test]
    fn downward_ray_hits_floor() {
        let origin = Point3::new(0.5, 0.5, 1.0);
        let t = ray_triangle_intersect(&origin, &down(), &floor(0.0), 1e-10, 0.0);
        assert_relative_eq!(t.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rays_that_cannot_hit() {
        let tri = floor(0.0);
        let outside = Point3::new(5.0, 5.0, 1.0);
        assert!(ray_triangle_intersect(&outside, &down(), &tri, 1e-10, 0.0).is_none());
        let below = Point3::new(0.5, 0.5, -1.0);
        assert!(ray_triangle_intersect(&below, &down(), &tri, 1e-10, 0.0).is_none());
        let grazing = Point3::new(-1.0, 0.5, 0.0);
        assert!(ray_triangle_intersect(&grazing, &Vector3::x(), &tri, 1e-10, 0.0).is_none());
    }

    #[test]
    fn corner_hit_needs_tolerance() {
        let corner = Point3::new(1.0, 0.0, 2.0);
        let tri = floor(0.0);
        let t = ray_triangle_intersect(&corner, &down(), &tri, 1e-10, 1e-9);
        assert_relative_eq!(t.unwrap(), 2.0, epsilon = 1e-12);
        let nudged = Point3::new(1.0 + 1e-6, 0.0, 2.0);
        assert!(ray_triangle_intersect(&nudged, &down(), &tri, 1e-10, 1e-9).is_none());
    }

    #[test]
    fn slab_interval_of_unit_box() {
        let cube = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));

        let (enter, exit) = slab_interval(&cube, &Ray::down(Point3::new(0.5, 0.5, 3.0))).unwrap();
        assert_relative_eq!(enter, 2.0);
        assert_relative_eq!(exit, 3.0);

        assert!(slab_interval(&cube, &Ray::down(Point3::new(5.0, 5.0, 3.0))).is_none());
        assert!(slab_interval(&cube, &Ray::down(Point3::new(0.5, 0.5, -3.0))).is_none());
    }

    #[test]
    fn nearest_terrace_wins() {
        let bvh = Bvh::build(&two_terraces(), 1e-9);
        assert_eq!(bvh.triangle_count(), 4);

        let hit = bvh.cast(&Ray::down(Point3::new(0.3, 0.6, 10.0)), f64::INFINITY).unwrap();
        assert_relative_eq!(hit.point.z, 3.0, epsilon = 1e-12);
        assert_relative_eq!(hit.t, 7.0, epsilon = 1e-12);
        assert!(hit.face >= 2);
    }

    #[test]
    fn hits_beyond_max_dist_are_ignored() {
        let bvh = Bvh::build(&two_terraces(), 1e-9);
        let ray = Ray::down(Point3::new(0.3, 0.6, 10.0));
        assert!(bvh.cast(&ray, 5.0).is_none());
        assert!(bvh.cast(&ray, 7.5).is_some());
    }

    #[test]
    fn gap_triangles_are_not_indexed() {
        let mut mesh = two_terraces();
        mesh.vertices[4].position.z = f64::NAN;
        let bvh = Bvh::build(&mesh, 1e-9);
        // face [4, 5, 6] goes, face [5, 7, 6] stays
        assert_eq!(bvh.triangle_count(), 3);

        let hit = bvh.cast(&Ray::down(Point3::new(0.1, 0.1, 10.0)), f64::INFINITY).unwrap();
        assert_relative_eq!(hit.point.z, 1.0, epsilon = 1e-12);
        assert_eq!(hit.face, 0);
    }

    #[test]
    fn every_sample_position_is_hit() {
        let bvh = Bvh::build(&two_terraces(), 1e-9);
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            let hit = bvh.cast(&Ray::down(Point3::new(x, y, 10.0)), f64::INFINITY);
            assert!(hit.is_some(), "ray at ({x}, {y}) missed");
        }
    }

    #[test]
    fn empty_mesh_gives_empty_bvh() {
        let bvh = Bvh::build(&IndexedMesh::new(), 1e-9);
        assert!(bvh.is_empty());
        assert!(bvh.bounds().is_none());
        assert!(bvh.cast(&Ray::down(Point3::origin()), f64::INFINITY).is_none());
    }
}
