use crate::math::{Point, Real, Vector};
use crate::query::{ClipError, ClipOptions};
use crate::shape::{find_invalid_index, Plane, PlaneSide, TriMesh, Triangle};
use crate::utils::{hashmap::HashMap, SortedPair};
use arrayvec::ArrayVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A vertex of the polygon obtained by clipping one triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
enum ClipVertex {
    /// An original vertex, lying on the kept side of the plane.
    Kept(u32),
    /// The intersection between the plane and the edge joining two original vertices
    /// lying strictly on opposite sides of the plane.
    Crossing(SortedPair<u32>),
}

/// The fate of one triangle of the input mesh.
#[derive(Clone, Debug, PartialEq)]
enum ClippedTriangle {
    /// The triangle lies on the kept side and is copied as-is.
    Kept,
    /// Nothing remains of the triangle.
    Discarded,
    /// The triangle straddles the plane: these triangles replace it.
    Split(ArrayVec<[ClipVertex; 3], 2>),
}

/// The signed distances of the vertices of a mesh to a plane, and their classification.
struct Classification<'a> {
    vertices: &'a [Point<Real>],
    dists: Vec<Real>,
    sides: Vec<PlaneSide>,
}

impl<'a> Classification<'a> {
    fn new(vertices: &'a [Point<Real>], plane: &Plane, epsilon: Real) -> Self {
        let dists: Vec<_> = vertices.iter().map(|pt| plane.signed_distance(pt)).collect();
        let sides = dists
            .iter()
            .map(|d| PlaneSide::from_signed_distance(*d, epsilon))
            .collect();
        Self {
            vertices,
            dists,
            sides,
        }
    }

    /// The point where the plane crosses `edge`.
    ///
    /// The interpolation always starts from the smallest vertex index so that both
    /// triangles adjacent to the edge compute the exact same point.
    fn crossing_point(&self, edge: SortedPair<u32>) -> Point<Real> {
        let [ia, ib] = edge.into_array().map(|i| i as usize);
        let (da, db) = (self.dists[ia], self.dists[ib]);
        let (a, b) = (self.vertices[ia], self.vertices[ib]);
        let t = da / (da - db);
        a + (b - a) * t
    }

    fn position(&self, vertex: ClipVertex) -> Point<Real> {
        match vertex {
            ClipVertex::Kept(i) => self.vertices[i as usize],
            ClipVertex::Crossing(edge) => self.crossing_point(edge),
        }
    }

    /// Clips one triangle, without allocating.
    fn clip_triangle(&self, idx: [u32; 3]) -> ClippedTriangle {
        let sides = idx.map(|i| self.sides[i as usize]);

        if sides.iter().all(|s| s.is_kept()) {
            return ClippedTriangle::Kept;
        }

        // The walk around the triangle starts at the first kept vertex, and the
        // resulting polygon is fanned from it.
        let Some(first_kept) = sides.iter().position(|s| s.is_kept()) else {
            return ClippedTriangle::Discarded;
        };

        // At most two vertices are kept and at most two edges are crossed.
        let mut polygon = ArrayVec::<ClipVertex, 4>::new();

        for k in 0..3 {
            let ia = (first_kept + k) % 3;
            let ib = (ia + 1) % 3;

            if sides[ia].is_kept() {
                polygon.push(ClipVertex::Kept(idx[ia]));
            }

            // NOTE: an on-plane vertex never yields a crossing: it is reused as-is.
            if sides[ia].is_opposite(sides[ib]) {
                polygon.push(ClipVertex::Crossing(SortedPair::new(idx[ia], idx[ib])));
            }
        }

        let mut triangles = ArrayVec::new();

        if polygon.len() >= 3 {
            let origin = self.position(polygon[0]);

            for i in 1..polygon.len() - 1 {
                let tri = Triangle::new(
                    origin,
                    self.position(polygon[i]),
                    self.position(polygon[i + 1]),
                );

                if !tri.is_degenerate() {
                    triangles.push([polygon[0], polygon[i], polygon[i + 1]]);
                }
            }
        }

        if triangles.is_empty() {
            ClippedTriangle::Discarded
        } else {
            ClippedTriangle::Split(triangles)
        }
    }
}

/// Clips every triangle of `indices`, in order.
#[cfg(feature = "parallel")]
fn clip_triangles(classification: &Classification, indices: &[[u32; 3]]) -> Vec<ClippedTriangle> {
    indices
        .par_iter()
        .map(|idx| classification.clip_triangle(*idx))
        .collect()
}

/// Clips every triangle of `indices`, in order.
#[cfg(not(feature = "parallel"))]
fn clip_triangles(classification: &Classification, indices: &[[u32; 3]]) -> Vec<ClippedTriangle> {
    indices
        .iter()
        .map(|idx| classification.clip_triangle(*idx))
        .collect()
}

/// Clips the mesh described by `vertices` and `indices`, assuming its indices are valid.
fn clip_buffers(
    vertices: &[Point<Real>],
    indices: &[[u32; 3]],
    plane: &Plane,
    epsilon: Real,
) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    // 1. Classify the vertices.
    let classification = Classification::new(vertices, plane, epsilon);

    // Exit early if `vertices` isn’t crossed by the plane.
    if classification.sides.iter().all(|s| s.is_kept()) {
        log::debug!(
            "clip: {} triangles all kept (epsilon = {epsilon})",
            indices.len()
        );
        return (vertices.to_vec(), indices.to_vec());
    }

    if !classification.sides.iter().any(|s| s.is_kept()) {
        log::debug!(
            "clip: {} triangles all discarded (epsilon = {epsilon})",
            indices.len()
        );
        return (vec![], vec![]);
    }

    // 2. Clip the triangles independently.
    let clipped = clip_triangles(&classification, indices);

    // 3. Assemble the result, in the input triangle order.
    let mut new_vertices = vec![];
    let mut remap = vec![u32::MAX; vertices.len()];

    for (i, side) in classification.sides.iter().enumerate() {
        if side.is_kept() {
            remap[i] = new_vertices.len() as u32;
            new_vertices.push(vertices[i]);
        }
    }

    let num_kept_vertices = new_vertices.len();
    let mut crossings_found = HashMap::default();
    let mut new_indices = Vec::with_capacity(indices.len());
    let (mut num_kept, mut num_split) = (0, 0);

    for (idx, clipped) in indices.iter().zip(clipped) {
        match clipped {
            ClippedTriangle::Kept => {
                num_kept += 1;
                new_indices.push(idx.map(|i| remap[i as usize]));
            }
            ClippedTriangle::Discarded => {}
            ClippedTriangle::Split(triangles) => {
                num_split += 1;

                for tri in triangles {
                    new_indices.push(tri.map(|vertex| match vertex {
                        ClipVertex::Kept(i) => remap[i as usize],
                        ClipVertex::Crossing(edge) => {
                            *crossings_found.entry(edge).or_insert_with(|| {
                                new_vertices.push(classification.crossing_point(edge));
                                new_vertices.len() as u32 - 1
                            })
                        }
                    }));
                }
            }
        }
    }

    log::debug!(
        "clip: {} triangles, {num_kept} kept, {num_split} split, {} discarded; {} vertices created (epsilon = {epsilon})",
        indices.len(),
        indices.len() - num_kept - num_split,
        new_vertices.len() - num_kept_vertices,
    );

    (new_vertices, new_indices)
}

/// Clips a triangle mesh given as raw buffers with the plane with the given `point` and `normal`.
///
/// This is the same as [`TriMesh::clip_plane_with_options`], for buffers that were not
/// validated by a [`TriMesh`] yet. Fails with [`ClipError::InvalidIndex`] if a triangle
/// references a vertex that does not exist, and with [`ClipError::DegeneratePlane`] if the
/// `normal` is zero.
pub fn clip_trimesh_buffers(
    vertices: &[Point<Real>],
    indices: &[[u32; 3]],
    point: &Point<Real>,
    normal: &Vector<Real>,
    options: &ClipOptions,
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ClipError> {
    let plane = Plane::new(*point, *normal)?;

    if let Some((triangle, index)) = find_invalid_index(vertices.len(), indices) {
        return Err(ClipError::InvalidIndex {
            triangle,
            index,
            num_vertices: vertices.len(),
        });
    }

    Ok(clip_buffers(
        vertices,
        indices,
        &plane,
        options.epsilon(vertices),
    ))
}

impl TriMesh {
    /// Clips this mesh with the plane passing through `point` with the given `normal`.
    ///
    /// Only the geometry on the side the normal points toward is kept, using the
    /// default [`ClipOptions`]. See [`TriMesh::clip_with_plane`] for details.
    ///
    /// Fails with [`ClipError::DegeneratePlane`] if `normal` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "f32")] {
    /// use planeclip3d::math::{Point, Vector};
    /// use planeclip3d::shape::TriMesh;
    ///
    /// let mesh = TriMesh::new(
    ///     vec![Point::origin(), Point::new(2.0, 0.0, 0.0), Point::new(0.0, 2.0, 0.0)],
    ///     vec![[0, 1, 2]],
    /// )
    /// .unwrap();
    /// let clipped = mesh
    ///     .clip_plane(&Point::new(1.0, 0.0, 0.0), &Vector::new(-1.0, 0.0, 0.0))
    ///     .unwrap();
    ///
    /// // The triangle becomes a quad: two triangles with two new vertices.
    /// assert_eq!(clipped.num_triangles(), 2);
    /// assert_eq!(clipped.num_vertices(), 4);
    /// # }
    /// ```
    pub fn clip_plane(&self, point: &Point<Real>, normal: &Vector<Real>) -> Result<TriMesh, ClipError> {
        self.clip_plane_with_options(point, normal, &ClipOptions::default())
    }

    /// Clips this mesh with the plane passing through `point` with the given `normal`,
    /// with custom options.
    ///
    /// Fails with [`ClipError::DegeneratePlane`] if `normal` is zero.
    pub fn clip_plane_with_options(
        &self,
        point: &Point<Real>,
        normal: &Vector<Real>,
        options: &ClipOptions,
    ) -> Result<TriMesh, ClipError> {
        let plane = Plane::new(*point, *normal)?;
        Ok(self.clip_with_plane(&plane, options))
    }

    /// Clips this mesh with a plane, keeping the geometry with a non-negative signed distance.
    ///
    /// - Triangles with all their vertices on the kept side are copied unchanged.
    /// - Triangles with all their vertices strictly on the other side are dropped.
    /// - Triangles straddling the plane are cut: a vertex is created at each crossed
    ///   edge and the remaining triangle or quad is fanned from its first kept vertex,
    ///   with the same winding as the original triangle.
    ///
    /// Vertices closer to the plane than the tolerance of `options` are considered
    /// to lie on the plane and are kept as-is. The resulting mesh starts with the
    /// kept original vertices, in their original order, followed by the created
    /// vertices, in the order of the triangles that created them. Created vertices
    /// are shared by the triangles adjacent to the same cut edge.
    ///
    /// The hole left by the cut is not filled.
    pub fn clip_with_plane(&self, plane: &Plane, options: &ClipOptions) -> TriMesh {
        let epsilon = options.epsilon(self.vertices());
        let (vertices, indices) = clip_buffers(self.vertices(), self.indices(), plane, epsilon);
        TriMesh::from_raw_parts(vertices, indices)
    }
}
