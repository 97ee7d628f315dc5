use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::Triangle;
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::HashablePartialEq;
use core::fmt;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index}, but the mesh only has {num_vertices} vertices.")]
    InvalidIndex {
        /// The index of the faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: usize,
    },
    /// A flat buffer does not have a length multiple of 3.
    #[error("the flat {buffer} buffer has a length of {len}, which is not a multiple of 3.")]
    BadBufferLength {
        /// The buffer with the bad length, either `"vertex"` or `"index"`.
        buffer: &'static str,
        /// The length of that buffer.
        len: usize,
    },
    /// The vertex buffer cannot be addressed with `u32` indices.
    #[error("a triangle mesh can have at most 2^32 vertices, found {0}.")]
    TooManyVertices(usize),
}

/// Checks that every index of `indices` is smaller than `num_vertices`.
///
/// Returns the first faulty `(triangle, index)` pair otherwise.
pub(crate) fn find_invalid_index(num_vertices: usize, indices: &[[u32; 3]]) -> Option<(u32, u32)> {
    indices.iter().enumerate().find_map(|(tri_id, idx)| {
        idx.iter()
            .find(|vid| **vid as usize >= num_vertices)
            .map(|vid| (tri_id as u32, *vid))
    })
}

/// Checks that `num_vertices` vertices can be addressed with `u32` indices.
fn check_num_vertices(num_vertices: usize) -> Result<(), TriMeshBuilderError> {
    if num_vertices > u32::MAX as usize {
        Err(TriMeshBuilderError::TooManyVertices(num_vertices))
    } else {
        Ok(())
    }
}

/// A triangle mesh.
///
/// The mesh is a vertex buffer and an index buffer. Every index is checked
/// at construction, so any `TriMesh` can be traversed without bounds errors.
/// A mesh without any triangle is valid.
#[cfg_attr(
    feature = "serde-serialize",
    derive(Serialize, Deserialize),
    serde(try_from = "RawTriMesh")
)]
#[derive(Clone, Default, PartialEq)]
pub struct TriMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawTriMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<RawTriMesh> for TriMesh {
    type Error = TriMeshBuilderError;

    fn try_from(raw: RawTriMesh) -> Result<Self, Self::Error> {
        TriMesh::new(raw.vertices, raw.indices)
    }
}

impl fmt::Debug for TriMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TriMesh {{ {} vertices, {} triangles }}",
            self.vertices.len(),
            self.indices.len()
        )
    }
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        check_num_vertices(vertices.len())?;

        if let Some((triangle, index)) = find_invalid_index(vertices.len(), &indices) {
            return Err(TriMeshBuilderError::InvalidIndex {
                triangle,
                index,
                num_vertices: vertices.len(),
            });
        }

        Ok(Self { vertices, indices })
    }

    /// Creates a triangle mesh without checking its indices.
    pub(crate) fn from_raw_parts(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Self {
        debug_assert!(find_invalid_index(vertices.len(), &indices).is_none());
        Self { vertices, indices }
    }

    /// Creates a triangle mesh from flat, row-major, buffers.
    ///
    /// The `vertices` buffer contains `3 * n` coordinates (`x0, y0, z0, x1, ...`)
    /// and `indices` contains `3 * m` vertex indices, i.e., the `n × 3` and `m × 3`
    /// arrays used by array-based mesh APIs.
    pub fn from_flat_buffers(vertices: &[Real], indices: &[u32]) -> Result<Self, TriMeshBuilderError> {
        if vertices.len() % 3 != 0 {
            return Err(TriMeshBuilderError::BadBufferLength {
                buffer: "vertex",
                len: vertices.len(),
            });
        }

        if indices.len() % 3 != 0 {
            return Err(TriMeshBuilderError::BadBufferLength {
                buffer: "index",
                len: indices.len(),
            });
        }

        let vertices = vertices
            .chunks_exact(3)
            .map(|c| Point::new(c[0], c[1], c[2]))
            .collect();
        let indices = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(vertices, indices)
    }

    /// Converts this mesh into flat, row-major, vertex and index buffers.
    ///
    /// This is the inverse of [`TriMesh::from_flat_buffers`].
    pub fn to_flat_buffers(&self) -> (Vec<Real>, Vec<u32>) {
        let vertices = self
            .vertices
            .iter()
            .flat_map(|pt| [pt.x, pt.y, pt.z])
            .collect();
        let indices = self.indices.iter().flatten().copied().collect();
        (vertices, indices)
    }

    /// Splits this mesh into its vertex buffer and index buffer.
    pub fn into_buffers(self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        (self.vertices, self.indices)
    }

    /// Transforms in-place the vertices of this triangle mesh.
    pub fn transform_vertices(&mut self, transform: &Isometry<Real>) {
        self.vertices
            .iter_mut()
            .for_each(|pt| *pt = transform * *pt);
    }

    /// Translates in-place the vertices of this triangle mesh.
    pub fn translate(&mut self, translation: &Vector<Real>) {
        self.vertices.iter_mut().for_each(|pt| *pt += translation);
    }

    /// Returns a scaled version of this triangle mesh.
    ///
    /// An odd number of negative scale components flips the orientation of every
    /// triangle. The index buffer is left untouched either way.
    pub fn scaled(mut self, scale: &Vector<Real>) -> Self {
        self.vertices
            .iter_mut()
            .for_each(|pt| pt.coords.component_mul_assign(scale));
        self
    }

    /// Appends a second triangle mesh to this triangle mesh.
    ///
    /// Fails, leaving `self` unchanged, if the result has too many vertices
    /// to be addressed with `u32` indices.
    pub fn append(&mut self, rhs: &TriMesh) -> Result<(), TriMeshBuilderError> {
        check_num_vertices(self.vertices.len() + rhs.vertices.len())?;

        let base_id = self.vertices.len() as u32;
        self.vertices.extend_from_slice(rhs.vertices());
        self.indices.extend(
            rhs.indices()
                .iter()
                .map(|idx| [idx[0] + base_id, idx[1] + base_id, idx[2] + base_id]),
        );
        Ok(())
    }

    /// Merges the vertices with exactly identical coordinates.
    ///
    /// Two vertices with the exact same coordinates end up sharing the same entry
    /// on the vertex buffer, in order of first appearance in the index buffer, and
    /// the index buffer is adjusted accordingly. Triangles sharing two identical
    /// vertex indices after the merge are removed. Vertices not referenced by any
    /// triangle of the original index buffer are removed too.
    pub fn merge_duplicate_vertices(&mut self) {
        let mut vtx_to_id = HashMap::default();
        let mut new_vertices = Vec::with_capacity(self.vertices.len());
        let mut new_indices = Vec::with_capacity(self.indices.len());

        fn resolve_coord_id(
            coord: &Point<Real>,
            vtx_to_id: &mut HashMap<HashablePartialEq<Point<Real>>, u32>,
            new_vertices: &mut Vec<Point<Real>>,
        ) -> u32 {
            let key = HashablePartialEq::new(*coord);
            let id = match vtx_to_id.entry(key) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(new_vertices.len() as u32),
            };

            if *id == new_vertices.len() as u32 {
                new_vertices.push(*coord);
            }

            *id
        }

        for t in self.indices.iter() {
            let [va, vb, vc] = t.map(|vid| {
                resolve_coord_id(
                    &self.vertices[vid as usize],
                    &mut vtx_to_id,
                    &mut new_vertices,
                )
            });

            if va != vb && va != vc && vb != vc {
                new_indices.push([va, vb, vc]);
            }
        }

        new_vertices.shrink_to_fit();

        let removed = self.vertices.len() - new_vertices.len();
        log::trace!("merged or removed {removed} vertices");

        self.vertices = new_vertices;
        self.indices = new_indices;
    }

    /// Removes every vertex not referenced by any triangle.
    ///
    /// The relative order of the remaining vertices is preserved.
    pub fn remove_unused_vertices(&mut self) {
        let mut remap = vec![u32::MAX; self.vertices.len()];

        for idx in self.indices.iter() {
            for vid in idx {
                remap[*vid as usize] = 0;
            }
        }

        let mut num_used = 0;
        for (i, new_id) in remap.iter_mut().enumerate() {
            if *new_id != u32::MAX {
                *new_id = num_used;
                self.vertices[num_used as usize] = self.vertices[i];
                num_used += 1;
            }
        }

        self.vertices.truncate(num_used as usize);
        self.indices
            .iter_mut()
            .for_each(|idx| *idx = idx.map(|vid| remap[vid as usize]));
    }

    /// Computes the local-space [`Aabb`] of this triangle mesh.
    ///
    /// Every vertex is taken into account, referenced by a triangle or not.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// The number of vertices of this mesh.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles forming this mesh.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Does this mesh have no triangle?
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Get the `i`-th triangle of this mesh.
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |ids| {
            Triangle::new(
                self.vertices[ids[0] as usize],
                self.vertices[ids[1] as usize],
                self.vertices[ids[2] as usize],
            )
        })
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Isometry, Point, Real, Vector};
    use super::check_num_vertices;
    use crate::shape::{TriMesh, TriMeshBuilderError};

    fn quad() -> TriMesh {
        TriMesh::new(
            vec![
                Point::origin(),
                Point::new(1.0, 0.0, 0.0),
                Point::new(1.0, 1.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn trimesh_empty_is_valid() {
        let mesh = TriMesh::new(vec![], vec![]).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.num_vertices(), 0);
        assert!(!mesh.local_aabb().is_valid());
    }

    #[test]
    fn trimesh_error_invalid_index() {
        let err = TriMesh::new(vec![Point::origin(); 3], vec![[0, 1, 2], [2, 1, 3]]).unwrap_err();
        assert_eq!(
            err,
            TriMeshBuilderError::InvalidIndex {
                triangle: 1,
                index: 3,
                num_vertices: 3
            }
        );
    }

    #[test]
    fn flat_buffers() {
        let mesh = quad();
        let (vtx, idx) = mesh.to_flat_buffers();
        assert_eq!(vtx.len(), 12);
        assert_eq!(idx, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(TriMesh::from_flat_buffers(&vtx, &idx).unwrap(), mesh);

        assert_eq!(
            TriMesh::from_flat_buffers(&vtx[..11], &idx),
            Err(TriMeshBuilderError::BadBufferLength {
                buffer: "vertex",
                len: 11
            })
        );
        assert_eq!(
            TriMesh::from_flat_buffers(&vtx, &idx[..5]),
            Err(TriMeshBuilderError::BadBufferLength {
                buffer: "index",
                len: 5
            })
        );
    }

    #[test]
    fn merge_duplicate_vertices() {
        // The same quad, with each triangle owning its vertices, and one degenerate triangle.
        let mut mesh = TriMesh::new(
            vec![
                Point::origin(),
                Point::new(1.0, 0.0, 0.0),
                Point::new(1.0, 1.0, 0.0),
                Point::origin(),
                Point::new(1.0, 1.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
                Point::new(-0.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 4, 5], [0, 6, 1]],
        )
        .unwrap();

        mesh.merge_duplicate_vertices();
        assert_eq!(mesh, quad());
    }

    #[test]
    fn remove_unused_vertices_preserves_order() {
        let mut mesh = TriMesh::new(
            vec![
                Point::new(9.0, 9.0, 9.0),
                Point::origin(),
                Point::new(1.0, 0.0, 0.0),
                Point::new(8.0, 8.0, 8.0),
                Point::new(1.0, 1.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
            ],
            vec![[1, 2, 4], [1, 4, 5]],
        )
        .unwrap();

        mesh.remove_unused_vertices();
        assert_eq!(mesh, quad());
    }

    #[test]
    fn transforms() {
        let mut mesh = quad();
        mesh.translate(&Vector::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices()[0], Point::new(1.0, 2.0, 3.0));

        let mesh = mesh.scaled(&Vector::repeat(2.0));
        assert_eq!(mesh.vertices()[2], Point::new(4.0, 6.0, 6.0));

        let mut mesh = quad();
        let rot = Isometry::rotation(Vector::z() * core::f64::consts::FRAC_PI_2 as Real);
        mesh.transform_vertices(&rot);
        assert_relative_eq!(mesh.vertices()[1], Point::new(0.0, 1.0, 0.0), epsilon = 1.0e-6);
        assert_relative_eq!(mesh.triangle(0).area(), 0.5, epsilon = 1.0e-6);
    }

    #[test]
    fn append() {
        let mut mesh = quad();
        mesh.append(&quad()).unwrap();
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.indices()[3], [4, 6, 7]);
        assert_eq!(mesh.triangles().len(), 4);
    }

    #[test]
    fn vertex_count_fits_u32_indices() {
        assert_eq!(check_num_vertices(u32::MAX as usize), Ok(()));

        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            check_num_vertices(u32::MAX as usize + 1),
            Err(TriMeshBuilderError::TooManyVertices(u32::MAX as usize + 1))
        );
    }
}
