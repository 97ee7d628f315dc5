use crate::math::{Point, Real, Vector};
use crate::query::{ClipError, ClipOptions};
use crate::shape::{LineSet, Plane, PlaneSide, TriMesh};
use crate::utils::{
    hashmap::{Entry, HashMap},
    SortedPair,
};
use arrayvec::ArrayVec;

/// A point of a contour line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum ContourPoint {
    /// A mesh vertex lying on the slicing plane.
    Vertex(u32),
    /// The intersection of the slicing plane with a mesh edge.
    Edge(SortedPair<u32>),
}

/// Incrementally builds the contours of a mesh on several parallel planes.
struct ContourBuilder<'a> {
    vertices: &'a [Point<Real>],
    indices: &'a [[u32; 3]],
    points: Vec<Point<Real>>,
    lines: Vec<[u32; 2]>,
}

impl ContourBuilder<'_> {
    /// Appends the contour where the mesh crosses the level set `dists == level`.
    fn push_contour(&mut self, dists: &[Real], level: Real, epsilon: Real) {
        let shifted = |i: u32| dists[i as usize] - level;
        let sides: Vec<_> = dists
            .iter()
            .map(|d| PlaneSide::from_signed_distance(*d - level, epsilon))
            .collect();

        let mut point_ids = HashMap::default();
        let mut segments_found = HashMap::default();
        let first_line = self.lines.len();

        for idx in self.indices {
            let tri_sides = idx.map(|i| sides[i as usize]);

            // A triangle lying on the plane has no well-defined contour.
            if tri_sides.iter().all(|s| *s == PlaneSide::OnPlane) {
                continue;
            }

            let mut crossing = ArrayVec::<ContourPoint, 3>::new();

            for ia in 0..3 {
                let ib = (ia + 1) % 3;
                let candidate = if tri_sides[ia] == PlaneSide::OnPlane {
                    Some(ContourPoint::Vertex(idx[ia]))
                } else if tri_sides[ia].is_opposite(tri_sides[ib]) {
                    Some(ContourPoint::Edge(SortedPair::new(idx[ia], idx[ib])))
                } else {
                    None
                };

                if let Some(candidate) = candidate {
                    if !crossing.contains(&candidate) {
                        crossing.push(candidate);
                    }
                }
            }

            // A triangle only touching the plane at one vertex has no contour either.
            if crossing.len() != 2 {
                continue;
            }

            let [a, b] = [crossing[0], crossing[1]].map(|pt| {
                let new_id = self.points.len() as u32;
                match point_ids.entry(pt) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let position = match pt {
                            ContourPoint::Vertex(i) => self.vertices[i as usize],
                            ContourPoint::Edge(edge) => {
                                let [ia, ib] = edge.into_array();
                                let (da, db) = (shifted(ia), shifted(ib));
                                let (pa, pb) =
                                    (self.vertices[ia as usize], self.vertices[ib as usize]);
                                pa + (pb - pa) * (da / (da - db))
                            }
                        };
                        self.points.push(position);
                        *entry.insert(new_id)
                    }
                }
            });

            // An edge lying on the plane is seen by both its adjacent triangles.
            if a != b && segments_found.insert(SortedPair::new(a, b), ()).is_none() {
                self.lines.push([a, b]);
            }
        }

        log::trace!(
            "slice: {} segments at level {level}",
            self.lines.len() - first_line
        );
    }
}

impl TriMesh {
    /// Computes the contour lines of this mesh on planes parallel to the plane passing
    /// through `point` with the given `normal`, using the default [`ClipOptions`].
    ///
    /// See [`TriMesh::slice_with_plane`] for details. Fails with
    /// [`ClipError::DegeneratePlane`] if `normal` is zero.
    pub fn slice_plane(
        &self,
        point: &Point<Real>,
        normal: &Vector<Real>,
        offsets: &[Real],
    ) -> Result<LineSet, ClipError> {
        self.slice_plane_with_options(point, normal, offsets, &ClipOptions::default())
    }

    /// Computes the contour lines of this mesh on planes parallel to the plane passing
    /// through `point` with the given `normal`, with custom options.
    pub fn slice_plane_with_options(
        &self,
        point: &Point<Real>,
        normal: &Vector<Real>,
        offsets: &[Real],
        options: &ClipOptions,
    ) -> Result<LineSet, ClipError> {
        let plane = Plane::new(*point, *normal)?;
        Ok(self.slice_with_plane(&plane, offsets, options))
    }

    /// Computes the contour lines of this mesh on the planes `plane.offset(offset)`
    /// for each `offset` of `offsets`.
    ///
    /// Every triangle crossing one of these planes contributes one segment joining the
    /// two points where its boundary crosses the plane. Those points are either created
    /// on the crossed edges, or are mesh vertices lying on the plane (within the tolerance
    /// of `options`). Points are shared between adjacent triangles of the same contour,
    /// so the contour of a closed mesh is made of closed loops.
    ///
    /// Triangles lying on a plane are ignored, and an edge lying on a plane is only
    /// reported once. The contours are appended to the result in the order of `offsets`.
    pub fn slice_with_plane(&self, plane: &Plane, offsets: &[Real], options: &ClipOptions) -> LineSet {
        let epsilon = options.epsilon(self.vertices());
        let dists: Vec<_> = self
            .vertices()
            .iter()
            .map(|pt| plane.signed_distance(pt))
            .collect();
        let mut builder = ContourBuilder {
            vertices: self.vertices(),
            indices: self.indices(),
            points: vec![],
            lines: vec![],
        };

        for offset in offsets {
            builder.push_contour(&dists, *offset, epsilon);
        }

        log::debug!(
            "slice: {} triangles, {} contours, {} segments (epsilon = {epsilon})",
            self.num_triangles(),
            offsets.len(),
            builder.lines.len()
        );

        LineSet::from_raw_parts(builder.points, builder.lines)
    }
}
