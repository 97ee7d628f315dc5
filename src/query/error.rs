/// Errors raised when cutting a mesh with a plane.
///
/// Every error is raised before any output is produced: a query either
/// processes the whole mesh or returns one of these.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipError {
    /// The plane normal has a zero length, or the plane has non-finite components.
    #[error("the plane normal must have a non-zero, finite length.")]
    DegeneratePlane,
    /// A triangle references a vertex that does not exist.
    ///
    /// This indicates a malformed input mesh. It can only be raised by the
    /// entry points taking raw buffers, since [`TriMesh`](crate::shape::TriMesh)
    /// checks its indices at construction.
    #[error("the triangle {triangle} references the vertex {index}, but there are only {num_vertices} vertices.")]
    InvalidIndex {
        /// The index of the faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices.
        num_vertices: usize,
    },
}
