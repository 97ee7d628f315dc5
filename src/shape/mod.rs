//! Shapes supported by planeclip.

pub use self::line_set::{LineSet, LineSetBuilderError};
pub use self::plane::{Plane, PlaneSide};
pub use self::triangle::Triangle;
pub use self::trimesh::{TriMesh, TriMeshBuilderError};
pub(crate) use self::trimesh::find_invalid_index;

mod line_set;
mod plane;
mod triangle;
mod trimesh;
