//! Non-persistent geometric queries cutting triangle meshes with planes.
//!
//! * [`TriMesh::clip_plane`](crate::shape::TriMesh::clip_plane) keeps the part of a mesh
//!   lying on the positive side of a plane.
//! * [`TriMesh::slice_plane`](crate::shape::TriMesh::slice_plane) computes the contour
//!   lines of a mesh on a family of parallel planes.
//!
//! Both are configured by a [`ClipOptions`].

pub use self::clip::{clip_trimesh_buffers, ClipOptions, Tolerance};
pub use self::error::ClipError;

mod clip;
mod error;
mod slice;
