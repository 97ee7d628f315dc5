pub use self::clip_options::{ClipOptions, Tolerance};
pub use self::clip_trimesh::clip_trimesh_buffers;

mod clip_options;
mod clip_trimesh;
