//! Mesh data consumed and produced by the segmenters.

pub use self::material::Material;
pub use self::triangle::Triangle;
pub use self::trimesh::{TriangleMesh, TriangleMeshError};

mod material;
mod triangle;
mod trimesh;
