//! Segmentation of triangle meshes into connected regions of similar orientation.
//!
//! A segment is a maximal set of triangles connected through shared edges, whose
//! normals all belong to the same [`NormalClassifier`] class. The
//! [`ParallelSegmenter`] computes such a partition with a union-find, and
//! [`segment_union_to_obj`] turns it into one independent [`TriangleMesh`](crate::shape::TriangleMesh)
//! per segment.

pub use self::adjacency::{is_connected, num_shared_vertices};
pub use self::error::{SegmentationDiagnostic, SegmentationError};
pub use self::normal_classifier::NormalClassifier;
pub use self::parallel_segmenter::{
    DegenerateTriangles, ParallelSegmenter, SegmentUnion, SegmentationParameters,
};
pub use self::reconstruct::{segment_union_to_obj, triangle_list_to_obj};
pub use self::segmenter::{Segmentation, Segmenter};
pub use self::union_find::{find_root, is_resolved, num_segments};

mod adjacency;
mod error;
mod normal_classifier;
mod parallel_segmenter;
mod reconstruct;
mod segmenter;
mod union_find;
