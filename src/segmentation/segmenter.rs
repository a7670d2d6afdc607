use crate::segmentation::{SegmentationDiagnostic, SegmentationError};
use crate::shape::TriangleMesh;

/// The segments computed by a [`Segmenter`], with the anomalies met along the way.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Segmentation {
    /// One mesh per segment.
    pub meshes: Vec<TriangleMesh>,
    /// Non-fatal anomalies, e.g., degenerate input triangles.
    pub diagnostics: Vec<SegmentationDiagnostic>,
}

impl Segmentation {
    /// Did the segmentation complete without any diagnostic?
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Did the segmentation complete with some diagnostics?
    pub fn is_partial(&self) -> bool {
        !self.is_complete()
    }

    /// The number of segments.
    pub fn num_segments(&self) -> usize {
        self.meshes.len()
    }

    /// Discards the diagnostics and returns the segment meshes.
    pub fn into_meshes(self) -> Vec<TriangleMesh> {
        self.meshes
    }
}

/// An algorithm splitting a mesh into segments.
///
/// Callers should program against this trait (e.g., through a `Box<dyn Segmenter>`)
/// rather than a concrete segmenter, so that segmentation strategies can be swapped.
pub trait Segmenter {
    /// Splits the mesh given at construction into segments.
    ///
    /// Ownership of the returned meshes (and of their materials) is transferred to
    /// the caller. An empty input mesh results in an empty segmentation.
    fn do_segmentation(&self) -> Result<Segmentation, SegmentationError>;
}
