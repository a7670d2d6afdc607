use crate::math::Real;
use crate::segmentation::DegenerateTriangles;
use crate::shape::TriangleMeshError;

/// Error preventing a segmentation from completing.
///
/// These are fatal to the call that returned them. An empty input mesh is not an
/// error: it results in an empty list of segments.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum SegmentationError {
    /// The normal tolerance is negative or `NaN`.
    #[error("the normal tolerance must be a non-negative angle, found {0}.")]
    InvalidTolerance(Real),
    /// A count exceeds the range of the `u32` indices used by the meshes and partitions.
    #[error("too many {what} ({count}) to be indexed with 32-bit integers.")]
    IndexOverflow {
        /// What is being counted.
        what: &'static str,
        /// The count that could not be represented.
        count: usize,
    },
    /// The partition and the triangle buffer have different lengths.
    #[error("the partition has {partition} entries but there are {triangles} triangles.")]
    PartitionLengthMismatch {
        /// The number of partition entries.
        partition: usize,
        /// The number of triangles.
        triangles: usize,
    },
    /// A partition entry is not a resolved root.
    ///
    /// Either `root` is out of bounds, or the entry of `root` is not `root` itself.
    #[error("the triangle {triangle} belongs to {root}, which is not the root of a set.")]
    InvalidRoot {
        /// The triangle with the invalid partition entry.
        triangle: u32,
        /// The invalid partition entry.
        root: u32,
    },
    /// A reconstructed segment references a vertex outside of its own vertex buffer.
    #[error("the reconstructed segment {segment} is inconsistent: {source}")]
    InconsistentSegment {
        /// The index of the segment in the output list.
        segment: u32,
        /// The index buffer inconsistency.
        source: TriangleMeshError,
    },
}

/// A non-fatal anomaly detected during segmentation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentationDiagnostic {
    /// A triangle has no defined normal (coincident or collinear vertices).
    ///
    /// It was never merged with another triangle, and was either output as its
    /// own segment or left out of the output, depending on `handling`.
    DegenerateTriangle {
        /// The index of the triangle in the input mesh.
        triangle: u32,
        /// What was done with it.
        handling: DegenerateTriangles,
    },
}

pub(crate) fn index_overflow(what: &'static str, count: usize) -> SegmentationError {
    SegmentationError::IndexOverflow { what, count }
}

/// Converts a length to `u32`, failing with [`SegmentationError::IndexOverflow`].
pub(crate) fn checked_len(what: &'static str, len: usize) -> Result<u32, SegmentationError> {
    u32::try_from(len).map_err(|_| index_overflow(what, len))
}
