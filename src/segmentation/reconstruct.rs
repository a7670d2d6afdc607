//! Conversion of triangle lists and partitions into deduplicated triangle meshes.

use crate::segmentation::error::{checked_len, index_overflow};
use crate::segmentation::SegmentationError;
use crate::shape::{Material, Triangle, TriangleMesh};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::VertexKey;

/// Builds a single triangle mesh from a list of triangles.
///
/// Vertices are deduplicated by exact position equality: every distinct position is
/// output once, in the order it is first encountered, and the index buffer holds one
/// 1-based triple per input triangle. The persistent vertex identifiers are ignored.
/// The mesh receives a fresh default material.
pub fn triangle_list_to_obj(list: &[Triangle]) -> Result<TriangleMesh, SegmentationError> {
    let mut result = TriangleMesh::empty(Material::default());
    let mut vertex_map = HashMap::default();
    result.reserve_triangles(list.len());

    for tri in list {
        let mut idx = [0; 3];

        for (k, pt) in tri.vertex.iter().enumerate() {
            idx[k] = match vertex_map.entry(VertexKey::new(*pt)) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let id = result
                        .push_vertex(*pt)
                        .ok_or_else(|| index_overflow("vertices", result.vertices().len()))?;
                    *entry.insert(id)
                }
            };
        }

        result.push_triangle(idx);
    }

    Ok(result)
}

/// Builds one triangle mesh per set of a partition of `triangles`.
///
/// `segment_union[i]` must be the root of the set containing the `i`-th triangle,
/// where a root is a triangle index `r` with `segment_union[r] == r`. The output
/// meshes are ordered by the first appearance of their root while iterating through
/// the triangles, and each triangle keeps its relative order inside its mesh.
///
/// Vertices are deduplicated by persistent vertex identifier, independently for each
/// segment: a vertex shared by several segments (typically along their common
/// boundary) appears in the vertex buffer of each of them. Indices are 1-based and
/// local to their mesh, and every mesh receives its own fresh default material.
pub fn segment_union_to_obj(
    segment_union: &[u32],
    triangles: &[Triangle],
) -> Result<Vec<TriangleMesh>, SegmentationError> {
    if segment_union.len() != triangles.len() {
        return Err(SegmentationError::PartitionLengthMismatch {
            partition: segment_union.len(),
            triangles: triangles.len(),
        });
    }

    let _ = checked_len("triangles", triangles.len())?;

    let mut result: Vec<TriangleMesh> = vec![];
    let mut vertex_to_id: Vec<HashMap<u32, u32>> = vec![];
    let mut group_id = vec![u32::MAX; segment_union.len()];

    for (i, (root, tri)) in segment_union.iter().zip(triangles.iter()).enumerate() {
        if segment_union.get(*root as usize) != Some(root) {
            return Err(SegmentationError::InvalidRoot {
                triangle: i as u32,
                root: *root,
            });
        }

        let g_id = &mut group_id[*root as usize];

        if *g_id == u32::MAX {
            *g_id = result.len() as u32;
            result.push(TriangleMesh::empty(Material::default()));
            vertex_to_id.push(HashMap::default());
        }

        let mesh = &mut result[*g_id as usize];
        let local_ids = &mut vertex_to_id[*g_id as usize];
        let mut idx = [0; 3];

        for k in 0..3 {
            idx[k] = match local_ids.entry(tri.id[k]) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let id = mesh
                        .push_vertex(tri.vertex[k])
                        .ok_or_else(|| index_overflow("vertices", mesh.vertices().len()))?;
                    *entry.insert(id)
                }
            };
        }

        mesh.push_triangle(idx);
    }

    for (segment, mesh) in result.iter().enumerate() {
        mesh.validate_indices()
            .map_err(|source| SegmentationError::InconsistentSegment {
                segment: segment as u32,
                source,
            })?;
    }

    log::debug!(
        "Reconstructed {} segments from {} triangles.",
        result.len(),
        triangles.len()
    );

    Ok(result)
}
