use crate::meshes::{random_terrain, unit_cube};
use facet3d::segmentation::{
    num_segments, segment_union_to_obj, triangle_list_to_obj, ParallelSegmenter,
};
use facet3d::shape::{Material, Triangle};
use facet3d::utils::VertexKey;
use std::collections::HashSet;

#[test]
fn triangle_list_dedups_positions() {
    let mesh = random_terrain(7, 6, 3);
    let triangles: Vec<Triangle> = mesh.triangles().collect();
    let result = triangle_list_to_obj(&triangles).unwrap();

    let distinct: HashSet<VertexKey> = triangles
        .iter()
        .flat_map(|tri| tri.vertex.iter().copied().map(VertexKey::new))
        .collect();

    assert_eq!(result.vertices().len(), distinct.len());
    assert_eq!(result.num_triangles(), triangles.len());
    assert_eq!(result.material(), &Material::default());

    for (tri, idx) in triangles.iter().zip(result.indices()) {
        for k in 0..3 {
            assert!(idx[k] >= 1 && idx[k] as usize <= result.vertices().len());
            assert_eq!(result.vertices()[idx[k] as usize - 1], tri.vertex[k]);
        }
    }
}

#[test]
fn segments_cover_the_mesh() {
    let mesh = random_terrain(3, 8, 2);
    let triangles: Vec<Triangle> = mesh.triangles().collect();
    let union = ParallelSegmenter::new(&mesh, 0.0).segment_union().unwrap();
    let segments = segment_union_to_obj(&union.roots, &triangles).unwrap();

    assert_eq!(segments.len(), num_segments(&union.roots));
    assert_eq!(
        segments.iter().map(|s| s.num_triangles()).sum::<usize>(),
        triangles.len()
    );

    for segment in &segments {
        assert!(segment.validate_indices().is_ok());

        // Every vertex is referenced, and only once in the vertex buffer.
        let used: HashSet<u32> = segment.indices().iter().flatten().copied().collect();
        assert_eq!(used.len(), segment.vertices().len());
    }
}

#[test]
fn cube_faces_keep_their_corners() {
    let mesh = unit_cube();
    let triangles: Vec<Triangle> = mesh.triangles().collect();
    // Each face is its own segment, rooted at its first triangle.
    let roots: Vec<u32> = (0..12).map(|i| i / 2 * 2).collect();
    let segments = segment_union_to_obj(&roots, &triangles).unwrap();

    assert_eq!(segments.len(), 6);
    // Every corner is shared by three faces, and appears in each of them.
    assert_eq!(
        segments.iter().map(|s| s.vertices().len()).sum::<usize>(),
        24
    );
}
