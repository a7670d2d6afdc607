use crate::meshes::{random_terrain, unit_cube, unit_square};
use approx::assert_relative_eq;
use facet3d::math::{Point, Real};
use facet3d::na::RealField;
use facet3d::segmentation::{
    DegenerateTriangles, ParallelSegmenter, SegmentationDiagnostic, SegmentationError,
    SegmentationParameters, Segmenter,
};
use facet3d::shape::{Material, TriangleMesh};

#[test]
fn flat_square_is_a_single_segment() {
    let mesh = unit_square();
    let segmentation = ParallelSegmenter::new(&mesh, 0.0).do_segmentation().unwrap();

    assert!(segmentation.is_complete());
    assert_eq!(segmentation.num_segments(), 1);
    assert_eq!(segmentation.meshes[0].vertices().len(), 4);
    assert_eq!(segmentation.meshes[0].indices(), mesh.indices());
}

#[test]
fn cube_splits_into_faces() {
    let mesh = unit_cube();
    let tolerance = (45.0 as Real).to_radians();
    let segmentation = ParallelSegmenter::new(&mesh, tolerance)
        .do_segmentation()
        .unwrap();

    assert_eq!(segmentation.num_segments(), 6);

    for (k, segment) in segmentation.meshes.iter().enumerate() {
        assert_eq!(segment.vertices().len(), 4);
        assert_eq!(segment.num_triangles(), 2);

        // Segments come in the order of the faces of the input mesh.
        let first = mesh.triangle(2 * k as u32);
        let v = &segment.vertices()[..3];
        assert_eq!(v, &first.vertex[..]);
    }
}

#[test]
fn covering_tolerance_merges_the_cube() {
    let mesh = unit_cube();
    let segmentation = ParallelSegmenter::new(&mesh, Real::pi())
        .do_segmentation()
        .unwrap();

    assert_eq!(segmentation.num_segments(), 1);
    assert_eq!(segmentation.meshes[0].vertices().len(), 8);
    assert_eq!(segmentation.meshes[0].num_triangles(), 12);
}

#[test]
fn right_angle_tolerance_leaves_the_opposite_face() {
    // Every side is within 100 degrees of the bottom face, which is registered first,
    // but the top face is not.
    let mesh = unit_cube();
    let union = ParallelSegmenter::new(&mesh, (100.0 as Real).to_radians())
        .segment_union()
        .unwrap();

    assert_eq!(union.num_normal_classes, 2);
    assert_eq!(union.normal_classes[2], Some(1));
    assert_eq!(union.normal_classes[3], Some(1));
    assert!(union
        .normal_classes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 3)
        .all(|(_, c)| *c == Some(0)));

    assert_eq!(union.roots[2], union.roots[3]);
    assert!(union
        .roots
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 3)
        .all(|(_, r)| *r == union.roots[0]));
}

#[test]
fn disconnected_coplanar_triangles_stay_apart() {
    let mesh = TriangleMesh::from_zero_based(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(5.0, 0.0, 0.0),
            Point::new(6.0, 0.0, 0.0),
            Point::new(5.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [3, 4, 5]],
    )
    .unwrap();

    let union = ParallelSegmenter::new(&mesh, 0.0).segment_union().unwrap();
    assert_eq!(union.num_normal_classes, 1);
    assert_eq!(union.roots, vec![0, 1]);
}

#[test]
fn triangles_touching_at_a_corner_stay_apart() {
    let mesh = TriangleMesh::from_zero_based(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(0.0, -1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 3, 4]],
    )
    .unwrap();

    let segmentation = ParallelSegmenter::new(&mesh, 0.0).do_segmentation().unwrap();
    assert_eq!(segmentation.num_segments(), 2);
    // The shared corner is emitted by both segments.
    assert_eq!(segmentation.meshes[0].vertices()[0], Point::origin());
    assert_eq!(segmentation.meshes[1].vertices()[0], Point::origin());
}

#[test]
fn degenerate_triangles_are_reported() {
    let mesh = TriangleMesh::from_zero_based(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
        ],
        // The last triangle is collinear, and shares an edge with the first one.
        vec![[0, 1, 2], [0, 2, 3], [0, 1, 4]],
    )
    .unwrap();

    let isolated = ParallelSegmenter::new(&mesh, 0.0).do_segmentation().unwrap();
    assert!(isolated.is_partial());
    assert_eq!(isolated.num_segments(), 2);
    assert_eq!(isolated.meshes[0].num_triangles(), 2);
    assert_eq!(isolated.meshes[1].num_triangles(), 1);
    assert_eq!(
        isolated.diagnostics,
        vec![SegmentationDiagnostic::DegenerateTriangle {
            triangle: 2,
            handling: DegenerateTriangles::Isolate,
        }]
    );

    let params = SegmentationParameters {
        degenerate_triangles: DegenerateTriangles::Skip,
        ..SegmentationParameters::default()
    };
    let skipped = ParallelSegmenter::with_parameters(&mesh, params)
        .do_segmentation()
        .unwrap();
    assert_eq!(skipped.num_segments(), 1);
    assert_eq!(skipped.meshes[0].num_triangles(), 2);
    assert_eq!(skipped.diagnostics.len(), 1);
}

#[test]
fn invalid_tolerances_are_rejected() {
    let mesh = unit_square();

    for tolerance in [-1.0, Real::NAN] {
        let result = ParallelSegmenter::new(&mesh, tolerance).do_segmentation();
        assert!(matches!(result, Err(SegmentationError::InvalidTolerance(_))));
    }
}

#[test]
fn segmenters_are_interchangeable() {
    let cube = unit_cube();
    let square = unit_square();
    let params = SegmentationParameters {
        region_size: 3,
        ..SegmentationParameters::with_tolerance(0.1)
    };

    let segmenters: Vec<Box<dyn Segmenter + '_>> = vec![
        Box::new(ParallelSegmenter::new(&square, 0.0)),
        Box::new(ParallelSegmenter::with_parameters(&cube, params)),
    ];
    let counts: Vec<usize> = segmenters
        .iter()
        .map(|s| s.do_segmentation().unwrap().num_segments())
        .collect();

    assert_eq!(counts, vec![1, 6]);
}

#[test]
fn segments_own_their_materials() {
    let mut mesh = unit_cube();
    *mesh.material_mut() = Material::new("painted", [1.0, 0.0, 0.0]);

    let mut meshes = ParallelSegmenter::new(&mesh, 0.0)
        .do_segmentation()
        .unwrap()
        .into_meshes();

    meshes[0].material_mut().name = "first".to_string();
    assert_eq!(meshes[0].material().name, "first");
    assert!(meshes[1..].iter().all(|m| m.material() == &Material::default()));
    assert_eq!(mesh.material().name, "painted");
}

#[test]
fn segments_preserve_the_surface_area() {
    let mesh = random_terrain(17, 10, 3);
    let area: Real = mesh.triangles().map(|t| t.area()).sum();
    let segmentation = ParallelSegmenter::new(&mesh, 0.25)
        .do_segmentation()
        .unwrap();

    let segmented_area: Real = segmentation
        .meshes
        .iter()
        .flat_map(|m| m.triangles())
        .map(|t| t.area())
        .sum();
    assert_relative_eq!(area, segmented_area, max_relative = 1.0e-5);
}

#[test]
fn perpendicular_faces_stay_apart_at_any_scale() {
    for scale in [1.0, 1.0e15, 1.0e20] {
        let mesh = TriangleMesh::from_zero_based(
            vec![
                Point::origin(),
                Point::new(scale, 0.0, 0.0),
                Point::new(0.0, scale, 0.0),
                Point::new(0.0, 0.0, scale),
            ],
            vec![[0, 1, 2], [0, 3, 1]],
        )
        .unwrap();

        let segmentation = ParallelSegmenter::new(&mesh, 0.0).do_segmentation().unwrap();
        assert!(segmentation.is_complete(), "scale: {}", scale);
        assert_eq!(segmentation.num_segments(), 2, "scale: {}", scale);
    }
}
