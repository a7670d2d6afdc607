use crate::meshes::unit_cube;
use facet3d::segmentation::{ParallelSegmenter, Segmenter};
use facet3d::transformation::wavefront::segments_to_obj_file;
use obj::ObjData;

#[test]
fn cube_segments_to_obj_file() {
    let mesh = unit_cube();
    let segments = ParallelSegmenter::new(&mesh, 0.0)
        .do_segmentation()
        .unwrap()
        .into_meshes();

    let path = std::env::temp_dir().join(format!("facet3d-cube-{}.obj", std::process::id()));
    segments_to_obj_file(&segments, &path).unwrap();
    let data = ObjData::load_buf(std::fs::File::open(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(data.position.len(), 24);
    assert_eq!(data.objects.len(), 6);

    for (k, object) in data.objects.iter().enumerate() {
        assert_eq!(object.name, format!("segment_{}", k));
        let polys: Vec<_> = object.groups.iter().flat_map(|g| g.polys.iter()).collect();
        assert_eq!(polys.len(), 2);
        assert!(polys
            .iter()
            .flat_map(|p| p.0.iter())
            .all(|t| (4 * k..4 * k + 4).contains(&t.0)));
    }
}
