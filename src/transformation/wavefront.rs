//! Export of triangle meshes to Wavefront (`.obj`) files.
//!
//! This module is enabled by the `wavefront` feature flag.

use crate::shape::TriangleMesh;
use obj::{Group, IndexTuple, ObjData, ObjError, ObjMaterial, Object, SimplePolygon};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

impl TriangleMesh {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    pub fn to_obj_file(&self, path: &Path) -> Result<(), ObjError> {
        segments_to_obj_file(core::slice::from_ref(self), path)
    }

    /// Writes this mesh in the Wavefront (`.obj`) format.
    pub fn write_obj(&self, out: &mut impl Write) -> Result<(), ObjError> {
        write_obj_segments(core::slice::from_ref(self), out)
    }
}

/// Outputs a Wavefront (`.obj`) file containing one object per segment.
pub fn segments_to_obj_file(meshes: &[TriangleMesh], path: &Path) -> Result<(), ObjError> {
    let file = File::create(path).map_err(ObjError::Io)?;
    let mut out = BufWriter::new(file);
    write_obj_segments(meshes, &mut out)?;
    out.flush().map_err(ObjError::Io)
}

/// Writes the given meshes in the Wavefront (`.obj`) format, one object per mesh.
///
/// The vertex buffers are concatenated in order, and every object references the
/// material of its mesh by name with a `usemtl` statement.
pub fn write_obj_segments(meshes: &[TriangleMesh], out: &mut impl Write) -> Result<(), ObjError> {
    let mut position = Vec::with_capacity(meshes.iter().map(|m| m.vertices().len()).sum());
    let mut objects = Vec::with_capacity(meshes.len());

    for (k, mesh) in meshes.iter().enumerate() {
        // NOTE: `IndexTuple` indices are 0-based.
        let base_id = position.len();
        #[allow(clippy::unnecessary_cast)]
        position.extend(
            mesh.vertices()
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32]),
        );

        let name = format!("segment_{}", k);
        objects.push(Object {
            groups: vec![Group {
                polys: mesh
                    .indices()
                    .iter()
                    .map(|tri| {
                        SimplePolygon(
                            tri.iter()
                                .map(|i| IndexTuple(base_id + *i as usize - 1, None, None))
                                .collect(),
                        )
                    })
                    .collect(),
                name: name.clone(),
                index: 0,
                material: Some(ObjMaterial::Ref(mesh.material().name.clone())),
            }],
            name,
        });
    }

    ObjData {
        position,
        objects,
        ..Default::default()
    }
    .write_to_buf(out)
}
