use crate::math::{Point, Real};
use crate::shape::{Material, Triangle};
use core::fmt;

/// Indicated an inconsistency in the index buffer of a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangleMeshError {
    /// An index is `0` or greater than the number of vertices.
    #[error("the triangle {triangle} references the vertex {index}, outside of the 1-based range [1, {num_vertices}].")]
    IndexOutOfBounds {
        /// The triangle with the invalid index.
        triangle: u32,
        /// The invalid (1-based) index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: usize,
    },
}

/// A triangle mesh with a material.
///
/// The index buffer follows the Wavefront OBJ convention: indices are 1-based, so
/// `[1, 2, 3]` is the triangle formed by the first three vertices and `0` is never
/// a valid index.
///
/// A triangle mesh exclusively owns its vertex buffer, index buffer, and material.
#[derive(Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(Serialize, Deserialize),
    serde(try_from = "TriangleMeshBuffers")
)]
pub struct TriangleMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    material: Material,
}

/// The unvalidated serialized form of a [`TriangleMesh`].
#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct TriangleMeshBuffers {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    material: Material,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<TriangleMeshBuffers> for TriangleMesh {
    type Error = TriangleMeshError;

    fn try_from(buffers: TriangleMeshBuffers) -> Result<Self, Self::Error> {
        Self::new(buffers.vertices, buffers.indices, buffers.material)
    }
}

impl fmt::Debug for TriangleMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TriangleMesh {{ {} vertices, {} triangles, material: {:?} }}",
            self.vertices.len(),
            self.indices.len(),
            self.material.name
        )
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::empty(Material::default())
    }
}

impl TriangleMesh {
    /// Creates a new triangle mesh from a vertex buffer and a 1-based index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
        material: Material,
    ) -> Result<Self, TriangleMeshError> {
        let result = Self {
            vertices,
            indices,
            material,
        };
        result.validate_indices()?;
        Ok(result)
    }

    /// Creates a new triangle mesh from a vertex buffer and a 0-based index buffer.
    ///
    /// The indices are shifted to the 1-based convention and the mesh gets a default
    /// material.
    pub fn from_zero_based(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriangleMeshError> {
        let indices = indices
            .into_iter()
            .map(|idx| idx.map(|i| i.saturating_add(1)))
            .collect();
        Self::new(vertices, indices, Material::default())
    }

    /// Creates a triangle mesh without any vertex or triangle.
    pub fn empty(material: Material) -> Self {
        Self {
            vertices: vec![],
            indices: vec![],
            material,
        }
    }

    /// Appends a vertex and returns its 1-based index.
    ///
    /// Returns `None` if the vertex buffer already holds `u32::MAX` vertices.
    pub(crate) fn push_vertex(&mut self, pt: Point<Real>) -> Option<u32> {
        let id = u32::try_from(self.vertices.len()).ok()?.checked_add(1)?;
        self.vertices.push(pt);
        Some(id)
    }

    /// Appends a triangle given by 1-based indices.
    pub(crate) fn push_triangle(&mut self, idx: [u32; 3]) {
        self.indices.push(idx);
    }

    pub(crate) fn reserve_triangles(&mut self, additional: usize) {
        self.indices.reserve(additional);
    }

    /// Checks that every index lies in `[1, self.vertices().len()]`.
    pub fn validate_indices(&self) -> Result<(), TriangleMeshError> {
        let num_vertices = self.vertices.len();

        for (fid, idx) in self.indices.iter().enumerate() {
            for index in idx {
                if *index == 0 || *index as usize > num_vertices {
                    return Err(TriangleMeshError::IndexOutOfBounds {
                        triangle: fid as u32,
                        index: *index,
                        num_vertices,
                    });
                }
            }
        }

        Ok(())
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The 1-based index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The material of this mesh.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// A mutable reference to the material of this mesh.
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// The number of triangles forming this mesh.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Does this mesh have no triangle?
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Decomposes this mesh into its vertex buffer, 1-based index buffer, and material.
    pub fn into_parts(self) -> (Vec<Point<Real>>, Vec<[u32; 3]>, Material) {
        (self.vertices, self.indices, self.material)
    }

    /// Get the `i`-th triangle of this mesh.
    ///
    /// The persistent vertex identifiers of the returned triangle are the 0-based
    /// positions of its vertices in `self.vertices()`.
    ///
    /// Panics if `i` is out of bounds.
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        let id = idx.map(|k| k - 1);
        Triangle::new(id.map(|k| self.vertices[k as usize]), id)
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.indices.len() as u32).map(move |i| self.triangle(i))
    }
}
