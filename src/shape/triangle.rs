//! Definition of the triangle record consumed by the segmenters.

use crate::math::{Point, Real, UnitVector, Vector};
use na::Unit;

/// A triangle of a mesh.
///
/// Besides its three vertex positions, a triangle remembers the persistent
/// identifiers of its vertices, i.e., their 0-based position in the vertex buffer
/// of the mesh it was extracted from. Unlike the positions, these identifiers stay
/// valid across segmentation and are used to deduplicate vertices.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The three vertex positions.
    pub vertex: [Point<Real>; 3],
    /// The persistent identifiers of the three vertices.
    pub id: [u32; 3],
}

impl Triangle {
    /// Creates a triangle from three positions and their persistent vertex identifiers.
    #[inline]
    pub fn new(vertex: [Point<Real>; 3], id: [u32; 3]) -> Triangle {
        Triangle { vertex, id }
    }

    /// Creates a triangle from three positions, numbering its vertices `0, 1, 2`.
    #[inline]
    pub fn from_points(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle::new([a, b, c], [0, 1, 2])
    }

    /// The first vertex.
    #[inline]
    pub fn a(&self) -> &Point<Real> {
        &self.vertex[0]
    }

    /// The second vertex.
    #[inline]
    pub fn b(&self) -> &Point<Real> {
        &self.vertex[1]
    }

    /// The third vertex.
    #[inline]
    pub fn c(&self) -> &Point<Real> {
        &self.vertex[2]
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    ///
    /// Returns `None` if the normal is undefined, i.e., if the triangle is degenerate
    /// (two coincident vertices, or three collinear ones) or has non-finite coordinates.
    ///
    /// The result does not depend on the scale of the triangle: very large or very
    /// small triangles whose cross product (or its squared norm) overflows or
    /// underflows still get a unit normal.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        if let Some(n) = normalize(self.scaled_normal()) {
            return Some(n);
        }

        // The cross product is out of range: retry with edges of unit max-norm.
        let ab = rescaled(self.vertex[1] - self.vertex[0])?;
        let ac = rescaled(self.vertex[2] - self.vertex[0])?;
        normalize(ab.cross(&ac))
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Its norm is twice the area of the triangle.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.vertex[1] - self.vertex[0];
        let ac = self.vertex[2] - self.vertex[0];
        ab.cross(&ac)
    }

    /// Does this triangle have an undefined normal?
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal().is_none()
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() / 2.0
    }
}

fn normalize(n: Vector<Real>) -> Option<UnitVector<Real>> {
    let sq_norm = n.norm_squared();

    if sq_norm > 0.0 && sq_norm.is_finite() {
        Some(Unit::new_unchecked(n / sq_norm.sqrt()))
    } else {
        None
    }
}

fn rescaled(v: Vector<Real>) -> Option<Vector<Real>> {
    let max = v.amax();

    if max > 0.0 && max.is_finite() && v.iter().all(|x| x.is_finite()) {
        Some(v / max)
    } else {
        None
    }
}
