use crate::shape::Triangle;

/// Tests if two triangles share an edge.
///
/// Returns `true` iff strictly more than one vertex of `a` has a position exactly
/// equal to a vertex position of `b`. Triangles touching at a single point are not
/// connected.
///
/// Positions are compared exactly, without tolerance, and the persistent vertex
/// identifiers are ignored: two triangles extracted from unwelded meshes are still
/// connected as long as their shared vertices have bit-identical coordinates.
#[inline]
pub fn is_connected(a: &Triangle, b: &Triangle) -> bool {
    num_shared_vertices(a, b) > 1
}

/// The number of vertices of `a` whose position appears among the vertices of `b`.
#[inline]
pub fn num_shared_vertices(a: &Triangle, b: &Triangle) -> usize {
    a.vertex
        .iter()
        .filter(|pa| b.vertex.iter().any(|pb| pa == &pb))
        .count()
}
