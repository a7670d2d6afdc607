//! Disjoint-set partitions of triangles.

use ena::unify::{InPlaceUnificationTable, UnifyKey};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub(crate) struct TriangleKey(u32);

impl UnifyKey for TriangleKey {
    type Value = ();
    fn index(&self) -> u32 {
        self.0
    }
    fn from_index(u: u32) -> TriangleKey {
        TriangleKey(u)
    }
    fn tag() -> &'static str {
        "TriangleKey"
    }
}

/// A union-find structure over the elements `0..len`.
pub(crate) struct TriangleUnionFind {
    ufind: InPlaceUnificationTable<TriangleKey>,
    len: u32,
}

impl TriangleUnionFind {
    /// Creates `len` singleton sets.
    pub fn new(len: u32) -> Self {
        let mut ufind = InPlaceUnificationTable::new();

        for _ in 0..len {
            let _ = ufind.new_key(());
        }

        Self { ufind, len }
    }

    /// Merges the sets containing `a` and `b`.
    pub fn union(&mut self, a: u32, b: u32) {
        self.ufind.union(TriangleKey(a), TriangleKey(b));
    }

    /// The representative of the set containing `a`.
    pub fn find(&mut self, a: u32) -> u32 {
        self.ufind.find(TriangleKey(a)).0
    }

    /// Resolves every element to its representative.
    pub fn into_roots(mut self) -> Vec<u32> {
        (0..self.len).map(|i| self.find(i)).collect()
    }
}

/// Follows the parent links of `segment_union` from `i` until reaching a root.
///
/// A root is an element that is its own parent. For a fully resolved partition
/// (as produced by the segmenters), this returns `segment_union[i]`.
///
/// Panics if a link is out of bounds. Loops forever if the links contain a cycle
/// longer than one element.
pub fn find_root(segment_union: &[u32], mut i: u32) -> u32 {
    while segment_union[i as usize] != i {
        i = segment_union[i as usize];
    }

    i
}

/// Tests that every entry of `segment_union` is a root, i.e., that
/// `segment_union[segment_union[i]] == segment_union[i]` for all `i`.
pub fn is_resolved(segment_union: &[u32]) -> bool {
    segment_union.iter().all(|root| {
        segment_union
            .get(*root as usize)
            .is_some_and(|parent| parent == root)
    })
}

/// The number of distinct sets of a resolved partition.
pub fn num_segments(segment_union: &[u32]) -> usize {
    segment_union
        .iter()
        .enumerate()
        .filter(|(i, root)| *i == **root as usize)
        .count()
}
