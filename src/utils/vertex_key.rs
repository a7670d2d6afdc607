use crate::math::{Point, Real};
use crate::utils::FxHasher32;
use core::hash::{Hash, Hasher};

/// A point usable as an exact-equality hash-map key.
///
/// Two keys are equal iff their components compare equal with `==`, without
/// any tolerance. Points differing by floating-point drift are distinct keys,
/// so this must not be used to cluster near-duplicate points.
///
/// `-0.0` and `0.0` are equal and hash identically. A point with a `NaN`
/// component is never equal to anything, itself included.
#[derive(Copy, Clone, Debug)]
pub struct VertexKey(pub Point<Real>);

impl VertexKey {
    /// Wraps a point.
    #[inline]
    pub fn new(point: Point<Real>) -> Self {
        VertexKey(point)
    }

    /// The wrapped point.
    #[inline]
    pub fn point(&self) -> Point<Real> {
        self.0
    }

    /// Combines the independent hashes of the three components.
    ///
    /// The `y` and `z` component hashes are shifted by one and two bits
    /// respectively before being xored together so that permuted
    /// coordinates (e.g. `(1, 2, 3)` and `(2, 1, 3)`) do not collide.
    #[inline]
    pub fn key_hash(&self) -> u64 {
        let hx = component_hash(self.0.x);
        let hy = component_hash(self.0.y);
        let hz = component_hash(self.0.z);
        hx ^ (hy << 1) ^ (hz << 2)
    }
}

#[inline]
#[allow(clippy::unnecessary_cast)]
fn component_hash(x: Real) -> u64 {
    // `0.0 == -0.0` so they must share the same hash.
    let x = if x == 0.0 { 0.0 } else { x };
    FxHasher32::hash_u64(x.to_bits() as u64)
}

impl PartialEq for VertexKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for VertexKey {}

impl Hash for VertexKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.key_hash())
    }
}

impl From<Point<Real>> for VertexKey {
    fn from(point: Point<Real>) -> Self {
        VertexKey(point)
    }
}
