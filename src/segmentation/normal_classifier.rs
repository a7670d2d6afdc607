use crate::math::{Point, Real, UnitVector};
use crate::segmentation::SegmentationError;
use crate::utils::hashmap::HashMap;
use crate::utils::VertexKey;
use na::RealField;

/// Groups face normals into classes of directions equal within an angular tolerance.
///
/// Each class is represented by a key normal: the first normal registered that was
/// not within tolerance of any previously registered key. A normal `n` is within
/// tolerance of a key `k` if `n == k` exactly, or if the tolerance is positive and
/// the angle between `n` and `k` is at most the tolerance.
///
/// With a tolerance of `0`, only bit-identical normals end up in the same class.
///
/// When a normal is within tolerance of several keys, the key registered first wins.
/// Registration order is therefore authoritative, and the classifier is meant to be
/// fully populated (see [`NormalClassifier::from_normals`]) before being queried with
/// [`NormalClassifier::classify`], so that the class of a normal does not depend on
/// the order of the queries.
#[derive(Clone, Debug)]
pub struct NormalClassifier {
    tolerance: Real,
    cos_tolerance: Real,
    keys: Vec<UnitVector<Real>>,
    counts: Vec<usize>,
    exact: HashMap<VertexKey, u32>,
}

impl NormalClassifier {
    /// Creates an empty classifier with the given angular tolerance, in radians.
    pub fn new(tolerance: Real) -> Result<Self, SegmentationError> {
        // NOTE: written this way to reject NaN.
        if !(tolerance >= 0.0) {
            return Err(SegmentationError::InvalidTolerance(tolerance));
        }

        let cos_tolerance = if tolerance >= Real::pi() {
            -1.0
        } else {
            tolerance.cos()
        };

        Ok(Self {
            tolerance,
            cos_tolerance,
            keys: vec![],
            counts: vec![],
            exact: HashMap::default(),
        })
    }

    /// Creates a classifier and registers all the given normals, in order.
    pub fn from_normals<'a>(
        normals: impl IntoIterator<Item = &'a UnitVector<Real>>,
        tolerance: Real,
    ) -> Result<Self, SegmentationError> {
        let mut result = Self::new(tolerance)?;

        for normal in normals {
            let _ = result.register(normal)?;
        }

        Ok(result)
    }

    /// The angular tolerance, in radians.
    pub fn tolerance(&self) -> Real {
        self.tolerance
    }

    /// Registers a normal and returns its class.
    ///
    /// If the normal is within tolerance of an existing key, the count of the first
    /// such key is incremented. Otherwise, the normal becomes the key of a new class.
    pub fn register(&mut self, normal: &UnitVector<Real>) -> Result<u32, SegmentationError> {
        if let Some(class) = self.classify(normal) {
            self.counts[class as usize] += 1;
            return Ok(class);
        }

        let class = u32::try_from(self.keys.len()).map_err(|_| {
            SegmentationError::IndexOverflow {
                what: "normal classes",
                count: self.keys.len(),
            }
        })?;
        self.keys.push(*normal);
        self.counts.push(1);
        let _ = self.exact.insert(Self::exact_key(normal), class);
        Ok(class)
    }

    /// Finds the class of a normal without modifying the classifier.
    ///
    /// Returns the first registered key within tolerance of `normal`, or `None` if
    /// there is none.
    pub fn classify(&self, normal: &UnitVector<Real>) -> Option<u32> {
        // A key exactly equal to `normal` was registered because no previous key was
        // within tolerance of it, so it is necessarily the first match.
        if let Some(class) = self.exact.get(&Self::exact_key(normal)) {
            return Some(*class);
        }

        if self.tolerance == 0.0 {
            return None;
        }

        self.keys
            .iter()
            .position(|key| normal.dot(key) >= self.cos_tolerance)
            .map(|class| class as u32)
    }

    /// The key normal of the class of `normal`, if any.
    pub fn key_normal(&self, normal: &UnitVector<Real>) -> Option<UnitVector<Real>> {
        self.classify(normal).map(|class| self.keys[class as usize])
    }

    /// The number of classes.
    pub fn num_classes(&self) -> usize {
        self.keys.len()
    }

    /// The key normal of a class.
    pub fn key(&self, class: u32) -> &UnitVector<Real> {
        &self.keys[class as usize]
    }

    /// The number of normals registered into a class.
    pub fn count(&self, class: u32) -> usize {
        self.counts[class as usize]
    }

    /// Iterates through the key normals and counts of all classes, in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&UnitVector<Real>, usize)> + '_ {
        self.keys.iter().zip(self.counts.iter().copied())
    }

    fn exact_key(normal: &UnitVector<Real>) -> VertexKey {
        VertexKey::new(Point::from(normal.into_inner()))
    }
}
