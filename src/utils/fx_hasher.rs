//! FxHasher taken from rustc_hash, except that it does not depend on the pointer size.

use core::hash::{BuildHasherDefault, Hasher};
use core::ops::BitXor;

const K: u32 = 0x9e3779b9;

/// Builds [`FxHasher32`] instances for hash-maps.
pub type FxBuildHasher32 = BuildHasherDefault<FxHasher32>;

/// This is the same as FxHasher, but with the guarantee that the internal hash is
/// an u32 instead of something that depends on the platform.
///
/// Hash values are therefore identical on every target, which keeps
/// hash-map iteration order reproducible between runs and machines.
#[derive(Default, Copy, Clone, Debug)]
pub struct FxHasher32 {
    hash: u32,
}

impl FxHasher32 {
    #[inline]
    fn add_to_hash(&mut self, i: u32) {
        self.hash = self.hash.rotate_left(5).bitxor(i).wrapping_mul(K);
    }

    /// Hashes a single 64-bit word with a fresh hasher.
    #[inline]
    pub fn hash_u64(i: u64) -> u64 {
        let mut hasher = Self::default();
        hasher.write_u64(i);
        hasher.finish()
    }
}

impl Hasher for FxHasher32 {
    #[inline]
    fn write(&mut self, mut bytes: &[u8]) {
        while let Some((word, rest)) = bytes.split_first_chunk::<4>() {
            self.add_to_hash(u32::from_ne_bytes(*word));
            bytes = rest;
        }
        if let Some((half, rest)) = bytes.split_first_chunk::<2>() {
            self.add_to_hash(u16::from_ne_bytes(*half) as u32);
            bytes = rest;
        }
        if let Some(byte) = bytes.first() {
            self.add_to_hash(*byte as u32);
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.add_to_hash(i as u32);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.add_to_hash(i as u32);
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.add_to_hash(i);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.add_to_hash(i as u32);
        self.add_to_hash((i >> 32) as u32);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash as u64
    }
}
