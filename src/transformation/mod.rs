//! Conversion of segmented meshes to exchange formats.

#[cfg(feature = "wavefront")]
pub mod wavefront;
