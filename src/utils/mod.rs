//! Various unsorted geometrical and logical operators.

pub use self::fx_hasher::{FxBuildHasher32, FxHasher32};
pub use self::vertex_key::VertexKey;

mod fx_hasher;
pub mod hashmap;
mod vertex_key;
