/// The material attached to a triangle mesh.
///
/// This is an opaque record as far as segmentation is concerned: every mesh
/// produced by a segmenter receives its own fresh default material, which the
/// caller may then rename or recolor independently of the other segments.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// The name of the material, as referenced by `usemtl` statements in OBJ files.
    pub name: String,
    /// The diffuse color of the material.
    pub diffuse: [f32; 3],
}

impl Material {
    /// The name given to default materials.
    pub const DEFAULT_NAME: &'static str = "default";

    /// Creates a material with the given name and diffuse color.
    pub fn new(name: impl Into<String>, diffuse: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            diffuse,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME, [0.8; 3])
    }
}
