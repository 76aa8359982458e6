/// Shader program reference and the closed uniform-name set
///
/// Programs are compiled and linked outside the core; the engine only binds
/// them by handle and assigns uniforms from this closed name set.

use crate::graphics_device::ShaderProgramHandle;

/// Uniform names understood by engine-compatible shader programs
pub mod uniform_name {
    pub const CAMERA_POSITION: &str = "camera.position";

    pub const MATERIAL_AMBIENT: &str = "material.ambient";
    pub const MATERIAL_DIFFUSE: &str = "material.diffuse";
    pub const MATERIAL_SPECULAR: &str = "material.specular";
    pub const MATERIAL_EMISSIVE: &str = "material.emissive";
    pub const MATERIAL_SHININESS: &str = "material.shininess";
    pub const MATERIAL_DIFFUSE_MAP: &str = "material.diffuse_map";
    pub const MATERIAL_NORMAL_MAP: &str = "material.normal_map";
    pub const MATERIAL_SPECULAR_MAP: &str = "material.specular_map";
    pub const MATERIAL_EMISSIVE_MAP: &str = "material.emissive_map";
    pub const MATERIAL_LIGHTING_ENABLED: &str = "material.lighting_enabled";

    pub const FOG_MODE: &str = "fog.mode";
    pub const FOG_DENSITY: &str = "fog.density";
    pub const FOG_NEAR: &str = "fog.near";
    pub const FOG_FAR: &str = "fog.far";
    pub const FOG_COLOR: &str = "fog.color";

    pub const LIGHT_COUNT: &str = "light_count";

    pub const MATRIX_MODEL_VIEW: &str = "matrix.model_view";
    pub const MATRIX_PROJECTION: &str = "matrix.projection";
    pub const MATRIX_MODEL_VIEW_PROJECTION: &str = "matrix.model_view_projection";

    pub const SCENE_GAMMA: &str = "scene.gamma";
    pub const SCENE_AMBIENT: &str = "scene.ambient";

    /// Per-light uniform names, indexed into the light array
    pub fn light(index: usize, field: &str) -> String {
        format!("light[{}].{}", index, field)
    }
}

/// A linked shader program usable by render passes
#[derive(Debug)]
pub struct ShaderProgram {
    handle: ShaderProgramHandle,
    name: String,
}

impl ShaderProgram {
    /// Wrap an externally linked program
    pub fn new(handle: ShaderProgramHandle, name: impl Into<String>) -> Self {
        Self {
            handle,
            name: name.into(),
        }
    }

    /// Device handle
    pub fn handle(&self) -> ShaderProgramHandle {
        self.handle
    }

    /// Program name
    pub fn name(&self) -> &str {
        &self.name
    }
}
