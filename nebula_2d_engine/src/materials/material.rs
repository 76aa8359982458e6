/// Surface material: colors, texture maps and texture-coordinate algebra
///
/// A material is shared (non-owning) by any number of render primitives;
/// mutating it is visible on the next draw. Each of the four map slots holds
/// nothing, a static texture, or an animation resolved by the batch clock.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;

use crate::textures::{Animation, Texture};
use crate::utils::{Color, Rect};

const DEFAULT_SHININESS: f32 = 32.0;

// ===== TEXTURE MAP SLOT =====

/// One texture map slot
#[derive(Debug, Clone, Default)]
pub enum TextureMap {
    #[default]
    None,
    Animation(Arc<Animation>),
    Texture(Arc<Texture>),
}

impl TextureMap {
    /// True if the slot holds nothing
    pub fn is_none(&self) -> bool {
        matches!(self, TextureMap::None)
    }

    /// Resolve the texture shown at the given clock value
    pub fn texture_at(&self, time: Duration) -> Option<Arc<Texture>> {
        match self {
            TextureMap::None => None,
            TextureMap::Texture(texture) => Some(texture.clone()),
            TextureMap::Animation(animation) => animation.frame_at(time).cloned(),
        }
    }

    /// First frame for animations, the texture itself otherwise
    pub fn first_texture(&self) -> Option<&Arc<Texture>> {
        match self {
            TextureMap::None => None,
            TextureMap::Texture(texture) => Some(texture),
            TextureMap::Animation(animation) => animation.first_frame(),
        }
    }
}

// ===== TEXTURE COORDINATE HELPERS =====

fn is_cropped(lower_left: Vec2, upper_right: Vec2) -> bool {
    lower_left.x > 0.0 || lower_left.y > 0.0 || upper_right.x < 1.0 || upper_right.y < 1.0
}

fn is_repeated(lower_left: Vec2, upper_right: Vec2) -> bool {
    lower_left.x < 0.0 || lower_left.y < 0.0 || upper_right.x > 1.0 || upper_right.y > 1.0
}

fn is_flipped_horizontally(lower_left: Vec2, upper_right: Vec2) -> bool {
    upper_right.x < lower_left.x
}

fn is_flipped_vertically(lower_left: Vec2, upper_right: Vec2) -> bool {
    upper_right.y < lower_left.y
}

/// Per-axis (min, max) corners regardless of flip state
pub(crate) fn unflipped_tex_coords(lower_left: Vec2, upper_right: Vec2) -> (Vec2, Vec2) {
    (lower_left.min(upper_right), lower_left.max(upper_right))
}

/// Apply the flip state of (lower_left, upper_right) to a new (min, max)
/// corner pair. Crop and repeat set coordinates absolutely through this, so
/// repeated application composes and flips survive.
pub(crate) fn flipped_tex_coords(
    lower_left: Vec2,
    upper_right: Vec2,
    new_min: Vec2,
    new_max: Vec2,
) -> (Vec2, Vec2) {
    let mut ll = new_min;
    let mut ur = new_max;

    if is_flipped_horizontally(lower_left, upper_right) {
        std::mem::swap(&mut ll.x, &mut ur.x);
    }
    if is_flipped_vertically(lower_left, upper_right) {
        std::mem::swap(&mut ll.y, &mut ur.y);
    }

    (ll, ur)
}

// ===== MATERIAL =====

/// Named surface description
///
/// # Example
///
/// ```
/// use nebula_2d_engine::materials::Material;
/// use nebula_2d_engine::utils::Color;
///
/// let mut material = Material::new("brick");
/// material.set_diffuse_color(Color::rgb(0.8, 0.3, 0.2));
/// material.flip_horizontal();
/// assert!(material.is_flipped_horizontally());
/// ```
#[derive(Debug, Clone)]
pub struct Material {
    name: String,

    ambient_color: Color,
    diffuse_color: Color,
    specular_color: Color,
    emissive_color: Color,
    shininess: f32,

    diffuse_map: TextureMap,
    normal_map: TextureMap,
    specular_map: TextureMap,
    emissive_map: TextureMap,

    lower_left_tex_coord: Vec2,
    upper_right_tex_coord: Vec2,

    /// None = automatic radius derived from geometry
    emissive_light_radius: Option<f32>,
    lighting_enabled: bool,
    receive_shadows: bool,
}

impl Material {
    /// Create a material with default colors (white diffuse)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient_color: Color::WHITE,
            diffuse_color: Color::WHITE,
            specular_color: Color::DARK_GRAY,
            emissive_color: Color::BLACK,
            shininess: DEFAULT_SHININESS,
            diffuse_map: TextureMap::None,
            normal_map: TextureMap::None,
            specular_map: TextureMap::None,
            emissive_map: TextureMap::None,
            lower_left_tex_coord: Vec2::ZERO,
            upper_right_tex_coord: Vec2::ONE,
            emissive_light_radius: None,
            lighting_enabled: true,
            receive_shadows: true,
        }
    }

    /// Create a material with a diffuse texture map
    pub fn with_diffuse_map(name: impl Into<String>, texture: Arc<Texture>) -> Self {
        let mut material = Self::new(name);
        material.diffuse_map = TextureMap::Texture(texture);
        material
    }

    /// Create a material with an animated diffuse map
    pub fn with_diffuse_animation(name: impl Into<String>, animation: Arc<Animation>) -> Self {
        let mut material = Self::new(name);
        material.diffuse_map = TextureMap::Animation(animation);
        material
    }

    // ===== MODIFIERS =====

    /// Set the ambient color
    pub fn set_ambient_color(&mut self, ambient: Color) {
        self.ambient_color = ambient;
    }

    /// Set the diffuse color.
    ///
    /// Also updates the ambient color when it tracked the old diffuse.
    pub fn set_diffuse_color(&mut self, diffuse: Color) {
        if self.diffuse_color == self.ambient_color {
            self.ambient_color = diffuse;
        }
        self.diffuse_color = diffuse;
    }

    /// Set the specular color
    pub fn set_specular_color(&mut self, specular: Color) {
        self.specular_color = specular;
    }

    /// Set the emissive (self-illumination) color
    pub fn set_emissive_color(&mut self, emissive: Color) {
        self.emissive_color = emissive;
    }

    /// Set the shininess
    pub fn set_shininess(&mut self, shininess: f32) {
        self.shininess = shininess;
    }

    /// Attach/detach the diffuse map
    pub fn set_diffuse_map(&mut self, map: TextureMap) {
        self.diffuse_map = map;
    }

    /// Attach/detach the normal map
    pub fn set_normal_map(&mut self, map: TextureMap) {
        self.normal_map = map;
    }

    /// Attach/detach the specular map
    pub fn set_specular_map(&mut self, map: TextureMap) {
        self.specular_map = map;
    }

    /// Attach/detach the emissive map.
    ///
    /// Attaching to an empty slot promotes a pure black emissive color to
    /// white; detaching reverses it while the color is still pure white.
    /// Comparison is exact, the sentinel colors are engine-written literals.
    pub fn set_emissive_map(&mut self, map: TextureMap) {
        if self.emissive_map.is_none() && !map.is_none() && self.emissive_color == Color::BLACK {
            self.emissive_color = Color::WHITE;
        } else if !self.emissive_map.is_none() && map.is_none() && self.emissive_color == Color::WHITE {
            self.emissive_color = Color::BLACK;
        }

        self.emissive_map = map;
    }

    /// Set the relative texture coordinates directly
    pub fn set_tex_coords(&mut self, lower_left: Vec2, upper_right: Vec2) {
        self.lower_left_tex_coord = lower_left;
        self.upper_right_tex_coord = upper_right;
    }

    /// Set the emissive light radius (None = automatic)
    pub fn set_emissive_light_radius(&mut self, radius: Option<f32>) {
        self.emissive_light_radius = radius;
    }

    /// Enable/disable lighting for this material
    pub fn set_lighting_enabled(&mut self, enabled: bool) {
        self.lighting_enabled = enabled;
    }

    /// Enable/disable shadow receiving for this material
    pub fn set_receive_shadows(&mut self, enabled: bool) {
        self.receive_shadows = enabled;
    }

    // ===== OBSERVERS =====

    /// Material name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ambient color
    pub fn ambient_color(&self) -> Color {
        self.ambient_color
    }

    /// Diffuse color
    pub fn diffuse_color(&self) -> Color {
        self.diffuse_color
    }

    /// Specular color
    pub fn specular_color(&self) -> Color {
        self.specular_color
    }

    /// Emissive color
    pub fn emissive_color(&self) -> Color {
        self.emissive_color
    }

    /// Shininess
    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// Diffuse map slot
    pub fn diffuse_map(&self) -> &TextureMap {
        &self.diffuse_map
    }

    /// Normal map slot
    pub fn normal_map(&self) -> &TextureMap {
        &self.normal_map
    }

    /// Specular map slot
    pub fn specular_map(&self) -> &TextureMap {
        &self.specular_map
    }

    /// Emissive map slot
    pub fn emissive_map(&self) -> &TextureMap {
        &self.emissive_map
    }

    /// Diffuse texture at the given clock value (animations resolve a frame)
    pub fn diffuse_map_at(&self, time: Duration) -> Option<Arc<Texture>> {
        self.diffuse_map.texture_at(time)
    }

    /// Normal texture at the given clock value
    pub fn normal_map_at(&self, time: Duration) -> Option<Arc<Texture>> {
        self.normal_map.texture_at(time)
    }

    /// Specular texture at the given clock value
    pub fn specular_map_at(&self, time: Duration) -> Option<Arc<Texture>> {
        self.specular_map.texture_at(time)
    }

    /// Emissive texture at the given clock value
    pub fn emissive_map_at(&self, time: Duration) -> Option<Arc<Texture>> {
        self.emissive_map.texture_at(time)
    }

    /// First non-empty map's first texture, scanning diffuse, normal,
    /// specular, emissive in that order
    pub fn first_texture(&self) -> Option<&Arc<Texture>> {
        self.diffuse_map
            .first_texture()
            .or_else(|| self.normal_map.first_texture())
            .or_else(|| self.specular_map.first_texture())
            .or_else(|| self.emissive_map.first_texture())
    }

    /// Relative texture coordinates as (lower left, upper right)
    pub fn tex_coords(&self) -> (Vec2, Vec2) {
        (self.lower_left_tex_coord, self.upper_right_tex_coord)
    }

    /// Emissive light radius; None when automatic
    pub fn emissive_light_radius(&self) -> Option<f32> {
        self.emissive_light_radius
    }

    /// True if this material has lighting enabled
    pub fn lighting_enabled(&self) -> bool {
        self.lighting_enabled
    }

    /// True if this material receives shadows
    pub fn receive_shadows(&self) -> bool {
        self.receive_shadows
    }

    // ===== TEXTURE COORDINATES =====

    /// Crop the texture maps to the given area in [0, 1]^2.
    ///
    /// Sets the coordinates absolutely, so repeated crops compose and
    /// cropping back to the unit square restores the original. Discards any
    /// repeating previously applied. Pass None to un-crop.
    pub fn crop(&mut self, area: Option<Rect>) {
        match area {
            Some(area) => {
                let clamped = area.clamped_to_unit();
                let (min, max) = (
                    clamped.min.min(clamped.max),
                    clamped.min.max(clamped.max),
                );

                if min != max {
                    let (ll, ur) = flipped_tex_coords(
                        self.lower_left_tex_coord,
                        self.upper_right_tex_coord,
                        min,
                        max,
                    );
                    self.lower_left_tex_coord = ll;
                    self.upper_right_tex_coord = ur;
                }
            }
            None if self.is_cropped() => {
                let (ll, ur) = flipped_tex_coords(
                    self.lower_left_tex_coord,
                    self.upper_right_tex_coord,
                    Vec2::ZERO,
                    Vec2::ONE,
                );
                self.lower_left_tex_coord = ll;
                self.upper_right_tex_coord = ur;
            }
            None => {}
        }
    }

    /// Repeat the texture maps by the given amount in [0, oo).
    ///
    /// Remaps the coordinates to (0, amount); discards any cropping
    /// previously applied. Pass None to un-repeat.
    pub fn repeat(&mut self, amount: Option<Vec2>) {
        match amount {
            Some(amount) => {
                let max = amount.max(Vec2::ZERO);

                if max.x > 0.0 && max.y > 0.0 {
                    let (ll, ur) = flipped_tex_coords(
                        self.lower_left_tex_coord,
                        self.upper_right_tex_coord,
                        Vec2::ZERO,
                        max,
                    );
                    self.lower_left_tex_coord = ll;
                    self.upper_right_tex_coord = ur;
                }
            }
            None if self.is_repeated() => {
                let (ll, ur) = flipped_tex_coords(
                    self.lower_left_tex_coord,
                    self.upper_right_tex_coord,
                    Vec2::ZERO,
                    Vec2::ONE,
                );
                self.lower_left_tex_coord = ll;
                self.upper_right_tex_coord = ur;
            }
            None => {}
        }
    }

    /// Flip the texture maps horizontally (mirror)
    pub fn flip_horizontal(&mut self) {
        std::mem::swap(
            &mut self.lower_left_tex_coord.x,
            &mut self.upper_right_tex_coord.x,
        );
    }

    /// Flip the texture maps vertically (up-down)
    pub fn flip_vertical(&mut self) {
        std::mem::swap(
            &mut self.lower_left_tex_coord.y,
            &mut self.upper_right_tex_coord.y,
        );
    }

    /// True if the texture maps are cropped
    pub fn is_cropped(&self) -> bool {
        let (min, max) = unflipped_tex_coords(self.lower_left_tex_coord, self.upper_right_tex_coord);
        is_cropped(min, max)
    }

    /// True if the texture maps are repeated
    pub fn is_repeated(&self) -> bool {
        let (min, max) = unflipped_tex_coords(self.lower_left_tex_coord, self.upper_right_tex_coord);
        is_repeated(min, max)
    }

    /// Per-axis repeatability, read from the first texture frame
    pub fn is_repeatable(&self) -> (bool, bool) {
        self.first_texture()
            .map(|texture| texture.is_repeatable())
            .unwrap_or((false, false))
    }

    /// True if the texture maps are flipped horizontally
    pub fn is_flipped_horizontally(&self) -> bool {
        is_flipped_horizontally(self.lower_left_tex_coord, self.upper_right_tex_coord)
    }

    /// True if the texture maps are flipped vertically
    pub fn is_flipped_vertically(&self) -> bool {
        is_flipped_vertically(self.lower_left_tex_coord, self.upper_right_tex_coord)
    }

    /// World texture coordinates: the material's relative coordinates
    /// composed with the first texture frame's own sub-region.
    ///
    /// For animations the first frame is used.
    pub fn world_tex_coords(&self) -> (Vec2, Vec2) {
        let (rel_ll, rel_ur) = self.tex_coords();

        match self.first_texture() {
            Some(texture) => {
                let (tex_ll, tex_ur) = texture.tex_coords();
                let span = tex_ur - tex_ll;
                (tex_ll + rel_ll * span, tex_ll + rel_ur * span)
            }
            None => (rel_ll, rel_ur),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
