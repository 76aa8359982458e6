/// Light attachable
///
/// A uniform payload for the pass shaders; position comes from the scene
/// node the light is attached to.

use glam::Vec2;

use crate::utils::Color;

/// Kind of light source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    Point,
    Directional,
    Spot,
}

/// A light attachable to a scene node
#[derive(Debug, Clone)]
pub struct Light {
    light_type: LightType,
    direction: Vec2,

    ambient_color: Color,
    diffuse_color: Color,
    specular_color: Color,

    attenuation_constant: f32,
    attenuation_linear: f32,
    attenuation_quadratic: f32,

    /// Inner cone angle in radians (spot only)
    cutoff_angle: f32,
    /// Outer cone angle in radians (spot only)
    outer_cutoff_angle: f32,

    cast_shadows: bool,
}

impl Light {
    /// White point light with no falloff
    pub fn point() -> Self {
        Self {
            light_type: LightType::Point,
            direction: Vec2::NEG_Y,
            ambient_color: Color::BLACK,
            diffuse_color: Color::WHITE,
            specular_color: Color::WHITE,
            attenuation_constant: 1.0,
            attenuation_linear: 0.0,
            attenuation_quadratic: 0.0,
            cutoff_angle: 0.0,
            outer_cutoff_angle: 0.0,
            cast_shadows: true,
        }
    }

    /// Directional light along the given direction
    pub fn directional(direction: Vec2) -> Self {
        Self {
            light_type: LightType::Directional,
            direction,
            ..Self::point()
        }
    }

    /// Spot light along the given direction with inner/outer cone angles
    pub fn spot(direction: Vec2, cutoff_angle: f32, outer_cutoff_angle: f32) -> Self {
        Self {
            light_type: LightType::Spot,
            direction,
            cutoff_angle,
            outer_cutoff_angle,
            ..Self::point()
        }
    }

    // ===== MODIFIERS =====

    /// Set the ambient color
    pub fn set_ambient_color(&mut self, color: Color) {
        self.ambient_color = color;
    }

    /// Set the diffuse color
    pub fn set_diffuse_color(&mut self, color: Color) {
        self.diffuse_color = color;
    }

    /// Set the specular color
    pub fn set_specular_color(&mut self, color: Color) {
        self.specular_color = color;
    }

    /// Set the attenuation polynomial
    pub fn set_attenuation(&mut self, constant: f32, linear: f32, quadratic: f32) {
        self.attenuation_constant = constant;
        self.attenuation_linear = linear;
        self.attenuation_quadratic = quadratic;
    }

    /// Enable/disable shadow casting
    pub fn set_cast_shadows(&mut self, cast: bool) {
        self.cast_shadows = cast;
    }

    // ===== OBSERVERS =====

    /// Light kind
    pub fn light_type(&self) -> LightType {
        self.light_type
    }

    /// Direction (directional and spot lights)
    pub fn direction(&self) -> Vec2 {
        self.direction
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

    /// Attenuation as (constant, linear, quadratic)
    pub fn attenuation(&self) -> (f32, f32, f32) {
        (
            self.attenuation_constant,
            self.attenuation_linear,
            self.attenuation_quadratic,
        )
    }

    /// Inner and outer cone angles (spot lights)
    pub fn cutoff_angles(&self) -> (f32, f32) {
        (self.cutoff_angle, self.outer_cutoff_angle)
    }

    /// True if this light casts shadows
    pub fn cast_shadows(&self) -> bool {
        self.cast_shadows
    }
}
