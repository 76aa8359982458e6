/// Fog effect description
///
/// Pure uniform payload; the scene graph feeds it to pass shaders.

use crate::utils::Color;

/// Fog falloff mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FogMode {
    Linear,
    Exp,
    Exp2,
}

/// Scene fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    mode: FogMode,
    density: f32,
    near_distance: f32,
    far_distance: f32,
    color: Color,
}

impl Fog {
    /// Linear fog between the given distances
    pub fn linear(near_distance: f32, far_distance: f32, color: Color) -> Self {
        Self {
            mode: FogMode::Linear,
            density: 1.0,
            near_distance,
            far_distance,
            color,
        }
    }

    /// Exponential fog with the given density
    pub fn exp(density: f32, color: Color) -> Self {
        Self {
            mode: FogMode::Exp,
            density,
            near_distance: 0.0,
            far_distance: 1.0,
            color,
        }
    }

    /// Squared-exponential fog with the given density
    pub fn exp2(density: f32, color: Color) -> Self {
        Self {
            mode: FogMode::Exp2,
            density,
            near_distance: 0.0,
            far_distance: 1.0,
            color,
        }
    }

    /// Falloff mode
    pub fn mode(&self) -> FogMode {
        self.mode
    }

    /// Density (exponential modes)
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Near distance (linear mode)
    pub fn near_distance(&self) -> f32 {
        self.near_distance
    }

    /// Far distance (linear mode)
    pub fn far_distance(&self) -> f32 {
        self.far_distance
    }

    /// Fog color
    pub fn color(&self) -> Color {
        self.color
    }
}
