/// Sprite shape: a texturized rectangle with its own texture coordinates

use std::sync::{Arc, Mutex};

use glam::{Vec2, Vec3};

use crate::graphics_device::DrawMode;
use crate::materials::material::{flipped_tex_coords, unflipped_tex_coords};
use crate::materials::Material;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::{Color, Rect};

use super::rectangle::quad_vertices;
use super::shape::Shape;

/// A texturized rectangle maintaining its own texture-coordinate rect,
/// composed with the material's world coordinates when drawn
pub struct Sprite {
    shape: Shape,
    position: Vec3,
    rotation: f32,
    size: Vec2,

    lower_left_tex_coord: Vec2,
    upper_right_tex_coord: Vec2,
    auto_size: bool,
}

impl Sprite {
    /// Sprite at the origin
    pub fn new(size: Vec2, material: Option<Arc<Mutex<Material>>>) -> Self {
        Self::with_position(Vec3::ZERO, size, material)
    }

    /// Sprite at the given center position
    pub fn with_position(position: Vec3, size: Vec2, material: Option<Arc<Mutex<Material>>>) -> Self {
        let mut shape = Shape::new(DrawMode::Triangles, Color::WHITE);
        shape.set_material(material);

        Self {
            shape,
            position,
            rotation: 0.0,
            size,
            lower_left_tex_coord: Vec2::ZERO,
            upper_right_tex_coord: Vec2::ONE,
            auto_size: false,
        }
    }

    // ===== MODIFIERS =====

    /// Set the center position
    pub fn set_position(&mut self, position: Vec3) {
        if self.position != position {
            self.position = position;
            self.shape.refresh();
        }
    }

    /// Set the rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.shape.refresh();
        }
    }

    /// Set the size. Turns auto-sizing off.
    pub fn set_size(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.auto_size = false;
            self.shape.refresh();
        }
    }

    /// Auto-size the sprite from its material's first texture frame
    pub fn set_auto_size(&mut self, auto_size: bool) {
        self.auto_size = auto_size;
        if auto_size {
            self.recalculate_size();
        }
    }

    /// Set the texture coordinates directly
    pub fn set_tex_coords(&mut self, lower_left: Vec2, upper_right: Vec2) {
        if self.lower_left_tex_coord != lower_left || self.upper_right_tex_coord != upper_right {
            self.lower_left_tex_coord = lower_left;
            self.upper_right_tex_coord = upper_right;
            self.shape.refresh();
        }
    }

    // ===== OBSERVERS =====

    /// Center position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// True if the sprite sizes itself from its texture
    pub fn auto_size(&self) -> bool {
        self.auto_size
    }

    /// Texture coordinates as (lower left, upper right)
    pub fn tex_coords(&self) -> (Vec2, Vec2) {
        (self.lower_left_tex_coord, self.upper_right_tex_coord)
    }

    /// Shape core (color, material, visibility, primitive key)
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Shape core, mutably
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    // ===== TEXTURE COORDINATES =====

    /// Crop the sprite to the given area in [0, 1]^2; None un-crops.
    /// Discards any repeating previously applied.
    pub fn crop(&mut self, area: Option<Rect>) {
        let (ll, ur) = (self.lower_left_tex_coord, self.upper_right_tex_coord);
        match area {
            Some(area) => {
                let clamped = area.clamped_to_unit();
                let (min, max) = (clamped.min.min(clamped.max), clamped.min.max(clamped.max));
                if min != max {
                    let (new_ll, new_ur) = flipped_tex_coords(ll, ur, min, max);
                    self.set_tex_coords(new_ll, new_ur);
                }
            }
            None if self.is_cropped() => {
                let (new_ll, new_ur) = flipped_tex_coords(ll, ur, Vec2::ZERO, Vec2::ONE);
                self.set_tex_coords(new_ll, new_ur);
            }
            None => {}
        }
    }

    /// Repeat the sprite's texture by the given amount; None un-repeats.
    /// Discards any cropping previously applied.
    pub fn repeat(&mut self, amount: Option<Vec2>) {
        let (ll, ur) = (self.lower_left_tex_coord, self.upper_right_tex_coord);
        match amount {
            Some(amount) => {
                let max = amount.max(Vec2::ZERO);
                if max.x > 0.0 && max.y > 0.0 {
                    let (new_ll, new_ur) = flipped_tex_coords(ll, ur, Vec2::ZERO, max);
                    self.set_tex_coords(new_ll, new_ur);
                }
            }
            None if self.is_repeated() => {
                let (new_ll, new_ur) = flipped_tex_coords(ll, ur, Vec2::ZERO, Vec2::ONE);
                self.set_tex_coords(new_ll, new_ur);
            }
            None => {}
        }
    }

    /// Flip the sprite horizontally (mirror)
    pub fn flip_horizontal(&mut self) {
        std::mem::swap(
            &mut self.lower_left_tex_coord.x,
            &mut self.upper_right_tex_coord.x,
        );
        self.shape.refresh();
    }

    /// Flip the sprite vertically (up-down)
    pub fn flip_vertical(&mut self) {
        std::mem::swap(
            &mut self.lower_left_tex_coord.y,
            &mut self.upper_right_tex_coord.y,
        );
        self.shape.refresh();
    }

    /// True if the sprite is cropped
    pub fn is_cropped(&self) -> bool {
        let (min, max) =
            unflipped_tex_coords(self.lower_left_tex_coord, self.upper_right_tex_coord);
        min.x > 0.0 || min.y > 0.0 || max.x < 1.0 || max.y < 1.0
    }

    /// True if the sprite is repeated
    pub fn is_repeated(&self) -> bool {
        let (min, max) =
            unflipped_tex_coords(self.lower_left_tex_coord, self.upper_right_tex_coord);
        min.x < 0.0 || min.y < 0.0 || max.x > 1.0 || max.y > 1.0
    }

    /// True if the sprite is flipped horizontally
    pub fn is_flipped_horizontally(&self) -> bool {
        self.upper_right_tex_coord.x < self.lower_left_tex_coord.x
    }

    /// True if the sprite is flipped vertically
    pub fn is_flipped_vertically(&self) -> bool {
        self.upper_right_tex_coord.y < self.lower_left_tex_coord.y
    }

    // ===== INTERNALS =====

    fn recalculate_size(&mut self) {
        let texture_size = self.shape.material().and_then(|material| {
            material
                .lock()
                .unwrap()
                .first_texture()
                .map(|texture| texture.extents())
        });

        if let Some(size) = texture_size {
            if self.size != size {
                self.size = size;
                self.shape.refresh();
            }
        }
    }

    /// The sprite's own coordinates composed with the material's world
    /// coordinates (which fold in the texture's atlas region)
    fn world_tex_coords(&self) -> (Vec2, Vec2) {
        let (rel_ll, rel_ur) = (self.lower_left_tex_coord, self.upper_right_tex_coord);

        match self.shape.material() {
            Some(material) => {
                let (mat_ll, mat_ur) = material.lock().unwrap().world_tex_coords();
                let span = mat_ur - mat_ll;
                (mat_ll + rel_ll * span, mat_ll + rel_ur * span)
            }
            None => (rel_ll, rel_ur),
        }
    }

    // ===== PREPARE =====

    pub(crate) fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        if self.auto_size {
            self.recalculate_size();
        }

        let (ll, ur) = self.world_tex_coords();
        let (position, rotation, size, color) =
            (self.position, self.rotation, self.size, self.shape.fill_color());
        self.shape.sync(
            || quad_vertices(position, rotation, size, color, ll, ur),
            ctx,
            renderer,
        );
    }

    pub(crate) fn detach(&mut self, renderer: &mut Renderer) {
        self.shape.detach(renderer);
    }
}
