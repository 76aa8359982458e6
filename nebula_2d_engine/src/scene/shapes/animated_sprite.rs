/// Animated sprite: a sprite driven by its own animation cursor

use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::{Vec2, Vec3};

use crate::graphics_device::TextureHandle;
use crate::materials::Material;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::textures::Animation;

use super::sprite::Sprite;

/// A sprite whose texture follows an owned animation cursor
pub struct AnimatedSprite {
    sprite: Sprite,
    animation: Animation,
    applied_frame: Option<TextureHandle>,
}

impl AnimatedSprite {
    /// Animated sprite at the origin
    pub fn new(size: Vec2, animation: Animation, material: Option<Arc<Mutex<Material>>>) -> Self {
        Self::with_position(Vec3::ZERO, size, animation, material)
    }

    /// Animated sprite at the given center position
    pub fn with_position(
        position: Vec3,
        size: Vec2,
        animation: Animation,
        material: Option<Arc<Mutex<Material>>>,
    ) -> Self {
        Self {
            sprite: Sprite::with_position(position, size, material),
            animation,
            applied_frame: None,
        }
    }

    /// The underlying sprite
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// The underlying sprite, mutably
    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    /// The animation cursor
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// The animation cursor, mutably
    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    /// Advance the animation; a frame change retargets the sprite's texture
    pub fn elapse(&mut self, time: Duration) {
        self.animation.elapse(time);
        self.apply_current_frame();
    }

    fn apply_current_frame(&mut self) {
        let frame = self.animation.current_frame().map(|frame| frame.handle());
        if frame != self.applied_frame {
            self.applied_frame = frame;
            self.sprite.shape_mut().set_texture(frame);
            self.sprite.shape_mut().refresh();
        }
    }

    pub(crate) fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        if self.applied_frame.is_none() {
            self.apply_current_frame();
        }
        self.sprite.prepare(ctx, renderer);
    }

    pub(crate) fn detach(&mut self, renderer: &mut Renderer) {
        self.sprite.detach(renderer);
    }
}
