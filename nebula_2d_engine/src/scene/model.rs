/// Model: a drawable owning a collection of shapes
///
/// Each shape owns one render primitive; the model keeps them in sync with
/// the owning node's transform during prepare and aggregates their world
/// bounds.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::render::renderer::Renderer;
use crate::utils::Aabb;

use super::movable_object::{MovableData, NodeContext};
use super::query::QueryTypeFlags;
use super::shapes::{
    AnimatedSprite, Border, Curve, Ellipse, Line, Mesh, Rectangle, Sprite, Triangle,
};

new_key_type! {
    /// Stable key for a shape within a Model
    pub struct ShapeKey;
}

/// Any concrete shape a model can own
pub enum ShapeItem {
    Rectangle(Rectangle),
    Sprite(Sprite),
    AnimatedSprite(AnimatedSprite),
    Ellipse(Ellipse),
    Line(Line),
    Triangle(Triangle),
    Curve(Curve),
    Border(Border),
    Mesh(Mesh),
}

impl ShapeItem {
    fn elapse(&mut self, time: Duration) {
        if let ShapeItem::AnimatedSprite(sprite) = self {
            sprite.elapse(time);
        }
    }

    fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        match self {
            ShapeItem::Rectangle(shape) => shape.prepare(ctx, renderer),
            ShapeItem::Sprite(shape) => shape.prepare(ctx, renderer),
            ShapeItem::AnimatedSprite(shape) => shape.prepare(ctx, renderer),
            ShapeItem::Ellipse(shape) => shape.prepare(ctx, renderer),
            ShapeItem::Line(shape) => shape.prepare(ctx, renderer),
            ShapeItem::Triangle(shape) => shape.prepare(ctx, renderer),
            ShapeItem::Curve(shape) => shape.prepare(ctx, renderer),
            ShapeItem::Border(shape) => shape.prepare(ctx, renderer),
            ShapeItem::Mesh(shape) => shape.prepare(ctx, renderer),
        }
    }

    fn detach(&mut self, renderer: &mut Renderer) {
        match self {
            ShapeItem::Rectangle(shape) => shape.detach(renderer),
            ShapeItem::Sprite(shape) => shape.detach(renderer),
            ShapeItem::AnimatedSprite(shape) => shape.detach(renderer),
            ShapeItem::Ellipse(shape) => shape.detach(renderer),
            ShapeItem::Line(shape) => shape.detach(renderer),
            ShapeItem::Triangle(shape) => shape.detach(renderer),
            ShapeItem::Curve(shape) => shape.detach(renderer),
            ShapeItem::Border(shape) => shape.detach(renderer),
            ShapeItem::Mesh(shape) => shape.detach(renderer),
        }
    }

    fn primitive_key(&self) -> Option<crate::render::PrimitiveKey> {
        match self {
            ShapeItem::Rectangle(shape) => shape.shape().primitive_key(),
            ShapeItem::Sprite(shape) => shape.shape().primitive_key(),
            ShapeItem::AnimatedSprite(shape) => shape.sprite().shape().primitive_key(),
            ShapeItem::Ellipse(shape) => shape.shape().primitive_key(),
            ShapeItem::Line(shape) => shape.shape().primitive_key(),
            ShapeItem::Triangle(shape) => shape.shape().primitive_key(),
            ShapeItem::Curve(shape) => shape.shape().primitive_key(),
            ShapeItem::Border(shape) => shape.shape().primitive_key(),
            ShapeItem::Mesh(shape) => shape.shape().primitive_key(),
        }
    }
}

/// A drawable object owning shapes
pub struct Model {
    data: MovableData,
    shapes: SlotMap<ShapeKey, ShapeItem>,
}

impl Model {
    /// Empty model
    pub fn new() -> Self {
        Self {
            data: MovableData::new(QueryTypeFlags::MODEL),
            shapes: SlotMap::with_key(),
        }
    }

    // ===== SHAPES =====

    /// Add a shape
    pub fn create_shape(&mut self, shape: ShapeItem) -> ShapeKey {
        self.shapes.insert(shape)
    }

    /// Add a rectangle
    pub fn create_rectangle(&mut self, rectangle: Rectangle) -> ShapeKey {
        self.create_shape(ShapeItem::Rectangle(rectangle))
    }

    /// Add a sprite
    pub fn create_sprite(&mut self, sprite: Sprite) -> ShapeKey {
        self.create_shape(ShapeItem::Sprite(sprite))
    }

    /// Add an animated sprite
    pub fn create_animated_sprite(&mut self, sprite: AnimatedSprite) -> ShapeKey {
        self.create_shape(ShapeItem::AnimatedSprite(sprite))
    }

    /// Add an ellipse
    pub fn create_ellipse(&mut self, ellipse: Ellipse) -> ShapeKey {
        self.create_shape(ShapeItem::Ellipse(ellipse))
    }

    /// Add a line
    pub fn create_line(&mut self, line: Line) -> ShapeKey {
        self.create_shape(ShapeItem::Line(line))
    }

    /// Add a triangle
    pub fn create_triangle(&mut self, triangle: Triangle) -> ShapeKey {
        self.create_shape(ShapeItem::Triangle(triangle))
    }

    /// Add a curve
    pub fn create_curve(&mut self, curve: Curve) -> ShapeKey {
        self.create_shape(ShapeItem::Curve(curve))
    }

    /// Add a border
    pub fn create_border(&mut self, border: Border) -> ShapeKey {
        self.create_shape(ShapeItem::Border(border))
    }

    /// Add a mesh
    pub fn create_mesh(&mut self, mesh: Mesh) -> ShapeKey {
        self.create_shape(ShapeItem::Mesh(mesh))
    }

    /// Remove a shape, detaching its primitive from the renderer
    pub fn remove_shape(&mut self, key: ShapeKey, renderer: &mut Renderer) -> bool {
        match self.shapes.remove(key) {
            Some(mut shape) => {
                shape.detach(renderer);
                true
            }
            None => false,
        }
    }

    /// Number of shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// A shape by key
    pub fn shape(&self, key: ShapeKey) -> Option<&ShapeItem> {
        self.shapes.get(key)
    }

    /// A shape by key, mutably
    pub fn shape_mut(&mut self, key: ShapeKey) -> Option<&mut ShapeItem> {
        self.shapes.get_mut(key)
    }

    /// A rectangle by key
    pub fn rectangle_mut(&mut self, key: ShapeKey) -> Option<&mut Rectangle> {
        match self.shapes.get_mut(key) {
            Some(ShapeItem::Rectangle(shape)) => Some(shape),
            _ => None,
        }
    }

    /// A sprite by key
    pub fn sprite_mut(&mut self, key: ShapeKey) -> Option<&mut Sprite> {
        match self.shapes.get_mut(key) {
            Some(ShapeItem::Sprite(shape)) => Some(shape),
            _ => None,
        }
    }

    /// An animated sprite by key
    pub fn animated_sprite_mut(&mut self, key: ShapeKey) -> Option<&mut AnimatedSprite> {
        match self.shapes.get_mut(key) {
            Some(ShapeItem::AnimatedSprite(shape)) => Some(shape),
            _ => None,
        }
    }

    // ===== MOVABLE STATE =====

    /// Common movable state
    pub fn data(&self) -> &MovableData {
        &self.data
    }

    /// Common movable state, mutably
    pub fn data_mut(&mut self) -> &mut MovableData {
        &mut self.data
    }

    // ===== FRAME HOOKS =====

    /// Advance time-dependent shapes
    pub fn elapse(&mut self, time: Duration) {
        for shape in self.shapes.values_mut() {
            shape.elapse(time);
        }
    }

    /// Sync all shape primitives with the renderer and refresh bounds
    pub fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        let ctx = NodeContext {
            world_visible: ctx.world_visible && self.data.visible(),
            ..*ctx
        };

        for shape in self.shapes.values_mut() {
            shape.prepare(&ctx, renderer);
        }

        let mut aabb = Aabb::EMPTY;
        for shape in self.shapes.values() {
            if let Some(key) = shape.primitive_key() {
                if let Some(primitive) = renderer.primitive(key) {
                    aabb.merge(primitive.world_aabb());
                }
            }
        }
        self.data.update_bounds(aabb);
    }

    /// Mark every shape primitive world-invisible (owning node hidden)
    pub fn hide(&mut self, renderer: &mut Renderer) {
        for shape in self.shapes.values() {
            if let Some(key) = shape.primitive_key() {
                if let Some(primitive) = renderer.primitive_mut(key) {
                    primitive.set_world_visible(false);
                }
            }
        }
    }

    /// Detach every shape primitive from the renderer
    pub fn detach(&mut self, renderer: &mut Renderer) {
        for shape in self.shapes.values_mut() {
            shape.detach(renderer);
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
