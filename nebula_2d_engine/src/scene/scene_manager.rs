/// Scene manager: owner of attachable scene objects
///
/// Movables (models, text, particle systems), cameras and lights live in
/// slotmap arenas here; scene nodes reference them by key.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::render::renderer::Renderer;
use crate::utils::Aabb;

use super::camera::Camera;
use super::drawable_particle_system::DrawableParticleSystem;
use super::drawable_text::DrawableText;
use super::light::Light;
use super::model::Model;
use super::movable_object::NodeContext;
use super::query::QueryTypeFlags;

new_key_type! {
    /// Stable key for a movable object within a SceneManager
    pub struct MovableKey;
}

new_key_type! {
    /// Stable key for a camera within a SceneManager
    pub struct CameraKey;
}

new_key_type! {
    /// Stable key for a light within a SceneManager
    pub struct LightKey;
}

/// Any concrete movable a scene manager can own
pub enum MovableItem {
    Model(Model),
    Text(DrawableText),
    ParticleSystem(DrawableParticleSystem),
}

impl MovableItem {
    /// Own visibility flag
    pub fn visible(&self) -> bool {
        match self {
            MovableItem::Model(model) => model.data().visible(),
            MovableItem::Text(text) => text.data().visible(),
            MovableItem::ParticleSystem(system) => system.data().visible(),
        }
    }

    /// Query categories
    pub fn query_flags(&self) -> QueryTypeFlags {
        match self {
            MovableItem::Model(model) => model.data().query_flags(),
            MovableItem::Text(text) => text.data().query_flags(),
            MovableItem::ParticleSystem(system) => system.data().query_flags(),
        }
    }

    /// World bounding box
    pub fn world_aabb(&self) -> Aabb {
        match self {
            MovableItem::Model(model) => *model.data().world_aabb(),
            MovableItem::Text(text) => *text.data().world_aabb(),
            MovableItem::ParticleSystem(system) => *system.data().world_aabb(),
        }
    }

    fn elapse(&mut self, time: Duration) {
        match self {
            MovableItem::Model(model) => model.elapse(time),
            MovableItem::Text(text) => text.elapse(time),
            MovableItem::ParticleSystem(system) => system.elapse(time),
        }
    }

    fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        match self {
            MovableItem::Model(model) => model.prepare(ctx, renderer),
            MovableItem::Text(text) => text.prepare(ctx, renderer),
            MovableItem::ParticleSystem(system) => system.prepare(ctx, renderer),
        }
    }

    fn hide(&mut self, renderer: &mut Renderer) {
        match self {
            MovableItem::Model(model) => model.hide(renderer),
            MovableItem::Text(text) => text.hide(renderer),
            MovableItem::ParticleSystem(system) => system.hide(renderer),
        }
    }

    fn detach(&mut self, renderer: &mut Renderer) {
        match self {
            MovableItem::Model(model) => model.detach(renderer),
            MovableItem::Text(text) => text.detach(renderer),
            MovableItem::ParticleSystem(system) => system.detach(renderer),
        }
    }
}

/// Owner of cameras, lights and movable objects
#[derive(Default)]
pub struct SceneManager {
    movables: SlotMap<MovableKey, MovableItem>,
    cameras: SlotMap<CameraKey, Camera>,
    lights: SlotMap<LightKey, Light>,
}

impl SceneManager {
    /// Empty manager
    pub fn new() -> Self {
        Self::default()
    }

    // ===== MOVABLES =====

    /// Take ownership of a model
    pub fn create_model(&mut self, model: Model) -> MovableKey {
        self.movables.insert(MovableItem::Model(model))
    }

    /// Take ownership of a text drawable
    pub fn create_text(&mut self, text: DrawableText) -> MovableKey {
        self.movables.insert(MovableItem::Text(text))
    }

    /// Take ownership of a particle system drawable
    pub fn create_particle_system(&mut self, system: DrawableParticleSystem) -> MovableKey {
        self.movables.insert(MovableItem::ParticleSystem(system))
    }

    /// A movable by key
    pub fn movable(&self, key: MovableKey) -> Option<&MovableItem> {
        self.movables.get(key)
    }

    /// A movable by key, mutably
    pub fn movable_mut(&mut self, key: MovableKey) -> Option<&mut MovableItem> {
        self.movables.get_mut(key)
    }

    /// A model by key
    pub fn model(&self, key: MovableKey) -> Option<&Model> {
        match self.movables.get(key) {
            Some(MovableItem::Model(model)) => Some(model),
            _ => None,
        }
    }

    /// A model by key, mutably
    pub fn model_mut(&mut self, key: MovableKey) -> Option<&mut Model> {
        match self.movables.get_mut(key) {
            Some(MovableItem::Model(model)) => Some(model),
            _ => None,
        }
    }

    /// A text drawable by key
    pub fn text(&self, key: MovableKey) -> Option<&DrawableText> {
        match self.movables.get(key) {
            Some(MovableItem::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// A text drawable by key, mutably
    pub fn text_mut(&mut self, key: MovableKey) -> Option<&mut DrawableText> {
        match self.movables.get_mut(key) {
            Some(MovableItem::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// A particle system drawable by key
    pub fn particle_system(&self, key: MovableKey) -> Option<&DrawableParticleSystem> {
        match self.movables.get(key) {
            Some(MovableItem::ParticleSystem(system)) => Some(system),
            _ => None,
        }
    }

    /// A particle system drawable by key, mutably
    pub fn particle_system_mut(&mut self, key: MovableKey) -> Option<&mut DrawableParticleSystem> {
        match self.movables.get_mut(key) {
            Some(MovableItem::ParticleSystem(system)) => Some(system),
            _ => None,
        }
    }

    /// Remove a movable, detaching its primitives from the renderer
    pub fn remove_movable(&mut self, key: MovableKey, renderer: &mut Renderer) -> bool {
        match self.movables.remove(key) {
            Some(mut movable) => {
                movable.detach(renderer);
                true
            }
            None => false,
        }
    }

    /// Number of movables
    pub fn movable_count(&self) -> usize {
        self.movables.len()
    }

    /// Iterate all movable keys
    pub fn movable_keys(&self) -> impl Iterator<Item = MovableKey> + '_ {
        self.movables.keys()
    }

    /// True if the key refers to a live movable
    pub fn contains_movable(&self, key: MovableKey) -> bool {
        self.movables.contains_key(key)
    }

    // ===== CAMERAS =====

    /// Take ownership of a camera
    pub fn create_camera(&mut self, camera: Camera) -> CameraKey {
        self.cameras.insert(camera)
    }

    /// A camera by key
    pub fn camera(&self, key: CameraKey) -> Option<&Camera> {
        self.cameras.get(key)
    }

    /// A camera by key, mutably
    pub fn camera_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.cameras.get_mut(key)
    }

    /// Remove a camera
    pub fn remove_camera(&mut self, key: CameraKey) -> bool {
        self.cameras.remove(key).is_some()
    }

    /// Number of cameras
    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    // ===== LIGHTS =====

    /// Take ownership of a light
    pub fn create_light(&mut self, light: Light) -> LightKey {
        self.lights.insert(light)
    }

    /// A light by key
    pub fn light(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    /// A light by key, mutably
    pub fn light_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.lights.get_mut(key)
    }

    /// Remove a light
    pub fn remove_light(&mut self, key: LightKey) -> bool {
        self.lights.remove(key).is_some()
    }

    /// Number of lights
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    // ===== FRAME HOOKS =====

    /// Advance a movable's time-dependent state
    pub fn elapse_movable(&mut self, key: MovableKey, time: Duration) {
        if let Some(movable) = self.movables.get_mut(key) {
            movable.elapse(time);
        }
    }

    /// Sync a movable's primitives with the renderer
    pub fn prepare_movable(&mut self, key: MovableKey, ctx: &NodeContext, renderer: &mut Renderer) {
        if let Some(movable) = self.movables.get_mut(key) {
            movable.prepare(ctx, renderer);
        }
    }

    /// Mark a movable's primitives world-invisible (owning node hidden)
    pub fn hide_movable(&mut self, key: MovableKey, renderer: &mut Renderer) {
        if let Some(movable) = self.movables.get_mut(key) {
            movable.hide(renderer);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
