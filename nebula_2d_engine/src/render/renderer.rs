/// Batching renderer
///
/// Groups render primitives into batches backed by one pooled host buffer
/// and one streaming GPU buffer. Each frame the batches are regrouped,
/// compressed and stably sorted by painter order before changed ranges are
/// uploaded and drawn, one draw call per batch per pass.

use std::cmp::Ordering;
use std::time::Duration;

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};

use crate::engine_warn;
use crate::graphics_device::{BufferUsage, SharedGraphicsDevice};

use super::primitive::RenderPrimitive;
use super::vertex::{VertexBatch, VertexBufferObject, VertexDataView};

const LOG_SOURCE: &str = "nebula2d::Renderer";

// Pool sizing defaults, in floats. Based on the standard mesh vertex
// declaration (13 floats) and a two-triangle sprite.
const DEFAULT_VERTEX_SIZE: usize = 3 + 3 + 4 + 3;
const DEFAULT_PRIMITIVE_SIZE: usize = DEFAULT_VERTEX_SIZE * 6;
/// Default capacity of a new batch, in floats
pub const DEFAULT_BATCH_DATA_SIZE: usize = DEFAULT_PRIMITIVE_SIZE * 32;
/// Default capacity of the host vertex pool, in floats
pub const DEFAULT_VERTEX_DATA_SIZE: usize = DEFAULT_BATCH_DATA_SIZE * 64;

new_key_type! {
    /// Stable key for a RenderPrimitive within a Renderer.
    ///
    /// Keys are generational: a key becomes invalid when its primitive is
    /// removed, even if the slot is later reused.
    pub struct PrimitiveKey;
}

/// Per-batch upload state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Membership and layout stable; no upload required
    No,
    /// Slot data changed but layout is unchanged; upload changed slots only
    Yes,
    /// Layout changed (slot added/removed/resized or batch moved); upload
    /// the whole used range
    YesSuccessive,
}

/// Result of testing a primitive against a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupableStatus {
    No,
    Yes,
    /// The batch has no members left; any primitive with the right z may
    /// take it over
    YesEmpty,
}

/// One slot of a batch: a sub-range assigned to a primitive.
///
/// An empty slot (primitive = None) is a hole that keeps its capacity
/// available for reuse until the next compression.
#[derive(Debug, Clone, Copy)]
struct RenderBatchSlot {
    /// Capacity in floats
    capacity: usize,
    primitive: Option<PrimitiveKey>,
    need_update: bool,
}

impl RenderBatchSlot {
    fn new(capacity: usize, primitive: Option<PrimitiveKey>) -> Self {
        Self {
            capacity,
            primitive,
            need_update: true,
        }
    }
}

/// A contiguous pool range drawn with one draw call
struct RenderBatch {
    /// Painter key: world z of the first member at last compaction
    z: f32,
    /// Offset into the pool, in floats
    offset: usize,
    /// Capacity in floats
    capacity: usize,
    /// Sum of slot capacities (holes included until compression), in floats
    used_capacity: usize,
    last_used_capacity: usize,

    slots: Vec<RenderBatchSlot>,
    vertex_batch: VertexBatch,
    need_update: UpdateStatus,
    /// False until the batch's GPU range holds its current data
    ready: bool,
}

impl RenderBatch {
    fn new(z: f32, offset: usize, capacity: usize, vertex_batch: VertexBatch) -> Self {
        Self {
            z,
            offset,
            capacity,
            used_capacity: 0,
            last_used_capacity: 0,
            slots: Vec::new(),
            vertex_batch,
            need_update: UpdateStatus::YesSuccessive,
            ready: false,
        }
    }

    fn first_primitive(&self) -> Option<PrimitiveKey> {
        self.slots.iter().find_map(|slot| slot.primitive)
    }

    fn is_vacant(&self) -> bool {
        self.slots.iter().all(|slot| slot.primitive.is_none())
    }

    fn slot_of(&self, key: PrimitiveKey) -> Option<usize> {
        self.slots.iter().position(|slot| slot.primitive == Some(key))
    }

    /// Float offset of the given slot within the pool
    fn slot_offset(&self, slot_index: usize) -> usize {
        self.offset
            + self.slots[..slot_index]
                .iter()
                .map(|slot| slot.capacity)
                .sum::<usize>()
    }

    fn bump_status(&mut self, status: UpdateStatus) {
        self.need_update = match (self.need_update, status) {
            (UpdateStatus::YesSuccessive, _) | (_, UpdateStatus::YesSuccessive) => {
                UpdateStatus::YesSuccessive
            }
            (UpdateStatus::Yes, _) | (_, UpdateStatus::Yes) => UpdateStatus::Yes,
            _ => UpdateStatus::No,
        };
    }
}

/// A renderer that groups render primitives into batches
///
/// All batches are compressed and kept sorted before vertex data is
/// uploaded to the stream buffer and drawn.
pub struct Renderer {
    device: SharedGraphicsDevice,

    primitives: SlotMap<PrimitiveKey, RenderPrimitive>,
    batches: Vec<RenderBatch>,

    added_primitives: Vec<PrimitiveKey>,
    hidden_primitives: FxHashSet<PrimitiveKey>,
    pending_primitives: Vec<PrimitiveKey>,

    /// Host-side vertex pool (floats)
    vertex_data: Vec<f32>,
    /// Floats of the pool handed out to batches
    pool_used: usize,
    /// Stream buffer mirroring the pool on the GPU
    vbo: Option<VertexBufferObject>,

    initial_vertex_data_size: usize,
    initial_batch_data_size: usize,
}

impl Renderer {
    /// Create a renderer drawing through the given device
    pub fn new(device: SharedGraphicsDevice) -> Self {
        Self {
            device,
            primitives: SlotMap::with_key(),
            batches: Vec::new(),
            added_primitives: Vec::new(),
            hidden_primitives: FxHashSet::default(),
            pending_primitives: Vec::new(),
            vertex_data: Vec::new(),
            pool_used: 0,
            vbo: None,
            initial_vertex_data_size: DEFAULT_VERTEX_DATA_SIZE,
            initial_batch_data_size: DEFAULT_BATCH_DATA_SIZE,
        }
    }

    // ===== TUNABLES =====

    /// Set the initial host pool size in floats
    pub fn set_initial_vertex_data_size(&mut self, size: usize) {
        self.initial_vertex_data_size = size;
    }

    /// Set the initial batch capacity in floats
    pub fn set_initial_batch_data_size(&mut self, size: usize) {
        self.initial_batch_data_size = size;
    }

    /// Initial host pool size in floats
    pub fn initial_vertex_data_size(&self) -> usize {
        self.initial_vertex_data_size
    }

    /// Initial batch capacity in floats
    pub fn initial_batch_data_size(&self) -> usize {
        self.initial_batch_data_size
    }

    /// The device this renderer draws through
    pub fn device(&self) -> &SharedGraphicsDevice {
        &self.device
    }

    // ===== OBSERVERS =====

    /// Total number of batches
    pub fn total_batches(&self) -> usize {
        self.batches.len()
    }

    /// Total number of primitives known to this renderer
    pub fn total_primitives(&self) -> usize {
        self.primitives.len()
    }

    /// Number of batches that would issue a draw call
    pub fn total_batches_to_draw(&self) -> usize {
        self.batches
            .iter()
            .filter(|batch| batch.ready && batch.used_capacity > 0)
            .count()
    }

    /// Number of primitives currently occupying batch slots
    pub fn total_primitives_to_draw(&self) -> usize {
        self.batches
            .iter()
            .map(|batch| batch.slots.iter().filter(|slot| slot.primitive.is_some()).count())
            .sum()
    }

    /// Painter-key range over all batches as (front, back)
    pub fn z_range(&self) -> Option<(f32, f32)> {
        match (self.batches.first(), self.batches.last()) {
            (Some(front), Some(back)) => Some((front.z, back.z)),
            _ => None,
        }
    }

    /// Number of slots (members) of the batch at the given index
    pub fn batch_slot_count(&self, batch_index: usize) -> Option<usize> {
        self.batches.get(batch_index).map(|batch| {
            batch
                .slots
                .iter()
                .filter(|slot| slot.primitive.is_some())
                .count()
        })
    }

    /// Painter keys of all batches in draw order
    pub fn batch_z_order(&self) -> Vec<f32> {
        self.batches.iter().map(|batch| batch.z).collect()
    }

    // ===== PRIMITIVES =====

    /// Add a primitive to this renderer, taking ownership.
    ///
    /// The primitive joins a batch during the next `prepare`.
    pub fn add_primitive(&mut self, primitive: RenderPrimitive) -> PrimitiveKey {
        let key = self.primitives.insert(primitive);
        self.added_primitives.push(key);
        key
    }

    /// True if the key refers to a live primitive of this renderer
    pub fn contains_primitive(&self, key: PrimitiveKey) -> bool {
        self.primitives.contains_key(key)
    }

    /// Shared access to a primitive
    pub fn primitive(&self, key: PrimitiveKey) -> Option<&RenderPrimitive> {
        self.primitives.get(key)
    }

    /// Exclusive access to a primitive
    pub fn primitive_mut(&mut self, key: PrimitiveKey) -> Option<&mut RenderPrimitive> {
        self.primitives.get_mut(key)
    }

    /// Queue a primitive for re-evaluation of its batch membership.
    ///
    /// Returns false if the key is stale.
    pub fn refresh_primitive(&mut self, key: PrimitiveKey) -> bool {
        if self.primitives.contains_key(key) {
            self.pending_primitives.push(key);
            true
        } else {
            false
        }
    }

    /// Remove a primitive. Its slot becomes a hole compressed on the next
    /// prepare. Returns false if the key is stale.
    pub fn remove_primitive(&mut self, key: PrimitiveKey) -> bool {
        if self.primitives.remove(key).is_none() {
            return false;
        }

        for batch in &mut self.batches {
            if let Some(slot_index) = batch.slot_of(key) {
                batch.slots[slot_index].primitive = None;
                batch.bump_status(UpdateStatus::YesSuccessive);
                break;
            }
        }

        self.added_primitives.retain(|&k| k != key);
        self.pending_primitives.retain(|&k| k != key);
        self.hidden_primitives.remove(&key);
        true
    }

    /// Remove all primitives (and with them, all batches)
    pub fn clear_primitives(&mut self) {
        self.primitives.clear();
        self.added_primitives.clear();
        self.pending_primitives.clear();
        self.hidden_primitives.clear();
        self.batches.clear();
        self.pool_used = 0;
    }

    /// Drop all batches; primitives are regrouped on the next prepare
    pub fn clear_batches(&mut self) {
        self.batches.clear();
        self.pool_used = 0;
        self.hidden_primitives.clear();
        self.added_primitives = self.primitives.keys().collect();
        self.pending_primitives.clear();
    }

    // ===== PER-FRAME PIPELINE =====

    /// Prepare this renderer such that it is ready to draw.
    ///
    /// Runs the full pipeline: refresh, regroup, slot update, compression,
    /// host-buffer fill and GPU upload. Typically called once per frame.
    pub fn prepare(&mut self) {
        self.refresh_primitives();
        self.group_added_primitives();
        self.update_batch_slots();
        self.compress_batches();
        self.prepare_vertex_data();
        self.update_batches();
    }

    /// Draw all batches in painter order, one draw call per batch per pass
    pub fn draw(&mut self) {
        for batch in &self.batches {
            if !batch.ready || batch.used_capacity == 0 {
                continue;
            }

            let Some(first) = batch.first_primitive() else {
                continue;
            };
            let Some(primitive) = self.primitives.get(first) else {
                continue;
            };

            {
                let mut device = self.device.lock().unwrap();
                device.set_point_size(primitive.point_size());
                device.set_line_width(primitive.line_thickness());
                device.set_wireframe(primitive.wire_frame());
                device.set_point_sprite(primitive.point_sprite());
            }

            for pass in primitive.render_passes() {
                for _ in 0..pass.iterations().max(1) {
                    pass.apply_blend(&mut *self.device.lock().unwrap());
                    batch
                        .vertex_batch
                        .draw(&self.device, pass.shader_program().map(|p| p.as_ref()));
                }
            }
        }
    }

    /// Advance every batch's animation clock. Typically called once per
    /// frame with the time since the last frame.
    pub fn elapse(&mut self, time: Duration) {
        for batch in &mut self.batches {
            batch.vertex_batch.elapse(time);
        }
    }

    /// Iterate the shader programs referenced by the pass lists of all
    /// batched primitives
    pub fn for_each_pass_program<F>(&self, mut f: F)
    where
        F: FnMut(&std::sync::Arc<super::shader::ShaderProgram>),
    {
        for batch in &self.batches {
            let Some(first) = batch.first_primitive() else {
                continue;
            };
            let Some(primitive) = self.primitives.get(first) else {
                continue;
            };
            for pass in primitive.render_passes() {
                if let Some(program) = pass.shader_program() {
                    f(program);
                }
            }
        }
    }

    // ===== PHASE 1: REFRESH =====

    fn refresh_primitives(&mut self) {
        let mut pending = std::mem::take(&mut self.pending_primitives);

        for (key, primitive) in self.primitives.iter_mut() {
            if primitive.refresh() {
                pending.push(key);
            }
        }

        self.pending_primitives = pending;
    }

    // ===== PHASE 2: GROUPING =====

    fn group_added_primitives(&mut self) {
        // Pending primitives first: decide whether they stay in their batch
        let pending = std::mem::take(&mut self.pending_primitives);
        let mut seen = FxHashSet::default();

        for key in pending {
            if !seen.insert(key) || !self.primitives.contains_key(key) {
                continue;
            }

            match self.locate(key) {
                Some((batch_index, slot_index)) => {
                    if self.keeps_slot(key, batch_index, slot_index) {
                        let batch = &mut self.batches[batch_index];
                        batch.slots[slot_index].need_update = true;
                        batch.bump_status(UpdateStatus::Yes);
                    } else {
                        let batch = &mut self.batches[batch_index];
                        batch.slots[slot_index].primitive = None;
                        batch.bump_status(UpdateStatus::YesSuccessive);
                        self.added_primitives.push(key);
                    }
                }
                None => self.added_primitives.push(key),
            }
        }

        // Then group everything waiting for a batch
        let added = std::mem::take(&mut self.added_primitives);
        let mut grouped = FxHashSet::default();

        for key in added {
            if !grouped.insert(key) || !self.primitives.contains_key(key) {
                continue;
            }
            if self.locate(key).is_some() {
                continue;
            }
            self.group_primitive(key);
        }
    }

    /// Batch/slot position of a primitive, if it occupies one
    fn locate(&self, key: PrimitiveKey) -> Option<(usize, usize)> {
        self.batches
            .iter()
            .enumerate()
            .find_map(|(i, batch)| batch.slot_of(key).map(|s| (i, s)))
    }

    /// True if a pending primitive may keep its current slot
    fn keeps_slot(&self, key: PrimitiveKey, batch_index: usize, slot_index: usize) -> bool {
        let Some(primitive) = self.primitives.get(key) else {
            return false;
        };
        let batch = &self.batches[batch_index];

        if !primitive.world_visible()
            || primitive.world_z() != batch.z
            || primitive.vertex_data_size() != batch.slots[slot_index].capacity
        {
            return false;
        }

        // Compatible with the rest of the batch
        match self.groupable_status(primitive, batch, Some(key)) {
            GroupableStatus::Yes | GroupableStatus::YesEmpty => true,
            GroupableStatus::No => false,
        }
    }

    fn group_primitive(&mut self, key: PrimitiveKey) {
        let (world_visible, size, z) = {
            let primitive = &self.primitives[key];
            (
                primitive.world_visible(),
                primitive.vertex_data_size(),
                primitive.world_z(),
            )
        };

        // Hidden or empty primitives occupy no batch
        if !world_visible || size == 0 {
            self.hidden_primitives.insert(key);
            return;
        }
        self.hidden_primitives.remove(&key);

        let target = {
            let primitive = &self.primitives[key];
            self.batches.iter().enumerate().find_map(|(i, batch)| {
                if batch.z == z {
                    match self.groupable_status(primitive, batch, None) {
                        GroupableStatus::Yes | GroupableStatus::YesEmpty => Some(i),
                        GroupableStatus::No => None,
                    }
                } else {
                    None
                }
            })
        };

        match target {
            Some(batch_index) => self.group_with_batch(batch_index, key, size),
            None => {
                // Insert after any batch with the same or smaller z (stable)
                let position = self
                    .batches
                    .partition_point(|batch| batch.z <= z);
                self.insert_batch(position, key, size, z);
            }
        }
    }

    fn groupable_status(
        &self,
        primitive: &RenderPrimitive,
        batch: &RenderBatch,
        exclude: Option<PrimitiveKey>,
    ) -> GroupableStatus {
        for slot in &batch.slots {
            let Some(member_key) = slot.primitive else {
                continue;
            };
            if Some(member_key) == exclude {
                continue;
            }
            if let Some(member) = self.primitives.get(member_key) {
                return if primitive.is_groupable(member) {
                    GroupableStatus::Yes
                } else {
                    GroupableStatus::No
                };
            }
        }

        GroupableStatus::YesEmpty
    }

    fn group_with_batch(&mut self, batch_index: usize, key: PrimitiveKey, size: usize) {
        // A fully vacated batch is taken over: rebind its draw descriptor
        if self.batches[batch_index].is_vacant() {
            let vertex_batch = self.primitives[key].make_vertex_batch();
            self.batches[batch_index].vertex_batch = vertex_batch;
        }

        let batch = &mut self.batches[batch_index];

        // Reuse the first hole large enough, splitting off the remainder
        let hole = batch
            .slots
            .iter()
            .position(|slot| slot.primitive.is_none() && slot.capacity >= size);

        if let Some(slot_index) = hole {
            let hole_capacity = batch.slots[slot_index].capacity;
            batch.slots[slot_index] = RenderBatchSlot::new(size, Some(key));

            if hole_capacity > size {
                let mut remainder = RenderBatchSlot::new(hole_capacity - size, None);
                remainder.need_update = false;
                batch.slots.insert(slot_index + 1, remainder);
            }

            batch.bump_status(UpdateStatus::YesSuccessive);
            return;
        }

        // Append a new slot, growing the batch if needed
        let required = batch.used_capacity + size;
        if required > batch.capacity {
            self.grow_batch(batch_index, required);
        }

        let batch = &mut self.batches[batch_index];
        batch.slots.push(RenderBatchSlot::new(size, Some(key)));
        batch.used_capacity += size;
        batch.bump_status(UpdateStatus::YesSuccessive);
    }

    fn new_batch_capacity(&self, size: usize) -> usize {
        let unit = self.initial_batch_data_size.max(1);
        let rounded = size.div_ceil(unit) * unit;
        rounded.max(self.initial_batch_data_size)
    }

    fn insert_batch(&mut self, position: usize, key: PrimitiveKey, size: usize, z: f32) {
        let capacity = self.new_batch_capacity(size);
        let offset = self.allocate_pool(capacity);

        let vertex_batch = self.primitives[key].make_vertex_batch();
        let mut batch = RenderBatch::new(z, offset, capacity, vertex_batch);
        batch.slots.push(RenderBatchSlot::new(size, Some(key)));
        batch.used_capacity = size;

        self.batches.insert(position, batch);
    }

    /// Hand out a fresh pool range, growing the host buffer if needed
    fn allocate_pool(&mut self, capacity: usize) -> usize {
        let offset = self.pool_used;
        self.pool_used += capacity;
        self.ensure_host_capacity();
        offset
    }

    fn ensure_host_capacity(&mut self) {
        if self.pool_used > self.vertex_data.len() {
            let new_len = self
                .initial_vertex_data_size
                .max(self.vertex_data.len() * 2)
                .max(self.pool_used);
            self.vertex_data.resize(new_len, 0.0);
        }
    }

    fn grow_batch(&mut self, batch_index: usize, required_used: usize) {
        let required_capacity = self.new_batch_capacity(required_used);
        let (offset, capacity) = {
            let batch = &self.batches[batch_index];
            (batch.offset, batch.capacity)
        };
        let end = offset + capacity;

        // First allocated range starting at or after this batch's end
        let next_start = self
            .batches
            .iter()
            .enumerate()
            .filter(|&(i, batch)| i != batch_index && batch.offset >= end)
            .map(|(_, batch)| batch.offset)
            .min();

        match next_start {
            // Free space immediately after: extend in place
            None => {
                self.batches[batch_index].capacity = required_capacity;
                self.pool_used = self.pool_used.max(offset + required_capacity);
                self.ensure_host_capacity();
            }
            Some(next) if next - offset >= required_capacity => {
                self.batches[batch_index].capacity = required_capacity;
            }
            // Otherwise relocate to the pool tail
            Some(_) => {
                let new_offset = self.allocate_pool(required_capacity);
                let batch = &mut self.batches[batch_index];
                batch.offset = new_offset;
                batch.capacity = required_capacity;
                for slot in &mut batch.slots {
                    slot.need_update = true;
                }
                batch.bump_status(UpdateStatus::YesSuccessive);
            }
        }
    }

    // ===== PHASE 3: SLOT UPDATE =====

    fn update_batch_slots(&mut self) {
        let mut slotted = FxHashSet::default();

        for batch in &mut self.batches {
            let mut needs_bump = false;
            for slot in &mut batch.slots {
                let Some(key) = slot.primitive else {
                    continue;
                };
                slotted.insert(key);

                if let Some(primitive) = self.primitives.get_mut(key) {
                    if primitive.prepare() {
                        slot.need_update = true;
                        needs_bump = true;
                    }
                }
            }
            if needs_bump {
                batch.bump_status(UpdateStatus::Yes);
            }
        }

        // Keep world data coherent for primitives outside any batch
        for (key, primitive) in self.primitives.iter_mut() {
            if !slotted.contains(&key) {
                let _ = primitive.prepare();
            }
        }
    }

    // ===== PHASE 4: COMPRESSION =====

    fn compress_batches(&mut self) {
        for batch in &mut self.batches {
            if batch.slots.iter().any(|slot| slot.primitive.is_none()) {
                batch.slots.retain(|slot| slot.primitive.is_some());
                batch.used_capacity = batch.slots.iter().map(|slot| slot.capacity).sum();
                for slot in &mut batch.slots {
                    slot.need_update = true;
                }
                batch.bump_status(UpdateStatus::YesSuccessive);
            }

            // A layout-size change since the last upload always forces a
            // full range upload
            if batch.used_capacity != batch.last_used_capacity {
                batch.bump_status(UpdateStatus::YesSuccessive);
            }

            // Refresh the painter key from the surviving first member
            if let Some(first) = batch.first_primitive() {
                if let Some(primitive) = self.primitives.get(first) {
                    batch.z = primitive.world_z();
                }
            }
        }

        self.batches.retain(|batch| batch.used_capacity > 0);

        // Stable: batches with equal z keep their insertion order
        self.batches
            .sort_by(|a, b| a.z.partial_cmp(&b.z).unwrap_or(Ordering::Equal));
    }

    // ===== PHASE 5: HOST FILL =====

    fn prepare_vertex_data(&mut self) {
        for batch in &mut self.batches {
            let successive = batch.need_update == UpdateStatus::YesSuccessive;
            let mut offset = batch.offset;

            for slot in &mut batch.slots {
                if let Some(key) = slot.primitive {
                    if (slot.need_update || successive) && offset + slot.capacity <= self.vertex_data.len() {
                        if let Some(primitive) = self.primitives.get(key) {
                            let data = primitive.world_vertex_data();
                            let count = data.len().min(slot.capacity);
                            self.vertex_data[offset..offset + count].copy_from_slice(&data[..count]);
                            slot.need_update = true;
                        }
                    }
                }
                offset += slot.capacity;
            }
        }
    }

    // ===== PHASE 6: GPU UPLOAD =====

    fn update_batches(&mut self) {
        if self.pool_used == 0 {
            return;
        }

        let float_size = std::mem::size_of::<f32>();
        let required_bytes = self.pool_used * float_size;

        if self.vbo.is_none() {
            self.vbo = Some(VertexBufferObject::new(self.device.clone(), BufferUsage::Stream));
        }

        let mut full_reload = false;
        {
            let vbo = self.vbo.as_mut().unwrap();
            if vbo.size() < required_bytes {
                match vbo.reserve(self.vertex_data.len() * float_size, BufferUsage::Stream) {
                    Ok(()) => full_reload = true,
                    Err(err) => {
                        // Out of device memory: skip this frame's draws and
                        // retry on the next one
                        engine_warn!(LOG_SOURCE, "stream buffer allocation failed: {}", err);
                        for batch in &mut self.batches {
                            batch.ready = false;
                        }
                        return;
                    }
                }
            }
        }

        let vbo = self.vbo.as_mut().unwrap();

        for batch in &mut self.batches {
            let status = if full_reload {
                UpdateStatus::YesSuccessive
            } else {
                batch.need_update
            };

            let uploaded = match status {
                UpdateStatus::No => Ok(()),
                UpdateStatus::YesSuccessive => vbo.data_at(
                    VertexDataView::from_floats(batch.offset, batch.used_capacity),
                    &self.vertex_data,
                    batch.offset * float_size,
                ),
                UpdateStatus::Yes => {
                    let mut result = Ok(());
                    let mut offset = batch.offset;
                    for slot in &batch.slots {
                        if slot.need_update && slot.primitive.is_some() {
                            result = result.and(vbo.data_at(
                                VertexDataView::from_floats(offset, slot.capacity),
                                &self.vertex_data,
                                offset * float_size,
                            ));
                        }
                        offset += slot.capacity;
                    }
                    result
                }
            };

            match uploaded {
                Ok(()) => {
                    batch.vertex_batch.set_vertex_buffer(
                        vbo.sub_buffer(batch.offset * float_size, batch.capacity * float_size),
                        false,
                    );
                    batch.vertex_batch.set_vertex_data(
                        VertexDataView::from_floats(batch.offset, batch.used_capacity),
                        false,
                    );
                    batch.vertex_batch.prepare(&self.device, &self.vertex_data);

                    for slot in &mut batch.slots {
                        slot.need_update = false;
                    }
                    batch.last_used_capacity = batch.used_capacity;
                    batch.need_update = UpdateStatus::No;
                    batch.ready = true;
                }
                Err(err) => {
                    engine_warn!(LOG_SOURCE, "batch upload failed: {}", err);
                    batch.ready = false;
                }
            }
        }
    }

    // ===== TEST SUPPORT =====

    /// Upload state of the batch at the given index
    #[doc(hidden)]
    pub fn batch_update_status(&self, batch_index: usize) -> Option<UpdateStatus> {
        self.batches.get(batch_index).map(|batch| batch.need_update)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
