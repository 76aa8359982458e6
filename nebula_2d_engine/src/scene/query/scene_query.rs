/// Scene query base: type filtering shared by the concrete queries

use bitflags::bitflags;

bitflags! {
    /// Categories of movable objects a query may match
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct QueryTypeFlags: u32 {
        const MODEL = 1;
        const TEXT = 1 << 1;
        const PARTICLE_SYSTEM = 1 << 2;
    }
}

impl QueryTypeFlags {
    /// Every movable category
    pub fn any() -> Self {
        Self::all()
    }
}

/// Common query parameters
#[derive(Debug, Clone, Copy)]
pub struct SceneQuery {
    type_mask: QueryTypeFlags,
    only_visible: bool,
}

impl SceneQuery {
    /// Query matching every visible movable
    pub fn new() -> Self {
        Self {
            type_mask: QueryTypeFlags::all(),
            only_visible: true,
        }
    }

    /// Restrict the query to the given categories
    pub fn with_type_mask(mut self, type_mask: QueryTypeFlags) -> Self {
        self.type_mask = type_mask;
        self
    }

    /// Include invisible movables
    pub fn including_invisible(mut self) -> Self {
        self.only_visible = false;
        self
    }

    /// Category mask
    pub fn type_mask(&self) -> QueryTypeFlags {
        self.type_mask
    }

    /// True if only visible movables match
    pub fn only_visible(&self) -> bool {
        self.only_visible
    }
}

impl Default for SceneQuery {
    fn default() -> Self {
        Self::new()
    }
}
