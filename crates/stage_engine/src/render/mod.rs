//! Render collaborator contract and the ordered draw list
//!
//! Drawable components register themselves with a [`RenderHost`] when they
//! are constructed and unregister when they are disposed; the scheduler ends
//! every frame by handing off to [`RenderHost::present`]. Data only flows
//! outward: the scene core never reads anything back from the device layer.

use crate::assets::{MeshHandle, TerrainHandle, TextureHandle};
use crate::foundation::collections::{Handle, HandleMap, OrderedList};
use crate::foundation::math::Mat4;

/// Default draw order for drawables that do not care about layering
pub const DEFAULT_DRAW_ORDER: i32 = 100;

/// Stable handle to a registered draw item
pub type DrawKey = Handle;

/// What a draw item renders
#[derive(Debug, Clone, Copy)]
pub enum DrawPayload {
    /// Mesh geometry
    Mesh {
        /// Opaque mesh geometry handle
        mesh: MeshHandle,
        /// Which of the mesh's textures to bind
        texture_index: usize,
    },
    /// A textured sprite quad
    Sprite {
        /// Opaque texture handle
        texture: TextureHandle,
    },
    /// Terrain geometry
    Terrain {
        /// Opaque terrain handle
        terrain: TerrainHandle,
    },
}

/// One renderer-visible entry: a payload plus cached world-space data
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// What to draw
    pub payload: DrawPayload,
    /// World matrix, refreshed whenever the owning transform recomputes
    pub world: Mat4,
    /// Whether the item should be drawn this frame
    pub visible: bool,
}

impl DrawItem {
    /// Create a visible item with an identity world matrix
    pub fn new(payload: DrawPayload) -> Self {
        Self {
            payload,
            world: Mat4::identity(),
            visible: true,
        }
    }
}

/// Render collaborator contract.
///
/// These are the only capabilities the scene core needs from a renderer. The
/// provided [`DrawList`] implements them for headless use and as the
/// bookkeeping half of a device-backed renderer.
pub trait RenderHost {
    /// Track a drawable at the given draw order and return its handle
    fn register(&mut self, draw_order: i32, item: DrawItem) -> DrawKey;

    /// Stop tracking a drawable; keys that are already gone are ignored
    fn unregister(&mut self, key: DrawKey);

    /// Refresh a drawable's cached world matrix
    fn set_world(&mut self, key: DrawKey, world: Mat4);

    /// Toggle a drawable without unregistering it
    fn set_visible(&mut self, key: DrawKey, visible: bool);

    /// Replace the view matrix used for the next frame
    fn set_view(&mut self, view: Mat4);

    /// Produce a frame from everything registered
    fn present(&mut self);
}

/// Externally-owned draw list, sorted ascending by draw order.
///
/// Uses the same sorted-insertion discipline as an actor's component
/// sequence, keyed by draw order instead of update order.
#[derive(Debug)]
pub struct DrawList {
    items: HandleMap<DrawItem>,
    order: OrderedList<DrawKey>,
    view: Mat4,
}

impl DrawList {
    /// Create an empty draw list
    pub fn new() -> Self {
        Self {
            items: HandleMap::default(),
            order: OrderedList::new(),
            view: Mat4::identity(),
        }
    }

    /// Number of registered items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The view matrix most recently pushed by a camera
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Look up a registered item
    pub fn get(&self, key: DrawKey) -> Option<&DrawItem> {
        self.items.get(key)
    }

    /// Iterate items in ascending draw order
    pub fn iter(&self) -> impl Iterator<Item = &DrawItem> {
        self.order.iter().filter_map(|key| self.items.get(*key))
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderHost for DrawList {
    fn register(&mut self, draw_order: i32, item: DrawItem) -> DrawKey {
        let key = self.items.insert(item);
        self.order.insert(key, draw_order);
        key
    }

    fn unregister(&mut self, key: DrawKey) {
        self.order.remove(&key);
        self.items.remove(key);
    }

    fn set_world(&mut self, key: DrawKey, world: Mat4) {
        if let Some(item) = self.items.get_mut(key) {
            item.world = world;
        }
    }

    fn set_visible(&mut self, key: DrawKey, visible: bool) {
        if let Some(item) = self.items.get_mut(key) {
            item.visible = visible;
        }
    }

    fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    fn present(&mut self) {
        let visible = self.iter().filter(|item| item.visible).count();
        log::trace!("presenting {} of {} draw items", visible, self.items.len());
    }
}
