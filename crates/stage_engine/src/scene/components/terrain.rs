//! Terrain drawing component

use std::any::Any;

use crate::assets::TerrainHandle;
use crate::render::{DrawItem, DrawKey, DrawPayload, RenderHost, DEFAULT_DRAW_ORDER};
use crate::scene::component::{Component, DEFAULT_UPDATE_ORDER};
use crate::scene::transform::Transform;

/// Drawable component binding opaque terrain geometry to its actor's
/// transform
pub struct TerrainComponent {
    key: Option<DrawKey>,
    terrain: TerrainHandle,
    update_order: i32,
    visible: bool,
}

impl TerrainComponent {
    /// Register the terrain at the default update order
    pub fn new(host: &mut dyn RenderHost, terrain: TerrainHandle) -> Self {
        Self::with_update_order(host, terrain, DEFAULT_UPDATE_ORDER)
    }

    /// Register the terrain at an explicit update order
    pub fn with_update_order(
        host: &mut dyn RenderHost,
        terrain: TerrainHandle,
        update_order: i32,
    ) -> Self {
        let key = host.register(
            DEFAULT_DRAW_ORDER,
            DrawItem::new(DrawPayload::Terrain { terrain }),
        );
        Self {
            key: Some(key),
            terrain,
            update_order,
            visible: true,
        }
    }

    /// The terrain handle this component draws
    pub fn terrain(&self) -> TerrainHandle {
        self.terrain
    }

    /// Whether the terrain is drawn
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Toggle drawing without unregistering
    pub fn set_visible(&mut self, host: &mut dyn RenderHost, visible: bool) {
        self.visible = visible;
        if let Some(key) = self.key {
            host.set_visible(key, visible);
        }
    }
}

impl Component for TerrainComponent {
    fn update_order(&self) -> i32 {
        self.update_order
    }

    fn on_world_transform(&mut self, transform: &Transform, host: &mut dyn RenderHost) {
        if let Some(key) = self.key {
            host.set_world(key, *transform.world_matrix());
        }
    }

    fn dispose(&mut self, host: &mut dyn RenderHost) {
        if let Some(key) = self.key.take() {
            host.unregister(key);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
