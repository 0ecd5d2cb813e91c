//! Mesh drawing component

use std::any::Any;

use crate::assets::MeshHandle;
use crate::render::{DrawItem, DrawKey, DrawPayload, RenderHost, DEFAULT_DRAW_ORDER};
use crate::scene::component::Component;
use crate::scene::transform::Transform;

/// Drawable component binding opaque mesh geometry to its actor's transform.
///
/// Registers a draw item on construction and pushes the actor's world
/// matrix whenever it recomputes; disposal unregisters the item again.
pub struct MeshComponent {
    key: Option<DrawKey>,
    mesh: MeshHandle,
    visible: bool,
}

impl MeshComponent {
    /// Register the mesh at the default draw order
    pub fn new(host: &mut dyn RenderHost, mesh: MeshHandle) -> Self {
        Self::with_draw_order(host, mesh, DEFAULT_DRAW_ORDER)
    }

    /// Register the mesh at an explicit draw order
    pub fn with_draw_order(host: &mut dyn RenderHost, mesh: MeshHandle, draw_order: i32) -> Self {
        let item = DrawItem::new(DrawPayload::Mesh {
            mesh,
            texture_index: 0,
        });
        let key = host.register(draw_order, item);
        Self {
            key: Some(key),
            mesh,
            visible: true,
        }
    }

    /// Register the mesh at the default draw order, binding one of its
    /// textures by index
    pub fn textured(host: &mut dyn RenderHost, mesh: MeshHandle, texture_index: usize) -> Self {
        let item = DrawItem::new(DrawPayload::Mesh {
            mesh,
            texture_index,
        });
        let key = host.register(DEFAULT_DRAW_ORDER, item);
        Self {
            key: Some(key),
            mesh,
            visible: true,
        }
    }

    /// The mesh handle this component draws
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Whether the mesh is drawn
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

impl Component for MeshComponent {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::foundation::math::Vec3;
    use crate::render::DrawList;
    use crate::scene::actor::Actor;
    use crate::world::WorldCommands;

    #[test]
    fn test_registers_and_pushes_world_matrix() {
        let mut catalog = AssetCatalog::new();
        let mut list = DrawList::new();
        let cube = catalog.register_mesh("Assets/Cube.gpmesh");

        let mut actor = Actor::new();
        actor.add_component(Box::new(MeshComponent::new(&mut list, cube)));
        actor.transform_mut().set_position(Vec3::new(3.0, 0.0, 0.0));

        let mut commands = WorldCommands::default();
        actor.update(&mut list, &mut commands, 0.016);

        let item = list.iter().next().unwrap();
        assert_eq!(item.world, *actor.transform().world_matrix());
    }

    #[test]
    fn test_dispose_unregisters_exactly_once() {
        let mut catalog = AssetCatalog::new();
        let mut list = DrawList::new();
        let cube = catalog.register_mesh("Assets/Cube.gpmesh");

        let mut component = MeshComponent::new(&mut list, cube);
        assert_eq!(list.len(), 1);

        component.dispose(&mut list);
        component.dispose(&mut list);
        assert!(list.is_empty());
    }
}
