//! Sprite drawing component

use std::any::Any;

use crate::assets::TextureHandle;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{DrawItem, DrawKey, DrawPayload, RenderHost};
use crate::scene::component::Component;
use crate::scene::transform::Transform;

/// Drawable component for a textured quad, layered by draw order.
///
/// The unit quad is scaled by the texture's pixel dimensions before the
/// actor's own transform applies, so a sprite's on-screen size follows the
/// texture it shows.
pub struct SpriteComponent {
    key: Option<DrawKey>,
    width: u32,
    height: u32,
    visible: bool,
}

impl SpriteComponent {
    /// Register a sprite of the given pixel size at a draw order
    pub fn new(
        host: &mut dyn RenderHost,
        texture: TextureHandle,
        width: u32,
        height: u32,
        draw_order: i32,
    ) -> Self {
        let key = host.register(draw_order, DrawItem::new(DrawPayload::Sprite { texture }));
        Self {
            key: Some(key),
            width,
            height,
            visible: true,
        }
    }

    /// The sprite's pixel dimensions
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the sprite is drawn
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

impl Component for SpriteComponent {
    fn on_world_transform(&mut self, transform: &Transform, host: &mut dyn RenderHost) {
        if let Some(key) = self.key {
            let scale = Mat4::new_nonuniform_scaling(&Vec3::new(
                self.width as f32,
                self.height as f32,
                1.0,
            ));
            host.set_world(key, transform.world_matrix() * scale);
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
