//! Component contract
//!
//! A component is a pluggable unit of per-frame logic attached to exactly
//! one actor. Variants implement whichever hooks they need; every hook
//! defaults to a no-op.

use std::any::Any;

use crate::input::InputState;
use crate::render::RenderHost;
use crate::scene::actor::ActorCtx;
use crate::scene::transform::Transform;

/// Default update order for components that do not care about ordering
pub const DEFAULT_UPDATE_ORDER: i32 = 100;

/// A unit of per-frame logic owned by an actor.
///
/// Components run in ascending update order within their actor; the order
/// is fixed at construction. Drawable components register a draw handle
/// with the render collaborator when constructed and must unregister it in
/// [`Component::dispose`].
pub trait Component: 'static {
    /// Position of this component in its actor's update sequence
    fn update_order(&self) -> i32 {
        DEFAULT_UPDATE_ORDER
    }

    /// Advance internal state.
    ///
    /// May mutate the owning actor's transform through `ctx`. Must not add
    /// or remove components on its own actor during the call.
    fn update(&mut self, ctx: &mut ActorCtx<'_>, delta_time: f32) {
        let _ = (ctx, delta_time);
    }

    /// React to the frame's input snapshot; only invoked while the owning
    /// actor is active
    fn process_input(&mut self, ctx: &mut ActorCtx<'_>, input: &InputState) {
        let _ = (ctx, input);
    }

    /// Invoked exactly once per world-matrix recomputation, after the new
    /// matrix is available
    fn on_world_transform(&mut self, transform: &Transform, host: &mut dyn RenderHost) {
        let _ = (transform, host);
    }

    /// Release external registrations.
    ///
    /// Idempotent: the teardown cascade may reach a component that already
    /// disposed itself.
    fn dispose(&mut self, host: &mut dyn RenderHost) {
        let _ = host;
    }

    /// Downcasting support for typed component queries
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcasting support for typed component queries
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
