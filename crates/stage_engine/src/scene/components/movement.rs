//! Steering movement for actors
//!
//! Angular speed spins the actor about the up axis; forward and strafe
//! speed translate it along the rotated basis axes.

use std::any::Any;

use crate::foundation::math::{utils::near_zero, Quat, Vec3};
use crate::scene::actor::ActorCtx;
use crate::scene::component::{Component, DEFAULT_UPDATE_ORDER};

/// Component that steers its actor from speed values set by game logic
pub struct MoveComponent {
    update_order: i32,

    /// Rotation about the up axis in radians per second
    pub angular_speed: f32,

    /// Movement along the forward axis in units per second
    pub forward_speed: f32,

    /// Movement along the right axis in units per second
    pub strafe_speed: f32,
}

impl MoveComponent {
    /// Create a stationary move component at the default update order
    pub fn new() -> Self {
        Self::with_update_order(DEFAULT_UPDATE_ORDER)
    }

    /// Create a stationary move component at an explicit update order
    pub fn with_update_order(update_order: i32) -> Self {
        Self {
            update_order,
            angular_speed: 0.0,
            forward_speed: 0.0,
            strafe_speed: 0.0,
        }
    }
}

impl Default for MoveComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MoveComponent {
    fn update_order(&self) -> i32 {
        self.update_order
    }

    fn update(&mut self, ctx: &mut ActorCtx<'_>, delta_time: f32) {
        if !near_zero(self.angular_speed) {
            let angle = self.angular_speed * delta_time;
            // Increment applied after the current orientation
            let increment = Quat::from_axis_angle(&Vec3::z_axis(), angle);
            let rotation = ctx.transform.rotation();
            ctx.transform.set_rotation(increment * rotation);
        }

        if !near_zero(self.forward_speed) || !near_zero(self.strafe_speed) {
            let mut position = ctx.transform.position();
            position += ctx.transform.forward() * self.forward_speed * delta_time;
            position += ctx.transform.right() * self.strafe_speed * delta_time;
            ctx.transform.set_position(position);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
