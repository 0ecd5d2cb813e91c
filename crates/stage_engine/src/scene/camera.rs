//! Fly camera controller
//!
//! WASD input sets forward and angular speed; every update integrates the
//! motion through the actor's transform and publishes a look-at view matrix
//! to the render collaborator.

use crate::foundation::math::{constants, utils::near_zero, Mat4, Mat4Ext, Quat, Vec3};
use crate::input::{InputState, KeyCode};
use crate::scene::actor::{ActorCtx, Controller};

/// Distance ahead of the eye used as the look-at target
const TARGET_DISTANCE: f32 = 100.0;

/// Forward drive speed in units per second
const DRIVE_SPEED: f32 = 300.0;

/// First-person camera driven by WASD
pub struct CameraController {
    forward_speed: f32,
    angular_speed: f32,
}

impl CameraController {
    /// Create a stationary camera controller
    pub fn new() -> Self {
        Self {
            forward_speed: 0.0,
            angular_speed: 0.0,
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for CameraController {
    fn update(&mut self, ctx: &mut ActorCtx<'_>, delta_time: f32) {
        if !near_zero(self.angular_speed) {
            let angle = self.angular_speed * delta_time;
            // Increment applied after the current orientation
            let increment = Quat::from_axis_angle(&Vec3::z_axis(), angle);
            let rotation = ctx.transform.rotation();
            ctx.transform.set_rotation(increment * rotation);
        }
        if !near_zero(self.forward_speed) {
            let position =
                ctx.transform.position() + ctx.transform.forward() * self.forward_speed * delta_time;
            ctx.transform.set_position(position);
        }

        let eye = ctx.transform.position();
        let target = eye + ctx.transform.forward() * TARGET_DISTANCE;
        let view = Mat4::look_at(eye, target, Vec3::z());
        ctx.host.set_view(view);
    }

    fn process_input(&mut self, _ctx: &mut ActorCtx<'_>, input: &InputState) {
        let mut forward_speed = 0.0;
        let mut angular_speed = 0.0;

        if input.keyboard.key_down(KeyCode::W) {
            forward_speed += DRIVE_SPEED;
        }
        if input.keyboard.key_down(KeyCode::S) {
            forward_speed -= DRIVE_SPEED;
        }
        if input.keyboard.key_down(KeyCode::A) {
            angular_speed -= constants::TAU;
        }
        if input.keyboard.key_down(KeyCode::D) {
            angular_speed += constants::TAU;
        }

        self.forward_speed = forward_speed;
        self.angular_speed = angular_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputSnapshot, InputSystem, KeyEvent};
    use crate::render::DrawList;
    use crate::scene::actor::Actor;
    use crate::world::WorldCommands;
    use approx::assert_relative_eq;

    #[test]
    fn test_drives_forward_and_publishes_view() {
        let mut input = InputSystem::new();
        input.update(&InputSnapshot {
            key_events: vec![KeyEvent {
                key: KeyCode::W,
                down: true,
            }],
            close_requested: false,
        });

        let mut actor = Actor::with_controller(CameraController::new());
        let mut host = DrawList::new();
        let mut commands = WorldCommands::default();

        actor.process_input(&mut host, &mut commands, input.state());
        actor.update(&mut host, &mut commands, 0.5);

        // Forward is +X for an identity rotation
        assert_relative_eq!(
            actor.transform().position(),
            crate::foundation::math::Vec3::new(150.0, 0.0, 0.0),
            epsilon = 1e-4
        );

        // The view matrix was published this frame
        assert_ne!(*host.view(), Mat4::identity());
    }
}
