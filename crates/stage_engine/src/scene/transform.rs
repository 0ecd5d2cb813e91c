//! Spatial transform with a lazily recomputed world matrix

use crate::foundation::math::{constants, Mat4, Quat, Unit, Vec3};

/// Position, uniform scale and rotation with a cached world matrix.
///
/// Mutations only mark the cached matrix stale; it is rebuilt on demand by
/// [`Transform::compute_world_transform`]. The owning actor runs the
/// component notification pass whenever a rebuild actually happened, so
/// dependents refresh their world-space data exactly once per recomputation.
///
/// The canonical forward axis is +X and the up axis is +Z.
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vec3,
    scale: f32,
    rotation: Quat,
    world: Mat4,
    dirty: bool,
}

impl Transform {
    /// Create an identity transform
    pub fn new() -> Self {
        Self {
            position: Vec3::zeros(),
            scale: 1.0,
            rotation: Quat::identity(),
            world: Mat4::identity(),
            dirty: true,
        }
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the position and mark the world matrix stale
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Current uniform scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the uniform scale and mark the world matrix stale
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Current rotation
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Set the rotation and mark the world matrix stale
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Unit forward axis: +X carried through the current rotation
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::x()
    }

    /// Unit right axis: +Y carried through the current rotation
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }

    /// The cached world matrix; valid whenever no mutation happened since
    /// the last recomputation
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    /// Whether a mutation has outdated the cached world matrix
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild the world matrix if it is stale.
    ///
    /// Returns true when a rebuild happened, signalling the owner to notify
    /// its components. The composition scales a point first, then rotates
    /// it, then moves it into place.
    pub fn compute_world_transform(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        self.world = Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_scaling(self.scale);
        true
    }

    /// Rotate so the forward axis points along `target` (a unit vector).
    ///
    /// A target within tolerance of +X collapses to the identity rotation.
    /// A target within tolerance of -X rotates half a turn about +Z, since
    /// the cross product is degenerate there.
    pub fn rotate_to_new_forward(&mut self, target: Vec3) {
        let dot = Vec3::x().dot(&target);
        if dot > 0.9999 {
            self.set_rotation(Quat::identity());
        } else if dot < -0.9999 {
            self.set_rotation(Quat::from_axis_angle(&Vec3::z_axis(), constants::PI));
        } else {
            let axis = Unit::new_normalize(Vec3::x().cross(&target));
            self.set_rotation(Quat::from_axis_angle(&axis, dot.acos()));
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_starts_as_identity() {
        let transform = Transform::new();

        assert_eq!(transform.position(), Vec3::zeros());
        assert_eq!(transform.scale(), 1.0);
        assert_relative_eq!(transform.rotation(), Quat::identity(), epsilon = EPSILON);
        assert_eq!(*transform.world_matrix(), Mat4::identity());
    }

    #[test]
    fn test_recomputation_is_lazy() {
        let mut transform = Transform::new();
        assert!(transform.compute_world_transform());
        assert!(!transform.is_dirty());

        transform.set_position(Vec3::new(5.0, 0.0, 0.0));
        assert!(transform.is_dirty());
        // Mutation alone leaves the cached matrix untouched
        assert_eq!(*transform.world_matrix(), Mat4::identity());

        assert!(transform.compute_world_transform());
        let moved = transform
            .world_matrix()
            .transform_point(&Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(moved, Point3::new(5.0, 0.0, 0.0), epsilon = EPSILON);

        // Clean transform: recomputation is a no-op
        assert!(!transform.compute_world_transform());
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let mut transform = Transform::new();
        transform.set_scale(2.0);
        transform.set_rotation(Quat::from_axis_angle(&Vec3::z_axis(), constants::HALF_PI));
        transform.set_position(Vec3::new(1.0, 0.0, 0.0));
        transform.compute_world_transform();

        // (1,0,0) scaled to (2,0,0), rotated to (0,2,0), moved to (1,2,0)
        let point = transform
            .world_matrix()
            .transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point, Point3::new(1.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_to_new_forward_aligned() {
        let mut transform = Transform::new();
        transform.rotate_to_new_forward(Vec3::x());
        assert_relative_eq!(transform.rotation(), Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_to_new_forward_anti_parallel() {
        let mut transform = Transform::new();
        transform.rotate_to_new_forward(-Vec3::x());
        assert_relative_eq!(transform.forward(), -Vec3::x(), epsilon = EPSILON);

        // Half a turn about the fixed +Z axis
        let angle = transform.rotation().angle();
        assert_relative_eq!(angle, constants::PI, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_to_new_forward_orthogonal() {
        let mut transform = Transform::new();
        transform.rotate_to_new_forward(Vec3::y());

        assert_relative_eq!(transform.forward(), Vec3::y(), epsilon = EPSILON);
        // Quarter turn about the cross-product axis, X x Y = Z
        assert_relative_eq!(transform.rotation().angle(), constants::HALF_PI, epsilon = EPSILON);
        let axis = transform.rotation().axis().unwrap();
        assert_relative_eq!(axis.into_inner(), Vec3::z(), epsilon = EPSILON);
    }
}
