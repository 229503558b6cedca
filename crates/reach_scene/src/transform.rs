//! Position, rotation and scale

use glam::{Quat, Vec3};
use reach_interact::FORWARD;

/// Local or world transform
///
/// Scale is per axis and applied before rotation. Combining non-uniformly
/// scaled parents with rotated children is approximated component-wise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[inline]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[inline]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Map a point from this space into the parent space
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (point * self.scale)
    }

    /// Map a parent-space point into this space
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        (self.rotation.inverse() * (point - self.position)) / safe_scale(self.scale)
    }

    /// Pointing direction
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    /// `self` as parent, `child` in local space; returns the child in parent space
    pub fn combine(&self, child: &Transform) -> Self {
        Self {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
            scale: self.scale * child.scale,
        }
    }

    /// Inverse of [`Self::combine`]: express `world` relative to `self`
    pub fn relative(&self, world: &Transform) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: self.inverse_transform_point(world.position),
            rotation: (inv_rotation * world.rotation).normalize(),
            scale: world.scale / safe_scale(self.scale),
        }
    }
}

fn safe_scale(scale: Vec3) -> Vec3 {
    Vec3::select(scale.abs().cmplt(Vec3::splat(f32::EPSILON)), Vec3::ONE, scale)
}
