//! Ray queries against object bounds

use crate::transform::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

const PARALLEL_EPSILON: f32 = 1e-8;

/// Ray with a normalized direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// `None` for a zero-length direction
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        Some(Self {
            origin,
            direction: direction.try_normalize()?,
        })
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Volume a ray can hit, in the object's local space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BoundingShape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl BoundingShape {
    pub fn unit_cube() -> Self {
        Self::Cuboid {
            half_extents: Vec3::splat(0.5),
        }
    }

    /// Distance along `ray` to the first surface hit
    ///
    /// Rays starting inside the volume do not hit it.
    pub fn intersect(&self, ray: &Ray, world: &Transform) -> Option<f32> {
        match *self {
            Self::Sphere { radius } => {
                let radius = radius * world.scale.abs().max_element();
                ray_sphere(ray, world.position, radius)
            }
            Self::Cuboid { half_extents } => {
                let inv_rotation = world.rotation.inverse();
                let origin = inv_rotation * (ray.origin - world.position);
                let direction = inv_rotation * ray.direction;
                ray_box(origin, direction, half_extents * world.scale.abs())
            }
        }
    }
}

fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let c = oc.dot(oc) - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = oc.dot(ray.direction);
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    (t > 0.0).then_some(t)
}

/// Slab test against a centered box
fn ray_box(origin: Vec3, direction: Vec3, half: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let (o, d, h) = (origin[axis], direction[axis], half[axis]);
        if d.abs() < PARALLEL_EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_min > t_max || t_min <= 0.0 {
        None
    } else {
        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_4;

    fn ray_down_z(from: Vec3) -> Ray {
        Ray::new(from, Vec3::NEG_Z).unwrap()
    }

    #[test]
    fn test_sphere_hit_distance() {
        let shape = BoundingShape::Sphere { radius: 0.5 };
        let at = Transform::from_position(Vec3::new(0.0, 0.0, -5.0));

        let t = shape.intersect(&ray_down_z(Vec3::ZERO), &at).unwrap();
        assert_relative_eq!(t, 4.5, epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_scaled_by_largest_axis() {
        let shape = BoundingShape::Sphere { radius: 0.5 };
        let at = Transform::from_position(Vec3::new(0.9, 0.0, -5.0)).with_scale(Vec3::new(1.0, 2.0, 1.0));

        assert!(shape.intersect(&ray_down_z(Vec3::ZERO), &at).is_some());
    }

    #[test]
    fn test_miss_behind_and_inside() {
        let shape = BoundingShape::unit_cube();
        let behind = Transform::from_position(Vec3::new(0.0, 0.0, 5.0));
        let around = Transform::IDENTITY;

        assert_eq!(shape.intersect(&ray_down_z(Vec3::ZERO), &behind), None);
        assert_eq!(shape.intersect(&ray_down_z(Vec3::ZERO), &around), None);
        assert_eq!(
            BoundingShape::Sphere { radius: 1.0 }.intersect(&ray_down_z(Vec3::ZERO), &around),
            None
        );
    }

    #[test]
    fn test_rotated_cuboid() {
        let shape = BoundingShape::unit_cube();
        let at = Transform::from_position_rotation(Vec3::new(0.0, 0.0, -4.0), Quat::from_rotation_y(FRAC_PI_4));

        // Diagonal of the rotated face points at the ray
        let t = shape.intersect(&ray_down_z(Vec3::ZERO), &at).unwrap();
        assert_relative_eq!(t, 4.0 - 0.5 * std::f32::consts::SQRT_2, epsilon = 1e-5);

        // Just outside the unrotated extent but inside the rotated corner
        assert!(shape.intersect(&ray_down_z(Vec3::new(0.6, 0.0, 0.0)), &at).is_some());
    }

    #[test]
    fn test_parallel_ray_outside_slab() {
        let shape = BoundingShape::unit_cube();
        let at = Transform::from_position(Vec3::new(0.0, 2.0, -4.0));

        assert_eq!(shape.intersect(&ray_down_z(Vec3::ZERO), &at), None);
    }

    #[test]
    fn test_zero_direction_is_not_a_ray() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }
}
