//! Reach Scene - In-Memory Scene Host
//!
//! A small scene graph that gives the interaction coordinator something to
//! point at: objects with parent/child transforms, bounding shapes for ray
//! queries, material lists, kinematic flags, prefabs and controller anchors.
//!
//! # Example
//!
//! ```ignore
//! use reach_scene::prelude::*;
//!
//! let mut scene = Scene::new();
//! let crate_id = scene.spawn(
//!     &ObjectDesc::interactable("Crate", BoundingShape::unit_cube())
//!         .with_position(Vec3::new(0.0, 1.0, -2.0)),
//! );
//!
//! let hit = scene.raycast(Vec3::Y, Vec3::NEG_Z, 10.0, LayerMask::INTERACTABLE);
//! ```

pub mod error;
mod host;
pub mod id;
pub mod object;
pub mod scene;
pub mod shape;
pub mod transform;

pub mod prelude {
    //! Common imports for scene functionality
    pub use crate::error::{Result, SceneError};
    pub use crate::id::ObjectId;
    pub use crate::object::{ObjectDesc, Renderer, RigidBody, SceneObject};
    pub use crate::scene::{OptionsInbox, RaycastHit, Scene};
    pub use crate::shape::{BoundingShape, Ray};
    pub use crate::transform::Transform;
}

pub use prelude::*;
