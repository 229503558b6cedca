//! Capabilities the interaction tools consume from the host scene
//!
//! The coordinator never owns scene objects. It talks to the host through
//! [`InteractionHost`], and optional per-object features (an appearance that
//! can be overridden, a body whose simulation can be suspended) are looked up
//! as capability traits. A lookup returning `None` means "not supported" and
//! the corresponding effect is skipped.

use crate::input::Hand;
use crate::layers::LayerMask;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Opaque material reference understood by the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// Conventional id of the highlight material
    pub const HIGHLIGHT: Self = Self(1);
}

/// Appearance captured before an override, used to undo it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppearanceSnapshot {
    materials: Vec<MaterialId>,
}

impl AppearanceSnapshot {
    pub fn new(materials: Vec<MaterialId>) -> Self {
        Self { materials }
    }

    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }

    pub fn into_materials(self) -> Vec<MaterialId> {
        self.materials
    }
}

/// An object whose look can be temporarily overridden
pub trait HasAppearanceOverride {
    /// Layer `highlight` on top of the current look and return the look to restore
    fn apply_override(&mut self, highlight: MaterialId) -> AppearanceSnapshot;

    /// Undo an override
    fn restore(&mut self, snapshot: AppearanceSnapshot);
}

/// An object whose physical simulation can be suspended
pub trait HasKinematicToggle {
    fn is_kinematic(&self) -> bool;

    fn set_kinematic(&mut self, kinematic: bool);
}

/// Receiver of "show options for this object" requests
pub trait ShowsOptionsMenu<O> {
    fn show_options_menu(&mut self, target: O);
}

/// Scene primitives the coordinator needs every frame
pub trait InteractionHost {
    /// Handle to a scene object
    type Object: Copy + Eq + Hash + Debug;

    /// Nearest object on `layers` hit by the ray within `max_distance`
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Self::Object>;

    /// World rotation of an object
    fn rotation(&self, object: Self::Object) -> Option<Quat>;

    /// Set the world rotation of an object
    fn set_rotation(&mut self, object: Self::Object, rotation: Quat);

    /// Reparent an object under a controller, keeping its world pose
    fn attach_to_controller(&mut self, object: Self::Object, hand: Hand);

    /// Clear an object's parent, keeping its world pose
    fn detach(&mut self, object: Self::Object);

    /// Appearance override capability of an object
    fn appearance_mut(&mut self, object: Self::Object) -> Option<&mut dyn HasAppearanceOverride>;

    /// Kinematic toggle capability of an object
    fn body_mut(&mut self, object: Self::Object) -> Option<&mut dyn HasKinematicToggle>;

    /// Options menu embedded in the host, if any
    fn options_menu(&mut self) -> Option<&mut dyn ShowsOptionsMenu<Self::Object>> {
        None
    }
}

/// Scene editing used by the options menu, scalers and spawn menu
pub trait SceneEditor: InteractionHost {
    /// World position of an object
    fn position(&self, object: Self::Object) -> Option<Vec3>;

    /// Scale relative to the parent
    fn local_scale(&self, object: Self::Object) -> Option<Vec3>;

    fn set_local_scale(&mut self, object: Self::Object, scale: Vec3);

    /// Reparent keeping the world pose; `None` moves the object to the root
    fn set_parent(&mut self, child: Self::Object, parent: Option<Self::Object>);

    /// Create an object from a named prefab
    fn instantiate(&mut self, prefab: &str, position: Vec3, rotation: Quat) -> Option<Self::Object>;

    /// Copy an object (with its children) to a new pose
    fn duplicate(&mut self, object: Self::Object, position: Vec3, rotation: Quat) -> Option<Self::Object>;

    /// Remove an object and its children
    fn destroy(&mut self, object: Self::Object);

    /// Give an object a simulated, non-kinematic body
    fn ensure_dynamic_body(&mut self, object: Self::Object);
}
