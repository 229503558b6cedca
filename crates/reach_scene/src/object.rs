//! Scene objects and their optional components

use crate::id::ObjectId;
use crate::shape::BoundingShape;
use crate::transform::Transform;
use glam::{Quat, Vec3};
use reach_interact::{AppearanceSnapshot, HasAppearanceOverride, HasKinematicToggle, InteractionLayer, MaterialId};

/// Material list of a visible object
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Renderer {
    pub materials: Vec<MaterialId>,
    /// Materials from before the active override
    base: Option<Vec<MaterialId>>,
}

impl Renderer {
    pub fn new(materials: Vec<MaterialId>) -> Self {
        Self { materials, base: None }
    }

    /// Materials without any interaction override
    pub fn base_materials(&self) -> &[MaterialId] {
        self.base.as_deref().unwrap_or(&self.materials)
    }

    pub fn is_overridden(&self) -> bool {
        self.base.is_some()
    }
}

impl HasAppearanceOverride for Renderer {
    fn apply_override(&mut self, highlight: MaterialId) -> AppearanceSnapshot {
        let snapshot = AppearanceSnapshot::new(self.materials.clone());
        if self.base.is_none() {
            self.base = Some(self.materials.clone());
        }
        self.materials.push(highlight);
        snapshot
    }

    fn restore(&mut self, snapshot: AppearanceSnapshot) {
        self.materials = snapshot.into_materials();
        self.base = None;
    }
}

/// Simulation flag of a physical object
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RigidBody {
    /// Kinematic bodies are moved by the scene graph, not simulated
    pub kinematic: bool,
}

impl HasKinematicToggle for RigidBody {
    fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }
}

/// Live object stored in a [`crate::Scene`]
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    /// Relative to the parent, or world space for roots
    pub local: Transform,
    pub layer: InteractionLayer,
    pub shape: Option<BoundingShape>,
    pub renderer: Option<Renderer>,
    pub body: Option<RigidBody>,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
}

impl SceneObject {
    pub(crate) fn from_desc(desc: &ObjectDesc) -> Self {
        Self {
            name: desc.name.clone(),
            local: desc.transform,
            layer: desc.layer,
            shape: desc.shape,
            renderer: desc.materials.clone().map(Renderer::new),
            body: desc.body,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    /// Whether this object can be hit by rays
    pub fn is_pickable(&self) -> bool {
        self.shape.is_some() && self.layer != InteractionLayer::IGNORE_RAYCAST
    }
}

/// Blueprint for spawning an object (and its children)
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectDesc {
    pub name: String,
    pub transform: Transform,
    pub layer: InteractionLayer,
    pub shape: Option<BoundingShape>,
    /// `None` means the object is not rendered
    pub materials: Option<Vec<MaterialId>>,
    pub body: Option<RigidBody>,
    /// Spawned as children, with local transforms
    pub children: Vec<ObjectDesc>,
}

impl Default for ObjectDesc {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Transform::IDENTITY,
            layer: InteractionLayer::DEFAULT,
            shape: None,
            materials: None,
            body: None,
            children: Vec::new(),
        }
    }
}

impl ObjectDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Pickable, rendered, simulated object on the interactable layer
    pub fn interactable(name: impl Into<String>, shape: BoundingShape) -> Self {
        Self {
            name: name.into(),
            layer: InteractionLayer::INTERACTABLE,
            shape: Some(shape),
            materials: Some(vec![MaterialId(0)]),
            body: Some(RigidBody::default()),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_layer(mut self, layer: InteractionLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_shape(mut self, shape: BoundingShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_materials(mut self, materials: Vec<MaterialId>) -> Self {
        self.materials = Some(materials);
        self
    }

    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_child(mut self, child: ObjectDesc) -> Self {
        self.children.push(child);
        self
    }
}
