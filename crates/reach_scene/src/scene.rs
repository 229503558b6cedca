//! Scene graph with ray queries

use crate::error::{Result, SceneError};
use crate::id::{ObjectId, Slots};
use crate::object::{ObjectDesc, SceneObject};
use crate::shape::Ray;
use crate::transform::Transform;
use glam::{Quat, Vec3};
use reach_interact::{ControllerPose, Hand, InteractionLayer, LayerMask, ShowsOptionsMenu};
use std::collections::HashMap;

/// Nearest object hit by a ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    pub object: ObjectId,
    pub distance: f32,
    pub point: Vec3,
}

/// Options-menu requests waiting for the application
#[derive(Clone, Debug, Default)]
pub struct OptionsInbox {
    pending: Vec<ObjectId>,
}

impl ShowsOptionsMenu<ObjectId> for OptionsInbox {
    fn show_options_menu(&mut self, target: ObjectId) {
        self.pending.push(target);
    }
}

/// Objects, prefabs and controller anchors
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Slots<SceneObject>,
    prefabs: HashMap<String, ObjectDesc>,
    controllers: [Option<ObjectId>; 2],
    pub(crate) options_inbox: Option<OptionsInbox>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept options-menu requests; drain them with [`Self::take_options_requests`]
    pub fn with_options_menu(mut self) -> Self {
        self.options_inbox = Some(OptionsInbox::default());
        self
    }

    pub fn take_options_requests(&mut self) -> Vec<ObjectId> {
        self.options_inbox
            .as_mut()
            .map(|inbox| std::mem::take(&mut inbox.pending))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.len() == 0
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }

    /// First object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// Spawn a root object; `desc.transform` is its world pose
    pub fn spawn(&mut self, desc: &ObjectDesc) -> ObjectId {
        self.spawn_tree(desc, None)
    }

    /// Spawn under `parent`; `desc.transform` is relative to it
    pub fn spawn_child(&mut self, parent: ObjectId, desc: &ObjectDesc) -> Result<ObjectId> {
        if !self.contains(parent) {
            return Err(SceneError::ObjectNotFound(parent));
        }
        Ok(self.spawn_tree(desc, Some(parent)))
    }

    fn spawn_tree(&mut self, desc: &ObjectDesc, parent: Option<ObjectId>) -> ObjectId {
        let mut object = SceneObject::from_desc(desc);
        object.parent = parent;
        let id = self.objects.insert(object);

        if let Some(parent) = parent.and_then(|p| self.objects.get_mut(p)) {
            parent.children.push(id);
        }
        for child in &desc.children {
            self.spawn_tree(child, Some(id));
        }
        id
    }

    pub fn register_prefab(&mut self, name: impl Into<String>, desc: ObjectDesc) {
        let name = name.into();
        log::debug!("Registered prefab '{}'", name);
        self.prefabs.insert(name, desc);
    }

    pub fn has_prefab(&self, name: &str) -> bool {
        self.prefabs.contains_key(name)
    }

    /// Spawn a prefab at a world pose, keeping the prefab's scale
    pub fn instantiate(&mut self, prefab: &str, position: Vec3, rotation: Quat) -> Result<ObjectId> {
        let mut desc = self
            .prefabs
            .get(prefab)
            .cloned()
            .ok_or_else(|| SceneError::UnknownPrefab(prefab.to_string()))?;
        desc.transform.position = position;
        desc.transform.rotation = rotation;
        Ok(self.spawn(&desc))
    }

    /// Copy an object and its children to a new root pose
    pub fn duplicate(&mut self, id: ObjectId, position: Vec3, rotation: Quat) -> Result<ObjectId> {
        let mut desc = self.describe(id).ok_or(SceneError::ObjectNotFound(id))?;
        desc.transform.position = position;
        desc.transform.rotation = rotation;
        Ok(self.spawn(&desc))
    }

    /// Blueprint of an existing object tree, with local transforms
    ///
    /// Interaction state is left out: highlight overrides are dropped and a
    /// body held by a controller is described as it will be once released.
    pub fn describe(&self, id: ObjectId) -> Option<ObjectDesc> {
        let object = self.objects.get(id)?;
        let body = object.body.map(|mut body| {
            if self.is_held(id) {
                body.kinematic = false;
            }
            body
        });
        Some(ObjectDesc {
            name: object.name.clone(),
            transform: object.local,
            layer: object.layer,
            shape: object.shape,
            materials: object.renderer.as_ref().map(|r| r.base_materials().to_vec()),
            body,
            children: object
                .children
                .iter()
                .filter_map(|child| self.describe(*child))
                .collect(),
        })
    }

    /// Whether `id` hangs directly off a controller anchor
    pub fn is_held(&self, id: ObjectId) -> bool {
        self.objects
            .get(id)
            .and_then(|object| object.parent)
            .is_some_and(|parent| self.controllers.contains(&Some(parent)))
    }

    /// Remove an object and all of its descendants; returns how many were removed
    pub fn destroy(&mut self, id: ObjectId) -> Result<usize> {
        let parent = self.objects.get(id).ok_or(SceneError::ObjectNotFound(id))?.parent;
        if let Some(parent) = parent.and_then(|p| self.objects.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        Ok(self.destroy_tree(id))
    }

    fn destroy_tree(&mut self, id: ObjectId) -> usize {
        let Some(object) = self.objects.remove(id) else {
            return 0;
        };
        for slot in self.controllers.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        1 + object
            .children
            .iter()
            .map(|child| self.destroy_tree(*child))
            .sum::<usize>()
    }

    pub fn world_transform(&self, id: ObjectId) -> Option<Transform> {
        let object = self.objects.get(id)?;
        match object.parent {
            Some(parent) => Some(self.world_transform(parent)?.combine(&object.local)),
            None => Some(object.local),
        }
    }

    /// Move an object so its world pose becomes `world`
    pub fn set_world_transform(&mut self, id: ObjectId, world: Transform) -> Result<()> {
        let parent = self.objects.get(id).ok_or(SceneError::ObjectNotFound(id))?.parent;
        let local = match parent.and_then(|p| self.world_transform(p)) {
            Some(parent_world) => parent_world.relative(&world),
            None => world,
        };
        if let Some(object) = self.objects.get_mut(id) {
            object.local = local;
        }
        Ok(())
    }

    pub fn set_world_position(&mut self, id: ObjectId, position: Vec3) -> Result<()> {
        let mut world = self.world_transform(id).ok_or(SceneError::ObjectNotFound(id))?;
        world.position = position;
        self.set_world_transform(id, world)
    }

    pub fn set_world_rotation(&mut self, id: ObjectId, rotation: Quat) -> Result<()> {
        let mut world = self.world_transform(id).ok_or(SceneError::ObjectNotFound(id))?;
        world.rotation = rotation;
        self.set_world_transform(id, world)
    }

    pub fn set_local_scale(&mut self, id: ObjectId, scale: Vec3) -> Result<()> {
        let object = self.objects.get_mut(id).ok_or(SceneError::ObjectNotFound(id))?;
        object.local.scale = scale;
        Ok(())
    }

    /// Reparent `child`, keeping its world pose
    pub fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>) -> Result<()> {
        let previous = self.objects.get(child).ok_or(SceneError::ObjectNotFound(child))?.parent;
        if previous == parent {
            return Ok(());
        }
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(SceneError::ObjectNotFound(parent));
            }
            if parent == child || self.is_ancestor(child, parent) {
                return Err(SceneError::ParentCycle { child, parent });
            }
        }

        let world = self.world_transform(child).ok_or(SceneError::ObjectNotFound(child))?;

        if let Some(old) = previous.and_then(|p| self.objects.get_mut(p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(new) = parent.and_then(|p| self.objects.get_mut(p)) {
            new.children.push(child);
        }
        if let Some(object) = self.objects.get_mut(child) {
            object.parent = parent;
        }
        self.set_world_transform(child, world)
    }

    /// Whether `ancestor` is above `id` in the hierarchy
    pub fn is_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = self.objects.get(id).and_then(|o| o.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.objects.get(parent).and_then(|o| o.parent);
        }
        false
    }

    /// Use an existing object as the anchor for `hand`
    pub fn bind_controller(&mut self, hand: Hand, id: ObjectId) -> Result<()> {
        if !self.contains(id) {
            return Err(SceneError::ObjectNotFound(id));
        }
        self.controllers[hand.index()] = Some(id);
        Ok(())
    }

    pub fn controller(&self, hand: Hand) -> Option<ObjectId> {
        self.controllers[hand.index()]
    }

    /// Anchor for `hand`, spawned on first use
    pub fn ensure_controller(&mut self, hand: Hand) -> ObjectId {
        if let Some(id) = self.controller(hand) {
            return id;
        }
        let desc = ObjectDesc::new(format!("{}Controller", capitalized(hand)))
            .with_layer(InteractionLayer::CONTROLLERS);
        let id = self.spawn(&desc);
        self.controllers[hand.index()] = Some(id);
        id
    }

    /// Move the anchor for `hand` to a tracked pose; attached objects follow
    pub fn set_controller_pose(&mut self, hand: Hand, pose: &ControllerPose) -> Result<()> {
        let id = self.ensure_controller(hand);
        let world = Transform::from_position_rotation(pose.position, pose.orientation());
        self.set_world_transform(id, world)
    }

    /// Nearest pickable object on `layers` within `max_distance`
    ///
    /// Objects whose volume contains the ray origin are not reported.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RaycastHit> {
        let ray = Ray::new(origin, direction)?;

        self.objects
            .iter()
            .filter(|(_, object)| object.is_pickable() && layers.contains(object.layer))
            .filter_map(|(id, object)| {
                let shape = object.shape?;
                let world = self.world_transform(id)?;
                let distance = shape.intersect(&ray, &world)?;
                (distance <= max_distance).then_some(RaycastHit {
                    object: id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

fn capitalized(hand: Hand) -> &'static str {
    match hand {
        Hand::Left => "Left",
        Hand::Right => "Right",
    }
}
