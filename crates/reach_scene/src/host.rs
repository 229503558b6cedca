//! Interaction host implementation for [`Scene`]
//!
//! Host calls cannot fail; scene errors are logged and the call is skipped.

use crate::error::Result;
use crate::id::ObjectId;
use crate::object::RigidBody;
use crate::scene::Scene;
use glam::{Quat, Vec3};
use reach_interact::{
    Hand, HasAppearanceOverride, HasKinematicToggle, InteractionHost, LayerMask, SceneEditor, ShowsOptionsMenu,
};

fn log_failure<T>(action: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Scene {} failed: {}", action, e);
            None
        }
    }
}

impl InteractionHost for Scene {
    type Object = ObjectId;

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<ObjectId> {
        Scene::raycast(self, origin, direction, max_distance, layers).map(|hit| hit.object)
    }

    fn rotation(&self, object: ObjectId) -> Option<Quat> {
        self.world_transform(object).map(|world| world.rotation)
    }

    fn set_rotation(&mut self, object: ObjectId, rotation: Quat) {
        log_failure("rotate", self.set_world_rotation(object, rotation));
    }

    fn attach_to_controller(&mut self, object: ObjectId, hand: Hand) {
        let controller = self.ensure_controller(hand);
        log_failure("attach", self.set_parent(object, Some(controller)));
    }

    fn detach(&mut self, object: ObjectId) {
        log_failure("detach", self.set_parent(object, None));
    }

    fn appearance_mut(&mut self, object: ObjectId) -> Option<&mut dyn HasAppearanceOverride> {
        self.get_mut(object)?
            .renderer
            .as_mut()
            .map(|renderer| renderer as &mut dyn HasAppearanceOverride)
    }

    fn body_mut(&mut self, object: ObjectId) -> Option<&mut dyn HasKinematicToggle> {
        self.get_mut(object)?
            .body
            .as_mut()
            .map(|body| body as &mut dyn HasKinematicToggle)
    }

    fn options_menu(&mut self) -> Option<&mut dyn ShowsOptionsMenu<ObjectId>> {
        self.options_inbox
            .as_mut()
            .map(|inbox| inbox as &mut dyn ShowsOptionsMenu<ObjectId>)
    }
}

impl SceneEditor for Scene {
    fn position(&self, object: ObjectId) -> Option<Vec3> {
        self.world_transform(object).map(|world| world.position)
    }

    fn local_scale(&self, object: ObjectId) -> Option<Vec3> {
        self.get(object).map(|o| o.local.scale)
    }

    fn set_local_scale(&mut self, object: ObjectId, scale: Vec3) {
        log_failure("scale", Scene::set_local_scale(self, object, scale));
    }

    fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>) {
        log_failure("reparent", Scene::set_parent(self, child, parent));
    }

    fn instantiate(&mut self, prefab: &str, position: Vec3, rotation: Quat) -> Option<ObjectId> {
        log_failure("instantiate", Scene::instantiate(self, prefab, position, rotation))
    }

    fn duplicate(&mut self, object: ObjectId, position: Vec3, rotation: Quat) -> Option<ObjectId> {
        log_failure("duplicate", Scene::duplicate(self, object, position, rotation))
    }

    fn destroy(&mut self, object: ObjectId) {
        if let Some(count) = log_failure("destroy", Scene::destroy(self, object)) {
            log::debug!("Destroyed {} object(s) under {:?}", count, object);
        }
    }

    fn ensure_dynamic_body(&mut self, object: ObjectId) {
        if let Some(o) = self.get_mut(object) {
            o.body.get_or_insert_with(RigidBody::default).kinematic = false;
        }
    }
}
