//! In-memory host used by the unit tests

use crate::host::{
    AppearanceSnapshot, HasAppearanceOverride, HasKinematicToggle, InteractionHost, MaterialId,
    SceneEditor, ShowsOptionsMenu,
};
use crate::input::{ControllerPose, FramePoses, Hand};
use crate::layers::LayerMask;
use glam::{Quat, Vec3};
use std::cell::RefCell;
use std::collections::HashMap;

pub(crate) const LEFT_ORIGIN: Vec3 = Vec3::new(-1.0, 1.0, 0.0);
pub(crate) const RIGHT_ORIGIN: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub(crate) const BASE_MATERIAL: MaterialId = MaterialId(10);

/// Both controllers pointing forward from their fixed origins
pub(crate) fn both_poses() -> FramePoses {
    FramePoses::new(
        Some(ControllerPose::new(LEFT_ORIGIN, Vec3::NEG_Z)),
        Some(ControllerPose::new(RIGHT_ORIGIN, Vec3::NEG_Z)),
    )
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockRenderer {
    pub materials: Vec<MaterialId>,
}

impl HasAppearanceOverride for MockRenderer {
    fn apply_override(&mut self, highlight: MaterialId) -> AppearanceSnapshot {
        let snapshot = AppearanceSnapshot::new(self.materials.clone());
        self.materials.push(highlight);
        snapshot
    }

    fn restore(&mut self, snapshot: AppearanceSnapshot) {
        self.materials = snapshot.into_materials();
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockBody {
    pub kinematic: bool,
}

impl HasKinematicToggle for MockBody {
    fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockParent {
    Controller(Hand),
    Object(u32),
}

#[derive(Debug, Clone)]
pub(crate) struct MockObject {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub parent: Option<MockParent>,
    pub renderer: Option<MockRenderer>,
    pub body: Option<MockBody>,
}

impl Default for MockObject {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
            renderer: Some(MockRenderer {
                materials: vec![BASE_MATERIAL],
            }),
            body: Some(MockBody::default()),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MenuRecorder {
    pub shown: Vec<u32>,
}

impl ShowsOptionsMenu<u32> for MenuRecorder {
    fn show_options_menu(&mut self, target: u32) {
        self.shown.push(target);
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockHost {
    pub objects: HashMap<u32, MockObject>,
    pub aims: Vec<(Vec3, u32)>,
    pub queries: RefCell<Vec<(f32, LayerMask)>>,
    pub menu: Option<MenuRecorder>,
    pub prefabs: Vec<String>,
    next_id: u32,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            ..Default::default()
        }
    }

    pub fn with_menu(mut self) -> Self {
        self.menu = Some(MenuRecorder::default());
        self
    }

    pub fn add(&mut self, id: u32) -> &mut MockObject {
        self.objects.entry(id).or_default()
    }

    /// Make rays from `origin` hit `object` (or nothing)
    pub fn aim(&mut self, origin: Vec3, object: Option<u32>) {
        self.aims.retain(|(o, _)| *o != origin);
        if let Some(object) = object {
            self.aims.push((origin, object));
        }
    }

    pub fn aim_both(&mut self, left: Option<u32>, right: Option<u32>) {
        self.aim(LEFT_ORIGIN, left);
        self.aim(RIGHT_ORIGIN, right);
    }

    pub fn object(&self, id: u32) -> &MockObject {
        &self.objects[&id]
    }

    pub fn materials(&self, id: u32) -> Vec<MaterialId> {
        self.objects[&id]
            .renderer
            .as_ref()
            .map(|r| r.materials.clone())
            .unwrap_or_default()
    }

    pub fn is_highlighted(&self, id: u32, highlight: MaterialId) -> bool {
        self.materials(id).contains(&highlight)
    }

    pub fn shown_menus(&self) -> &[u32] {
        self.menu.as_ref().map(|m| m.shown.as_slice()).unwrap_or(&[])
    }

    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl InteractionHost for MockHost {
    type Object = u32;

    fn raycast(&self, origin: Vec3, _direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<u32> {
        self.queries.borrow_mut().push((max_distance, layers));
        self.aims
            .iter()
            .find(|(o, _)| *o == origin)
            .map(|(_, object)| *object)
            .filter(|object| self.objects.contains_key(object))
    }

    fn rotation(&self, object: u32) -> Option<Quat> {
        self.objects.get(&object).map(|o| o.rotation)
    }

    fn set_rotation(&mut self, object: u32, rotation: Quat) {
        if let Some(o) = self.objects.get_mut(&object) {
            o.rotation = rotation;
        }
    }

    fn attach_to_controller(&mut self, object: u32, hand: Hand) {
        if let Some(o) = self.objects.get_mut(&object) {
            o.parent = Some(MockParent::Controller(hand));
        }
    }

    fn detach(&mut self, object: u32) {
        if let Some(o) = self.objects.get_mut(&object) {
            o.parent = None;
        }
    }

    fn appearance_mut(&mut self, object: u32) -> Option<&mut dyn HasAppearanceOverride> {
        self.objects
            .get_mut(&object)?
            .renderer
            .as_mut()
            .map(|r| r as &mut dyn HasAppearanceOverride)
    }

    fn body_mut(&mut self, object: u32) -> Option<&mut dyn HasKinematicToggle> {
        self.objects
            .get_mut(&object)?
            .body
            .as_mut()
            .map(|b| b as &mut dyn HasKinematicToggle)
    }

    fn options_menu(&mut self) -> Option<&mut dyn ShowsOptionsMenu<u32>> {
        self.menu.as_mut().map(|m| m as &mut dyn ShowsOptionsMenu<u32>)
    }
}

impl SceneEditor for MockHost {
    fn position(&self, object: u32) -> Option<Vec3> {
        self.objects.get(&object).map(|o| o.position)
    }

    fn local_scale(&self, object: u32) -> Option<Vec3> {
        self.objects.get(&object).map(|o| o.scale)
    }

    fn set_local_scale(&mut self, object: u32, scale: Vec3) {
        if let Some(o) = self.objects.get_mut(&object) {
            o.scale = scale;
        }
    }

    fn set_parent(&mut self, child: u32, parent: Option<u32>) {
        if let Some(o) = self.objects.get_mut(&child) {
            o.parent = parent.map(MockParent::Object);
        }
    }

    fn instantiate(&mut self, prefab: &str, position: Vec3, rotation: Quat) -> Option<u32> {
        if !self.prefabs.iter().any(|p| p == prefab) {
            return None;
        }
        let id = self.allocate();
        self.objects.insert(
            id,
            MockObject {
                position,
                rotation,
                ..Default::default()
            },
        );
        Some(id)
    }

    fn duplicate(&mut self, object: u32, position: Vec3, rotation: Quat) -> Option<u32> {
        let mut copy = self.objects.get(&object)?.clone();
        copy.position = position;
        copy.rotation = rotation;
        copy.parent = None;
        let id = self.allocate();
        self.objects.insert(id, copy);
        Some(id)
    }

    fn destroy(&mut self, object: u32) {
        self.objects.remove(&object);
        self.objects
            .retain(|_, o| o.parent != Some(MockParent::Object(object)));
    }

    fn ensure_dynamic_body(&mut self, object: u32) {
        if let Some(o) = self.objects.get_mut(&object) {
            o.body.get_or_insert_with(MockBody::default).kinematic = false;
        }
    }
}
