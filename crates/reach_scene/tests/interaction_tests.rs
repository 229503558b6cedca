//! Coordinator tests against the real scene graph

use glam::{Quat, Vec3};
use reach_interact::prelude::*;
use reach_scene::prelude::*;

const LEFT: Vec3 = Vec3::new(-0.3, 1.0, 0.0);
const RIGHT: Vec3 = Vec3::new(0.3, 1.0, 0.0);

struct Rig {
    scene: Scene,
    coordinator: DualHandCoordinator<ObjectId>,
    poses: FramePoses,
    target: ObjectId,
}

impl Rig {
    fn new() -> Self {
        let mut scene = Scene::new().with_options_menu();
        scene.register_prefab("ScalingGizmos", ObjectDesc::new("Gizmos").with_layer(InteractionLayer::UI));
        let target = scene.spawn(
            &ObjectDesc::interactable("Crate", BoundingShape::unit_cube())
                .with_position(Vec3::new(0.0, 1.0, -3.0))
                .with_materials(vec![MaterialId(7)]),
        );

        Self {
            scene,
            coordinator: DualHandCoordinator::new(InteractionConfig::default()),
            poses: FramePoses::new(
                Some(ControllerPose::new(LEFT, Vec3::NEG_Z)),
                Some(ControllerPose::new(RIGHT, Vec3::NEG_Z)),
            ),
            target,
        }
    }

    fn set_pose(&mut self, hand: Hand, pose: ControllerPose) {
        self.poses.set(hand, Some(pose));
    }

    fn step(&mut self) {
        for hand in Hand::BOTH {
            if let Some(pose) = self.poses.get(hand).copied() {
                self.scene.set_controller_pose(hand, &pose).unwrap();
            }
        }
        self.coordinator.tick(&mut self.scene, &self.poses);
    }

    fn world(&self, id: ObjectId) -> Transform {
        self.scene.world_transform(id).unwrap()
    }

    fn materials(&self, id: ObjectId) -> Vec<MaterialId> {
        self.scene.get(id).unwrap().renderer.as_ref().unwrap().materials.clone()
    }
}

#[test]
fn test_highlight_and_grab_follow_controller() {
    let mut rig = Rig::new();
    let target = rig.target;
    rig.step();

    assert_eq!(rig.coordinator.highlighted(), Some(target));
    assert_eq!(rig.materials(target), vec![MaterialId(7), MaterialId::HIGHLIGHT]);

    rig.coordinator.trigger_pressed(&mut rig.scene, Hand::Right);
    assert_eq!(rig.coordinator.grabbed(), Some(target));
    assert_eq!(rig.scene.get(target).unwrap().parent(), rig.scene.controller(Hand::Right));
    assert_eq!(rig.scene.get(target).unwrap().body, Some(RigidBody { kinematic: true }));

    rig.set_pose(Hand::Right, ControllerPose::new(RIGHT + Vec3::Y * 0.5, Vec3::NEG_Z));
    rig.step();
    assert!(rig.world(target).position.abs_diff_eq(Vec3::new(0.0, 1.5, -3.0), 1e-5));

    rig.coordinator.trigger_released(&mut rig.scene, Hand::Right);
    assert!(!rig.coordinator.is_grabbing());
    assert_eq!(rig.scene.get(target).unwrap().parent(), None);
    assert_eq!(rig.scene.get(target).unwrap().body, Some(RigidBody { kinematic: false }));
    assert!(rig.world(target).position.abs_diff_eq(Vec3::new(0.0, 1.5, -3.0), 1e-5));
}

#[test]
fn test_one_handed_grab_keeps_rotation() {
    let mut rig = Rig::new();
    let target = rig.target;
    rig.step();
    rig.coordinator.trigger_pressed(&mut rig.scene, Hand::Right);

    let twisted = Quat::from_rotation_y(0.3) * Vec3::NEG_Z;
    rig.set_pose(Hand::Right, ControllerPose::new(RIGHT, twisted));
    rig.step();

    assert!(rig.world(target).rotation.abs_diff_eq(Quat::IDENTITY, 1e-5));
    assert!(rig.coordinator.is_grabbing());
}

#[test]
fn test_two_handed_grab_lets_object_turn() {
    let mut rig = Rig::new();
    let target = rig.target;
    rig.step();

    rig.coordinator.trigger_pressed(&mut rig.scene, Hand::Right);
    rig.coordinator.trigger_pressed(&mut rig.scene, Hand::Left);
    // Two-hand hold is not an options request
    assert!(rig.scene.take_options_requests().is_empty());

    let turn = Quat::from_rotation_y(0.1);
    rig.set_pose(Hand::Right, ControllerPose::new(RIGHT, turn * Vec3::NEG_Z));
    rig.step();

    assert!(rig.coordinator.is_rotation_unlocked());
    assert!(rig.world(target).rotation.abs_diff_eq(turn, 1e-5));

    rig.coordinator.trigger_released(&mut rig.scene, Hand::Left);
    assert!(!rig.coordinator.is_grabbing());
    assert_eq!(rig.scene.get(target).unwrap().parent(), None);
}

#[test]
fn test_options_delete_and_forget() {
    let mut rig = Rig::new();
    let target = rig.target;
    let mut options = ObjectOptions::new(InteractionConfig::default());

    rig.set_pose(Hand::Right, ControllerPose::new(RIGHT, Vec3::Z));
    rig.step();
    rig.coordinator.trigger_pressed(&mut rig.scene, Hand::Left);

    let requests = rig.scene.take_options_requests();
    assert_eq!(requests, vec![target]);
    options.show_options_menu(requests[0]);

    let placement = options.placement(&rig.scene, Vec3::new(0.0, 1.6, 0.0)).unwrap();
    assert!(placement.position.abs_diff_eq(Vec3::new(0.0, 1.5, -3.0), 1e-5));

    assert_eq!(
        options.apply(&mut rig.scene, OptionAction::Delete),
        ActionOutcome::Deleted { object: target }
    );
    rig.coordinator.forget(target);
    rig.coordinator.trigger_released(&mut rig.scene, Hand::Left);
    rig.step();

    assert!(!rig.scene.contains(target));
    assert_eq!(rig.coordinator.highlighted(), None);
    assert_eq!(rig.coordinator.hit(Hand::Left), None);
}

#[test]
fn test_scale_option_parents_gizmo_to_target() {
    let mut rig = Rig::new();
    let target = rig.target;
    let mut options = ObjectOptions::new(InteractionConfig::default());
    options.show_options_menu(target);

    let ActionOutcome::ScalingEnabled { gizmo: Some(gizmo), .. } = options.apply(&mut rig.scene, OptionAction::Scale)
    else {
        panic!("gizmo prefab should spawn");
    };
    assert_eq!(rig.scene.get(gizmo).unwrap().parent(), Some(target));

    options.scaler_mut().set_active_axis(Some(Axis::X));
    options.trigger_value(&mut rig.scene, 1.0);
    assert!(rig.scene.get(target).unwrap().local.scale.abs_diff_eq(Vec3::new(1.01, 1.0, 1.0), 1e-6));

    // Deleting the target takes the gizmo with it
    options.apply(&mut rig.scene, OptionAction::Delete);
    assert!(!rig.scene.contains(gizmo));
}

#[test]
fn test_right_ray_wins_highlight_in_scene() {
    let mut rig = Rig::new();
    let other = rig.scene.spawn(
        &ObjectDesc::interactable("Barrel", BoundingShape::Sphere { radius: 0.4 })
            .with_position(Vec3::new(2.0, 1.0, -3.0)),
    );

    let toward_other = Vec3::new(2.0, 1.0, -3.0) - RIGHT;
    rig.set_pose(Hand::Right, ControllerPose::new(RIGHT, toward_other));
    rig.step();

    assert_eq!(rig.coordinator.hit(Hand::Left), Some(rig.target));
    assert_eq!(rig.coordinator.hit(Hand::Right), Some(other));
    assert_eq!(rig.coordinator.highlighted(), Some(other));
    assert_eq!(rig.materials(rig.target), vec![MaterialId(7)]);
}

#[test]
fn test_duplicate_of_highlighted_object_is_plain() {
    let mut rig = Rig::new();
    let target = rig.target;
    rig.step();
    assert_eq!(rig.coordinator.highlighted(), Some(target));

    let copy = rig
        .scene
        .duplicate(target, Vec3::new(3.0, 1.0, -3.0), Quat::IDENTITY)
        .unwrap();
    assert_eq!(rig.materials(copy), vec![MaterialId(7)]);
    assert_eq!(rig.materials(target), vec![MaterialId(7), MaterialId::HIGHLIGHT]);

    // Both rays leave: nothing may keep glowing
    rig.set_pose(Hand::Left, ControllerPose::new(LEFT, Vec3::Z));
    rig.set_pose(Hand::Right, ControllerPose::new(RIGHT, Vec3::Z));
    rig.step();
    assert_eq!(rig.coordinator.highlighted(), None);
    let glowing = rig
        .scene
        .iter()
        .filter(|(_, o)| {
            o.renderer
                .as_ref()
                .is_some_and(|r| r.materials.contains(&MaterialId::HIGHLIGHT))
        })
        .count();
    assert_eq!(glowing, 0);
}

#[test]
fn test_duplicate_of_grabbed_object_is_dynamic() {
    let mut rig = Rig::new();
    let target = rig.target;
    rig.step();
    rig.coordinator.trigger_pressed(&mut rig.scene, Hand::Right);
    assert!(rig.scene.is_held(target));

    let copy = rig
        .scene
        .duplicate(target, Vec3::new(3.0, 1.0, -3.0), Quat::IDENTITY)
        .unwrap();
    let copied = rig.scene.get(copy).unwrap();
    assert_eq!(copied.body, Some(RigidBody { kinematic: false }));
    assert_eq!(copied.parent(), None);
    assert!(!rig.scene.is_held(copy));
    assert_eq!(rig.scene.get(target).unwrap().body, Some(RigidBody { kinematic: true }));
}
