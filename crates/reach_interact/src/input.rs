//! Controller identity, poses and trigger edge detection

use crate::config::InteractionConfig;
use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction a pose points along in its local frame
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Controller hand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Both hands, in the order they are processed each frame
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];

    /// The opposite hand
    pub fn other(self) -> Hand {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }

    /// Stable array index (left = 0, right = 1)
    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Left => write!(f, "left"),
            Hand::Right => write!(f, "right"),
        }
    }
}

/// Controller pose sampled once per frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControllerPose {
    /// World position
    pub position: Vec3,
    /// World pointing direction (need not be normalized)
    pub forward: Vec3,
}

impl Default for ControllerPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: FORWARD,
        }
    }
}

impl ControllerPose {
    /// Create a new pose
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Normalized ray direction, or `None` for a degenerate forward vector
    pub fn direction(&self) -> Option<Vec3> {
        self.forward.try_normalize()
    }

    /// Orientation whose forward axis matches this pose
    pub fn orientation(&self) -> Quat {
        look_rotation(self.forward, Vec3::Y)
    }

    /// Point `distance` units in front of the pose
    pub fn point_ahead(&self, distance: f32) -> Vec3 {
        self.position + self.forward.normalize_or_zero() * distance
    }
}

/// Rotation that points [`FORWARD`] along `direction`, keeping `up` as close to up as possible
pub fn look_rotation(direction: Vec3, up: Vec3) -> Quat {
    let Some(forward) = direction.try_normalize() else {
        return Quat::IDENTITY;
    };
    let back = -forward;
    match up.cross(back).try_normalize() {
        Some(right) => {
            let true_up = back.cross(right);
            Quat::from_mat3(&Mat3::from_cols(right, true_up, back)).normalize()
        }
        // Looking straight along `up`
        None => Quat::from_rotation_arc(FORWARD, forward),
    }
}

/// Poses of both controllers for one frame; `None` means the controller is unavailable
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FramePoses {
    pub left: Option<ControllerPose>,
    pub right: Option<ControllerPose>,
}

impl FramePoses {
    /// Create poses for both hands
    pub fn new(left: Option<ControllerPose>, right: Option<ControllerPose>) -> Self {
        Self { left, right }
    }

    /// Pose for one hand
    pub fn get(&self, hand: Hand) -> Option<&ControllerPose> {
        match hand {
            Hand::Left => self.left.as_ref(),
            Hand::Right => self.right.as_ref(),
        }
    }

    /// Replace the pose for one hand
    pub fn set(&mut self, hand: Hand, pose: Option<ControllerPose>) {
        match hand {
            Hand::Left => self.left = pose,
            Hand::Right => self.right = pose,
        }
    }
}

/// Edge produced by a trigger crossing its thresholds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEdge {
    Pressed,
    Released,
}

/// Turns an analog trigger value into press/release edges with hysteresis
#[derive(Clone, Debug)]
pub struct TriggerInput {
    press_threshold: f32,
    release_threshold: f32,
    pressed: bool,
    value: f32,
}

impl TriggerInput {
    /// Create a trigger with explicit thresholds (`release <= press`)
    pub fn new(press_threshold: f32, release_threshold: f32) -> Self {
        Self {
            press_threshold,
            release_threshold: release_threshold.min(press_threshold),
            pressed: false,
            value: 0.0,
        }
    }

    /// Create a trigger using the configured thresholds
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.trigger_press_threshold, config.trigger_release_threshold)
    }

    /// Feed the latest sample; returns an edge only on a threshold crossing
    pub fn update(&mut self, value: f32) -> Option<TriggerEdge> {
        self.value = value.clamp(0.0, 1.0);

        if !self.pressed && self.value >= self.press_threshold {
            self.pressed = true;
            Some(TriggerEdge::Pressed)
        } else if self.pressed && self.value < self.release_threshold {
            self.pressed = false;
            Some(TriggerEdge::Released)
        } else {
            None
        }
    }

    /// Whether the trigger is currently held
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Last sampled value
    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Default for TriggerInput {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}
