//! Object scaling tools

use crate::host::SceneEditor;
use crate::input::Hand;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gizmo handle axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }
}

/// Grows an object along the active gizmo axis while a trigger is held
#[derive(Debug, Clone)]
pub struct AxisScaler<O> {
    target: Option<O>,
    active_axis: Option<Axis>,
    scale_speed: f32,
}

impl<O: Copy + fmt::Debug> AxisScaler<O> {
    pub fn new(scale_speed: f32) -> Self {
        Self {
            target: None,
            active_axis: None,
            scale_speed,
        }
    }

    pub fn set_target(&mut self, target: Option<O>) {
        self.target = target;
    }

    pub fn target(&self) -> Option<O> {
        self.target
    }

    /// Select a gizmo handle, or `None` when no handle is grabbed
    pub fn set_active_axis(&mut self, axis: Option<Axis>) {
        self.active_axis = axis;
    }

    pub fn active_axis(&self) -> Option<Axis> {
        self.active_axis
    }

    /// Apply one frame of trigger input; returns the new local scale
    pub fn apply_trigger<H>(&mut self, host: &mut H, value: f32) -> Option<Vec3>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        let target = self.target?;
        let axis = self.active_axis?;
        let scale = host.local_scale(target)? + axis.unit() * value * self.scale_speed;
        host.set_local_scale(target, scale);
        Some(scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaleGrip {
    initial_scale: Vec3,
    initial_hand: Vec3,
}

/// Scales an object by how far the selecting hand moved since the trigger went down
#[derive(Debug, Clone)]
pub struct HandDistanceScaler<O> {
    target: O,
    scaling_axis: Vec3,
    interactor: Option<Hand>,
    grip: Option<ScaleGrip>,
}

impl<O: Copy + fmt::Debug> HandDistanceScaler<O> {
    pub fn new(target: O) -> Self {
        Self {
            target,
            scaling_axis: Vec3::ONE,
            interactor: None,
            grip: None,
        }
    }

    /// Restrict scaling to the given axes (component-wise weights)
    pub fn with_axis(mut self, axis: Vec3) -> Self {
        self.scaling_axis = axis;
        self
    }

    pub fn target(&self) -> O {
        self.target
    }

    pub fn interactor(&self) -> Option<Hand> {
        self.interactor
    }

    pub fn is_scaling(&self) -> bool {
        self.grip.is_some()
    }

    pub fn select_enter(&mut self, hand: Hand) {
        self.interactor = Some(hand);
    }

    /// Only the hand that selected can deselect
    pub fn select_exit(&mut self, hand: Hand) {
        if self.interactor == Some(hand) {
            self.interactor = None;
            self.grip = None;
        }
    }

    /// Start scaling from the current hand position; requires a selecting hand
    pub fn trigger_pressed<H>(&mut self, host: &H, hand_position: Vec3) -> bool
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        if self.interactor.is_none() {
            return false;
        }
        let Some(initial_scale) = host.local_scale(self.target) else {
            log::warn!("Scaling target {:?} is gone", self.target);
            return false;
        };
        self.grip = Some(ScaleGrip {
            initial_scale,
            initial_hand: hand_position,
        });
        true
    }

    pub fn trigger_released(&mut self) {
        self.grip = None;
    }

    /// Follow the hand; returns the applied scale while scaling
    pub fn update<H>(&mut self, host: &mut H, hand_position: Vec3) -> Option<Vec3>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        let grip = self.grip?;
        let moved = hand_position.distance(grip.initial_hand);
        let scale = grip.initial_scale + self.scaling_axis * moved;
        host.set_local_scale(self.target, scale);
        Some(scale)
    }
}
