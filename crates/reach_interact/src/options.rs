//! Per-object options menu: scale, rotate, delete, duplicate

use crate::config::InteractionConfig;
use crate::host::{SceneEditor, ShowsOptionsMenu};
use crate::input::look_rotation;
use crate::scaling::AxisScaler;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Buttons on the options menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionAction {
    Scale,
    Rotate,
    Delete,
    Duplicate,
}

impl fmt::Display for OptionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale => write!(f, "scale"),
            Self::Rotate => write!(f, "rotate"),
            Self::Delete => write!(f, "delete"),
            Self::Duplicate => write!(f, "duplicate"),
        }
    }
}

impl FromStr for OptionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scale" => Ok(Self::Scale),
            "rotate" => Ok(Self::Rotate),
            "delete" | "remove" => Ok(Self::Delete),
            "duplicate" | "copy" => Ok(Self::Duplicate),
            _ => Err(format!("Unknown option: {}", s)),
        }
    }
}

/// Where the menu panel should be shown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPlacement {
    pub position: Vec3,
    /// Faces the viewer
    pub rotation: Quat,
}

/// What an option did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome<O> {
    /// Scaling gizmos are active on the object
    ScalingEnabled { object: O, gizmo: Option<O> },
    /// The object turned to a new world rotation
    Rotated { object: O, rotation: Quat },
    /// The object was destroyed; callers must forget it
    Deleted { object: O },
    /// A copy was created
    Duplicated { original: O, copy: O },
    /// No target, or the host refused
    Ignored,
}

/// Options menu state for the currently selected object
#[derive(Debug, Clone)]
pub struct ObjectOptions<O> {
    config: InteractionConfig,
    target: Option<O>,
    visible: bool,
    gizmos_active: bool,
    gizmo: Option<O>,
    scaler: AxisScaler<O>,
}

impl<O> ObjectOptions<O>
where
    O: Copy + Eq + fmt::Debug,
{
    pub fn new(config: InteractionConfig) -> Self {
        let scaler = AxisScaler::new(config.scale_speed);
        Self {
            config,
            target: None,
            visible: false,
            gizmos_active: false,
            gizmo: None,
            scaler,
        }
    }

    /// Object the menu acts on
    pub fn target(&self) -> Option<O> {
        self.target
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether trigger input currently drives the gizmo scaler
    pub fn gizmos_active(&self) -> bool {
        self.gizmos_active
    }

    /// Spawned gizmo object
    pub fn gizmo(&self) -> Option<O> {
        self.gizmo
    }

    pub fn scaler(&self) -> &AxisScaler<O> {
        &self.scaler
    }

    pub fn scaler_mut(&mut self) -> &mut AxisScaler<O> {
        &mut self.scaler
    }

    /// Select `target` and show the menu
    pub fn show(&mut self, target: O) {
        self.target = Some(target);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Menu pose: above the target, turned towards the viewer
    pub fn placement<H>(&self, host: &H, viewer: Vec3) -> Option<MenuPlacement>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        let target = self.target?;
        let position = host.position(target)? + Vec3::Y * self.config.options_menu_offset;
        Some(MenuPlacement {
            position,
            rotation: look_rotation(viewer - position, Vec3::Y),
        })
    }

    /// Run a menu button against the current target
    pub fn apply<H>(&mut self, host: &mut H, action: OptionAction) -> ActionOutcome<O>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        let Some(target) = self.target else {
            log::debug!("Option {} pressed with no target", action);
            return ActionOutcome::Ignored;
        };

        match action {
            OptionAction::Scale => self.enable_scaling(host, target),
            OptionAction::Rotate => self.rotate(host, target),
            OptionAction::Delete => self.delete(host, target),
            OptionAction::Duplicate => self.duplicate(host, target),
        }
    }

    /// Trigger input while the menu is up; drives the gizmo scaler when active
    pub fn trigger_value<H>(&mut self, host: &mut H, value: f32) -> Option<Vec3>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        if !self.gizmos_active {
            return None;
        }
        self.scaler.apply_trigger(host, value)
    }

    /// Drop references to an object destroyed elsewhere
    pub fn forget(&mut self, object: O) {
        if self.target == Some(object) {
            self.target = None;
            self.visible = false;
            self.gizmos_active = false;
            self.gizmo = None;
            self.scaler.set_target(None);
        }
        if self.gizmo == Some(object) {
            self.gizmo = None;
        }
    }

    fn enable_scaling<H>(&mut self, host: &mut H, target: O) -> ActionOutcome<O>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        self.gizmos_active = true;
        self.visible = false;

        if let Some(old) = self.gizmo.take() {
            host.destroy(old);
        }

        if let (Some(prefab), Some(position)) = (&self.config.gizmo_prefab, host.position(target)) {
            match host.instantiate(prefab, position, Quat::IDENTITY) {
                Some(gizmo) => {
                    host.set_parent(gizmo, Some(target));
                    self.gizmo = Some(gizmo);
                }
                None => log::warn!("Gizmo prefab '{}' could not be instantiated", prefab),
            }
        }

        self.scaler.set_target(Some(target));
        log::info!("Scaling gizmos enabled on {:?}", target);
        ActionOutcome::ScalingEnabled {
            object: target,
            gizmo: self.gizmo,
        }
    }

    fn rotate<H>(&mut self, host: &mut H, target: O) -> ActionOutcome<O>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        let Some(current) = host.rotation(target) else {
            return ActionOutcome::Ignored;
        };
        // Turn about the object's own up axis
        let step = Quat::from_axis_angle(Vec3::Y, self.config.rotate_step_degrees.to_radians());
        let rotation = (current * step).normalize();
        host.set_rotation(target, rotation);
        ActionOutcome::Rotated {
            object: target,
            rotation,
        }
    }

    fn delete<H>(&mut self, host: &mut H, target: O) -> ActionOutcome<O>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        host.destroy(target);
        log::info!("Deleted {:?}", target);
        self.forget(target);
        ActionOutcome::Deleted { object: target }
    }

    fn duplicate<H>(&mut self, host: &mut H, target: O) -> ActionOutcome<O>
    where
        H: SceneEditor<Object = O> + ?Sized,
    {
        let (Some(position), Some(rotation)) = (host.position(target), host.rotation(target)) else {
            return ActionOutcome::Ignored;
        };
        let offset = Vec3::Y * self.config.duplicate_offset;

        match host.duplicate(target, position + offset, rotation) {
            Some(copy) => {
                log::info!("Duplicated {:?} as {:?}", target, copy);
                ActionOutcome::Duplicated {
                    original: target,
                    copy,
                }
            }
            None => ActionOutcome::Ignored,
        }
    }
}

impl<O> ShowsOptionsMenu<O> for ObjectOptions<O>
where
    O: Copy + Eq + fmt::Debug,
{
    fn show_options_menu(&mut self, target: O) {
        self.show(target);
    }
}
