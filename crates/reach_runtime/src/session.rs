//! Session files - declarative scene plus recorded controller frames
//!
//! ```toml
//! [viewer]
//! position = [0.0, 1.6, 0.0]
//! forward = [0.0, 0.0, -1.0]
//!
//! [menu]
//! home = "Home"
//! panels = ["Home", "Objects"]
//! catalogue = ["Cube"]
//!
//! [[prefabs]]
//! name = "Cube"
//! shape = { type = "cuboid", half_extents = [0.25, 0.25, 0.25] }
//!
//! [[objects]]
//! name = "Crate"
//! position = [0.0, 1.0, -3.0]
//! rotation = [0.0, 30.0, 0.0]  # euler degrees
//! shape = { type = "cuboid", half_extents = [0.5, 0.5, 0.5] }
//! materials = [7]
//!
//! [[frames]]
//! repeat = 10
//! left = { position = [-0.3, 1.0, 0.0], forward = [0.0, 0.0, -1.0] }
//! right = { position = [0.3, 1.0, 0.0], forward = [0.0, 0.0, -1.0], trigger = 1.0 }
//! ```

use crate::error::{Result, RuntimeError};
use glam::{EulerRot, Quat, Vec3};
use reach_interact::{Axis, ControllerPose, InteractionLayer, MaterialId, OptionAction};
use reach_scene::{BoundingShape, ObjectDesc, RigidBody, Transform};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session replayed when no file is given
pub const DEMO_SESSION: &str = r#"
[viewer]
position = [0.0, 1.6, 0.5]
forward = [0.0, 0.0, -1.0]

[menu]
home = "Home"
panels = ["Home", "Objects", "Settings"]
catalogue = ["Cube"]

[[prefabs]]
name = "Cube"
shape = { type = "cuboid", half_extents = [0.25, 0.25, 0.25] }
materials = [3]

[[prefabs]]
name = "ScalingGizmos"
layer = 5
body = false

[[objects]]
name = "Crate"
position = [0.0, 1.0, -3.0]
shape = { type = "cuboid", half_extents = [0.5, 0.5, 0.5] }
materials = [7]

[[objects]]
name = "Ball"
position = [2.0, 1.0, -3.0]
shape = { type = "sphere", radius = 0.4 }
materials = [8]

# Both hands point at the crate
[[frames]]
repeat = 3
left = { position = [-0.3, 1.0, 0.0], forward = [0.0, 0.0, -1.0] }
right = { position = [0.3, 1.0, 0.0], forward = [0.0, 0.0, -1.0] }

# Right grab, then twist: the crate keeps its rotation
[[frames]]
left = { position = [-0.3, 1.0, 0.0], forward = [0.0, 0.0, -1.0] }
right = { position = [0.3, 1.0, 0.0], forward = [0.0, 0.0, -1.0], trigger = 1.0 }

[[frames]]
repeat = 5
left = { position = [-0.3, 1.0, 0.0], forward = [0.0, 0.0, -1.0] }
right = { position = [0.3, 1.2, 0.0], forward = [-0.2, 0.0, -1.0], trigger = 1.0 }

# Let go
[[frames]]
left = { position = [-0.3, 1.0, 0.0], forward = [0.0, 0.0, -1.0] }
right = { position = [0.3, 1.2, 0.0], forward = [0.0, 0.0, -1.0], trigger = 0.0 }

# Left trigger on the ball opens its options, then duplicate it
[[frames]]
left = { position = [-0.3, 1.0, 0.0], forward = [2.3, 0.0, -3.0], trigger = 1.0 }
right = { position = [0.3, 1.0, 0.0], forward = [0.0, 1.0, 0.0] }

[[frames]]
left = { position = [-0.3, 1.0, 0.0], forward = [2.3, 0.0, -3.0], trigger = 0.0 }
right = { position = [0.3, 1.0, 0.0], forward = [0.0, 1.0, 0.0] }
option = "duplicate"

# Spawn a cube from the menu
[[frames]]
primary = true
spawn = "Cube"
panel = { open = "Objects" }

[[frames]]
panel = "back"
"#;

/// Uniform or per-axis scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleDef {
    Uniform(f32),
    PerAxis(Vec3),
}

impl ScaleDef {
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Self::Uniform(s) => Vec3::splat(s),
            Self::PerAxis(v) => v,
        }
    }
}

impl Default for ScaleDef {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

fn default_layer() -> InteractionLayer {
    InteractionLayer::INTERACTABLE
}

fn default_true() -> bool {
    true
}

fn default_repeat() -> u32 {
    1
}

/// Object or prefab definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in degrees, applied Z, X, then Y
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default)]
    pub scale: ScaleDef,
    #[serde(default = "default_layer")]
    pub layer: InteractionLayer,
    #[serde(default)]
    pub shape: Option<BoundingShape>,
    #[serde(default)]
    pub materials: Option<Vec<MaterialId>>,
    /// Give the object a rigid body
    #[serde(default = "default_true")]
    pub body: bool,
    #[serde(default)]
    pub kinematic: bool,
    #[serde(default)]
    pub children: Vec<ObjectDef>,
}

impl ObjectDef {
    pub fn rotation_quat(&self) -> Quat {
        let r = self.rotation * (std::f32::consts::PI / 180.0);
        Quat::from_euler(EulerRot::YXZ, r.y, r.x, r.z)
    }

    pub fn to_desc(&self) -> ObjectDesc {
        ObjectDesc {
            name: self.name.clone(),
            transform: Transform::new(self.position, self.rotation_quat(), self.scale.to_vec3()),
            layer: self.layer,
            shape: self.shape,
            materials: self.materials.clone(),
            body: self.body.then_some(RigidBody {
                kinematic: self.kinematic,
            }),
            children: self.children.iter().map(ObjectDef::to_desc).collect(),
        }
    }
}

/// Menu setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuDef {
    pub home: String,
    pub panels: Vec<String>,
    /// Prefabs offered by the spawn menu
    pub catalogue: Vec<String>,
}

impl Default for MenuDef {
    fn default() -> Self {
        Self {
            home: "Home".to_string(),
            panels: Vec::new(),
            catalogue: Vec::new(),
        }
    }
}

/// One controller sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerDef {
    pub position: Vec3,
    #[serde(default = "default_forward")]
    pub forward: Vec3,
    /// Analog trigger value; `None` keeps the previous value
    #[serde(default)]
    pub trigger: Option<f32>,
}

fn default_forward() -> Vec3 {
    reach_interact::FORWARD
}

impl ControllerDef {
    pub fn pose(&self) -> ControllerPose {
        ControllerPose::new(self.position, self.forward)
    }
}

/// Panel navigation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelOp {
    Open(String),
    Back,
    Quit,
}

/// Hand-distance scaling step, driven by the left hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StretchOp {
    /// Select the named object for stretching
    Select(String),
    Deselect,
}

/// One recorded frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDef {
    /// Play this frame this many times
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Missing controllers are untracked this frame
    #[serde(default)]
    pub left: Option<ControllerDef>,
    #[serde(default)]
    pub right: Option<ControllerDef>,
    /// Options menu button pressed this frame
    #[serde(default)]
    pub option: Option<OptionAction>,
    /// Gizmo handle held this frame
    #[serde(default)]
    pub gizmo_axis: Option<Axis>,
    /// Primary button state
    #[serde(default)]
    pub primary: bool,
    /// Spawn menu entry picked this frame
    #[serde(default)]
    pub spawn: Option<String>,
    #[serde(default)]
    pub panel: Option<PanelOp>,
    #[serde(default)]
    pub stretch: Option<StretchOp>,
}

/// A complete session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub viewer: ControllerPose,
    pub menu: MenuDef,
    pub prefabs: Vec<ObjectDef>,
    pub objects: Vec<ObjectDef>,
    pub frames: Vec<FrameDef>,
}

impl Session {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let session: Self = toml::from_str(text)?;
        session.validate()?;
        Ok(session)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RuntimeError::SessionIo {
            path: path.display().to_string(),
            source,
        })?;
        let session = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded session {} ({} objects, {} frames)",
            path.display(),
            session.objects.len(),
            session.frame_count()
        );
        Ok(session)
    }

    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_SESSION)
    }

    /// Frames after expanding repeats
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }

    fn validate(&self) -> Result<()> {
        for entry in &self.menu.catalogue {
            if !self.prefabs.iter().any(|p| &p.name == entry) {
                return Err(RuntimeError::InvalidSession(format!(
                    "catalogue entry '{}' has no prefab",
                    entry
                )));
            }
        }
        for (index, frame) in self.frames.iter().enumerate() {
            for controller in [&frame.left, &frame.right].into_iter().flatten() {
                if let Some(trigger) = controller.trigger {
                    if !(0.0..=1.0).contains(&trigger) {
                        return Err(RuntimeError::InvalidSession(format!(
                            "frame {}: trigger value {} outside 0..=1",
                            index, trigger
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_demo_session_parses() {
        let session = Session::demo().unwrap();

        assert_eq!(session.objects.len(), 2);
        assert_eq!(session.menu.catalogue, vec!["Cube".to_string()]);
        assert!(session.frame_count() > session.frames.len() as u64);
        assert_eq!(session.frames.last().unwrap().panel, Some(PanelOp::Back));
    }

    #[test]
    fn test_object_defaults() {
        let session = Session::from_toml_str(
            r#"
            [[objects]]
            name = "Thing"
            "#,
        )
        .unwrap();
        let desc = session.objects[0].to_desc();

        assert_eq!(desc.layer, InteractionLayer::INTERACTABLE);
        assert_eq!(desc.transform, Transform::IDENTITY);
        assert_eq!(desc.body, Some(RigidBody { kinematic: false }));
        assert_eq!(desc.shape, None);
    }

    #[test]
    fn test_rotation_in_degrees() {
        let def = ObjectDef {
            rotation: Vec3::new(0.0, 90.0, 0.0),
            ..Session::from_toml_str("[[objects]]\nname = \"A\"").unwrap().objects[0].clone()
        };
        let forward = def.rotation_quat() * Vec3::NEG_Z;
        assert_relative_eq!(forward.x, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_scale_forms() {
        let session = Session::from_toml_str(
            r#"
            [[objects]]
            name = "Uniform"
            scale = 2.0

            [[objects]]
            name = "Stretched"
            scale = [1.0, 3.0, 1.0]
            "#,
        )
        .unwrap();

        assert_eq!(session.objects[0].scale.to_vec3(), Vec3::splat(2.0));
        assert_eq!(session.objects[1].scale.to_vec3(), Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_catalogue_needs_prefab() {
        let result = Session::from_toml_str(
            r#"
            [menu]
            catalogue = ["Ghost"]
            "#,
        );
        assert!(matches!(result, Err(RuntimeError::InvalidSession(_))));
    }

    #[test]
    fn test_trigger_range_checked() {
        let result = Session::from_toml_str(
            r#"
            [[frames]]
            right = { position = [0.0, 0.0, 0.0], trigger = 1.5 }
            "#,
        );
        assert!(matches!(result, Err(RuntimeError::InvalidSession(_))));
    }

    #[test]
    fn test_frame_ops_parse() {
        let session = Session::from_toml_str(
            r#"
            [[frames]]
            option = "rotate"
            gizmo_axis = "y"
            panel = { open = "Settings" }
            stretch = { select = "Crate" }

            [[frames]]
            stretch = "deselect"
            "#,
        )
        .unwrap();
        let frame = &session.frames[0];

        assert_eq!(frame.repeat, 1);
        assert_eq!(frame.option, Some(OptionAction::Rotate));
        assert_eq!(frame.gizmo_axis, Some(Axis::Y));
        assert_eq!(frame.panel, Some(PanelOp::Open("Settings".into())));
        assert_eq!(frame.stretch, Some(StretchOp::Select("Crate".into())));
        assert!(frame.left.is_none());
        assert_eq!(session.frames[1].stretch, Some(StretchOp::Deselect));
    }
}
