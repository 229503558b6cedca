//! Interaction configuration

use crate::error::{InteractionError, Result};
use crate::host::MaterialId;
use crate::layers::{InteractionLayer, LayerMask};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables shared by the coordinator and the editing tools
///
/// ```toml
/// max_ray_distance = 10.0
/// interactable_layers = 8      # bit mask, layer 3
/// highlight_material = 1
/// trigger_press_threshold = 0.8
/// trigger_release_threshold = 0.6
/// rotate_step_degrees = 45.0
/// gizmo_prefab = "ScalingGizmos"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum controller ray length
    pub max_ray_distance: f32,

    /// Layers the controller rays can hit
    pub interactable_layers: LayerMask,

    /// Material appended to a highlighted object; `None` disables the visual
    pub highlight_material: Option<MaterialId>,

    /// Analog value at which a trigger counts as pressed
    pub trigger_press_threshold: f32,

    /// Analog value under which a held trigger counts as released
    pub trigger_release_threshold: f32,

    /// Height of the options menu above its target
    pub options_menu_offset: f32,

    /// Rotation applied by the "rotate" option
    pub rotate_step_degrees: f32,

    /// Height above the source object at which duplicates appear
    pub duplicate_offset: f32,

    /// Scale change per unit of trigger input on the active gizmo axis
    pub scale_speed: f32,

    /// Distance in front of the viewer at which spawned objects appear
    pub spawn_distance: f32,

    /// Prefab instantiated as scaling gizmos; `None` disables gizmo spawning
    pub gizmo_prefab: Option<String>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            max_ray_distance: 10.0,
            interactable_layers: InteractionLayer::INTERACTABLE.as_mask(),
            highlight_material: Some(MaterialId::HIGHLIGHT),
            trigger_press_threshold: 0.8,
            trigger_release_threshold: 0.6,
            options_menu_offset: 0.5,
            rotate_step_degrees: 45.0,
            duplicate_offset: 2.0,
            scale_speed: 0.01,
            spawn_distance: 3.0,
            gizmo_prefab: Some("ScalingGizmos".to_string()),
        }
    }
}

impl InteractionConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InteractionError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded interaction config from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.max_ray_distance > 0.0) {
            return Err(InteractionError::InvalidConfig(format!(
                "max_ray_distance must be positive, got {}",
                self.max_ray_distance
            )));
        }

        for (name, value) in [
            ("trigger_press_threshold", self.trigger_press_threshold),
            ("trigger_release_threshold", self.trigger_release_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InteractionError::InvalidConfig(format!(
                    "{name} must be within 0..=1, got {value}"
                )));
            }
        }

        if self.trigger_release_threshold > self.trigger_press_threshold {
            return Err(InteractionError::InvalidConfig(format!(
                "trigger_release_threshold ({}) exceeds trigger_press_threshold ({})",
                self.trigger_release_threshold, self.trigger_press_threshold
            )));
        }

        if self.scale_speed < 0.0 {
            return Err(InteractionError::InvalidConfig(format!(
                "scale_speed must not be negative, got {}",
                self.scale_speed
            )));
        }

        Ok(())
    }

    /// Set ray length
    pub fn with_max_ray_distance(mut self, distance: f32) -> Self {
        self.max_ray_distance = distance;
        self
    }

    /// Set the layers rays can hit
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.interactable_layers = layers;
        self
    }

    /// Set or disable the highlight material
    pub fn with_highlight_material(mut self, material: Option<MaterialId>) -> Self {
        self.highlight_material = material;
        self
    }

    /// Set trigger thresholds
    pub fn with_trigger_thresholds(mut self, press: f32, release: f32) -> Self {
        self.trigger_press_threshold = press;
        self.trigger_release_threshold = release;
        self
    }

    /// Set or disable the gizmo prefab
    pub fn with_gizmo_prefab(mut self, prefab: Option<&str>) -> Self {
        self.gizmo_prefab = prefab.map(str::to_string);
        self
    }
}
