//! Reach Interact - Two-Handed VR Object Interaction
//!
//! Coordinates a left and a right controller pointing into a scene. Each
//! frame both controllers cast a ray; the object under a ray is highlighted,
//! the right trigger grabs it, the left trigger asks for its options menu.
//!
//! # Features
//!
//! - Exclusive highlight shared by both hands (right hand wins)
//! - Right-hand grab with a rotation lock that two-handed holds release
//! - Options menu requests from the left hand
//! - Options actions: scale gizmos, rotate, delete, duplicate
//! - Axis and hand-distance scaling, panel navigation, spawn menu
//!
//! # Architecture
//!
//! ```text
//!   FramePoses ──► DualHandCoordinator ──► InteractionEvent channel
//!                   │        │
//!            HighlightSlot  GrabState
//!                   │        │
//!                   ▼        ▼
//!        InteractionHost / SceneEditor (implemented by the scene)
//! ```
//!
//! The coordinator never owns scene objects. Hosts expose objects through
//! an opaque `Copy` handle and optional per-object capabilities.
//!
//! # Example
//!
//! ```ignore
//! use reach_interact::prelude::*;
//!
//! let mut coordinator = DualHandCoordinator::new(InteractionConfig::default());
//!
//! // Every frame
//! coordinator.tick(&mut scene, &poses);
//!
//! // On trigger edges
//! coordinator.trigger_pressed(&mut scene, Hand::Right);
//! coordinator.trigger_released(&mut scene, Hand::Right);
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod grab;
pub mod highlight;
pub mod host;
pub mod input;
pub mod layers;
pub mod menu;
pub mod options;
pub mod scaling;

#[cfg(test)]
mod testing;

pub mod prelude {
    //! Common imports for interaction functionality
    pub use crate::config::InteractionConfig;
    pub use crate::coordinator::{DualHandCoordinator, HandState};
    pub use crate::error::{InteractionError, Result};
    pub use crate::events::{event_channel, EventReceiver, EventSender, InteractionEvent};
    pub use crate::grab::GrabState;
    pub use crate::highlight::HighlightSlot;
    pub use crate::host::{
        AppearanceSnapshot, HasAppearanceOverride, HasKinematicToggle, InteractionHost, MaterialId,
        SceneEditor, ShowsOptionsMenu,
    };
    pub use crate::input::{look_rotation, ControllerPose, FramePoses, Hand, TriggerEdge, TriggerInput, FORWARD};
    pub use crate::layers::{InteractionLayer, LayerMask};
    pub use crate::menu::{PanelNavigator, SpawnMenu};
    pub use crate::options::{ActionOutcome, MenuPlacement, ObjectOptions, OptionAction};
    pub use crate::scaling::{Axis, AxisScaler, HandDistanceScaler};
}

pub use prelude::*;
