//! Grab state machine

use crate::host::InteractionHost;
use crate::input::Hand;
use glam::Quat;

/// Grab lifecycle: `Idle -> Grabbed` on a grab, `Grabbed -> Idle` on release
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrabState<O> {
    Idle,
    Grabbed {
        object: O,
        /// World rotation when the grab started
        start_rotation: Quat,
    },
}

impl<O> Default for GrabState<O> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<O: Copy + Eq + std::fmt::Debug> GrabState<O> {
    pub fn is_grabbing(&self) -> bool {
        matches!(self, Self::Grabbed { .. })
    }

    /// The grabbed object
    pub fn object(&self) -> Option<O> {
        match self {
            Self::Grabbed { object, .. } => Some(*object),
            Self::Idle => None,
        }
    }

    /// Rotation captured at grab start
    pub fn start_rotation(&self) -> Option<Quat> {
        match self {
            Self::Grabbed { start_rotation, .. } => Some(*start_rotation),
            Self::Idle => None,
        }
    }

    /// Start grabbing `object` with `hand`
    ///
    /// Suspends the object's simulation and parents it to the controller.
    /// Returns the captured rotation, or `None` if already grabbing or the
    /// host no longer knows the object.
    pub fn begin<H>(&mut self, host: &mut H, object: O, hand: Hand) -> Option<Quat>
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        if self.is_grabbing() {
            return None;
        }

        let Some(start_rotation) = host.rotation(object) else {
            log::warn!("Cannot grab {:?}: host has no transform for it", object);
            return None;
        };

        if let Some(body) = host.body_mut(object) {
            body.set_kinematic(true);
        }
        host.attach_to_controller(object, hand);

        *self = Self::Grabbed {
            object,
            start_rotation,
        };
        Some(start_rotation)
    }

    /// Drop the grabbed object, restoring simulation and detaching it
    pub fn end<H>(&mut self, host: &mut H) -> Option<O>
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        let object = self.object()?;

        if let Some(body) = host.body_mut(object) {
            body.set_kinematic(false);
        }
        host.detach(object);

        *self = Self::Idle;
        Some(object)
    }

    /// Drop bookkeeping for an object that no longer exists
    pub fn forget(&mut self, object: O) -> bool {
        if self.object() == Some(object) {
            *self = Self::Idle;
            true
        } else {
            false
        }
    }
}
