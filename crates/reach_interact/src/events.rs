//! Interaction events

use crate::input::Hand;
use crossbeam_channel::{Receiver, Sender};
use glam::Quat;

/// Something the coordinator decided this frame
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent<O> {
    /// The shared highlight moved
    HighlightChanged {
        previous: Option<O>,
        current: Option<O>,
    },
    /// An object was attached to the right controller
    GrabStarted {
        object: O,
        /// Rotation captured at grab start (the rotation lock target)
        rotation: Quat,
    },
    /// The grabbed object was dropped
    GrabEnded { object: O, released_by: Hand },
    /// The options menu was requested for an object
    OptionsRequested { object: O },
}

impl<O> InteractionEvent<O> {
    /// The object the event is about (the new one for highlight changes)
    pub fn object(&self) -> Option<&O> {
        match self {
            Self::HighlightChanged { current, .. } => current.as_ref(),
            Self::GrabStarted { object, .. }
            | Self::GrabEnded { object, .. }
            | Self::OptionsRequested { object } => Some(object),
        }
    }

    /// Check if this is a grab start
    pub fn is_grab_started(&self) -> bool {
        matches!(self, Self::GrabStarted { .. })
    }

    /// Check if this is a grab end
    pub fn is_grab_ended(&self) -> bool {
        matches!(self, Self::GrabEnded { .. })
    }
}

/// Sending half handed to the coordinator
pub type EventSender<O> = Sender<InteractionEvent<O>>;

/// Receiving half drained by the application
pub type EventReceiver<O> = Receiver<InteractionEvent<O>>;

/// Create an unbounded event channel
pub fn event_channel<O>() -> (EventSender<O>, EventReceiver<O>) {
    crossbeam_channel::unbounded()
}
