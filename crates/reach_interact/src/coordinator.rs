//! Dual-hand interaction coordinator
//!
//! Consumes both controllers' poses every frame plus trigger press/release
//! edges, and decides three things:
//!
//! - which object carries the (single, shared) highlight
//! - when the right hand grabs and when the grab ends
//! - whether the grabbed object may rotate this frame
//!
//! ```text
//!            right press + right hit
//!   ┌──────┐ ───────────────────────▶ ┌─────────┐
//!   │ Idle │                          │ Grabbed │
//!   └──────┘ ◀─────────────────────── └─────────┘
//!              either trigger release
//! ```
//!
//! Everything runs on the host's frame thread. Trigger handlers see the hits
//! recorded by the most recent [`DualHandCoordinator::tick`].

use crate::config::InteractionConfig;
use crate::events::{EventSender, InteractionEvent};
use crate::grab::GrabState;
use crate::highlight::HighlightSlot;
use crate::host::InteractionHost;
use crate::input::{ControllerPose, FramePoses, Hand};

/// Per-controller state owned by the coordinator
#[derive(Debug, Clone, Copy)]
pub struct HandState<O> {
    /// Trigger currently held
    pub held: bool,
    /// Object hit by this controller's ray on the last tick
    pub hit: Option<O>,
}

impl<O> Default for HandState<O> {
    fn default() -> Self {
        Self {
            held: false,
            hit: None,
        }
    }
}

/// Two-handed highlight / grab / rotation-lock coordinator
pub struct DualHandCoordinator<O> {
    config: InteractionConfig,
    hands: [HandState<O>; 2],
    highlight: HighlightSlot<O>,
    grab: GrabState<O>,
    events: Option<EventSender<O>>,
    frame: u64,
}

impl<O> DualHandCoordinator<O>
where
    O: Copy + Eq + std::fmt::Debug,
{
    /// Create a coordinator with the given configuration
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            hands: [HandState::default(), HandState::default()],
            highlight: HighlightSlot::new(),
            grab: GrabState::Idle,
            events: None,
            frame: 0,
        }
    }

    /// Publish decisions on an event channel
    pub fn with_events(mut self, sender: EventSender<O>) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// State of one controller
    pub fn hand(&self, hand: Hand) -> &HandState<O> {
        &self.hands[hand.index()]
    }

    /// Object hit by a controller on the last tick
    pub fn hit(&self, hand: Hand) -> Option<O> {
        self.hand(hand).hit
    }

    /// Whether a controller's trigger is held
    pub fn is_held(&self, hand: Hand) -> bool {
        self.hand(hand).held
    }

    /// The highlighted object
    pub fn highlighted(&self) -> Option<O> {
        self.highlight.current()
    }

    /// The grabbed object
    pub fn grabbed(&self) -> Option<O> {
        self.grab.object()
    }

    pub fn is_grabbing(&self) -> bool {
        self.grab.is_grabbing()
    }

    pub fn grab_state(&self) -> &GrabState<O> {
        &self.grab
    }

    /// Number of ticks processed
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// True while both triggers are held and both rays rest on the grabbed object
    pub fn is_rotation_unlocked(&self) -> bool {
        let Some(object) = self.grab.object() else {
            return false;
        };
        Hand::BOTH
            .iter()
            .all(|&hand| self.is_held(hand) && self.hit(hand) == Some(object))
    }

    /// Per-frame update: raycasts, then highlight, then rotation lock
    pub fn tick<H>(&mut self, host: &mut H, poses: &FramePoses)
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        self.frame += 1;

        for hand in Hand::BOTH {
            let hit = poses.get(hand).and_then(|pose| self.cast(&*host, pose));
            self.hands[hand.index()].hit = hit;
        }

        self.update_highlight(host);
        self.enforce_rotation_lock(host);
    }

    /// Leading edge of a trigger press
    pub fn trigger_pressed<H>(&mut self, host: &mut H, hand: Hand)
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        self.hands[hand.index()].held = true;

        match hand {
            Hand::Left => self.request_options(host),
            Hand::Right => self.try_grab(host),
        }
    }

    /// Trigger release; ends any grab whichever hand released
    pub fn trigger_released<H>(&mut self, host: &mut H, hand: Hand)
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        self.hands[hand.index()].held = false;

        if let Some(object) = self.grab.end(host) {
            log::info!("Released {:?} ({} trigger up)", object, hand);
            self.emit(InteractionEvent::GrabEnded {
                object,
                released_by: hand,
            });
        }
    }

    /// Drop every reference to an object the host destroyed
    pub fn forget(&mut self, object: O) {
        for state in &mut self.hands {
            if state.hit == Some(object) {
                state.hit = None;
            }
        }
        if self.highlight.forget(object) {
            self.emit(InteractionEvent::HighlightChanged {
                previous: Some(object),
                current: None,
            });
        }
        if self.grab.forget(object) {
            log::warn!("Grabbed object {:?} was destroyed mid-grab", object);
        }
    }

    /// Release everything: end the grab, clear the highlight and held flags
    pub fn reset<H>(&mut self, host: &mut H)
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        if let Some(object) = self.grab.end(host) {
            self.emit(InteractionEvent::GrabEnded {
                object,
                released_by: Hand::Right,
            });
        }
        let previous = self.highlight.current();
        if self.highlight.clear(host) {
            self.emit(InteractionEvent::HighlightChanged {
                previous,
                current: None,
            });
        }
        self.hands = [HandState::default(), HandState::default()];
    }

    fn cast<H>(&self, host: &H, pose: &ControllerPose) -> Option<O>
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        let direction = pose.direction()?;
        host.raycast(
            pose.position,
            direction,
            self.config.max_ray_distance,
            self.config.interactable_layers,
        )
    }

    // Last write wins: the right hand's hit overrides the left's.
    fn update_highlight<H>(&mut self, host: &mut H)
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        let previous = self.highlight.current();
        let target = self.hit(Hand::Right).or(self.hit(Hand::Left));

        let changed = match target {
            Some(object) => self
                .highlight
                .highlight(host, object, self.config.highlight_material),
            None => self.highlight.clear(host),
        };

        if changed {
            log::debug!("Highlight {:?} -> {:?}", previous, target);
            self.emit(InteractionEvent::HighlightChanged {
                previous,
                current: target,
            });
        }
    }

    fn enforce_rotation_lock<H>(&mut self, host: &mut H)
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        if let GrabState::Grabbed {
            object,
            start_rotation,
        } = self.grab
        {
            if !self.is_rotation_unlocked() {
                host.set_rotation(object, start_rotation);
            }
        }
    }

    fn request_options<H>(&mut self, host: &mut H)
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        let Some(target) = self.hit(Hand::Left) else {
            return;
        };

        // Both hands on the same object with the right trigger down is a grab, not a menu
        if self.is_held(Hand::Right) && self.hit(Hand::Right) == Some(target) {
            log::debug!("Options for {:?} suppressed by two-hand hold", target);
            return;
        }

        log::info!("Options requested for {:?}", target);
        match host.options_menu() {
            Some(menu) => menu.show_options_menu(target),
            None => log::debug!("Host has no options menu"),
        }
        self.emit(InteractionEvent::OptionsRequested { object: target });
    }

    fn try_grab<H>(&mut self, host: &mut H)
    where
        H: InteractionHost<Object = O> + ?Sized,
    {
        if self.grab.is_grabbing() {
            return;
        }
        let Some(target) = self.hit(Hand::Right) else {
            return;
        };

        if let Some(rotation) = self.grab.begin(host, target, Hand::Right) {
            log::info!("Grabbed {:?}", target);
            self.emit(InteractionEvent::GrabStarted {
                object: target,
                rotation,
            });
        }
    }

    fn emit(&self, event: InteractionEvent<O>) {
        if let Some(sender) = &self.events {
            let _ = sender.send(event);
        }
    }
}
