//! Frame loop wiring the scene, the coordinator and the editing tools

use crate::error::{Result, RuntimeError};
use crate::session::{FrameDef, PanelOp, Session, StretchOp};
use reach_interact::prelude::*;
use reach_scene::{ObjectId, Scene};

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub highlight_changes: u64,
    pub grabs: u64,
    pub releases: u64,
    pub options_requests: u64,
    pub actions: u64,
    pub spawned: u64,
}

impl RunStats {
    pub fn print_summary(&self) {
        println!("Session summary");
        println!("  frames:            {}", self.frames);
        println!("  highlight changes: {}", self.highlight_changes);
        println!("  grabs:             {}", self.grabs);
        println!("  releases:          {}", self.releases);
        println!("  options requests:  {}", self.options_requests);
        println!("  option actions:    {}", self.actions);
        println!("  spawned objects:   {}", self.spawned);
    }
}

/// Owns the scene and drives every tool from recorded frames
pub struct Runtime {
    scene: Scene,
    coordinator: DualHandCoordinator<ObjectId>,
    events: EventReceiver<ObjectId>,
    triggers: [TriggerInput; 2],
    options: ObjectOptions<ObjectId>,
    panels: PanelNavigator,
    spawn_menu: SpawnMenu,
    stretcher: Option<HandDistanceScaler<ObjectId>>,
    viewer: ControllerPose,
    stats: RunStats,
}

impl Runtime {
    /// Build the scene described by `session`
    pub fn new(config: InteractionConfig, session: &Session) -> Result<Self> {
        let mut scene = Scene::new().with_options_menu();

        for prefab in &session.prefabs {
            scene.register_prefab(prefab.name.clone(), prefab.to_desc());
        }
        if let Some(gizmo) = &config.gizmo_prefab {
            if !scene.has_prefab(gizmo) {
                return Err(RuntimeError::InvalidSession(format!(
                    "gizmo prefab '{}' is not defined",
                    gizmo
                )));
            }
        }
        for object in &session.objects {
            let id = scene.spawn(&object.to_desc());
            log::debug!("Spawned '{}' as {:?}", object.name, id);
        }

        let (sender, events) = event_channel();
        let triggers = [TriggerInput::from_config(&config), TriggerInput::from_config(&config)];
        let spawn_menu = SpawnMenu::new(session.menu.catalogue.clone(), config.spawn_distance);
        let panels = PanelNavigator::new(&session.menu.home, session.menu.panels.iter().cloned());

        log::info!("Scene ready with {} objects", scene.len());

        Ok(Self {
            scene,
            coordinator: DualHandCoordinator::new(config.clone()).with_events(sender),
            events,
            triggers,
            options: ObjectOptions::new(config),
            panels,
            spawn_menu,
            stretcher: None,
            viewer: session.viewer,
            stats: RunStats::default(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn coordinator(&self) -> &DualHandCoordinator<ObjectId> {
        &self.coordinator
    }

    pub fn options(&self) -> &ObjectOptions<ObjectId> {
        &self.options
    }

    pub fn panels(&self) -> &PanelNavigator {
        &self.panels
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Play every frame of the session; stops early if a panel asks to quit
    pub fn run(&mut self, frames: &[FrameDef]) -> RunStats {
        'frames: for frame in frames {
            for _ in 0..frame.repeat {
                self.step(frame);
                if self.panels.quit_requested() {
                    log::info!("Quit after {} frames", self.stats.frames);
                    break 'frames;
                }
            }
        }
        self.coordinator.reset(&mut self.scene);
        self.drain_events();
        self.stats
    }

    /// Advance one frame
    pub fn step(&mut self, frame: &FrameDef) {
        self.stats.frames += 1;

        let poses = FramePoses::new(
            frame.left.map(|c| c.pose()),
            frame.right.map(|c| c.pose()),
        );
        for hand in Hand::BOTH {
            if let Some(pose) = poses.get(hand) {
                if let Err(e) = self.scene.set_controller_pose(hand, pose) {
                    log::warn!("Could not move {} controller: {}", hand, e);
                }
            }
        }

        self.coordinator.tick(&mut self.scene, &poses);

        let mut edges = [None; 2];
        for (hand, controller) in [(Hand::Left, &frame.left), (Hand::Right, &frame.right)] {
            let Some(value) = controller.and_then(|c| c.trigger) else {
                continue;
            };
            let edge = self.triggers[hand.index()].update(value);
            match edge {
                Some(TriggerEdge::Pressed) => self.coordinator.trigger_pressed(&mut self.scene, hand),
                Some(TriggerEdge::Released) => self.coordinator.trigger_released(&mut self.scene, hand),
                None => {}
            }
            edges[hand.index()] = edge;
        }

        for target in self.scene.take_options_requests() {
            self.options.show_options_menu(target);
            if let Some(placement) = self.options.placement(&self.scene, self.viewer.position) {
                log::debug!("Options menu for {:?} at {}", target, placement.position);
            }
        }

        self.options.scaler_mut().set_active_axis(frame.gizmo_axis);
        // The right trigger grabs, so the gizmo listens to the left one
        let left_trigger = self.triggers[Hand::Left.index()].value();
        if let Some(scale) = self.options.trigger_value(&mut self.scene, left_trigger) {
            log::trace!("Gizmo scale now {}", scale);
        }

        self.update_stretch(frame, edges[Hand::Left.index()]);

        if let Some(action) = frame.option {
            self.apply_option(action);
        }

        self.update_menus(frame);
        self.drain_events();
    }

    fn apply_option(&mut self, action: OptionAction) {
        let outcome = self.options.apply(&mut self.scene, action);
        match outcome {
            ActionOutcome::Ignored => {
                log::debug!("Option {} had no effect", action);
                return;
            }
            ActionOutcome::Deleted { object } => {
                self.coordinator.forget(object);
                if self.stretcher.as_ref().is_some_and(|s| s.target() == object) {
                    self.stretcher = None;
                }
            }
            ActionOutcome::Rotated { object, rotation } => {
                log::info!("Rotated {:?} to {}", object, rotation);
            }
            ActionOutcome::Duplicated { .. } | ActionOutcome::ScalingEnabled { .. } => {}
        }
        self.stats.actions += 1;
    }

    fn update_stretch(&mut self, frame: &FrameDef, left_edge: Option<TriggerEdge>) {
        match &frame.stretch {
            Some(StretchOp::Select(name)) => match self.scene.find_by_name(name) {
                Some(object) => {
                    let mut scaler = HandDistanceScaler::new(object);
                    scaler.select_enter(Hand::Left);
                    self.stretcher = Some(scaler);
                }
                None => log::warn!("No object named '{}' to stretch", name),
            },
            Some(StretchOp::Deselect) => {
                if let Some(mut scaler) = self.stretcher.take() {
                    scaler.select_exit(Hand::Left);
                }
            }
            None => {}
        }

        let Some(scaler) = self.stretcher.as_mut() else {
            return;
        };
        if left_edge == Some(TriggerEdge::Released) {
            scaler.trigger_released();
        }
        let Some(hand_position) = frame.left.map(|c| c.position) else {
            return;
        };
        if left_edge == Some(TriggerEdge::Pressed) {
            scaler.trigger_pressed(&self.scene, hand_position);
        }
        if let Some(scale) = scaler.update(&mut self.scene, hand_position) {
            log::trace!("Stretched {:?} to {}", scaler.target(), scale);
        }
    }

    fn update_menus(&mut self, frame: &FrameDef) {
        if frame.primary {
            self.spawn_menu.primary_pressed();
        } else {
            self.spawn_menu.primary_released();
        }

        if let Some(entry) = &frame.spawn {
            if self.spawn_menu.spawn(&mut self.scene, entry, &self.viewer).is_some() {
                self.stats.spawned += 1;
            }
        }

        match &frame.panel {
            Some(PanelOp::Open(name)) => {
                self.panels.open(name);
            }
            Some(PanelOp::Back) => self.panels.back(),
            Some(PanelOp::Quit) => self.panels.quit(),
            None => {}
        }
    }

    fn drain_events(&mut self) {
        for event in self.events.try_iter() {
            log::debug!("{:?}", event);
            match event {
                InteractionEvent::HighlightChanged { .. } => self.stats.highlight_changes += 1,
                InteractionEvent::GrabStarted { .. } => self.stats.grabs += 1,
                InteractionEvent::GrabEnded { .. } => self.stats.releases += 1,
                InteractionEvent::OptionsRequested { .. } => self.stats.options_requests += 1,
            }
        }
    }
}
