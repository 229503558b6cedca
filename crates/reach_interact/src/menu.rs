//! Panel navigation and the object spawn menu

use crate::host::SceneEditor;
use crate::input::ControllerPose;
use glam::Quat;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Panel {
    name: String,
    visible: bool,
}

/// Switches between a home panel and named sub-panels
///
/// Only one panel is visible at a time. Opening a sub-panel hides home,
/// `back` returns to it.
#[derive(Debug, Clone)]
pub struct PanelNavigator {
    panels: Vec<Panel>,
    home: usize,
    current: usize,
    quit_requested: bool,
}

impl PanelNavigator {
    /// `home` is added to `panels` if missing
    pub fn new<I, S>(home: &str, panels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<Panel> = panels
            .into_iter()
            .map(|name| Panel {
                name: name.into(),
                visible: false,
            })
            .collect();

        let home = match list.iter().position(|p| p.name == home) {
            Some(index) => index,
            None => {
                list.insert(
                    0,
                    Panel {
                        name: home.to_string(),
                        visible: false,
                    },
                );
                0
            }
        };
        list[home].visible = true;

        Self {
            panels: list,
            home,
            current: home,
            quit_requested: false,
        }
    }

    /// Show `name`, hiding whatever was showing; returns false for unknown panels
    pub fn open(&mut self, name: &str) -> bool {
        let Some(index) = self.panels.iter().position(|p| p.name == name) else {
            log::warn!("No panel named '{}'", name);
            return false;
        };

        self.panels[self.home].visible = false;
        self.panels[self.current].visible = false;
        self.panels[index].visible = true;
        self.current = index;
        log::debug!("Opened panel '{}'", name);
        true
    }

    /// Hide the current panel and return home
    pub fn back(&mut self) {
        self.panels[self.current].visible = false;
        self.panels[self.home].visible = true;
        self.current = self.home;
    }

    pub fn quit(&mut self) {
        log::info!("Quit requested from panel '{}'", self.current());
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn current(&self) -> &str {
        &self.panels[self.current].name
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.panels.iter().any(|p| p.name == name && p.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.panels.iter().filter(|p| p.visible).count()
    }
}

/// Primary-button menu listing objects that can be spawned in front of the viewer
#[derive(Debug, Clone)]
pub struct SpawnMenu {
    catalogue: Vec<String>,
    spawn_distance: f32,
    open: bool,
    button_down: bool,
}

impl SpawnMenu {
    pub fn new(catalogue: Vec<String>, spawn_distance: f32) -> Self {
        Self {
            catalogue,
            spawn_distance,
            open: false,
            button_down: false,
        }
    }

    /// Press edge of the primary button; toggles the menu and returns whether it is open
    ///
    /// Held-button repeats are ignored until [`Self::primary_released`].
    pub fn primary_pressed(&mut self) -> bool {
        if !self.button_down {
            self.button_down = true;
            self.open = !self.open;
            log::debug!("Spawn menu {}", if self.open { "opened" } else { "closed" });
        }
        self.open
    }

    pub fn primary_released(&mut self) {
        self.button_down = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Entries shown while open
    pub fn entries(&self) -> &[String] {
        if self.open {
            &self.catalogue
        } else {
            &[]
        }
    }

    /// Spawn `entry` in front of the viewer with a simulated body
    pub fn spawn<H>(&mut self, host: &mut H, entry: &str, viewer: &ControllerPose) -> Option<H::Object>
    where
        H: SceneEditor + ?Sized,
        H::Object: fmt::Debug,
    {
        if !self.open {
            log::debug!("Spawn menu closed, ignoring '{}'", entry);
            return None;
        }
        if !self.catalogue.iter().any(|c| c == entry) {
            log::warn!("'{}' is not in the spawn catalogue", entry);
            return None;
        }

        let position = viewer.point_ahead(self.spawn_distance);
        let object = host.instantiate(entry, position, Quat::IDENTITY)?;
        host.ensure_dynamic_body(object);
        log::info!("Spawned '{}' as {:?} at {}", entry, object, position);
        Some(object)
    }
}
