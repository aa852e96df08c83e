//! State presentation bridge — relays snapshots to a passive HUD.
//!
//! The bridge subscribes once and forwards resources, temperature, day
//! and morale verbatim. Band and bar helpers live on [`HudView`] for the
//! renderer to use; the bridge never applies them.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::constants::gauges;
use crate::controller::{GameController, SubscriberId};
use crate::resources::{self, ResourceKind, Resources};
use crate::state::{GameState, GameStateEvent};

/// What the HUD receives on every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudView {
    pub resources: Resources,
    pub temperature: i32,
    pub day: u32,
    pub morale: i32,
}

impl From<&GameState> for HudView {
    fn from(state: &GameState) -> Self {
        Self {
            resources: state.resources,
            temperature: state.temperature,
            day: state.day,
            morale: state.morale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Heated,
    Cold,
    Freezing,
}

impl TemperatureBand {
    pub fn label(self) -> &'static str {
        match self {
            TemperatureBand::Heated => "Heated",
            TemperatureBand::Cold => "Cold",
            TemperatureBand::Freezing => "Freezing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoraleBand {
    Good,
    Warning,
    Danger,
}

impl HudView {
    pub fn temperature_band(&self) -> TemperatureBand {
        if self.temperature >= gauges::TEMPERATURE_WARM {
            TemperatureBand::Heated
        } else if self.temperature >= gauges::TEMPERATURE_COLD {
            TemperatureBand::Cold
        } else {
            TemperatureBand::Freezing
        }
    }

    pub fn morale_band(&self) -> MoraleBand {
        if self.morale >= gauges::MORALE_GOOD {
            MoraleBand::Good
        } else if self.morale >= gauges::MORALE_WARNING {
            MoraleBand::Warning
        } else {
            MoraleBand::Danger
        }
    }

    /// Bar fill fraction for one resource.
    pub fn resource_fill(&self, kind: ResourceKind) -> f32 {
        resources::bar_fill(self.resources.get(kind))
    }

    /// Morale uses the same 0..=100 bar.
    pub fn morale_fill(&self) -> f32 {
        resources::bar_fill(self.morale)
    }
}

/// The display layer. Assumed always ready to receive.
pub trait HudDisplay {
    fn show(&mut self, view: &HudView);
}

/// Display that just keeps the most recent view; renderers poll it.
#[derive(Debug, Default, Clone)]
pub struct LatestView {
    pub view: Option<HudView>,
    pub updates: u64,
}

impl HudDisplay for LatestView {
    fn show(&mut self, view: &HudView) {
        self.view = Some(*view);
        self.updates += 1;
    }
}

/// Connects a controller's snapshot stream to a [`HudDisplay`].
pub struct HudBridge<D: HudDisplay> {
    display: Rc<RefCell<D>>,
    subscription: SubscriberId,
}

impl<D: HudDisplay + 'static> HudBridge<D> {
    /// Subscribe `display` to `controller`. Call once at startup.
    pub fn attach(controller: &mut GameController, display: D) -> Self {
        let display = Rc::new(RefCell::new(display));
        let sink = Rc::clone(&display);
        let subscription = controller.subscribe(move |event: &GameStateEvent| {
            sink.borrow_mut().show(&HudView::from(&event.state));
        });
        Self {
            display,
            subscription,
        }
    }

    pub fn display(&self) -> std::cell::Ref<'_, D> {
        self.display.borrow()
    }

    pub fn display_mut(&self) -> std::cell::RefMut<'_, D> {
        self.display.borrow_mut()
    }

    /// Stop relaying. Returns the display.
    pub fn detach(self, controller: &mut GameController) -> Rc<RefCell<D>> {
        controller.unsubscribe(self.subscription);
        self.display
    }
}
