//! The game-state aggregate pushed to subscribers on every change.

use serde::{Deserialize, Serialize};

use crate::classes::{Attributes, ClassData, ClassType};
use crate::constants::start;
use crate::movement::Position;
use crate::resources::Resources;

/// Everything the HUD and tooling can observe about a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Chosen class, `None` until the player picks one.
    pub class: Option<ClassType>,
    pub attributes: Attributes,
    pub resources: Resources,
    /// Base temperature gauge (nominally 0–100).
    pub temperature: i32,
    pub day: u32,
    /// Morale gauge (nominally 0–100).
    pub morale: i32,
    pub position: Position,
}

impl Default for GameState {
    fn default() -> Self {
        Self::starting_at(Position::new(start::POSITION_X, start::POSITION_Y))
    }
}

impl GameState {
    pub fn starting_at(position: Position) -> Self {
        Self {
            class: None,
            attributes: Attributes::default(),
            resources: Resources::default(),
            temperature: start::TEMPERATURE,
            day: start::DAY,
            morale: start::MORALE,
            position,
        }
    }

    pub fn class_data(&self) -> Option<&'static ClassData> {
        self.class.map(ClassType::data)
    }
}

/// The single outward event: a named, owned copy of the state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStateEvent {
    pub name: &'static str,
    pub state: GameState,
}

impl GameStateEvent {
    pub fn new(state: GameState) -> Self {
        Self {
            name: crate::constants::GAME_STATE_UPDATE,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_state() {
        let s = GameState::default();
        assert!(s.class.is_none());
        assert!(s.class_data().is_none());
        assert_eq!(s.attributes, Attributes::uniform(3));
        assert_eq!(s.temperature, 65);
        assert_eq!(s.day, 1);
        assert_eq!(s.morale, 70);
        assert_eq!(s.position, Position::new(400.0, 300.0));
    }

    #[test]
    fn json_shape() {
        let mut s = GameState::default();
        s.class = Some(ClassType::Botanist);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["class"], "botanist");
        assert_eq!(v["resources"]["water"], 60);
        assert_eq!(v["position"]["x"], 400.0);

        let back: GameState = serde_json::from_value(v).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn event_carries_name() {
        let e = GameStateEvent::new(GameState::default());
        assert_eq!(e.name, "gameStateUpdate");
    }
}
