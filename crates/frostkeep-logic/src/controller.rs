//! Movement & state controller — the single writer of [`GameState`].
//!
//! Every mutation publishes a [`GameStateEvent`] to the registered
//! subscribers, in registration order. Subscribers receive a shared
//! reference to an owned snapshot and cannot reach back into the
//! controller while it is emitting.
//!
//! The caller drives the frame loop:
//!
//! ```
//! use frostkeep_logic::controller::GameController;
//! use frostkeep_logic::movement::{Direction, Position};
//!
//! let mut game = GameController::new();
//! game.tick(Direction::RIGHT, 1.0);
//! assert_eq!(game.state().position, Position::new(520.0, 300.0));
//! ```

use log::{debug, info, trace, warn};

use crate::classes::ClassData;
use crate::config::{validate_config, ConfigError, GameConfig};
use crate::movement::{compute_move, Direction, MoveInput, MoveOutcome};
use crate::resources::ResourceUpdate;
use crate::state::{GameState, GameStateEvent};

/// Handle returned by [`GameController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(&GameStateEvent)>;

pub struct GameController {
    state: GameState,
    config: GameConfig,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self::from_valid_config(GameConfig::default())
    }

    /// Build a controller from a config, rejecting it with every
    /// [`ConfigError`] that [`validate_config`] reports.
    ///
    /// ```
    /// use frostkeep_logic::config::{ConfigError, GameConfig};
    /// use frostkeep_logic::controller::GameController;
    ///
    /// let bad = GameConfig { speed: f32::NAN, ..GameConfig::default() };
    /// let errors = GameController::with_config(bad).err().unwrap();
    /// assert!(matches!(errors[0], ConfigError::InvalidSpeed(_)));
    /// ```
    pub fn with_config(config: GameConfig) -> Result<Self, Vec<ConfigError>> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            warn!("rejected config: {:?}", errors);
            return Err(errors);
        }
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GameConfig) -> Self {
        Self {
            state: GameState::starting_at(config.start),
            config,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ── Subscriptions ───────────────────────────────────────────────────

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&GameStateEvent) + 'static,
    {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        debug!("subscriber {:?} registered", id);
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!("subscriber {:?} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Publish the current state without changing it.
    pub fn emit(&mut self) {
        let event = GameStateEvent::new(self.state.clone());
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Adopt a class and its attribute block. Calling again replaces both.
    pub fn set_class(&mut self, class: &ClassData) {
        info!("class selected: {}", class.name);
        self.state.class = Some(class.id);
        self.state.attributes = class.attributes;
        self.emit();
    }

    /// Advance the player one frame. Emits only if the position changed.
    pub fn tick(&mut self, direction: Direction, dt: f32) -> MoveOutcome {
        let outcome = compute_move(
            &MoveInput {
                from: self.state.position,
                direction,
                speed: self.config.speed,
                dt,
            },
            &self.config.bounds,
        );

        if let MoveOutcome::Clamped { x, y } = outcome {
            trace!("held at arena edge ({x:.2}, {y:.2})");
        }

        match outcome.position() {
            Some(pos) if pos != self.state.position => {
                self.state.position = pos;
                self.emit();
            }
            _ => {}
        }
        outcome
    }

    /// Overwrite the resource fields present in `update`.
    pub fn update_resources(&mut self, update: ResourceUpdate) {
        debug!("resources update {:?}", update);
        self.state.resources.merge(&update);
        self.emit();
    }

    pub fn update_temperature(&mut self, value: i32) {
        debug!("temperature -> {}", value);
        self.state.temperature = value;
        self.emit();
    }

    pub fn set_morale(&mut self, value: i32) {
        debug!("morale -> {}", value);
        self.state.morale = value;
        self.emit();
    }

    /// Move the day counter forward. The current day and earlier ones are
    /// ignored without emitting; returns whether the state changed.
    pub fn set_day(&mut self, day: u32) -> bool {
        if day <= self.state.day {
            debug!("ignoring day {} (current {})", day, self.state.day);
            return false;
        }
        self.state.day = day;
        self.emit();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::ClassType;
    use crate::movement::{ArenaBounds, Position};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Controller plus a shared log of every emitted state.
    fn recorded() -> (GameController, Rc<RefCell<Vec<GameState>>>) {
        let mut game = GameController::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        game.subscribe(move |e: &GameStateEvent| sink.borrow_mut().push(e.state.clone()));
        (game, log)
    }

    #[test]
    fn set_class_copies_attributes_and_emits() {
        let (mut game, log) = recorded();
        game.set_class(ClassType::Engineer.data());
        assert_eq!(game.state().class, Some(ClassType::Engineer));
        assert_eq!(game.state().attributes.engineering, 5);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn set_class_last_write_wins() {
        let mut game = GameController::new();
        game.set_class(ClassType::Sentinel.data());
        game.set_class(ClassType::Diplomat.data());
        assert_eq!(game.state().class, Some(ClassType::Diplomat));
        assert_eq!(game.state().attributes, ClassType::Diplomat.data().attributes);
    }

    #[test]
    fn tick_moves_and_emits() {
        let (mut game, log) = recorded();
        let outcome = game.tick(Direction::RIGHT, 1.0);
        assert_eq!(outcome, MoveOutcome::Moved { x: 520.0, y: 300.0 });
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].position, Position::new(520.0, 300.0));
    }

    #[test]
    fn idle_tick_is_silent() {
        let (mut game, log) = recorded();
        assert_eq!(game.tick(Direction::NONE, 0.016), MoveOutcome::Idle);
        assert_eq!(game.tick(Direction::UP, 0.0), MoveOutcome::Idle);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn pushing_into_wall_is_silent() {
        let (mut game, log) = recorded();
        game.tick(Direction::LEFT, 100.0);
        assert_eq!(game.state().position.x, 32.0);
        assert_eq!(log.borrow().len(), 1);

        let outcome = game.tick(Direction::LEFT, 0.5);
        assert!(matches!(outcome, MoveOutcome::Clamped { .. }));
        assert!(outcome.is_moving());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn update_resources_merges() {
        let (mut game, log) = recorded();
        game.update_resources(ResourceUpdate::default().food(10));
        let r = game.state().resources;
        assert_eq!((r.food, r.materials, r.fuel, r.water), (10, 30, 40, 60));
        assert_eq!(log.borrow()[0].resources.food, 10);
    }

    #[test]
    fn gauges_overwrite() {
        let (mut game, log) = recorded();
        game.update_temperature(12);
        game.set_morale(35);
        assert_eq!(game.state().temperature, 12);
        assert_eq!(game.state().morale, 35);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn day_never_goes_back() {
        let (mut game, log) = recorded();
        assert!(game.set_day(4));
        assert!(!game.set_day(2));
        assert_eq!(game.state().day, 4);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn same_day_is_not_a_change() {
        let (mut game, log) = recorded();
        assert!(!game.set_day(1));
        assert!(game.set_day(2));
        assert!(!game.set_day(2));
        assert_eq!(game.state().day, 2);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn subscribers_called_in_order() {
        let mut game = GameController::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            game.subscribe(move |_: &GameStateEvent| order.borrow_mut().push(tag));
        }
        game.emit();
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let (mut game, log) = recorded();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = game.subscribe(move |_: &GameStateEvent| *c.borrow_mut() += 1);
        game.emit();
        assert!(game.unsubscribe(id));
        assert!(!game.unsubscribe(id));
        game.emit();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(game.subscriber_count(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_state() {
        let (mut game, log) = recorded();
        game.update_temperature(50);
        game.update_temperature(20);
        assert_eq!(log.borrow()[0].temperature, 50);
        assert_eq!(log.borrow()[1].temperature, 20);
    }

    // --- Config ---

    #[test]
    fn config_start_outside_is_rejected() {
        let errors = GameController::with_config(GameConfig {
            start: Position::new(0.0, 1000.0),
            ..GameConfig::default()
        })
        .err()
        .expect("start outside bounds rejected");
        assert_eq!(
            errors,
            vec![ConfigError::StartOutOfBounds(Position::new(0.0, 1000.0))]
        );
    }

    #[test]
    fn inverted_bounds_rejected_without_panic() {
        let bounds = ArenaBounds {
            min_x: 500.0,
            max_x: 100.0,
            min_y: 32.0,
            max_y: 576.0,
        };
        let errors = GameController::with_config(GameConfig {
            bounds,
            ..GameConfig::default()
        })
        .err()
        .expect("inverted bounds rejected");
        assert!(errors.contains(&ConfigError::InvalidBounds(bounds)));
    }

    #[test]
    fn non_finite_speed_rejected() {
        for speed in [f32::NAN, f32::INFINITY, -120.0, 0.0] {
            let result = GameController::with_config(GameConfig {
                speed,
                ..GameConfig::default()
            });
            let errors = result.err().expect("bad speed rejected");
            assert!(
                errors.iter().any(|e| matches!(e, ConfigError::InvalidSpeed(_))),
                "speed={speed}: {errors:?}"
            );
        }
    }

    #[test]
    fn default_config_matches_new() {
        let game = GameController::with_config(GameConfig::default()).unwrap();
        assert_eq!(game.state(), GameController::new().state());
        assert_eq!(game.config(), &GameConfig::default());
    }

    #[test]
    fn custom_speed_and_bounds() {
        let mut game = GameController::with_config(GameConfig {
            speed: 10.0,
            bounds: ArenaBounds::from_extent(100.0, 100.0, 10.0),
            start: Position::new(50.0, 50.0),
            ..GameConfig::default()
        })
        .unwrap();
        game.tick(Direction::DOWN, 2.0);
        assert_eq!(game.state().position, Position::new(50.0, 70.0));
        game.tick(Direction::DOWN, 2.0);
        assert_eq!(game.state().position, Position::new(50.0, 90.0));
    }
}
