//! Pure game logic for Frostkeep.
//!
//! This crate contains all game logic that is independent of any engine
//! or renderer. The caller owns the frame loop and calls
//! [`controller::GameController::tick`] once per frame; every state change
//! is pushed to subscribers as an owned snapshot. That keeps the logic
//! unit-testable and lets the Bevy viewer and the headless simtest share it.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`classes`] | Playable classes and their attribute blocks |
//! | [`config`] | Speed / arena / start configuration and validation |
//! | [`constants`] | Arena geometry, movement tuning, starting values |
//! | [`controller`] | Single-writer game state, tick, snapshot emission |
//! | [`hud`] | Presentation bridge from snapshots to a HUD display |
//! | [`input`] | Cardinal key state → 8-way direction |
//! | [`movement`] | Diagonal normalization and arena clamping |
//! | [`resources`] | Food / materials / fuel / water stockpile |
//! | [`state`] | The `GameState` aggregate and its event |

pub mod classes;
pub mod config;
pub mod constants;
pub mod controller;
pub mod hud;
pub mod input;
pub mod movement;
pub mod resources;
pub mod state;
