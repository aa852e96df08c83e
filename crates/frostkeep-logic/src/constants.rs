//! Game constants — arena geometry, movement tuning, starting values.
//!
//! Plain values with no engine dependency. The controller, the simtest
//! harness and the viewer all read from here.

pub mod arena {
    /// Logical canvas size the arena is drawn on.
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Tile edge length. The playable area keeps one tile of margin from
    /// each canvas edge, measured at the player's center.
    pub const TILE_SIZE: f32 = 32.0;
    pub const MAP_TILES_X: u32 = 25;
    pub const MAP_TILES_Y: u32 = 19;

    pub const MIN_X: f32 = 32.0;
    pub const MAX_X: f32 = 768.0;
    pub const MIN_Y: f32 = 32.0;
    pub const MAX_Y: f32 = 576.0;
}

pub mod movement {
    /// Player speed in units per second.
    pub const PLAYER_SPEED: f32 = 120.0;

    /// Per-axis scale applied when both axes are active (√2⁄2).
    pub const DIAGONAL_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;
}

pub mod start {
    pub const POSITION_X: f32 = 400.0;
    pub const POSITION_Y: f32 = 300.0;

    pub const TEMPERATURE: i32 = 65;
    pub const DAY: u32 = 1;
    pub const MORALE: i32 = 70;

    pub const FOOD: i32 = 50;
    pub const MATERIALS: i32 = 30;
    pub const FUEL: i32 = 40;
    pub const WATER: i32 = 60;

    /// Attribute value used for every stat before a class is chosen.
    pub const BASE_ATTRIBUTE: u8 = 3;
}

pub mod gauges {
    /// Resources are displayed on a 0..=100 scale.
    pub const RESOURCE_DISPLAY_MAX: i32 = 100;

    /// Temperature at or above this reads "heated".
    pub const TEMPERATURE_WARM: i32 = 70;
    /// Temperature at or above this (and below warm) reads "cold".
    pub const TEMPERATURE_COLD: i32 = 40;

    pub const MORALE_GOOD: i32 = 70;
    pub const MORALE_WARNING: i32 = 40;

    /// Attribute scale shown on the class-selection screen.
    pub const ATTRIBUTE_MAX: u8 = 5;
}

/// Name of the event carrying a full state snapshot.
pub const GAME_STATE_UPDATE: &str = "gameStateUpdate";
