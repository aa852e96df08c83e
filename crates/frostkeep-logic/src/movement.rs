//! Pure movement logic — 8-way direction, diagonal normalization, arena clamp.
//!
//! Algorithm: "step then clamp"
//! 1. Scale the direction so diagonals travel as fast as axial moves
//! 2. Compute target = start + direction * speed * dt
//! 3. Clamp target into the arena on EACH axis independently
//! 4. A clamped axis holds at the wall while the free axis keeps moving

use serde::{Deserialize, Serialize};

use crate::constants::{arena, movement::DIAGONAL_FACTOR};

/// A 2D point in screen space (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned playable rectangle (inclusive min/max on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            min_x: arena::MIN_X,
            max_x: arena::MAX_X,
            min_y: arena::MIN_Y,
            max_y: arena::MAX_Y,
        }
    }
}

impl ArenaBounds {
    /// Bounds for a map of `width` x `height` with `margin` kept clear on
    /// every edge.
    pub fn from_extent(width: f32, height: f32, margin: f32) -> Self {
        Self {
            min_x: margin,
            max_x: width - margin,
            min_y: margin,
            max_y: height - margin,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Non-empty and finite.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Clamp a point into the arena. Idempotent on valid bounds.
    ///
    /// Never panics: on inverted bounds every point lands on the max edge,
    /// and a NaN coordinate lands on the min edge.
    pub fn clamp(&self, p: Position) -> Position {
        Position::new(
            p.x.max(self.min_x).min(self.max_x),
            p.y.max(self.min_y).min(self.max_y),
        )
    }
}

/// Discrete 8-way input: each axis in {-1, 0, 1}.
///
/// Deserialization goes through [`Direction::new`], so `{"dx": 5, "dy": 0}`
/// reads as [`Direction::RIGHT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDirection")]
pub struct Direction {
    dx: i8,
    dy: i8,
}

impl Direction {
    pub const NONE: Direction = Direction { dx: 0, dy: 0 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };
    pub const UP: Direction = Direction { dx: 0, dy: -1 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };

    /// Any integer input is reduced to its sign, so callers cannot ask
    /// for more than one unit per axis.
    pub fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx: dx.signum() as i8,
            dy: dy.signum() as i8,
        }
    }

    pub fn dx(&self) -> i8 {
        self.dx
    }

    pub fn dy(&self) -> i8 {
        self.dy
    }

    pub fn is_none(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn is_diagonal(&self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    /// Unit-length velocity for this direction (zero for `NONE`).
    pub fn velocity(&self) -> (f32, f32) {
        let (vx, vy) = (self.dx as f32, self.dy as f32);
        if self.is_diagonal() {
            (vx * DIAGONAL_FACTOR, vy * DIAGONAL_FACTOR)
        } else {
            (vx, vy)
        }
    }
}

#[derive(Deserialize)]
struct RawDirection {
    #[serde(default)]
    dx: i32,
    #[serde(default)]
    dy: i32,
}

impl From<RawDirection> for Direction {
    fn from(raw: RawDirection) -> Self {
        Direction::new(raw.dx, raw.dy)
    }
}

/// Result of a single movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No input, or no time elapsed. Position untouched.
    Idle,
    /// Moved freely inside the arena.
    Moved { x: f32, y: f32 },
    /// At least one axis hit the arena edge and was held there.
    Clamped { x: f32, y: f32 },
}

impl MoveOutcome {
    /// Resulting position, or `None` for `Idle`.
    pub fn position(&self) -> Option<Position> {
        match *self {
            MoveOutcome::Idle => None,
            MoveOutcome::Moved { x, y } | MoveOutcome::Clamped { x, y } => {
                Some(Position::new(x, y))
            }
        }
    }

    pub fn is_moving(&self) -> bool {
        !matches!(self, MoveOutcome::Idle)
    }
}

/// A movement request.
#[derive(Debug, Clone, Copy)]
pub struct MoveInput {
    pub from: Position,
    pub direction: Direction,
    pub speed: f32,
    pub dt: f32,
}

/// Compute one movement step inside `bounds`.
///
/// Negative or non-finite `dt` is treated as zero. The starting position is
/// clamped first, so a point that somehow sits outside the arena is pulled
/// back in on the next step that moves; that step reports `Clamped`.
pub fn compute_move(input: &MoveInput, bounds: &ArenaBounds) -> MoveOutcome {
    let dt = if input.dt.is_finite() && input.dt > 0.0 {
        input.dt
    } else {
        0.0
    };
    if input.direction.is_none() || dt == 0.0 {
        return MoveOutcome::Idle;
    }

    let start = bounds.clamp(input.from);
    let (vx, vy) = input.direction.velocity();
    let target = Position::new(
        start.x + vx * input.speed * dt,
        start.y + vy * input.speed * dt,
    );
    let clamped = bounds.clamp(target);

    if clamped == target && start == input.from {
        MoveOutcome::Moved {
            x: clamped.x,
            y: clamped.y,
        }
    } else {
        MoveOutcome::Clamped {
            x: clamped.x,
            y: clamped.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::movement::PLAYER_SPEED;

    fn mi(x: f32, y: f32, dx: i32, dy: i32, dt: f32) -> MoveInput {
        MoveInput {
            from: Position::new(x, y),
            direction: Direction::new(dx, dy),
            speed: PLAYER_SPEED,
            dt,
        }
    }

    fn arena() -> ArenaBounds {
        ArenaBounds::default()
    }

    // --- Free movement ---

    #[test]
    fn axial_step_one_second() {
        let res = compute_move(&mi(400.0, 300.0, 1, 0, 1.0), &arena());
        assert_eq!(res, MoveOutcome::Moved { x: 520.0, y: 300.0 });
    }

    #[test]
    fn up_is_negative_y() {
        let res = compute_move(&mi(400.0, 300.0, 0, -1, 0.5), &arena());
        assert_eq!(res, MoveOutcome::Moved { x: 400.0, y: 240.0 });
    }

    #[test]
    fn diagonal_matches_axial_speed() {
        let axial = compute_move(&mi(400.0, 300.0, 1, 0, 1.0), &arena())
            .position()
            .unwrap();
        let diag = compute_move(&mi(400.0, 300.0, -1, 1, 1.0), &arena())
            .position()
            .unwrap();
        let start = Position::new(400.0, 300.0);
        assert!((axial.distance(&start) - diag.distance(&start)).abs() < 1e-3);
    }

    #[test]
    fn diagonal_uses_exact_factor() {
        let (vx, vy) = Direction::new(1, 1).velocity();
        assert_eq!(vx, std::f32::consts::FRAC_1_SQRT_2);
        assert_eq!(vy, std::f32::consts::FRAC_1_SQRT_2);
    }

    // --- Idle ---

    #[test]
    fn no_input_is_idle() {
        assert_eq!(
            compute_move(&mi(400.0, 300.0, 0, 0, 1.0), &arena()),
            MoveOutcome::Idle
        );
    }

    #[test]
    fn zero_or_bad_dt_is_idle() {
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert_eq!(
                compute_move(&mi(400.0, 300.0, 1, 1, dt), &arena()),
                MoveOutcome::Idle,
                "dt={dt}"
            );
        }
    }

    // --- Clamping ---

    #[test]
    fn diagonal_into_right_wall_slides() {
        let res = compute_move(&mi(760.0, 300.0, 1, 1, 1.0), &arena());
        match res {
            MoveOutcome::Clamped { x, y } => {
                assert_eq!(x, 768.0);
                assert!((y - 384.85).abs() < 0.01, "y={y}");
            }
            _ => panic!("Expected Clamped, got {:?}", res),
        }
    }

    #[test]
    fn huge_dt_stays_in_arena() {
        let res = compute_move(&mi(400.0, 300.0, -1, -1, 1.0e6), &arena());
        assert_eq!(res, MoveOutcome::Clamped { x: 32.0, y: 32.0 });
    }

    #[test]
    fn outside_start_corrected() {
        let res = compute_move(&mi(900.0, 300.0, 0, 1, 0.1), &arena());
        match res {
            MoveOutcome::Clamped { x, y } => {
                assert_eq!(x, 768.0);
                assert!((y - 312.0).abs() < 0.01, "y={y}");
            }
            _ => panic!("got {:?}", res),
        }
    }

    #[test]
    fn inside_start_free_axis_is_moved() {
        // Start on the wall, move along it: nothing is pulled back
        let res = compute_move(&mi(768.0, 300.0, 0, 1, 0.1), &arena());
        assert!(matches!(res, MoveOutcome::Moved { .. }), "got {:?}", res);
    }

    #[test]
    fn clamp_is_idempotent() {
        let b = arena();
        for p in [
            Position::new(-50.0, 1000.0),
            Position::new(400.0, 300.0),
            Position::new(768.0, 32.0),
        ] {
            let once = b.clamp(p);
            assert_eq!(b.clamp(once), once);
            assert!(b.contains(once));
        }
    }

    // --- Bounds ---

    #[test]
    fn tile_map_bounds_match_constants() {
        let w = arena::MAP_TILES_X as f32 * arena::TILE_SIZE;
        let h = arena::MAP_TILES_Y as f32 * arena::TILE_SIZE;
        assert_eq!(ArenaBounds::from_extent(w, h, arena::TILE_SIZE), arena());
        assert_eq!(arena().center(), Position::new(400.0, 304.0));
    }

    #[test]
    fn inverted_bounds_invalid() {
        let b = ArenaBounds::from_extent(40.0, 600.0, 32.0);
        assert!(!b.is_valid());
        assert!(arena().is_valid());
    }

    #[test]
    fn clamp_on_inverted_bounds_does_not_panic() {
        let b = ArenaBounds {
            min_x: 500.0,
            max_x: 100.0,
            min_y: 32.0,
            max_y: 576.0,
        };
        let p = b.clamp(Position::new(300.0, 1000.0));
        assert_eq!(p, Position::new(100.0, 576.0));
    }

    #[test]
    fn clamp_pulls_nan_to_min_edge() {
        let p = arena().clamp(Position::new(f32::NAN, 300.0));
        assert_eq!(p, Position::new(32.0, 300.0));
    }

    #[test]
    fn direction_reduced_to_sign() {
        assert_eq!(Direction::new(5, -3), Direction::new(1, -1));
        assert!(Direction::new(0, 0).is_none());
        assert!(!Direction::LEFT.is_diagonal());
    }

    // --- Deserialization ---

    #[test]
    fn deserialized_direction_is_reduced_to_sign() {
        let d: Direction = serde_json::from_str(r#"{"dx":5,"dy":0}"#).unwrap();
        assert_eq!(d, Direction::RIGHT);
        let d: Direction = serde_json::from_str(r#"{"dx":-9,"dy":12}"#).unwrap();
        assert_eq!(d, Direction::new(-1, 1));
        let d: Direction = serde_json::from_str(r#"{"dy":-1}"#).unwrap();
        assert_eq!(d, Direction::UP);
    }

    #[test]
    fn oversized_json_direction_moves_at_normal_speed() {
        let d: Direction = serde_json::from_str(r#"{"dx":5,"dy":0}"#).unwrap();
        let input = MoveInput {
            from: Position::new(400.0, 300.0),
            direction: d,
            speed: PLAYER_SPEED,
            dt: 0.1,
        };
        let p = compute_move(&input, &arena()).position().unwrap();
        assert!((p.x - 412.0).abs() < 1e-3, "x={}", p.x);
        assert_eq!(p.y, 300.0);
    }

    #[test]
    fn direction_serializes_as_dx_dy() {
        let json = serde_json::to_string(&Direction::new(-1, 1)).unwrap();
        assert_eq!(json, r#"{"dx":-1,"dy":1}"#);
    }
}
