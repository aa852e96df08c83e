//! Directional key state → 8-way [`Direction`].
//!
//! The caller polls its four cardinal keys every frame (arrow keys and
//! WASD are OR-ed together with `|`) and converts the result here.
//! Opposite keys held together cancel on that axis.

use std::ops::BitOr;

use crate::movement::Direction;

/// Down/up state of the four cardinal keys for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    pub fn direction(&self) -> Direction {
        Direction::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

impl BitOr for KeyState {
    type Output = KeyState;

    fn bitor(self, rhs: KeyState) -> KeyState {
        KeyState {
            left: self.left || rhs.left,
            right: self.right || rhs.right,
            up: self.up || rhs.up,
            down: self.down || rhs.down,
        }
    }
}

fn axis(negative: bool, positive: bool) -> i32 {
    match (negative, positive) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(left: bool, right: bool, up: bool, down: bool) -> KeyState {
        KeyState {
            left,
            right,
            up,
            down,
        }
    }

    #[test]
    fn nothing_held() {
        assert!(KeyState::default().direction().is_none());
        assert!(!KeyState::default().any());
    }

    #[test]
    fn cardinal_keys() {
        assert_eq!(keys(true, false, false, false).direction(), Direction::LEFT);
        assert_eq!(keys(false, true, false, false).direction(), Direction::RIGHT);
        assert_eq!(keys(false, false, true, false).direction(), Direction::UP);
        assert_eq!(keys(false, false, false, true).direction(), Direction::DOWN);
    }

    #[test]
    fn diagonal_up_right() {
        let d = keys(false, true, true, false).direction();
        assert_eq!((d.dx(), d.dy()), (1, -1));
        assert!(d.is_diagonal());
    }

    #[test]
    fn opposite_keys_cancel() {
        assert!(keys(true, true, false, false).direction().is_none());
        let d = keys(true, true, false, true).direction();
        assert_eq!((d.dx(), d.dy()), (0, 1));
    }

    #[test]
    fn arrows_and_wasd_merge() {
        let arrows = keys(true, false, false, false);
        let wasd = keys(false, false, false, true);
        let d = (arrows | wasd).direction();
        assert_eq!((d.dx(), d.dy()), (-1, 1));
    }

    #[test]
    fn left_arrow_with_d_cancels() {
        let arrows = keys(true, false, false, false);
        let wasd = keys(false, true, false, false);
        assert!((arrows | wasd).direction().is_none());
    }
}
