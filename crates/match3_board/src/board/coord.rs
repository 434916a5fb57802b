use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A cell position on the board. Row 0 is the bottom row.
///
/// Coordinates are signed so that positions outside the board (negative, or
/// above the top row for drop-in spawns) can be expressed and bounds-checked.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell `steps` steps away along `step`.
    pub const fn offset(self, step: Step, steps: i32) -> Self {
        Self {
            x: self.x + step.dx * steps,
            y: self.y + step.dy * steps,
        }
    }

    /// Manhattan distance between two cells.
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A unit walking direction. Each component is clamped to `-1..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    dx: i32,
    dy: i32,
}

impl Step {
    pub const LEFT: Self = Self { dx: -1, dy: 0 };
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };
    pub const UP: Self = Self { dx: 0, dy: 1 };
    pub const DOWN: Self = Self { dx: 0, dy: -1 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    pub const fn dx(self) -> i32 {
        self.dx
    }

    pub const fn dy(self) -> i32 {
        self.dy
    }

    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub const fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The two opposite directions making up this axis.
    pub const fn steps(self) -> [Step; 2] {
        match self {
            Self::Horizontal => [Step::LEFT, Step::RIGHT],
            Self::Vertical => [Step::DOWN, Step::UP],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_components_are_clamped() {
        let step = Step::new(5, -7);
        assert_eq!((step.dx(), step.dy()), (1, -1), "components clamp to unit");
        assert!(Step::new(0, 0).is_zero(), "zero step stays zero");
    }

    #[test]
    fn offset_walks_along_step() {
        let origin = Coord::new(2, 2);
        assert_eq!(origin.offset(Step::LEFT, 2), Coord::new(0, 2), "two steps left");
        assert_eq!(origin.offset(Step::UP, 3), Coord::new(2, 5), "three steps up");
    }
}
