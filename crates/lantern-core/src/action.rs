//! Player commands and orientation

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Facing direction on the grid.
///
/// Encoded 0..=3 so turns compose as modular arithmetic and saves stay
/// compatible with the map-document `start.dir` integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Direction {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// Unit step vector; y grows downward (origin top-left)
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// 90° counter-clockwise
    pub const fn left(&self) -> Direction {
        Direction::from_index(*self as u8 + 3)
    }

    /// 90° clockwise
    pub const fn right(&self) -> Direction {
        Direction::from_index(*self as u8 + 1)
    }

    /// 180°
    pub const fn reverse(&self) -> Direction {
        Direction::from_index(*self as u8 + 2)
    }

    const fn from_index(index: u8) -> Direction {
        match index % 4 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }
}

impl From<Direction> for u8 {
    fn from(dir: Direction) -> u8 {
        dir as u8
    }
}

impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 4 {
            Ok(Direction::from_index(value))
        } else {
            Err(format!("direction out of range: {value}"))
        }
    }
}

/// Logical exploration commands.
///
/// These are the inputs the session accepts while no overlay is active;
/// battle, merchant, shrine, story, and menu interactions go through
/// their own session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TurnLeft,
    TurnRight,
    StepForward,
    StepBack,
    Lantern,
    OpenMenu,
}
