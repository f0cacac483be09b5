//! The tile grid
//!
//! Rectangular, row-major, origin top-left. Stored tiles never change
//! after load; dynamic state (the secret-door rewrite) is a pure
//! function of stored tile + story flags.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::StoryFlags;
use super::TileKind;

/// Grid construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("unknown tile code '{0}'")]
    UnknownCode(char),

    #[error("grid has no rows")]
    Empty,

    #[error("row {row} is {got} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// The tile map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Build a grid from equal-length row strings of tile codes
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = rows.len();
        if height == 0 {
            return Err(GridError::Empty);
        }
        let width = rows[0].as_ref().chars().count();
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let got = row.chars().count();
            if got != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    got,
                });
            }
            for code in row.chars() {
                tiles.push(TileKind::from_code(code)?);
            }
        }

        Ok(Self {
            width: width as i32,
            height: height as i32,
            tiles,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a coordinate is inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// The stored tile, without dynamic resolution
    pub fn stored(&self, x: i32, y: i32) -> Option<TileKind> {
        self.in_bounds(x, y)
            .then(|| self.tiles[(y * self.width + x) as usize])
    }

    /// Resolve the logical tile at a coordinate.
    ///
    /// Out-of-bounds reads resolve to wall. A secret door reads as floor
    /// once the cat door is open; the stored grid is never mutated.
    pub fn tile_at(&self, x: i32, y: i32, flags: &StoryFlags) -> TileKind {
        match self.stored(x, y) {
            None => TileKind::Wall,
            Some(TileKind::SecretDoor) if flags.cat_door_open => TileKind::Floor,
            Some(tile) => tile,
        }
    }

    /// The grid as map-code row strings (the save/document form)
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.tiles[(y * self.width + x) as usize].code())
                    .collect()
            })
            .collect()
    }
}

// Serde round-trips the grid as its row strings, matching the map
// document and save snapshot forms.
impl Serialize for TileGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TileGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        TileGrid::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}
