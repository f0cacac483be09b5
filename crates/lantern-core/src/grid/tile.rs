//! Tile kinds

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::GridError;

/// Tile kind - a closed enumeration of the tile-code alphabet.
///
/// Unknown codes are rejected at map load; there is no catch-all
/// variant, so every cell dispatches to exactly one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[repr(u8)]
pub enum TileKind {
    /// `#` - solid wall
    #[default]
    Wall,
    /// `.` - open floor
    Floor,
    /// `T` - secret door, passable only once the cat door is open
    SecretDoor,
    /// `D` - locked gate, enterable but never opening; hint only
    Gate,
    /// `M` - merchant stall
    Merchant,
    /// `B` - battle trigger
    Battle,
    /// `S` - shrine
    Shrine,
    /// `E` - story event trigger
    Event,
    /// `P` - lantern alcove
    Alcove,
}

impl TileKind {
    /// The single-character map code for this tile
    pub const fn code(&self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::SecretDoor => 'T',
            TileKind::Gate => 'D',
            TileKind::Merchant => 'M',
            TileKind::Battle => 'B',
            TileKind::Shrine => 'S',
            TileKind::Event => 'E',
            TileKind::Alcove => 'P',
        }
    }

    /// Parse a map code
    pub fn from_code(code: char) -> Result<Self, GridError> {
        Ok(match code {
            '#' => TileKind::Wall,
            '.' => TileKind::Floor,
            'T' => TileKind::SecretDoor,
            'D' => TileKind::Gate,
            'M' => TileKind::Merchant,
            'B' => TileKind::Battle,
            'S' => TileKind::Shrine,
            'E' => TileKind::Event,
            'P' => TileKind::Alcove,
            _ => return Err(GridError::UnknownCode(code)),
        })
    }

    /// Check if the party can step onto this tile.
    ///
    /// Everything but walls and closed secret doors is passable -
    /// including gates, whose entry only yields a hint. A secret door
    /// resolves to floor before this check once the cat door is open.
    pub const fn is_passable(&self) -> bool {
        !matches!(self, TileKind::Wall | TileKind::SecretDoor)
    }

    /// Check if the corridor view draws this tile as a wall face.
    /// Gates are drawn too, but with their own surface.
    pub const fn blocks_view(&self) -> bool {
        matches!(self, TileKind::Wall | TileKind::SecretDoor)
    }
}

// Serde as the one-character map code, so saved tile rows stay readable.
impl Serialize for TileKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.code().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TileKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = char::deserialize(deserializer)?;
        TileKind::from_code(code).map_err(serde::de::Error::custom)
    }
}
