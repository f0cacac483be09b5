//! Tile grid model
//!
//! Owns the tile map and resolves a logical tile's passability and
//! dynamic state (secret doors). Read-only after map load.

mod map;
mod tile;

pub use map::{GridError, TileGrid};
pub use tile::TileKind;
