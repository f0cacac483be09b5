//! Map documents
//!
//! A map document supplies `{id, name, width, height, tiles, start}`.
//! Loading validates the tile rows against the declared dimensions and
//! the start pose against the grid, then hands the core its own types.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lantern_core::action::Direction;
use lantern_core::grid::{GridError, TileGrid};
use lantern_core::{MapMeta, StartPose};

/// Map loading errors. A failed load is fatal to the session; there is
/// no retry here.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("map parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("bad tile grid: {0}")]
    Grid(#[from] GridError),

    #[error("declared {declared_w}x{declared_h}, tiles are {got_w}x{got_h}")]
    DimensionMismatch {
        declared_w: i32,
        declared_h: i32,
        got_w: i32,
        got_h: i32,
    },

    #[error("start {x},{y} is not on a passable tile")]
    BadStart { x: i32, y: i32 },

    #[error("start direction {0} out of range")]
    BadStartDir(u8),

    #[error("no built-in map named '{0}'")]
    UnknownMap(String),
}

/// Start pose as it appears in a document: direction is the 0..=3
/// integer encoding
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartDoc {
    pub x: i32,
    pub y: i32,
    pub dir: u8,
}

/// The raw map document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapDoc {
    pub id: String,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<String>,
    pub start: StartDoc,
}

/// A validated map, in core types
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub meta: MapMeta,
    pub grid: TileGrid,
    pub start: StartPose,
}

const MAP_SEWERS: &str = include_str!("../content/map_sewers.json");

/// Built-in map documents shipped with the game
const BUILTIN: &[(&str, &str)] = &[("map_sewers", MAP_SEWERS)];

/// Load a built-in map by id
pub fn load_builtin(id: &str) -> Result<LoadedMap, MapError> {
    let doc = BUILTIN
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, json)| *json)
        .ok_or_else(|| MapError::UnknownMap(id.to_string()))?;
    parse_map(doc)
}

/// Load a map document from a file on disk
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadedMap, MapError> {
    let json = std::fs::read_to_string(path)?;
    parse_map(&json)
}

/// Parse and validate a map document
pub fn parse_map(json: &str) -> Result<LoadedMap, MapError> {
    let doc: MapDoc = serde_json::from_str(json)?;
    let grid = TileGrid::from_rows(&doc.tiles)?;

    if grid.width() != doc.width || grid.height() != doc.height {
        return Err(MapError::DimensionMismatch {
            declared_w: doc.width,
            declared_h: doc.height,
            got_w: grid.width(),
            got_h: grid.height(),
        });
    }

    let dir = Direction::try_from(doc.start.dir).map_err(|_| MapError::BadStartDir(doc.start.dir))?;
    let start = StartPose {
        x: doc.start.x,
        y: doc.start.y,
        dir,
    };
    if !grid
        .stored(start.x, start.y)
        .is_some_and(|tile| tile.is_passable())
    {
        return Err(MapError::BadStart {
            x: start.x,
            y: start.y,
        });
    }

    Ok(LoadedMap {
        meta: MapMeta {
            id: doc.id,
            name: doc.name,
        },
        grid,
        start,
    })
}
