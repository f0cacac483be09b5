//! lantern-assets: Map content for Beneath the City of Lanterns
//!
//! The map data source collaborator: JSON map documents keyed by a
//! string id, validated into the core's grid types on load. The core
//! treats this as its sole map-loading contract.

mod map;

pub use map::{LoadedMap, MapDoc, MapError, StartDoc, load_builtin, load_file, parse_map};
