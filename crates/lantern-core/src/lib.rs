//! lantern-core: Core game logic for Beneath the City of Lanterns
//!
//! A first-person, grid-based dungeon crawler: the player steps and turns
//! through a tile map rendered as a pseudo-3D corridor view, triggers
//! tile events, and resolves turn-based battles with a party of four.
//!
//! This crate contains all game logic with no I/O dependencies. State is
//! mutated only through [`Session`] operations, which return the events
//! they emitted; drawing and narration happen in the UI layer.

pub mod action;
pub mod battle;
pub mod grid;
pub mod item;
pub mod merchant;
pub mod party;
pub mod session;
pub mod view;

mod consts;
mod flags;
mod rng;

pub use consts::*;
pub use flags::StoryFlags;
pub use rng::GameRng;
pub use session::{Happening, MapMeta, Modal, Player, Session, Snapshot, StartPose};
