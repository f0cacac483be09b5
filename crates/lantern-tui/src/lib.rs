//! lantern-tui: Terminal UI layer using ratatui
//!
//! Renders the corridor view and overlays, maps keys to commands, and
//! turns the core's structured events into the game's narration.

pub mod app;
pub mod input;
pub mod narration;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
