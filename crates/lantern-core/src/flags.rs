//! Story flags
//!
//! One-time narrative and puzzle state. Monotonic: flags are set and
//! never cleared.

use serde::{Deserialize, Serialize};

/// Process-wide story flags, owned by the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryFlags {
    /// The cat door has been opened; secret doors read as floor
    pub cat_door_open: bool,

    /// The party has met Wisp, the shade-cat
    pub met_wisp: bool,

    /// The Ragpicker King has been visited
    pub ragpicker_visited: bool,
}
