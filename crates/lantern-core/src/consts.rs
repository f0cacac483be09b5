//! Game-wide tuning constants

/// Number of adventurers in the party
pub const PARTY_SIZE: usize = 4;

/// Furthest depth band sampled by the corridor view
pub const MAX_DEPTH: i32 = 6;

/// Gold awarded for winning a battle
pub const VICTORY_GOLD: i32 = 5;

/// Hit points restored by a mending salve
pub const SALVE_HEAL: i32 = 8;

/// Chance (percent) that fleeing a battle succeeds
pub const FLEE_PERCENT: u32 = 60;

/// Delay before the wipe-recovery transition, so the final
/// battle log line stays on screen
pub const WIPE_DELAY_MS: u64 = 700;

/// Starting gold for a new session
pub const STARTING_GOLD: i32 = 20;
